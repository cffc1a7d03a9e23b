// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{
    DateFilter, Entrada, Establecimiento, PaymentMethod, Producto, QuantitySelector, Role,
    Ticket, UserLookup,
};
use crate::routing::{authorize, AccessContext, Route, RouteDecision};
use crate::services::api_client::ApiError;
use crate::state::{CartState, EstablishmentState, SessionError, SessionState};
use crate::utils::AppStorage;
use crate::viewmodels::dashboard_viewmodel::{DashboardData, DashboardFilters};

/// Datos del catálogo del establecimiento activo
#[derive(Clone, Debug, Default)]
pub struct CatalogData {
    pub establecimientos: Vec<Establecimiento>,
    pub establecimientos_loaded: bool,
    pub entradas: Vec<Entrada>,
    pub productos: Vec<Producto>,
    /// Establecimiento del que se cargó el catálogo
    pub loaded_for: Option<i64>,
    pub loading: bool,
}

/// Filtros de los listados de tienda
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogFilters {
    pub search: String,
    pub date_filter: DateFilter,
    pub page: usize,
}

impl Default for CatalogFilters {
    fn default() -> Self {
        Self { search: String::new(), date_filter: DateFilter::All, page: 1 }
    }
}

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub storage: AppStorage,
    pub session: SessionState,
    pub establishment: EstablishmentState,
    pub cart: CartState,

    // Navegación
    pub current_route: Rc<RefCell<Route>>,

    // Tienda
    pub catalog: Rc<RefCell<CatalogData>>,
    pub filters: Rc<RefCell<CatalogFilters>>,
    /// Selector de la ficha de detalle; se inicializa al cargar el artículo
    pub quantity: Rc<RefCell<Option<QuantitySelector>>>,
    pub payment_method: Rc<RefCell<PaymentMethod>>,
    pub processing_checkout: Rc<RefCell<bool>>,
    /// Ticket recién creado (pantalla de confirmación del carrito)
    pub last_ticket: Rc<RefCell<Option<Ticket>>>,
    pub tickets_search: Rc<RefCell<String>>,

    // Dashboard
    pub dashboard: Rc<RefCell<DashboardData>>,
    pub dashboard_filters: Rc<RefCell<DashboardFilters>>,

    // Mensaje de error visible (login, registro, carga)
    pub notice: Rc<RefCell<Option<String>>>,

    // Reactivity: callbacks para notificar cambios
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    /// Crear estado a partir del storage persistente
    pub fn new(storage: AppStorage) -> Self {
        Self {
            session: SessionState::load(storage.clone()),
            establishment: EstablishmentState::load(storage.clone()),
            cart: CartState::load(storage.clone()),
            storage,

            current_route: Rc::new(RefCell::new(Route::Login)),

            catalog: Rc::new(RefCell::new(CatalogData::default())),
            filters: Rc::new(RefCell::new(CatalogFilters::default())),
            quantity: Rc::new(RefCell::new(None)),
            payment_method: Rc::new(RefCell::new(PaymentMethod::default())),
            processing_checkout: Rc::new(RefCell::new(false)),
            last_ticket: Rc::new(RefCell::new(None)),
            tickets_search: Rc::new(RefCell::new(String::new())),

            dashboard: Rc::new(RefCell::new(DashboardData::default())),
            dashboard_filters: Rc::new(RefCell::new(DashboardFilters::default())),

            notice: Rc::new(RefCell::new(None)),

            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Contexto para el autorizador de rutas
    pub fn access_context(&self) -> AccessContext {
        AccessContext {
            has_token: self.session.snapshot().is_authenticated(),
            role: self.session.get_role(),
            has_establishment: self.establishment.is_selected(),
        }
    }

    pub fn route(&self) -> Route {
        self.current_route.borrow().clone()
    }

    /// Decisión del autorizador para la ruta actual
    pub fn decide(&self) -> RouteDecision {
        authorize(&self.route(), &self.access_context())
    }

    /// Cambiar de ruta. El estado por página se reinicia al cambiar de página.
    pub fn set_route(&self, route: Route) {
        let previous = self.route();
        if previous != route {
            *self.filters.borrow_mut() = CatalogFilters::default();
            *self.tickets_search.borrow_mut() = String::new();
            *self.quantity.borrow_mut() = None;
            *self.last_ticket.borrow_mut() = None;
            *self.notice.borrow_mut() = None;
        }
        *self.current_route.borrow_mut() = route;
    }

    pub fn role(&self) -> Option<Role> {
        self.session.get_role()
    }

    /// Aplica la consulta de rol; un fallo también deselecciona el establecimiento
    pub fn apply_lookup(&self, result: Result<UserLookup, ApiError>) -> Result<Role, SessionError> {
        let outcome = self.session.apply_lookup(result);
        if outcome.is_err() {
            self.establishment.clear();
        }
        outcome
    }

    /// Logout: borra la sesión y el establecimiento. El carrito se conserva.
    pub fn clear_session(&self) {
        self.session.clear();
        self.establishment.clear();
        *self.catalog.borrow_mut() = CatalogData::default();
        *self.dashboard.borrow_mut() = DashboardData::default();
        *self.dashboard_filters.borrow_mut() = DashboardFilters::default();
    }

    pub fn set_notice(&self, message: Option<String>) {
        *self.notice.borrow_mut() = message;
    }

    /// Suscribirse a cambios de estado crítico
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers
    pub fn notify_subscribers(&self) {
        let subscribers: Vec<Rc<dyn Fn()>> = self.change_subscribers.borrow().clone();
        for callback in subscribers.iter() {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CartItem, Producto};
    use crate::utils::{CART_KEY, ESTABLISHMENT_KEY, TOKEN_KEY};

    fn sede() -> Establecimiento {
        Establecimiento { id: 5, nombre: "Sede Sur".to_string(), comercio_id: None, comercio: None }
    }

    fn producto() -> Producto {
        Producto {
            id: 9,
            nombre: "Postal".to_string(),
            precio: 2.0,
            stock: 3,
            descripcion: String::new(),
            imagen: None,
            establecimiento_id: Some(5),
        }
    }

    fn cliente() -> UserLookup {
        UserLookup { id: 1, username: "ana".to_string(), rol: "CLIENTE".to_string(), comercio_id: None }
    }

    #[test]
    fn test_logout_conserva_carrito() {
        let storage = AppStorage::in_memory();
        let state = AppState::new(storage.clone());
        state.session.start("tok".to_string(), "ana");
        state.establishment.select(sede());
        state.cart.add(CartItem::from_producto(&producto(), 1)).unwrap();

        state.clear_session();

        assert_eq!(state.access_context(), AccessContext::default());
        assert_eq!(storage.get_string(TOKEN_KEY), None);
        assert_eq!(storage.get_string(ESTABLISHMENT_KEY), None);
        assert!(storage.get_string(CART_KEY).is_some());
        assert_eq!(state.cart.len(), 1);
    }

    #[test]
    fn test_lookup_fallido_deselecciona_establecimiento() {
        let state = AppState::new(AppStorage::in_memory());
        state.session.start("tok".to_string(), "ana");
        state.establishment.select(sede());
        state.set_route(Route::Carrito);
        assert_eq!(state.decide(), RouteDecision::Suspend);

        assert!(state.apply_lookup(Err(ApiError::Network("offline".to_string()))).is_err());
        assert!(!state.establishment.is_selected());
        assert_eq!(state.session.get_token(), None);
        assert_eq!(state.decide(), RouteDecision::Redirect(Route::Login));
    }

    #[test]
    fn test_recarga_con_token_suspende_hasta_resolver() {
        let storage = AppStorage::in_memory();
        {
            let state = AppState::new(storage.clone());
            state.session.start("tok".to_string(), "ana");
            state.establishment.select(sede());
        }
        let state = AppState::new(storage);
        state.set_route(Route::Carrito);
        assert_eq!(state.decide(), RouteDecision::Suspend);

        state.apply_lookup(Ok(cliente())).unwrap();
        assert_eq!(state.decide(), RouteDecision::Render(Route::Carrito));
    }

    #[test]
    fn test_cambio_de_pagina_reinicia_filtros() {
        let state = AppState::new(AppStorage::in_memory());
        state.set_route(Route::Productos);
        state.filters.borrow_mut().search = "postal".to_string();
        state.filters.borrow_mut().page = 2;
        state.set_route(Route::Productos);
        assert_eq!(state.filters.borrow().page, 2);
        state.set_route(Route::Entradas);
        assert_eq!(*state.filters.borrow(), CatalogFilters::default());
    }
}
