// ============================================================================
// STOREFRONT VIEWMODEL - Catálogo, carrito y tickets de la tienda
// ============================================================================

use chrono::{NaiveDate, Utc};
use gloo_timers::future::TimeoutFuture;

use crate::config::CONFIG;
use crate::models::catalog::{change_page, matches_search, paginate};
use crate::models::{
    CartItem, DateFilter, Entrada, ItemKind, Page, PaymentMethod, Producto, QuantitySelector,
    Ticket,
};
use crate::routing::Route;
use crate::services::ApiClient;
use crate::state::AppState;

/// Establecimiento cuyo catálogo se muestra: el de la vista previa o el elegido
pub fn active_establishment_id(state: &AppState) -> Option<i64> {
    match state.route() {
        Route::Preview { establecimiento_id, .. } => Some(establecimiento_id),
        _ => state.establishment.get().map(|e| e.id),
    }
}

/// En la vista previa de un admin no se compra: el historial de tickets es compartido
pub fn can_checkout(state: &AppState) -> bool {
    !matches!(state.route(), Route::Preview { .. }) && !state.cart.is_empty()
}

/// Productos del establecimiento; los que no indican establecimiento se muestran en todos
pub fn filter_productos(productos: &[Producto], establecimiento_id: Option<i64>, search: &str) -> Vec<Producto> {
    productos
        .iter()
        .filter(|p| match (p.establecimiento_id, establecimiento_id) {
            (Some(propio), Some(activo)) => propio == activo,
            _ => true,
        })
        .filter(|p| matches_search(&p.nombre, search))
        .cloned()
        .collect()
}

pub fn filter_entradas(entradas: &[Entrada], search: &str, date_filter: DateFilter, hoy: NaiveDate) -> Vec<Entrada> {
    entradas
        .iter()
        .filter(|e| matches_search(&e.nombre, search))
        .filter(|e| date_filter.matches(e.fecha, hoy))
        .cloned()
        .collect()
}

/// Tickets más recientes primero
pub fn filter_tickets(tickets: &[Ticket], term: &str) -> Vec<Ticket> {
    let mut filtered: Vec<Ticket> = tickets.iter().filter(|t| t.matches_search(term)).cloned().collect();
    filtered.reverse();
    filtered
}

/// Página actual de productos según los filtros del estado
pub fn productos_page(state: &AppState) -> Page<Producto> {
    let filters = state.filters.borrow().clone();
    let catalog = state.catalog.borrow();
    let filtered = filter_productos(&catalog.productos, active_establishment_id(state), &filters.search);
    paginate(&filtered, filters.page, CONFIG.catalog_page_size)
}

pub fn entradas_page(state: &AppState, hoy: NaiveDate) -> Page<Entrada> {
    let filters = state.filters.borrow().clone();
    let catalog = state.catalog.borrow();
    let filtered = filter_entradas(&catalog.entradas, &filters.search, filters.date_filter, hoy);
    paginate(&filtered, filters.page, CONFIG.catalog_page_size)
}

/// Cambiar búsqueda (vuelve a la página 1)
pub fn set_search(state: &AppState, term: String) {
    let mut filters = state.filters.borrow_mut();
    filters.search = term;
    filters.page = 1;
}

pub fn set_date_filter(state: &AppState, date_filter: DateFilter) {
    let mut filters = state.filters.borrow_mut();
    filters.date_filter = date_filter;
    filters.page = 1;
}

/// Cambio de página; fuera de rango se ignora
pub fn go_to_page(state: &AppState, requested: usize, total_pages: usize) {
    let mut filters = state.filters.borrow_mut();
    filters.page = change_page(filters.page, requested, total_pages);
}

/// Selector de la ficha: se crea al ver el artículo por primera vez
pub fn quantity_for(state: &AppState, stock: Option<u32>) -> QuantitySelector {
    let mut quantity = state.quantity.borrow_mut();
    *quantity.get_or_insert_with(|| match stock {
        Some(stock) => QuantitySelector::with_stock(stock),
        None => QuantitySelector::unbounded(),
    })
}

pub fn update_quantity(state: &AppState, increment: bool) {
    if let Some(selector) = state.quantity.borrow_mut().as_mut() {
        if increment {
            selector.increment();
        } else {
            selector.decrement();
        }
    }
}

/// ViewModel de la tienda
pub struct StorefrontViewModel {
    api_client: ApiClient,
}

impl StorefrontViewModel {
    pub fn for_state(state: &AppState) -> Self {
        Self { api_client: ApiClient::with_token(state.session.get_token()) }
    }

    /// Establecimientos disponibles para elegir
    pub async fn load_establecimientos(&self, state: &AppState) {
        state.catalog.borrow_mut().loading = true;
        let establecimientos = self.api_client.list_establecimientos().await.unwrap_or_else(|e| {
            log::error!("❌ [CATALOGO] Error obteniendo establecimientos: {}", e);
            Vec::new()
        });
        let mut catalog = state.catalog.borrow_mut();
        catalog.establecimientos = establecimientos;
        catalog.establecimientos_loaded = true;
        catalog.loading = false;
    }

    /// Entradas y productos del establecimiento; un fallo deja la lista vacía
    pub async fn load_catalog(&self, state: &AppState, establecimiento_id: i64) {
        state.catalog.borrow_mut().loading = true;
        log::info!("📚 [CATALOGO] Cargando catálogo del establecimiento {}", establecimiento_id);

        let entradas = self.api_client.list_entradas().await.unwrap_or_else(|e| {
            log::error!("❌ [CATALOGO] Error obteniendo entradas: {}", e);
            Vec::new()
        });
        let productos = self.api_client.list_productos().await.unwrap_or_else(|e| {
            log::error!("❌ [CATALOGO] Error obteniendo productos: {}", e);
            Vec::new()
        });

        let mut catalog = state.catalog.borrow_mut();
        catalog.entradas = entradas;
        catalog.productos = productos;
        catalog.loaded_for = Some(establecimiento_id);
        catalog.loading = false;
    }

    /// Cierra el pedido tras la pausa de "procesando pago"
    pub async fn checkout(&self, state: &AppState) -> Option<Ticket> {
        if !can_checkout(state) {
            log::warn!("⚠️ [CART] Checkout no permitido en {}", state.route());
            return None;
        }
        *state.processing_checkout.borrow_mut() = true;
        TimeoutFuture::new(CONFIG.checkout_delay_ms).await;

        let metodo = *state.payment_method.borrow();
        let result = state.cart.checkout(metodo, Utc::now());
        *state.processing_checkout.borrow_mut() = false;

        match result {
            Ok(ticket) => ticket,
            Err(e) => {
                log::error!("❌ [CART] Error guardando ticket: {}", e);
                None
            }
        }
    }
}

/// Añade la cantidad seleccionada a una nueva línea del carrito
pub fn add_producto_to_cart(state: &AppState, producto: &Producto) -> bool {
    let cantidad = quantity_for(state, Some(producto.stock));
    if !cantidad.in_stock() || producto.stock == 0 {
        return false;
    }
    push_item(state, CartItem::from_producto(producto, cantidad.value()))
}

pub fn add_entrada_to_cart(state: &AppState, entrada: &Entrada) -> bool {
    let cantidad = quantity_for(state, None);
    push_item(state, CartItem::from_entrada(entrada, cantidad.value()))
}

fn push_item(state: &AppState, item: CartItem) -> bool {
    match state.cart.add(item) {
        Ok(()) => true,
        Err(e) => {
            log::error!("❌ [CART] Error guardando carrito: {}", e);
            false
        }
    }
}

pub fn in_cart(state: &AppState, id: i64, tipo: ItemKind) -> bool {
    state.cart.contains(id, tipo)
}

pub fn set_payment_method(state: &AppState, metodo: PaymentMethod) {
    *state.payment_method.borrow_mut() = metodo;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Establecimiento;
    use crate::routing::PreviewSection;
    use crate::utils::AppStorage;

    fn fecha(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn producto(id: i64, nombre: &str, establecimiento_id: Option<i64>, stock: u32) -> Producto {
        Producto {
            id,
            nombre: nombre.to_string(),
            precio: 10.0,
            stock,
            descripcion: String::new(),
            imagen: None,
            establecimiento_id,
        }
    }

    fn entrada(id: i64, nombre: &str, dia: NaiveDate) -> Entrada {
        Entrada {
            id,
            nombre: nombre.to_string(),
            precio: 12.0,
            tipo: "General".to_string(),
            fecha: dia,
            descripcion: String::new(),
            imagen: None,
        }
    }

    fn sede(id: i64) -> Establecimiento {
        Establecimiento { id, nombre: format!("Sede {}", id), comercio_id: None, comercio: None }
    }

    #[test]
    fn test_productos_por_establecimiento_y_busqueda() {
        let productos = vec![
            producto(1, "Catálogo Picasso", Some(1), 5),
            producto(2, "Postal Picasso", Some(2), 5),
            producto(3, "Lámina", None, 5),
        ];
        let ids: Vec<i64> = filter_productos(&productos, Some(1), "").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        let ids: Vec<i64> = filter_productos(&productos, Some(2), "PICASSO").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_entradas_por_fecha() {
        let hoy = fecha(2025, 6, 4);
        let entradas = vec![
            entrada(1, "Visita guiada", hoy),
            entrada(2, "Taller", fecha(2025, 6, 20)),
            entrada(3, "Concierto", fecha(2026, 1, 10)),
        ];
        assert_eq!(filter_entradas(&entradas, "", DateFilter::Today, hoy).len(), 1);
        assert_eq!(filter_entradas(&entradas, "", DateFilter::Month, hoy).len(), 2);
        assert_eq!(filter_entradas(&entradas, "taller", DateFilter::All, hoy).len(), 1);
    }

    #[test]
    fn test_paginacion_ignora_fuera_de_rango() {
        let state = AppState::new(AppStorage::in_memory());
        go_to_page(&state, 3, 2);
        assert_eq!(state.filters.borrow().page, 1);
        go_to_page(&state, 2, 2);
        assert_eq!(state.filters.borrow().page, 2);
        set_search(&state, "x".to_string());
        assert_eq!(state.filters.borrow().page, 1);
    }

    #[test]
    fn test_preview_usa_su_establecimiento() {
        let state = AppState::new(AppStorage::in_memory());
        state.establishment.select(sede(1));
        assert_eq!(active_establishment_id(&state), Some(1));
        state.set_route(Route::Preview { establecimiento_id: 8, section: PreviewSection::Productos });
        assert_eq!(active_establishment_id(&state), Some(8));
    }

    #[test]
    fn test_cantidad_limitada_por_stock() {
        let state = AppState::new(AppStorage::in_memory());
        let postal = producto(4, "Postal", Some(1), 2);
        assert_eq!(quantity_for(&state, Some(postal.stock)).value(), 1);
        update_quantity(&state, true);
        update_quantity(&state, true);
        assert_eq!(quantity_for(&state, Some(postal.stock)).value(), 2);

        assert!(add_producto_to_cart(&state, &postal));
        assert!(in_cart(&state, 4, ItemKind::Producto));
        assert!(!in_cart(&state, 4, ItemKind::Entrada));
        assert_eq!(state.cart.get().items()[0].precio_total, 20.0);
    }

    #[test]
    fn test_sin_stock_no_se_anade() {
        let state = AppState::new(AppStorage::in_memory());
        assert!(!add_producto_to_cart(&state, &producto(5, "Agotado", None, 0)));
        assert!(state.cart.is_empty());
    }

    #[test]
    fn test_tickets_recientes_primero() {
        let state = AppState::new(AppStorage::in_memory());
        let visita = entrada(1, "Visita", fecha(2025, 6, 4));
        for _ in 0..2 {
            assert!(add_entrada_to_cart(&state, &visita));
            state.cart.checkout(PaymentMethod::Tarjeta, Utc::now()).unwrap();
        }
        let tickets = state.cart.tickets();
        let listados = filter_tickets(&tickets, "");
        assert_eq!(listados.len(), 2);
        assert_eq!(listados[0].id, tickets[1].id);
        assert_eq!(filter_tickets(&tickets, &tickets[0].id.to_lowercase()).len(), 1);
    }

    #[test]
    fn test_vista_previa_no_permite_checkout() {
        let state = AppState::new(AppStorage::in_memory());
        assert!(add_entrada_to_cart(&state, &entrada(1, "Visita", fecha(2025, 6, 4))));

        state.set_route(Route::Preview { establecimiento_id: 1, section: PreviewSection::Carrito });
        assert!(!can_checkout(&state));

        state.set_route(Route::Carrito);
        assert!(can_checkout(&state));
    }
}
