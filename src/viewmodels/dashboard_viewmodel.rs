// ============================================================================
// DASHBOARD VIEWMODEL - Back-office de administradores
// ============================================================================

use crate::models::catalog::matches_search;
use crate::models::{
    Comercio, Establecimiento, Extra, LineaVenta, NewEstablecimiento, Producto, Role, Usuario,
    Venta,
};
use crate::services::{validate_nombre, ApiClient, ApiError};
use crate::state::AppState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DashboardSection {
    Usuarios,
    Comercios,
    #[default]
    Establecimientos,
    Productos,
    Extras,
    LineasVenta,
    Ventas,
}

impl DashboardSection {
    pub const ALL: [DashboardSection; 7] = [
        DashboardSection::Usuarios,
        DashboardSection::Comercios,
        DashboardSection::Establecimientos,
        DashboardSection::Productos,
        DashboardSection::Extras,
        DashboardSection::LineasVenta,
        DashboardSection::Ventas,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DashboardSection::Usuarios => "Usuarios",
            DashboardSection::Comercios => "Comercios",
            DashboardSection::Establecimientos => "Establecimientos",
            DashboardSection::Productos => "Productos",
            DashboardSection::Extras => "Extras",
            DashboardSection::LineasVenta => "Líneas de Venta",
            DashboardSection::Ventas => "Ventas",
        }
    }

    /// Comercios solo para SuperAdmin; el resto para cualquier admin
    pub fn visible_for(&self, role: Role) -> bool {
        match self {
            DashboardSection::Comercios => role == Role::SuperAdmin,
            _ => role.is_admin(),
        }
    }

    pub fn for_role(role: Role) -> Vec<DashboardSection> {
        Self::ALL.iter().copied().filter(|s| s.visible_for(role)).collect()
    }
}

/// Registros cargados por sección
#[derive(Clone, Debug, Default)]
pub struct DashboardData {
    pub usuarios: Vec<Usuario>,
    pub comercios: Vec<Comercio>,
    pub establecimientos: Vec<Establecimiento>,
    pub productos: Vec<Producto>,
    pub extras: Vec<Extra>,
    pub lineas: Vec<LineaVenta>,
    pub ventas: Vec<Venta>,
    pub loaded: Option<DashboardSection>,
    pub loading: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardFilters {
    pub section: DashboardSection,
    pub search: String,
    pub selected_comercio: Option<i64>,
    pub selected_establecimiento: Option<i64>,
}

impl DashboardFilters {
    /// Cambiar de sección limpia la selección de comercio/establecimiento
    pub fn set_section(&mut self, section: DashboardSection) {
        if self.section != section {
            self.section = section;
            self.search.clear();
            self.selected_comercio = None;
            self.selected_establecimiento = None;
        }
    }
}

/// Establecimientos visibles: un Admin solo ve los de su comercio
pub fn filter_establecimientos(
    establecimientos: &[Establecimiento],
    role: Role,
    own_comercio: Option<i64>,
    filters: &DashboardFilters,
) -> Vec<Establecimiento> {
    establecimientos
        .iter()
        .filter(|e| match role {
            Role::SuperAdmin => true,
            Role::Admin => own_comercio.is_some() && e.owner_id() == own_comercio,
            Role::Cliente => false,
        })
        .filter(|e| filters.selected_comercio.map_or(true, |id| e.owner_id() == Some(id)))
        .filter(|e| {
            matches_search(&e.nombre, &filters.search)
                || e.comercio_nombre().map_or(false, |c| matches_search(c, &filters.search))
        })
        .cloned()
        .collect()
}

pub fn filter_productos(productos: &[Producto], filters: &DashboardFilters) -> Vec<Producto> {
    productos
        .iter()
        .filter(|p| matches_search(&p.nombre, &filters.search))
        .filter(|p| {
            filters
                .selected_establecimiento
                .map_or(true, |id| p.establecimiento_id == Some(id))
        })
        .cloned()
        .collect()
}

pub fn filter_extras(extras: &[Extra], filters: &DashboardFilters) -> Vec<Extra> {
    extras
        .iter()
        .filter(|e| matches_search(&e.nombre, &filters.search))
        .filter(|e| {
            filters
                .selected_establecimiento
                .map_or(true, |id| e.establecimiento_id == Some(id))
        })
        .cloned()
        .collect()
}

pub fn filter_usuarios(usuarios: &[Usuario], filters: &DashboardFilters) -> Vec<Usuario> {
    usuarios
        .iter()
        .filter(|u| matches_search(&u.username, &filters.search))
        .cloned()
        .collect()
}

pub fn filter_comercios(comercios: &[Comercio], filters: &DashboardFilters) -> Vec<Comercio> {
    comercios
        .iter()
        .filter(|c| matches_search(&c.nombre, &filters.search))
        .cloned()
        .collect()
}

/// Comercio al que se asigna un establecimiento nuevo
pub fn target_comercio(role: Role, own_comercio: Option<i64>, filters: &DashboardFilters) -> Option<i64> {
    match role {
        Role::Admin => own_comercio,
        _ => filters.selected_comercio,
    }
}

fn or_empty<T>(result: Result<Vec<T>, ApiError>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        log::error!("❌ [DASHBOARD] Error obteniendo {}: {}", what, e);
        Vec::new()
    })
}

/// ViewModel del dashboard
pub struct DashboardViewModel {
    api_client: ApiClient,
}

impl DashboardViewModel {
    pub fn for_state(state: &AppState) -> Self {
        Self { api_client: ApiClient::with_token(state.session.get_token()) }
    }

    /// Carga los registros de la sección; un fallo deja la lista vacía
    pub async fn load_section(&self, state: &AppState, section: DashboardSection) {
        state.dashboard.borrow_mut().loading = true;
        log::info!("📊 [DASHBOARD] Cargando sección {}", section.label());

        // Los filtros por establecimiento/comercio necesitan su lista
        let needs_establecimientos = matches!(
            section,
            DashboardSection::Establecimientos | DashboardSection::Productos | DashboardSection::Extras
        );
        if needs_establecimientos {
            let list = or_empty(self.api_client.list_establecimientos().await, "establecimientos");
            state.dashboard.borrow_mut().establecimientos = list;
        }
        let is_superadmin = state.role() == Some(Role::SuperAdmin);
        if is_superadmin && matches!(section, DashboardSection::Comercios | DashboardSection::Establecimientos) {
            let list = or_empty(self.api_client.list_comercios().await, "comercios");
            state.dashboard.borrow_mut().comercios = list;
        }

        match section {
            DashboardSection::Usuarios => {
                let list = or_empty(self.api_client.list_usuarios().await, "usuarios");
                state.dashboard.borrow_mut().usuarios = list;
            }
            DashboardSection::Productos => {
                let list = or_empty(self.api_client.list_productos().await, "productos");
                state.dashboard.borrow_mut().productos = list;
            }
            DashboardSection::Extras => {
                let list = or_empty(self.api_client.list_extras().await, "extras");
                state.dashboard.borrow_mut().extras = list;
            }
            DashboardSection::LineasVenta => {
                let list = or_empty(self.api_client.list_lineas_venta().await, "líneas de venta");
                state.dashboard.borrow_mut().lineas = list;
            }
            DashboardSection::Ventas => {
                let list = or_empty(self.api_client.list_ventas().await, "ventas");
                state.dashboard.borrow_mut().ventas = list;
            }
            DashboardSection::Comercios | DashboardSection::Establecimientos => {}
        }

        let mut data = state.dashboard.borrow_mut();
        data.loaded = Some(section);
        data.loading = false;
    }

    /// Borra un registro de la sección y lo quita de la lista local
    pub async fn delete(&self, state: &AppState, section: DashboardSection, id: i64) -> Result<(), ApiError> {
        match section {
            DashboardSection::Usuarios => self.api_client.delete_usuario(id).await?,
            DashboardSection::Comercios => self.api_client.delete_comercio(id).await?,
            DashboardSection::Establecimientos => self.api_client.delete_establecimiento(id).await?,
            DashboardSection::Productos => self.api_client.delete_producto(id).await?,
            DashboardSection::Extras => self.api_client.delete_extra(id).await?,
            DashboardSection::LineasVenta => self.api_client.delete_linea_venta(id).await?,
            DashboardSection::Ventas => self.api_client.delete_venta(id).await?,
        }
        log::info!("🗑️ [DASHBOARD] {} {} eliminado", section.label(), id);
        remove_local(state, section, id);
        Ok(())
    }

    pub async fn create_establecimiento(&self, state: &AppState, nombre: &str) -> Result<(), String> {
        let nombre = validate_nombre(nombre).map_err(|e| e.to_string())?;
        let role = state.role().ok_or_else(|| "Sesión no resuelta".to_string())?;
        let own = state.session.get_profile().and_then(|p| p.comercio_id);
        let comercio_id = target_comercio(role, own, &state.dashboard_filters.borrow());

        let creado = self
            .api_client
            .create_establecimiento(&NewEstablecimiento { nombre, comercio_id })
            .await
            .map_err(|e| e.user_message())?;
        state.dashboard.borrow_mut().establecimientos.push(creado);
        Ok(())
    }
}

fn remove_local(state: &AppState, section: DashboardSection, id: i64) {
    let mut data = state.dashboard.borrow_mut();
    match section {
        DashboardSection::Usuarios => data.usuarios.retain(|u| u.id != id),
        DashboardSection::Comercios => data.comercios.retain(|c| c.id != id),
        DashboardSection::Establecimientos => data.establecimientos.retain(|e| e.id != id),
        DashboardSection::Productos => data.productos.retain(|p| p.id != id),
        DashboardSection::Extras => data.extras.retain(|e| e.id != id),
        DashboardSection::LineasVenta => data.lineas.retain(|l| l.id != id),
        DashboardSection::Ventas => data.ventas.retain(|v| v.id != id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::AppStorage;

    fn comercio(id: i64, nombre: &str) -> Comercio {
        Comercio { id, nombre: nombre.to_string(), usuario: None }
    }

    fn establecimientos() -> Vec<Establecimiento> {
        vec![
            Establecimiento { id: 1, nombre: "Sede Centro".to_string(), comercio_id: Some(1), comercio: Some(comercio(1, "Museo Picasso")) },
            Establecimiento { id: 2, nombre: "Sede Puerto".to_string(), comercio_id: None, comercio: Some(comercio(2, "Museo del Mar")) },
            Establecimiento { id: 3, nombre: "Tienda".to_string(), comercio_id: Some(1), comercio: None },
        ]
    }

    fn ids(list: &[Establecimiento]) -> Vec<i64> {
        list.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_secciones_por_rol() {
        assert!(!DashboardSection::for_role(Role::Admin).contains(&DashboardSection::Comercios));
        assert_eq!(DashboardSection::for_role(Role::SuperAdmin).len(), 7);
        assert!(DashboardSection::for_role(Role::Cliente).is_empty());
    }

    #[test]
    fn test_admin_solo_ve_su_comercio() {
        let filtros = DashboardFilters::default();
        assert_eq!(ids(&filter_establecimientos(&establecimientos(), Role::Admin, Some(1), &filtros)), vec![1, 3]);
        assert!(filter_establecimientos(&establecimientos(), Role::Admin, None, &filtros).is_empty());
        assert_eq!(ids(&filter_establecimientos(&establecimientos(), Role::SuperAdmin, None, &filtros)), vec![1, 2, 3]);
    }

    #[test]
    fn test_filtro_comercio_y_busqueda() {
        let mut filtros = DashboardFilters { selected_comercio: Some(2), ..Default::default() };
        assert_eq!(ids(&filter_establecimientos(&establecimientos(), Role::SuperAdmin, None, &filtros)), vec![2]);

        filtros.selected_comercio = None;
        filtros.search = "picasso".to_string();
        assert_eq!(ids(&filter_establecimientos(&establecimientos(), Role::SuperAdmin, None, &filtros)), vec![1]);
    }

    #[test]
    fn test_cambio_de_seccion_limpia_seleccion() {
        let mut filtros = DashboardFilters {
            selected_comercio: Some(1),
            selected_establecimiento: Some(3),
            search: "x".to_string(),
            ..Default::default()
        };
        filtros.set_section(DashboardSection::Establecimientos);
        assert_eq!(filtros.selected_comercio, Some(1));
        filtros.set_section(DashboardSection::Productos);
        assert_eq!(filtros, DashboardFilters { section: DashboardSection::Productos, ..Default::default() });
    }

    #[test]
    fn test_productos_por_establecimiento() {
        let producto = |id, est| Producto {
            id,
            nombre: format!("P{}", id),
            precio: 1.0,
            stock: 1,
            descripcion: String::new(),
            imagen: None,
            establecimiento_id: est,
        };
        let lista = vec![producto(1, Some(1)), producto(2, Some(2)), producto(3, None)];
        let filtros = DashboardFilters { selected_establecimiento: Some(2), ..Default::default() };
        let visibles: Vec<i64> = filter_productos(&lista, &filtros).iter().map(|p| p.id).collect();
        assert_eq!(visibles, vec![2]);
    }

    #[test]
    fn test_comercio_destino() {
        let filtros = DashboardFilters { selected_comercio: Some(7), ..Default::default() };
        assert_eq!(target_comercio(Role::Admin, Some(1), &filtros), Some(1));
        assert_eq!(target_comercio(Role::SuperAdmin, None, &filtros), Some(7));
    }

    #[test]
    fn test_borrado_local() {
        let state = AppState::new(AppStorage::in_memory());
        state.dashboard.borrow_mut().establecimientos = establecimientos();
        remove_local(&state, DashboardSection::Establecimientos, 2);
        assert_eq!(ids(&state.dashboard.borrow().establecimientos), vec![1, 3]);
    }
}
