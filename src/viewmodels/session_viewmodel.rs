// ============================================================================
// SESSION VIEWMODEL - LÓGICA DE SESIÓN
// ============================================================================
// Login, registro, resolución de rol y logout. Devuelve la ruta de destino,
// las vistas se encargan de navegar y re-renderizar.
// ============================================================================

use crate::models::{Establecimiento, LoginRequest, RegisterRequest, Role};
use crate::routing::{landing_route, Route};
use crate::services::{validate_login, validate_registration, ApiClient, ApiError};
use crate::state::{AppState, SessionError};

/// Mensaje del formulario de login para un error del backend
pub fn login_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized => "Credenciales incorrectas".to_string(),
        ApiError::Http { status, .. } if (400..500).contains(status) => {
            "Credenciales incorrectas".to_string()
        }
        other => other.user_message(),
    }
}

/// Mensaje del formulario de registro para un error del backend
pub fn register_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Http { status: 422, .. } => {
            "El usuario ya está registrado o los datos son inválidos.".to_string()
        }
        ApiError::Network(_) => "Error de conexión. Por favor, intenta más tarde.".to_string(),
        _ => "Error al registrar. Inténtalo de nuevo.".to_string(),
    }
}

/// Ruta de aterrizaje para la sesión actual (Login si no hay rol)
pub fn current_landing(state: &AppState) -> Route {
    match state.role() {
        Some(role) => landing_route(role, state.establishment.is_selected()),
        None => Route::Login,
    }
}

/// ViewModel de sesión - SOLO lógica de negocio
pub struct SessionViewModel {
    api_client: ApiClient,
}

impl SessionViewModel {
    pub fn new() -> Self {
        Self { api_client: ApiClient::new() }
    }

    /// Login → resolución de rol → ruta de aterrizaje
    pub async fn login(
        &self,
        state: &AppState,
        username: String,
        password: String,
    ) -> Result<Route, String> {
        validate_login(&username, &password).map_err(|e| e.to_string())?;

        log::info!("🔐 [LOGIN] Iniciando login de {}", username);
        let request = LoginRequest { username: username.trim().to_string(), password };
        let response = self
            .api_client
            .login(&request)
            .await
            .map_err(|e| {
                log::error!("❌ [LOGIN] {}", e);
                login_error_message(&e)
            })?;

        state.session.start(response.token, &request.username);
        self.resolve_session(state)
            .await
            .map_err(|e| match e {
                SessionError::Lookup(ref api) => login_error_message(api),
                other => other.to_string(),
            })?;

        Ok(current_landing(state))
    }

    /// Registro; si el backend devuelve token se inicia sesión directamente
    pub async fn register(&self, state: &AppState, request: RegisterRequest) -> Result<Route, String> {
        validate_registration(&request).map_err(|e| e.to_string())?;

        let response = self
            .api_client
            .register(&request)
            .await
            .map_err(|e| {
                log::error!("❌ [REGISTRO] {}", e);
                register_error_message(&e)
            })?;

        let Some(token) = response.plain_token() else {
            log::info!("📝 [REGISTRO] Registro sin token, volviendo al login");
            return Ok(Route::Login);
        };

        state.session.start(token, &request.username);
        self.resolve_session(state).await.map_err(|e| e.to_string())?;
        Ok(current_landing(state))
    }

    /// Consulta el rol del token guardado. Para admins añade el comercio al perfil.
    pub async fn resolve_session(&self, state: &AppState) -> Result<Role, SessionError> {
        let token = state.session.get_token().ok_or(SessionError::MissingToken)?;

        let api = ApiClient::with_token(Some(token));
        let role = state.apply_lookup(api.fetch_current_user().await)?;

        if role == Role::Admin {
            let comercio_id = state.session.get_profile().and_then(|p| p.comercio_id);
            if let Some(id) = comercio_id {
                match api.get_comercio(id).await {
                    Ok(comercio) => state.session.attach_commerce(comercio),
                    Err(e) => log::error!("❌ [SESSION] Error obteniendo comercio {}: {}", id, e),
                }
            }
        }
        Ok(role)
    }

    /// Logout: el carrito se conserva
    pub fn logout(&self, state: &AppState) -> Route {
        log::info!("🚪 [SESSION] Logout");
        state.clear_session();
        Route::Login
    }

    pub fn select_establishment(&self, state: &AppState, establecimiento: Establecimiento) -> Route {
        log::info!("🏛️ [SESSION] Establecimiento elegido: {}", establecimiento.nombre);
        state.establishment.select(establecimiento);
        Route::Home
    }

    /// Vuelve al selector de establecimiento
    pub fn change_establishment(&self, state: &AppState) -> Route {
        state.establishment.clear();
        *state.catalog.borrow_mut() = Default::default();
        Route::EstablishmentSelection
    }
}

impl Default for SessionViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserLookup;
    use crate::utils::AppStorage;

    #[test]
    fn test_mensajes_login() {
        assert_eq!(login_error_message(&ApiError::Unauthorized), "Credenciales incorrectas");
        assert_eq!(
            login_error_message(&ApiError::Http { status: 403, message: String::new() }),
            "Credenciales incorrectas"
        );
        assert_eq!(login_error_message(&ApiError::Network("x".to_string())), "Error de conexión");
    }

    #[test]
    fn test_mensajes_registro() {
        assert!(register_error_message(&ApiError::Http { status: 422, message: String::new() })
            .starts_with("El usuario ya está registrado"));
        assert_eq!(
            register_error_message(&ApiError::Http { status: 500, message: String::new() }),
            "Error al registrar. Inténtalo de nuevo."
        );
    }

    #[test]
    fn test_aterrizaje_tras_resolver() {
        let state = AppState::new(AppStorage::in_memory());
        assert_eq!(current_landing(&state), Route::Login);

        state.session.start("tok".to_string(), "root");
        state
            .apply_lookup(Ok(UserLookup {
                id: 1,
                username: "root".to_string(),
                rol: "SUPERADMIN".to_string(),
                comercio_id: None,
            }))
            .unwrap();
        assert_eq!(current_landing(&state), Route::Dashboard);
    }

    #[test]
    fn test_logout_y_seleccion() {
        let state = AppState::new(AppStorage::in_memory());
        let vm = SessionViewModel::new();
        state.session.start("tok".to_string(), "ana");
        let sede = Establecimiento { id: 1, nombre: "Sede".to_string(), comercio_id: None, comercio: None };
        assert_eq!(vm.select_establishment(&state, sede), Route::Home);
        assert_eq!(vm.change_establishment(&state), Route::EstablishmentSelection);
        assert!(!state.establishment.is_selected());
        assert_eq!(vm.logout(&state), Route::Login);
        assert_eq!(state.session.get_token(), None);
    }
}
