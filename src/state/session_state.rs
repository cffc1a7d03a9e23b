// ============================================================================
// SESSION STATE - Token, rol y perfil del usuario
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Comercio, Role, UserLookup, UserProfile};
use crate::services::api_client::ApiError;
use crate::utils::{AppStorage, TOKEN_KEY, USERNAME_KEY};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no hay token de sesión")]
    MissingToken,
    #[error("rol desconocido: {0}")]
    UnknownRole(String),
    #[error("no se pudo resolver la sesión: {0}")]
    Lookup(#[from] ApiError),
}

/// Vista inmutable de la sesión
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    pub role: Option<Role>,
    pub profile: Option<UserProfile>,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.profile.as_ref().map(|p| p.username.as_str())
    }
}

/// Estado de sesión
#[derive(Clone)]
pub struct SessionState {
    storage: AppStorage,
    pub token: Rc<RefCell<Option<String>>>,
    pub role: Rc<RefCell<Option<Role>>>,
    pub profile: Rc<RefCell<Option<UserProfile>>>,
}

impl SessionState {
    /// Crear estado leyendo el token guardado (el rol siempre arranca sin resolver)
    pub fn load(storage: AppStorage) -> Self {
        let token = storage.get_string(TOKEN_KEY).filter(|t| !t.is_empty());
        if token.is_some() {
            log::info!("🔑 [SESSION] Token encontrado en storage");
        }
        Self {
            storage,
            token: Rc::new(RefCell::new(token)),
            role: Rc::new(RefCell::new(None)),
            profile: Rc::new(RefCell::new(None)),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            token: self.get_token(),
            role: self.get_role(),
            profile: self.get_profile(),
        }
    }

    pub fn get_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn get_role(&self) -> Option<Role> {
        *self.role.borrow()
    }

    pub fn get_profile(&self) -> Option<UserProfile> {
        self.profile.borrow().clone()
    }

    /// Login correcto: guarda token y username, el rol queda pendiente
    pub fn start(&self, token: String, username: &str) {
        if let Err(e) = self.storage.set_string(TOKEN_KEY, &token) {
            log::error!("❌ [SESSION] Error guardando token: {}", e);
        }
        if let Err(e) = self.storage.set_string(USERNAME_KEY, username) {
            log::error!("❌ [SESSION] Error guardando username: {}", e);
        }
        *self.token.borrow_mut() = Some(token);
        *self.role.borrow_mut() = None;
        *self.profile.borrow_mut() = None;
    }

    /// Aplica la respuesta de la consulta de rol. Cualquier fallo limpia la sesión.
    pub fn apply_lookup(&self, result: Result<UserLookup, ApiError>) -> Result<Role, SessionError> {
        let lookup = match result {
            Ok(lookup) => lookup,
            Err(e) => {
                self.clear();
                return Err(SessionError::Lookup(e));
            }
        };

        let Some(role) = Role::from_backend(&lookup.rol) else {
            self.clear();
            return Err(SessionError::UnknownRole(lookup.rol));
        };

        if let Err(e) = self.storage.set_string(USERNAME_KEY, &lookup.username) {
            log::error!("❌ [SESSION] Error guardando username: {}", e);
        }
        log::info!("✅ [SESSION] Rol resuelto: {} ({})", role, lookup.username);
        *self.profile.borrow_mut() = Some(UserProfile::from(lookup));
        *self.role.borrow_mut() = Some(role);
        Ok(role)
    }

    /// Añade el comercio propietario al perfil (admins)
    pub fn attach_commerce(&self, comercio: Comercio) {
        if let Some(profile) = self.profile.borrow_mut().as_mut() {
            profile.comercio_id = Some(comercio.id);
            profile.comercio = Some(comercio);
        }
    }

    /// Borra token, username, rol y perfil (memoria y storage)
    pub fn clear(&self) {
        for key in [TOKEN_KEY, USERNAME_KEY] {
            if let Err(e) = self.storage.remove(key) {
                log::warn!("⚠️ [SESSION] No se pudo borrar '{}': {}", key, e);
            }
        }
        *self.token.borrow_mut() = None;
        *self.role.borrow_mut() = None;
        *self.profile.borrow_mut() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(rol: &str) -> UserLookup {
        UserLookup {
            id: 1,
            username: "ana".to_string(),
            rol: rol.to_string(),
            comercio_id: Some(4),
        }
    }

    #[test]
    fn test_load_lee_token() {
        let storage = AppStorage::in_memory();
        storage.set_string(TOKEN_KEY, "tok").unwrap();
        let session = SessionState::load(storage);
        assert_eq!(session.get_token().as_deref(), Some("tok"));
        assert_eq!(session.get_role(), None);
    }

    #[test]
    fn test_token_vacio_es_ausente() {
        let storage = AppStorage::in_memory();
        storage.set_string(TOKEN_KEY, "").unwrap();
        assert_eq!(SessionState::load(storage).get_token(), None);
    }

    #[test]
    fn test_lookup_vendedor_resuelve_cliente() {
        let storage = AppStorage::in_memory();
        let session = SessionState::load(storage.clone());
        session.start("tok".to_string(), "ana");
        let role = session.apply_lookup(Ok(lookup("VENDEDOR"))).unwrap();
        assert_eq!(role, Role::Cliente);
        assert_eq!(session.snapshot().username(), Some("ana"));
        assert_eq!(storage.get_string(USERNAME_KEY).as_deref(), Some("ana"));
    }

    #[test]
    fn test_lookup_fallido_limpia_todo() {
        let storage = AppStorage::in_memory();
        let session = SessionState::load(storage.clone());
        session.start("tok".to_string(), "ana");
        let err = session.apply_lookup(Err(ApiError::Unauthorized)).unwrap_err();
        assert!(matches!(err, SessionError::Lookup(ApiError::Unauthorized)));
        assert_eq!(session.snapshot(), SessionSnapshot::default());
        assert_eq!(storage.get_string(TOKEN_KEY), None);
        assert_eq!(storage.get_string(USERNAME_KEY), None);
    }

    #[test]
    fn test_rol_desconocido_limpia() {
        let session = SessionState::load(AppStorage::in_memory());
        session.start("tok".to_string(), "ana");
        let err = session.apply_lookup(Ok(lookup("INVITADO"))).unwrap_err();
        assert!(matches!(err, SessionError::UnknownRole(_)));
        assert_eq!(session.get_token(), None);
    }

    #[test]
    fn test_attach_commerce() {
        let session = SessionState::load(AppStorage::in_memory());
        session.start("tok".to_string(), "admin");
        session.apply_lookup(Ok(lookup("ADMIN"))).unwrap();
        session.attach_commerce(Comercio { id: 4, nombre: "Museo Picasso".to_string(), usuario: None });
        let profile = session.get_profile().unwrap();
        assert_eq!(profile.comercio.map(|c| c.nombre), Some("Museo Picasso".to_string()));
    }
}
