use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::commerce::Comercio;

/// Rol de presentación (cerrado). VENDEDOR del backend se presenta como Cliente.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "CLIENTE")]
    Cliente,
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "SUPERADMIN")]
    SuperAdmin,
}

impl Role {
    /// Traduce el valor `rol` del backend. `None` si es desconocido.
    pub fn from_backend(rol: &str) -> Option<Self> {
        match rol.trim().to_uppercase().as_str() {
            "CLIENTE" | "VENDEDOR" => Some(Role::Cliente),
            "ADMIN" => Some(Role::Admin),
            "SUPERADMIN" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Cliente => "CLIENTE",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPERADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Respuesta de `api/usuario/me`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserLookup {
    pub id: i64,
    pub username: String,
    pub rol: String,
    #[serde(default)]
    pub comercio_id: Option<i64>,
}

/// Perfil resuelto del usuario en sesión
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub comercio_id: Option<i64>,
    #[serde(default)]
    pub comercio: Option<Comercio>,
}

impl From<UserLookup> for UserProfile {
    fn from(lookup: UserLookup) -> Self {
        Self {
            id: lookup.id,
            username: lookup.username,
            comercio_id: lookup.comercio_id,
            comercio: None,
        }
    }
}

/// Usuario tal y como lo lista el dashboard
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Usuario {
    pub id: i64,
    pub username: String,
    pub rol: String,
    #[serde(default)]
    pub comercio_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendedor_es_cliente() {
        assert_eq!(Role::from_backend("VENDEDOR"), Some(Role::Cliente));
        assert_eq!(Role::from_backend("cliente"), Some(Role::Cliente));
        assert_eq!(Role::from_backend("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_backend("SUPERADMIN"), Some(Role::SuperAdmin));
    }

    #[test]
    fn test_rol_desconocido() {
        assert_eq!(Role::from_backend("INVITADO"), None);
        assert_eq!(Role::from_backend(""), None);
    }

    #[test]
    fn test_lookup_sin_comercio() {
        let lookup: UserLookup =
            serde_json::from_str(r#"{"id":3,"username":"ana","rol":"VENDEDOR"}"#).unwrap();
        let profile = UserProfile::from(lookup);
        assert_eq!(profile.comercio_id, None);
        assert_eq!(profile.username, "ana");
    }
}
