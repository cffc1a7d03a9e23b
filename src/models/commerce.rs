use serde::{Deserialize, Serialize};

/// Propietario de un comercio (solo se muestra el username)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UsuarioRef {
    pub username: String,
}

/// Comercio (tenant)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comercio {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub usuario: Option<UsuarioRef>,
}

/// Establecimiento: sede física de un comercio
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Establecimiento {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub comercio_id: Option<i64>,
    #[serde(default)]
    pub comercio: Option<Comercio>,
}

impl Establecimiento {
    /// El backend manda unas veces el id plano y otras el comercio anidado
    pub fn owner_id(&self) -> Option<i64> {
        self.comercio_id
            .or_else(|| self.comercio.as_ref().map(|c| c.id))
    }

    pub fn comercio_nombre(&self) -> Option<&str> {
        self.comercio.as_ref().map(|c| c.nombre.as_str())
    }

    pub fn owner_username(&self) -> Option<&str> {
        self.comercio
            .as_ref()
            .and_then(|c| c.usuario.as_ref())
            .map(|u| u.username.as_str())
    }
}

/// Alta de establecimiento desde el dashboard
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewEstablecimiento {
    pub nombre: String,
    pub comercio_id: Option<i64>,
}
