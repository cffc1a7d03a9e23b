// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP. El token se adjunta
// como `Authorization: Bearer` en las rutas protegidas.
// ============================================================================

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::CONFIG;
use crate::models::{
    Comercio, Entrada, Establecimiento, Extra, LineaVenta, LoginRequest, LoginResponse,
    NewEstablecimiento, Producto, RegisterRequest, RegisterResponse, UserLookup, Usuario, Venta,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("No autorizado")]
    Unauthorized,
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Mensaje para mostrar al usuario
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Error de conexión".to_string(),
            ApiError::Unauthorized => "Credenciales incorrectas".to_string(),
            ApiError::Http { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Http { status, .. } => format!("Error del servidor ({})", status),
            ApiError::Parse(_) => "Respuesta inesperada del servidor".to_string(),
        }
    }
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: CONFIG.backend_url().to_string(),
            token: None,
        }
    }

    pub fn with_token(token: Option<String>) -> Self {
        Self { token, ..Self::new() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token {
            Some(ref token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        if status == 401 {
            return Err(ApiError::Unauthorized);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Http { status, message })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .authorized(Request::get(&self.url(path)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(response)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .authorized(Request::post(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(response)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .authorized(Request::delete(&self.url(path)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(response).await.map(|_| ())
    }

    // ------------------------------------------------------------------------
    // Autenticación
    // ------------------------------------------------------------------------

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        log::info!("🔐 [API] Login de {}", request.username);
        self.post_json("login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        log::info!("📝 [API] Registro de {}", request.username);
        self.post_json("api/register", request).await
    }

    /// Consulta de rol del usuario del token
    pub async fn fetch_current_user(&self) -> Result<UserLookup, ApiError> {
        self.get_json("api/usuario/me").await
    }

    // ------------------------------------------------------------------------
    // Comercios y establecimientos
    // ------------------------------------------------------------------------

    pub async fn get_comercio(&self, id: i64) -> Result<Comercio, ApiError> {
        self.get_json(&format!("api/comercio/{}", id)).await
    }

    pub async fn list_comercios(&self) -> Result<Vec<Comercio>, ApiError> {
        self.get_json("api/comercio").await
    }

    pub async fn delete_comercio(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("api/comercio/{}", id)).await
    }

    pub async fn list_establecimientos(&self) -> Result<Vec<Establecimiento>, ApiError> {
        self.get_json("api/establecimiento").await
    }

    pub async fn get_establecimiento(&self, id: i64) -> Result<Establecimiento, ApiError> {
        self.get_json(&format!("api/establecimiento/{}", id)).await
    }

    pub async fn create_establecimiento(
        &self,
        nuevo: &NewEstablecimiento,
    ) -> Result<Establecimiento, ApiError> {
        log::info!("🏛️ [API] Creando establecimiento {}", nuevo.nombre);
        self.post_json("api/establecimiento", nuevo).await
    }

    pub async fn delete_establecimiento(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("api/establecimiento/{}", id)).await
    }

    // ------------------------------------------------------------------------
    // Catálogo
    // ------------------------------------------------------------------------

    pub async fn list_productos(&self) -> Result<Vec<Producto>, ApiError> {
        self.get_json("api/producto").await
    }

    pub async fn get_producto(&self, id: i64) -> Result<Producto, ApiError> {
        self.get_json(&format!("api/producto/{}", id)).await
    }

    pub async fn delete_producto(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("api/producto/{}", id)).await
    }

    pub async fn list_entradas(&self) -> Result<Vec<Entrada>, ApiError> {
        self.get_json("api/entrada").await
    }

    pub async fn get_entrada(&self, id: i64) -> Result<Entrada, ApiError> {
        self.get_json(&format!("api/entrada/{}", id)).await
    }

    pub async fn list_extras(&self) -> Result<Vec<Extra>, ApiError> {
        self.get_json("api/extra").await
    }

    pub async fn delete_extra(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("api/extra/{}", id)).await
    }

    // ------------------------------------------------------------------------
    // Ventas y usuarios
    // ------------------------------------------------------------------------

    pub async fn list_ventas(&self) -> Result<Vec<Venta>, ApiError> {
        self.get_json("api/venta").await
    }

    pub async fn delete_venta(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("api/venta/{}", id)).await
    }

    pub async fn list_lineas_venta(&self) -> Result<Vec<LineaVenta>, ApiError> {
        self.get_json("api/lineaVenta").await
    }

    pub async fn delete_linea_venta(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("api/lineaVenta/{}", id)).await
    }

    pub async fn list_usuarios(&self) -> Result<Vec<Usuario>, ApiError> {
        self.get_json("api/usuario").await
    }

    pub async fn delete_usuario(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("api/usuario/{}", id)).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_sin_doble_barra() {
        let client = ApiClient { base_url: "http://localhost:8080/".to_string(), token: None };
        assert_eq!(client.url("api/producto"), "http://localhost:8080/api/producto");
        assert_eq!(client.url("/login"), "http://localhost:8080/login");
    }

    #[test]
    fn test_mensajes_de_error() {
        assert_eq!(ApiError::Unauthorized.user_message(), "Credenciales incorrectas");
        assert_eq!(
            ApiError::Http { status: 500, message: String::new() }.user_message(),
            "Error del servidor (500)"
        );
        assert_eq!(
            ApiError::Http { status: 422, message: "El usuario ya existe".to_string() }
                .user_message(),
            "El usuario ya existe"
        );
    }
}
