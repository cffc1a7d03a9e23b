use serde::{Deserialize, Serialize};

const DEFAULT_BACKEND_DEVELOPMENT: &str = "http://localhost:8080/";
const DEFAULT_BACKEND_PRODUCTION: &str = "https://api.gestionmuseo.es/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub catalog_page_size: usize,
    pub checkout_delay_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: DEFAULT_BACKEND_DEVELOPMENT.to_string(),
            backend_url_production: DEFAULT_BACKEND_PRODUCTION.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            catalog_page_size: 6,
            checkout_delay_ms: 2000,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .map(normalize_base_url)
                .unwrap_or(defaults.backend_url_development),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .map(normalize_base_url)
                .unwrap_or(defaults.backend_url_production),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development")
                .to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            catalog_page_size: option_env!("CATALOG_PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|size: &usize| *size > 0)
                .unwrap_or(defaults.catalog_page_size),
            checkout_delay_ms: option_env!("CHECKOUT_DELAY_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.checkout_delay_ms),
        }
    }

    /// URL base del backend según el entorno (siempre termina en '/')
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }
}

/// Las rutas del API se concatenan sin barra inicial ("api/producto")
fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_url_por_entorno() {
        let mut config = AppConfig::default();
        assert_eq!(config.backend_url(), DEFAULT_BACKEND_DEVELOPMENT);

        config.environment = "production".to_string();
        assert_eq!(config.backend_url(), DEFAULT_BACKEND_PRODUCTION);
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://api:8080"), "http://api:8080/");
        assert_eq!(normalize_base_url(" http://api:8080/ "), "http://api:8080/");
    }

    #[test]
    fn test_log_level() {
        let mut config = AppConfig::default();
        assert_eq!(config.log_level(), log::Level::Debug);
        config.enable_logging = false;
        assert_eq!(config.log_level(), log::Level::Warn);
    }
}
