/// Claves de almacenamiento persistente (localStorage)
pub const TOKEN_KEY: &str = "authToken";
pub const USERNAME_KEY: &str = "username";
pub const ESTABLISHMENT_KEY: &str = "establecimiento";
pub const CART_KEY: &str = "cart";
pub const TICKETS_KEY: &str = "tickets";

/// IVA aplicado en el resumen del carrito
pub const IVA_RATE: f64 = 0.21;

/// Id del elemento raíz donde se monta la app
pub const ROOT_ELEMENT_ID: &str = "app";
