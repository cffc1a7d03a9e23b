// ============================================================================
// ROUTING - Rutas del cliente + autorizador por rol
// ============================================================================

pub mod route;
pub mod guard;
pub mod history;

pub use route::{PreviewSection, Route};
pub use guard::{authorize, landing_route, AccessContext, RouteDecision};
pub use history::{current_route, on_popstate, push_route, replace_route};

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen::JsValue;

    #[test]
    fn test_history_accesible_desde_routing() {
        // Solo se comprueban las firmas: fuera del navegador no hay window
        let _push: fn(&Route) -> Result<(), JsValue> = push_route;
        let _replace: fn(&Route) -> Result<(), JsValue> = replace_route;
        let _current: fn() -> Route = current_route;
        let _popstate = on_popstate::<fn(Route)>;
        assert_eq!(Route::parse(&Route::Carrito.path()), Route::Carrito);
    }
}
