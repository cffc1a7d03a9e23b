// ============================================================================
// HISTORY - Integración con la History API del navegador
// ============================================================================
// El listener de popstate es global: registrarlo UNA sola vez (App::new).
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::routing::route::Route;

/// Ruta actual según window.location
pub fn current_route() -> Route {
    let path = web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string());
    Route::parse(&path)
}

/// Navegación normal (nueva entrada en el historial)
pub fn push_route(route: &Route) -> Result<(), JsValue> {
    let history = web_sys::window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .history()?;
    history.push_state_with_url(&JsValue::NULL, "", Some(&route.path()))
}

/// Redirección (reemplaza la entrada actual, como <Navigate replace />)
pub fn replace_route(route: &Route) -> Result<(), JsValue> {
    let history = web_sys::window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .history()?;
    history.replace_state_with_url(&JsValue::NULL, "", Some(&route.path()))
}

/// Botones atrás/adelante del navegador
pub fn on_popstate<F>(mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(Route) + 'static,
{
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let closure = Closure::wrap(Box::new(move |_e: web_sys::PopStateEvent| {
        handler(current_route());
    }) as Box<dyn FnMut(web_sys::PopStateEvent)>);
    window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())?;
    // Listener global registrado una única vez
    closure.forget();
    Ok(())
}
