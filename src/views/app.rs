// ============================================================================
// APP VIEW - Despacho de rutas
// ============================================================================
// Recibe la ruta ya autorizada y pinta la página que le corresponde, con
// navbar/footer en las páginas de tienda.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::routing::{push_route, PreviewSection, Route};
use crate::state::AppState;
use crate::views::{
    render_carrito, render_dashboard, render_detalle_entrada, render_detalle_producto,
    render_entradas, render_establishment_selector, render_footer, render_home, render_login,
    render_navbar, render_not_found, render_perfil, render_productos, render_register,
    render_tickets,
};

/// Navegación normal: historial + estado + re-render
pub fn navigate(state: &AppState, route: Route) {
    log::info!("🧭 [NAV] {} → {}", state.route(), route);
    if let Err(e) = push_route(&route) {
        log::error!("❌ [NAV] Error en pushState: {:?}", e);
    }
    state.set_route(route);
    crate::rerender_app();
}

/// Renderizar la página de una ruta autorizada
pub fn render_app(state: &AppState, route: &Route) -> Result<Element, JsValue> {
    let page = match route {
        Route::Login => render_login(state)?,
        Route::Register => render_register(state)?,
        Route::EstablishmentSelection => render_establishment_selector(state)?,
        Route::Home => render_home(state)?,
        Route::Entradas => render_entradas(state)?,
        Route::Productos => render_productos(state)?,
        Route::DetalleEntrada(id) => render_detalle_entrada(state, *id)?,
        Route::DetalleProducto(id) => render_detalle_producto(state, *id)?,
        Route::Carrito => render_carrito(state)?,
        Route::Tickets => render_tickets(state)?,
        Route::Perfil => render_perfil(state)?,
        Route::Dashboard => render_dashboard(state)?,
        Route::Preview { section, .. } => match section {
            PreviewSection::Inicio => render_home(state)?,
            PreviewSection::Entradas => render_entradas(state)?,
            PreviewSection::Productos => render_productos(state)?,
            PreviewSection::Tickets => render_tickets(state)?,
            PreviewSection::Carrito => render_carrito(state)?,
        },
        Route::NotFound => render_not_found(state)?,
    };

    if !route.has_chrome() {
        return Ok(page);
    }

    let main = ElementBuilder::new("main")?.class("page-content").child(page)?.build();
    Ok(ElementBuilder::new("div")?
        .class("app-layout")
        .child(render_navbar(state)?)?
        .child(main)?
        .child(render_footer()?)?
        .build())
}
