// ============================================================================
// NAVBAR - Navegación de la tienda (normal y vista previa)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::routing::{PreviewSection, Route};
use crate::state::AppState;
use crate::viewmodels::SessionViewModel;
use crate::views::navigate;

/// Id del establecimiento en vista previa, si la ruta actual lo es
pub fn preview_id(route: &Route) -> Option<i64> {
    match route {
        Route::Preview { establecimiento_id, .. } => Some(*establecimiento_id),
        _ => None,
    }
}

/// Ruta de una sección de tienda, con prefijo `/preview/:id` en vista previa
pub fn storefront_route(current: &Route, section: PreviewSection) -> Route {
    if let Some(establecimiento_id) = preview_id(current) {
        return Route::Preview { establecimiento_id, section };
    }
    match section {
        PreviewSection::Inicio => Route::Home,
        PreviewSection::Entradas => Route::Entradas,
        PreviewSection::Productos => Route::Productos,
        PreviewSection::Tickets => Route::Tickets,
        PreviewSection::Carrito => Route::Carrito,
    }
}

/// Nombre mostrado en la marca: comercio del establecimiento, o el del perfil en vista previa
fn brand_name(state: &AppState, preview: bool) -> String {
    if preview {
        let from_dashboard = preview_id(&state.route()).and_then(|id| {
            state
                .dashboard
                .borrow()
                .establecimientos
                .iter()
                .find(|e| e.id == id)
                .map(|e| e.comercio_nombre().unwrap_or(&e.nombre).to_string())
        });
        if let Some(name) = from_dashboard {
            return name;
        }
        if let Some(comercio) = state.session.get_profile().and_then(|p| p.comercio) {
            return comercio.nombre;
        }
    }
    state
        .establishment
        .get()
        .map(|e| e.comercio_nombre().unwrap_or(&e.nombre).to_string())
        .unwrap_or_else(|| "Museo".to_string())
}

pub fn render_navbar(state: &AppState) -> Result<Element, JsValue> {
    let route = state.route();
    let preview = preview_id(&route).is_some();

    let nav = ElementBuilder::new("nav")?
        .class(if preview { "navbar navbar-preview" } else { "navbar" })
        .build();

    let brand = {
        let state = state.clone();
        let target = storefront_route(&route, PreviewSection::Inicio);
        ElementBuilder::new("a")?
            .class("navbar-brand")
            .text(&brand_name(&state, preview))
            .on_click(move |_| navigate(&state, target.clone()))?
            .build()
    };
    append_child(&nav, &brand)?;

    let links = ElementBuilder::new("div")?.class("navbar-links").build();
    let carrito_label = format!("Carrito ({})", state.cart.len());
    let sections = [
        (PreviewSection::Inicio, "Inicio".to_string()),
        (PreviewSection::Entradas, "Entradas".to_string()),
        (PreviewSection::Productos, "Productos".to_string()),
        (PreviewSection::Tickets, "Tickets".to_string()),
        (PreviewSection::Carrito, carrito_label),
    ];
    for (section, label) in sections {
        let target = storefront_route(&route, section);
        let class = if target == route { "nav-link active" } else { "nav-link" };
        let state = state.clone();
        let link = ElementBuilder::new("a")?
            .class(class)
            .attr("href", &target.path())?
            .text(&label)
            .on_click(move |e| {
                e.prevent_default();
                navigate(&state, target.clone());
            })?
            .build();
        append_child(&links, &link)?;
    }

    if preview {
        // En vista previa no hay perfil: se vuelve al dashboard
        let state = state.clone();
        let back = ElementBuilder::new("button")?
            .class("btn-secondary")
            .text("Volver al dashboard")
            .on_click(move |_| navigate(&state, Route::Dashboard))?
            .build();
        append_child(&links, &back)?;
    } else {
        let perfil = {
            let state = state.clone();
            ElementBuilder::new("a")?
                .class(if route == Route::Perfil { "nav-link active" } else { "nav-link" })
                .attr("href", &Route::Perfil.path())?
                .text("Perfil")
                .on_click(move |e| {
                    e.prevent_default();
                    navigate(&state, Route::Perfil);
                })?
                .build()
        };
        append_child(&links, &perfil)?;

        let state = state.clone();
        let logout = ElementBuilder::new("button")?
            .class("btn-logout")
            .text("Cerrar sesión")
            .on_click(move |_| {
                let target = SessionViewModel::new().logout(&state);
                navigate(&state, target);
            })?
            .build();
        append_child(&links, &logout)?;
    }

    append_child(&nav, &links)?;
    Ok(nav)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefijo_en_vista_previa() {
        let preview = Route::Preview { establecimiento_id: 4, section: PreviewSection::Inicio };
        assert_eq!(
            storefront_route(&preview, PreviewSection::Carrito).path(),
            "/preview/4/carrito"
        );
        assert_eq!(storefront_route(&Route::Home, PreviewSection::Carrito), Route::Carrito);
        assert_eq!(storefront_route(&Route::Tickets, PreviewSection::Inicio).path(), "/home");
    }
}
