// ============================================================================
// HOME VIEW - Portada del establecimiento
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::routing::PreviewSection;
use crate::state::AppState;
use crate::views::navbar::storefront_route;
use crate::views::navigate;

pub fn render_home(state: &AppState) -> Result<Element, JsValue> {
    let route = state.route();
    let nombre = state
        .establishment
        .get()
        .map(|e| e.nombre)
        .unwrap_or_else(|| "Museo".to_string());

    let entradas_btn = {
        let state = state.clone();
        let target = storefront_route(&route, PreviewSection::Entradas);
        ElementBuilder::new("button")?
            .class("btn-primary")
            .text("Comprar entradas")
            .on_click(move |_| navigate(&state, target.clone()))?
            .build()
    };
    let productos_btn = {
        let state = state.clone();
        let target = storefront_route(&route, PreviewSection::Productos);
        ElementBuilder::new("button")?
            .class("btn-secondary")
            .text("Ver tienda")
            .on_click(move |_| navigate(&state, target.clone()))?
            .build()
    };

    let hero = ElementBuilder::new("section")?
        .class("hero")
        .child(ElementBuilder::new("h1")?.text(&nombre).build())?
        .child(
            ElementBuilder::new("p")?
                .text("Descubre nuestras exposiciones y llévate un recuerdo de tu visita")
                .build(),
        )?
        .child(
            ElementBuilder::new("div")?
                .class("hero-actions")
                .child(entradas_btn)?
                .child(productos_btn)?
                .build(),
        )?
        .build();

    let visita = ElementBuilder::new("section")?
        .class("visit-info")
        .child(ElementBuilder::new("h2")?.text("Visita nuestro museo").build())?
        .child(
            ElementBuilder::new("p")?
                .text("Consulta las entradas disponibles por fecha y reserva tu visita.")
                .build(),
        )?
        .build();

    Ok(ElementBuilder::new("div")?.class("home-page").child(hero)?.child(visita)?.build())
}
