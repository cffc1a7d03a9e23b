use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::state::AppState;
use crate::viewmodels::session_viewmodel::current_landing;
use crate::views::navigate;

pub fn render_not_found(state: &AppState) -> Result<Element, JsValue> {
    let state = state.clone();
    let back = ElementBuilder::new("button")?
        .class("btn-primary")
        .text("Volver al inicio")
        .on_click(move |_| {
            let target = current_landing(&state);
            navigate(&state, target);
        })?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("not-found")
        .child(ElementBuilder::new("h1")?.text("404").build())?
        .child(ElementBuilder::new("p")?.text("La página que buscas no existe").build())?
        .child(back)?
        .build())
}
