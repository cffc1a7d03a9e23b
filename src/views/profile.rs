// ============================================================================
// PROFILE VIEW - Datos de la sesión y del establecimiento elegido
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::state::AppState;
use crate::utils::initial;
use crate::viewmodels::SessionViewModel;
use crate::views::navigate;

fn info_row(label: &str, value: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("profile-row")
        .child(ElementBuilder::new("span")?.class("profile-label").text(label).build())?
        .child(ElementBuilder::new("span")?.class("profile-value").text(value).build())?
        .build())
}

pub fn render_perfil(state: &AppState) -> Result<Element, JsValue> {
    let session = state.session.snapshot();
    let username = session.username().unwrap_or("Usuario").to_string();
    let rol = session.role.map(|r| r.label()).unwrap_or("-");
    let establecimiento = state
        .establishment
        .get()
        .map(|e| e.nombre)
        .unwrap_or_else(|| "Ninguno".to_string());

    let change = {
        let state = state.clone();
        ElementBuilder::new("button")?
            .class("btn-secondary")
            .text("Cambiar establecimiento")
            .on_click(move |_| {
                let target = SessionViewModel::new().change_establishment(&state);
                navigate(&state, target);
            })?
            .build()
    };
    let logout = {
        let state = state.clone();
        ElementBuilder::new("button")?
            .class("btn-logout")
            .text("Cerrar sesión")
            .on_click(move |_| {
                let target = SessionViewModel::new().logout(&state);
                navigate(&state, target);
            })?
            .build()
    };

    Ok(ElementBuilder::new("div")?
        .class("profile-page")
        .child(
            ElementBuilder::new("div")?
                .class("profile-header")
                .child(ElementBuilder::new("div")?.class("avatar").text(&initial(&username)).build())?
                .child(ElementBuilder::new("h1")?.text(&username).build())?
                .build(),
        )?
        .child(info_row("Rol", rol)?)?
        .child(info_row("Establecimiento", &establecimiento)?)?
        .child(info_row("Productos en el carrito", &state.cart.len().to_string())?)?
        .child(info_row("Compras realizadas", &state.cart.tickets().len().to_string())?)?
        .child(
            ElementBuilder::new("div")?
                .class("profile-actions")
                .child(change)?
                .child(logout)?
                .build(),
        )?
        .build())
}
