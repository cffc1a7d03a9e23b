// ============================================================================
// REGISTER VIEW - Alta de usuario con medidor de fuerza de contraseña
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, clear_children, create_element, get_element_by_id, input_value, on_input,
    on_submit, set_attribute, set_class_name, set_text_content, ElementBuilder,
};
use crate::models::RegisterRequest;
use crate::routing::Route;
use crate::services::{password_checklist, password_strength};
use crate::state::AppState;
use crate::viewmodels::SessionViewModel;
use crate::views::login::form_group;
use crate::views::{navigate, render_notice};

const METER_ID: &str = "password-meter";

/// Medidor y lista de requisitos (se repinta en cada pulsación, sin re-render global)
fn render_meter(password: &str) -> Result<Element, JsValue> {
    let meter = ElementBuilder::new("div")?.id(METER_ID)?.class("password-meter").build();
    fill_meter(&meter, password)?;
    Ok(meter)
}

fn fill_meter(meter: &Element, password: &str) -> Result<(), JsValue> {
    clear_children(meter);
    if password.is_empty() {
        return Ok(());
    }

    let strength = password_strength(password);
    let bar = ElementBuilder::new("div")?
        .class(&format!("strength-bar {}", strength.css_class()))
        .build();
    let label = ElementBuilder::new("span")?
        .class("strength-label")
        .text(&format!("Seguridad: {}", strength.label()))
        .build();
    append_child(meter, &bar)?;
    append_child(meter, &label)?;

    let list = ElementBuilder::new("ul")?.class("password-checklist").build();
    for (text, ok) in password_checklist(password) {
        let item = ElementBuilder::new("li")?
            .class(if ok { "check ok" } else { "check" })
            .text(text)
            .build();
        append_child(&list, &item)?;
    }
    append_child(meter, &list)
}

pub fn render_register(state: &AppState) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("div")?
        .class("login-header")
        .child(ElementBuilder::new("h1")?.text("Crear cuenta").build())?
        .build();

    let form = create_element("form")?;
    set_class_name(&form, "login-form");
    append_child(&form, &form_group("reg-username", "Usuario", "text", "Elige un nombre de usuario")?)?;

    let password_group = form_group("reg-password", "Contraseña", "password", "Mínimo 6 caracteres")?;
    append_child(&form, &password_group)?;
    append_child(&form, &render_meter("")?)?;
    if let Some(input) = get_password_input(&password_group) {
        on_input(&input, |value| {
            if let Some(meter) = get_element_by_id(METER_ID) {
                if let Err(e) = fill_meter(&meter, &value) {
                    log::warn!("⚠️ [REGISTRO] Error pintando medidor: {:?}", e);
                }
            }
        })?;
    }

    append_child(
        &form,
        &form_group("reg-password-confirmation", "Repite la contraseña", "password", "")?,
    )?;

    if let Some(message) = state.notice.borrow().as_ref() {
        append_child(&form, &render_notice(message)?)?;
    }

    let submit_btn = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-login")
        .text("Registrarse")
        .build();
    append_child(&form, &submit_btn)?;

    {
        let state = state.clone();
        let submit_btn = submit_btn.clone();
        on_submit(&form, move || {
            let request = RegisterRequest {
                username: input_value("reg-username"),
                password: input_value("reg-password"),
                password_confirmation: input_value("reg-password-confirmation"),
            };
            let _ = set_attribute(&submit_btn, "disabled", "true");
            set_text_content(&submit_btn, "Registrando...");

            let state = state.clone();
            spawn_local(async move {
                match SessionViewModel::new().register(&state, request).await {
                    Ok(target) => navigate(&state, target),
                    Err(message) => {
                        state.set_notice(Some(message));
                        crate::rerender_app();
                    }
                }
            });
        })?;
    }

    let login_link = {
        let state = state.clone();
        ElementBuilder::new("a")?
            .class("link")
            .attr("href", &Route::Login.path())?
            .text("¿Ya tienes cuenta? Inicia sesión")
            .on_click(move |e| {
                e.prevent_default();
                navigate(&state, Route::Login);
            })?
            .build()
    };

    let container = ElementBuilder::new("div")?
        .class("login-container")
        .child(header)?
        .child(form)?
        .child(login_link)?
        .build();
    Ok(ElementBuilder::new("div")?.class("login-screen").child(container)?.build())
}

fn get_password_input(group: &Element) -> Option<Element> {
    group.query_selector("input").ok().flatten()
}
