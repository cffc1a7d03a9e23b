// ============================================================================
// LOGIN VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, create_element, input_value, on_submit, set_attribute, set_class_name, set_text_content, ElementBuilder};
use crate::routing::Route;
use crate::state::AppState;
use crate::viewmodels::SessionViewModel;
use crate::views::{navigate, render_notice};

/// Grupo label + input
pub fn form_group(id: &str, label: &str, input_type: &str, placeholder: &str) -> Result<Element, JsValue> {
    let label_el = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label)
        .build();
    let input = ElementBuilder::new("input")?
        .id(id)?
        .class("form-input")
        .attr("type", input_type)?
        .attr("name", id)?
        .attr("placeholder", placeholder)?
        .attr("autocomplete", if input_type == "password" { "current-password" } else { "username" })?
        .build();
    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(label_el)?
        .child(input)?
        .build())
}

/// Renderizar vista de login
pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [LOGIN] render_login()");

    let header = ElementBuilder::new("div")?
        .class("login-header")
        .child(ElementBuilder::new("div")?.class("logo-icon").text("🏛️").build())?
        .child(ElementBuilder::new("h1")?.text("Gestión Museo").build())?
        .child(ElementBuilder::new("p")?.text("Inicia sesión para continuar").build())?
        .build();

    let form = create_element("form")?;
    set_class_name(&form, "login-form");
    append_child(&form, &form_group("username", "Usuario", "text", "Tu nombre de usuario")?)?;
    append_child(&form, &form_group("password", "Contraseña", "password", "Tu contraseña")?)?;

    if let Some(message) = state.notice.borrow().as_ref() {
        append_child(&form, &render_notice(message)?)?;
    }

    let submit_btn = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-login")
        .text("Iniciar sesión")
        .build();
    append_child(&form, &submit_btn)?;

    {
        let state = state.clone();
        let submit_btn = submit_btn.clone();
        on_submit(&form, move || {
            let username = input_value("username");
            let password = input_value("password");

            // Deshabilitar mientras la petición está en curso
            let _ = set_attribute(&submit_btn, "disabled", "true");
            set_text_content(&submit_btn, "Iniciando sesión...");

            let state = state.clone();
            spawn_local(async move {
                match SessionViewModel::new().login(&state, username, password).await {
                    Ok(target) => {
                        log::info!("✅ [LOGIN] Sesión iniciada, aterrizando en {}", target);
                        navigate(&state, target);
                    }
                    Err(message) => {
                        log::warn!("⚠️ [LOGIN] {}", message);
                        state.set_notice(Some(message));
                        crate::rerender_app();
                    }
                }
            });
        })?;
    }

    let register_link = {
        let state = state.clone();
        ElementBuilder::new("a")?
            .class("link")
            .attr("href", &Route::Register.path())?
            .text("¿No tienes cuenta? Regístrate")
            .on_click(move |e| {
                e.prevent_default();
                navigate(&state, Route::Register);
            })?
            .build()
    };

    let container = ElementBuilder::new("div")?
        .class("login-container")
        .child(header)?
        .child(form)?
        .child(register_link)?
        .build();

    Ok(ElementBuilder::new("div")?.class("login-screen").child(container)?.build())
}
