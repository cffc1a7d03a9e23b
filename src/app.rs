// ============================================================================
// APP - Aplicación principal: estado, autorizador de rutas y render
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, clear_children, get_element_by_id};
use crate::routing::{current_route, on_popstate, replace_route, RouteDecision};
use crate::state::AppState;
use crate::utils::{AppStorage, ROOT_ELEMENT_ID};
use crate::viewmodels::SessionViewModel;
use crate::views::{render_app, render_loading};

/// Máximo de redirecciones encadenadas en un mismo render
const MAX_REDIRECTS: usize = 4;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id(ROOT_ELEMENT_ID)
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new(AppStorage::browser());
        state.set_route(current_route());
        log::info!("🧭 [APP] Ruta inicial: {}", state.route());

        // Atrás/adelante del navegador
        {
            let state = state.clone();
            on_popstate(move |route| {
                state.set_route(route);
                crate::rerender_app();
            })?;
        }

        // Suscribirse a cambios de estado para re-renderizar automáticamente
        state.subscribe_to_changes(move || {
            // Timeout 0 para agrupar varios cambios en un solo render
            Timeout::new(0, move || {
                crate::rerender_app();
            })
            .forget();
        });

        // Token guardado: resolver el rol antes de pintar rutas protegidas
        if state.session.get_token().is_some() {
            log::info!("💾 [APP] Token encontrado en storage, resolviendo sesión...");
            let state = state.clone();
            spawn_local(async move {
                match SessionViewModel::new().resolve_session(&state).await {
                    Ok(role) => log::info!("✅ [APP] Sesión restaurada como {}", role),
                    Err(e) => log::warn!("⚠️ [APP] No se pudo restaurar la sesión: {}", e),
                }
                state.notify_subscribers();
            });
        }

        Ok(Self { state, root })
    }

    /// Pasa la ruta por el autorizador y pinta el resultado
    pub fn render(&mut self) -> Result<(), JsValue> {
        let mut hops = 0;
        let view = loop {
            match self.state.decide() {
                RouteDecision::Render(route) => break render_app(&self.state, &route)?,
                RouteDecision::Suspend => break render_loading("Cargando sesión...")?,
                RouteDecision::Redirect(target) => {
                    hops += 1;
                    if hops > MAX_REDIRECTS {
                        log::error!("❌ [APP] Demasiadas redirecciones, última ruta: {}", target);
                        break render_loading("Redirigiendo...")?;
                    }
                    log::info!("↪️ [APP] Redirección {} → {}", self.state.route(), target);
                    if let Err(e) = replace_route(&target) {
                        log::error!("❌ [APP] Error en replaceState: {:?}", e);
                    }
                    self.state.set_route(target);
                }
            }
        };

        clear_children(&self.root);
        append_child(&self.root, &view)?;
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
