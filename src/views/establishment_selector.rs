// ============================================================================
// ESTABLISHMENT SELECTOR - Elección de sede antes de entrar a la tienda
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::state::AppState;
use crate::viewmodels::{SessionViewModel, StorefrontViewModel};
use crate::views::{navigate, render_empty, render_loading};

pub fn render_establishment_selector(state: &AppState) -> Result<Element, JsValue> {
    let (establecimientos, loaded, loading) = {
        let catalog = state.catalog.borrow();
        (catalog.establecimientos.clone(), catalog.establecimientos_loaded, catalog.loading)
    };

    let screen = ElementBuilder::new("div")?
        .class("establishment-screen")
        .child(ElementBuilder::new("h1")?.text("Elige un establecimiento").build())?
        .build();

    if !loaded && !loading {
        // Primera visita: pedir la lista y repintar al llegar
        let state = state.clone();
        state.catalog.borrow_mut().loading = true;
        spawn_local(async move {
            StorefrontViewModel::for_state(&state).load_establecimientos(&state).await;
            crate::rerender_app();
        });
        append_child(&screen, &render_loading("Cargando establecimientos...")?)?;
        return Ok(screen);
    }
    if loading {
        append_child(&screen, &render_loading("Cargando establecimientos...")?)?;
        return Ok(screen);
    }

    if establecimientos.is_empty() {
        append_child(&screen, &render_empty("No hay establecimientos disponibles")?)?;
        return Ok(screen);
    }

    let grid = ElementBuilder::new("div")?.class("establishment-grid").build();
    for establecimiento in establecimientos {
        let card = {
            let state = state.clone();
            let subtitle = establecimiento.comercio_nombre().unwrap_or("").to_string();
            let nombre = establecimiento.nombre.clone();
            ElementBuilder::new("button")?
                .class("establishment-card")
                .child(ElementBuilder::new("h3")?.text(&nombre).build())?
                .child(ElementBuilder::new("p")?.text(&subtitle).build())?
                .on_click(move |_| {
                    let target = SessionViewModel::new().select_establishment(&state, establecimiento.clone());
                    navigate(&state, target);
                })?
                .build()
        };
        append_child(&grid, &card)?;
    }
    append_child(&screen, &grid)?;
    Ok(screen)
}
