// ============================================================================
// SHARED - Piezas comunes: carga, error, buscador, paginación, footer
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_input, ElementBuilder};

/// Indicador de carga (también se pinta mientras el rol no está resuelto)
pub fn render_loading(message: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("loading-screen")
        .child(ElementBuilder::new("div")?.class("spinner").build())?
        .child(ElementBuilder::new("p")?.text(message).build())?
        .build())
}

/// Mensaje de error en línea (formularios)
pub fn render_notice(message: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("form-error")
        .attr("role", "alert")?
        .text(message)
        .build())
}

/// Estado vacío de un listado
pub fn render_empty(message: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("p")?.class("empty-state").text(message).build())
}

/// Campo de búsqueda; `on_change` recibe el texto nuevo
pub fn render_search<F>(id: &str, placeholder: &str, value: &str, on_change: F) -> Result<Element, JsValue>
where
    F: FnMut(String) + 'static,
{
    let input = ElementBuilder::new("input")?
        .id(id)?
        .class("search-input")
        .attr("type", "search")?
        .attr("placeholder", placeholder)?
        .attr("value", value)?
        .build();
    on_input(&input, on_change)?;
    Ok(ElementBuilder::new("div")?.class("search-bar").child(input)?.build())
}

/// Paginación numerada; `on_page` recibe la página pedida
pub fn render_pagination<F>(current: usize, total_pages: usize, on_page: F) -> Result<Element, JsValue>
where
    F: Fn(usize) + Clone + 'static,
{
    let nav = ElementBuilder::new("nav")?.class("pagination").build();
    if total_pages <= 1 {
        return Ok(nav);
    }

    let prev = {
        let on_page = on_page.clone();
        ElementBuilder::new("button")?
            .class("page-btn")
            .text("‹")
            .disabled(current <= 1)?
            .on_click(move |_| on_page(current.saturating_sub(1)))?
            .build()
    };
    crate::dom::append_child(&nav, &prev)?;

    for page in 1..=total_pages {
        let on_page = on_page.clone();
        let class = if page == current { "page-btn active" } else { "page-btn" };
        let btn = ElementBuilder::new("button")?
            .class(class)
            .text(&page.to_string())
            .on_click(move |_| on_page(page))?
            .build();
        crate::dom::append_child(&nav, &btn)?;
    }

    let next = ElementBuilder::new("button")?
        .class("page-btn")
        .text("›")
        .disabled(current >= total_pages)?
        .on_click(move |_| on_page(current + 1))?
        .build();
    crate::dom::append_child(&nav, &next)?;
    Ok(nav)
}

pub fn render_footer() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("footer")?
        .class("site-footer")
        .child(ElementBuilder::new("p")?.text("© Gestión Museo").build())?
        .build())
}
