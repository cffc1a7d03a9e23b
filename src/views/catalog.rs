// ============================================================================
// CATALOG VIEWS - Listados de entradas y productos
// ============================================================================

use chrono::Local;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::models::{DateFilter, Entrada, Producto};
use crate::routing::Route;
use crate::state::AppState;
use crate::utils::{format_date, format_price};
use crate::viewmodels::storefront_viewmodel::{
    active_establishment_id, entradas_page, go_to_page, productos_page, set_date_filter, set_search,
};
use crate::viewmodels::StorefrontViewModel;
use crate::views::navbar::preview_id;
use crate::views::{navigate, render_empty, render_loading, render_pagination, render_search};

/// Pide el catálogo del establecimiento activo si aún no está cargado.
/// Devuelve true cuando ya se puede pintar.
pub fn ensure_catalog(state: &AppState) -> bool {
    let Some(establecimiento_id) = active_establishment_id(state) else {
        return true;
    };
    {
        let catalog = state.catalog.borrow();
        if catalog.loaded_for == Some(establecimiento_id) {
            return true;
        }
        if catalog.loading {
            return false;
        }
    }

    state.catalog.borrow_mut().loading = true;
    let state = state.clone();
    spawn_local(async move {
        StorefrontViewModel::for_state(&state)
            .load_catalog(&state, establecimiento_id)
            .await;
        crate::rerender_app();
    });
    false
}

fn search_bar(state: &AppState, placeholder: &str) -> Result<Element, JsValue> {
    let current = state.filters.borrow().search.clone();
    let state = state.clone();
    render_search("catalog-search", placeholder, &current, move |term| {
        set_search(&state, term);
        crate::rerender_app();
        // El re-render recrea el input: devolver el foco al buscador
        refocus("catalog-search");
    })
}

/// Devuelve el foco (y el cursor al final) a un input tras re-renderizar
pub fn refocus(id: &str) {
    use wasm_bindgen::JsCast;
    if let Some(input) = crate::dom::get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
    {
        let len = input.value().chars().count() as u32;
        let _ = input.focus();
        let _ = input.set_selection_range(len, len);
    }
}

fn pagination(state: &AppState, current: usize, total_pages: usize) -> Result<Element, JsValue> {
    let state = state.clone();
    render_pagination(current, total_pages, move |page| {
        go_to_page(&state, page, total_pages);
        crate::rerender_app();
    })
}

fn card_shell(
    state: &AppState,
    nombre: &str,
    imagen: Option<&str>,
    meta: &str,
    precio: f64,
    target: Option<Route>,
) -> Result<Element, JsValue> {
    let image = ElementBuilder::new("div")?.class("card-image").build();
    if let Some(src) = imagen {
        let img = ElementBuilder::new("img")?.attr("src", src)?.attr("alt", nombre)?.build();
        append_child(&image, &img)?;
    }

    let body = ElementBuilder::new("div")?
        .class("card-body")
        .child(ElementBuilder::new("h3")?.text(nombre).build())?
        .child(ElementBuilder::new("p")?.class("card-meta").text(meta).build())?
        .child(ElementBuilder::new("span")?.class("card-price").text(&format_price(precio)).build())?
        .build();

    let card = ElementBuilder::new("article")?.class("catalog-card").child(image)?.child(body)?;
    // En vista previa las fichas no enlazan al detalle
    match target {
        Some(route) => {
            let state = state.clone();
            Ok(card.on_click(move |_| navigate(&state, route.clone()))?.build())
        }
        None => Ok(card.build()),
    }
}

fn entrada_card(state: &AppState, entrada: &Entrada, preview: bool) -> Result<Element, JsValue> {
    let meta = format!("{} · {}", entrada.tipo, format_date(entrada.fecha));
    let target = (!preview).then(|| Route::DetalleEntrada(entrada.id));
    card_shell(state, &entrada.nombre, entrada.imagen.as_deref(), &meta, entrada.precio, target)
}

fn producto_card(state: &AppState, producto: &Producto, preview: bool) -> Result<Element, JsValue> {
    let meta = if producto.stock > 0 {
        format!("{} en stock", producto.stock)
    } else {
        "Agotado".to_string()
    };
    let target = (!preview).then(|| Route::DetalleProducto(producto.id));
    card_shell(state, &producto.nombre, producto.imagen.as_deref(), &meta, producto.precio, target)
}

fn date_filter_bar(state: &AppState) -> Result<Element, JsValue> {
    let active = state.filters.borrow().date_filter;
    let bar = ElementBuilder::new("div")?.class("date-filters").build();
    for option in DateFilter::OPTIONS {
        let state = state.clone();
        let btn = ElementBuilder::new("button")?
            .class(if option == active { "chip active" } else { "chip" })
            .text(option.label())
            .on_click(move |_| {
                set_date_filter(&state, option);
                crate::rerender_app();
            })?
            .build();
        append_child(&bar, &btn)?;
    }
    Ok(bar)
}

pub fn render_entradas(state: &AppState) -> Result<Element, JsValue> {
    let page_el = ElementBuilder::new("div")?
        .class("catalog-page")
        .child(ElementBuilder::new("h1")?.text("Entradas").build())?
        .child(search_bar(state, "Buscar entradas...")?)?
        .child(date_filter_bar(state)?)?
        .build();

    if !ensure_catalog(state) {
        append_child(&page_el, &render_loading("Cargando entradas...")?)?;
        return Ok(page_el);
    }

    let preview = preview_id(&state.route()).is_some();
    let page = entradas_page(state, Local::now().date_naive());
    if page.items.is_empty() {
        append_child(&page_el, &render_empty("No se encontraron entradas")?)?;
        return Ok(page_el);
    }

    let grid = ElementBuilder::new("div")?.class("catalog-grid").build();
    for entrada in page.items.iter() {
        append_child(&grid, &entrada_card(state, entrada, preview)?)?;
    }
    append_child(&page_el, &grid)?;
    append_child(&page_el, &pagination(state, page.current, page.total_pages)?)?;
    Ok(page_el)
}

pub fn render_productos(state: &AppState) -> Result<Element, JsValue> {
    let page_el = ElementBuilder::new("div")?
        .class("catalog-page")
        .child(ElementBuilder::new("h1")?.text("Productos").build())?
        .child(search_bar(state, "Buscar productos...")?)?
        .build();

    if !ensure_catalog(state) {
        append_child(&page_el, &render_loading("Cargando productos...")?)?;
        return Ok(page_el);
    }

    let preview = preview_id(&state.route()).is_some();
    let page = productos_page(state);
    if page.items.is_empty() {
        append_child(&page_el, &render_empty("No se encontraron productos")?)?;
        return Ok(page_el);
    }

    let grid = ElementBuilder::new("div")?.class("catalog-grid").build();
    for producto in page.items.iter() {
        append_child(&grid, &producto_card(state, producto, preview)?)?;
    }
    append_child(&page_el, &grid)?;
    append_child(&page_el, &pagination(state, page.current, page.total_pages)?)?;
    Ok(page_el)
}
