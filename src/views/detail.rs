// ============================================================================
// DETAIL VIEWS - Ficha de entrada / producto con selector de cantidad
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::models::{ItemKind, QuantitySelector};
use crate::state::AppState;
use crate::utils::{format_date, format_price};
use crate::viewmodels::storefront_viewmodel::{
    add_entrada_to_cart, add_producto_to_cart, in_cart, quantity_for, update_quantity,
};
use crate::views::catalog::ensure_catalog;
use crate::views::{render_empty, render_loading};

fn quantity_selector(state: &AppState, selector: QuantitySelector) -> Result<Element, JsValue> {
    let minus = {
        let state = state.clone();
        ElementBuilder::new("button")?
            .class("qty-btn")
            .text("−")
            .disabled(!selector.can_decrement())?
            .on_click(move |_| {
                update_quantity(&state, false);
                crate::rerender_app();
            })?
            .build()
    };
    let plus = {
        let state = state.clone();
        ElementBuilder::new("button")?
            .class("qty-btn")
            .text("+")
            .disabled(!selector.can_increment())?
            .on_click(move |_| {
                update_quantity(&state, true);
                crate::rerender_app();
            })?
            .build()
    };
    Ok(ElementBuilder::new("div")?
        .class("quantity-selector")
        .child(minus)?
        .child(ElementBuilder::new("span")?.class("qty-value").text(&selector.value().to_string()).build())?
        .child(plus)?
        .build())
}

/// Bloque común: cantidad, total de línea y botón de añadir
fn purchase_box<F>(
    state: &AppState,
    precio: f64,
    selector: QuantitySelector,
    already_in_cart: bool,
    available: bool,
    on_add: F,
) -> Result<Element, JsValue>
where
    F: Fn(&AppState) -> bool + 'static,
{
    let total = precio * selector.value() as f64;
    let box_el = ElementBuilder::new("div")?
        .class("purchase-box")
        .child(quantity_selector(state, selector)?)?
        .child(
            ElementBuilder::new("p")?
                .class("line-total")
                .text(&format!("Total: {}", format_price(total)))
                .build(),
        )?
        .build();

    if already_in_cart {
        let note = ElementBuilder::new("p")?.class("in-cart-note").text("Ya está en el carrito").build();
        append_child(&box_el, &note)?;
    }

    let state = state.clone();
    let add = ElementBuilder::new("button")?
        .class("btn-primary")
        .text(if available { "Añadir al carrito" } else { "Sin stock" })
        .disabled(!available)?
        .on_click(move |_| {
            if on_add(&state) {
                // Nueva línea: se repinta con el aviso de "ya en el carrito"
                crate::rerender_app();
            }
        })?
        .build();
    append_child(&box_el, &add)?;
    Ok(box_el)
}

fn detail_layout(nombre: &str, imagen: Option<&str>, info: Vec<Element>, purchase: Element) -> Result<Element, JsValue> {
    let media = ElementBuilder::new("div")?.class("detail-media").build();
    if let Some(src) = imagen {
        append_child(&media, &ElementBuilder::new("img")?.attr("src", src)?.attr("alt", nombre)?.build())?;
    }
    let body = ElementBuilder::new("div")?
        .class("detail-body")
        .child(ElementBuilder::new("h1")?.text(nombre).build())?
        .children(info)?
        .child(purchase)?
        .build();
    Ok(ElementBuilder::new("div")?.class("detail-page").child(media)?.child(body)?.build())
}

pub fn render_detalle_entrada(state: &AppState, id: i64) -> Result<Element, JsValue> {
    if !ensure_catalog(state) {
        return render_loading("Cargando entrada...");
    }
    let entrada = state.catalog.borrow().entradas.iter().find(|e| e.id == id).cloned();
    let Some(entrada) = entrada else {
        return render_empty("Entrada no encontrada");
    };

    let selector = quantity_for(state, None);
    let info = vec![
        ElementBuilder::new("p")?.class("detail-meta").text(&format!("{} · {}", entrada.tipo, format_date(entrada.fecha))).build(),
        ElementBuilder::new("p")?.class("detail-price").text(&format_price(entrada.precio)).build(),
        ElementBuilder::new("p")?.class("detail-description").text(&entrada.descripcion).build(),
    ];
    let purchase = {
        let entrada = entrada.clone();
        purchase_box(
            state,
            entrada.precio,
            selector,
            in_cart(state, entrada.id, ItemKind::Entrada),
            true,
            move |state| add_entrada_to_cart(state, &entrada),
        )?
    };
    detail_layout(&entrada.nombre, entrada.imagen.as_deref(), info, purchase)
}

pub fn render_detalle_producto(state: &AppState, id: i64) -> Result<Element, JsValue> {
    if !ensure_catalog(state) {
        return render_loading("Cargando producto...");
    }
    let producto = state.catalog.borrow().productos.iter().find(|p| p.id == id).cloned();
    let Some(producto) = producto else {
        return render_empty("Producto no encontrado");
    };

    let selector = quantity_for(state, Some(producto.stock));
    let stock_text = if producto.stock > 0 {
        format!("{} unidades disponibles", producto.stock)
    } else {
        "Agotado".to_string()
    };
    let info = vec![
        ElementBuilder::new("p")?.class("detail-price").text(&format_price(producto.precio)).build(),
        ElementBuilder::new("p")?.class("detail-stock").text(&stock_text).build(),
        ElementBuilder::new("p")?.class("detail-description").text(&producto.descripcion).build(),
    ];
    let purchase = {
        let producto = producto.clone();
        let available = producto.stock > 0;
        purchase_box(
            state,
            producto.precio,
            selector,
            in_cart(state, producto.id, ItemKind::Producto),
            available,
            move |state| add_producto_to_cart(state, &producto),
        )?
    };
    detail_layout(&producto.nombre, producto.imagen.as_deref(), info, purchase)
}
