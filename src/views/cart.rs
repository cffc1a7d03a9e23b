// ============================================================================
// CART VIEW - Carrito, método de pago y confirmación del pedido
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::models::{CartItem, PaymentMethod, Ticket};
use crate::routing::{PreviewSection, Route};
use crate::state::AppState;
use crate::utils::{format_datetime, format_price};
use crate::viewmodels::storefront_viewmodel::{can_checkout, set_payment_method};
use crate::viewmodels::StorefrontViewModel;
use crate::views::navbar::storefront_route;
use crate::views::navigate;

fn nav_button(state: &AppState, label: &str, class: &str, target: Route) -> Result<Element, JsValue> {
    let state = state.clone();
    Ok(ElementBuilder::new("button")?
        .class(class)
        .text(label)
        .on_click(move |_| navigate(&state, target.clone()))?
        .build())
}

fn cart_line(state: &AppState, index: usize, item: &CartItem) -> Result<Element, JsValue> {
    let remove = {
        let state = state.clone();
        ElementBuilder::new("button")?
            .class("btn-remove")
            .text("Eliminar")
            .on_click(move |_| {
                if let Err(e) = state.cart.remove(index) {
                    log::error!("❌ [CART] Error guardando carrito: {}", e);
                }
                crate::rerender_app();
            })?
            .build()
    };

    Ok(ElementBuilder::new("li")?
        .class("cart-line")
        .child(
            ElementBuilder::new("div")?
                .class("cart-line-info")
                .child(ElementBuilder::new("strong")?.text(&item.nombre).build())?
                .child(
                    ElementBuilder::new("span")?
                        .class("cart-line-meta")
                        .text(&format!("{} · {} x {}", item.tipo.label(), item.cantidad, format_price(item.precio)))
                        .build(),
                )?
                .build(),
        )?
        .child(ElementBuilder::new("span")?.class("cart-line-total").text(&format_price(item.precio_total)).build())?
        .child(remove)?
        .build())
}

fn summary_row(label: &str, value: f64, class: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class(class)
        .child(ElementBuilder::new("span")?.text(label).build())?
        .child(ElementBuilder::new("span")?.text(&format_price(value)).build())?
        .build())
}

fn payment_selector(state: &AppState) -> Result<Element, JsValue> {
    let current = *state.payment_method.borrow();
    let group = ElementBuilder::new("div")?
        .class("payment-methods")
        .child(ElementBuilder::new("h3")?.text("Método de pago").build())?
        .build();
    for metodo in [PaymentMethod::Tarjeta, PaymentMethod::Efectivo] {
        let state = state.clone();
        let btn = ElementBuilder::new("button")?
            .class(if metodo == current { "payment-option selected" } else { "payment-option" })
            .text(metodo.label())
            .on_click(move |_| {
                set_payment_method(&state, metodo);
                crate::rerender_app();
            })?
            .build();
        append_child(&group, &btn)?;
    }
    Ok(group)
}

fn checkout_button(state: &AppState) -> Result<Element, JsValue> {
    let processing = *state.processing_checkout.borrow();
    let state = state.clone();
    ElementBuilder::new("button")?
        .class("btn-primary btn-checkout")
        .text(if processing { "Procesando pago..." } else { "Finalizar compra" })
        .disabled(processing)?
        .on_click(move |_| {
            if *state.processing_checkout.borrow() {
                return;
            }
            *state.processing_checkout.borrow_mut() = true;
            crate::rerender_app();

            let state = state.clone();
            spawn_local(async move {
                let ticket = StorefrontViewModel::for_state(&state).checkout(&state).await;
                if let Some(ticket) = ticket {
                    log::info!("🧾 [CART] Ticket {} creado", ticket.id);
                    *state.last_ticket.borrow_mut() = Some(ticket);
                }
                crate::rerender_app();
            });
        })
        .map(|b| b.build())
}

fn render_confirmation(state: &AppState, ticket: &Ticket) -> Result<Element, JsValue> {
    let route = state.route();
    Ok(ElementBuilder::new("div")?
        .class("checkout-success")
        .child(ElementBuilder::new("h1")?.text("¡Compra realizada!").build())?
        .child(ElementBuilder::new("p")?.text(&format!("Ticket #{}", ticket.id)).build())?
        .child(ElementBuilder::new("p")?.text(&format_datetime(&ticket.fecha)).build())?
        .child(ElementBuilder::new("p")?.class("ticket-total").text(&format!("Total: {}", format_price(ticket.total))).build())?
        .child(ElementBuilder::new("p")?.text(ticket.metodo_pago.label()).build())?
        .child(
            ElementBuilder::new("div")?
                .class("success-actions")
                .child(nav_button(state, "Ver mis tickets", "btn-primary", storefront_route(&route, PreviewSection::Tickets))?)?
                .child(nav_button(state, "Volver al inicio", "btn-secondary", storefront_route(&route, PreviewSection::Inicio))?)?
                .build(),
        )?
        .build())
}

fn render_empty_cart(state: &AppState) -> Result<Element, JsValue> {
    let route = state.route();
    Ok(ElementBuilder::new("div")?
        .class("cart-empty")
        .child(ElementBuilder::new("h1")?.text("Tu carrito está vacío").build())?
        .child(ElementBuilder::new("p")?.text("Añade entradas o productos para empezar").build())?
        .child(
            ElementBuilder::new("div")?
                .class("cart-empty-actions")
                .child(nav_button(state, "Ver entradas", "btn-primary", storefront_route(&route, PreviewSection::Entradas))?)?
                .child(nav_button(state, "Ver productos", "btn-secondary", storefront_route(&route, PreviewSection::Productos))?)?
                .build(),
        )?
        .build())
}

pub fn render_carrito(state: &AppState) -> Result<Element, JsValue> {
    let last_ticket = state.last_ticket.borrow().clone();
    if let Some(ticket) = last_ticket {
        return render_confirmation(state, &ticket);
    }

    let cart = state.cart.get();
    if cart.is_empty() {
        return render_empty_cart(state);
    }

    let lines = ElementBuilder::new("ul")?.class("cart-lines").build();
    for (index, item) in cart.items().iter().enumerate() {
        append_child(&lines, &cart_line(state, index, item)?)?;
    }

    let summary = ElementBuilder::new("aside")?
        .class("cart-summary")
        .child(summary_row("Subtotal", cart.subtotal(), "summary-row")?)?
        .child(summary_row("IVA (21%)", cart.iva(), "summary-row")?)?
        .child(summary_row("Total", cart.total(), "summary-row summary-total")?)?
        .build();
    if can_checkout(state) {
        append_child(&summary, &payment_selector(state)?)?;
        append_child(&summary, &checkout_button(state)?)?;
    } else {
        let aviso = ElementBuilder::new("p")?
            .class("preview-note")
            .text("Vista previa: el pago no está disponible")
            .build();
        append_child(&summary, &aviso)?;
    }

    Ok(ElementBuilder::new("div")?
        .class("cart-page")
        .child(ElementBuilder::new("h1")?.text("Carrito").build())?
        .child(
            ElementBuilder::new("div")?
                .class("cart-layout")
                .child(lines)?
                .child(summary)?
                .build(),
        )?
        .build())
}
