// ============================================================================
// TICKETS VIEW - Historial local de compras
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::models::Ticket;
use crate::state::AppState;
use crate::utils::{format_datetime, format_price};
use crate::viewmodels::storefront_viewmodel::filter_tickets;
use crate::views::catalog::refocus;
use crate::views::{render_empty, render_search};

const SEARCH_ID: &str = "tickets-search";

fn ticket_card(ticket: &Ticket) -> Result<Element, JsValue> {
    let items = ElementBuilder::new("ul")?.class("ticket-items").build();
    for item in &ticket.items {
        let line = ElementBuilder::new("li")?
            .child(ElementBuilder::new("span")?.text(&format!("{} x {}", item.cantidad, item.nombre)).build())?
            .child(ElementBuilder::new("span")?.text(&format_price(item.precio_total)).build())?
            .build();
        append_child(&items, &line)?;
    }

    Ok(ElementBuilder::new("article")?
        .class("ticket-card")
        .child(
            ElementBuilder::new("header")?
                .class("ticket-header")
                .child(ElementBuilder::new("h3")?.text(&format!("Ticket #{}", ticket.id)).build())?
                .child(ElementBuilder::new("span")?.class("ticket-date").text(&format_datetime(&ticket.fecha)).build())?
                .build(),
        )?
        .child(items)?
        .child(
            ElementBuilder::new("footer")?
                .class("ticket-footer")
                .child(ElementBuilder::new("span")?.text(ticket.metodo_pago.label()).build())?
                .child(ElementBuilder::new("strong")?.text(&format!("Total: {}", format_price(ticket.total))).build())?
                .build(),
        )?
        .build())
}

pub fn render_tickets(state: &AppState) -> Result<Element, JsValue> {
    let term = state.tickets_search.borrow().clone();
    let search = {
        let state = state.clone();
        render_search(SEARCH_ID, "Buscar por número de ticket o fecha...", &term, move |value| {
            *state.tickets_search.borrow_mut() = value;
            crate::rerender_app();
            refocus(SEARCH_ID);
        })?
    };

    let page = ElementBuilder::new("div")?
        .class("tickets-page")
        .child(ElementBuilder::new("h1")?.text("Mis tickets").build())?
        .child(search)?
        .build();

    let tickets = filter_tickets(&state.cart.tickets(), &term);
    if tickets.is_empty() {
        let message = if term.is_empty() { "Todavía no tienes compras" } else { "No hay tickets que coincidan" };
        append_child(&page, &render_empty(message)?)?;
        return Ok(page);
    }

    let list = ElementBuilder::new("div")?.class("tickets-list").build();
    for ticket in &tickets {
        append_child(&list, &ticket_card(ticket)?)?;
    }
    append_child(&page, &list)?;
    Ok(page)
}
