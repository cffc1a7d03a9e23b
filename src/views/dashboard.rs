// ============================================================================
// DASHBOARD VIEW - Back-office: secciones, tablas, alta y borrado
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, confirm, input_value, ElementBuilder};
use crate::models::{Establecimiento, Role};
use crate::routing::{PreviewSection, Route};
use crate::state::AppState;
use crate::utils::format_price;
use crate::viewmodels::dashboard_viewmodel::{
    filter_comercios, filter_establecimientos, filter_extras, filter_productos, filter_usuarios,
    DashboardFilters,
};
use crate::viewmodels::{DashboardSection, DashboardViewModel, SessionViewModel};
use crate::views::catalog::refocus;
use crate::views::{navigate, render_empty, render_loading, render_notice, render_search};

const SEARCH_ID: &str = "dashboard-search";
const NEW_ESTABLECIMIENTO_ID: &str = "new-establecimiento";

// ============================================================================
// PIEZAS COMUNES
// ============================================================================

fn cell(text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("td")?.text(text).build())
}

fn data_table(headers: &[&str], rows: Vec<Element>) -> Result<Element, JsValue> {
    let head_row = ElementBuilder::new("tr")?.build();
    for header in headers {
        append_child(&head_row, &ElementBuilder::new("th")?.text(header).build())?;
    }
    Ok(ElementBuilder::new("table")?
        .class("data-table")
        .child(ElementBuilder::new("thead")?.child(head_row)?.build())?
        .child(ElementBuilder::new("tbody")?.children(rows)?.build())?
        .build())
}

fn table_row(cells: Vec<Element>) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("tr")?.children(cells)?.build())
}

fn delete_button(state: &AppState, section: DashboardSection, id: i64, nombre: &str) -> Result<Element, JsValue> {
    let state = state.clone();
    let pregunta = format!("¿Eliminar \"{}\"?", nombre);
    let button = ElementBuilder::new("button")?
        .class("btn-danger")
        .text("Eliminar")
        .on_click(move |_| {
            if !confirm(&pregunta) {
                return;
            }
            let state = state.clone();
            spawn_local(async move {
                match DashboardViewModel::for_state(&state).delete(&state, section, id).await {
                    Ok(()) => state.set_notice(None),
                    Err(e) => {
                        log::error!("❌ [DASHBOARD] Error eliminando {} {}: {}", section.label(), id, e);
                        state.set_notice(Some(e.user_message()));
                    }
                }
                crate::rerender_app();
            });
        })?
        .build();
    Ok(ElementBuilder::new("td")?.class("row-actions").child(button)?.build())
}

fn chip(label: &str, active: bool) -> Result<ElementBuilder, JsValue> {
    Ok(ElementBuilder::new("button")?
        .class(if active { "chip active" } else { "chip" })
        .text(label))
}

// ============================================================================
// FILTROS
// ============================================================================

fn search_bar(state: &AppState, filters: &DashboardFilters) -> Result<Element, JsValue> {
    let state = state.clone();
    let placeholder = format!("Buscar en {}...", filters.section.label().to_lowercase());
    render_search(SEARCH_ID, &placeholder, &filters.search, move |term| {
        state.dashboard_filters.borrow_mut().search = term;
        crate::rerender_app();
        refocus(SEARCH_ID);
    })
}

/// SuperAdmin: filtra por comercio (y elige el destino de las altas)
fn comercio_chips(state: &AppState, filters: &DashboardFilters) -> Result<Element, JsValue> {
    let bar = ElementBuilder::new("div")?.class("filter-chips").build();
    let todos = {
        let state = state.clone();
        chip("Todos", filters.selected_comercio.is_none())?
            .on_click(move |_| {
                state.dashboard_filters.borrow_mut().selected_comercio = None;
                crate::rerender_app();
            })?
            .build()
    };
    append_child(&bar, &todos)?;

    let comercios = state.dashboard.borrow().comercios.clone();
    for comercio in comercios {
        let state = state.clone();
        let id = comercio.id;
        let btn = chip(&comercio.nombre, filters.selected_comercio == Some(id))?
            .on_click(move |_| {
                state.dashboard_filters.borrow_mut().selected_comercio = Some(id);
                crate::rerender_app();
            })?
            .build();
        append_child(&bar, &btn)?;
    }
    Ok(bar)
}

/// Productos y extras se filtran por establecimiento
fn establecimiento_chips(state: &AppState, filters: &DashboardFilters, visibles: &[Establecimiento]) -> Result<Element, JsValue> {
    let bar = ElementBuilder::new("div")?.class("filter-chips").build();
    let todos = {
        let state = state.clone();
        chip("Todos", filters.selected_establecimiento.is_none())?
            .on_click(move |_| {
                state.dashboard_filters.borrow_mut().selected_establecimiento = None;
                crate::rerender_app();
            })?
            .build()
    };
    append_child(&bar, &todos)?;

    for establecimiento in visibles {
        let state = state.clone();
        let id = establecimiento.id;
        let btn = chip(&establecimiento.nombre, filters.selected_establecimiento == Some(id))?
            .on_click(move |_| {
                state.dashboard_filters.borrow_mut().selected_establecimiento = Some(id);
                crate::rerender_app();
            })?
            .build();
        append_child(&bar, &btn)?;
    }
    Ok(bar)
}

fn create_establecimiento_form(state: &AppState) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .id(NEW_ESTABLECIMIENTO_ID)?
        .attr("type", "text")?
        .attr("placeholder", "Nombre del establecimiento")?
        .build();
    let create = {
        let state = state.clone();
        ElementBuilder::new("button")?
            .class("btn-primary")
            .text("Crear establecimiento")
            .on_click(move |_| {
                let nombre = input_value(NEW_ESTABLECIMIENTO_ID);
                let state = state.clone();
                spawn_local(async move {
                    match DashboardViewModel::for_state(&state).create_establecimiento(&state, &nombre).await {
                        Ok(()) => {
                            log::info!("✅ [DASHBOARD] Establecimiento '{}' creado", nombre.trim());
                            state.set_notice(None);
                        }
                        Err(message) => state.set_notice(Some(message)),
                    }
                    crate::rerender_app();
                });
            })?
            .build()
    };
    Ok(ElementBuilder::new("div")?.class("create-form").child(input)?.child(create)?.build())
}

// ============================================================================
// TABLAS POR SECCIÓN
// ============================================================================

fn establecimientos_table(state: &AppState, visibles: &[Establecimiento]) -> Result<Element, JsValue> {
    let mut rows = Vec::new();
    for establecimiento in visibles {
        let id = establecimiento.id;
        let preview = {
            let state = state.clone();
            ElementBuilder::new("button")?
                .class("btn-secondary")
                .text("Vista previa")
                .on_click(move |_| {
                    navigate(
                        &state,
                        Route::Preview { establecimiento_id: id, section: PreviewSection::Inicio },
                    )
                })?
                .build()
        };
        let acciones = delete_button(state, DashboardSection::Establecimientos, id, &establecimiento.nombre)?;
        append_child(&acciones, &preview)?;
        rows.push(table_row(vec![
            cell(&id.to_string())?,
            cell(&establecimiento.nombre)?,
            cell(establecimiento.comercio_nombre().unwrap_or("-"))?,
            cell(establecimiento.owner_username().unwrap_or("-"))?,
            acciones,
        ])?);
    }
    data_table(&["ID", "Nombre", "Comercio", "Propietario", "Acciones"], rows)
}

fn section_table(
    state: &AppState,
    role: Role,
    filters: &DashboardFilters,
    visibles: &[Establecimiento],
) -> Result<Element, JsValue> {
    let data = state.dashboard.borrow().clone();
    let section = filters.section;
    let mut rows = Vec::new();

    let headers: &[&str] = match section {
        DashboardSection::Establecimientos => return establecimientos_table(state, visibles),
        DashboardSection::Usuarios => {
            for u in filter_usuarios(&data.usuarios, filters) {
                rows.push(table_row(vec![
                    cell(&u.id.to_string())?,
                    cell(&u.username)?,
                    cell(&u.rol)?,
                    delete_button(state, section, u.id, &u.username)?,
                ])?);
            }
            &["ID", "Usuario", "Rol", "Acciones"]
        }
        DashboardSection::Comercios => {
            for c in filter_comercios(&data.comercios, filters) {
                let propietario = c.usuario.as_ref().map(|u| u.username.clone()).unwrap_or_else(|| "-".to_string());
                rows.push(table_row(vec![
                    cell(&c.id.to_string())?,
                    cell(&c.nombre)?,
                    cell(&propietario)?,
                    delete_button(state, section, c.id, &c.nombre)?,
                ])?);
            }
            &["ID", "Nombre", "Propietario", "Acciones"]
        }
        DashboardSection::Productos => {
            // Un Admin solo gestiona productos de sus establecimientos
            let permitidos: Vec<i64> = visibles.iter().map(|e| e.id).collect();
            for p in filter_productos(&data.productos, filters) {
                if role == Role::Admin && !p.establecimiento_id.map_or(false, |id| permitidos.contains(&id)) {
                    continue;
                }
                rows.push(table_row(vec![
                    cell(&p.id.to_string())?,
                    cell(&p.nombre)?,
                    cell(&format_price(p.precio))?,
                    cell(&p.stock.to_string())?,
                    delete_button(state, section, p.id, &p.nombre)?,
                ])?);
            }
            &["ID", "Nombre", "Precio", "Stock", "Acciones"]
        }
        DashboardSection::Extras => {
            let permitidos: Vec<i64> = visibles.iter().map(|e| e.id).collect();
            for e in filter_extras(&data.extras, filters) {
                if role == Role::Admin && !e.establecimiento_id.map_or(false, |id| permitidos.contains(&id)) {
                    continue;
                }
                rows.push(table_row(vec![
                    cell(&e.id.to_string())?,
                    cell(&e.nombre)?,
                    cell(&format_price(e.precio))?,
                    delete_button(state, section, e.id, &e.nombre)?,
                ])?);
            }
            &["ID", "Nombre", "Precio", "Acciones"]
        }
        DashboardSection::LineasVenta => {
            for l in data.lineas.iter().filter(|l| crate::models::catalog::matches_search(&l.descripcion, &filters.search)) {
                rows.push(table_row(vec![
                    cell(&l.id.to_string())?,
                    cell(&l.venta_id.to_string())?,
                    cell(&l.descripcion)?,
                    cell(&l.cantidad.to_string())?,
                    cell(&format_price(l.precio_unitario))?,
                    cell(&format_price(l.subtotal()))?,
                    delete_button(state, section, l.id, &format!("línea {}", l.id))?,
                ])?);
            }
            &["ID", "Venta", "Descripción", "Cantidad", "Precio", "Subtotal", "Acciones"]
        }
        DashboardSection::Ventas => {
            for v in &data.ventas {
                rows.push(table_row(vec![
                    cell(&v.id.to_string())?,
                    cell(v.fecha.as_deref().unwrap_or("-"))?,
                    cell(&format_price(v.total))?,
                    cell(v.metodo_pago.as_deref().unwrap_or("-"))?,
                    delete_button(state, section, v.id, &format!("venta {}", v.id))?,
                ])?);
            }
            &["ID", "Fecha", "Total", "Método de pago", "Acciones"]
        }
    };

    if rows.is_empty() {
        return render_empty(&format!("No hay {} que mostrar", section.label().to_lowercase()));
    }
    data_table(headers, rows)
}

// ============================================================================
// LAYOUT
// ============================================================================

fn sidebar(state: &AppState, role: Role, active: DashboardSection) -> Result<Element, JsValue> {
    let menu = ElementBuilder::new("nav")?
        .class("dashboard-sidebar")
        .child(ElementBuilder::new("h2")?.text("Panel").build())?
        .build();
    for section in DashboardSection::for_role(role) {
        let state = state.clone();
        let item = ElementBuilder::new("button")?
            .class(if section == active { "sidebar-item active" } else { "sidebar-item" })
            .text(section.label())
            .on_click(move |_| {
                state.dashboard_filters.borrow_mut().set_section(section);
                state.set_notice(None);
                crate::rerender_app();
            })?
            .build();
        append_child(&menu, &item)?;
    }
    Ok(menu)
}

fn header(state: &AppState, role: Role) -> Result<Element, JsValue> {
    let username = state.session.snapshot().username().unwrap_or("Admin").to_string();
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
    Ok(ElementBuilder::new("header")?
        .class("dashboard-header")
        .child(ElementBuilder::new("span")?.text(&format!("{} · {}", username, role.label())).build())?
        .child(logout)?
        .build())
}

/// Lanza la carga de la sección si sus datos no están en memoria.
/// Devuelve true cuando ya se puede pintar la tabla.
fn ensure_section(state: &AppState, section: DashboardSection) -> bool {
    {
        let data = state.dashboard.borrow();
        if data.loaded == Some(section) {
            return true;
        }
        if data.loading {
            return false;
        }
    }
    state.dashboard.borrow_mut().loading = true;
    let state = state.clone();
    spawn_local(async move {
        DashboardViewModel::for_state(&state).load_section(&state, section).await;
        crate::rerender_app();
    });
    false
}

pub fn render_dashboard(state: &AppState) -> Result<Element, JsValue> {
    let Some(role) = state.role() else {
        return render_loading("Cargando...");
    };

    // Sección por defecto no visible para el rol: saltar a la primera disponible
    {
        let mut filters = state.dashboard_filters.borrow_mut();
        if !filters.section.visible_for(role) {
            if let Some(first) = DashboardSection::for_role(role).first().copied() {
                filters.set_section(first);
            }
        }
    }
    let filters = state.dashboard_filters.borrow().clone();
    let section = filters.section;

    let content = ElementBuilder::new("section")?
        .class("dashboard-content")
        .child(ElementBuilder::new("h1")?.text(section.label()).build())?
        .build();

    if let Some(message) = state.notice.borrow().clone() {
        append_child(&content, &render_notice(&message)?)?;
    }

    if !ensure_section(state, section) {
        append_child(&content, &render_loading(&format!("Cargando {}...", section.label().to_lowercase()))?)?;
    } else {
        let own_comercio = state.session.get_profile().and_then(|p| p.comercio_id);
        let all_establecimientos = state.dashboard.borrow().establecimientos.clone();
        // Sin búsqueda ni comercio: establecimientos que el rol puede gestionar
        let gestionables = filter_establecimientos(&all_establecimientos, role, own_comercio, &DashboardFilters::default());

        append_child(&content, &search_bar(state, &filters)?)?;
        match section {
            DashboardSection::Establecimientos => {
                if role == Role::SuperAdmin {
                    append_child(&content, &comercio_chips(state, &filters)?)?;
                }
                append_child(&content, &create_establecimiento_form(state)?)?;
            }
            DashboardSection::Productos | DashboardSection::Extras => {
                append_child(&content, &establecimiento_chips(state, &filters, &gestionables)?)?;
            }
            _ => {}
        }

        let visibles = if section == DashboardSection::Establecimientos {
            filter_establecimientos(&all_establecimientos, role, own_comercio, &filters)
        } else {
            gestionables
        };
        append_child(&content, &section_table(state, role, &filters, &visibles)?)?;
    }

    let main = ElementBuilder::new("div")?
        .class("dashboard-main")
        .child(header(state, role)?)?
        .child(content)?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("dashboard-layout")
        .child(sidebar(state, role, section)?)?
        .child(main)?
        .build())
}
