use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Producto de la tienda
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Producto {
    pub id: i64,
    pub nombre: String,
    pub precio: f64,
    pub stock: u32,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default)]
    pub establecimiento_id: Option<i64>,
}

/// Entrada (ticket de admisión)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entrada {
    pub id: i64,
    pub nombre: String,
    pub precio: f64,
    #[serde(default)]
    pub tipo: String,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub imagen: Option<String>,
}

/// Extra asociado a un establecimiento
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extra {
    pub id: i64,
    pub nombre: String,
    pub precio: f64,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub establecimiento_id: Option<i64>,
}

/// Búsqueda por nombre sin distinguir mayúsculas
pub fn matches_search(nombre: &str, term: &str) -> bool {
    term.is_empty() || nombre.to_lowercase().contains(&term.trim().to_lowercase())
}

/// Filtro temporal del listado de entradas
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DateFilter {
    #[default]
    All,
    Today,
    Week,
    Month,
    Year,
}

impl DateFilter {
    pub const OPTIONS: [DateFilter; 5] = [
        DateFilter::All,
        DateFilter::Today,
        DateFilter::Week,
        DateFilter::Month,
        DateFilter::Year,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DateFilter::All => "Todas",
            DateFilter::Today => "Hoy",
            DateFilter::Week => "Esta semana",
            DateFilter::Month => "Este mes",
            DateFilter::Year => "Este año",
        }
    }

    /// La semana va de domingo a sábado
    pub fn matches(&self, fecha: NaiveDate, hoy: NaiveDate) -> bool {
        match self {
            DateFilter::All => true,
            DateFilter::Today => fecha == hoy,
            DateFilter::Week => {
                let inicio = hoy - Duration::days(hoy.weekday().num_days_from_sunday() as i64);
                let fin = inicio + Duration::days(6);
                fecha >= inicio && fecha <= fin
            }
            DateFilter::Month => fecha.month() == hoy.month() && fecha.year() == hoy.year(),
            DateFilter::Year => fecha.year() == hoy.year(),
        }
    }
}

/// Página de un listado
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current: usize,
    pub total_pages: usize,
}

/// Páginas numeradas desde 1; una lista vacía tiene una única página vacía
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size).max(1);
    let current = page.clamp(1, total_pages);
    let start = (current - 1) * page_size;
    let end = (start + page_size).min(items.len());
    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        current,
        total_pages,
    }
}

/// Cambio de página: fuera de rango se ignora
pub fn change_page(current: usize, requested: usize, total_pages: usize) -> usize {
    if requested >= 1 && requested <= total_pages {
        requested
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fecha(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_filtro_semana_domingo_a_sabado() {
        // 2025-06-04 es miércoles
        let hoy = fecha(2025, 6, 4);
        assert!(DateFilter::Week.matches(fecha(2025, 6, 1), hoy));
        assert!(DateFilter::Week.matches(fecha(2025, 6, 7), hoy));
        assert!(!DateFilter::Week.matches(fecha(2025, 6, 8), hoy));
        assert!(!DateFilter::Week.matches(fecha(2025, 5, 31), hoy));
    }

    #[test]
    fn test_filtro_mes_y_anio() {
        let hoy = fecha(2025, 6, 4);
        assert!(DateFilter::Month.matches(fecha(2025, 6, 30), hoy));
        assert!(!DateFilter::Month.matches(fecha(2024, 6, 30), hoy));
        assert!(DateFilter::Year.matches(fecha(2025, 1, 1), hoy));
        assert!(DateFilter::Today.matches(hoy, hoy));
        assert!(DateFilter::All.matches(fecha(1999, 1, 1), hoy));
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=7).collect();
        let page = paginate(&items, 2, 3);
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total_pages, 3);

        let ultima = paginate(&items, 9, 3);
        assert_eq!(ultima.current, 3);
        assert_eq!(ultima.items, vec![7]);

        let vacia = paginate::<u32>(&[], 1, 3);
        assert_eq!(vacia.total_pages, 1);
        assert!(vacia.items.is_empty());
    }

    #[test]
    fn test_change_page_fuera_de_rango() {
        assert_eq!(change_page(1, 0, 3), 1);
        assert_eq!(change_page(1, 4, 3), 1);
        assert_eq!(change_page(1, 3, 3), 3);
    }

    #[test]
    fn test_matches_search() {
        assert!(matches_search("Entrada General", "general"));
        assert!(matches_search("Entrada General", ""));
        assert!(!matches_search("Taza", "póster"));
    }
}
