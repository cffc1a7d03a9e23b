use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::catalog::{Entrada, Producto};
use crate::utils::constants::IVA_RATE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Entrada,
    Producto,
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Entrada => "Entrada",
            ItemKind::Producto => "Producto",
        }
    }
}

/// Línea del carrito (mismo JSON que guardaba la versión web)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub nombre: String,
    pub precio: f64,
    pub cantidad: u32,
    pub tipo: ItemKind,
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(rename = "precioTotal")]
    pub precio_total: f64,
}

impl CartItem {
    pub fn from_producto(producto: &Producto, cantidad: u32) -> Self {
        Self {
            id: producto.id,
            nombre: producto.nombre.clone(),
            precio: producto.precio,
            cantidad,
            tipo: ItemKind::Producto,
            imagen: producto.imagen.clone(),
            precio_total: producto.precio * cantidad as f64,
        }
    }

    pub fn from_entrada(entrada: &Entrada, cantidad: u32) -> Self {
        Self {
            id: entrada.id,
            nombre: entrada.nombre.clone(),
            precio: entrada.precio,
            cantidad,
            tipo: ItemKind::Entrada,
            imagen: entrada.imagen.clone(),
            precio_total: entrada.precio * cantidad as f64,
        }
    }
}

/// Secuencia ordenada de líneas
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, item: CartItem) {
        self.items.push(item);
    }

    /// Índice fuera de rango: no-op
    pub fn remove(&mut self, index: usize) -> Option<CartItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn contains(&self, id: i64, tipo: ItemKind) -> bool {
        self.items.iter().any(|i| i.id == id && i.tipo == tipo)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(|i| i.precio_total).sum()
    }

    pub fn iva(&self) -> f64 {
        self.subtotal() * IVA_RATE
    }

    pub fn total(&self) -> f64 {
        self.subtotal() * (1.0 + IVA_RATE)
    }
}

/// Selector de cantidad de las fichas de detalle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantitySelector {
    value: u32,
    max: Option<u32>,
}

impl QuantitySelector {
    /// Entradas: sin tope
    pub fn unbounded() -> Self {
        Self { value: 1, max: None }
    }

    /// Productos: tope en el stock
    pub fn with_stock(stock: u32) -> Self {
        Self { value: 1, max: Some(stock) }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn can_decrement(&self) -> bool {
        self.value > 1
    }

    pub fn can_increment(&self) -> bool {
        self.max.map_or(true, |max| self.value < max)
    }

    pub fn decrement(&mut self) {
        if self.can_decrement() {
            self.value -= 1;
        }
    }

    pub fn increment(&mut self) {
        if self.can_increment() {
            self.value += 1;
        }
    }

    pub fn in_stock(&self) -> bool {
        self.max.map_or(true, |max| max >= self.value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Tarjeta,
    Efectivo,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Tarjeta => "Tarjeta de crédito/débito",
            PaymentMethod::Efectivo => "Efectivo",
        }
    }
}

/// Pedido finalizado (historial local)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// La versión web guardaba ids numéricos (1001); los nuevos son texto
    #[serde(deserialize_with = "ticket_id")]
    pub id: String,
    pub fecha: DateTime<Utc>,
    pub items: Vec<CartItem>,
    pub total: f64,
    #[serde(rename = "metodoPago")]
    pub metodo_pago: PaymentMethod,
}

fn ticket_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Numero(i64),
        Texto(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Numero(n) => n.to_string(),
        RawId::Texto(s) => s,
    })
}

impl Ticket {
    /// El total guardado es el subtotal del carrito
    pub fn from_cart(cart: &Cart, metodo_pago: PaymentMethod, fecha: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string()[..8].to_uppercase(),
            fecha,
            items: cart.items().to_vec(),
            total: cart.subtotal(),
            metodo_pago,
        }
    }

    /// Búsqueda por número de ticket o por fecha formateada
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.id.to_lowercase().contains(&term)
            || crate::utils::format_datetime(&self.fecha)
                .to_lowercase()
                .contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn producto(id: i64, precio: f64, stock: u32) -> Producto {
        Producto {
            id,
            nombre: format!("Producto {}", id),
            precio,
            stock,
            descripcion: String::new(),
            imagen: None,
            establecimiento_id: Some(1),
        }
    }

    #[test]
    fn test_totales_con_iva() {
        let mut cart = Cart::default();
        cart.add(CartItem::from_producto(&producto(1, 25.0, 50), 2));
        cart.add(CartItem::from_producto(&producto(2, 10.0, 5), 1));
        assert_eq!(cart.subtotal(), 60.0);
        assert!((cart.iva() - 12.6).abs() < 1e-9);
        assert!((cart.total() - 72.6).abs() < 1e-9);
    }

    #[test]
    fn test_remove_conserva_orden() {
        let mut cart = Cart::default();
        for id in 1..=3 {
            cart.add(CartItem::from_producto(&producto(id, 1.0, 9), 1));
        }
        assert_eq!(cart.remove(1).map(|i| i.id), Some(2));
        let ids: Vec<i64> = cart.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(cart.remove(7), None);
    }

    #[test]
    fn test_contains_distingue_tipo() {
        let mut cart = Cart::default();
        cart.add(CartItem::from_producto(&producto(4, 1.0, 9), 1));
        assert!(cart.contains(4, ItemKind::Producto));
        assert!(!cart.contains(4, ItemKind::Entrada));
    }

    #[test]
    fn test_json_compatible() {
        let item = CartItem::from_producto(&producto(1, 12.5, 3), 2);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["tipo"], "producto");
        assert_eq!(json["precioTotal"], 25.0);
    }

    #[test]
    fn test_quantity_selector_tope_stock() {
        let mut qty = QuantitySelector::with_stock(2);
        qty.decrement();
        assert_eq!(qty.value(), 1);
        qty.increment();
        qty.increment();
        assert_eq!(qty.value(), 2);
        assert!(!qty.can_increment());
        assert!(qty.in_stock());

        assert!(!QuantitySelector::with_stock(0).in_stock());
    }

    #[test]
    fn test_ticket_total_es_subtotal() {
        let mut cart = Cart::default();
        cart.add(CartItem::from_producto(&producto(1, 10.0, 9), 3));
        let ticket = Ticket::from_cart(&cart, PaymentMethod::Efectivo, Utc::now());
        assert_eq!(ticket.total, 30.0);
        assert_eq!(ticket.items.len(), 1);
        assert_eq!(ticket.id.len(), 8);
    }

    #[test]
    fn test_ticket_busqueda_por_fecha() {
        use chrono::TimeZone;
        let ticket = Ticket {
            id: "1001".to_string(),
            fecha: Utc.with_ymd_and_hms(2025, 5, 15, 14, 30, 0).unwrap(),
            items: vec![],
            total: 0.0,
            metodo_pago: PaymentMethod::Tarjeta,
        };
        assert!(ticket.matches_search("100"));
        assert!(ticket.matches_search("Mayo"));
        assert!(!ticket.matches_search("junio"));
    }

    #[test]
    fn test_ticket_busqueda_ignora_productos() {
        let mut cart = Cart::default();
        cart.add(CartItem::from_producto(&producto(7, 2.0, 5), 1));
        let ticket = Ticket::from_cart(&cart, PaymentMethod::Tarjeta, Utc::now());
        assert!(!ticket.matches_search("producto 7"));
        assert!(ticket.matches_search(&ticket.id.to_lowercase()));
    }

    #[test]
    fn test_ticket_acepta_id_numerico_o_texto() {
        let numerico: Ticket = serde_json::from_str(
            r#"{"id":1002,"fecha":"2025-05-10T11:15:00.000Z","items":[],"total":25,"metodoPago":"efectivo"}"#,
        )
        .unwrap();
        assert_eq!(numerico.id, "1002");
        assert_eq!(numerico.metodo_pago, PaymentMethod::Efectivo);

        let texto: Ticket = serde_json::from_str(&serde_json::to_string(&numerico).unwrap()).unwrap();
        assert_eq!(texto, numerico);
    }
}
