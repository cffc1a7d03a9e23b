use serde::{Deserialize, Serialize};

/// Venta registrada en el backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Venta {
    pub id: i64,
    #[serde(default)]
    pub fecha: Option<String>,
    pub total: f64,
    #[serde(default)]
    pub metodo_pago: Option<String>,
    #[serde(default)]
    pub establecimiento_id: Option<i64>,
}

/// Línea de una venta
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineaVenta {
    pub id: i64,
    pub venta_id: i64,
    #[serde(default)]
    pub producto_id: Option<i64>,
    #[serde(default)]
    pub descripcion: String,
    pub cantidad: u32,
    pub precio_unitario: f64,
}

impl LineaVenta {
    pub fn subtotal(&self) -> f64 {
        self.precio_unitario * self.cantidad as f64
    }
}
