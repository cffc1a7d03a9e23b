// ============================================================================
// CART STATE - Carrito e historial de tickets (persistidos en cada cambio)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::models::{Cart, CartItem, ItemKind, PaymentMethod, Ticket};
use crate::utils::{AppStorage, StorageError, CART_KEY, TICKETS_KEY};

#[derive(Clone)]
pub struct CartState {
    storage: AppStorage,
    pub cart: Rc<RefCell<Cart>>,
}

impl CartState {
    pub fn load(storage: AppStorage) -> Self {
        let cart = storage.load_json::<Cart>(CART_KEY).unwrap_or_default();
        log::info!("🛒 [CART] Cargado con {} líneas", cart.len());
        Self {
            storage,
            cart: Rc::new(RefCell::new(cart)),
        }
    }

    pub fn get(&self) -> Cart {
        self.cart.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.cart.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.borrow().is_empty()
    }

    pub fn contains(&self, id: i64, tipo: ItemKind) -> bool {
        self.cart.borrow().contains(id, tipo)
    }

    pub fn add(&self, item: CartItem) -> Result<(), StorageError> {
        log::info!("➕ [CART] {} x{} ({})", item.nombre, item.cantidad, item.tipo.label());
        self.update(|cart| cart.add(item))
    }

    pub fn remove(&self, index: usize) -> Result<Option<CartItem>, StorageError> {
        self.update(|cart| cart.remove(index))
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.update(|cart| cart.clear())
    }

    /// Cierra el pedido: crea el ticket, lo añade al historial y vacía el carrito.
    /// Carrito vacío → None (no se crea ticket).
    pub fn checkout(
        &self,
        metodo_pago: PaymentMethod,
        fecha: DateTime<Utc>,
    ) -> Result<Option<Ticket>, StorageError> {
        if self.is_empty() {
            log::warn!("⚠️ [CART] Checkout con carrito vacío, ignorado");
            return Ok(None);
        }

        // Un historial ilegible no se pisa: se aborta el checkout
        let mut tickets: Vec<Ticket> = self.storage.try_load_json(TICKETS_KEY)?.unwrap_or_default();
        let ticket = Ticket::from_cart(&self.cart.borrow(), metodo_pago, fecha);
        tickets.push(ticket.clone());
        self.storage.save_json(TICKETS_KEY, &tickets)?;
        self.clear()?;

        log::info!("🧾 [CART] Ticket {} creado ({} €)", ticket.id, ticket.total);
        Ok(Some(ticket))
    }

    /// Historial de tickets en orden de creación
    pub fn tickets(&self) -> Vec<Ticket> {
        self.storage.load_json(TICKETS_KEY).unwrap_or_default()
    }

    /// Aplica el cambio sobre una copia; memoria solo cambia si se guardó
    fn update<R>(&self, change: impl FnOnce(&mut Cart) -> R) -> Result<R, StorageError> {
        let mut next = self.get();
        let result = change(&mut next);
        self.storage.save_json(CART_KEY, &next)?;
        *self.cart.borrow_mut() = next;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entrada, Producto};
    use crate::utils::storage::KeyValueStore;
    use chrono::{NaiveDate, TimeZone};

    /// localStorage lleno: toda escritura falla
    struct SinEspacio;

    impl KeyValueStore for SinEspacio {
        fn get_item(&self, _key: &str) -> Option<String> {
            None
        }

        fn set_item(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write(key.to_string()))
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            Err(StorageError::Write(key.to_string()))
        }
    }

    const TICKETS_WEB: &str = r#"[{"id":1001,"fecha":"2025-05-15T14:30:00.000Z","items":[{"id":1,"nombre":"Entrada General","precio":12,"cantidad":2,"tipo":"entrada","imagen":null,"precioTotal":24}],"total":24,"metodoPago":"tarjeta"}]"#;

    fn producto(id: i64) -> Producto {
        Producto {
            id,
            nombre: format!("Catálogo {}", id),
            precio: 12.5,
            stock: 10,
            descripcion: String::new(),
            imagen: None,
            establecimiento_id: Some(1),
        }
    }

    fn entrada(id: i64) -> Entrada {
        Entrada {
            id,
            nombre: "Entrada general".to_string(),
            precio: 8.0,
            tipo: "General".to_string(),
            fecha: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            descripcion: String::new(),
            imagen: None,
        }
    }

    #[test]
    fn test_recarga_reproduce_orden() {
        let storage = AppStorage::in_memory();
        let state = CartState::load(storage.clone());
        state.add(CartItem::from_producto(&producto(3), 2)).unwrap();
        state.add(CartItem::from_entrada(&entrada(1), 1)).unwrap();
        state.add(CartItem::from_producto(&producto(1), 1)).unwrap();

        let recargado = CartState::load(storage);
        assert_eq!(recargado.get(), state.get());
        let ids: Vec<i64> = recargado.get().items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1, 1]);
    }

    #[test]
    fn test_vaciar_tambien_se_persiste() {
        let storage = AppStorage::in_memory();
        let state = CartState::load(storage.clone());
        state.add(CartItem::from_producto(&producto(1), 1)).unwrap();
        state.remove(0).unwrap();
        assert!(CartState::load(storage).is_empty());
    }

    #[test]
    fn test_checkout_crea_ticket_y_vacia() {
        let storage = AppStorage::in_memory();
        let state = CartState::load(storage.clone());
        state.add(CartItem::from_producto(&producto(1), 2)).unwrap();
        let fecha = Utc.with_ymd_and_hms(2025, 5, 15, 14, 30, 0).unwrap();

        let ticket = state.checkout(PaymentMethod::Efectivo, fecha).unwrap().unwrap();
        assert_eq!(ticket.total, 25.0);
        assert_eq!(ticket.id.len(), 8);
        assert!(state.is_empty());
        assert_eq!(CartState::load(storage).tickets(), vec![ticket]);
    }

    #[test]
    fn test_checkout_vacio_no_crea_ticket() {
        let state = CartState::load(AppStorage::in_memory());
        assert_eq!(state.checkout(PaymentMethod::Tarjeta, Utc::now()).unwrap(), None);
        assert!(state.tickets().is_empty());
    }

    #[test]
    fn test_tickets_con_id_numerico_se_conservan() {
        let storage = AppStorage::in_memory();
        storage.set_string(TICKETS_KEY, TICKETS_WEB).unwrap();
        let state = CartState::load(storage.clone());

        let previos = state.tickets();
        assert_eq!(previos.len(), 1);
        assert_eq!(previos[0].id, "1001");
        assert_eq!(previos[0].items[0].precio_total, 24.0);

        state.add(CartItem::from_producto(&producto(1), 1)).unwrap();
        let nuevo = state.checkout(PaymentMethod::Tarjeta, Utc::now()).unwrap().unwrap();

        let ids: Vec<String> = CartState::load(storage).tickets().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["1001".to_string(), nuevo.id]);
    }

    #[test]
    fn test_historial_ilegible_no_se_sobrescribe() {
        let storage = AppStorage::in_memory();
        storage.set_string(TICKETS_KEY, "{roto").unwrap();
        let state = CartState::load(storage.clone());
        state.add(CartItem::from_producto(&producto(1), 1)).unwrap();

        let result = state.checkout(PaymentMethod::Efectivo, Utc::now());
        assert!(matches!(result, Err(StorageError::Corrupt { .. })));
        assert_eq!(storage.get_string(TICKETS_KEY).as_deref(), Some("{roto"));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_fallo_al_guardar_no_cambia_memoria() {
        let state = CartState::load(AppStorage::new(Rc::new(SinEspacio)));
        assert!(state.add(CartItem::from_producto(&producto(1), 1)).is_err());
        assert!(state.is_empty());
    }
}
