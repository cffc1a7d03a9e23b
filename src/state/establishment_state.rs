// ============================================================================
// ESTABLISHMENT STATE - Establecimiento seleccionado (persistente)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::Establecimiento;
use crate::utils::{AppStorage, ESTABLISHMENT_KEY};

#[derive(Clone)]
pub struct EstablishmentState {
    storage: AppStorage,
    pub selected: Rc<RefCell<Option<Establecimiento>>>,
}

impl EstablishmentState {
    /// Restaura la selección guardada (sobrevive a recargas)
    pub fn load(storage: AppStorage) -> Self {
        let selected = storage.load_json::<Establecimiento>(ESTABLISHMENT_KEY);
        if let Some(ref est) = selected {
            log::info!("🏛️ [ESTABLECIMIENTO] Restaurado: {} ({})", est.nombre, est.id);
        }
        Self {
            storage,
            selected: Rc::new(RefCell::new(selected)),
        }
    }

    pub fn get(&self) -> Option<Establecimiento> {
        self.selected.borrow().clone()
    }

    pub fn is_selected(&self) -> bool {
        self.selected.borrow().is_some()
    }

    pub fn select(&self, establecimiento: Establecimiento) {
        if let Err(e) = self.storage.save_json(ESTABLISHMENT_KEY, &establecimiento) {
            log::error!("❌ [ESTABLECIMIENTO] Error guardando selección: {}", e);
        }
        *self.selected.borrow_mut() = Some(establecimiento);
    }

    /// Deselección explícita o logout
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(ESTABLISHMENT_KEY) {
            log::warn!("⚠️ [ESTABLECIMIENTO] No se pudo borrar la selección: {}", e);
        }
        *self.selected.borrow_mut() = None;
    }
}
