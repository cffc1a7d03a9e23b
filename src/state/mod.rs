// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod session_state;
pub mod establishment_state;
pub mod cart_state;
pub mod app_state;

pub use session_state::*;
pub use establishment_state::*;
pub use cart_state::*;
pub use app_state::*;
