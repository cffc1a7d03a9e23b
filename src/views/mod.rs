pub mod app;
pub mod shared;
pub mod navbar;
pub mod login;
pub mod register;
pub mod establishment_selector;
pub mod home;
pub mod catalog;
pub mod detail;
pub mod cart;
pub mod tickets;
pub mod profile;
pub mod dashboard;
pub mod not_found;

pub use app::{navigate, render_app};
pub use shared::{render_empty, render_footer, render_loading, render_notice, render_pagination, render_search};
pub use navbar::render_navbar;
pub use login::render_login;
pub use register::render_register;
pub use establishment_selector::render_establishment_selector;
pub use home::render_home;
pub use catalog::{render_entradas, render_productos};
pub use detail::{render_detalle_entrada, render_detalle_producto};
pub use cart::render_carrito;
pub use tickets::render_tickets;
pub use profile::render_perfil;
pub use dashboard::render_dashboard;
pub use not_found::render_not_found;
