pub mod auth;
pub mod user;
pub mod commerce;
pub mod catalog;
pub mod sale;
pub mod cart;

pub use auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
pub use user::{Role, UserLookup, UserProfile, Usuario};
pub use commerce::{Comercio, Establecimiento, NewEstablecimiento};
pub use catalog::{DateFilter, Entrada, Extra, Page, Producto};
pub use sale::{LineaVenta, Venta};
pub use cart::{Cart, CartItem, ItemKind, PaymentMethod, QuantitySelector, Ticket};
