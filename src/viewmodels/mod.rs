pub mod session_viewmodel;
pub mod storefront_viewmodel;
pub mod dashboard_viewmodel;

pub use session_viewmodel::SessionViewModel;
pub use storefront_viewmodel::StorefrontViewModel;
pub use dashboard_viewmodel::{DashboardSection, DashboardViewModel};
