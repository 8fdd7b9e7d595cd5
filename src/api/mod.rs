//! HTTP surface: REST API and embedded web UI

pub mod dentists;
pub mod health;
pub mod ui;

pub use dentists::dentist_routes;
pub use health::health_routes;
pub use ui::ui_routes;
