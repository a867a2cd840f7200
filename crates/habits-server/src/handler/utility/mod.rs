//! [`CustomRoutes`] and other routing utilities.

mod custom_routes;

pub use custom_routes::CustomRoutes;
