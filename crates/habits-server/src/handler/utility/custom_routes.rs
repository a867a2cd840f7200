//! Custom routes for extending the API router.

use axum::Router;

use crate::service::ServiceState;

/// Additional routes merged into the main API router.
///
/// Custom routes sit behind the same route guard as the built-in ones; list
/// a path in the anonymous paths to serve it without credentials.
///
/// # Examples
///
/// ```rust,ignore
/// use habits_server::handler::CustomRoutes;
///
/// let custom = CustomRoutes::new()
///     .add_routes(habit_routes)
///     .add_routes(category_routes);
/// ```
#[derive(Debug, Default, Clone)]
#[must_use]
pub struct CustomRoutes {
    routes: Option<Router<ServiceState>>,
}

impl CustomRoutes {
    /// Creates a new empty `CustomRoutes` instance.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds routes, merging with existing routes if any.
    pub fn add_routes(mut self, routes: Router<ServiceState>) -> Self {
        self.routes = Some(match self.routes {
            Some(existing) => existing.merge(routes),
            None => routes,
        });
        self
    }

    /// Returns the merged routes, if any were added.
    pub fn into_routes(self) -> Option<Router<ServiceState>> {
        self.routes
    }
}
