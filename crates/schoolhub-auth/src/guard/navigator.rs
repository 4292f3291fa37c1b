//! Navigator: resolves paths, applies the guard, follows redirects.

use std::collections::BTreeMap;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;

use super::enforcer::{NavigationDecision, RouteGuard};
use super::routes::{RouteMatch, RouteTable};

/// Upper bound on redirects followed for one navigation.
const MAX_REDIRECTS: usize = 5;

/// Where a navigation ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Normalized path of the view entered.
    pub path: String,
    /// Name of the route entered.
    pub route: String,
    /// Captured path parameters.
    pub params: BTreeMap<String, String>,
    /// Whether the catch-all not-found view was entered.
    pub not_found: bool,
    /// Whether the view hides the navigation bar.
    pub hide_navbar: bool,
}

impl From<&RouteMatch> for Location {
    fn from(m: &RouteMatch) -> Self {
        Self {
            path: m.path.clone(),
            route: m.route.name.clone(),
            params: m.params.clone(),
            not_found: m.is_not_found(),
            hide_navbar: m.route.hide_navbar,
        }
    }
}

/// Result of [`Navigator::navigate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Path the caller asked for.
    pub requested: String,
    /// Guard redirects applied on the way, in order.
    pub redirects: Vec<NavigationDecision>,
    /// Final location.
    pub location: Location,
}

impl Navigation {
    /// Whether the caller landed where they asked to go.
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Tracks the current location and drives every navigation through the
/// route guard.
#[derive(Debug)]
pub struct Navigator {
    table: RouteTable,
    guard: RouteGuard,
    current: RwLock<Option<Location>>,
}

impl Navigator {
    /// Create a navigator over `table`, guarded by `guard`.
    pub fn new(table: RouteTable, guard: RouteGuard) -> Self {
        Self {
            table,
            guard,
            current: RwLock::new(None),
        }
    }

    /// The route table in use.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Current location, if any navigation has completed.
    pub async fn current(&self) -> Option<Location> {
        self.current.read().await.clone()
    }

    /// Navigate to `path`, following table redirects and guard decisions
    /// until a route is admitted.
    pub async fn navigate(&self, path: &str) -> AppResult<Navigation> {
        let mut target = path.to_string();
        let mut redirects = Vec::new();

        for _ in 0..=MAX_REDIRECTS {
            let matched = self
                .table
                .resolve(&target)
                .ok_or_else(|| AppError::internal(format!("No route matches '{target}'")))?;

            if let Some(to) = &matched.route.redirect {
                debug!(from = %matched.path, to = %to, "Following route redirect");
                target = to.clone();
                continue;
            }

            let decision = self.guard.evaluate(&matched.route).await?;
            match decision.redirect_path() {
                None => {
                    let location = Location::from(&matched);
                    *self.current.write().await = Some(location.clone());
                    return Ok(Navigation {
                        requested: path.to_string(),
                        redirects,
                        location,
                    });
                }
                Some(to) => {
                    debug!(from = %matched.path, to, ?decision, "Guard redirect");
                    redirects.push(decision);
                    target = to.to_string();
                }
            }
        }

        Err(AppError::internal(format!(
            "Too many redirects while navigating to '{path}'"
        )))
    }
}
