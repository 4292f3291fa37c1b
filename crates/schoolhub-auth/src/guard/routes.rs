//! Static route table.

use std::collections::BTreeMap;

use schoolhub_core::types::Role;

/// Pattern that matches every path; used for the not-found route.
pub const CATCH_ALL: &str = "*";

/// Path of the login view, the target of every login redirect.
pub const LOGIN_PATH: &str = "/login";

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Route name, unique within the table.
    pub name: String,
    /// Path pattern. Segments starting with `:` capture a parameter;
    /// [`CATCH_ALL`] matches anything.
    pub path: String,
    /// Whether a token is needed to enter.
    pub requires_auth: bool,
    /// Roles admitted, or `None` for any authenticated user.
    pub allowed_roles: Option<Vec<Role>>,
    /// Whether the view hides the navigation bar.
    pub hide_navbar: bool,
    /// Path to forward to instead of rendering a view.
    pub redirect: Option<String>,
}

impl RouteDescriptor {
    /// A route open to everyone.
    pub fn public(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            requires_auth: false,
            allowed_roles: None,
            hide_navbar: false,
            redirect: None,
        }
    }

    /// A route that needs a token and one of `roles`.
    pub fn guarded(name: &str, path: &str, roles: &[Role]) -> Self {
        Self {
            requires_auth: true,
            allowed_roles: Some(roles.to_vec()),
            ..Self::public(name, path)
        }
    }

    /// A route that only forwards to `to`.
    pub fn redirect(path: &str, to: &str) -> Self {
        Self {
            redirect: Some(to.to_string()),
            ..Self::public("Root", path)
        }
    }

    /// Hide the navigation bar on this route.
    pub fn without_navbar(mut self) -> Self {
        self.hide_navbar = true;
        self
    }

    /// Whether `role` is in the allowed set. Routes without a set admit
    /// every role.
    pub fn admits(&self, role: Option<Role>) -> bool {
        match (&self.allowed_roles, role) {
            (None, _) => true,
            (Some(roles), Some(role)) => roles.contains(&role),
            (Some(_), None) => false,
        }
    }

    fn is_catch_all(&self) -> bool {
        self.path == CATCH_ALL
    }

    /// Match `path` against this route's pattern, returning the captures.
    fn capture(&self, path: &str) -> Option<BTreeMap<String, String>> {
        if self.is_catch_all() {
            let mut params = BTreeMap::new();
            params.insert("path_match".to_string(), path.trim_start_matches('/').to_string());
            return Some(params);
        }

        let pattern: Vec<&str> = segments(&self.path).collect();
        let actual: Vec<&str> = segments(path).collect();
        if pattern.len() != actual.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (expected, got) in pattern.iter().zip(&actual) {
            match expected.strip_prefix(':') {
                Some(name) => {
                    params.insert(name.to_string(), got.to_string());
                }
                None if expected == got => {}
                None => return None,
            }
        }
        Some(params)
    }
}

/// A path resolved against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The normalized path that was matched.
    pub path: String,
    /// The matching route.
    pub route: RouteDescriptor,
    /// Captured `:param` segments.
    pub params: BTreeMap<String, String>,
}

impl RouteMatch {
    /// Whether this is the catch-all not-found route.
    pub fn is_not_found(&self) -> bool {
        self.route.is_catch_all()
    }
}

/// Ordered route table; the first matching entry wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    /// Build a table from explicit routes.
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// The school client's routes.
    pub fn school() -> Self {
        Self::new(vec![
            RouteDescriptor::redirect("/", LOGIN_PATH),
            RouteDescriptor::public("Login", LOGIN_PATH).without_navbar(),
            RouteDescriptor::public("Register", "/register").without_navbar(),
            RouteDescriptor::guarded("ParentDashboard", "/parent-dashboard", &[Role::Parent]),
            RouteDescriptor::guarded("TeacherDashboard", "/teacher-dashboard", &[Role::Teacher]),
            RouteDescriptor::guarded("AdminDashboard", "/admin-dashboard", &[Role::Admin]),
            RouteDescriptor::guarded(
                "CreateAnnouncement",
                "/create-announcement",
                &[Role::Teacher, Role::Admin],
            ),
            RouteDescriptor::guarded("ClassDetail", "/classes/:id", &[Role::Admin, Role::Teacher]),
            RouteDescriptor::public("NotFound", CATCH_ALL),
        ])
    }

    /// All routes in match order.
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Look a route up by name.
    pub fn find_by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Resolve `path` (query string and trailing slash ignored).
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let path = normalize(path);
        self.routes.iter().find_map(|route| {
            route.capture(&path).map(|params| RouteMatch {
                path: path.clone(),
                route: route.clone(),
                params,
            })
        })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::school()
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Strip query and fragment, force a leading slash, drop a trailing one.
pub fn normalize(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}
