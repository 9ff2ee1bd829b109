//! Route templates and their placeholders.
//!
//! # Examples
//!
//! ```
//! use apigen_core::route::{join_route, placeholders};
//!
//! let route = join_route("article", Some("{id:int}/comments"));
//! assert_eq!(route, "/api/article/{id:int}/comments");
//!
//! let found = placeholders(&route);
//! assert_eq!(found[0].name, "id");
//! assert_eq!(found[0].segment, "{id:int}");
//! ```

use serde::Serialize;

/// One `{...}` segment of a route template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlaceholder {
    /// Segment exactly as written, braces included
    pub segment: String,
    /// Parameter name, without constraints, defaults, or optional marker
    pub name: String,
}

/// Builds the full route of an action.
///
/// The action route literal, if any, is appended to `/api/{controller}`.
/// A leading `~` and leading slashes on the literal are dropped, so a route
/// ASP.NET Core treats as absolute (`/health`, `~/health`) is still joined
/// under the controller prefix.
///
/// # Examples
///
/// ```
/// use apigen_core::route::join_route;
///
/// assert_eq!(join_route("auth", None), "/api/auth");
/// assert_eq!(join_route("auth", Some("")), "/api/auth");
/// assert_eq!(join_route("auth", Some("/login")), "/api/auth/login");
/// assert_eq!(join_route("auth", Some("~/login")), "/api/auth/login");
/// ```
#[must_use]
pub fn join_route(controller: &str, literal: Option<&str>) -> String {
    let mut route = format!("/api/{controller}");
    let literal = literal
        .map(|l| l.trim_start_matches('~').trim_start_matches('/'))
        .filter(|l| !l.is_empty());
    if let Some(literal) = literal {
        route.push('/');
        route.push_str(literal);
    }
    route
}

/// Extracts placeholders in route order.
///
/// Catch-all markers (`{*path}`) are stripped from the name. Unterminated
/// braces end the scan.
///
/// # Examples
///
/// ```
/// use apigen_core::route::placeholders;
///
/// let names: Vec<_> = placeholders("/api/tag/{slug?}/{page=1}")
///     .into_iter()
///     .map(|p| p.name)
///     .collect();
/// assert_eq!(names, ["slug", "page"]);
/// ```
#[must_use]
pub fn placeholders(route: &str) -> Vec<RoutePlaceholder> {
    let mut found = Vec::new();
    let mut rest = route;
    while let Some(open) = rest.find('{') {
        let Some(len) = rest[open..].find('}') else {
            break;
        };
        let segment = &rest[open..=open + len];
        let inner = &segment[1..segment.len() - 1];
        let name = inner
            .split([':', '?', '='])
            .next()
            .unwrap_or(inner)
            .trim()
            .trim_start_matches('*');
        if !name.is_empty() {
            found.push(RoutePlaceholder {
                segment: segment.to_string(),
                name: name.to_string(),
            });
        }
        rest = &rest[open + len + 1..];
    }
    found
}
