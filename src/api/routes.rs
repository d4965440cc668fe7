//! Explicit dispatch table: every route is a `(method, path pattern)` pair bound to a
//! handler, collected into groups that are mounted onto an [`Application`].

use std::collections::{BTreeMap, BTreeSet};

use axum::handler::Handler;
use axum::routing::{on, MethodFilter, MethodRouter};
use axum::Router;
use thiserror::Error;

use crate::api::handlers;
use crate::core::state::AppState;
use crate::schemas::AppMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }

    fn filter(self) -> MethodFilter {
        match self {
            Self::Get => MethodFilter::GET,
            Self::Post => MethodFilter::POST,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MountError {
    #[error("route prefix {prefix:?} {reason}")]
    InvalidPrefix { prefix: String, reason: &'static str },
    #[error("invalid route path {path:?}")]
    InvalidPath { path: String },
    #[error("route {method} {path} is already registered")]
    DuplicateRoute { method: &'static str, path: String },
    #[error("route {path} names a parameter differently from {existing}")]
    ConflictingParams { path: String, existing: String },
}

pub(crate) struct RouteEntry {
    pub(crate) method: HttpMethod,
    pub(crate) path: String,
    pub(crate) name: &'static str,
    handler: MethodRouter<AppState>,
}

/// A named collection of routes sharing a prefix and tags.
pub(crate) struct RouteGroup {
    pub(crate) prefix: String,
    pub(crate) tags: Vec<String>,
    pub(crate) routes: Vec<RouteEntry>,
}

impl RouteGroup {
    pub(crate) fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), tags: Vec::new(), routes: Vec::new() }
    }

    pub(crate) fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// `path` uses `{name}` for parameters, e.g. `/items/{item_id}`.
    pub(crate) fn route<H, T>(
        mut self,
        method: HttpMethod,
        path: impl Into<String>,
        name: &'static str,
        handler: H,
    ) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.routes.push(RouteEntry {
            method,
            path: path.into(),
            name,
            handler: on(method.filter(), handler),
        });
        self
    }

    pub(crate) fn full_path(&self, entry: &RouteEntry) -> String {
        format!("{}{}", self.prefix, entry.path)
    }

    fn validate(&self) -> Result<(), MountError> {
        if !self.prefix.is_empty() {
            if !self.prefix.starts_with('/') {
                return Err(MountError::InvalidPrefix {
                    prefix: self.prefix.clone(),
                    reason: "must start with '/'",
                });
            }
            if self.prefix.ends_with('/') {
                return Err(MountError::InvalidPrefix {
                    prefix: self.prefix.clone(),
                    reason: "must not end with '/'",
                });
            }
        }

        for entry in &self.routes {
            let relative_ok = entry.path.starts_with('/')
                || (entry.path.is_empty() && !self.prefix.is_empty());
            let full_path = self.full_path(entry);
            if !relative_ok || !params_well_formed(&full_path) {
                return Err(MountError::InvalidPath { path: full_path });
            }
        }

        Ok(())
    }
}

/// Application shell: metadata plus every mounted route group.
pub(crate) struct Application {
    metadata: AppMetadata,
    groups: Vec<RouteGroup>,
}

impl Application {
    pub(crate) fn new(metadata: AppMetadata) -> Self {
        Self { metadata, groups: Vec::new() }
    }

    pub(crate) fn metadata(&self) -> &AppMetadata {
        &self.metadata
    }

    pub(crate) fn groups(&self) -> &[RouteGroup] {
        &self.groups
    }

    pub(crate) fn include_router(&mut self, group: RouteGroup) -> Result<(), MountError> {
        group.validate()?;

        let mut known: Vec<(HttpMethod, String)> = self
            .entries()
            .map(|(owner, entry)| (entry.method, owner.full_path(entry)))
            .collect();
        for entry in &group.routes {
            let path = group.full_path(entry);
            for (method, existing) in &known {
                if *method == entry.method && pattern_key(existing) == pattern_key(&path) {
                    return Err(MountError::DuplicateRoute {
                        method: entry.method.as_str(),
                        path,
                    });
                }
                if params_conflict(existing, &path) {
                    return Err(MountError::ConflictingParams {
                        path,
                        existing: existing.clone(),
                    });
                }
            }
            known.push((entry.method, path));
        }

        tracing::debug!(
            prefix = %group.prefix,
            tags = ?group.tags,
            routes = group.routes.len(),
            "Route group mounted"
        );
        self.groups.push(group);
        Ok(())
    }

    /// Every mounted route with the group that owns it, in mount order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&RouteGroup, &RouteEntry)> {
        self.groups.iter().flat_map(|group| group.routes.iter().map(move |entry| (group, entry)))
    }

    pub(crate) fn has_route(&self, method: HttpMethod, path: &str) -> bool {
        self.entries()
            .any(|(group, entry)| entry.method == method && group.full_path(entry) == path)
    }

    /// Distinct full path patterns, used for trailing-slash redirects.
    pub(crate) fn route_patterns(&self) -> Vec<String> {
        self.entries()
            .map(|(group, entry)| group.full_path(entry))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// One axum route per distinct path; methods without a handler answer 405.
    pub(crate) fn into_dispatch_router(self) -> Router<AppState> {
        let mut by_path: BTreeMap<String, MethodRouter<AppState>> = BTreeMap::new();
        for group in self.groups {
            let prefix = group.prefix;
            for entry in group.routes {
                let path = router_path(&format!("{prefix}{}", entry.path));
                let merged = match by_path.remove(&path) {
                    Some(existing) => existing.merge(entry.handler),
                    None => entry.handler,
                };
                by_path.insert(path, merged);
            }
        }

        by_path.into_iter().fold(Router::new(), |router, (path, method_router)| {
            router.route(&path, method_router.fallback(handlers::method_not_allowed))
        })
    }
}

/// Whether a concrete request path fits `pattern`; `{name}` matches one non-empty segment.
pub(crate) fn pattern_matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(expected), Some(actual)) => {
                let matched = if param_name(expected).is_some() {
                    !actual.is_empty()
                } else {
                    expected == actual
                };
                if !matched {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

fn param_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{').and_then(|rest| rest.strip_suffix('}'))
}

/// `/x/{a}` -> `/x/{}`, so routes differing only in parameter names compare equal.
fn pattern_key(path: &str) -> String {
    path.split('/')
        .map(|segment| if param_name(segment).is_some() { "{}" } else { segment })
        .collect::<Vec<_>>()
        .join("/")
}

/// The router needs one name per parameter position along a shared prefix.
fn params_conflict(existing: &str, path: &str) -> bool {
    for (left, right) in existing.split('/').zip(path.split('/')) {
        match (param_name(left), param_name(right)) {
            (Some(a), Some(b)) if a != b => return true,
            (Some(_), Some(_)) => {}
            _ if left != right => return false,
            _ => {}
        }
    }
    false
}

/// `/items/{item_id}` -> `/items/:item_id`.
fn router_path(path: &str) -> String {
    path.split('/')
        .map(|segment| match param_name(segment) {
            Some(name) => format!(":{name}"),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn params_well_formed(path: &str) -> bool {
    path.split('/').all(|segment| {
        if !segment.contains('{') && !segment.contains('}') && !segment.starts_with(':') {
            return true;
        }
        match param_name(segment) {
            Some(name) => {
                !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            None => false,
        }
    })
}

/// `read_item` + `/items/{item_id}` + GET -> `read_item_items__item_id__get`.
pub(crate) fn operation_id(name: &str, path: &str, method: HttpMethod) -> String {
    let raw: String = format!("{name}{path}")
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("{raw}_{}", method.as_str().to_ascii_lowercase())
}

/// `read_item` -> `Read Item`.
pub(crate) fn summary(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn noop() -> &'static str {
        "ok"
    }

    fn app() -> Application {
        Application::new(AppMetadata::default())
    }

    #[test]
    fn operation_id_matches_framework_convention() {
        assert_eq!(
            operation_id("read_item", "/items/{item_id}", HttpMethod::Get),
            "read_item_items__item_id__get"
        );
        assert_eq!(
            operation_id("create_item", "/items/", HttpMethod::Post),
            "create_item_items__post"
        );
        assert_eq!(operation_id("read_root", "/", HttpMethod::Get), "read_root__get");
    }

    #[test]
    fn summary_title_cases_words() {
        assert_eq!(summary("read_item"), "Read Item");
        assert_eq!(summary("list__users"), "List Users");
    }

    #[test]
    fn router_path_translates_params() {
        assert_eq!(router_path("/items/{item_id}"), "/items/:item_id");
        assert_eq!(router_path("/courses/{id}/sections/{sid}"), "/courses/:id/sections/:sid");
        assert_eq!(router_path("/items/"), "/items/");
    }

    #[test]
    fn prefix_must_start_with_slash() {
        let err = app().include_router(RouteGroup::new("users")).unwrap_err();
        assert!(matches!(err, MountError::InvalidPrefix { reason: "must start with '/'", .. }));
    }

    #[test]
    fn prefix_must_not_end_with_slash() {
        let err = app().include_router(RouteGroup::new("/users/")).unwrap_err();
        assert!(matches!(err, MountError::InvalidPrefix { reason: "must not end with '/'", .. }));
    }

    #[test]
    fn empty_path_needs_prefix() {
        let err = app()
            .include_router(RouteGroup::new("").route(HttpMethod::Get, "", "root", noop))
            .unwrap_err();
        assert_eq!(err, MountError::InvalidPath { path: String::new() });

        let mut app = app();
        app.include_router(RouteGroup::new("/users").route(HttpMethod::Get, "", "list", noop))
            .expect("mount");
        assert!(app.has_route(HttpMethod::Get, "/users"));
    }

    #[test]
    fn malformed_params_are_rejected() {
        let err = app()
            .include_router(RouteGroup::new("/items").route(HttpMethod::Get, "/{}", "x", noop))
            .unwrap_err();
        assert!(matches!(err, MountError::InvalidPath { .. }));

        let err = app()
            .include_router(RouteGroup::new("/items").route(HttpMethod::Get, "/:id", "x", noop))
            .unwrap_err();
        assert!(matches!(err, MountError::InvalidPath { .. }));
    }

    #[test]
    fn duplicate_routes_across_groups_are_rejected() {
        let mut app = app();
        app.include_router(RouteGroup::new("/users").route(HttpMethod::Get, "/", "a", noop))
            .expect("first mount");
        let err = app
            .include_router(RouteGroup::new("").route(HttpMethod::Get, "/users/", "b", noop))
            .unwrap_err();
        assert_eq!(
            err,
            MountError::DuplicateRoute { method: "GET", path: "/users/".to_string() }
        );
        assert_eq!(app.groups().len(), 1);
    }

    #[test]
    fn same_path_different_methods_is_fine() {
        let mut app = app();
        app.include_router(
            RouteGroup::new("/users")
                .route(HttpMethod::Get, "/", "list", noop)
                .route(HttpMethod::Post, "/", "create", noop),
        )
        .expect("mount");
        assert_eq!(app.entries().count(), 2);
        assert_eq!(app.route_patterns(), vec!["/users/".to_string()]);
    }

    #[test]
    fn renamed_parameter_is_still_a_duplicate() {
        let err = app()
            .include_router(
                RouteGroup::new("/x")
                    .route(HttpMethod::Get, "/{a}", "first", noop)
                    .route(HttpMethod::Get, "/{b}", "second", noop),
            )
            .unwrap_err();
        assert_eq!(err, MountError::DuplicateRoute { method: "GET", path: "/x/{b}".to_string() });
    }

    #[test]
    fn parameter_names_must_agree_along_shared_prefix() {
        let mut app = app();
        app.include_router(
            RouteGroup::new("/courses").route(HttpMethod::Get, "/{course_id}", "read", noop),
        )
        .expect("mount");

        let err = app
            .include_router(
                RouteGroup::new("/courses")
                    .route(HttpMethod::Post, "/{id}/sections", "add_section", noop),
            )
            .unwrap_err();
        assert!(matches!(err, MountError::ConflictingParams { .. }));

        app.include_router(
            RouteGroup::new("/courses")
                .route(HttpMethod::Post, "/{course_id}/sections", "add_section", noop)
                .route(HttpMethod::Get, "/search", "search", noop),
        )
        .expect("consistent names");
    }

    #[test]
    fn conflicting_parameters_never_reach_the_router() {
        let mut app = app();
        let mounted = app.include_router(
            RouteGroup::new("/x")
                .route(HttpMethod::Get, "/{a}", "first", noop)
                .route(HttpMethod::Post, "/{b}", "second", noop),
        );
        assert!(mounted.is_err());
        let _router: Router<AppState> = app.into_dispatch_router();
    }

    #[test]
    fn pattern_matching_for_redirects() {
        assert!(pattern_matches("/items/{item_id}", "/items/5"));
        assert!(pattern_matches("/items/", "/items/"));
        assert!(!pattern_matches("/items/{item_id}", "/items/"));
        assert!(!pattern_matches("/items/{item_id}", "/items/5/extra"));
        assert!(!pattern_matches("/items/", "/items"));
    }
}
