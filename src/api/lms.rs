//! LMS application shell. The `users`, `courses` and `sections` groups are owned
//! elsewhere; this module only mounts them under their prefixes.

use crate::api::routes::{Application, MountError, RouteGroup};
use crate::schemas::AppMetadata;

pub(crate) fn metadata() -> AppMetadata {
    AppMetadata {
        title: "Fast API LMS".to_string(),
        description: "LMS for managing students and courses.".to_string(),
        version: "0.0.1".to_string(),
    }
}

pub(crate) fn application() -> Result<Application, MountError> {
    let mut app = Application::new(metadata());
    app.include_router(users_router())?;
    app.include_router(courses_router())?;
    app.include_router(sections_router())?;
    Ok(app)
}

/// Mount points only; these groups carry no routes of their own yet.
fn users_router() -> RouteGroup {
    RouteGroup::new("/users").tag("users")
}

fn courses_router() -> RouteGroup {
    RouteGroup::new("/courses").tag("courses")
}

fn sections_router() -> RouteGroup {
    RouteGroup::new("/sections").tag("sections")
}
