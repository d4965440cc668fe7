pub(crate) mod errors;
pub(crate) mod extract;
pub(crate) mod handlers;
pub(crate) mod items;
pub(crate) mod lms;
pub(crate) mod openapi;
pub(crate) mod router;
pub(crate) mod routes;
