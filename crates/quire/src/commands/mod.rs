//! CLI command implementations.

pub(crate) mod route;
pub(crate) mod routes;
mod site;

pub(crate) use route::RouteArgs;
pub(crate) use routes::RoutesArgs;
