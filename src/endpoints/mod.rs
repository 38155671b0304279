//! Typed endpoint sub-clients, all funneling through the request invoker

mod artifacts;
mod catalogs;
mod data;
mod jobs;
mod users;

pub use artifacts::ArtifactsClient;
pub use catalogs::CatalogsClient;
pub use data::DataClient;
pub use jobs::JobsClient;
pub use users::UsersClient;

pub(crate) const APPLICATION_JSON: &str = "application/json";
pub(crate) const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";
