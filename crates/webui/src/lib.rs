pub mod api;
pub mod app;
pub mod components;
pub mod tree;
pub mod util;

pub const BASE_URL: &str = "/api";
/// Deadline of a single backend request.
pub const REQUEST_TIMEOUT_MS: u64 = 30_000;
