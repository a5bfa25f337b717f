//! Custom extractors for Axum handlers.
//!
//! All of them reject with [`AppError`](crate::errors::AppError) so malformed input
//! gets the same structured body as every other operational error.

pub mod id_path;
pub mod json_body;
pub mod query_params;

pub use id_path::IdPath;
pub use json_body::JsonBody;
pub use query_params::QueryParams;
