//! Request construction and dispatch for the Figma REST API.

pub mod builder;
pub mod dispatcher;
pub mod endpoint;
pub mod export;

pub use builder::{encode_query, QueryParams, RequestBuilder, TOKEN_HEADER};
pub use dispatcher::Dispatcher;
pub use endpoint::Endpoint;
pub use export::{ExportOptions, ImageFormat};
