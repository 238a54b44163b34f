pub mod backend;
pub mod error;
pub mod request;
pub mod response;

pub use backend::{HttpBackend, ReqwestBackend};
pub use error::HttpError;
pub use request::HttpRequest;
pub use response::HttpResponse;
