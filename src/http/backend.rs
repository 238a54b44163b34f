use std::sync::Arc;

use crate::config::TlsVerification;
use crate::http::{error::HttpError, request::HttpRequest, response::HttpResponse};
use async_trait::async_trait;
use log::{debug, warn};

/// Trait for HTTP backends that handle the actual network communication
///
/// The dispatcher only talks to this trait, so production code uses
/// [`ReqwestBackend`] while tests plug in a stub that records requests.
///
/// # Examples
///
/// ```
/// use figma_tool::http::{HttpBackend, HttpError, HttpRequest, HttpResponse};
/// use async_trait::async_trait;
///
/// struct LoggingBackend<B: HttpBackend> {
///     inner: B,
/// }
///
/// #[async_trait]
/// impl<B: HttpBackend + Send + Sync> HttpBackend for LoggingBackend<B> {
///     async fn send(&self, req: &HttpRequest) -> Result<HttpResponse, HttpError> {
///         println!("Sending request to: {}", req.url);
///         let response = self.inner.send(req).await?;
///         println!("Received response with status: {}", response.status);
///         Ok(response)
///     }
/// }
/// ```
#[async_trait]
pub trait HttpBackend {
    /// Send an HTTP request and return the response
    ///
    /// Any status code counts as a successful exchange; only failures to
    /// talk to the server at all are reported as [`HttpError`].
    async fn send(&self, req: &HttpRequest) -> Result<HttpResponse, HttpError>;
}

// Lets callers keep a handle on a shared backend after giving it to a dispatcher.
#[async_trait]
impl<T: HttpBackend + Send + Sync + ?Sized> HttpBackend for Arc<T> {
    async fn send(&self, req: &HttpRequest) -> Result<HttpResponse, HttpError> {
        self.as_ref().send(req).await
    }
}

/// Default backend using reqwest for real HTTP requests
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Builds a backend with the given certificate verification mode
    ///
    /// # Errors
    /// Returns [`HttpError::Client`] when the underlying TLS stack cannot be
    /// initialised.
    pub fn new(tls: TlsVerification) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if tls == TlsVerification::Disabled {
            warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, req: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let resp = self
            .client
            .request(req.method.clone(), &req.url)
            .headers(req.headers.clone())
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;
        let status = resp.status().as_u16();
        debug!("received HTTP {status} from {}", req.url);
        let body = resp
            .text()
            .await
            .map_err(|e| HttpError::Body(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}
