use ::http::{HeaderMap, HeaderName, HeaderValue, Method};

/// An HTTP request ready to be handed to a backend
///
/// Requests are built once per call by the API request builder and are not
/// modified afterwards.
///
/// # Examples
///
/// ```
/// use figma_tool::http::HttpRequest;
/// use http::Method;
///
/// let request = HttpRequest::get("https://api.figma.com/v1/me")
///     .with_header("accept", "application/json", false);
///
/// assert_eq!(request.method, Method::GET);
/// assert_eq!(request.headers.get("accept").unwrap(), "application/json");
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct HttpRequest {
    /// Absolute target URL, including the query string
    pub url: String,
    /// HTTP method to use
    pub method: Method,
    /// HTTP headers to send
    pub headers: HeaderMap,
}

impl HttpRequest {
    /// Constructs a GET request without headers
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::GET,
            headers: HeaderMap::new(),
        }
    }

    /// Adds a header, replacing any previous value for the same name
    ///
    /// Sensitive values are flagged so that `Debug` output of the request
    /// never shows them. Names or values that are not valid HTTP tokens are
    /// skipped.
    pub fn with_header(mut self, name: &str, value: &str, sensitive: bool) -> Self {
        if let (Ok(name), Ok(mut value)) = (
            name.parse::<HeaderName>(),
            HeaderValue::from_str(value),
        ) {
            value.set_sensitive(sensitive);
            self.headers.insert(name, value);
        }
        self
    }
}
