use crate::api::endpoint::render_path;
use crate::config::ApiConfig;
use crate::error::FigmaError;
use crate::http::HttpRequest;

/// Header carrying the personal access token
pub const TOKEN_HEADER: &str = "X-Figma-Token";

/// Ordered query parameters; order is preserved in the encoded string.
pub type QueryParams = Vec<(String, String)>;

/// Percent-encodes query parameters as `k=v&k2=v2`
///
/// Keys and values are encoded independently, keeping only RFC 3986
/// unreserved characters. Parameter order is kept as given.
pub fn encode_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Turns a resource path plus parameters into an authenticated request
///
/// The builder is pure: it holds immutable settings and performs no I/O.
///
/// # Examples
///
/// ```
/// use figma_tool::api::RequestBuilder;
/// use figma_tool::config::{ApiConfig, Credentials};
///
/// let builder = RequestBuilder::new(ApiConfig::new(Credentials::new("token")?));
/// let request = builder.build("files/{key}", &["ABC123"], &[])?;
/// assert_eq!(request.url, "https://api.figma.com/v1/files/ABC123");
/// # Ok::<(), figma_tool::error::FigmaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    config: ApiConfig,
}

impl RequestBuilder {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    /// Builds the absolute URL for a resource
    ///
    /// # Errors
    /// Returns [`FigmaError::MissingParameter`] when a placeholder of
    /// `resource_path` has no (or a blank) value.
    pub fn url(
        &self,
        resource_path: &str,
        path_params: &[&str],
        query_params: &[(String, String)],
    ) -> Result<String, FigmaError> {
        let path = render_path(resource_path, path_params)?;
        let mut url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        if !query_params.is_empty() {
            url.push('?');
            url.push_str(&encode_query(query_params));
        }
        Ok(url)
    }

    /// Builds the authenticated GET request for a resource
    pub fn build(
        &self,
        resource_path: &str,
        path_params: &[&str],
        query_params: &[(String, String)],
    ) -> Result<HttpRequest, FigmaError> {
        let url = self.url(resource_path, path_params, query_params)?;
        Ok(HttpRequest::get(url)
            .with_header("accept", "application/json", false)
            .with_header(TOKEN_HEADER, self.config.credentials.token(), true))
    }
}
