/// Status and body of a completed HTTP exchange
///
/// # Examples
///
/// ```
/// use figma_tool::http::HttpResponse;
///
/// let response = HttpResponse {
///     status: 200,
///     body: r#"{"name": "Landing page"}"#.to_string(),
/// };
///
/// assert!(response.is_success());
/// let value: serde_json::Value = response.json()?;
/// assert_eq!(value["name"], "Landing page");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: u16,
    /// Response body as string
    pub body: String,
}

impl HttpResponse {
    /// Returns true if the response status indicates success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the response body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
