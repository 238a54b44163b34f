use log::{debug, warn};
use serde_json::Value;

use crate::api::builder::RequestBuilder;
use crate::api::endpoint::Endpoint;
use crate::api::export::ExportOptions;
use crate::config::ApiConfig;
use crate::error::{missing_parameter, FigmaError};
use crate::http::{HttpBackend, HttpRequest, HttpResponse};

/// Read-only Figma API client generic over its transport
///
/// Each operation validates its identifiers, builds one request, sends it
/// once and returns the decoded JSON body unchanged. The dispatcher keeps no
/// per-call state, so a shared reference can serve concurrent calls.
///
/// # Examples
///
/// ```no_run
/// use figma_tool::api::Dispatcher;
/// use figma_tool::config::{ApiConfig, Credentials, TlsVerification};
/// use figma_tool::http::ReqwestBackend;
///
/// # async fn example() -> Result<(), figma_tool::error::FigmaError> {
/// let backend = ReqwestBackend::new(TlsVerification::Strict)?;
/// let dispatcher = Dispatcher::new(backend, ApiConfig::new(Credentials::new("token")?));
/// let file = dispatcher.get_file("ABC123").await?;
/// println!("{}", file["name"]);
/// # Ok(())
/// # }
/// ```
pub struct Dispatcher<B: HttpBackend + Send + Sync> {
    backend: B,
    builder: RequestBuilder,
}

impl<B: HttpBackend + Send + Sync> Dispatcher<B> {
    pub fn new(backend: B, config: ApiConfig) -> Self {
        Self {
            backend,
            builder: RequestBuilder::new(config),
        }
    }

    /// `GET files/{key}`: the full document tree of a file
    pub async fn get_file(&self, file_key: &str) -> Result<Value, FigmaError> {
        let key = require(file_key, "file key")?;
        self.fetch(Endpoint::File, &[key], &[]).await
    }

    /// `GET files/{key}/comments`
    pub async fn get_comments(&self, file_key: &str) -> Result<Value, FigmaError> {
        let key = require(file_key, "file key")?;
        self.fetch(Endpoint::Comments, &[key], &[]).await
    }

    /// `GET images/{key}?ids=..&format=..&scale=..`: render layers to images
    pub async fn export_images(
        &self,
        file_key: &str,
        options: &ExportOptions,
    ) -> Result<Value, FigmaError> {
        let key = require(file_key, "file key")?;
        let query = options.query_params()?;
        self.fetch(Endpoint::Images, &[key], &query).await
    }

    /// `GET me`: the user the token belongs to
    pub async fn get_me(&self) -> Result<Value, FigmaError> {
        self.fetch(Endpoint::Me, &[], &[]).await
    }

    /// `GET teams/{id}/projects`
    pub async fn get_team_projects(&self, team_id: &str) -> Result<Value, FigmaError> {
        let id = require(team_id, "team id")?;
        self.fetch(Endpoint::TeamProjects, &[id], &[]).await
    }

    /// `GET projects/{id}/files`
    pub async fn get_project_files(&self, project_id: &str) -> Result<Value, FigmaError> {
        let id = require(project_id, "project id")?;
        self.fetch(Endpoint::ProjectFiles, &[id], &[]).await
    }

    /// Builds, sends and decodes a single request for `endpoint`
    pub async fn fetch(
        &self,
        endpoint: Endpoint,
        path_params: &[&str],
        query_params: &[(String, String)],
    ) -> Result<Value, FigmaError> {
        let request = self
            .builder
            .build(endpoint.template(), path_params, query_params)?;
        debug!("{:?} -> GET {}", endpoint, request.url);
        self.execute(&request).await
    }

    async fn execute(&self, request: &HttpRequest) -> Result<Value, FigmaError> {
        let response = self.backend.send(request).await.map_err(|e| {
            warn!("request to {} failed: {e}", request.url);
            FigmaError::from(e)
        })?;
        debug!("HTTP {} ({} bytes)", response.status, response.body.len());
        classify(response)
    }
}

/// Maps a completed exchange to the decoded body or a classified error
pub fn classify(response: HttpResponse) -> Result<Value, FigmaError> {
    if !response.is_success() {
        return Err(FigmaError::Remote {
            status: response.status,
            body: response.body,
        });
    }
    let value: Value = response.json()?;
    if has_error_payload(&value) {
        let status = value
            .get("status")
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok())
            .unwrap_or(response.status);
        return Err(FigmaError::Remote {
            status,
            body: response.body,
        });
    }
    Ok(value)
}

// The API reports some failures in a 2xx body: `"error": true`, or an `err`
// string (`err: null` means success).
fn has_error_payload(value: &Value) -> bool {
    value.get("error").and_then(Value::as_bool) == Some(true)
        || value.get("err").is_some_and(Value::is_string)
}

fn require<'a>(value: &'a str, name: &str) -> Result<&'a str, FigmaError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(missing_parameter(name));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::export::ImageFormat;
    use crate::config::Credentials;
    use crate::http::HttpError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tokio_test::block_on;

    struct MockBackend {
        pub requests: Mutex<Vec<HttpRequest>>,
        pub response: HttpResponse,
        pub error: Option<HttpError>,
    }

    impl MockBackend {
        fn responding(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                response: HttpResponse {
                    status,
                    body: body.to_string(),
                },
                error: None,
            })
        }

        fn failing(error: HttpError) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                response: HttpResponse {
                    status: 500,
                    body: String::new(),
                },
                error: Some(error),
            })
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn last_request(&self) -> HttpRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl HttpBackend for MockBackend {
        async fn send(&self, req: &HttpRequest) -> Result<HttpResponse, HttpError> {
            self.requests.lock().unwrap().push(req.clone());
            if let Some(ref err) = self.error {
                Err(err.clone())
            } else {
                Ok(self.response.clone())
            }
        }
    }

    fn dispatcher(backend: Arc<MockBackend>) -> Dispatcher<Arc<MockBackend>> {
        Dispatcher::new(
            backend,
            ApiConfig::new(Credentials::new("figd_test").unwrap()),
        )
    }

    #[test]
    fn test_get_file_returns_body_unchanged() {
        let body = json!({
            "name": "Design system",
            "document": {"id": "0:0", "children": [{"id": "1:2", "type": "FRAME"}]},
            "version": "123",
        });
        let backend = MockBackend::responding(200, &body.to_string());
        let client = dispatcher(backend.clone());

        let result = block_on(client.get_file("ABC123")).unwrap();
        assert_eq!(result, body);

        let sent = backend.last_request();
        assert_eq!(sent.url, "https://api.figma.com/v1/files/ABC123");
        assert_eq!(sent.method, ::http::Method::GET);
        assert_eq!(sent.headers.get("x-figma-token").unwrap(), "figd_test");
    }

    #[test]
    fn test_operation_paths() {
        let backend = MockBackend::responding(200, "{}");
        let client = dispatcher(backend.clone());

        block_on(client.get_comments("ABC123")).unwrap();
        assert_eq!(
            backend.last_request().url,
            "https://api.figma.com/v1/files/ABC123/comments"
        );

        block_on(client.get_me()).unwrap();
        assert_eq!(backend.last_request().url, "https://api.figma.com/v1/me");

        block_on(client.get_team_projects("987")).unwrap();
        assert_eq!(
            backend.last_request().url,
            "https://api.figma.com/v1/teams/987/projects"
        );

        block_on(client.get_project_files("42")).unwrap();
        assert_eq!(
            backend.last_request().url,
            "https://api.figma.com/v1/projects/42/files"
        );
        assert_eq!(backend.calls(), 4);
    }

    #[test]
    fn test_export_images_query() {
        let backend = MockBackend::responding(200, r#"{"err": null, "images": {"1:2": "https://x"}}"#);
        let client = dispatcher(backend.clone());
        let options = ExportOptions::new(
            vec!["1:2".to_string(), "3:4".to_string()],
            ImageFormat::Svg,
            2.0,
        );

        let result = block_on(client.export_images("ABC123", &options)).unwrap();
        assert_eq!(result["images"]["1:2"], "https://x");
        assert_eq!(
            backend.last_request().url,
            "https://api.figma.com/v1/images/ABC123?ids=1%3A2%2C3%3A4&format=svg&scale=2.0"
        );
    }

    #[test]
    fn test_missing_identifiers_never_reach_backend() {
        let backend = MockBackend::responding(200, "{}");
        let client = dispatcher(backend.clone());
        let options = ExportOptions::new(vec!["1:2".to_string()], ImageFormat::Png, 1.0);

        let results = vec![
            block_on(client.get_file("")),
            block_on(client.get_comments("  ")),
            block_on(client.export_images("", &options)),
            block_on(client.export_images(
                "ABC",
                &ExportOptions::new(Vec::new(), ImageFormat::Png, 1.0),
            )),
            block_on(client.get_team_projects("")),
            block_on(client.get_project_files("")),
        ];

        for result in results {
            assert!(matches!(result, Err(FigmaError::MissingParameter(_))));
        }
        assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn test_forbidden_is_remote_error_without_retry() {
        let body = r#"{"status":403,"err":"Invalid token"}"#;
        let backend = MockBackend::responding(403, body);
        let client = dispatcher(backend.clone());

        let err = block_on(client.get_file("ABC123")).unwrap_err();
        assert_eq!(
            err,
            FigmaError::Remote {
                status: 403,
                body: body.to_string()
            }
        );
        assert_eq!(backend.calls(), 1);
    }

    #[test]
    fn test_transport_failure_is_classified() {
        let backend = MockBackend::failing(HttpError::Network("connection refused".to_string()));
        let client = dispatcher(backend.clone());

        let err = block_on(client.get_me()).unwrap_err();
        assert_eq!(err, FigmaError::Transport("connection refused".to_string()));
        assert_eq!(backend.calls(), 1);
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let backend = MockBackend::responding(200, "<html>maintenance</html>");
        let client = dispatcher(backend);

        let err = block_on(client.get_file("ABC123")).unwrap_err();
        assert_eq!(err.kind(), "decode");
    }

    #[test]
    fn test_error_payload_on_success_status() {
        let body = r#"{"error": true, "status": 400, "message": "Invalid scale"}"#;
        let backend = MockBackend::responding(200, body);
        let client = dispatcher(backend);

        match block_on(client.get_file("ABC123")) {
            Err(FigmaError::Remote { status, body: b }) => {
                assert_eq!(status, 400);
                assert_eq!(b, body);
            }
            other => panic!("Expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_passes_through_scalars_and_arrays() {
        let ok = |body: &str| HttpResponse {
            status: 200,
            body: body.to_string(),
        };
        assert_eq!(classify(ok("[1, 2, 3]")).unwrap(), json!([1, 2, 3]));
        assert_eq!(classify(ok("\"text\"")).unwrap(), json!("text"));
        assert_eq!(classify(ok(r#"{"error": false}"#)).unwrap(), json!({"error": false}));
    }
}
