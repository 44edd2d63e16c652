/// Client configuration loaded from environment variables.
///
/// The submit endpoint used to be a hard-coded literal; it is configuration
/// now, with the historical value as the default so a bare invocation still
/// talks to a locally running backend.
#[derive(Clone, Debug)]
pub struct SubmitConfig {
    /// Full URL of the backend submit endpoint.
    pub endpoint: String,
    /// Cap on how much of a non-2xx response body is kept for diagnostics.
    pub max_error_body_bytes: usize,
}

impl SubmitConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `CLUBMATCH_ENDPOINT`: submit URL (default `http://localhost:3000/submit`)
    /// - `CLUBMATCH_MAX_ERROR_BODY_BYTES`: error body excerpt cap (default 8 KiB)
    pub fn from_env() -> Self {
        let endpoint = std::env::var("CLUBMATCH_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:3000/submit".to_string());

        let max_error_body_bytes = std::env::var("CLUBMATCH_MAX_ERROR_BODY_BYTES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(8 * 1024);

        Self {
            endpoint,
            max_error_body_bytes,
        }
    }
}
