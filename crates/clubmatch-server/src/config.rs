use crate::error::AppError;

/// Server configuration loaded explicitly from environment variables.
///
/// The clubs catalog path has no default; the caller must provide it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Filesystem path to the clubs catalog JSON file.
    pub clubs_path: String,
    /// Socket address to bind, e.g. "0.0.0.0:3000".
    pub bind_addr: String,
    /// Number of recommendations returned per submission.
    pub top_k: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `CLUBS_PATH`: path to the clubs catalog JSON file
    ///
    /// Optional:
    /// - `BIND_ADDR`: listen address (default `0.0.0.0:3000`)
    /// - `TOP_K`: recommendations per submission (default 5)
    pub fn from_env() -> Result<Self, AppError> {
        let clubs_path = std::env::var("CLUBS_PATH")
            .map_err(|_| AppError::Config("CLUBS_PATH environment variable is required".to_string()))?;

        if !std::path::Path::new(&clubs_path).exists() {
            return Err(AppError::Config(format!(
                "clubs catalog not found at {clubs_path}"
            )));
        }

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let top_k = std::env::var("TOP_K")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(5);

        Ok(Self {
            clubs_path,
            bind_addr,
            top_k,
        })
    }
}
