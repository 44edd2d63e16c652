/// HTTP submission path: one POST to the backend, response decoded into the
/// shared wire model.
///
/// There is deliberately no retry and no request timeout here; a submission
/// either completes end-to-end or fails into a single error channel. The
/// [`Submitter`] wrapper adds the one piece of state the flow needs: an
/// in-flight flag so a second submission cannot race the first on the shared
/// output area.
use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use tracing::warn;

use clubmatch_common::model::RecommendationResponse;

use crate::config::SubmitConfig;

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend returned error: status={status} body={body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid response JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("a submission is already in flight")]
    InFlight,
}

pub struct SubmitClient {
    config: SubmitConfig,
    http: reqwest::Client,
}

impl SubmitClient {
    pub fn new(config: SubmitConfig) -> Result<Self, SubmitError> {
        let http = reqwest::Client::builder()
            .user_agent("clubmatch/client")
            .build()?;
        Ok(Self { config, http })
    }

    /// POST the payload as `text/plain` and decode the JSON reply.
    ///
    /// A non-2xx status fails with [`SubmitError::Status`] carrying a
    /// length-limited body excerpt; a 2xx reply whose body is not the
    /// expected JSON shape fails with [`SubmitError::Decode`].
    pub async fn submit(&self, payload: &str) -> Result<RecommendationResponse, SubmitError> {
        let resp = self
            .http
            .post(&self.config.endpoint)
            .header(CONTENT_TYPE, "text/plain")
            .body(payload.to_string())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = read_limited_text(resp, self.config.max_error_body_bytes).await;
            return Err(SubmitError::Status { status, body });
        }

        let body = resp.text().await?;
        let decoded = serde_json::from_str::<RecommendationResponse>(&body)?;
        Ok(decoded)
    }
}

/// Single-flight wrapper around [`SubmitClient`].
///
/// The original flow had no guard against a rapid double submit, which let
/// two overlapping responses land on the shared output in either order. Here
/// the second submission fails fast with [`SubmitError::InFlight`] instead.
pub struct Submitter {
    client: SubmitClient,
    in_flight: AtomicBool,
}

impl Submitter {
    pub fn new(client: SubmitClient) -> Self {
        Self {
            client,
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn submit(&self, payload: &str) -> Result<RecommendationResponse, SubmitError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(SubmitError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);
        self.client.submit(payload).await
    }
}

/// Clears the in-flight flag even if the submission future is dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

async fn read_limited_text(resp: reqwest::Response, max_bytes: usize) -> String {
    match resp.bytes().await {
        Ok(mut b) => {
            if b.len() > max_bytes {
                b.truncate(max_bytes);
            }
            String::from_utf8_lossy(&b).to_string()
        }
        Err(e) => {
            warn!(error = %e, "failed to read error response body");
            "<failed to read error body>".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serve exactly one connection with a canned HTTP response.
    async fn serve_once(response: &'static str) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 8192];
            let _ = sock.read(&mut buf).await;
            sock.write_all(response.as_bytes()).await.unwrap();
            let _ = sock.shutdown().await;
        });
        addr
    }

    fn client_for(addr: SocketAddr) -> SubmitClient {
        SubmitClient::new(SubmitConfig {
            endpoint: format!("http://{addr}/submit"),
            max_error_body_bytes: 64,
        })
        .unwrap()
    }

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[tokio::test]
    async fn successful_submission_decodes_the_response() {
        let body = r#"{"status":"ok","message":"done","clubs":[{"name":"Chess Club","score":0.85,"description":"Strategy games"}]}"#;
        let response = Box::leak(http_response("200 OK", body).into_boxed_str());
        let addr = serve_once(response).await;

        let decoded = client_for(addr).submit("Q1: No answer").await.unwrap();
        assert_eq!(decoded.status, "ok");
        assert_eq!(decoded.message, "done");
        assert_eq!(decoded.clubs.len(), 1);
        assert_eq!(decoded.clubs[0].name, "Chess Club");
        assert!((decoded.clubs[0].score - 0.85).abs() < 1e-9);
    }

    #[tokio::test]
    async fn non_2xx_status_fails_with_status_error() {
        let response =
            Box::leak(http_response("500 Internal Server Error", "boom").into_boxed_str());
        let addr = serve_once(response).await;

        let err = client_for(addr).submit("payload").await.unwrap_err();
        match err {
            SubmitError::Status { status, body } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Status error, got: {other}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_on_2xx_fails_with_decode_error() {
        let response = Box::leak(http_response("200 OK", "definitely not json").into_boxed_str());
        let addr = serve_once(response).await;

        let err = client_for(addr).submit("payload").await.unwrap_err();
        assert!(matches!(err, SubmitError::Decode(_)), "got: {err}");
    }

    #[tokio::test]
    async fn second_submission_fails_fast_while_first_is_pending() {
        // Accept the connection but never respond, keeping the first
        // submission pending for the duration of the test.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_sock, _) = listener.accept().await.unwrap();
            std::future::pending::<()>().await;
        });

        let submitter = Arc::new(Submitter::new(client_for(addr)));
        let first = tokio::spawn({
            let submitter = Arc::clone(&submitter);
            async move { submitter.submit("payload").await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        let err = submitter.submit("payload").await.unwrap_err();
        assert!(matches!(err, SubmitError::InFlight), "got: {err}");
        first.abort();
    }

    #[tokio::test]
    async fn in_flight_flag_clears_after_completion() {
        let body = r#"{"status":"ok","message":"done","clubs":[]}"#;
        let response = Box::leak(http_response("200 OK", body).into_boxed_str());

        // Serve every connection so the same submitter can go twice.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let (mut sock, _) = listener.accept().await.unwrap();
                let mut buf = [0u8; 8192];
                let _ = sock.read(&mut buf).await;
                sock.write_all(response.as_bytes()).await.unwrap();
                let _ = sock.shutdown().await;
            }
        });

        let submitter = Submitter::new(client_for(addr));
        assert!(submitter.submit("payload").await.is_ok());
        assert!(submitter.submit("payload").await.is_ok());
    }

    #[tokio::test]
    async fn error_body_excerpt_is_length_limited() {
        let long_body = "x".repeat(1024);
        let response =
            Box::leak(http_response("503 Service Unavailable", &long_body).into_boxed_str());
        let addr = serve_once(response).await;

        let err = client_for(addr).submit("payload").await.unwrap_err();
        match err {
            SubmitError::Status { body, .. } => assert_eq!(body.len(), 64),
            other => panic!("expected Status error, got: {other}"),
        }
    }
}
