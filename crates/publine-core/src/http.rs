//! Shared HTTP client for single-shot GET requests.
//!
//! Uses async reqwest internally on a shared tokio runtime, but presents a
//! sync interface so pipelines can stay plain sequential loops.

use std::sync::LazyLock;

/// Error types for HTTP operations
#[derive(Debug)]
pub enum HttpError {
    /// HTTP error with optional status code (`None` = no response received)
    Http {
        status: Option<u16>,
        message: String,
    },
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Http {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
        }
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    /// Create HTTP error from reqwest error
    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        Self::Http {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

/// Shared async HTTP client with connection pooling.
///
/// No request timeout is set; reqwest defaults apply.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("publine/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build HTTP client")
});

/// Shared tokio runtime for HTTP operations.
///
/// Multi-thread flavor: `Handle::block_on` cannot drive IO on a
/// current-thread runtime.
static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// HTTP GET with query parameters → response body as text.
///
/// Single attempt. Network failures and non-success statuses are both
/// returned as [`HttpError`]. Must not be called from inside a tokio runtime.
pub fn get_text(url: &str, params: &[(&str, String)]) -> Result<String, HttpError> {
    let client: &reqwest::Client = &SHARED_CLIENT;
    SHARED_RUNTIME.handle().block_on(async {
        let response = client
            .get(url)
            .query(params)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| HttpError::from_reqwest(&e))?;

        response
            .text()
            .await
            .map_err(|e| HttpError::from_reqwest(&e))
    })
}
