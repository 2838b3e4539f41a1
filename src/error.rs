use thiserror::Error;

/// Every failure an HTTP call can end in, classified once so that each write
/// path reports the same message for the same cause.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,
    #[error("server rejected request with status {status}")]
    Rejected { status: u16, detail: Option<String> },
    #[error("could not reach server: {0}")]
    Network(String),
    #[error("missing identity fields")]
    MissingIdentity,
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// Classify a non-success response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        ApiError::Rejected {
            status,
            detail: extract_detail(body),
        }
    }

    /// The one message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Timeout => {
                "Connection timeout. Please check if your backend server is running.".to_string()
            }
            ApiError::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Rejected { status: 401, .. } => "Invalid credentials".to_string(),
            ApiError::Rejected { status: 400, .. } => "Invalid request data".to_string(),
            ApiError::Rejected { status, .. } => format!("Server error: {}", status),
            ApiError::Network(_) => {
                "Cannot connect to server. Please check if your backend is running.".to_string()
            }
            ApiError::MissingIdentity => "Missing identity fields in server response.".to_string(),
            ApiError::Malformed(_) | ApiError::InvalidUrl(_) | ApiError::Unexpected(_) => {
                "An unexpected error occurred".to_string()
            }
        }
    }

    /// Server detail when there is one, else the transport description.
    pub fn detail_or_description(&self) -> String {
        match self {
            ApiError::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            other => other.to_string(),
        }
    }
}

/// `detail` first, then `message`; only string values count.
fn extract_detail(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    ["detail", "message"]
        .iter()
        .filter_map(|key| json.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::JsError(js) => ApiError::Network(js.to_string()),
            gloo_net::Error::SerdeError(e) => ApiError::Malformed(e.to_string()),
            gloo_net::Error::GlooError(msg) => ApiError::Unexpected(msg),
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Malformed(err.to_string())
    }
}

/// Client-side preconditions checked before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter all details")]
    MissingFields,
    #[error("Please enter a name for the new category")]
    MissingCustomCategory,
    #[error("Amount must be a number")]
    InvalidAmount,
    #[error("Date must be a valid date")]
    InvalidDate,
    #[error("Please enter both category name and icon.")]
    MissingCategoryFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("browser storage is unavailable")]
    Unavailable,
    #[error("browser storage rejected write: {0}")]
    Rejected(String),
}
