use serde::Serialize;

pub mod contact;

/// Body of every response of the contact endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiSubmissionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiSubmissionResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    /// Bare success without a message, returned to spam bots.
    pub fn discarded() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}
