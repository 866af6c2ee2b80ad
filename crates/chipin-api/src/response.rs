//! API Response wrapper

use serde::Serialize;
use chrono::Utc;

use chipin_shared::FlashMessage;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    /// Status message for the user, shown once on the next page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<FlashMessage>,
    /// Where a browser client should navigate next.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
    pub error: Option<ErrorBody>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            flash: None,
            redirect_to: None,
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            flash: None,
            redirect_to: None,
            error: Some(ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            }),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// A refused operation that still completes at the HTTP level.
    pub fn refused(flash: FlashMessage) -> Self {
        Self {
            success: false,
            data: None,
            flash: Some(flash),
            redirect_to: None,
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn with_flash(mut self, flash: FlashMessage) -> Self {
        self.flash = Some(flash);
        self
    }

    pub fn redirect(mut self, location: impl Into<String>) -> Self {
        self.redirect_to = Some(location.into());
        self
    }
}
