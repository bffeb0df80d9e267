//! One-shot messages carried across a redirect.
//!
//! A handler pushes a message before redirecting; the next page that
//! renders takes every pending message and shows it once.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::AppError;

/// Session key holding pending messages.
const FLASH_KEY: &str = "flash_messages";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    /// CSS modifier used by the base template.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "flash-success",
            Self::Error => "flash-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            text: text.into(),
        }
    }

    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        self.level.css_class()
    }
}

/// Queue a message for the next rendered page.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn push(session: &Session, message: FlashMessage) -> Result<(), AppError> {
    let mut pending: Vec<FlashMessage> = session.get(FLASH_KEY).await?.unwrap_or_default();
    pending.push(message);
    session.insert(FLASH_KEY, pending).await?;
    Ok(())
}

/// Take and clear every pending message.
///
/// A failing session store yields no messages rather than failing the page.
pub async fn take(session: &Session) -> Vec<FlashMessage> {
    match session.remove::<Vec<FlashMessage>>(FLASH_KEY).await {
        Ok(messages) => messages.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read flash messages");
            Vec::new()
        }
    }
}
