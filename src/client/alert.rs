use std::fmt;
use std::time::Duration;

/// Auto-dismiss delay for success toasts.
pub const SUCCESS_TIMER: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertIcon {
    Success,
    Warning,
    Error,
}

/// A modal/toast notification shown after a form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub icon: AlertIcon,
    pub title: String,
    pub text: String,
    /// `None` means the dialog has no confirm button.
    pub confirm_button_text: Option<String>,
    /// `Some` means the dialog closes by itself.
    pub timer: Option<Duration>,
}

impl Alert {
    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            icon: AlertIcon::Success,
            title: title.into(),
            text: text.into(),
            confirm_button_text: None,
            timer: Some(SUCCESS_TIMER),
        }
    }

    pub fn warning(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            icon: AlertIcon::Warning,
            title: title.into(),
            text: text.into(),
            confirm_button_text: Some("OK".to_string()),
            timer: None,
        }
    }

    pub fn error(
        title: impl Into<String>,
        text: impl Into<String>,
        confirm_button_text: impl Into<String>,
    ) -> Self {
        Self {
            icon: AlertIcon::Error,
            title: title.into(),
            text: text.into(),
            confirm_button_text: Some(confirm_button_text.into()),
            timer: None,
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.icon {
            AlertIcon::Success => "✅",
            AlertIcon::Warning => "⚠️ ",
            AlertIcon::Error => "❌",
        };
        write!(f, "{} {}: {}", icon, self.title, self.text)?;
        if let Some(button) = &self.confirm_button_text {
            write!(f, " [{}]", button)?;
        }
        Ok(())
    }
}
