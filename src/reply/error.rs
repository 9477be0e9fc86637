//! Reply error types

use thiserror::Error;

const TRANSPORT_PLACEHOLDER: &str =
    "Sorry, I'm having trouble connecting right now. Please try again in a moment.";
const MALFORMED_PLACEHOLDER: &str =
    "Sorry, I couldn't come up with a reply to that. Please try rephrasing your question.";

/// Reply error with classification
///
/// `message` carries diagnostic detail for logs only; users see
/// [`ReplyErrorKind::placeholder`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ReplyError {
    pub kind: ReplyErrorKind,
    pub message: String,
    /// HTTP status, when the service answered at all
    pub status: Option<u16>,
}

impl ReplyError {
    pub fn new(kind: ReplyErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ReplyErrorKind::Transport, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ReplyErrorKind::MalformedResponse, message)
    }

    /// Text shown to the user in place of a reply
    pub fn placeholder(&self) -> &'static str {
        self.kind.placeholder()
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyErrorKind {
    /// Network failure or non-success HTTP status
    Transport,
    /// The service answered, but not in the expected shape
    MalformedResponse,
}

impl ReplyErrorKind {
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Transport => TRANSPORT_PLACEHOLDER,
            Self::MalformedResponse => MALFORMED_PLACEHOLDER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_hide_detail() {
        let err = ReplyError::transport("Connection failed: tcp connect error 127.0.0.1:1")
            .with_status(503);
        assert_eq!(err.status, Some(503));
        assert!(!err.placeholder().contains("127.0.0.1"));
        assert!(!err.placeholder().contains("503"));
    }

    #[test]
    fn test_placeholders_distinguish_kinds() {
        assert_ne!(
            ReplyErrorKind::Transport.placeholder(),
            ReplyErrorKind::MalformedResponse.placeholder()
        );
    }

    #[test]
    fn test_display_is_diagnostic_message() {
        let err = ReplyError::malformed("No candidates in response");
        assert_eq!(err.to_string(), "No candidates in response");
    }
}
