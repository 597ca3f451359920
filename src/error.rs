use thiserror::Error;

use crate::common::Platform;

#[derive(Error, Debug)]
pub enum UnaffiliateError {
    #[error("request body exceeds the {limit} byte limit")]
    BodyTooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    UnreadableBody(String),

    #[error("invalid request body: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("could not resolve {} URL", .0.display_name())]
    Unresolved(Platform),

    #[error("resolved URL is not absolute: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl UnaffiliateError {
    /// HTTP status code this failure is reported with
    pub fn status(&self) -> u16 {
        match self {
            UnaffiliateError::BodyTooLarge { .. } => 413,
            UnaffiliateError::Unresolved(_) => 400,
            UnaffiliateError::UnreadableBody(_)
            | UnaffiliateError::InvalidRequest(_)
            | UnaffiliateError::InvalidUrl(_) => 500,
        }
    }

    /// Message safe to show to the caller. Internal details stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            UnaffiliateError::BodyTooLarge { .. } => "Request body too large".to_string(),
            UnaffiliateError::Unresolved(platform) => {
                format!("Could not resolve {} URL", platform.display_name())
            }
            UnaffiliateError::UnreadableBody(_)
            | UnaffiliateError::InvalidRequest(_)
            | UnaffiliateError::InvalidUrl(_) => "Failed to process URL".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let too_large = UnaffiliateError::BodyTooLarge { limit: 2000 };
        assert_eq!(too_large.status(), 413);
        assert_eq!(UnaffiliateError::Unresolved(Platform::Shopee).status(), 400);

        let bad_json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(UnaffiliateError::from(bad_json).status(), 500);
        assert_eq!(
            UnaffiliateError::UnreadableBody("reset".to_string()).status(),
            500
        );
    }

    #[test]
    fn test_public_message_names_platform() {
        assert_eq!(
            UnaffiliateError::Unresolved(Platform::AliExpress).public_message(),
            "Could not resolve AliExpress URL"
        );
        assert_eq!(
            UnaffiliateError::Unresolved(Platform::MercadoLivre).public_message(),
            "Could not resolve MercadoLivre URL"
        );
    }

    #[test]
    fn test_public_message_hides_internal_detail() {
        let parse_error = url::Url::parse("not a url").unwrap_err();
        let err = UnaffiliateError::from(parse_error);

        assert_eq!(err.public_message(), "Failed to process URL");
        assert!(err.to_string().contains("not absolute"));
    }
}
