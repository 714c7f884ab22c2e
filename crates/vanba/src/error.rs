use thiserror::Error;

pub const CALCULATION_FAILED: &str = "Failed to calculate astrology data";
pub const INVALID_DATE_OF_BIRTH: &str = "Please enter a valid date of birth";
pub const INVALID_BIRTH_DETAILS: &str = "Please enter valid birth details";
pub const IMAGE_READ_FAILED: &str = "Failed to read image file";
pub const PALM_IMAGE_REQUIRED: &str = "Please upload a palm image first";

/// Errors surfaced by the reading flows. Every handler treats them as terminal
/// for the current action.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VanbaError {
    #[error("{message}")]
    Validation { message: String },
    /// The calculation service answered, but not with a result.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// The request never produced a usable response.
    #[error("{message}")]
    Network { message: String, detail: String },
    #[error("{message}")]
    ImageRead { message: String, detail: String },
    #[error("{}", PALM_IMAGE_REQUIRED)]
    MissingImage,
}

/// Coarse classification used for logging and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    FileRead,
}

impl VanbaError {
    pub fn validation(message: impl Into<String>) -> Self {
        VanbaError::Validation {
            message: message.into(),
        }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        VanbaError::Network {
            message: CALCULATION_FAILED.to_string(),
            detail: detail.into(),
        }
    }

    pub fn image_read(detail: impl Into<String>) -> Self {
        VanbaError::ImageRead {
            message: IMAGE_READ_FAILED.to_string(),
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            VanbaError::Validation { .. } | VanbaError::MissingImage => ErrorKind::Validation,
            VanbaError::Server { .. } | VanbaError::Network { .. } => ErrorKind::Network,
            VanbaError::ImageRead { .. } => ErrorKind::FileRead,
        }
    }

    /// Underlying cause worth logging, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            VanbaError::Network { detail, .. } | VanbaError::ImageRead { detail, .. } => {
                Some(detail.as_str())
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, VanbaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(VanbaError::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(VanbaError::MissingImage.kind(), ErrorKind::Validation);
        assert_eq!(VanbaError::network("refused").kind(), ErrorKind::Network);
        assert_eq!(
            VanbaError::Server {
                status: 500,
                message: "boom".into()
            }
            .kind(),
            ErrorKind::Network
        );
        assert_eq!(VanbaError::image_read("eof").kind(), ErrorKind::FileRead);
    }

    #[test]
    fn test_display_uses_user_message() {
        let err = VanbaError::network("connection refused");
        assert_eq!(err.to_string(), CALCULATION_FAILED);
        assert_eq!(err.detail(), Some("connection refused"));
        assert_eq!(VanbaError::MissingImage.to_string(), PALM_IMAGE_REQUIRED);
    }
}
