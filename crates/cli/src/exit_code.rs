//! Process exit codes, one per failure class.

use opentargets_client::OpenTargetsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    /// Missing argument or invalid id type; nothing was sent
    UsageError = 2,
    /// Config file missing, unreadable or invalid
    ConfigError = 3,
    /// Connection failure or timeout
    NetworkError = 4,
    /// Non-success HTTP status
    HttpError = 5,
    /// Response body was not JSON or had an unexpected shape
    ParseError = 6,
    /// Writing output failed
    IoError = 7,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }

    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl From<&OpenTargetsError> for ExitCode {
    fn from(err: &OpenTargetsError) -> Self {
        match err {
            OpenTargetsError::Usage(_) | OpenTargetsError::InvalidIdType(_) => Self::UsageError,
            OpenTargetsError::Network(_) => Self::NetworkError,
            OpenTargetsError::Http(..) => Self::HttpError,
            OpenTargetsError::Parse(_) => Self::ParseError,
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::UsageError => write!(f, "usage error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::NetworkError => write!(f, "network error"),
            Self::HttpError => write!(f, "HTTP error"),
            Self::ParseError => write!(f, "parse error"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes_map_to_distinct_codes() {
        let cases = [
            (OpenTargetsError::Usage("x".into()), 2),
            (OpenTargetsError::InvalidIdType("x".into()), 2),
            (OpenTargetsError::Network("x".into()), 4),
            (OpenTargetsError::Http(502, "Bad Gateway".into()), 5),
            (OpenTargetsError::Parse("x".into()), 6),
        ];
        for (err, code) in cases {
            assert_eq!(ExitCode::from(&err).code(), code, "{err}");
        }
    }

    #[test]
    fn test_success_is_zero() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::Success.to_string(), "success");
    }
}
