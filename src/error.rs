use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Category of an [`Error`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Transport,
    HttpStatus,
    Decode,
    Authorization,
    NotFound,
    UnexpectedResult,
    EmptyState,
    Arithmetic,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to send request to Monnit API ({code}): {message}")]
    Transport { code: &'static str, message: String },

    #[error("request to Monnit API was unsuccessful, HTTP code: {0}")]
    HttpStatus(u16),

    #[error("couldn't decode JSON response from API: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Monnit API responded with \"{0}\", please ensure your API key is valid and set correctly")]
    Authorization(String),

    #[error("Monnit API responded with \"{0}\", please ensure the sensor ID you specified is valid")]
    NotFound(String),

    #[error("Monnit API responded with an unexpected result: \"{0}\"")]
    UnexpectedResult(String),

    #[error("no sensor data, read sensors first")]
    EmptyState,

    #[error("arithmetic error: {0}")]
    Arithmetic(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::Transport { .. } => ErrorKind::Transport,
            Error::HttpStatus(_) => ErrorKind::HttpStatus,
            Error::Decode(_) => ErrorKind::Decode,
            Error::Authorization(_) => ErrorKind::Authorization,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::UnexpectedResult(_) => ErrorKind::UnexpectedResult,
            Error::EmptyState => ErrorKind::EmptyState,
            Error::Arithmetic(_) => ErrorKind::Arithmetic,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        let code = if e.is_timeout() {
            "timeout"
        } else if e.is_connect() {
            "connect"
        } else if e.is_redirect() {
            "redirect"
        } else if e.is_builder() {
            "builder"
        } else if e.is_body() || e.is_decode() {
            "body"
        } else if e.is_request() {
            "request"
        } else {
            "other"
        };
        Error::Transport {
            code,
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_variant() {
        assert_eq!(Error::HttpStatus(404).kind(), ErrorKind::HttpStatus);
        assert_eq!(Error::EmptyState.kind(), ErrorKind::EmptyState);
        let e = Error::Transport {
            code: "connect",
            message: "refused".into(),
        };
        assert_eq!(e.kind(), ErrorKind::Transport);
    }

    #[test]
    fn messages_carry_payload() {
        assert_eq!(
            Error::HttpStatus(503).to_string(),
            "request to Monnit API was unsuccessful, HTTP code: 503"
        );
        let e = Error::Authorization("Invalid Authorization Token".into());
        assert!(e.to_string().contains("\"Invalid Authorization Token\""));
        let e = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(Error::from(e).kind(), ErrorKind::Decode);
    }
}
