/// Error types for the pricing library and its dashboard.
///
/// The pricing core only ever returns `InvalidInput`: a call either yields a
/// fully computed number or fails outright. `Config` and `Io` belong to the
/// binary (environment parsing, server socket, terminal prompts).
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(String),
}

impl PricingError {
    pub fn invalid(message: impl Into<String>) -> Self {
        PricingError::InvalidInput(message.into())
    }
}

impl From<std::io::Error> for PricingError {
    fn from(e: std::io::Error) -> Self {
        PricingError::Io(e.to_string())
    }
}

pub type PricingResult<T> = Result<T, PricingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_message() {
        let err = PricingError::invalid("volatility must be positive");
        assert_eq!(err.to_string(), "invalid input: volatility must be positive");

        let err = PricingError::Config("SERVER_PORT: bad".into());
        assert!(err.to_string().contains("SERVER_PORT"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed");
        let err: PricingError = io.into();
        assert!(matches!(err, PricingError::Io(ref m) if m.contains("stdin closed")));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PricingError>();
    }
}
