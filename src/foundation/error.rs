pub type StudioResult<T> = Result<T, StudioError>;

#[derive(thiserror::Error, Debug)]
pub enum StudioError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("ingest error: {0}")]
    Ingest(String),

    #[error("capture error: {0}")]
    Capture(String),

    #[error("archive error: {0}")]
    Archive(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StudioError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn ingest(msg: impl Into<String>) -> Self {
        Self::Ingest(msg.into())
    }

    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            StudioError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            StudioError::ingest("x")
                .to_string()
                .contains("ingest error:")
        );
        assert!(
            StudioError::capture("x")
                .to_string()
                .contains("capture error:")
        );
        assert!(
            StudioError::archive("x")
                .to_string()
                .contains("archive error:")
        );
        assert!(
            StudioError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = StudioError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
