use crate::utils::error::{EtlError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// The destination is overwritten, so it must never name the source.
pub fn validate_distinct_paths(source: &str, destination: &str) -> Result<()> {
    if source == destination {
        return Err(EtlError::ValidationError {
            message: format!(
                "source and destination are the same file ({}); the feed would be overwritten",
                source
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("source", "feeds/malwaredomains.txt").is_ok());
        assert!(validate_path("source", "").is_err());
        assert!(validate_path("source", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_distinct_paths() {
        assert!(validate_distinct_paths("in.txt", "out.json").is_ok());
        assert!(validate_distinct_paths("feed.txt", "feed.txt").is_err());
    }
}
