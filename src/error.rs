use thiserror::Error;

/// Unified error type for reflex operations
#[derive(Error, Debug)]
pub enum ReflexError {
    #[error("Unable to upgrade from '{from}' to '{to}'")]
    InvalidUpgradePath { from: String, to: String },

    #[error("Malformed version '{version}': {reason}")]
    MalformedVersion { version: String, reason: String },

    #[error("Git reference already exists: {0}")]
    DuplicateGitReference(String),

    #[error("Git reference not found: {0}")]
    InvalidGitReference(String),

    #[error("Failed to run '{command}': {stderr}")]
    VcsCommand { command: String, stderr: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid subcommand: {0}")]
    Usage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in reflex
pub type Result<T> = std::result::Result<T, ReflexError>;

impl ReflexError {
    /// Create an invalid upgrade path error carrying both versions
    pub fn upgrade(from: impl Into<String>, to: impl Into<String>) -> Self {
        ReflexError::InvalidUpgradePath {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a malformed version error with context
    pub fn malformed(version: impl Into<String>, reason: impl Into<String>) -> Self {
        ReflexError::MalformedVersion {
            version: version.into(),
            reason: reason.into(),
        }
    }

    /// Create a duplicate reference error with context
    pub fn duplicate(msg: impl Into<String>) -> Self {
        ReflexError::DuplicateGitReference(msg.into())
    }

    /// Create a missing reference error with context
    pub fn missing(msg: impl Into<String>) -> Self {
        ReflexError::InvalidGitReference(msg.into())
    }

    /// Create a git command failure carrying the command line and its stderr
    pub fn vcs(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        ReflexError::VcsCommand {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReflexError::Config(msg.into())
    }

    /// Create a usage error with context
    pub fn usage(msg: impl Into<String>) -> Self {
        ReflexError::Usage(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReflexError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_upgrade_error_carries_both_versions() {
        let err = ReflexError::upgrade("release-1.1.0", "1.0.0");
        assert_eq!(
            err.to_string(),
            "Unable to upgrade from 'release-1.1.0' to '1.0.0'"
        );
    }

    #[test]
    fn test_vcs_error_carries_command_and_stderr() {
        let err = ReflexError::vcs("git push origin main", "fatal: unable to access");
        let msg = err.to_string();
        assert!(msg.contains("git push origin main"));
        assert!(msg.contains("fatal: unable to access"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReflexError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReflexError::config("x"), "Configuration error"),
            (ReflexError::malformed("x", "y"), "Malformed version"),
            (ReflexError::duplicate("x"), "Git reference already exists"),
            (ReflexError::missing("x"), "Git reference not found"),
            (ReflexError::usage("x"), "Invalid subcommand"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_special_characters_in_messages() {
        let special_chars = vec![
            "message with\nnewline",
            "message with 'quotes'",
            "message with \\ backslash",
        ];

        for msg in special_chars {
            let err = ReflexError::missing(msg);
            assert!(err.to_string().contains(msg));
        }
    }
}
