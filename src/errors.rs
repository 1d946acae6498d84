use std::path::{Path, PathBuf};
use thiserror::Error;

/// All errors that can occur in sec.
#[derive(Debug, Error)]
pub enum SecError {
    // --- Key / config errors ---
    #[error("Configuration error: {0}")]
    Configuration(String),

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Authentication failed — wrong key file or corrupted/tampered vault")]
    AuthenticationFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Invalid vault format: {0}")]
    InvalidFormat(String),

    #[error("Invalid secret name: {0}")]
    InvalidSecretName(String),

    #[error("Secret '{0}' not found")]
    SecretNotFound(String),

    // --- PIN errors ---
    #[error("Too many incorrect PIN attempts")]
    TooManyAttempts,

    #[error("PIN already set — use `change-pin` or `remove-pin` instead")]
    PinAlreadySet,

    #[error("No PIN is set — use `set-pin` first")]
    PinNotSet,

    #[error("PINs do not match")]
    PinMismatch,

    #[error("Invalid PIN: {0}")]
    InvalidPin(String),

    // --- IO errors ---
    #[error("Failed to {op} {}: {source}", path.display())]
    IoAt {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Cancelled")]
    UserCancelled,
}

impl SecError {
    /// Build a `map_err` adapter that attaches the operation and path to
    /// an I/O error.
    ///
    /// ```ignore
    /// fs::read(path).map_err(SecError::io("read", path))?;
    /// ```
    pub fn io<'a>(op: &'static str, path: &'a Path) -> impl FnOnce(std::io::Error) -> SecError + 'a {
        move |source| SecError::IoAt {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<dialoguer::Error> for SecError {
    /// Ctrl-C or a closed terminal at a prompt is a cancellation.
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(io)
                if matches!(
                    io.kind(),
                    std::io::ErrorKind::Interrupted | std::io::ErrorKind::UnexpectedEof
                ) =>
            {
                SecError::UserCancelled
            }
            other => SecError::CommandFailed(format!("prompt: {other}")),
        }
    }
}

/// Convenience type alias for sec results.
pub type Result<T> = std::result::Result<T, SecError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn interrupted_prompt_is_a_cancellation() {
        let err: SecError = dialoguer::Error::IO(Error::from(ErrorKind::Interrupted)).into();
        assert!(matches!(err, SecError::UserCancelled));
    }

    #[test]
    fn other_prompt_failures_are_command_failures() {
        let err: SecError = dialoguer::Error::IO(Error::new(ErrorKind::Other, "no tty")).into();
        assert!(matches!(err, SecError::CommandFailed(_)));
    }

    #[test]
    fn io_context_names_operation_and_path() {
        let err = SecError::io("read vault", Path::new("/tmp/v.enc"))(Error::from(
            ErrorKind::PermissionDenied,
        ));
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to read vault /tmp/v.enc"), "{msg}");
    }
}
