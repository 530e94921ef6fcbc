//! Error types for libnmcli

use std::fmt;
use std::io;
use thiserror::Error;

/// Exit status reported by nmcli.
///
/// nmcli exits with 0 on success and a value greater than 0 on error.
/// Codes outside the documented set are kept as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitStatus {
    /// Operation succeeded
    Success,
    /// Unknown or unspecified error
    Unknown,
    /// Invalid user input, wrong nmcli invocation
    InvalidInput,
    /// Timeout expired (see `--wait`)
    Timeout,
    /// Connection activation failed
    ActivationFailed,
    /// Connection deactivation failed
    DeactivationFailed,
    /// Disconnecting device failed
    DisconnectFailed,
    /// Connection deletion failed
    DeletionFailed,
    /// NetworkManager is not running
    NotRunning,
    /// Connection, device, or access point does not exist
    NotFound,
    /// `--complete-args` expects a file name to follow
    CompletionExpectsFilename,
    /// Any code nmcli does not document
    Other(i32),
}

impl ExitStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::InvalidInput,
            3 => Self::Timeout,
            4 => Self::ActivationFailed,
            5 => Self::DeactivationFailed,
            6 => Self::DisconnectFailed,
            7 => Self::DeletionFailed,
            8 => Self::NotRunning,
            10 => Self::NotFound,
            65 => Self::CompletionExpectsFilename,
            other => Self::Other(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Unknown => 1,
            Self::InvalidInput => 2,
            Self::Timeout => 3,
            Self::ActivationFailed => 4,
            Self::DeactivationFailed => 5,
            Self::DisconnectFailed => 6,
            Self::DeletionFailed => 7,
            Self::NotRunning => 8,
            Self::NotFound => 10,
            Self::CompletionExpectsFilename => 65,
            Self::Other(code) => *code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Human-readable description, as documented in nmcli(1)
    pub fn description(&self) -> String {
        let text = match self {
            Self::Success => "Success – indicates the operation succeeded.",
            Self::Unknown => "Unknown or unspecified error.",
            Self::InvalidInput => "Invalid user input, wrong nmcli invocation.",
            Self::Timeout => "Timeout expired (see --wait option).",
            Self::ActivationFailed => "Connection activation failed.",
            Self::DeactivationFailed => "Connection deactivation failed.",
            Self::DisconnectFailed => "Disconnecting device failed.",
            Self::DeletionFailed => "Connection deletion failed.",
            Self::NotRunning => "NetworkManager is not running.",
            Self::NotFound => "Connection, device, or access point does not exist.",
            Self::CompletionExpectsFilename => {
                "When used with --complete-args option, a file name is expected to follow."
            }
            Self::Other(code) => {
                return format!("code: {}  |   {}", code, Self::Unknown.description());
            }
        };
        text.to_string()
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

#[derive(Debug, Error)]
pub enum NmcliError {
    /// nmcli ran and exited with a non-zero status
    #[error("nmcli returned {code}: {message} STDERR='{stderr}'")]
    CommandFailed {
        message: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    /// The process could not be spawned or waited on
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A facade argument was rejected before anything ran
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration could not be read or written
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NmcliError {
    /// Build the failure for a finished nmcli run
    pub fn command_failed(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        NmcliError::CommandFailed {
            message: ExitStatus::from_code(code).description(),
            code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Classified exit status, for `CommandFailed` only
    pub fn exit_status(&self) -> Option<ExitStatus> {
        match self {
            NmcliError::CommandFailed { code, .. } => Some(ExitStatus::from_code(*code)),
            _ => None,
        }
    }

    pub fn stderr(&self) -> Option<&str> {
        match self {
            NmcliError::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }

    pub fn stdout(&self) -> Option<&str> {
        match self {
            NmcliError::CommandFailed { stdout, .. } => Some(stdout),
            _ => None,
        }
    }
}

pub type NmcliResult<T> = Result<T, NmcliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_table() {
        assert_eq!(ExitStatus::from_code(0), ExitStatus::Success);
        assert_eq!(ExitStatus::from_code(3), ExitStatus::Timeout);
        assert_eq!(ExitStatus::from_code(10), ExitStatus::NotFound);
        assert_eq!(ExitStatus::from_code(65), ExitStatus::CompletionExpectsFilename);
        assert_eq!(ExitStatus::from_code(9), ExitStatus::Other(9));

        for code in [0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 65, 42] {
            assert_eq!(ExitStatus::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_unmapped_code_description() {
        assert_eq!(
            ExitStatus::from_code(42).description(),
            "code: 42  |   Unknown or unspecified error."
        );
    }

    #[test]
    fn test_not_running_error_keeps_payload() {
        let err = NmcliError::command_failed(8, "", "Error: NetworkManager is not running.\n");

        assert_eq!(err.exit_status(), Some(ExitStatus::NotRunning));
        assert_eq!(err.stderr(), Some("Error: NetworkManager is not running.\n"));
        match &err {
            NmcliError::CommandFailed { message, code, .. } => {
                assert_eq!(message, "NetworkManager is not running.");
                assert_eq!(*code, 8);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("NetworkManager is not running."));
    }

    #[test]
    fn test_non_command_errors_have_no_status() {
        let err = NmcliError::InvalidParameter("bad".to_string());
        assert!(err.exit_status().is_none());
        assert!(err.stderr().is_none());
    }
}
