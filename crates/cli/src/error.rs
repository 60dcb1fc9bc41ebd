//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish failures.
//! - Map `ConfigError` variants to those exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - A missing handler (4) and a failing handler (5) always exit differently.

use roadie_config::ConfigError;

/// Structured exit codes for roadie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed successfully.
    Success = 0,

    /// Unhandled or generic failure.
    GeneralError = 1,

    /// The search path is empty or a core option has the wrong shape.
    ///
    /// Scripts should fix `--config-path` or the offending option.
    ConfigurationError = 2,

    /// An environment file or `database.yml` exists but cannot be loaded.
    EnvironmentFileError = 3,

    /// A declared initializer step has no handler.
    ///
    /// No step ran when this is returned by `check`; `run` stops at the gap.
    MissingInitializer = 4,

    /// An initializer handler returned an error.
    InitializerFailed = 5,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::EmptySearchPath | ConfigError::InvalidOption { .. } => {
                ExitCode::ConfigurationError
            }

            ConfigError::EnvironmentFile { .. } | ConfigError::DatabaseFile { .. } => {
                ExitCode::EnvironmentFileError
            }

            ConfigError::MissingInitializer { .. } => ExitCode::MissingInitializer,
            ConfigError::InitializerStep { .. } => ExitCode::InitializerFailed,

            ConfigError::InvalidRunState { .. }
            | ConfigError::NamespaceBusy { .. }
            | ConfigError::DotenvParse { .. }
            | ConfigError::DotenvIo { .. }
            | ConfigError::DotenvUnknown => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no `ConfigError` is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ConfigError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}
