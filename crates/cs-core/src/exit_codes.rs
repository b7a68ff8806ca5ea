//! Exit codes for the `cucumber-summary` CLI.
//!
//! Report generation problems never change the exit code: a missing asset
//! or a write failure is logged and the run still exits clean. Codes only
//! describe whether the events could be replayed at all.
//!
//! Exit code ranges:
//! - 0: replay completed
//! - 10-19: user/environment errors (recoverable by user action)
//! - 20-29: internal and I/O errors

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Replay completed.
    Clean = 0,

    /// Invalid arguments.
    ArgsError = 10,

    /// Internal error (bug - please report).
    InternalError = 20,

    /// The events source or snapshot target could not be read or written.
    IoError = 21,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        };
        write!(f, "{name} ({})", self.as_i32())
    }
}
