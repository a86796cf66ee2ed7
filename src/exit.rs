// src/exit.rs
//! Standardized process exit codes.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitStatus {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (IO, bad arguments).
    Error = 1,
    /// Input validation failed (the parser rejected a file).
    InvalidInput = 2,
}

impl ExitStatus {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for ExitStatus {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
