/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    /// Missing or invalid configuration, detected before any request.
    ConfigError = 1,
    RuntimeError = 2,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Help and version output succeed; any other argument error is a
    /// configuration problem.
    pub fn for_usage(error: &clap::Error) -> Self {
        use clap::error::ErrorKind;

        match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success,
            _ => ExitCode::ConfigError,
        }
    }
}
