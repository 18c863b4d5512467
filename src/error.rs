use thiserror::Error;

type Source = Box<dyn std::error::Error + Send + Sync>;

/// Fatal benchmark errors.
///
/// Every variant is terminal for the process and carries a stable exit
/// code; there is no recoverable-error path anywhere in the harness.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Usage: {program} <num_draws> [image | gl | gl_texture]")]
    Usage { program: String },

    #[error("Couldn't initialize window; fatal.")]
    WindowInit(#[source] Source),

    #[error("Couldn't create device; fatal.")]
    Device(#[source] Source),

    #[error("Unknown surface type '{0}'; fatal.")]
    UnknownSurfaceKind(String),

    #[error("Couldn't create surface; fatal. ({0})")]
    SurfaceCreation(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("benchmark output failed")]
    Io(#[from] std::io::Error),
}

impl BenchError {
    pub fn usage(program: &str) -> Self {
        Self::Usage {
            program: program.to_string(),
        }
    }

    pub fn window_init(err: impl Into<Source>) -> Self {
        Self::WindowInit(err.into())
    }

    pub fn device(err: impl Into<Source>) -> Self {
        Self::Device(err.into())
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage { .. } => 1,
            Self::WindowInit(_) => 2,
            Self::Device(_) => 3,
            Self::UnknownSurfaceKind(_) => 4,
            Self::SurfaceCreation(_) => 5,
            Self::Render(_) | Self::Io(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(BenchError::usage("cli-bench").exit_code(), 1);
        assert_eq!(BenchError::window_init("no display").exit_code(), 2);
        assert_eq!(BenchError::device("no adapter").exit_code(), 3);
        assert_eq!(
            BenchError::UnknownSurfaceKind("bogus".into()).exit_code(),
            4
        );
        assert_eq!(BenchError::SurfaceCreation("0x0".into()).exit_code(), 5);
    }

    #[test]
    fn messages_match_the_reported_register() {
        let err = BenchError::UnknownSurfaceKind("bogus".into());
        assert_eq!(err.to_string(), "Unknown surface type 'bogus'; fatal.");

        let err = BenchError::device("gone");
        assert_eq!(err.to_string(), "Couldn't create device; fatal.");

        let err = BenchError::usage("cli-bench");
        assert!(err.to_string().starts_with("Usage: cli-bench "));
    }
}
