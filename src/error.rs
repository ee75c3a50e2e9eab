use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors raised while resolving the configuration or driving the container runtime
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported target \"{0}\"")]
    UnsupportedTarget(String),

    #[error("Missing requirement: `{program}` is not reachable")]
    MissingRequirement {
        program: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Cannot resolve {0}")]
    Environment(String),

    #[error("No Go source files found in `{}`", .0.display())]
    NoSourceFiles(PathBuf),

    #[error("`{program}` exited with {status}")]
    Command { program: String, status: ExitStatus },

    #[error("Failed to execute `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
