use std::process::{Command, Stdio};

use crate::error::Error;

/// A container runtime able to run the toolchain image
pub trait ContainerEngine {
    /// Name of the program, as shown to the user
    fn name(&self) -> &str;

    /// Checks that the runtime is installed and reachable
    fn probe(&mut self) -> Result<(), Error>;

    /// Runs the runtime with `args`, forwarding its output, and waits for it to exit
    fn run(&mut self, args: &[String]) -> Result<(), Error>;
}

/// Wrapper around the `docker` command (or a compatible one, such as `podman`)
pub struct Docker {
    program: String,
}

impl Docker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ContainerEngine for Docker {
    fn name(&self) -> &str {
        &self.program
    }

    fn probe(&mut self) -> Result<(), Error> {
        let status = Command::new(&self.program)
            .arg("version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| Error::MissingRequirement {
                program: self.program.clone(),
                source: Some(e),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::MissingRequirement {
                program: self.program.clone(),
                source: None,
            })
        }
    }

    fn run(&mut self, args: &[String]) -> Result<(), Error> {
        let status = Command::new(&self.program)
            .args(args)
            .status()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Command {
                program: self.program.clone(),
                status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_program_is_a_missing_requirement() {
        let mut docker = Docker::new("fyne-cross-no-such-engine");

        assert!(matches!(
            docker.probe(),
            Err(Error::MissingRequirement { program, source: Some(_) })
                if program == "fyne-cross-no-such-engine"
        ));
    }

    #[test]
    fn unknown_program_cannot_run() {
        let mut docker = Docker::new("fyne-cross-no-such-engine");

        assert!(matches!(
            docker.run(&["version".to_owned()]),
            Err(Error::Spawn { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_is_reported() {
        let mut engine = Docker::new("false");

        assert!(matches!(engine.probe(), Err(Error::MissingRequirement { source: None, .. })));
        assert!(matches!(engine.run(&[]), Err(Error::Command { .. })));
    }
}
