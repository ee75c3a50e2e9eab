use crate::config::BuildConfig;
use crate::error::Error;
use crate::output::{base_name, target_output};
use crate::targets::Target;

/// Docker image providing the Go toolchain and the cross compilers
pub const DOCKER_IMAGE: &str = "lucor/fyne-cross";

/// A build invocation for one target along with the file it produces
pub struct BuildInvocation {
    pub args: Vec<String>,
    /// Path of the binary, relative to the package root directory
    pub output: String,
}

/// Assembles the arguments given to the container runtime
pub struct InvocationBuilder<'a> {
    config: &'a BuildConfig,
    uid: Option<String>,
}

impl<'a> InvocationBuilder<'a> {
    pub fn new(config: &'a BuildConfig) -> Self {
        Self::with_uid(config, current_uid())
    }

    pub fn with_uid(config: &'a BuildConfig, uid: Option<String>) -> Self {
        Self { config, uid }
    }

    /// Arguments shared by every command run into the container
    pub fn default_args(&self) -> Vec<String> {
        let package = &self.config.package;
        let mut args = vec![
            "run".to_owned(),
            "--rm".to_owned(),
            "-t".to_owned(),
            "-w".to_owned(),
            format!("/app/{package}"),
            "-v".to_owned(),
            format!("{}:/app/{package}", self.config.work_dir.display()),
            "-v".to_owned(),
            format!(
                "{}:/go",
                self.config.cache_dir.join("fyne-cross").display()
            ),
        ];

        // Lets the image chown the outputs to the invoking user
        if let Some(uid) = &self.uid {
            args.push("-e".to_owned());
            args.push(format!("fyne_uid={uid}"));
        }

        args
    }

    /// Arguments of the command downloading the dependencies
    pub fn fetch_args(&self) -> Vec<String> {
        let mut command = vec!["go", "get"];
        command.extend(self.verbosity_flag());
        command.extend(["-d", "./..."]);

        let mut args = self.default_args();
        args.push(DOCKER_IMAGE.to_owned());
        args.push(command.join(" "));
        args
    }

    /// Arguments of the command building the package for `target`
    pub fn build_args(&self, target: Target) -> Result<BuildInvocation, Error> {
        let base_name = base_name(
            self.config.output.as_deref(),
            &self.config.package,
            &self.config.work_dir,
        )?;
        let output = format!("build/{}", target_output(&base_name, target));

        let mut args = self.default_args();
        args.push("-e".to_owned());
        args.push("CGO_ENABLED=1".to_owned());
        for option in target.build_options() {
            args.push("-e".to_owned());
            args.push((*option).to_owned());
        }
        args.push(DOCKER_IMAGE.to_owned());

        let mut command = vec!["go".to_owned(), "build".to_owned()];
        if let Some(ldflags) = self.linker_flags(target) {
            command.push("-ldflags".to_owned());
            command.push(shell_quote(&ldflags));
        }
        command.extend(["-o".to_owned(), output.clone(), "-a".to_owned()]);
        command.extend(self.verbosity_flag().map(ToOwned::to_owned));
        command.push(self.config.package.clone());
        args.push(command.join(" "));

        Ok(BuildInvocation { args, output })
    }

    /// Combines the default linker flags of `target` with the user supplied ones
    pub fn linker_flags(&self, target: Target) -> Option<String> {
        let flags: Vec<&str> = target
            .default_ldflags()
            .into_iter()
            .chain(self.config.ldflags.as_deref())
            .collect();

        if flags.is_empty() {
            None
        } else {
            Some(flags.join(" "))
        }
    }

    fn verbosity_flag(&self) -> Option<&'static str> {
        self.config.verbose.then_some("-v")
    }
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(unix)]
fn current_uid() -> Option<String> {
    use nix::unistd::{User, getuid};

    match User::from_uid(getuid()) {
        Ok(Some(user)) => Some(user.uid.to_string()),
        Ok(None) => {
            log::warn!("Current user not found, outputs may be owned by root");
            None
        }
        Err(e) => {
            log::warn!("Failed to look up the current user: {e}");
            None
        }
    }
}

#[cfg(not(unix))]
fn current_uid() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn config(package: &str, ldflags: Option<&str>, verbose: bool) -> BuildConfig {
        BuildConfig {
            package: package.into(),
            work_dir: PathBuf::from("/home/me/hello"),
            cache_dir: PathBuf::from("/home/me/.cache"),
            output: None,
            ldflags: ldflags.map(Into::into),
            verbose,
            targets: Vec::new(),
        }
    }

    fn target(name: &str) -> Target {
        Target::lookup(name).unwrap()
    }

    #[test]
    fn default_args_mount_package_and_cache() {
        let config = config("cmd/hello", None, false);
        let builder = InvocationBuilder::with_uid(&config, Some("1000".into()));

        assert_eq!(
            builder.default_args(),
            [
                "run",
                "--rm",
                "-t",
                "-w",
                "/app/cmd/hello",
                "-v",
                "/home/me/hello:/app/cmd/hello",
                "-v",
                "/home/me/.cache/fyne-cross:/go",
                "-e",
                "fyne_uid=1000",
            ]
        );
    }

    #[test]
    fn missing_uid_is_omitted() {
        let config = config("cmd/hello", None, false);
        let builder = InvocationBuilder::with_uid(&config, None);

        assert!(!builder.default_args().iter().any(|arg| arg.starts_with("fyne_uid")));
    }

    #[test]
    fn fetch_command() {
        let config = config("cmd/hello", None, false);
        let builder = InvocationBuilder::with_uid(&config, None);
        let args = builder.fetch_args();
        assert_eq!(&args[args.len() - 2..], [DOCKER_IMAGE, "go get -d ./..."]);

        let config = BuildConfig {
            verbose: true,
            ..config
        };
        let builder = InvocationBuilder::with_uid(&config, None);
        assert_eq!(builder.fetch_args().last().unwrap(), "go get -v -d ./...");
    }

    #[test]
    fn windows_ldflags_are_merged() {
        let config = config("cmd/hello", Some("-s"), false);
        let builder = InvocationBuilder::with_uid(&config, None);

        assert_eq!(
            builder.linker_flags(target("windows/amd64")).as_deref(),
            Some("-H windowsgui -s")
        );
        assert_eq!(builder.linker_flags(target("linux/amd64")).as_deref(), Some("-s"));
    }

    #[test]
    fn ldflags_omitted_when_empty() {
        let config = config("cmd/hello", None, false);
        let builder = InvocationBuilder::with_uid(&config, None);

        assert_eq!(builder.linker_flags(target("linux/amd64")), None);
        let build = builder.build_args(target("linux/amd64")).unwrap();
        assert_eq!(
            build.args.last().unwrap(),
            "go build -o build/hello-linux-amd64 -a cmd/hello"
        );
    }

    #[test]
    fn build_command_for_windows() {
        let config = config("cmd/hello", Some("-X 'main.version=1'"), true);
        let builder = InvocationBuilder::with_uid(&config, None);

        let build = builder.build_args(target("windows/386")).unwrap();
        assert_eq!(build.output, "build/hello-windows-386.exe");

        let env_start = builder.default_args().len();
        assert_eq!(
            &build.args[env_start..],
            [
                "-e",
                "CGO_ENABLED=1",
                "-e",
                "GOOS=windows",
                "-e",
                "GOARCH=386",
                "-e",
                "CC=x86_64-w64-mingw32-gcc",
                DOCKER_IMAGE,
                r"go build -ldflags '-H windowsgui -X '\''main.version=1'\''' -o build/hello-windows-386.exe -a -v cmd/hello",
            ]
        );
    }

    #[test]
    fn output_failure_aborts_build() {
        let dir = tempfile::tempdir().unwrap();
        let config = BuildConfig {
            work_dir: dir.path().to_path_buf(),
            ..config(".", None, false)
        };
        let builder = InvocationBuilder::with_uid(&config, None);

        assert!(matches!(
            builder.build_args(target("linux/amd64")),
            Err(Error::NoSourceFiles(_))
        ));
    }
}
