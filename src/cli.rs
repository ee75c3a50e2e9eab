use std::path::PathBuf;

use clap::{ColorChoice, CommandFactory, FromArgMatches};

use crate::targets::{Target, host_target};

#[derive(clap::Parser)]
#[command(name = "fyne-cross", version, author, about = "Cross compile a Fyne application")]
pub struct Args {
    /// The package to build
    #[clap(value_name = "PACKAGE", default_value = ".")]
    pub package: String,

    /// Comma-separated list of targets to build. Defaults to the host GOOS/GOARCH
    #[clap(long, value_name = "TARGETS", default_value_t = host_target())]
    pub targets: String,

    /// The named output file. Defaults to the package name
    #[clap(long, value_name = "NAME")]
    pub output: Option<String>,

    /// The package root directory. Defaults to the current directory
    #[clap(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Directory used to cache the dependencies. Defaults to the user cache directory
    #[clap(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Additional flags passed to the Go linker, after the target defaults
    #[clap(long, value_name = "FLAGS", allow_hyphen_values = true)]
    pub ldflags: Option<String>,

    /// Enable verbosity flag for go commands
    #[clap(short)]
    pub verbose: bool,

    /// Container runtime used to run the toolchain image
    #[clap(
        long,
        value_name = "PROGRAM",
        env = "FYNE_CROSS_ENGINE",
        default_value = "docker"
    )]
    pub engine: String,

    /// Color preferences for program output
    #[clap(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,
}

impl Args {
    /// Parses the command line, listing the supported targets in the help message
    pub fn parse_with_targets() -> Self {
        let matches = Self::command().after_help(targets_help()).get_matches();

        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }
}

fn targets_help() -> String {
    let mut help = String::from("Supported targets:\n");
    for target in Target::supported() {
        help.push_str(&format!("  - {target}\n"));
    }
    help.push_str(
        "\nExample: fyne-cross --targets=linux/amd64,windows/amd64 --output=test cmd/hello",
    );

    help
}
