use std::path::PathBuf;

use anyhow::Context;

use crate::cli::Args;
use crate::error::Error;
use crate::targets::{Target, parse_targets};

/// Resolved inputs of a cross compilation run
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Package to build, relative to the package root directory
    pub package: String,
    /// Package root directory on the host
    pub work_dir: PathBuf,
    /// Host directory holding the dependency cache
    pub cache_dir: PathBuf,
    pub output: Option<String>,
    pub ldflags: Option<String>,
    pub verbose: bool,
    pub targets: Vec<Target>,
}

impl BuildConfig {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let targets = parse_targets(&args.targets).context("Unable to parse targets option")?;

        let work_dir = match &args.dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()
                .context("Cannot get the path for current directory")?,
        };

        let cache_dir = match &args.cache_dir {
            Some(dir) => dir.clone(),
            None => dirs::cache_dir()
                .ok_or_else(|| Error::Environment("the user cache directory".into()))?,
        };

        Ok(Self {
            package: args.package.clone(),
            work_dir,
            cache_dir,
            output: args.output.clone(),
            ldflags: args.ldflags.clone().filter(|flags| !flags.trim().is_empty()),
            verbose: args.verbose,
            targets,
        })
    }
}
