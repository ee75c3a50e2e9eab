//! Cross compiles a Fyne application for several platforms using a Docker toolchain image.

use clap::ColorChoice;

mod cli;
mod config;
mod crossbuild;
mod engine;
mod error;
mod invocation;
mod output;
mod targets;

use crate::cli::Args;
use crate::config::BuildConfig;
use crate::crossbuild::CrossBuild;
use crate::engine::Docker;
use crate::invocation::InvocationBuilder;

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse_with_targets();

    init_logger(args.verbose);

    if args.color == ColorChoice::Never {
        console::set_colors_enabled(false);
    } else if args.color == ColorChoice::Always {
        console::set_colors_enabled(true);
    }

    let config = BuildConfig::from_args(&args)?;
    let builder = InvocationBuilder::new(&config);
    let mut cross = CrossBuild::new(&config, builder, Docker::new(&args.engine));
    cross.run()?;

    Ok(())
}
