use std::fmt;

use anyhow::Context;

use console::style;

use crate::config::BuildConfig;
use crate::engine::ContainerEngine;
use crate::invocation::InvocationBuilder;

/// Progress of a cross compilation run
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum State {
    Idle,
    RequirementsChecked,
    DependenciesFetched,
    /// Building the target at this index of the configured targets
    Building(usize),
    Done,
    Failed,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::RequirementsChecked => f.write_str("requirements checked"),
            Self::DependenciesFetched => f.write_str("dependencies fetched"),
            Self::Building(i) => write!(f, "building target #{i}"),
            Self::Done => f.write_str("done"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// Fetches the dependencies then builds the package for each target, stopping at the first failure
pub struct CrossBuild<'a, E> {
    config: &'a BuildConfig,
    builder: InvocationBuilder<'a>,
    engine: E,
    state: State,
}

impl<'a, E: ContainerEngine> CrossBuild<'a, E> {
    pub fn new(config: &'a BuildConfig, builder: InvocationBuilder<'a>, engine: E) -> Self {
        Self {
            config,
            builder,
            engine,
            state: State::Idle,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let result = self.run_stages();
        if result.is_err() {
            log::debug!("Failed while {}", self.state);
            self.transition(State::Failed);
        }

        result
    }

    fn run_stages(&mut self) -> anyhow::Result<()> {
        self.engine.probe()?;
        self.transition(State::RequirementsChecked);

        println!("{:>12} dependencies", style("Fetching").bold().green());
        let args = self.builder.fetch_args();
        self.invoke(&args)?;
        self.transition(State::DependenciesFetched);

        let config = self.config;
        for (i, &target) in config.targets.iter().enumerate() {
            self.transition(State::Building(i));
            println!("{:>12} {target}", style("Compiling").bold().green());

            let build = self
                .builder
                .build_args(target)
                .with_context(|| format!("Failed to build for {target}"))?;
            self.invoke(&build.args)
                .with_context(|| format!("Failed to build for {target}"))?;

            println!(
                "{:>12} {target} ({})",
                style("Finished").bold().green(),
                build.output
            );
        }
        self.transition(State::Done);

        Ok(())
    }

    fn transition(&mut self, state: State) {
        log::trace!("{} -> {state}", self.state);
        self.state = state;
    }

    fn invoke(&mut self, args: &[String]) -> anyhow::Result<()> {
        let command_line = format!("{} {}", self.engine.name(), args.join(" "));
        log::debug!("{command_line}");
        if self.config.verbose {
            println!("{command_line}");
        }

        self.engine.run(args)?;

        Ok(())
    }
}
