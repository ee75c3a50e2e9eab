use std::fmt;

use target_lexicon::{Architecture, OperatingSystem, Triple};

use crate::error::Error;

/// Maps each supported `GOOS/GOARCH` to the environment needed to cross compile for it
static BUILD_OPTIONS: phf::Map<&'static str, &'static [&'static str]> = phf::phf_map! {
    "darwin/amd64" => &["GOOS=darwin", "GOARCH=amd64", "CC=o32-clang"],
    "darwin/386" => &["GOOS=darwin", "GOARCH=386", "CC=o32-clang"],
    "linux/amd64" => &["GOOS=linux", "GOARCH=amd64", "CC=gcc"],
    "linux/386" => &["GOOS=linux", "GOARCH=386", "CC=gcc"],
    "windows/amd64" => &["GOOS=windows", "GOARCH=amd64", "CC=x86_64-w64-mingw32-gcc"],
    "windows/386" => &["GOOS=windows", "GOARCH=386", "CC=x86_64-w64-mingw32-gcc"],
};

/// Linker flags always passed for a target, before the user supplied ones
static DEFAULT_LDFLAGS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "windows/amd64" => "-H windowsgui",
    "windows/386" => "-H windowsgui",
};

/// A validated platform identifier (e.g., `linux/amd64`)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Target(&'static str);

impl Target {
    /// Looks up `name` in the table of supported targets
    pub fn lookup(name: &str) -> Option<Self> {
        BUILD_OPTIONS.get_key(name).copied().map(Self)
    }

    /// Returns every supported target, sorted by name
    pub fn supported() -> Vec<Self> {
        let mut targets: Vec<_> = BUILD_OPTIONS.keys().copied().map(Self).collect();
        targets.sort_unstable_by_key(|target| target.0);
        targets
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// The `GOOS` part of the identifier
    pub fn os(&self) -> &'static str {
        self.0.split_once('/').map_or(self.0, |(os, _)| os)
    }

    pub fn is_windows(&self) -> bool {
        self.os() == "windows"
    }

    /// Environment variables (`KEY=value`) to set in the container when building for this target
    pub fn build_options(&self) -> &'static [&'static str] {
        BUILD_OPTIONS.get(self.0).copied().unwrap_or_default()
    }

    pub fn default_ldflags(&self) -> Option<&'static str> {
        DEFAULT_LDFLAGS.get(self.0).copied()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Parses a comma separated list of targets, stopping at the first unsupported one.
///
/// Order and duplicates are preserved.
pub fn parse_targets(list: &str) -> Result<Vec<Target>, Error> {
    list.split(',')
        .map(str::trim)
        .map(|target| Target::lookup(target).ok_or_else(|| Error::UnsupportedTarget(target.into())))
        .collect()
}

/// Returns the `GOOS/GOARCH` identifier of the host, whether it is supported or not
pub fn host_target() -> String {
    target_from_triple(&Triple::host())
}

fn target_from_triple(triple: &Triple) -> String {
    let os = match triple.operating_system {
        OperatingSystem::Linux => "linux".to_owned(),
        OperatingSystem::Darwin(_) | OperatingSystem::MacOSX(_) => "darwin".to_owned(),
        OperatingSystem::Windows => "windows".to_owned(),
        other => other.to_string(),
    };
    let arch = match triple.architecture {
        Architecture::X86_64 => "amd64".to_owned(),
        Architecture::X86_32(_) => "386".to_owned(),
        Architecture::Aarch64(_) => "arm64".to_owned(),
        other => other.to_string(),
    };

    format!("{os}/{arch}")
}
