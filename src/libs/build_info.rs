use std::fmt;

/// Version details baked in at compile time.
///
/// Set `SLINTGEN_COMMIT` and `SLINTGEN_BUILD_TIME` in the build environment
/// to have them reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub built_at: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: match option_env!("SLINTGEN_COMMIT") {
                Some(commit) => commit,
                None => "unknown",
            },
            built_at: match option_env!("SLINTGEN_BUILD_TIME") {
                Some(time) => time,
                None => "unknown",
            },
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slintgen {} (commit {}, built {})",
            self.version, self.commit, self.built_at
        )
    }
}
