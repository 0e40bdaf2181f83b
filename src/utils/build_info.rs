/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// One line per field, aligned for the `version` command.
    pub fn lines(&self) -> Vec<String> {
        [
            ("Version", self.version),
            ("Commit", self.git_hash),
            ("Tree", self.git_status),
            ("Built", self.timestamp),
            ("Target", self.target),
            ("Profile", self.profile),
            ("Compiler", self.rustc),
        ]
        .iter()
        .map(|(label, value)| format!("{label:<9} {value}"))
        .collect()
    }
}

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("KANA_ENTRY_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("KANA_ENTRY_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("KANA_ENTRY_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("KANA_ENTRY_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("KANA_ENTRY_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("KANA_ENTRY_BUILD_RUSTC").unwrap_or("unknown"),
    }
}
