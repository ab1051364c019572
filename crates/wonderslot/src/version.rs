//! Version information.

/// Get the version string.
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Get the full version string with the target it was built for.
#[must_use]
pub fn full_version() -> String {
    format!(
        "wonderslot {} ({} {})",
        version(),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
