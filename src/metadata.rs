use core::fmt;
use serde::Serialize;

mod build_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

#[derive(Copy, Clone, Debug, Serialize)]
pub struct ApplicationMetadata {
    pub version: &'static str,
    pub git_version: &'static str,
    pub rust_version: &'static str,
    pub profile: &'static str,
    pub git_dirty: bool,
    pub features: &'static str,
}

impl ApplicationMetadata {
    /// Build information captured at compile time.
    pub fn get() -> Self {
        Self {
            version: build_info::PKG_VERSION,
            git_version: build_info::GIT_VERSION.unwrap_or("Unspecified"),
            rust_version: build_info::RUSTC_VERSION,
            profile: build_info::PROFILE,
            git_dirty: build_info::GIT_DIRTY.unwrap_or(false),
            features: build_info::FEATURES_STR,
        }
    }
}

impl fmt::Display for ApplicationMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}{}), {}, {} profile, features: [{}]",
            build_info::PKG_NAME,
            self.version,
            self.git_version,
            if self.git_dirty { ", dirty" } else { "" },
            self.rust_version,
            self.profile,
            self.features,
        )
    }
}
