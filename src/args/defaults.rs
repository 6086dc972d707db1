pub(crate) const DEFAULT_USER_AGENT: &str = concat!("caseforge/", env!("CARGO_PKG_VERSION"));

/// Default config filenames checked when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["caseforge.toml", "caseforge.json"];
