use std::path::PathBuf;

use serde::Deserialize;

use crate::fmt::ImageFormat;

/// The raw, whole config file: a single `[guml]` table
#[derive(Debug, Clone, Deserialize)]
pub struct RawCfg {
    pub guml: RawGumlCfg,
}

/// The `[guml]` table. `repository`, `before-date` and `renderer-jar` are
/// required; the rest falls back to the crate defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawGumlCfg {
    pub repository: PathBuf,
    pub before_date: String,
    pub renderer_jar: PathBuf,
    #[serde(default)]
    pub outfile: Option<String>,
    #[serde(default)]
    pub image_format: ImageFormat,
}
