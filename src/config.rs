use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::error::FramerResult;

pub const ENV_OUTPUT_DIR: &str = "FRAMER_OUTPUT_DIR";
pub const ENV_FILENAME_PREFIX: &str = "FRAMER_FILENAME_PREFIX";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FramerConfig {
    /// Leading part of exported file names.
    pub filename_prefix: String,
    /// Text handed to share targets alongside the image.
    pub share_message: String,
    /// Directory exports are written to when no explicit path is given.
    pub output_dir: PathBuf,
}

const DEFAULT_SHARE_MESSAGE: &str = "Check out my HackStorm 2024 frame! \u{1f3ae}\u{26a1} \
    Join us at JEC Kukas for 24hrs of innovation!\n\n\
    *Note:* Please download and attach the image you just created!";

impl Default for FramerConfig {
    fn default() -> Self {
        Self {
            filename_prefix: "hackstorm".to_string(),
            share_message: DEFAULT_SHARE_MESSAGE.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl FramerConfig {
    pub fn from_json_file(path: &Path) -> FramerResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config '{}'", path.display()))?;
        Ok(cfg)
    }

    /// Applies `FRAMER_*` environment overrides; empty values are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(prefix) = lookup(ENV_FILENAME_PREFIX).filter(|v| !v.is_empty()) {
            self.filename_prefix = prefix;
        }
        self
    }
}
