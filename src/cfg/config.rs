// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{fs, path::Path};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::cfg::{
    cli::Args,
    enums::{LogOutput, OutputFormat, YesNo},
    logger::LogConfig,
};

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Config {
    /// What the tool may do when the pass-through probe fails.
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logger: LogConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ProbeConfig {
    #[serde(rename = "LegacyIdentityFallback", default = "yes")]
    /// Retry with `HDIO_GET_IDENTITY` when SG_IO IDENTIFY fails.
    pub legacy_identity_fallback: YesNo,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            legacy_identity_fallback: yes(),
        }
    }
}

fn yes() -> YesNo {
    YesNo::Yes
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct OutputConfig {
    #[serde(rename = "Format", default)]
    pub format: OutputFormat,
}

impl Config {
    /// Loads the configuration from YAML, validates it, and returns the
    /// ready-to-use value.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {path:?}"))?;
        let cfg = Self::from_yaml(&s)?;
        Ok(cfg)
    }

    pub fn from_yaml(s: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(s).context("failed to parse config YAML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.logger.output == LogOutput::File {
            ensure!(
                self.logger
                    .file
                    .as_ref()
                    .is_some_and(|f| !f.path.is_empty()),
                "logger.output=file requires logger.file.path"
            );
        }
        ensure!(!self.logger.level.is_empty(), "logger.level must not be empty");
        Ok(())
    }

    /// Command-line flags win over the file.
    pub fn apply_cli(&mut self, args: &Args) {
        if args.json {
            self.output.format = OutputFormat::Json;
        } else if args.export {
            self.output.format = OutputFormat::Export;
        }
        if args.no_legacy_fallback {
            self.probe.legacy_identity_fallback = YesNo::No;
        }
    }
}
