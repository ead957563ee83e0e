// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

/// Reads product/serial number from ATA drives.
#[derive(Parser, Debug, Clone)]
#[command(name = "ata_id", version, about, long_about = None)]
pub struct Args {
    /// Print values as environment keys
    #[arg(short = 'x', long = "export")]
    pub export: bool,

    /// Print the decoded IDENTIFY data as JSON
    #[arg(long, conflicts_with = "export")]
    pub json: bool,

    /// Do not fall back to HDIO_GET_IDENTITY
    #[arg(long)]
    pub no_legacy_fallback: bool,

    /// YAML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    /// Block device node, e.g. /dev/sda
    pub device: PathBuf,
}

pub fn resolve_config_path(rel: &str) -> Result<PathBuf> {
    let p = Path::new(rel);

    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()
            .context("cannot get current working dir")?
            .join(p)
    };

    let canon = abs
        .canonicalize()
        .with_context(|| format!("failed to canonicalize path {abs:?}"))?;

    Ok(canon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_export_short_flag() {
        let args = Args::try_parse_from(["ata_id", "-x", "/dev/sda"]).expect("parse");
        assert!(args.export);
        assert!(!args.json);
        assert_eq!(args.device, PathBuf::from("/dev/sda"));
    }

    #[test]
    fn device_is_required() {
        assert!(Args::try_parse_from(["ata_id", "--export"]).is_err());
    }

    #[test]
    fn json_and_export_conflict() {
        assert!(Args::try_parse_from(["ata_id", "--json", "-x", "/dev/sr0"]).is_err());
    }
}
