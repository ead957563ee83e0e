// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::process::ExitCode;

use anyhow::{Context, Result};
use ata_identify::{
    cfg::{
        cli::{Args, resolve_config_path},
        config::Config,
        enums::OutputFormat,
        logger::init_logger,
    },
    export::{short_name, udev_properties},
    models::identify::IdentifyRecord,
};
use clap::Parser;

const EXIT_OPEN_FAILED: u8 = 1;
const EXIT_IDENTIFY_FAILED: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ata_id: {e:#}");
            return ExitCode::FAILURE;
        },
    };

    let _guard = match init_logger(&config.logger) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("ata_id: {e:#}");
            return ExitCode::FAILURE;
        },
    };

    match probe::run(&args, &config) {
        Ok(Some(record)) => match print_record(&record, config.output.format) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("ata_id: {e:#}");
                ExitCode::FAILURE
            },
        },
        Ok(None) => ExitCode::from(EXIT_IDENTIFY_FAILED),
        Err(e) => {
            eprintln!("ata_id: {e:#}");
            ExitCode::from(EXIT_OPEN_FAILED)
        },
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => resolve_config_path(path)
            .and_then(Config::load_from_file)
            .context("failed to resolve or load config")?,
        None => Config::default(),
    };
    config.apply_cli(args);
    Ok(config)
}

fn print_record(record: &IdentifyRecord, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Plain => println!("{}", short_name(record)),
        OutputFormat::Export => {
            for (key, value) in udev_properties(record) {
                println!("{key}={value}");
            }
        },
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(record).context("failed to serialize record")?
        ),
    }
    Ok(())
}

#[cfg(target_os = "linux")]
mod probe {
    use std::{
        fs::OpenOptions,
        os::{fd::AsFd, unix::fs::OpenOptionsExt},
    };

    use anyhow::{Context, Result};
    use ata_identify::{
        cfg::{cli::Args, config::Config},
        handlers::disk_identify,
        models::identify::{IdentifyRecord, decode_legacy},
        transport::linux::SgDevice,
    };
    use tracing::{debug, info, warn};

    /// `Err` when the node cannot be opened, `Ok(None)` when no identify
    /// path produced data.
    pub fn run(args: &Args, config: &Config) -> Result<Option<IdentifyRecord>> {
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK | libc::O_CLOEXEC | libc::O_NOCTTY)
            .open(&args.device)
            .with_context(|| format!("unable to open '{}'", args.device.display()))?;

        let device = SgDevice::new(file.as_fd());

        let err = match disk_identify(device) {
            Ok(identity) => {
                info!(
                    device = %args.device.display(),
                    classification = %identity.classification,
                    "identified via SG_IO"
                );
                return Ok(Some(identity.record));
            },
            Err(e) => e,
        };

        if !config.probe.legacy_identity_fallback.as_bool() {
            eprintln!("ata_id: {}: {err}", args.device.display());
            return Ok(None);
        }

        debug!(error = %err, "pass-through IDENTIFY failed, trying HDIO_GET_IDENTITY");
        match device.legacy_identity() {
            Ok(block) => Ok(Some(decode_legacy(&block))),
            Err(errno) => {
                warn!(error = %err, %errno, "both identify paths failed");
                eprintln!(
                    "ata_id: {}: HDIO_GET_IDENTITY failed: {errno}",
                    args.device.display()
                );
                Ok(None)
            },
        }
    }
}

#[cfg(not(target_os = "linux"))]
mod probe {
    use anyhow::{Result, bail};
    use ata_identify::{
        cfg::{cli::Args, config::Config},
        models::identify::IdentifyRecord,
    };

    pub fn run(_args: &Args, _config: &Config) -> Result<Option<IdentifyRecord>> {
        bail!("SG_IO is only available on Linux")
    }
}
