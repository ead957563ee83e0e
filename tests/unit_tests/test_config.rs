use anyhow::{Context, Result};
use ata_identify::cfg::{
    cli::{Args, resolve_config_path},
    config::Config,
    enums::{LogOutput, OutputFormat},
};
use clap::Parser;

#[test]
fn test_load_config_file() -> Result<()> {
    let cfg = resolve_config_path("tests/config.yaml")
        .and_then(Config::load_from_file)
        .context("failed to resolve or load config")?;

    assert!(cfg.probe.legacy_identity_fallback.as_bool());
    assert_eq!(cfg.output.format, OutputFormat::Export);
    assert_eq!(cfg.logger.output, LogOutput::Stderr);
    assert!(cfg.logger.is_show_line);
    Ok(())
}

#[test]
fn test_cli_flags_override_file() -> Result<()> {
    let mut cfg = Config::from_yaml("output:\n  Format: export\n")?;
    let args = Args::try_parse_from(["ata_id", "--json", "--no-legacy-fallback", "/dev/sdb"])?;
    cfg.apply_cli(&args);

    assert_eq!(cfg.output.format, OutputFormat::Json);
    assert!(!cfg.probe.legacy_identity_fallback.as_bool());
    Ok(())
}

#[test]
fn test_no_flags_keep_file_values() -> Result<()> {
    let mut cfg = Config::from_yaml("output:\n  Format: export\n")?;
    let args = Args::try_parse_from(["ata_id", "/dev/sdb"])?;
    cfg.apply_cli(&args);

    assert_eq!(cfg.output.format, OutputFormat::Export);
    assert!(cfg.probe.legacy_identity_fallback.as_bool());
    Ok(())
}

#[test]
fn test_missing_config_file_fails() {
    assert!(resolve_config_path("tests/does_not_exist.yaml").is_err());
}
