use anyhow::{Context, Result};
use scb_codec_rs::{
    cfg::{
        config::{Config, resolve_config_path},
        enums::{VariantName, YesNo},
    },
    layout::Variant,
};

#[test]
fn config_loads_and_validates() -> Result<()> {
    let cfg = resolve_config_path("tests/config.yaml")
        .and_then(Config::load_from_file)
        .context("failed to resolve or load config")?;

    assert_eq!(cfg.adapter.compiled_modes.len(), 5);
    assert_eq!(cfg.adapter.forced_mode, Some(VariantName::StandardU320));
    assert_eq!(cfg.adapter.number_scbs, 32);
    assert_eq!(cfg.adapter.target_operation, YesNo::Yes);
    assert_eq!(cfg.runtime.intr_factor_threshold, 4);
    assert_eq!(cfg.runtime.intr_threshold_count, 8);

    assert_eq!(cfg.compiled_variants()[0], Variant::StandardU320);
    assert_eq!(cfg.compiled_variants()[4], Variant::DchU320);
    Ok(())
}

#[test]
fn empty_mode_list_is_rejected() -> Result<()> {
    let mut cfg = resolve_config_path("tests/config.yaml")
        .and_then(Config::load_from_file)
        .context("failed to resolve or load config")?;

    cfg.adapter.compiled_modes.clear();
    cfg.adapter.forced_mode = None;
    cfg.adapter.target_operation = YesNo::No;
    assert!(cfg.validate_and_normalize().is_err());
    Ok(())
}

#[test]
fn forced_mode_must_be_compiled_in() -> Result<()> {
    let mut cfg = resolve_config_path("tests/config.yaml")
        .and_then(Config::load_from_file)
        .context("failed to resolve or load config")?;

    cfg.adapter.compiled_modes = vec![VariantName::DownshiftU320];
    cfg.adapter.forced_mode = Some(VariantName::DchU320);
    cfg.adapter.target_operation = YesNo::No;
    assert!(cfg.validate_and_normalize().is_err());
    Ok(())
}

#[test]
fn target_operation_needs_a_capable_variant() -> Result<()> {
    let mut cfg = resolve_config_path("tests/config.yaml")
        .and_then(Config::load_from_file)
        .context("failed to resolve or load config")?;

    cfg.adapter.compiled_modes =
        vec![VariantName::DownshiftU320, VariantName::DownshiftEnhU320];
    cfg.adapter.forced_mode = None;
    assert!(cfg.validate_and_normalize().is_err());

    cfg.adapter.compiled_modes.push(VariantName::DchU320);
    cfg.validate_and_normalize()
        .context("a dch build should satisfy target operation")?;
    Ok(())
}

#[test]
fn yes_no_accepts_boolean_spellings() -> Result<()> {
    let yes: YesNo = serde_yaml::from_str("\"true\"")?;
    assert_eq!(yes, YesNo::Yes);
    assert!(yes.as_bool());

    let no: YesNo = serde_yaml::from_str("\"No\"")?;
    assert_eq!(no, YesNo::No);
    assert_eq!(YesNo::from(false), YesNo::No);
    Ok(())
}
