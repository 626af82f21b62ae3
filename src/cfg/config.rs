//! Configuration file parsing and management.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::{cfg::enums::{VariantName, YesNo}, layout::Variant};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    /// Which firmware variants this build carries and how the adapter is
    /// provisioned.
    pub adapter: AdapterConfig,
    /// Runtime tuning knobs mirrored into sequencer scratch RAM.
    pub runtime: RuntimeConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
/// Adapter provisioning settings.
pub struct AdapterConfig {
    #[serde(rename = "CompiledModes")]
    /// Firmware variants compiled into this build. Selection fails fast
    /// when the detected silicon requires a variant not listed here.
    pub compiled_modes: Vec<VariantName>,

    #[serde(default, rename = "ForcedMode")]
    /// Optional override that pins the firmware variant regardless of
    /// what hardware detection reports. Intended for bring-up rigs.
    pub forced_mode: Option<VariantName>,

    #[serde(rename = "NumberScbs")]
    /// SCB descriptors to allocate in the host-side pool.
    pub number_scbs: u16,

    #[serde(rename = "TargetOperation")]
    /// Whether target-mode operation is enabled.
    pub target_operation: YesNo,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
/// Runtime-only tuning parameters.
pub struct RuntimeConfig {
    #[serde(default, rename = "IntrFactorThreshold")]
    /// Interrupt coalescing factor threshold.
    pub intr_factor_threshold: u8,

    #[serde(default, rename = "IntrThresholdCount")]
    /// Interrupt coalescing count threshold.
    pub intr_threshold_count: u8,

    #[serde(default, rename = "DisconnectDelay")]
    /// Delay applied before a disconnect, in firmware ticks.
    pub disconnect_delay: u8,
}

impl Config {
    /// Loads the configuration from YAML, validates it, and returns the
    /// ready-to-use value.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        let mut cfg: Config =
            serde_yaml::from_str(&s).context("failed to parse config YAML")?;
        cfg.validate_and_normalize()?;
        Ok(cfg)
    }

    /// Validates invariants and normalizes derived fields.
    pub fn validate_and_normalize(&mut self) -> Result<()> {
        ensure!(
            !self.adapter.compiled_modes.is_empty(),
            "CompiledModes must list at least one firmware variant"
        );
        ensure!(self.adapter.number_scbs >= 1, "NumberScbs must be >= 1");
        ensure!(
            self.adapter.number_scbs <= 512,
            "NumberScbs must be <= 512"
        );

        if let Some(forced) = self.adapter.forced_mode {
            ensure!(
                self.adapter.compiled_modes.contains(&forced),
                "ForcedMode {forced} is not listed in CompiledModes"
            );
        }

        if self.adapter.target_operation.as_bool() {
            ensure!(
                self.compiled_variants()
                    .iter()
                    .any(|v| v.target_operation()),
                "TargetOperation requires a target-capable variant in CompiledModes"
            );
        }

        Ok(())
    }

    /// Compiled variant list converted to the layout-level enum.
    pub fn compiled_variants(&self) -> Vec<Variant> {
        self.adapter
            .compiled_modes
            .iter()
            .map(|&name| Variant::from(name))
            .collect()
    }
}

/// Resolves a possibly-relative config path against the current working
/// directory and canonicalizes it.
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
