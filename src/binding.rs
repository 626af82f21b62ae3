//! Mode selection and process-wide binding.
//!
//! At start-up the detected silicon is mapped to the one firmware variant
//! it requires, checked against the variants the build was configured
//! for, and published write-once. Everything downstream reads the active
//! binding; a full re-initialization constructs a fresh binding instead
//! of mutating the installed one.
// SPDX-License-Identifier: AGPL-3.0-or-later

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::info;

use crate::{
    dispatch::{FirmwareDescriptor, descriptor_for},
    layout::{Layout, Variant, layout_for},
};

/// Silicon generations the driver recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipRevision {
    HarpoonRevA,
    HarpoonRevB,
    Dch,
}

/// What probing the adapter found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedHardware {
    pub revision: ChipRevision,
    /// True when the adapter must run the stripped downshift firmware
    /// (BIOS/ASPI compatibility path).
    pub downshift: bool,
}

impl DetectedHardware {
    /// The single firmware variant this hardware requires. The mapping is
    /// total except for the DCH core, which has no downshift build.
    pub fn required_variant(&self) -> Result<Variant, SelectError> {
        match (self.revision, self.downshift) {
            (ChipRevision::HarpoonRevA, false) => Ok(Variant::StandardU320),
            (ChipRevision::HarpoonRevA, true) => Ok(Variant::DownshiftU320),
            (ChipRevision::HarpoonRevB, false) => Ok(Variant::StandardEnhU320),
            (ChipRevision::HarpoonRevB, true) => Ok(Variant::DownshiftEnhU320),
            (ChipRevision::Dch, false) => Ok(Variant::DchU320),
            (ChipRevision::Dch, true) => {
                Err(SelectError::NoDownshiftFirmware { revision: ChipRevision::Dch })
            },
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("hardware requires variant {required} but it is not configured")]
    NotConfigured { required: Variant },
    #[error("no downshift firmware exists for {revision:?}")]
    NoDownshiftFirmware { revision: ChipRevision },
    #[error("a binding is already installed for variant {active}")]
    AlreadyInstalled { active: Variant },
}

/// The selected variant with its schema and capability descriptor.
/// Construction goes through [`select`]; the contents never change.
#[derive(Clone, Copy)]
pub struct ActiveBinding {
    pub variant: Variant,
    pub layout: &'static Layout,
    pub firmware: &'static FirmwareDescriptor,
}

/// Maps detected hardware to its firmware variant and binds it, failing
/// before any descriptor traffic if the variant is not in `configured`.
pub fn select(
    detected: DetectedHardware,
    configured: &[Variant],
) -> Result<ActiveBinding, SelectError> {
    let required = detected.required_variant()?;
    if !configured.contains(&required) {
        return Err(SelectError::NotConfigured { required });
    }
    info!(variant = %required, ?detected.revision, "firmware variant selected");
    Ok(ActiveBinding {
        variant: required,
        layout: layout_for(required),
        firmware: descriptor_for(required),
    })
}

static ACTIVE: OnceCell<ActiveBinding> = OnceCell::new();

/// Publishes the binding process-wide. Write-once; a second install is
/// rejected rather than silently replacing the firmware everyone else is
/// already reading.
pub fn install(binding: ActiveBinding) -> Result<(), SelectError> {
    ACTIVE
        .set(binding)
        .map_err(|_| SelectError::AlreadyInstalled {
            active: active().map(|b| b.variant).unwrap_or(binding.variant),
        })
}

/// The installed binding, if selection has run.
pub fn active() -> Option<&'static ActiveBinding> {
    ACTIVE.get()
}
