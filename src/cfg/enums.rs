//! Enumerations used in configuration.
// SPDX-License-Identifier: AGPL-3.0-or-later

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::Variant;

/// Boolean enumeration with string serialization support.
///
/// Accepts "Yes"/"No" plus the usual boolean spellings.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    #[serde(
        rename = "Yes",
        alias = "yes",
        alias = "YES",
        alias = "true",
        alias = "True",
        alias = "1"
    )]
    Yes,
    #[serde(
        rename = "No",
        alias = "no",
        alias = "NO",
        alias = "false",
        alias = "False",
        alias = "0"
    )]
    No,
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        })
    }
}

impl From<bool> for YesNo {
    fn from(b: bool) -> Self {
        if b { YesNo::Yes } else { YesNo::No }
    }
}

impl YesNo {
    pub fn as_bool(self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

/// Firmware variant names as they appear in YAML.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantName {
    #[serde(rename = "StandardU320", alias = "standard-u320")]
    StandardU320,
    #[serde(rename = "DownshiftU320", alias = "downshift-u320")]
    DownshiftU320,
    #[serde(rename = "StandardEnhU320", alias = "standard-enh-u320")]
    StandardEnhU320,
    #[serde(rename = "DownshiftEnhU320", alias = "downshift-enh-u320")]
    DownshiftEnhU320,
    #[serde(rename = "DchU320", alias = "dch-u320")]
    DchU320,
}

impl From<VariantName> for Variant {
    fn from(name: VariantName) -> Self {
        match name {
            VariantName::StandardU320 => Variant::StandardU320,
            VariantName::DownshiftU320 => Variant::DownshiftU320,
            VariantName::StandardEnhU320 => Variant::StandardEnhU320,
            VariantName::DownshiftEnhU320 => Variant::DownshiftEnhU320,
            VariantName::DchU320 => Variant::DchU320,
        }
    }
}

impl fmt::Display for VariantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Variant::from(*self))
    }
}
