//! Establish-connection SCB field tables.
//!
//! Target-mode firmware parks "empty" SCBs on the sequencer to catch
//! incoming selections; when one completes it carries the connection
//! details back. Only the variants with target-mode support define this
//! format, and only the fields the host ever examines are tabled here.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::layout::{FieldSpec, Variant};

/// Host-visible fields of an establish-connection SCB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstField {
    /// SCB type code; set to the variant's empty-SCB code when parked.
    TypeCode,
    /// Selecting initiator SCSI id.
    InitiatorId,
    /// Queue tag type received.
    TagType,
    /// Queue tag number received.
    TagNumber,
    /// Received CDB length.
    CdbLength,
    /// Identify message byte received.
    IdentifyMsg,
    /// Bus address of the area receiving the request.
    ScbAddress,
    /// Last byte received before the sequencer stopped.
    LastByte,
    /// Connection flags (tag received, SCSI-1 selection, bus held, ...).
    Flags,
    /// Status returned from the sequencer.
    Status,
}

bitflags::bitflags! {
    /// Connection flag bits, identical across the target-capable variants.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EstFlags: u8 {
        const TAG_RCVD  = 0x80;
        const SCSI1_SEL = 0x40;
        const BUS_HELD  = 0x20;
        const RSVD_BITS = 0x10;
        const LUNTAR    = 0x08;
    }
}

/// Sequencer status codes for a completed establish-connection SCB. The
/// upper nibble carries conditions that can coincide with a state code.
pub mod status {
    pub const GOOD: u8 = 0x00;
    pub const SELECTION: u8 = 0x01;
    pub const MSG_IDENTIFY: u8 = 0x02;
    pub const MSG_OUT: u8 = 0x03;
    pub const COMMAND: u8 = 0x04;
    pub const DISCONNECT: u8 = 0x05;
    pub const VENDOR_CMD: u8 = 0x08;
    pub const LAST_RESOURCE: u8 = 0x40;
    pub const PARITY_ERR: u8 = 0x80;
}

/// Establish-connection schema for one target-capable variant.
#[derive(Debug)]
pub struct EstLayout {
    pub variant: Variant,
    spec_fn: fn(EstField) -> Option<FieldSpec>,
}

impl EstLayout {
    pub fn spec(&self, field: EstField) -> Option<FieldSpec> {
        (self.spec_fn)(field)
    }
}

/// Returns the establish-connection schema, or `None` for variants with no
/// target-mode support.
pub const fn est_layout_for(variant: Variant) -> Option<&'static EstLayout> {
    match variant {
        Variant::StandardU320 => Some(&STANDARD),
        Variant::StandardEnhU320 => Some(&STANDARD_ENH),
        Variant::DchU320 => Some(&DCH),
        Variant::DownshiftU320 | Variant::DownshiftEnhU320 => None,
    }
}

static STANDARD: EstLayout = EstLayout { variant: Variant::StandardU320, spec_fn: standard_spec };

const fn standard_spec(field: EstField) -> Option<FieldSpec> {
    let s = match field {
        EstField::InitiatorId => FieldSpec::bytes(16, 1),
        EstField::TagType => FieldSpec::bytes(17, 1),
        EstField::TagNumber => FieldSpec::bytes(18, 2),
        EstField::CdbLength => FieldSpec::bytes(22, 1),
        EstField::IdentifyMsg => FieldSpec::bytes(23, 1),
        EstField::ScbAddress => FieldSpec::bytes(24, 4),
        EstField::LastByte => FieldSpec::bytes(32, 1),
        EstField::Flags => FieldSpec::bytes(33, 1),
        EstField::Status => FieldSpec::bytes(34, 1),
        EstField::TypeCode => FieldSpec::bytes(35, 1),
    };
    Some(s)
}

static STANDARD_ENH: EstLayout =
    EstLayout { variant: Variant::StandardEnhU320, spec_fn: standard_enh_spec };

/// On enhanced firmware the connection details come back through a
/// separate selection-in data area; the SCB itself only exposes the type
/// code, the receive address, and the parked control state.
const fn standard_enh_spec(field: EstField) -> Option<FieldSpec> {
    let s = match field {
        EstField::TypeCode => FieldSpec::bytes(10, 1),
        EstField::ScbAddress => FieldSpec::bytes(24, 4),
        _ => return None,
    };
    Some(s)
}

static DCH: EstLayout = EstLayout { variant: Variant::DchU320, spec_fn: dch_spec };

const fn dch_spec(field: EstField) -> Option<FieldSpec> {
    let s = match field {
        EstField::TypeCode => FieldSpec::bytes(10, 1),
        EstField::InitiatorId => FieldSpec::bytes(16, 1),
        EstField::TagType => FieldSpec::bytes(17, 1),
        EstField::TagNumber => FieldSpec::bytes(18, 2),
        EstField::CdbLength => FieldSpec::bytes(22, 1),
        EstField::IdentifyMsg => FieldSpec::bytes(23, 1),
        EstField::ScbAddress => FieldSpec::bytes(24, 8),
        EstField::LastByte => FieldSpec::bytes(32, 1),
        EstField::Flags => FieldSpec::bytes(33, 1),
        EstField::Status => FieldSpec::bytes(34, 1),
    };
    Some(s)
}
