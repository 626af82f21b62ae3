//! Downshift Ultra 320 SCB format layout.
//!
//! The downshift firmware serves BIOS-style single-command operation: no
//! mirrored operation, no busy-target trailer, no target mode. Bytes 50
//! through 63 are reserved.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::layout::{Field, FieldSpec, Layout, SCB_SIZE, Variant};

pub static LAYOUT: Layout = Layout {
    variant: Variant::DownshiftU320,
    size: SCB_SIZE,
    dma_size: 61,
    targetenb_bit: None,
    type_codes: None,
    sg_cache_nodata: 0x0001,
    sg_cache_onesgseg: 0x0002,
    spec_fn: spec,
};

const fn spec(field: Field) -> Option<FieldSpec> {
    let s = match field {
        Field::NextScbAddress => FieldSpec::bytes(0, 8),
        Field::QExetargNext => FieldSpec::bytes(0, 2),
        Field::QNext => FieldSpec::bytes(20, 2),
        Field::ArraySite => FieldSpec::bytes(20, 2),
        Field::CdbInline => FieldSpec::bytes(8, 12),
        Field::CdbPointer => FieldSpec::bytes(8, 8),
        Field::Residue => FieldSpec::bytes(8, 3),
        Field::SgCacheWork => FieldSpec::bytes(15, 1),
        Field::SgPointerWork => FieldSpec::bytes(16, 4),
        Field::AtnLength => FieldSpec::bytes(22, 1),
        Field::CdbLength => FieldSpec::bits(23, 1, 0x1F, 0),
        Field::SgAddress => FieldSpec::bytes(24, 4),
        Field::SgLength => FieldSpec::bytes(28, 3),
        Field::TaskAttribute => FieldSpec::bits(35, 1, 0x07, 0),
        Field::TaskManagement => FieldSpec::bytes(36, 1),
        Field::ScbFlags => FieldSpec::bytes(37, 1),
        Field::TagType => FieldSpec::bits(38, 1, 0x03, 0),
        Field::ControlFlags => FieldSpec::bits(38, 1, 0xFC, 0),
        Field::SgCacheScb => FieldSpec::bytes(39, 1),
        Field::SgListPointer => FieldSpec::bytes(40, 8),
        Field::SpecialOpcode => FieldSpec::bytes(40, 1),
        Field::SpecialInfo => FieldSpec::bytes(41, 1),
        Field::Lun => FieldSpec::bytes(48, 1),
        Field::TargetId => FieldSpec::bytes(49, 1),
        Field::LunBytes
        | Field::MirrorScb
        | Field::MirrorLun
        | Field::MirrorTarget
        | Field::Scontrol1
        | Field::BusyTarget
        | Field::SgCachePointer
        | Field::TargetInitiatorId
        | Field::TargetTagNumber
        | Field::TargetStatus
        | Field::TargetTypeCode => return None,
    };
    Some(s)
}
