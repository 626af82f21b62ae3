//! Standard Ultra 320 SCB format layout.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::layout::{Field, FieldSpec, Layout, SCB_SIZE, TypeCodes, Variant};

/// Target-mode enable bit in the control byte. Standard firmware uses bit
/// 2; the enhanced firmware moved it to bit 7.
pub const TARGETENB: u8 = 0x04;

/// SCB type codes for target-mode descriptors.
pub const TYPE_CODES: TypeCodes = TypeCodes {
    data_out: 0x00,
    data_in: 0x01,
    good_status: 0x02,
    bad_status: 0x03,
    data_out_and_status: 0x04,
    data_in_and_status: 0x05,
    empty_scb: 0x07,
};

pub static LAYOUT: Layout = Layout {
    variant: Variant::StandardU320,
    size: SCB_SIZE,
    dma_size: 61,
    targetenb_bit: Some(TARGETENB),
    type_codes: Some(TYPE_CODES),
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
        Field::LunBytes => FieldSpec::bytes(48, 6),
        Field::Lun => FieldSpec::bytes(54, 1),
        Field::TargetId => FieldSpec::bytes(55, 1),
        Field::MirrorScb => FieldSpec::bytes(56, 2),
        Field::MirrorLun => FieldSpec::bytes(58, 1),
        Field::MirrorTarget => FieldSpec::bytes(59, 1),
        Field::Scontrol1 => FieldSpec::bytes(60, 1),
        Field::BusyTarget => FieldSpec::bytes(63, 1),
        Field::TargetInitiatorId => FieldSpec::bytes(8, 1),
        Field::TargetTagNumber => FieldSpec::bytes(9, 2),
        Field::TargetStatus => FieldSpec::bytes(11, 1),
        // stypecode reuses the task-attribute byte on this firmware.
        Field::TargetTypeCode => FieldSpec::bits(35, 1, 0x07, 0),
        Field::SgCachePointer => return None,
    };
    Some(s)
}
