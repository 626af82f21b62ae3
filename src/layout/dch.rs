//! DCH Ultra 320 SCB format layout.
//!
//! The DCH core widens the residue counter to four bytes, always carries a
//! 64-bit first s/g address, moves the task attribute to byte 39, and
//! grows the stored s/g cache state to a 16-bit field at byte 60 whose
//! high byte is the cache pointer.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::layout::{Field, FieldSpec, Layout, SCB_SIZE, TypeCodes, Variant};

pub const TARGETENB: u8 = 0x80;

pub const TYPE_CODES: TypeCodes = TypeCodes {
    data_out: 0x00,
    data_in: 0x01,
    good_status: 0x02,
    bad_status: 0x03,
    data_out_and_status: 0x04,
    data_in_and_status: 0x05,
    empty_scb: 0x07,
};

bitflags::bitflags! {
    /// Flag bits of the 16-bit stored s/g cache field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SgCache: u16 {
        const LAST_SEG       = 0x0001;
        const SEGVALID       = 0x0008;
        const ASEL_MASK      = 0x0030;
        const LAST_LIST      = 0x0040;
        const LAST_ELEMENT   = 0x0080;
        const CACHE_PTR_MASK = 0xFF00;
    }
}

pub static LAYOUT: Layout = Layout {
    variant: Variant::DchU320,
    size: SCB_SIZE,
    dma_size: 62,
    targetenb_bit: Some(TARGETENB),
    type_codes: Some(TYPE_CODES),
    sg_cache_nodata: 0x0001,
    // the DCH sequencer repurposes the last-list bit for this marker
    sg_cache_onesgseg: 0x0040,
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
        Field::Residue => FieldSpec::bytes(8, 4),
        // cache pointer plus flag byte, two bytes of working state
        Field::SgCacheWork => FieldSpec::bytes(14, 2),
        Field::SgPointerWork => FieldSpec::bytes(16, 4),
        Field::AtnLength => FieldSpec::bytes(22, 1),
        Field::CdbLength => FieldSpec::bits(23, 1, 0x1F, 0),
        Field::SgAddress => FieldSpec::bytes(24, 8),
        Field::SgLength => FieldSpec::bytes(32, 4),
        Field::TaskManagement => FieldSpec::bytes(36, 1),
        Field::ScbFlags => FieldSpec::bytes(37, 1),
        Field::TagType => FieldSpec::bits(38, 1, 0x03, 0),
        Field::ControlFlags => FieldSpec::bits(38, 1, 0xFC, 0),
        Field::TaskAttribute => FieldSpec::bits(39, 1, 0x07, 0),
        Field::SgListPointer => FieldSpec::bytes(40, 8),
        Field::SpecialOpcode => FieldSpec::bytes(40, 1),
        Field::SpecialInfo => FieldSpec::bytes(41, 1),
        Field::Lun => FieldSpec::bytes(48, 1),
        Field::TargetId => FieldSpec::bytes(49, 1),
        Field::MirrorScb => FieldSpec::bytes(50, 2),
        Field::MirrorLun => FieldSpec::bytes(52, 1),
        Field::MirrorTarget => FieldSpec::bytes(53, 1),
        Field::Scontrol1 => FieldSpec::bytes(54, 1),
        Field::SgCacheScb => FieldSpec::bits(60, 2, 0x00FF, 0),
        Field::SgCachePointer => FieldSpec::bits(60, 2, 0xFF00, 8),
        Field::BusyTarget => FieldSpec::bytes(63, 1),
        // sinitiator shares the target-id byte on this core
        Field::TargetInitiatorId => FieldSpec::bytes(49, 1),
        Field::TargetTagNumber => FieldSpec::bytes(8, 2),
        Field::TargetStatus => FieldSpec::bytes(11, 1),
        Field::TargetTypeCode => FieldSpec::bits(39, 1, 0x07, 0),
        Field::LunBytes => return None,
    };
    Some(s)
}
