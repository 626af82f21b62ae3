//! Authoritative SCB byte layouts, one per firmware variant.
//!
//! Every sequencer firmware build expects its own fixed 64-byte SCB image.
//! The byte offsets, field widths, and bit assignments here are part of the
//! hardware DMA contract and must stay bit-exact; where two variants assign
//! the same logical field different bits, both assignments are preserved as
//! authoritative facts.
// SPDX-License-Identifier: AGPL-3.0-or-later

use core::fmt;

/// DCH U320 layout table.
pub mod dch;
/// Downshift U320 layout table.
pub mod downshift;
/// Downshift Enhanced U320 layout table.
pub mod downshift_enh;
/// Establish-connection SCB field tables (target mode only).
pub mod est;
/// Standard U320 layout table.
pub mod standard;
/// Standard Enhanced U320 layout table.
pub mod standard_enh;

/// Total SCB image size. Identical for every variant; the DMA-able prefix
/// the sequencer actually transfers is shorter and variant-specific.
pub const SCB_SIZE: usize = 64;

/// The five mutually incompatible firmware personalities.
///
/// Discriminants match the historical firmware-mode index used to pick a
/// descriptor out of the mode table at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Variant {
    StandardU320 = 0,
    DownshiftU320 = 1,
    StandardEnhU320 = 2,
    DownshiftEnhU320 = 3,
    DchU320 = 4,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::StandardU320,
        Variant::DownshiftU320,
        Variant::StandardEnhU320,
        Variant::DownshiftEnhU320,
        Variant::DchU320,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// True for the variants that carry the target-mode field set.
    pub const fn target_operation(self) -> bool {
        matches!(
            self,
            Variant::StandardU320 | Variant::StandardEnhU320 | Variant::DchU320
        )
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Variant::StandardU320 => "standard-u320",
            Variant::DownshiftU320 => "downshift-u320",
            Variant::StandardEnhU320 => "standard-enh-u320",
            Variant::DownshiftEnhU320 => "downshift-enh-u320",
            Variant::DchU320 => "dch-u320",
        })
    }
}

/// Logical SCB fields.
///
/// Not every variant defines every field; `Layout::spec` answers per
/// variant. Fields that reinterpret the same byte range (the old C unions)
/// carry an [`AliasGroup`] so the accessor can enforce one active
/// interpretation per descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// 8-byte forward pointer to the next SCB in an execution queue.
    NextScbAddress,
    /// 16-bit per-target execution queue link, overlaying the link bytes.
    QExetargNext,
    /// 16-bit next-for-execution index.
    QNext,
    /// 16-bit SCB array site, overlaying `QNext`.
    ArraySite,
    /// Inline CDB bytes (up to 12).
    CdbInline,
    /// Bus address of an out-of-line CDB buffer.
    CdbPointer,
    /// Untransferred byte count; 3 bytes wide, 4 on DCH.
    Residue,
    /// Working s/g cache state for the active segment.
    SgCacheWork,
    /// Working s/g list pointer.
    SgPointerWork,
    /// Attention management byte.
    AtnLength,
    /// CDB length (low 5 bits of its byte).
    CdbLength,
    /// First s/g segment address.
    SgAddress,
    /// First s/g segment length.
    SgLength,
    /// Command IU task attribute (3 bits).
    TaskAttribute,
    /// Command IU task management flags.
    TaskManagement,
    /// Packetized-path SCB flags byte.
    ScbFlags,
    /// Queue tag type, low 2 bits of the control byte.
    TagType,
    /// Remaining control bits of the control byte (aborted, tag enable,
    /// disconnect enable, ...).
    ControlFlags,
    /// S/G cache state stored in the SCB; widens to 16 bits on DCH.
    SgCacheScb,
    /// High byte of the DCH 16-bit s/g cache field.
    SgCachePointer,
    /// Bus address of the s/g list.
    SgListPointer,
    /// Special-function opcode, overlaying the s/g list pointer.
    SpecialOpcode,
    /// Special-function argument byte.
    SpecialInfo,
    /// Six reserved LUN bytes preceding the LUN (packetized IUs).
    LunBytes,
    Lun,
    TargetId,
    /// Mirrored-operation partner SCB.
    MirrorScb,
    MirrorLun,
    MirrorTarget,
    Scontrol1,
    /// Trailer byte consumed by the busy-target array machinery.
    BusyTarget,
    /// Selecting initiator id (target mode).
    TargetInitiatorId,
    /// Received queue tag number (target mode).
    TargetTagNumber,
    /// Status to return to the initiator (target mode).
    TargetStatus,
    /// SCB type code (target mode); bit assignments are variant-specific.
    TargetTypeCode,
}

impl Field {
    pub const ALL: [Field; 35] = [
        Field::NextScbAddress,
        Field::QExetargNext,
        Field::QNext,
        Field::ArraySite,
        Field::CdbInline,
        Field::CdbPointer,
        Field::Residue,
        Field::SgCacheWork,
        Field::SgPointerWork,
        Field::AtnLength,
        Field::CdbLength,
        Field::SgAddress,
        Field::SgLength,
        Field::TaskAttribute,
        Field::TaskManagement,
        Field::ScbFlags,
        Field::TagType,
        Field::ControlFlags,
        Field::SgCacheScb,
        Field::SgCachePointer,
        Field::SgListPointer,
        Field::SpecialOpcode,
        Field::SpecialInfo,
        Field::LunBytes,
        Field::Lun,
        Field::TargetId,
        Field::MirrorScb,
        Field::MirrorLun,
        Field::MirrorTarget,
        Field::Scontrol1,
        Field::BusyTarget,
        Field::TargetInitiatorId,
        Field::TargetTagNumber,
        Field::TargetStatus,
        Field::TargetTypeCode,
    ];

    /// Which overlay region, if any, the field belongs to.
    pub const fn alias_group(self) -> AliasGroup {
        match self {
            Field::NextScbAddress | Field::QExetargNext => AliasGroup::Link,
            Field::QNext | Field::ArraySite => AliasGroup::Queue,
            Field::CdbInline
            | Field::CdbPointer
            | Field::Residue
            | Field::SgCacheWork
            | Field::SgPointerWork => AliasGroup::Payload,
            Field::SgListPointer | Field::SpecialOpcode | Field::SpecialInfo => {
                AliasGroup::SgList
            },
            Field::TargetInitiatorId
            | Field::TargetTagNumber
            | Field::TargetStatus
            | Field::TargetTypeCode => AliasGroup::Target,
            _ => AliasGroup::None,
        }
    }
}

/// Overlay regions of the SCB (the unions of the original firmware
/// definitions). A descriptor slot carries exactly one active
/// interpretation of each region at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasGroup {
    /// No aliasing; the field owns its bytes (or partitions a shared byte
    /// by mask).
    None,
    /// Bytes 0..8: next-SCB address vs. 16-bit queue links.
    Link,
    /// Bytes 20..22: execution link vs. array site.
    Queue,
    /// Bytes 8..20: CDB vs. CDB pointer vs. residue/working state vs.
    /// target-mode header; selected by the declared slot usage.
    Payload,
    /// Bytes 40..48: s/g list pointer vs. special-function opcode.
    SgList,
    /// Target-mode reinterpretations; valid only under target-mode usage.
    Target,
}

/// Byte offset, width and optional bit group of one field within one
/// variant's SCB image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub offset: u8,
    /// Width in bytes; widths above 8 are slice-only (no scalar view).
    pub width: u8,
    /// Bit mask applied to the little-endian scalar value, for fields that
    /// occupy a bit group inside their byte(s).
    pub mask: Option<u64>,
    /// Right shift pairing the mask, so `get` returns the logical value.
    pub shift: u8,
}

impl FieldSpec {
    pub(crate) const fn bytes(offset: u8, width: u8) -> Self {
        FieldSpec { offset, width, mask: None, shift: 0 }
    }

    pub(crate) const fn bits(offset: u8, width: u8, mask: u64, shift: u8) -> Self {
        FieldSpec { offset, width, mask: Some(mask), shift }
    }

    /// Mask of the bits this field owns inside its bytes, unshifted.
    pub const fn owned_mask(&self) -> u64 {
        match self.mask {
            Some(m) => m,
            None => {
                if self.width >= 8 {
                    u64::MAX
                } else {
                    (1u64 << (self.width as u32 * 8)) - 1
                }
            },
        }
    }

    /// Maximum logical value the field can hold.
    pub const fn value_mask(&self) -> u64 {
        self.owned_mask() >> self.shift
    }
}

/// Per-variant SCB type codes used by target mode.
///
/// Standard and Standard-Enhanced firmware assign the data-out/data-in
/// codes in opposite order; this is a deliberate hardware difference and is
/// preserved exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeCodes {
    pub data_out: u8,
    pub data_in: u8,
    pub good_status: u8,
    pub bad_status: u8,
    pub data_out_and_status: u8,
    pub data_in_and_status: u8,
    pub empty_scb: u8,
}

/// Immutable schema for one variant: sizes, the field table, and the
/// variant-specific bit assignments that are not expressible as plain
/// offsets.
#[derive(Debug, PartialEq)]
pub struct Layout {
    pub variant: Variant,
    /// Total SCB image size; fixed for the lifetime of the binding.
    pub size: usize,
    /// Bytes the sequencer DMAs when transferring the SCB.
    pub dma_size: usize,
    /// Bit enabling target mode in the control byte, where supported.
    /// 0x04 on Standard, 0x80 on Standard-Enhanced and DCH.
    pub targetenb_bit: Option<u8>,
    /// Target-mode SCB type code assignments, where supported.
    pub type_codes: Option<TypeCodes>,
    /// "No data transfer" marker for the stored s/g cache field.
    pub sg_cache_nodata: u16,
    /// "Single s/g segment" marker for the stored s/g cache field.
    pub sg_cache_onesgseg: u16,
    spec_fn: fn(Field) -> Option<FieldSpec>,
}

impl Layout {
    /// Field table lookup. `None` means the variant does not define the
    /// field at all; callers treat that as a configuration error.
    pub fn spec(&self, field: Field) -> Option<FieldSpec> {
        (self.spec_fn)(field)
    }

    /// Fields this variant defines, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, FieldSpec)> + '_ {
        Field::ALL
            .iter()
            .filter_map(|f| self.spec(*f).map(|s| (*f, s)))
    }
}

/// Returns the immutable schema for a variant.
///
/// All five variants are compiled in; whether a variant may actually be
/// *selected* is decided by the mode selector against the configured set.
pub const fn layout_for(variant: Variant) -> &'static Layout {
    match variant {
        Variant::StandardU320 => &standard::LAYOUT,
        Variant::DownshiftU320 => &downshift::LAYOUT,
        Variant::StandardEnhU320 => &standard_enh::LAYOUT,
        Variant::DownshiftEnhU320 => &downshift_enh::LAYOUT,
        Variant::DchU320 => &dch::LAYOUT,
    }
}

bitflags::bitflags! {
    /// Control-byte bits shared by every variant. Tag type occupies the
    /// low two bits and is modeled as its own field; the target-enable
    /// bit moves between variants and lives in `Layout::targetenb_bit`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Scontrol: u8 {
        const SPECFUN  = 0x08;
        const ABORTED  = 0x10;
        const TAGENB   = 0x20;
        const DISCENB  = 0x40;
        const TAG_MASK = 0x03;
    }
}

bitflags::bitflags! {
    /// Packetized-path SCB flag bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ScbFlagBits: u8 {
        /// Suppress the wide-residue overrun check on this nexus.
        const IGNORE_WIDE_MSG = 0x01;
    }
}

/// Queue tag types encoded in the low control bits.
pub mod tag {
    pub const SIMPLE: u8 = 0x00;
    pub const HEAD: u8 = 0x01;
    pub const ORDERED: u8 = 0x02;
}

/// CDB length mask; the high bits of the length byte carry cache state.
pub const CDB_LEN_MASK: u8 = 0x1F;

/// Largest CDB that can be embedded in the SCB. Longer CDBs go out of
/// line and the SCB carries their bus address instead.
pub const EMBEDDED_CDB_SIZE: usize = 12;
