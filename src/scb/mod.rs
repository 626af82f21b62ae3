//! SCB descriptor instances and field access.
//!
//! A [`Scb`] pairs a 64-byte image with the schema of the variant it was
//! built for and a declared [`SlotUsage`]. The usage selects which
//! interpretation of the overlaid byte regions is live; fields belonging
//! to another interpretation are rejected instead of silently decoding
//! garbage.
// SPDX-License-Identifier: AGPL-3.0-or-later

use thiserror::Error;

use crate::layout::{AliasGroup, Field, Layout, SCB_SIZE, Variant, layout_for};

pub mod accessor;
pub mod pool;

/// Active interpretation of a descriptor slot.
///
/// The payload bytes (8..20) and the trailer reinterpretations only mean
/// one thing at a time; the owning queue context declares which.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotUsage {
    /// Initiator command with the CDB embedded in the SCB.
    Command,
    /// Initiator command whose CDB lives out of line; the SCB carries its
    /// bus address.
    CommandPointer,
    /// Completed command; the payload bytes now hold residue and working
    /// s/g state written back by the sequencer.
    Completion,
    /// Target-mode SCB (establish connection, data delivery, status).
    TargetMode,
}

/// Field access failure. `Undefined` is a configuration-level condition
/// (the variant has no such field); the others are caller mistakes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("field {field:?} is not defined for variant {variant}")]
    Undefined { field: Field, variant: Variant },
    #[error("field {field:?} is not live under {usage:?} usage")]
    UsageMismatch { field: Field, usage: SlotUsage },
    #[error("field {field:?} is {width} bytes wide, use the byte accessors")]
    NotScalar { field: Field, width: u8 },
    #[error("field {field:?} takes {expected} bytes, got {got}")]
    WidthMismatch { field: Field, expected: u8, got: usize },
}

/// One SCB image bound to its variant schema and declared usage.
#[derive(Debug, Clone, PartialEq)]
pub struct Scb {
    layout: &'static Layout,
    usage: SlotUsage,
    buf: [u8; SCB_SIZE],
}

impl Scb {
    /// Zero-filled SCB for the given variant and usage.
    pub fn new(variant: Variant, usage: SlotUsage) -> Self {
        Scb { layout: layout_for(variant), usage, buf: [0u8; SCB_SIZE] }
    }

    /// Wraps an existing image, e.g. one DMA-ed back by the sequencer.
    pub fn from_bytes(variant: Variant, usage: SlotUsage, bytes: [u8; SCB_SIZE]) -> Self {
        Scb { layout: layout_for(variant), usage, buf: bytes }
    }

    pub fn variant(&self) -> Variant {
        self.layout.variant
    }

    pub fn layout(&self) -> &'static Layout {
        self.layout
    }

    pub fn usage(&self) -> SlotUsage {
        self.usage
    }

    /// Redeclares the live interpretation without touching the bytes.
    /// Used when a delivered command comes back and its payload bytes now
    /// carry completion state.
    pub fn reinterpret(&mut self, usage: SlotUsage) {
        self.usage = usage;
    }

    /// Full 64-byte image.
    pub fn as_bytes(&self) -> &[u8; SCB_SIZE] {
        &self.buf
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; SCB_SIZE] {
        &mut self.buf
    }

    /// The prefix the sequencer actually transfers.
    pub fn dma_bytes(&self) -> &[u8] {
        &self.buf[..self.layout.dma_size]
    }

    /// Whether `field` may be read or written under the declared usage.
    /// Does not check that the variant defines the field.
    pub fn usage_allows(&self, field: Field) -> bool {
        match field.alias_group() {
            AliasGroup::None | AliasGroup::Link | AliasGroup::Queue | AliasGroup::SgList => {
                true
            },
            AliasGroup::Payload => match self.usage {
                SlotUsage::Command => matches!(field, Field::CdbInline),
                SlotUsage::CommandPointer => matches!(field, Field::CdbPointer),
                SlotUsage::Completion => matches!(
                    field,
                    Field::Residue | Field::SgCacheWork | Field::SgPointerWork
                ),
                SlotUsage::TargetMode => false,
            },
            AliasGroup::Target => self.usage == SlotUsage::TargetMode,
        }
    }
}
