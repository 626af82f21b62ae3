//! Downshift Enhanced Ultra 320 SCB format layout.
//!
//! Byte-for-byte the downshift layout; the enhanced sequencer only DMAs a
//! shorter 55-byte prefix. The variants still bind distinct dispatch
//! tables and must never be conflated.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::layout::{Field, FieldSpec, Layout, SCB_SIZE, Variant, downshift};

pub static LAYOUT: Layout = Layout {
    variant: Variant::DownshiftEnhU320,
    size: SCB_SIZE,
    dma_size: 55,
    targetenb_bit: None,
    type_codes: None,
    sg_cache_nodata: 0x0001,
    sg_cache_onesgseg: 0x0002,
    spec_fn: spec,
};

fn spec(field: Field) -> Option<FieldSpec> {
    downshift::LAYOUT.spec(field)
}
