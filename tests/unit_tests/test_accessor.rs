use std::fs;

use anyhow::{Context, Result};
use hex::FromHex;
use hex_literal::hex;
use scb_codec_rs::{
    layout::{Field, SCB_SIZE, Scontrol, Variant, tag},
    scb::{FieldError, Scb, SlotUsage},
};

fn load_fixture(path: &str) -> Result<Vec<u8>> {
    let s = fs::read_to_string(path)?;
    let cleaned = s.trim().replace(|c: char| c.is_whitespace(), "");
    Ok(Vec::from_hex(&cleaned)?)
}

#[test]
fn completion_image_reads_back() -> Result<()> {
    let raw = load_fixture("tests/unit_tests/fixtures/standard_completion.hex")?;
    let image: [u8; SCB_SIZE] = raw
        .as_slice()
        .try_into()
        .context("completion fixture must be exactly one SCB")?;

    let scb = Scb::from_bytes(Variant::StandardU320, SlotUsage::Completion, image);

    assert_eq!(scb.get(Field::Residue)?, 0x0512);
    assert_eq!(scb.get(Field::SgCacheWork)?, 0x04);
    assert_eq!(scb.get(Field::SgPointerWork)?, 0x1234_5678);

    // Non-overlay bytes stay readable regardless of slot usage.
    assert_eq!(scb.get(Field::TagType)?, tag::ORDERED as u64);
    assert_eq!(
        scb.get(Field::ControlFlags)?,
        (Scontrol::TAGENB | Scontrol::DISCENB).bits() as u64
    );
    assert_eq!(scb.get(Field::TaskAttribute)?, 0x02);
    Ok(())
}

#[test]
fn completion_usage_rejects_command_overlay() -> Result<()> {
    let raw = load_fixture("tests/unit_tests/fixtures/standard_completion.hex")?;
    let image: [u8; SCB_SIZE] = raw
        .as_slice()
        .try_into()
        .context("completion fixture must be exactly one SCB")?;
    let scb = Scb::from_bytes(Variant::StandardU320, SlotUsage::Completion, image);

    assert_eq!(
        scb.field_bytes(Field::CdbInline),
        Err(FieldError::UsageMismatch {
            field: Field::CdbInline,
            usage: SlotUsage::Completion,
        })
    );
    assert_eq!(
        scb.get(Field::CdbPointer),
        Err(FieldError::UsageMismatch {
            field: Field::CdbPointer,
            usage: SlotUsage::Completion,
        })
    );
    Ok(())
}

#[test]
fn scalar_round_trip_on_every_variant() -> Result<()> {
    for variant in Variant::ALL {
        let mut scb = Scb::new(variant, SlotUsage::Command);
        scb.set(Field::SgAddress, 0x00AB_CDEF)?;
        scb.set(Field::SgLength, 0x01_0203)?;
        scb.set(Field::AtnLength, 0x31)?;
        assert_eq!(scb.get(Field::SgAddress)?, 0x00AB_CDEF);
        assert_eq!(scb.get(Field::SgLength)?, 0x01_0203);
        assert_eq!(scb.get(Field::AtnLength)?, 0x31);
    }
    Ok(())
}

/// Writing one bit group must not disturb its byte-mates, in either
/// write order, even when the byte starts out with garbage in it.
#[test]
fn packed_writes_preserve_byte_mates() -> Result<()> {
    for (first, second) in [
        (Field::TagType, Field::ControlFlags),
        (Field::ControlFlags, Field::TagType),
    ] {
        let mut scb = Scb::new(Variant::StandardU320, SlotUsage::Command);
        scb.as_bytes_mut()[38] = 0xA5;

        let values = [
            (Field::TagType, tag::HEAD as u64),
            (Field::ControlFlags, Scontrol::DISCENB.bits() as u64),
        ];
        let value_of = |field: Field| -> u64 {
            values
                .iter()
                .find(|(f, _)| *f == field)
                .map(|(_, v)| *v)
                .unwrap_or(0)
        };
        scb.set(first, value_of(first))?;
        scb.set(second, value_of(second))?;

        assert_eq!(scb.get(Field::TagType)?, tag::HEAD as u64);
        assert_eq!(
            scb.get(Field::ControlFlags)?,
            Scontrol::DISCENB.bits() as u64
        );
        assert_eq!(scb.as_bytes()[38], 0x40 | tag::HEAD);
    }
    Ok(())
}

/// Ordered-tag task attribute plus disconnect enable, in both write
/// orders: each lands in its own bits of the control bytes.
#[test]
fn task_attribute_and_disconnect_commute() -> Result<()> {
    for flip in [false, true] {
        let mut scb = Scb::new(Variant::StandardU320, SlotUsage::Command);
        let writes: [(Field, u64); 2] = [
            (Field::TaskAttribute, 0b010),
            (Field::ControlFlags, Scontrol::DISCENB.bits() as u64),
        ];
        let order: Vec<_> = if flip {
            writes.iter().rev().collect()
        } else {
            writes.iter().collect()
        };
        for (field, value) in order {
            scb.set(*field, *value)?;
        }
        assert_eq!(scb.get(Field::TaskAttribute)?, 0b010);
        let control = Scontrol::from_bits_retain(scb.get(Field::ControlFlags)? as u8);
        assert!(control.contains(Scontrol::DISCENB));
    }
    Ok(())
}

/// The DCH s/g cache halves partition a 16-bit little-endian word.
#[test]
fn dch_sg_cache_halves_are_independent() -> Result<()> {
    let mut scb = Scb::new(Variant::DchU320, SlotUsage::Command);
    scb.set(Field::SgCacheScb, 0x3C)?;
    scb.set(Field::SgCachePointer, 0x9A)?;
    assert_eq!(scb.get(Field::SgCacheScb)?, 0x3C);
    assert_eq!(scb.get(Field::SgCachePointer)?, 0x9A);
    assert_eq!(scb.as_bytes()[60], 0x3C);
    assert_eq!(scb.as_bytes()[61], 0x9A);
    Ok(())
}

/// Oversized values are truncated to the field's bits, silently, the way
/// the sequencer treats them.
#[test]
fn oversized_values_truncate() -> Result<()> {
    let mut scb = Scb::new(Variant::StandardU320, SlotUsage::Command);
    scb.set(Field::CdbLength, 0xFF)?;
    assert_eq!(scb.get(Field::CdbLength)?, 0x1F);

    scb.set(Field::AtnLength, 0x1_0023)?;
    assert_eq!(scb.get(Field::AtnLength)?, 0x23);
    Ok(())
}

#[test]
fn wide_fields_refuse_the_scalar_view() {
    let scb = Scb::new(Variant::StandardU320, SlotUsage::Command);
    assert_eq!(
        scb.get(Field::CdbInline),
        Err(FieldError::NotScalar { field: Field::CdbInline, width: 12 })
    );
}

#[test]
fn byte_view_enforces_exact_width() -> Result<()> {
    let mut scb = Scb::new(Variant::StandardU320, SlotUsage::Command);
    let cdb = hex!("2A 00 00 12 34 00 00 00 10 00 00 00");
    scb.set_field_bytes(Field::CdbInline, &cdb)?;
    assert_eq!(scb.field_bytes(Field::CdbInline)?, &cdb);

    assert_eq!(
        scb.set_field_bytes(Field::CdbInline, &cdb[..6]),
        Err(FieldError::WidthMismatch {
            field: Field::CdbInline,
            expected: 12,
            got: 6,
        })
    );
    Ok(())
}

#[test]
fn undefined_fields_report_the_variant() {
    let scb = Scb::new(Variant::DownshiftU320, SlotUsage::Command);
    assert_eq!(
        scb.get(Field::Scontrol1),
        Err(FieldError::Undefined {
            field: Field::Scontrol1,
            variant: Variant::DownshiftU320,
        })
    );
}

#[test]
fn reinterpret_switches_the_active_overlay() -> Result<()> {
    let mut scb = Scb::new(Variant::StandardU320, SlotUsage::Command);
    let cdb = [0u8; 12];
    scb.set_field_bytes(Field::CdbInline, &cdb)?;

    scb.reinterpret(SlotUsage::Completion);
    assert!(scb.field_bytes(Field::CdbInline).is_err());
    assert!(scb.get(Field::Residue).is_ok());
    Ok(())
}

#[test]
fn dma_prefix_tracks_the_variant() {
    assert_eq!(
        Scb::new(Variant::StandardEnhU320, SlotUsage::Command)
            .dma_bytes()
            .len(),
        55
    );
    assert_eq!(
        Scb::new(Variant::DchU320, SlotUsage::Command).dma_bytes().len(),
        62
    );
}
