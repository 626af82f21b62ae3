use anyhow::{Result, ensure};
use scb_codec_rs::layout::{
    AliasGroup, Field, SCB_SIZE, Variant, layout_for,
};

#[test]
fn every_spec_stays_inside_the_image() -> Result<()> {
    for variant in Variant::ALL {
        let layout = layout_for(variant);
        for field in Field::ALL {
            if let Some(spec) = layout.spec(field) {
                let end = spec.offset as usize + spec.width as usize;
                ensure!(
                    end <= SCB_SIZE,
                    "{variant} {field:?} runs past the image: offset {} width {}",
                    spec.offset,
                    spec.width
                );
                if let Some(mask) = spec.mask {
                    ensure!(
                        spec.width as usize <= 8,
                        "{variant} {field:?} carries a mask on a slice-only field"
                    );
                    let byte_span = if spec.width == 8 {
                        u64::MAX
                    } else {
                        (1u64 << (spec.width as u32 * 8)) - 1
                    };
                    ensure!(
                        mask & !byte_span == 0,
                        "{variant} {field:?} mask 0x{mask:X} exceeds its width"
                    );
                }
            }
        }
    }
    Ok(())
}

/// Fields outside the union overlays must never claim the same bit. Bit
/// groups sharing a byte (tag type vs. the rest of the control byte, the
/// two halves of the DCH s/g cache word) have to partition it instead.
#[test]
fn non_aliased_fields_never_collide() -> Result<()> {
    for variant in Variant::ALL {
        let layout = layout_for(variant);
        let mut claimed: Vec<Vec<(Field, u8)>> = vec![Vec::new(); SCB_SIZE];

        for field in Field::ALL {
            if field.alias_group() != AliasGroup::None {
                continue;
            }
            let Some(spec) = layout.spec(field) else {
                continue;
            };
            for i in 0..spec.width as usize {
                let byte_bits = match spec.mask {
                    Some(mask) => ((mask >> (i * 8)) & 0xFF) as u8,
                    None => 0xFF,
                };
                if byte_bits != 0 {
                    claimed[spec.offset as usize + i].push((field, byte_bits));
                }
            }
        }

        for (offset, owners) in claimed.iter().enumerate() {
            for (i, (a, bits_a)) in owners.iter().enumerate() {
                for (b, bits_b) in &owners[i + 1..] {
                    ensure!(
                        bits_a & bits_b == 0,
                        "{variant} byte {offset}: {a:?} and {b:?} both claim bits 0x{:02X}",
                        bits_a & bits_b
                    );
                }
            }
        }
    }
    Ok(())
}

#[test]
fn dma_prefix_matches_each_firmware() {
    assert_eq!(layout_for(Variant::StandardU320).dma_size, 61);
    assert_eq!(layout_for(Variant::DownshiftU320).dma_size, 61);
    assert_eq!(layout_for(Variant::StandardEnhU320).dma_size, 55);
    assert_eq!(layout_for(Variant::DownshiftEnhU320).dma_size, 55);
    assert_eq!(layout_for(Variant::DchU320).dma_size, 62);
}

/// The hardware assigns different target-enable bits on different cores;
/// both assignments are load-bearing and must survive any refactor.
#[test]
fn target_enable_bit_differs_by_core() {
    assert_eq!(layout_for(Variant::StandardU320).targetenb_bit, Some(0x04));
    assert_eq!(
        layout_for(Variant::StandardEnhU320).targetenb_bit,
        Some(0x80)
    );
    assert_eq!(layout_for(Variant::DchU320).targetenb_bit, Some(0x80));
    assert_eq!(layout_for(Variant::DownshiftU320).targetenb_bit, None);
    assert_eq!(layout_for(Variant::DownshiftEnhU320).targetenb_bit, None);
}

/// Standard and Standard-Enhanced firmware disagree on which type code
/// means data-in versus data-out. The inversion is authoritative.
#[test]
fn type_code_inversion_is_preserved() -> Result<()> {
    let std_codes = layout_for(Variant::StandardU320)
        .type_codes
        .ok_or_else(|| anyhow::anyhow!("standard firmware must define type codes"))?;
    let enh_codes = layout_for(Variant::StandardEnhU320)
        .type_codes
        .ok_or_else(|| anyhow::anyhow!("enhanced firmware must define type codes"))?;

    assert_eq!(std_codes.data_out, 0);
    assert_eq!(std_codes.data_in, 1);
    assert_eq!(enh_codes.data_in, 0);
    assert_eq!(enh_codes.data_out, 1);

    // Downshift firmware has no target mode and no type codes at all.
    assert!(layout_for(Variant::DownshiftU320).type_codes.is_none());
    assert!(layout_for(Variant::DownshiftEnhU320).type_codes.is_none());
    Ok(())
}

/// The stored type-code byte moved between firmware generations.
#[test]
fn stored_type_code_byte_moved_between_generations() -> Result<()> {
    let at = |variant: Variant| -> Result<u8> {
        layout_for(variant)
            .spec(Field::TargetTypeCode)
            .map(|s| s.offset)
            .ok_or_else(|| anyhow::anyhow!("{variant} must place the type code"))
    };
    assert_eq!(at(Variant::StandardU320)?, 35);
    assert_eq!(at(Variant::StandardEnhU320)?, 10);
    assert_eq!(at(Variant::DchU320)?, 39);
    Ok(())
}

#[test]
fn queue_aliases_share_their_bytes() -> Result<()> {
    for variant in Variant::ALL {
        let layout = layout_for(variant);
        let q_next = layout
            .spec(Field::QNext)
            .ok_or_else(|| anyhow::anyhow!("{variant} must define QNext"))?;
        let array_site = layout
            .spec(Field::ArraySite)
            .ok_or_else(|| anyhow::anyhow!("{variant} must define ArraySite"))?;
        assert_eq!(q_next.offset, array_site.offset);
        assert_eq!(q_next.width, array_site.width);

        let link = layout
            .spec(Field::NextScbAddress)
            .ok_or_else(|| anyhow::anyhow!("{variant} must define the link field"))?;
        let exetarg = layout
            .spec(Field::QExetargNext)
            .ok_or_else(|| anyhow::anyhow!("{variant} must define QExetargNext"))?;
        assert_eq!(link.offset, exetarg.offset);
    }
    Ok(())
}
