use anyhow::{Context, Result, ensure};
use scb_codec_rs::{
    dispatch::{Op, descriptor_for, state::AdapterState, state::XferRate},
    layout::{Field, Scontrol, Variant, est::EstFlags, layout_for, tag},
    scb::{Scb, SlotUsage},
};

/// Operations the stripped downshift firmware does not carry.
const DOWNSHIFT_ABSENT: [Op; 23] = [
    Op::AbortHiob,
    Op::ActiveAbort,
    Op::NonPackActiveAbort,
    Op::PackActiveAbort,
    Op::RemoveActiveAbort,
    Op::UpdateAbortBitHostMem,
    Op::UpdateNextScbAddress,
    Op::SetupTargetReset,
    Op::SetBreakPoint,
    Op::ClearBreakPoint,
    Op::PackNonPackQueueHiob,
    Op::SetIntrFactorThreshold,
    Op::SetIntrThresholdCount,
    Op::CompareBusSgListAddress,
    Op::SetDisconnectDelay,
    Op::QExetargNextOffset,
    Op::QNextOffset,
    Op::TargetResetSoftware,
    Op::TargetSetIgnoreWideMsg,
    Op::TargetSendHiobSpecial,
    Op::TargetGetEstScbFields,
    Op::TargetDeliverEstScb,
    Op::TargetSetFirmwareProfile,
];

fn audit_absences(variant: Variant, absent: &[Op]) -> Result<()> {
    let desc = descriptor_for(variant);
    for op in Op::ALL {
        let expected = !absent.contains(&op);
        ensure!(
            desc.supports(op) == expected,
            "{variant}: {op:?} should be {}",
            if expected { "present" } else { "absent" }
        );
    }
    Ok(())
}

#[test]
fn slot_presence_matches_each_firmware() -> Result<()> {
    audit_absences(Variant::StandardU320, &[Op::SetDisconnectDelay])?;
    audit_absences(Variant::StandardEnhU320, &[])?;
    audit_absences(Variant::DchU320, &[Op::SetDisconnectDelay])?;
    audit_absences(Variant::DownshiftU320, &DOWNSHIFT_ABSENT)?;
    audit_absences(Variant::DownshiftEnhU320, &DOWNSHIFT_ABSENT)?;
    Ok(())
}

#[test]
fn profiles_carry_the_scratch_map() {
    let standard = &descriptor_for(Variant::StandardU320).profile;
    assert_eq!(standard.bta_table, 0x01BF);
    assert_eq!(standard.bta_size, 256);
    assert_eq!(standard.pass_to_driver, 0x0115);
    assert_eq!(standard.ret_addr, 0x00F8);
    assert_eq!(standard.arpintvalid, Some((0x0158, 0x02)));

    // The downshift sequencer has a shorter busy-target array and flags
    // ARP interrupts on a different bit.
    let downshift = &descriptor_for(Variant::DownshiftU320).profile;
    assert_eq!(downshift.bta_table, 0x016F);
    assert_eq!(downshift.arpintvalid, Some((0x0158, 0x04)));

    // DCH relocates the working registers and has no ARP-valid flag.
    let dch = &descriptor_for(Variant::DchU320).profile;
    assert_eq!(dch.ret_addr, 0x01C0);
    assert_eq!(dch.sg_status, 0x01C2);
    assert_eq!(dch.active_scb, 0x01C4);
    assert_eq!(dch.arpintvalid, None);
}

#[test]
fn profile_dma_size_matches_the_layout() {
    for variant in Variant::ALL {
        assert_eq!(
            descriptor_for(variant).profile.dma_size,
            layout_for(variant).dma_size,
            "{variant}"
        );
    }
}

#[test]
fn atn_length_counts_identify_and_tag_messages() -> Result<()> {
    let desc = descriptor_for(Variant::StandardU320);

    let mut untagged = Scb::new(Variant::StandardU320, SlotUsage::Command);
    desc.setup_atn_length(&mut untagged, 0)
        .done()
        .context("standard firmware must support atn setup")??;
    assert_eq!(untagged.get(Field::AtnLength)?, 1);

    let mut tagged = Scb::new(Variant::StandardU320, SlotUsage::Command);
    tagged.set(Field::ControlFlags, Scontrol::TAGENB.bits() as u64)?;
    desc.setup_atn_length(&mut tagged, 3)
        .done()
        .context("standard firmware must support atn setup")??;
    assert_eq!(tagged.get(Field::AtnLength)?, 1 + 2 + 3);
    Ok(())
}

#[test]
fn request_sense_rewrites_to_untagged_cdb() -> Result<()> {
    let desc = descriptor_for(Variant::StandardU320);
    let mut scb = Scb::new(Variant::StandardU320, SlotUsage::Command);
    scb.set(
        Field::ControlFlags,
        (Scontrol::TAGENB | Scontrol::DISCENB).bits() as u64,
    )?;
    scb.set(Field::TagType, tag::ORDERED as u64)?;

    desc.request_sense(&mut scb, 18)
        .done()
        .context("standard firmware must support auto-sense")??;

    let cdb = scb.field_bytes(Field::CdbInline)?;
    assert_eq!(cdb[0], 0x03);
    assert_eq!(cdb[4], 18);
    assert_eq!(scb.get(Field::CdbLength)?, 6);
    assert_eq!(scb.get(Field::ControlFlags)?, 0);
    assert_eq!(scb.get(Field::TagType)?, 0);
    Ok(())
}

#[test]
fn queue_offsets_reflect_the_layout() -> Result<()> {
    let desc = descriptor_for(Variant::StandardU320);
    let exetarg = desc
        .q_exetarg_next_offset()
        .done()
        .context("standard firmware must expose queue offsets")?;
    let next = desc
        .q_next_offset()
        .done()
        .context("standard firmware must expose queue offsets")?;
    assert_eq!(exetarg, 0);
    assert_eq!(next, 20);
    Ok(())
}

#[test]
fn downshift_skips_target_and_abort_paths() {
    let desc = descriptor_for(Variant::DownshiftEnhU320);
    let mut state = AdapterState::new();
    let mut scb = Scb::new(Variant::DownshiftEnhU320, SlotUsage::TargetMode);

    assert!(desc.target_deliver_est_scb(&mut state, &mut scb).is_unsupported());
    assert!(desc.abort_hiob(&mut state, 3, 0).is_unsupported());
    assert!(desc.set_break_point(&mut state, 1).is_unsupported());
    assert_eq!(state.breakpoints, 0);
    assert_eq!(state.delivered, 0);
}

#[test]
fn est_fields_round_trip_on_standard() -> Result<()> {
    let mut scb = Scb::new(Variant::StandardU320, SlotUsage::TargetMode);
    {
        let bytes = scb.as_bytes_mut();
        bytes[16] = 7; // selecting initiator
        bytes[17] = tag::ORDERED;
        bytes[18] = 0x34;
        bytes[19] = 0x12;
        bytes[22] = 10;
        bytes[23] = 0xC5; // identify with LUN 5
        bytes[33] = (EstFlags::TAG_RCVD | EstFlags::LUNTAR).bits();
        bytes[34] = 0x02;
    }

    let desc = descriptor_for(Variant::StandardU320);
    let conn = desc
        .target_get_est_scb_fields(&scb)
        .done()
        .context("standard firmware must read establish-connection SCBs")??;

    assert_eq!(conn.initiator_id, Some(7));
    assert_eq!(conn.tag_type, Some(tag::ORDERED));
    assert_eq!(conn.tag_number, Some(0x1234));
    assert_eq!(conn.cdb_length, Some(10));
    assert_eq!(conn.identify_msg, Some(0xC5));
    assert_eq!(conn.flags, Some(EstFlags::TAG_RCVD | EstFlags::LUNTAR));
    assert_eq!(conn.status, Some(0x02));
    Ok(())
}

/// The enhanced establish format only stores the type code and SCB
/// address; the rest of the connection details come back elsewhere.
#[test]
fn est_fields_are_sparse_on_enhanced() -> Result<()> {
    let scb = Scb::new(Variant::StandardEnhU320, SlotUsage::TargetMode);
    let desc = descriptor_for(Variant::StandardEnhU320);
    let conn = desc
        .target_get_est_scb_fields(&scb)
        .done()
        .context("enhanced firmware must read establish-connection SCBs")??;

    assert_eq!(conn.initiator_id, None);
    assert_eq!(conn.tag_number, None);
    assert_eq!(conn.status, None);
    Ok(())
}

#[test]
fn est_delivery_arms_target_mode() -> Result<()> {
    let mut state = AdapterState::new();
    let desc = descriptor_for(Variant::StandardU320);
    let mut scb = Scb::new(Variant::StandardU320, SlotUsage::TargetMode);

    desc.target_deliver_est_scb(&mut state, &mut scb)
        .done()
        .context("standard firmware must park establish-connection SCBs")??;

    assert_eq!(scb.get(Field::TargetTypeCode)?, 0x07);
    // Standard cores arm target mode with bit 0x04 of the control byte.
    assert_ne!(scb.get(Field::ControlFlags)? & 0x04, 0);
    assert_eq!(state.delivered, 1);
    Ok(())
}

#[test]
fn xfer_rates_are_tracked_per_target() -> Result<()> {
    let desc = descriptor_for(Variant::DownshiftU320);
    let mut state = AdapterState::new();

    let rate = XferRate { period: 0x08, offset: 0x7F, ppr_options: 0x02 };
    desc.xfer_rate_assign(&mut state, 5, rate)
        .done()
        .context("downshift firmware must track transfer rates")?;

    let seen = desc
        .get_nego_xfer_rate(&state, 5)
        .done()
        .context("downshift firmware must report transfer rates")?;
    assert_eq!(seen, rate);

    let untouched = desc
        .get_nego_xfer_rate(&state, 6)
        .done()
        .context("downshift firmware must report transfer rates")?;
    assert_eq!(untouched, XferRate::ASYNC);
    Ok(())
}

#[test]
fn sg_parity_stops_at_the_list_delimiter() -> Result<()> {
    let desc = descriptor_for(Variant::StandardU320);

    let even = desc
        .even_io_length(&[512, 513, 0x8000_0003, 99])
        .done()
        .context("standard firmware must audit s/g parity")?;
    // 513 and the delimited 3 are odd; the trailing 99 is past the list.
    assert!(even);

    let odd = desc
        .even_io_length(&[512, 0x8000_0003])
        .done()
        .context("standard firmware must audit s/g parity")?;
    assert!(!odd);
    Ok(())
}

#[test]
fn breakpoints_toggle_their_bitmap_slot() -> Result<()> {
    let desc = descriptor_for(Variant::DchU320);
    let mut state = AdapterState::new();

    desc.set_break_point(&mut state, 3)
        .done()
        .context("dch firmware must support breakpoints")?;
    assert_eq!(state.breakpoints, 1 << 3);

    desc.clear_break_point(&mut state, 3)
        .done()
        .context("dch firmware must support breakpoints")?;
    assert_eq!(state.breakpoints, 0);
    Ok(())
}

#[test]
fn abort_list_deduplicates() -> Result<()> {
    let desc = descriptor_for(Variant::StandardU320);
    let mut state = AdapterState::new();

    desc.active_abort(&mut state, 9, 0)
        .done()
        .context("standard firmware must support active aborts")?;
    desc.pack_active_abort(&mut state, 9)
        .done()
        .context("standard firmware must support active aborts")?;
    assert_eq!(state.aborting, vec![9]);

    desc.remove_active_abort(&mut state, 9)
        .done()
        .context("standard firmware must support active aborts")?;
    assert!(state.aborting.is_empty());
    Ok(())
}
