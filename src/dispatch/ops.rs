//! Shared operation handlers.
//!
//! The variants differ in their SCB tables, not in the host-side logic,
//! so most slots point at these functions; the layout bound to the SCB
//! supplies the per-variant offsets and widths (residue width, attention
//! byte position, link field). Handlers that only some variants carry
//! still live here; absence is expressed in the per-variant tables.
// SPDX-License-Identifier: AGPL-3.0-or-later

use tracing::{debug, info, warn};

use crate::{
    dispatch::{
        EstConnection, FirmwareProfile,
        state::{AdapterState, XferRate},
    },
    layout::{
        Field, ScbFlagBits, Scontrol,
        est::{EstField, EstFlags, est_layout_for},
    },
    scb::{FieldError, Scb, pool::ScbNumber},
};

/// Task management flag raised for a target reset request.
pub const TM_TARGET_RESET: u64 = 0x20;

/// REQUEST SENSE opcode and its fixed 6-byte CDB length.
const REQUEST_SENSE_OPCODE: u8 = 0x03;
const REQUEST_SENSE_CDB_LEN: u8 = 6;

/// S/G length delimiter bit marking the last list element.
const SG_LAST_ELEMENT: u32 = 0x8000_0000;

pub fn setup_sequencer(state: &mut AdapterState, profile: &FirmwareProfile) {
    info!(
        pass_to_driver = profile.pass_to_driver,
        ret_addr = profile.ret_addr,
        q_new_pointer = profile.q_new_pointer,
        "sequencer scratch programmed"
    );
    state.sequencer_ready = true;
}

/// Re-initializes the host work area after a chip reset. Negotiated
/// rates survive; everything tied to in-flight commands does not.
pub fn reset_software(state: &mut AdapterState) {
    state.bta.reset();
    state.breakpoints = 0;
    state.delivered = 0;
    state.done_queue.clear();
    state.que_pass_cnt = 0;
    state.aborting.clear();
    state.assigned_descriptors = 0;
    state.pnp_switches = 0;
    state.atn_updates = 0;
    state.sequencer_ready = false;
    state.target_profile_set = false;
    debug!("software state reset");
}

pub fn deliver_scb(state: &mut AdapterState, scb: &Scb) {
    state.delivered += 1;
    debug!(variant = %scb.variant(), delivered = state.delivered, "scb delivered");
}

/// Computes the byte count to assert ATN for during selection: one
/// identify message, two tag message bytes when the command is tagged,
/// plus any negotiation message bytes the caller queued.
pub fn setup_atn_length(scb: &mut Scb, nego_bytes: u8) -> Result<(), FieldError> {
    let control = scb.get(Field::ControlFlags)? as u8;
    let tagged = Scontrol::from_bits_retain(control).contains(Scontrol::TAGENB);
    let atn = 1 + if tagged { 2 } else { 0 } + nego_bytes as u64;
    scb.set(Field::AtnLength, atn)
}

pub fn target_clear_busy(state: &mut AdapterState, target: u8, lun: u8) {
    state.bta.clear(target, lun);
    debug!(target, lun, "busy target cleared");
}

/// Rewrites the SCB into an untagged REQUEST SENSE with disconnect
/// disabled, as the auto-sense path does.
pub fn request_sense(scb: &mut Scb, sense_len: u8) -> Result<(), FieldError> {
    let mut cdb = [0u8; 12];
    cdb[0] = REQUEST_SENSE_OPCODE;
    cdb[4] = sense_len;
    scb.set_field_bytes(Field::CdbInline, &cdb)?;
    scb.set(Field::CdbLength, REQUEST_SENSE_CDB_LEN as u64)?;
    let control = scb.get(Field::ControlFlags)? as u8;
    let stripped = Scontrol::from_bits_retain(control)
        .difference(Scontrol::DISCENB | Scontrol::TAGENB);
    scb.set(Field::ControlFlags, stripped.bits() as u64)?;
    scb.set(Field::TagType, 0)
}

pub fn reset_bta(state: &mut AdapterState) {
    state.bta.reset();
    debug!("busy target array reset");
}

pub fn get_config(state: &mut AdapterState, profile: &FirmwareProfile) {
    debug!(
        version = profile.version,
        bta_table = profile.bta_table,
        bta_size = profile.bta_size,
        "configuration read"
    );
    state.intr_factor_threshold = 0;
    state.intr_threshold_count = 0;
}

pub fn setup_assign_scb_buffer(state: &mut AdapterState) {
    state.buffer_pool_ready = true;
    state.assigned_descriptors = 0;
}

pub fn assign_scb_descriptor(state: &mut AdapterState) {
    state.assigned_descriptors += 1;
}

pub fn free_scb_descriptor(state: &mut AdapterState) {
    state.assigned_descriptors = state.assigned_descriptors.saturating_sub(1);
}

pub fn xfer_rate_assign(state: &mut AdapterState, target: u8, rate: XferRate) {
    state.xfer_rates[target as usize % state.xfer_rates.len()] = rate;
    debug!(target, period = rate.period, offset = rate.offset, "xfer rate assigned");
}

pub fn get_nego_xfer_rate(state: &AdapterState, target: u8) -> XferRate {
    state.xfer_rates[target as usize % state.xfer_rates.len()]
}

/// Abandons every command outstanding on the channel.
pub fn abort_channel(state: &mut AdapterState, ha_status: u8) {
    warn!(ha_status, "channel abort");
    state.aborting.clear();
    state.done_queue.clear();
    state.bta.reset();
}

pub fn abort_hiob(state: &mut AdapterState, number: ScbNumber, ha_status: u8) {
    warn!(number, ha_status, "abort requested");
    mark_aborting(state, number);
}

pub fn active_abort(state: &mut AdapterState, number: ScbNumber, ha_status: u8) {
    warn!(number, ha_status, "active abort");
    mark_aborting(state, number);
}

pub fn non_pack_active_abort(state: &mut AdapterState, number: ScbNumber) {
    mark_aborting(state, number);
}

pub fn pack_active_abort(state: &mut AdapterState, number: ScbNumber) {
    mark_aborting(state, number);
}

pub fn remove_active_abort(state: &mut AdapterState, number: ScbNumber) {
    state.aborting.retain(|n| *n != number);
}

fn mark_aborting(state: &mut AdapterState, number: ScbNumber) {
    if !state.aborting.contains(&number) {
        state.aborting.push(number);
    }
}

/// Raises the aborted bit in the host-memory copy of the SCB so the
/// sequencer sees the abort on its next fetch.
pub fn update_abort_bit_host_mem(scb: &mut Scb) -> Result<(), FieldError> {
    let control = scb.get(Field::ControlFlags)? as u8;
    let raised = Scontrol::from_bits_retain(control) | Scontrol::ABORTED;
    scb.set(Field::ControlFlags, raised.bits() as u64)
}

pub fn update_next_scb_address(scb: &mut Scb, bus_address: u64) -> Result<(), FieldError> {
    scb.set(Field::NextScbAddress, bus_address)
}

/// Converts the SCB into a target-reset task management request; reset
/// requests are never tagged.
pub fn setup_target_reset(scb: &mut Scb) -> Result<(), FieldError> {
    scb.set(Field::TaskManagement, TM_TARGET_RESET)?;
    let control = scb.get(Field::ControlFlags)? as u8;
    let stripped = Scontrol::from_bits_retain(control).difference(Scontrol::TAGENB);
    scb.set(Field::ControlFlags, stripped.bits() as u64)?;
    scb.set(Field::TagType, 0)
}

/// Residue left by the sequencer; the bound layout decides whether the
/// counter is three or four bytes wide.
pub fn residue_calc(scb: &Scb) -> Result<u64, FieldError> {
    scb.get(Field::Residue)
}

/// IGNORE WIDE RESIDUE adjustment: the last wide transfer moved one byte
/// that was not wanted, so an even-length I/O gains a byte of residue.
pub fn ignore_wide_residue_calc(scb: &mut Scb, even_length: bool) -> Result<(), FieldError> {
    if even_length {
        let residue = scb.get(Field::Residue)?;
        scb.set(Field::Residue, residue + 1)?;
    }
    Ok(())
}

/// Walks the s/g element lengths; the I/O is even when an even number of
/// elements have odd length. The high bit delimits the list.
pub fn even_io_length(sg_lengths: &[u32]) -> bool {
    let mut odd = 0u32;
    for len in sg_lengths {
        if len & 1 == 1 {
            odd += 1;
        }
        if len & SG_LAST_ELEMENT != 0 {
            break;
        }
    }
    odd % 2 == 0
}

pub fn underrun(expected: u64, transferred: u64) -> bool {
    transferred < expected
}

pub fn set_break_point(state: &mut AdapterState, entry: u8) {
    state.breakpoints |= 1u32 << (entry as u32 % 32);
    debug!(entry, "breakpoint set");
}

pub fn clear_break_point(state: &mut AdapterState, entry: u8) {
    state.breakpoints &= !(1u32 << (entry as u32 % 32));
    debug!(entry, "breakpoint cleared");
}

/// The target still holds packetized commands while a non-packetized
/// switch is pending; the command goes back to the head of the queue.
pub fn pack_non_pack_queue_hiob(state: &mut AdapterState, number: ScbNumber) {
    state.pnp_switches += 1;
    debug!(number, "pack/non-pack switch requeue");
}

pub fn set_intr_factor_threshold(state: &mut AdapterState, value: u8) {
    state.intr_factor_threshold = value;
}

pub fn set_intr_threshold_count(state: &mut AdapterState, value: u8) {
    state.intr_threshold_count = value;
}

pub fn update_exe_q_atn_length(state: &mut AdapterState, target: u8) {
    state.atn_updates += 1;
    debug!(target, "execution queue atn_length updated");
}

pub fn update_new_q_atn_length(state: &mut AdapterState, target: u8) {
    state.atn_updates += 1;
    debug!(target, "new queue atn_length updated");
}

pub fn q_head_pnp_switch_scb(state: &mut AdapterState, number: ScbNumber) {
    state.pnp_switches += 1;
    debug!(number, "switched scb queued to head");
}

/// Returns true when the two bus addresses differ. Used on 64-bit
/// configurations to detect an s/g list crossing away from its mapping.
pub fn compare_bus_sg_list_address(bus_address: u64, sg_list_address: u64) -> bool {
    bus_address != sg_list_address
}

pub fn set_disconnect_delay(state: &mut AdapterState, delay: u8) {
    state.disconnect_delay = delay;
    debug!(delay, "disconnect delay set");
}

pub fn target_reset_software(state: &mut AdapterState) {
    state.bta.reset();
    state.target_profile_set = false;
    debug!("target mode software reset");
}

/// Marks the descriptor so the sequencer suppresses the wide-residue
/// overrun check on this nexus.
pub fn target_set_ignore_wide_msg(scb: &mut Scb) -> Result<(), FieldError> {
    let flags = scb.get(Field::ScbFlags)? as u8;
    scb.set(
        Field::ScbFlags,
        (flags | ScbFlagBits::IGNORE_WIDE_MSG.bits()) as u64,
    )
}

pub fn target_send_hiob_special(state: &mut AdapterState, number: ScbNumber) {
    state.delivered += 1;
    debug!(number, "special hiob sent");
}

/// Reads the connection details out of a completed establish-connection
/// SCB, taking only the fields the variant's establish format exposes.
pub fn target_get_est_scb_fields(scb: &Scb) -> Result<EstConnection, FieldError> {
    let est = est_layout_for(scb.variant()).ok_or(FieldError::Undefined {
        field: Field::TargetTypeCode,
        variant: scb.variant(),
    })?;
    let byte = |field: EstField| -> Option<u8> {
        est.spec(field)
            .map(|s| scb.as_bytes()[s.offset as usize])
    };
    let mut conn = EstConnection {
        initiator_id: byte(EstField::InitiatorId),
        tag_type: byte(EstField::TagType),
        cdb_length: byte(EstField::CdbLength),
        identify_msg: byte(EstField::IdentifyMsg),
        last_byte: byte(EstField::LastByte),
        flags: byte(EstField::Flags).map(EstFlags::from_bits_retain),
        status: byte(EstField::Status),
        tag_number: None,
    };
    if let Some(s) = est.spec(EstField::TagNumber) {
        let off = s.offset as usize;
        let raw = [scb.as_bytes()[off], scb.as_bytes()[off + 1]];
        conn.tag_number = Some(u16::from_le_bytes(raw));
    }
    Ok(conn)
}

/// Parks an empty SCB on the sequencer to catch the next selection: the
/// type code becomes the variant's empty-SCB code and target mode is
/// enabled in the control byte.
pub fn target_deliver_est_scb(state: &mut AdapterState, scb: &mut Scb) -> Result<(), FieldError> {
    let layout = scb.layout();
    let empty = layout
        .type_codes
        .map(|t| t.empty_scb)
        .ok_or(FieldError::Undefined {
            field: Field::TargetTypeCode,
            variant: scb.variant(),
        })?;
    scb.set(Field::TargetTypeCode, empty as u64)?;
    if let Some(bit) = layout.targetenb_bit {
        let control = scb.get(Field::ControlFlags)? as u8;
        scb.set(Field::ControlFlags, (control | bit) as u64)?;
    }
    state.delivered += 1;
    debug!(variant = %scb.variant(), "establish scb delivered");
    Ok(())
}

pub fn target_set_firmware_profile(state: &mut AdapterState, profile: &FirmwareProfile) {
    info!(version = profile.version, "target mode profile applied");
    state.target_profile_set = true;
}
