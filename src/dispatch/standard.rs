//! Standard Ultra 320 capability descriptor.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::{
    dispatch::{FirmwareDescriptor, FirmwareProfile, OpTable, ops},
    layout::{Field, SCB_SIZE, Variant, standard::LAYOUT},
};

const PROFILE: FirmwareProfile = FirmwareProfile {
    version: 0,
    scb_size: SCB_SIZE,
    dma_size: 61,
    bta_table: 0x01BF,
    bta_size: 256,
    pass_to_driver: 0x0115,
    active_scb: 0x00FC,
    ret_addr: 0x00F8,
    q_new_pointer: 0x0100,
    sg_status: 0x00FE,
    ent_pt_bitmap: None,
    arpintvalid: Some((0x0158, 0x02)),
};

fn q_exetarg_next_offset() -> u8 {
    LAYOUT.spec(Field::QExetargNext).map(|s| s.offset).unwrap_or(0)
}

fn q_next_offset() -> u8 {
    LAYOUT.spec(Field::QNext).map(|s| s.offset).unwrap_or(0)
}

/// Disconnect delay is the one slot this firmware leaves empty.
pub static DESCRIPTOR: FirmwareDescriptor = FirmwareDescriptor {
    variant: Variant::StandardU320,
    profile: PROFILE,
    ops: OpTable {
        setup_sequencer: Some(ops::setup_sequencer),
        reset_software: Some(ops::reset_software),
        deliver_scb: Some(ops::deliver_scb),
        setup_atn_length: Some(ops::setup_atn_length),
        target_clear_busy: Some(ops::target_clear_busy),
        request_sense: Some(ops::request_sense),
        reset_bta: Some(ops::reset_bta),
        get_config: Some(ops::get_config),
        setup_assign_scb_buffer: Some(ops::setup_assign_scb_buffer),
        assign_scb_descriptor: Some(ops::assign_scb_descriptor),
        free_scb_descriptor: Some(ops::free_scb_descriptor),
        xfer_rate_assign: Some(ops::xfer_rate_assign),
        get_nego_xfer_rate: Some(ops::get_nego_xfer_rate),
        abort_channel: Some(ops::abort_channel),
        abort_hiob: Some(ops::abort_hiob),
        active_abort: Some(ops::active_abort),
        non_pack_active_abort: Some(ops::non_pack_active_abort),
        pack_active_abort: Some(ops::pack_active_abort),
        remove_active_abort: Some(ops::remove_active_abort),
        update_abort_bit_host_mem: Some(ops::update_abort_bit_host_mem),
        update_next_scb_address: Some(ops::update_next_scb_address),
        setup_target_reset: Some(ops::setup_target_reset),
        residue_calc: Some(ops::residue_calc),
        ignore_wide_residue_calc: Some(ops::ignore_wide_residue_calc),
        even_io_length: Some(ops::even_io_length),
        underrun: Some(ops::underrun),
        set_break_point: Some(ops::set_break_point),
        clear_break_point: Some(ops::clear_break_point),
        pack_non_pack_queue_hiob: Some(ops::pack_non_pack_queue_hiob),
        set_intr_factor_threshold: Some(ops::set_intr_factor_threshold),
        set_intr_threshold_count: Some(ops::set_intr_threshold_count),
        update_exe_q_atn_length: Some(ops::update_exe_q_atn_length),
        update_new_q_atn_length: Some(ops::update_new_q_atn_length),
        q_head_pnp_switch_scb: Some(ops::q_head_pnp_switch_scb),
        compare_bus_sg_list_address: Some(ops::compare_bus_sg_list_address),
        set_disconnect_delay: None,
        q_exetarg_next_offset: Some(q_exetarg_next_offset),
        q_next_offset: Some(q_next_offset),
        target_reset_software: Some(ops::target_reset_software),
        target_set_ignore_wide_msg: Some(ops::target_set_ignore_wide_msg),
        target_send_hiob_special: Some(ops::target_send_hiob_special),
        target_get_est_scb_fields: Some(ops::target_get_est_scb_fields),
        target_deliver_est_scb: Some(ops::target_deliver_est_scb),
        target_set_firmware_profile: Some(ops::target_set_firmware_profile),
    },
};
