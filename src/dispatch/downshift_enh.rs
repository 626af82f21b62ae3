//! Downshift Enhanced Ultra 320 capability descriptor.
//!
//! Same capability set as the plain downshift firmware on the 55-byte
//! enhanced SCB image.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::{
    dispatch::{FirmwareDescriptor, FirmwareProfile, OpTable, ops},
    layout::{SCB_SIZE, Variant},
};

const PROFILE: FirmwareProfile = FirmwareProfile {
    version: 0,
    scb_size: SCB_SIZE,
    dma_size: 55,
    bta_table: 0x016F,
    bta_size: 256,
    pass_to_driver: 0x0115,
    active_scb: 0x00FC,
    ret_addr: 0x00F8,
    q_new_pointer: 0x0100,
    sg_status: 0x00FE,
    ent_pt_bitmap: None,
    arpintvalid: Some((0x0158, 0x04)),
};

pub static DESCRIPTOR: FirmwareDescriptor = FirmwareDescriptor {
    variant: Variant::DownshiftEnhU320,
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
        abort_hiob: None,
        active_abort: None,
        non_pack_active_abort: None,
        pack_active_abort: None,
        remove_active_abort: None,
        update_abort_bit_host_mem: None,
        update_next_scb_address: None,
        setup_target_reset: None,
        residue_calc: Some(ops::residue_calc),
        ignore_wide_residue_calc: Some(ops::ignore_wide_residue_calc),
        even_io_length: Some(ops::even_io_length),
        underrun: Some(ops::underrun),
        set_break_point: None,
        clear_break_point: None,
        pack_non_pack_queue_hiob: None,
        set_intr_factor_threshold: None,
        set_intr_threshold_count: None,
        update_exe_q_atn_length: Some(ops::update_exe_q_atn_length),
        update_new_q_atn_length: Some(ops::update_new_q_atn_length),
        q_head_pnp_switch_scb: Some(ops::q_head_pnp_switch_scb),
        compare_bus_sg_list_address: None,
        set_disconnect_delay: None,
        q_exetarg_next_offset: None,
        q_next_offset: None,
        target_reset_software: None,
        target_set_ignore_wide_msg: None,
        target_send_hiob_special: None,
        target_get_est_scb_fields: None,
        target_deliver_est_scb: None,
        target_set_firmware_profile: None,
    },
};
