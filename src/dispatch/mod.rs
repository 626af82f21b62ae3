//! Per-firmware capability dispatch.
//!
//! Each variant publishes one static [`FirmwareDescriptor`]: the firmware
//! profile constants plus an [`OpTable`] with one typed `Option<fn ...>`
//! slot per operation. An empty slot means the firmware does not support
//! the behavior; callers receive [`Invoke::Unsupported`] and short-circuit
//! instead of treating it as an error. Tables are struct literals, built
//! once, never mutated.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::{
    layout::{Variant, est::EstFlags},
    scb::{FieldError, Scb, pool::ScbNumber},
};

pub mod ops;
pub mod state;

mod dch;
mod downshift;
mod downshift_enh;
mod standard;
mod standard_enh;

use state::{AdapterState, XferRate};

/// Every dispatchable operation, one discriminant per [`OpTable`] slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    SetupSequencer,
    ResetSoftware,
    DeliverScb,
    SetupAtnLength,
    TargetClearBusy,
    RequestSense,
    ResetBta,
    GetConfig,
    SetupAssignScbBuffer,
    AssignScbDescriptor,
    FreeScbDescriptor,
    XferRateAssign,
    GetNegoXferRate,
    AbortChannel,
    AbortHiob,
    ActiveAbort,
    NonPackActiveAbort,
    PackActiveAbort,
    RemoveActiveAbort,
    UpdateAbortBitHostMem,
    UpdateNextScbAddress,
    SetupTargetReset,
    ResidueCalc,
    IgnoreWideResidueCalc,
    EvenIoLength,
    Underrun,
    SetBreakPoint,
    ClearBreakPoint,
    PackNonPackQueueHiob,
    SetIntrFactorThreshold,
    SetIntrThresholdCount,
    UpdateExeQAtnLength,
    UpdateNewQAtnLength,
    QHeadPnpSwitchScb,
    CompareBusSgListAddress,
    SetDisconnectDelay,
    QExetargNextOffset,
    QNextOffset,
    TargetResetSoftware,
    TargetSetIgnoreWideMsg,
    TargetSendHiobSpecial,
    TargetGetEstScbFields,
    TargetDeliverEstScb,
    TargetSetFirmwareProfile,
}

impl Op {
    pub const ALL: [Op; 44] = [
        Op::SetupSequencer,
        Op::ResetSoftware,
        Op::DeliverScb,
        Op::SetupAtnLength,
        Op::TargetClearBusy,
        Op::RequestSense,
        Op::ResetBta,
        Op::GetConfig,
        Op::SetupAssignScbBuffer,
        Op::AssignScbDescriptor,
        Op::FreeScbDescriptor,
        Op::XferRateAssign,
        Op::GetNegoXferRate,
        Op::AbortChannel,
        Op::AbortHiob,
        Op::ActiveAbort,
        Op::NonPackActiveAbort,
        Op::PackActiveAbort,
        Op::RemoveActiveAbort,
        Op::UpdateAbortBitHostMem,
        Op::UpdateNextScbAddress,
        Op::SetupTargetReset,
        Op::ResidueCalc,
        Op::IgnoreWideResidueCalc,
        Op::EvenIoLength,
        Op::Underrun,
        Op::SetBreakPoint,
        Op::ClearBreakPoint,
        Op::PackNonPackQueueHiob,
        Op::SetIntrFactorThreshold,
        Op::SetIntrThresholdCount,
        Op::UpdateExeQAtnLength,
        Op::UpdateNewQAtnLength,
        Op::QHeadPnpSwitchScb,
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
}

/// Result of a dispatched call. `Unsupported` is the explicit-absence
/// path; it is not an error and callers skip the behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Invoke<T> {
    Done(T),
    Unsupported,
}

impl<T> Invoke<T> {
    pub fn done(self) -> Option<T> {
        match self {
            Invoke::Done(v) => Some(v),
            Invoke::Unsupported => None,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Invoke::Unsupported)
    }
}

/// Scratch-RAM locations and firmware constants carried by the
/// descriptor. Addresses are sequencer scratch offsets, not host memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareProfile {
    pub version: u16,
    pub scb_size: usize,
    pub dma_size: usize,
    /// Busy-target array base in scratch RAM and its entry count.
    pub bta_table: u16,
    pub bta_size: u16,
    pub pass_to_driver: u16,
    pub active_scb: u16,
    pub ret_addr: u16,
    pub q_new_pointer: u16,
    pub sg_status: u16,
    /// Entry-point bitmap location, absent on every current firmware.
    pub ent_pt_bitmap: Option<u16>,
    /// Register and bit the sequencer uses to flag a valid ARP interrupt.
    pub arpintvalid: Option<(u16, u8)>,
}

/// Connection details read back from a completed establish-connection
/// SCB. Fields the variant's establish format does not expose are `None`
/// (the enhanced firmware returns them through a separate data area).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EstConnection {
    pub initiator_id: Option<u8>,
    pub tag_type: Option<u8>,
    pub tag_number: Option<u16>,
    pub cdb_length: Option<u8>,
    pub identify_msg: Option<u8>,
    pub last_byte: Option<u8>,
    pub flags: Option<EstFlags>,
    pub status: Option<u8>,
}

pub type SequencerSetupFn = fn(&mut AdapterState, &FirmwareProfile);
pub type StateFn = fn(&mut AdapterState);
pub type DeliverFn = fn(&mut AdapterState, &Scb);
pub type ScbEditFn = fn(&mut Scb) -> Result<(), FieldError>;
pub type ScbEditArgFn = fn(&mut Scb, u8) -> Result<(), FieldError>;
pub type AddressEditFn = fn(&mut Scb, u64) -> Result<(), FieldError>;
pub type TargetLunFn = fn(&mut AdapterState, u8, u8);
pub type ByteArgFn = fn(&mut AdapterState, u8);
pub type ScbNumberFn = fn(&mut AdapterState, ScbNumber);
pub type ScbNumberArgFn = fn(&mut AdapterState, ScbNumber, u8);
pub type RateAssignFn = fn(&mut AdapterState, u8, XferRate);
pub type RateQueryFn = fn(&AdapterState, u8) -> XferRate;
pub type ResidueFn = fn(&Scb) -> Result<u64, FieldError>;
pub type WideResidueFn = fn(&mut Scb, bool) -> Result<(), FieldError>;
pub type SgParityFn = fn(&[u32]) -> bool;
pub type UnderrunFn = fn(u64, u64) -> bool;
pub type AddressCompareFn = fn(u64, u64) -> bool;
pub type OffsetFn = fn() -> u8;
pub type EstFieldsFn = fn(&Scb) -> Result<EstConnection, FieldError>;
pub type EstDeliverFn = fn(&mut AdapterState, &mut Scb) -> Result<(), FieldError>;

/// One `Option` slot per operation. Always written as a full struct
/// literal so a new slot cannot be forgotten silently.
pub struct OpTable {
    pub setup_sequencer: Option<SequencerSetupFn>,
    pub reset_software: Option<StateFn>,
    pub deliver_scb: Option<DeliverFn>,
    pub setup_atn_length: Option<ScbEditArgFn>,
    pub target_clear_busy: Option<TargetLunFn>,
    pub request_sense: Option<ScbEditArgFn>,
    pub reset_bta: Option<StateFn>,
    pub get_config: Option<SequencerSetupFn>,
    pub setup_assign_scb_buffer: Option<StateFn>,
    pub assign_scb_descriptor: Option<StateFn>,
    pub free_scb_descriptor: Option<StateFn>,
    pub xfer_rate_assign: Option<RateAssignFn>,
    pub get_nego_xfer_rate: Option<RateQueryFn>,
    pub abort_channel: Option<ByteArgFn>,
    pub abort_hiob: Option<ScbNumberArgFn>,
    pub active_abort: Option<ScbNumberArgFn>,
    pub non_pack_active_abort: Option<ScbNumberFn>,
    pub pack_active_abort: Option<ScbNumberFn>,
    pub remove_active_abort: Option<ScbNumberFn>,
    pub update_abort_bit_host_mem: Option<ScbEditFn>,
    pub update_next_scb_address: Option<AddressEditFn>,
    pub setup_target_reset: Option<ScbEditFn>,
    pub residue_calc: Option<ResidueFn>,
    pub ignore_wide_residue_calc: Option<WideResidueFn>,
    pub even_io_length: Option<SgParityFn>,
    pub underrun: Option<UnderrunFn>,
    pub set_break_point: Option<ByteArgFn>,
    pub clear_break_point: Option<ByteArgFn>,
    pub pack_non_pack_queue_hiob: Option<ScbNumberFn>,
    pub set_intr_factor_threshold: Option<ByteArgFn>,
    pub set_intr_threshold_count: Option<ByteArgFn>,
    pub update_exe_q_atn_length: Option<ByteArgFn>,
    pub update_new_q_atn_length: Option<ByteArgFn>,
    pub q_head_pnp_switch_scb: Option<ScbNumberFn>,
    pub compare_bus_sg_list_address: Option<AddressCompareFn>,
    pub set_disconnect_delay: Option<ByteArgFn>,
    pub q_exetarg_next_offset: Option<OffsetFn>,
    pub q_next_offset: Option<OffsetFn>,
    pub target_reset_software: Option<StateFn>,
    pub target_set_ignore_wide_msg: Option<ScbEditFn>,
    pub target_send_hiob_special: Option<ScbNumberFn>,
    pub target_get_est_scb_fields: Option<EstFieldsFn>,
    pub target_deliver_est_scb: Option<EstDeliverFn>,
    pub target_set_firmware_profile: Option<SequencerSetupFn>,
}

/// Static capability descriptor for one firmware variant.
pub struct FirmwareDescriptor {
    pub variant: Variant,
    pub profile: FirmwareProfile,
    pub ops: OpTable,
}

/// The mode table: fixed index order, one descriptor per variant.
pub const fn descriptor_for(variant: Variant) -> &'static FirmwareDescriptor {
    match variant {
        Variant::StandardU320 => &standard::DESCRIPTOR,
        Variant::DownshiftU320 => &downshift::DESCRIPTOR,
        Variant::StandardEnhU320 => &standard_enh::DESCRIPTOR,
        Variant::DownshiftEnhU320 => &downshift_enh::DESCRIPTOR,
        Variant::DchU320 => &dch::DESCRIPTOR,
    }
}

impl FirmwareDescriptor {
    pub fn supports(&self, op: Op) -> bool {
        let t = &self.ops;
        match op {
            Op::SetupSequencer => t.setup_sequencer.is_some(),
            Op::ResetSoftware => t.reset_software.is_some(),
            Op::DeliverScb => t.deliver_scb.is_some(),
            Op::SetupAtnLength => t.setup_atn_length.is_some(),
            Op::TargetClearBusy => t.target_clear_busy.is_some(),
            Op::RequestSense => t.request_sense.is_some(),
            Op::ResetBta => t.reset_bta.is_some(),
            Op::GetConfig => t.get_config.is_some(),
            Op::SetupAssignScbBuffer => t.setup_assign_scb_buffer.is_some(),
            Op::AssignScbDescriptor => t.assign_scb_descriptor.is_some(),
            Op::FreeScbDescriptor => t.free_scb_descriptor.is_some(),
            Op::XferRateAssign => t.xfer_rate_assign.is_some(),
            Op::GetNegoXferRate => t.get_nego_xfer_rate.is_some(),
            Op::AbortChannel => t.abort_channel.is_some(),
            Op::AbortHiob => t.abort_hiob.is_some(),
            Op::ActiveAbort => t.active_abort.is_some(),
            Op::NonPackActiveAbort => t.non_pack_active_abort.is_some(),
            Op::PackActiveAbort => t.pack_active_abort.is_some(),
            Op::RemoveActiveAbort => t.remove_active_abort.is_some(),
            Op::UpdateAbortBitHostMem => t.update_abort_bit_host_mem.is_some(),
            Op::UpdateNextScbAddress => t.update_next_scb_address.is_some(),
            Op::SetupTargetReset => t.setup_target_reset.is_some(),
            Op::ResidueCalc => t.residue_calc.is_some(),
            Op::IgnoreWideResidueCalc => t.ignore_wide_residue_calc.is_some(),
            Op::EvenIoLength => t.even_io_length.is_some(),
            Op::Underrun => t.underrun.is_some(),
            Op::SetBreakPoint => t.set_break_point.is_some(),
            Op::ClearBreakPoint => t.clear_break_point.is_some(),
            Op::PackNonPackQueueHiob => t.pack_non_pack_queue_hiob.is_some(),
            Op::SetIntrFactorThreshold => t.set_intr_factor_threshold.is_some(),
            Op::SetIntrThresholdCount => t.set_intr_threshold_count.is_some(),
            Op::UpdateExeQAtnLength => t.update_exe_q_atn_length.is_some(),
            Op::UpdateNewQAtnLength => t.update_new_q_atn_length.is_some(),
            Op::QHeadPnpSwitchScb => t.q_head_pnp_switch_scb.is_some(),
            Op::CompareBusSgListAddress => t.compare_bus_sg_list_address.is_some(),
            Op::SetDisconnectDelay => t.set_disconnect_delay.is_some(),
            Op::QExetargNextOffset => t.q_exetarg_next_offset.is_some(),
            Op::QNextOffset => t.q_next_offset.is_some(),
            Op::TargetResetSoftware => t.target_reset_software.is_some(),
            Op::TargetSetIgnoreWideMsg => t.target_set_ignore_wide_msg.is_some(),
            Op::TargetSendHiobSpecial => t.target_send_hiob_special.is_some(),
            Op::TargetGetEstScbFields => t.target_get_est_scb_fields.is_some(),
            Op::TargetDeliverEstScb => t.target_deliver_est_scb.is_some(),
            Op::TargetSetFirmwareProfile => t.target_set_firmware_profile.is_some(),
        }
    }

    pub fn presence(&self) -> impl Iterator<Item = (Op, bool)> + '_ {
        Op::ALL.iter().map(|op| (*op, self.supports(*op)))
    }

    pub fn setup_sequencer(&self, state: &mut AdapterState) -> Invoke<()> {
        match self.ops.setup_sequencer {
            Some(f) => Invoke::Done(f(state, &self.profile)),
            None => Invoke::Unsupported,
        }
    }

    pub fn reset_software(&self, state: &mut AdapterState) -> Invoke<()> {
        match self.ops.reset_software {
            Some(f) => Invoke::Done(f(state)),
            None => Invoke::Unsupported,
        }
    }

    pub fn deliver_scb(&self, state: &mut AdapterState, scb: &Scb) -> Invoke<()> {
        match self.ops.deliver_scb {
            Some(f) => Invoke::Done(f(state, scb)),
            None => Invoke::Unsupported,
        }
    }

    pub fn setup_atn_length(
        &self,
        scb: &mut Scb,
        msg_bytes: u8,
    ) -> Invoke<Result<(), FieldError>> {
        match self.ops.setup_atn_length {
            Some(f) => Invoke::Done(f(scb, msg_bytes)),
            None => Invoke::Unsupported,
        }
    }

    pub fn target_clear_busy(&self, state: &mut AdapterState, target: u8, lun: u8) -> Invoke<()> {
        match self.ops.target_clear_busy {
            Some(f) => Invoke::Done(f(state, target, lun)),
            None => Invoke::Unsupported,
        }
    }

    pub fn request_sense(&self, scb: &mut Scb, sense_len: u8) -> Invoke<Result<(), FieldError>> {
        match self.ops.request_sense {
            Some(f) => Invoke::Done(f(scb, sense_len)),
            None => Invoke::Unsupported,
        }
    }

    pub fn reset_bta(&self, state: &mut AdapterState) -> Invoke<()> {
        match self.ops.reset_bta {
            Some(f) => Invoke::Done(f(state)),
            None => Invoke::Unsupported,
        }
    }

    pub fn get_config(&self, state: &mut AdapterState) -> Invoke<()> {
        match self.ops.get_config {
            Some(f) => Invoke::Done(f(state, &self.profile)),
            None => Invoke::Unsupported,
        }
    }

    pub fn setup_assign_scb_buffer(&self, state: &mut AdapterState) -> Invoke<()> {
        match self.ops.setup_assign_scb_buffer {
            Some(f) => Invoke::Done(f(state)),
            None => Invoke::Unsupported,
        }
    }

    pub fn assign_scb_descriptor(&self, state: &mut AdapterState) -> Invoke<()> {
        match self.ops.assign_scb_descriptor {
            Some(f) => Invoke::Done(f(state)),
            None => Invoke::Unsupported,
        }
    }

    pub fn free_scb_descriptor(&self, state: &mut AdapterState) -> Invoke<()> {
        match self.ops.free_scb_descriptor {
            Some(f) => Invoke::Done(f(state)),
            None => Invoke::Unsupported,
        }
    }

    pub fn xfer_rate_assign(
        &self,
        state: &mut AdapterState,
        target: u8,
        rate: XferRate,
    ) -> Invoke<()> {
        match self.ops.xfer_rate_assign {
            Some(f) => Invoke::Done(f(state, target, rate)),
            None => Invoke::Unsupported,
        }
    }

    pub fn get_nego_xfer_rate(&self, state: &AdapterState, target: u8) -> Invoke<XferRate> {
        match self.ops.get_nego_xfer_rate {
            Some(f) => Invoke::Done(f(state, target)),
            None => Invoke::Unsupported,
        }
    }

    pub fn abort_channel(&self, state: &mut AdapterState, ha_status: u8) -> Invoke<()> {
        match self.ops.abort_channel {
            Some(f) => Invoke::Done(f(state, ha_status)),
            None => Invoke::Unsupported,
        }
    }

    pub fn abort_hiob(
        &self,
        state: &mut AdapterState,
        number: ScbNumber,
        ha_status: u8,
    ) -> Invoke<()> {
        match self.ops.abort_hiob {
            Some(f) => Invoke::Done(f(state, number, ha_status)),
            None => Invoke::Unsupported,
        }
    }

    pub fn active_abort(
        &self,
        state: &mut AdapterState,
        number: ScbNumber,
        ha_status: u8,
    ) -> Invoke<()> {
        match self.ops.active_abort {
            Some(f) => Invoke::Done(f(state, number, ha_status)),
            None => Invoke::Unsupported,
        }
    }

    pub fn non_pack_active_abort(&self, state: &mut AdapterState, number: ScbNumber) -> Invoke<()> {
        match self.ops.non_pack_active_abort {
            Some(f) => Invoke::Done(f(state, number)),
            None => Invoke::Unsupported,
        }
    }

    pub fn pack_active_abort(&self, state: &mut AdapterState, number: ScbNumber) -> Invoke<()> {
        match self.ops.pack_active_abort {
            Some(f) => Invoke::Done(f(state, number)),
            None => Invoke::Unsupported,
        }
    }

    pub fn remove_active_abort(&self, state: &mut AdapterState, number: ScbNumber) -> Invoke<()> {
        match self.ops.remove_active_abort {
            Some(f) => Invoke::Done(f(state, number)),
            None => Invoke::Unsupported,
        }
    }

    pub fn update_abort_bit_host_mem(&self, scb: &mut Scb) -> Invoke<Result<(), FieldError>> {
        match self.ops.update_abort_bit_host_mem {
            Some(f) => Invoke::Done(f(scb)),
            None => Invoke::Unsupported,
        }
    }

    pub fn update_next_scb_address(
        &self,
        scb: &mut Scb,
        bus_address: u64,
    ) -> Invoke<Result<(), FieldError>> {
        match self.ops.update_next_scb_address {
            Some(f) => Invoke::Done(f(scb, bus_address)),
            None => Invoke::Unsupported,
        }
    }

    pub fn setup_target_reset(&self, scb: &mut Scb) -> Invoke<Result<(), FieldError>> {
        match self.ops.setup_target_reset {
            Some(f) => Invoke::Done(f(scb)),
            None => Invoke::Unsupported,
        }
    }

    pub fn residue_calc(&self, scb: &Scb) -> Invoke<Result<u64, FieldError>> {
        match self.ops.residue_calc {
            Some(f) => Invoke::Done(f(scb)),
            None => Invoke::Unsupported,
        }
    }

    pub fn ignore_wide_residue_calc(
        &self,
        scb: &mut Scb,
        even_length: bool,
    ) -> Invoke<Result<(), FieldError>> {
        match self.ops.ignore_wide_residue_calc {
            Some(f) => Invoke::Done(f(scb, even_length)),
            None => Invoke::Unsupported,
        }
    }

    pub fn even_io_length(&self, sg_lengths: &[u32]) -> Invoke<bool> {
        match self.ops.even_io_length {
            Some(f) => Invoke::Done(f(sg_lengths)),
            None => Invoke::Unsupported,
        }
    }

    pub fn underrun(&self, expected: u64, transferred: u64) -> Invoke<bool> {
        match self.ops.underrun {
            Some(f) => Invoke::Done(f(expected, transferred)),
            None => Invoke::Unsupported,
        }
    }

    pub fn set_break_point(&self, state: &mut AdapterState, entry: u8) -> Invoke<()> {
        match self.ops.set_break_point {
            Some(f) => Invoke::Done(f(state, entry)),
            None => Invoke::Unsupported,
        }
    }

    pub fn clear_break_point(&self, state: &mut AdapterState, entry: u8) -> Invoke<()> {
        match self.ops.clear_break_point {
            Some(f) => Invoke::Done(f(state, entry)),
            None => Invoke::Unsupported,
        }
    }

    pub fn pack_non_pack_queue_hiob(
        &self,
        state: &mut AdapterState,
        number: ScbNumber,
    ) -> Invoke<()> {
        match self.ops.pack_non_pack_queue_hiob {
            Some(f) => Invoke::Done(f(state, number)),
            None => Invoke::Unsupported,
        }
    }

    pub fn set_intr_factor_threshold(&self, state: &mut AdapterState, value: u8) -> Invoke<()> {
        match self.ops.set_intr_factor_threshold {
            Some(f) => Invoke::Done(f(state, value)),
            None => Invoke::Unsupported,
        }
    }

    pub fn set_intr_threshold_count(&self, state: &mut AdapterState, value: u8) -> Invoke<()> {
        match self.ops.set_intr_threshold_count {
            Some(f) => Invoke::Done(f(state, value)),
            None => Invoke::Unsupported,
        }
    }

    pub fn update_exe_q_atn_length(&self, state: &mut AdapterState, target: u8) -> Invoke<()> {
        match self.ops.update_exe_q_atn_length {
            Some(f) => Invoke::Done(f(state, target)),
            None => Invoke::Unsupported,
        }
    }

    pub fn update_new_q_atn_length(&self, state: &mut AdapterState, target: u8) -> Invoke<()> {
        match self.ops.update_new_q_atn_length {
            Some(f) => Invoke::Done(f(state, target)),
            None => Invoke::Unsupported,
        }
    }

    pub fn q_head_pnp_switch_scb(&self, state: &mut AdapterState, number: ScbNumber) -> Invoke<()> {
        match self.ops.q_head_pnp_switch_scb {
            Some(f) => Invoke::Done(f(state, number)),
            None => Invoke::Unsupported,
        }
    }

    pub fn compare_bus_sg_list_address(&self, bus: u64, sg_list: u64) -> Invoke<bool> {
        match self.ops.compare_bus_sg_list_address {
            Some(f) => Invoke::Done(f(bus, sg_list)),
            None => Invoke::Unsupported,
        }
    }

    pub fn set_disconnect_delay(&self, state: &mut AdapterState, delay: u8) -> Invoke<()> {
        match self.ops.set_disconnect_delay {
            Some(f) => Invoke::Done(f(state, delay)),
            None => Invoke::Unsupported,
        }
    }

    pub fn q_exetarg_next_offset(&self) -> Invoke<u8> {
        match self.ops.q_exetarg_next_offset {
            Some(f) => Invoke::Done(f()),
            None => Invoke::Unsupported,
        }
    }

    pub fn q_next_offset(&self) -> Invoke<u8> {
        match self.ops.q_next_offset {
            Some(f) => Invoke::Done(f()),
            None => Invoke::Unsupported,
        }
    }

    pub fn target_reset_software(&self, state: &mut AdapterState) -> Invoke<()> {
        match self.ops.target_reset_software {
            Some(f) => Invoke::Done(f(state)),
            None => Invoke::Unsupported,
        }
    }

    pub fn target_set_ignore_wide_msg(&self, scb: &mut Scb) -> Invoke<Result<(), FieldError>> {
        match self.ops.target_set_ignore_wide_msg {
            Some(f) => Invoke::Done(f(scb)),
            None => Invoke::Unsupported,
        }
    }

    pub fn target_send_hiob_special(
        &self,
        state: &mut AdapterState,
        number: ScbNumber,
    ) -> Invoke<()> {
        match self.ops.target_send_hiob_special {
            Some(f) => Invoke::Done(f(state, number)),
            None => Invoke::Unsupported,
        }
    }

    pub fn target_get_est_scb_fields(
        &self,
        scb: &Scb,
    ) -> Invoke<Result<EstConnection, FieldError>> {
        match self.ops.target_get_est_scb_fields {
            Some(f) => Invoke::Done(f(scb)),
            None => Invoke::Unsupported,
        }
    }

    pub fn target_deliver_est_scb(
        &self,
        state: &mut AdapterState,
        scb: &mut Scb,
    ) -> Invoke<Result<(), FieldError>> {
        match self.ops.target_deliver_est_scb {
            Some(f) => Invoke::Done(f(state, scb)),
            None => Invoke::Unsupported,
        }
    }

    pub fn target_set_firmware_profile(&self, state: &mut AdapterState) -> Invoke<()> {
        match self.ops.target_set_firmware_profile {
            Some(f) => Invoke::Done(f(state, &self.profile)),
            None => Invoke::Unsupported,
        }
    }
}
