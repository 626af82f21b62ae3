//! Adapter-side bookkeeping the dispatch handlers operate on.
//!
//! Register and DMA traffic stays outside this crate; `AdapterState` holds
//! only the host-visible mirrors the handlers own: the busy-target array,
//! breakpoint bitmap, negotiated rates, interrupt thresholds, and the done
//! queue.
// SPDX-License-Identifier: AGPL-3.0-or-later

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::scb::pool::ScbNumber;

/// Invalid SCB number marker used by the busy-target array.
pub const NULL_SCB: u16 = 0xFFFF;

/// Targets addressable on one channel.
pub const MAX_TARGETS: usize = 16;

/// Logical units tracked per target.
pub const MAX_LUNS: usize = 16;

/// Busy-target array: one entry per target/lun pair holding the SCB
/// number of the untagged command outstanding there, or [`NULL_SCB`].
#[derive(Debug, Clone)]
pub struct BusyTargetArray {
    entries: [u16; MAX_TARGETS * MAX_LUNS],
}

impl BusyTargetArray {
    pub fn new() -> Self {
        BusyTargetArray { entries: [NULL_SCB; MAX_TARGETS * MAX_LUNS] }
    }

    const fn slot(target: u8, lun: u8) -> usize {
        (target as usize % MAX_TARGETS) * MAX_LUNS + (lun as usize % MAX_LUNS)
    }

    pub fn reset(&mut self) {
        self.entries.fill(NULL_SCB);
    }

    pub fn set_busy(&mut self, target: u8, lun: u8, scb: ScbNumber) {
        self.entries[Self::slot(target, lun)] = scb;
    }

    pub fn clear(&mut self, target: u8, lun: u8) {
        self.entries[Self::slot(target, lun)] = NULL_SCB;
    }

    pub fn busy_scb(&self, target: u8, lun: u8) -> Option<ScbNumber> {
        match self.entries[Self::slot(target, lun)] {
            NULL_SCB => None,
            n => Some(n),
        }
    }
}

impl Default for BusyTargetArray {
    fn default() -> Self {
        Self::new()
    }
}

/// Negotiated transfer parameters for one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XferRate {
    /// Transfer period factor; 0 means asynchronous.
    pub period: u8,
    /// REQ/ACK offset; 0 means asynchronous.
    pub offset: u8,
    /// Protocol option bits from the PPR exchange (DT, IU, QAS).
    pub ppr_options: u8,
}

impl XferRate {
    pub const ASYNC: XferRate = XferRate { period: 0, offset: 0, ppr_options: 0 };
}

impl Default for XferRate {
    fn default() -> Self {
        XferRate::ASYNC
    }
}

/// Completion-queue element the sequencer DMAs into host memory. The pass
/// count lets the host detect a wrapped, partially written element.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct QoutFifoElement {
    scb_number: [u8; 2],
    reserved: [u8; 5],
    que_pass_cnt: u8,
}

impl QoutFifoElement {
    pub fn new(scb_number: ScbNumber, que_pass_cnt: u8) -> Self {
        QoutFifoElement {
            scb_number: scb_number.to_le_bytes(),
            reserved: [0u8; 5],
            que_pass_cnt,
        }
    }

    pub fn scb_number(&self) -> ScbNumber {
        u16::from_le_bytes(self.scb_number)
    }

    pub fn que_pass_cnt(&self) -> u8 {
        self.que_pass_cnt
    }
}

/// Host-side adapter bookkeeping shared by the dispatch handlers.
#[derive(Debug, Clone, Default)]
pub struct AdapterState {
    pub bta: BusyTargetArray,
    /// One bit per sequencer entry-point breakpoint.
    pub breakpoints: u32,
    pub xfer_rates: [XferRate; MAX_TARGETS],
    pub intr_factor_threshold: u8,
    pub intr_threshold_count: u8,
    pub disconnect_delay: u8,
    /// Commands handed to the firmware since the last software reset.
    pub delivered: u64,
    /// Completion elements consumed from the done queue.
    pub done_queue: Vec<QoutFifoElement>,
    pub que_pass_cnt: u8,
    /// SCBs with an abort in progress.
    pub aborting: Vec<ScbNumber>,
    /// Set once the sequencer scratch locations have been programmed.
    pub sequencer_ready: bool,
    /// Set once the target-mode firmware profile has been applied.
    pub target_profile_set: bool,
    /// Set once the SCB buffer pool has been handed to the firmware.
    pub buffer_pool_ready: bool,
    /// Descriptors currently assigned out of the buffer pool.
    pub assigned_descriptors: u32,
    /// Packetized/non-packetized queue switches observed.
    pub pnp_switches: u32,
    /// Attention-length fixups applied to queued commands.
    pub atn_updates: u32,
}

impl AdapterState {
    pub fn new() -> Self {
        AdapterState::default()
    }
}
