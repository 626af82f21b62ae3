//! Multi-variant SCSI control-block (SCB) codec and firmware dispatch
//! registry for U320-class host adapters.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Binds the active firmware variant at adapter start-up.
pub mod binding;
/// Handles configuration parsing and logging.
pub mod cfg;
/// Per-firmware capability dispatch tables and their operation handlers.
pub mod dispatch;
/// Defines the authoritative byte layout of the SCB for each firmware
/// variant.
pub mod layout;
/// Descriptor buffers, field accessors, and the SCB free pool.
pub mod scb;
