//! SCB slot pool with explicit ownership tracking.
//!
//! Every slot is either free, held by the host while it fills in a
//! command, or delivered to the firmware. Transitions are strict; a
//! completion for a slot the firmware never owned is a protocol error
//! surfaced to the caller, not a panic.
// SPDX-License-Identifier: AGPL-3.0-or-later

use thiserror::Error;
use tracing::debug;

use crate::{
    layout::Variant,
    scb::{Scb, SlotUsage},
};

/// Index of a slot inside the pool, matching the SCB number the firmware
/// uses on the done queue.
pub type ScbNumber = u16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Free,
    Host,
    Firmware,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("no free SCB slots ({capacity} in pool)")]
    Exhausted { capacity: usize },
    #[error("SCB number {0} out of range")]
    BadNumber(ScbNumber),
    #[error("SCB {number} is owned by {actual:?}, expected {expected:?}")]
    WrongOwner { number: ScbNumber, expected: Owner, actual: Owner },
}

struct Slot {
    scb: Scb,
    owner: Owner,
}

/// Fixed-capacity pool of SCB slots for one adapter binding.
pub struct ScbPool {
    variant: Variant,
    slots: Vec<Slot>,
    free: Vec<ScbNumber>,
}

impl ScbPool {
    /// Builds a pool of `capacity` zeroed slots. Capacity comes from the
    /// adapter configuration and is fixed afterwards; shrinking goes
    /// through [`ScbPool::remove_free`].
    pub fn new(variant: Variant, capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| Slot { scb: Scb::new(variant, SlotUsage::Command), owner: Owner::Free })
            .collect();
        // LIFO free list, lowest numbers handed out first.
        let free = (0..capacity as ScbNumber).rev().collect();
        ScbPool { variant, slots, free }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    fn slot(&self, number: ScbNumber) -> Result<&Slot, PoolError> {
        self.slots.get(number as usize).ok_or(PoolError::BadNumber(number))
    }

    fn slot_mut(&mut self, number: ScbNumber) -> Result<&mut Slot, PoolError> {
        self.slots
            .get_mut(number as usize)
            .ok_or(PoolError::BadNumber(number))
    }

    pub fn owner(&self, number: ScbNumber) -> Result<Owner, PoolError> {
        Ok(self.slot(number)?.owner)
    }

    /// Takes a free slot for the host to fill. The slot comes back zeroed
    /// with the requested usage.
    pub fn acquire(&mut self, usage: SlotUsage) -> Result<ScbNumber, PoolError> {
        let number = self
            .free
            .pop()
            .ok_or(PoolError::Exhausted { capacity: self.slots.len() })?;
        let variant = self.variant;
        let slot = &mut self.slots[number as usize];
        slot.scb = Scb::new(variant, usage);
        slot.owner = Owner::Host;
        debug!(number, ?usage, "scb acquired");
        Ok(number)
    }

    /// Host-owned SCB image for filling in.
    pub fn scb_mut(&mut self, number: ScbNumber) -> Result<&mut Scb, PoolError> {
        let slot = self.slot_mut(number)?;
        if slot.owner != Owner::Host {
            return Err(PoolError::WrongOwner {
                number,
                expected: Owner::Host,
                actual: slot.owner,
            });
        }
        Ok(&mut slot.scb)
    }

    pub fn scb(&self, number: ScbNumber) -> Result<&Scb, PoolError> {
        Ok(&self.slot(number)?.scb)
    }

    /// Hands a filled SCB to the firmware.
    pub fn deliver(&mut self, number: ScbNumber) -> Result<&Scb, PoolError> {
        let slot = self.slot_mut(number)?;
        if slot.owner != Owner::Host {
            return Err(PoolError::WrongOwner {
                number,
                expected: Owner::Host,
                actual: slot.owner,
            });
        }
        slot.owner = Owner::Firmware;
        debug!(number, "scb delivered");
        Ok(&slot.scb)
    }

    /// Marks a firmware-owned SCB complete, installing the image that came
    /// back and retagging the payload bytes as completion state.
    pub fn complete(
        &mut self,
        number: ScbNumber,
        image: [u8; crate::layout::SCB_SIZE],
    ) -> Result<&Scb, PoolError> {
        let variant = self.variant;
        let slot = self.slot_mut(number)?;
        if slot.owner != Owner::Firmware {
            return Err(PoolError::WrongOwner {
                number,
                expected: Owner::Firmware,
                actual: slot.owner,
            });
        }
        slot.scb = Scb::from_bytes(variant, SlotUsage::Completion, image);
        slot.owner = Owner::Host;
        debug!(number, "scb completed");
        Ok(&slot.scb)
    }

    /// Returns a host-owned slot to the free list.
    pub fn release(&mut self, number: ScbNumber) -> Result<(), PoolError> {
        let slot = self.slot_mut(number)?;
        if slot.owner != Owner::Host {
            return Err(PoolError::WrongOwner {
                number,
                expected: Owner::Host,
                actual: slot.owner,
            });
        }
        slot.owner = Owner::Free;
        self.free.push(number);
        Ok(())
    }

    /// Permanently retires up to `count` free slots, reducing the usable
    /// pool. Slots keep their numbers; retired ones simply never leave the
    /// owner map. Returns how many were retired.
    pub fn remove_free(&mut self, count: usize) -> usize {
        let n = count.min(self.free.len());
        self.free.truncate(self.free.len() - n);
        if n > 0 {
            debug!(retired = n, "scb slots removed from pool");
        }
        n
    }
}
