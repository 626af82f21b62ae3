use anyhow::Result;
use scb_codec_rs::{
    layout::{Field, SCB_SIZE, Variant},
    scb::{
        SlotUsage,
        pool::{Owner, PoolError, ScbPool},
    },
};

#[test]
fn command_fill_deliver_complete_release() -> Result<()> {
    let mut pool = ScbPool::new(Variant::StandardU320, 4);
    assert_eq!(pool.free_count(), 4);

    let number = pool.acquire(SlotUsage::Command)?;
    assert_eq!(pool.owner(number)?, Owner::Host);

    pool.scb_mut(number)?.set(Field::AtnLength, 0x31)?;
    pool.deliver(number)?;

    // Host edits are rejected while the firmware owns the slot.
    assert!(matches!(
        pool.scb_mut(number),
        Err(PoolError::WrongOwner { .. })
    ));

    let mut image = [0u8; SCB_SIZE];
    image[8] = 0x10;
    pool.complete(number, image)?;
    assert_eq!(pool.owner(number)?, Owner::Host);
    assert_eq!(pool.scb(number)?.usage(), SlotUsage::Completion);
    assert_eq!(pool.scb(number)?.get(Field::Residue)?, 0x10);

    pool.release(number)?;
    assert_eq!(pool.free_count(), 4);
    Ok(())
}

#[test]
fn removed_slots_skip_in_flight_commands() -> Result<()> {
    let mut pool = ScbPool::new(Variant::StandardU320, 4);
    let number = pool.acquire(SlotUsage::Command)?;

    assert_eq!(pool.remove_free(8), 3);
    assert_eq!(pool.free_count(), 0);

    // The in-flight slot is untouched.
    assert_eq!(pool.owner(number)?, Owner::Host);
    pool.deliver(number)?;
    pool.complete(number, [0u8; SCB_SIZE])?;
    Ok(())
}

#[test]
fn bad_number_is_an_error() {
    let pool = ScbPool::new(Variant::DchU320, 1);
    assert_eq!(pool.owner(99), Err(PoolError::BadNumber(99)));
}
