use crate::{
    common::{clock::Clock, error::LedgerError, event::LedgerEvent},
    domain::{
        account::{AccountNumber, Pin},
        ledger::Ledger,
    },
};

/// Replaces the PIN after checking the old one. The new PIN's format is the
/// caller's responsibility.
pub fn handle(
    ledger: &mut Ledger,
    clock: &impl Clock,
    number: AccountNumber,
    old_pin: Pin,
    new_pin: Pin,
) -> Result<(), LedgerError> {
    let acc = ledger
        .find_mut(number)
        .ok_or(LedgerError::NotFound(number))?;

    if !acc.pin_matches(old_pin) {
        return Err(LedgerError::PinMismatch);
    }

    acc.pin = new_pin;
    acc.record_event(LedgerEvent::PinChanged, clock);
    Ok(())
}
