use crate::{
    common::{clock::Clock, error::LedgerError, event::LedgerEvent},
    domain::{
        account::{AccountNumber, AccountProfile},
        ledger::Ledger,
    },
};

/// Overwrites every holder field. Unlike opening an account, the new
/// identity is not checked against other live accounts.
pub fn handle(
    ledger: &mut Ledger,
    clock: &impl Clock,
    number: AccountNumber,
    profile: AccountProfile,
) -> Result<(), LedgerError> {
    let acc = ledger
        .find_mut(number)
        .ok_or(LedgerError::NotFound(number))?;

    acc.apply_profile(profile);
    acc.record_event(LedgerEvent::InfoChanged, clock);
    Ok(())
}
