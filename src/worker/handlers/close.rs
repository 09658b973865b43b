use crate::{
    common::{clock::Clock, error::LedgerError, event::LedgerEvent},
    domain::{account::AccountNumber, ledger::Ledger},
};

/// Logs the deletion on the account, then hands its chain to the deleted
/// registry and drops the account.
pub fn handle(
    ledger: &mut Ledger,
    clock: &impl Clock,
    number: AccountNumber,
) -> Result<(), LedgerError> {
    let acc = ledger
        .find_mut(number)
        .ok_or(LedgerError::NotFound(number))?;
    acc.record_event(LedgerEvent::Deleted, clock);

    ledger.retire(number).ok_or(LedgerError::NotFound(number))
}
