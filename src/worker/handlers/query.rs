use crate::{
    common::{error::LedgerError, money::Money},
    domain::{
        account::{Account, AccountNumber, Pin},
        ledger::Ledger,
        log_chain::LogEntry,
    },
};

fn authorize(ledger: &Ledger, number: AccountNumber, pin: Pin) -> Result<&Account, LedgerError> {
    let acc = ledger.find(number).ok_or(LedgerError::NotFound(number))?;
    if !acc.pin_matches(pin) {
        return Err(LedgerError::PinMismatch);
    }
    Ok(acc)
}

pub fn balance(ledger: &Ledger, number: AccountNumber, pin: Pin) -> Result<Money, LedgerError> {
    authorize(ledger, number, pin).map(|acc| acc.balance)
}

/// The last `count` log entries, oldest first.
pub fn mini_statement(
    ledger: &Ledger,
    number: AccountNumber,
    pin: Pin,
    count: usize,
) -> Result<&[LogEntry], LedgerError> {
    let acc = authorize(ledger, number, pin)?;
    if acc.log().is_empty() {
        return Err(LedgerError::NoLogs);
    }
    Ok(acc.log().last_n(count))
}
