use crate::{
    common::{clock::Clock, error::LedgerError, event::LedgerEvent, money::Money},
    domain::{
        account::{Account, AccountNumber, Pin},
        ledger::Ledger,
    },
};

pub fn handle(
    ledger: &mut Ledger,
    clock: &impl Clock,
    number: AccountNumber,
    pin: Pin,
    amount: Money,
) -> Result<Money, LedgerError> {
    let acc = ledger
        .find_mut(number)
        .ok_or(LedgerError::NotFound(number))?;

    if !acc.pin_matches(pin) {
        return Err(LedgerError::PinMismatch);
    }

    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount);
    }

    apply_deposit(acc, clock, amount)
}

fn apply_deposit(acc: &mut Account, clock: &impl Clock, amount: Money) -> Result<Money, LedgerError> {
    let before = acc.balance;
    let after = before
        .checked_add(amount)
        .ok_or(LedgerError::InvalidAmount)?;
    acc.balance = after;
    acc.record_event(
        LedgerEvent::Deposit {
            amount,
            before,
            after,
        },
        clock,
    );
    Ok(after)
}
