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

    // balance must never go negative
    if acc.balance < amount {
        return Err(LedgerError::InsufficientFunds);
    }

    Ok(apply_withdrawal(acc, clock, amount))
}

fn apply_withdrawal(acc: &mut Account, clock: &impl Clock, amount: Money) -> Money {
    let before = acc.balance;
    acc.balance -= amount;
    acc.record_event(
        LedgerEvent::Withdrawal {
            amount,
            before,
            after: acc.balance,
        },
        clock,
    );
    acc.balance
}
