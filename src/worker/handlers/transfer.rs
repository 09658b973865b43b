use crate::{
    common::{clock::Clock, error::LedgerError, event::LedgerEvent, money::Money},
    domain::{
        account::{AccountNumber, Pin},
        ledger::Ledger,
    },
};

/// Balances of both sides after a completed transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferReceipt {
    pub source_balance: Money,
    pub destination_balance: Money,
}

/// Moves `amount` from `source` to `destination`. Every check runs before
/// either account is touched, so a rejected transfer changes nothing.
pub fn handle(
    ledger: &mut Ledger,
    clock: &impl Clock,
    source: AccountNumber,
    pin: Pin,
    destination: AccountNumber,
    amount: Money,
) -> Result<TransferReceipt, LedgerError> {
    let src = ledger.find(source).ok_or(LedgerError::NotFound(source))?;
    let dst = ledger
        .find(destination)
        .ok_or(LedgerError::DestinationNotFound(destination))?;

    if !src.pin_matches(pin) {
        return Err(LedgerError::PinMismatch);
    }

    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount);
    }

    if source == destination {
        return Err(LedgerError::SameAccount);
    }

    if src.balance < amount {
        return Err(LedgerError::InsufficientFunds);
    }

    let src_before = src.balance;
    let dst_before = dst.balance;
    let src_after = src_before - amount;
    let dst_after = dst_before
        .checked_add(amount)
        .ok_or(LedgerError::InvalidAmount)?;

    let src = ledger
        .find_mut(source)
        .ok_or(LedgerError::NotFound(source))?;
    src.balance = src_after;
    src.record_event(
        LedgerEvent::TransferOut {
            amount,
            to: destination,
            before: src_before,
            after: src_after,
        },
        clock,
    );

    let dst = ledger
        .find_mut(destination)
        .ok_or(LedgerError::DestinationNotFound(destination))?;
    dst.balance = dst_after;
    dst.record_event(
        LedgerEvent::TransferIn {
            amount,
            from: source,
            before: dst_before,
            after: dst_after,
        },
        clock,
    );

    Ok(TransferReceipt {
        source_balance: src_after,
        destination_balance: dst_after,
    })
}
