use std::fmt;

use crate::{common::money::Money, domain::account::AccountNumber};

/// An event recorded in an account's log chain. The rendered text is what
/// gets stored, followed by the timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEvent {
    Created,
    Deposit {
        amount: Money,
        before: Money,
        after: Money,
    },
    Withdrawal {
        amount: Money,
        before: Money,
        after: Money,
    },
    TransferOut {
        amount: Money,
        to: AccountNumber,
        before: Money,
        after: Money,
    },
    TransferIn {
        amount: Money,
        from: AccountNumber,
        before: Money,
        after: Money,
    },
    PinChanged,
    InfoChanged,
    Deleted,
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerEvent::Created => f.write_str("Account created"),
            LedgerEvent::Deposit {
                amount,
                before,
                after,
            } => write!(f, "Deposit +RM {amount}, before=RM {before}, after=RM {after}"),
            LedgerEvent::Withdrawal {
                amount,
                before,
                after,
            } => write!(f, "Withdraw -RM {amount}, before=RM {before}, after=RM {after}"),
            LedgerEvent::TransferOut {
                amount,
                to,
                before,
                after,
            } => write!(
                f,
                "Transfer -RM {amount} to account {to:04}, before=RM {before}, after=RM {after}"
            ),
            LedgerEvent::TransferIn {
                amount,
                from,
                before,
                after,
            } => write!(
                f,
                "Transfer +RM {amount} from account {from:04}, before=RM {before}, after=RM {after}"
            ),
            LedgerEvent::PinChanged => f.write_str("PIN changed"),
            LedgerEvent::InfoChanged => f.write_str("Info changed"),
            LedgerEvent::Deleted => f.write_str("Account deleted"),
        }
    }
}
