use crate::{
    common::{clock::Clock, error::LedgerError, event::LedgerEvent, money::Money},
    domain::{
        account::{Account, AccountNumber, AccountProfile},
        ledger::Ledger,
    },
};

pub fn handle(
    ledger: &mut Ledger,
    clock: &impl Clock,
    profile: AccountProfile,
    opening_balance: Money,
) -> Result<AccountNumber, LedgerError> {
    // identity must be unique among live accounts; deleted ones may be reused
    if ledger.identity_in_use(&profile.identity) {
        return Err(LedgerError::DuplicateIdentity);
    }

    if opening_balance.is_negative() {
        return Err(LedgerError::InvalidAmount);
    }

    let number = ledger.next_account_number();
    let mut account = Account::new(number, profile, opening_balance);
    account.record_event(LedgerEvent::Created, clock);
    ledger.insert(account);

    Ok(number)
}
