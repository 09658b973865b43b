use std::collections::BTreeMap;

use crate::domain::{
    account::{Account, AccountNumber, Pin},
    log_chain::LogChain,
    registry::DeletedRegistry,
};

/// Result of a credential check against a live account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinCheck {
    Match,
    Mismatch,
    NotFound,
}

#[derive(Debug, Default)]
pub struct Ledger {
    pub accounts: BTreeMap<AccountNumber, Account>,
    pub deleted: DeletedRegistry,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
            deleted: DeletedRegistry::new(),
        }
    }

    pub fn accounts(&self) -> &BTreeMap<AccountNumber, Account> {
        &self.accounts
    }

    pub fn find(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.get(&number)
    }

    pub fn find_mut(&mut self, number: AccountNumber) -> Option<&mut Account> {
        self.accounts.get_mut(&number)
    }

    pub fn exists(&self, number: AccountNumber) -> bool {
        self.accounts.contains_key(&number)
    }

    /// One past the highest number ever assigned, live or deleted.
    pub fn next_account_number(&self) -> AccountNumber {
        let live = self.accounts.keys().next_back().copied().unwrap_or(0);
        let deleted = self.deleted.max_number().unwrap_or(0);
        live.max(deleted) + 1
    }

    pub fn check_pin(&self, number: AccountNumber, pin: Pin) -> PinCheck {
        match self.find(number) {
            None => PinCheck::NotFound,
            Some(acc) if acc.pin_matches(pin) => PinCheck::Match,
            Some(_) => PinCheck::Mismatch,
        }
    }

    pub fn identity_in_use(&self, identity: &str) -> bool {
        self.accounts.values().any(|acc| acc.identity == identity)
    }

    /// The live account's chain if it exists, otherwise the retained chain
    /// of a deleted account.
    pub fn logs_for(&self, number: AccountNumber) -> Option<&LogChain> {
        self.find(number)
            .map(Account::log)
            .or_else(|| self.deleted.get(number))
    }

    /// Inserts an account as-is. Used when restoring from disk.
    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.number, account);
    }

    /// Gives a restored log chain to its live account, or files it under
    /// the deleted registry when no live account has that number.
    pub fn attach_log(&mut self, number: AccountNumber, chain: LogChain) {
        match self.accounts.get_mut(&number) {
            Some(acc) => acc.attach_log(chain),
            None => self.deleted.retain(number, chain),
        }
    }

    /// Removes a live account and moves its chain into the deleted registry.
    pub fn retire(&mut self, number: AccountNumber) -> Option<()> {
        let account = self.accounts.remove(&number)?;
        self.deleted.retain(number, account.into_log());
        Some(())
    }

    pub fn log_entry_count(&self) -> usize {
        let live: usize = self.accounts.values().map(|a| a.log().len()).sum();
        let deleted: usize = self.deleted.iter().map(|(_, c)| c.len()).sum();
        live + deleted
    }
}
