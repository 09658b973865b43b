use std::collections::BTreeMap;

use crate::domain::{account::AccountNumber, log_chain::LogChain};

/// Log chains retained after their accounts were deleted, keyed by the
/// former account number. Entries are never modified or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletedRegistry {
    chains: BTreeMap<AccountNumber, LogChain>,
}

impl DeletedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of a deleted account's chain.
    pub fn retain(&mut self, number: AccountNumber, chain: LogChain) {
        self.chains.insert(number, chain);
    }

    pub fn get(&self, number: AccountNumber) -> Option<&LogChain> {
        self.chains.get(&number)
    }

    pub fn contains(&self, number: AccountNumber) -> bool {
        self.chains.contains_key(&number)
    }

    pub fn max_number(&self) -> Option<AccountNumber> {
        self.chains.keys().next_back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AccountNumber, &LogChain)> {
        self.chains.iter().map(|(n, chain)| (*n, chain))
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}
