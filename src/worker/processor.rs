use tracing::{debug, info, warn};

use crate::{
    common::{
        clock::{Clock, SystemClock},
        error::{LedgerError, StorageError},
        money::Money,
    },
    domain::{
        account::{Account, AccountNumber, AccountProfile, Pin},
        ledger::{Ledger, PinCheck},
        log_chain::{LogChain, LogEntry},
    },
    io::storage::Storage,
    worker::handlers::{
        change_pin, close, deposit, edit, open, query,
        transfer::{self, TransferReceipt},
        withdrawal,
    },
};

/// The ledger store as seen by the menus. Every successful mutation is
/// followed by a full save; a failed save is logged and otherwise ignored,
/// leaving the in-memory state authoritative.
#[derive(Debug)]
pub struct Processor<S: Storage, C: Clock = SystemClock> {
    ledger: Ledger,
    storage: S,
    clock: C,
}

impl<S: Storage, C: Clock> Processor<S, C> {
    pub fn new(ledger: Ledger, storage: S, clock: C) -> Self {
        Self {
            ledger,
            storage,
            clock,
        }
    }

    /// Rebuilds the ledger from `storage`.
    pub fn load(storage: S, clock: C) -> Result<Self, StorageError> {
        let ledger = storage.load()?;
        info!(
            accounts = ledger.accounts().len(),
            deleted = ledger.deleted.len(),
            log_entries = ledger.log_entry_count(),
            "ledger loaded"
        );
        Ok(Self::new(ledger, storage, clock))
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    fn persist(&mut self) {
        if let Err(e) = self.storage.save(&self.ledger) {
            warn!(error = %e, "could not persist ledger, changes are in memory only");
        }
    }

    pub fn generate_account_number(&self) -> AccountNumber {
        self.ledger.next_account_number()
    }

    pub fn create(
        &mut self,
        profile: AccountProfile,
        opening_balance: Money,
    ) -> Result<AccountNumber, LedgerError> {
        let number = open::handle(&mut self.ledger, &self.clock, profile, opening_balance)?;
        info!(account = number, balance = %opening_balance, "account created");
        self.persist();
        Ok(number)
    }

    pub fn find(&self, number: AccountNumber) -> Option<&Account> {
        self.ledger.find(number)
    }

    pub fn exists(&self, number: AccountNumber) -> bool {
        self.ledger.exists(number)
    }

    pub fn check_pin(&self, number: AccountNumber, pin: Pin) -> PinCheck {
        self.ledger.check_pin(number, pin)
    }

    pub fn deposit(
        &mut self,
        number: AccountNumber,
        pin: Pin,
        amount: Money,
    ) -> Result<Money, LedgerError> {
        let balance = deposit::handle(&mut self.ledger, &self.clock, number, pin, amount)?;
        debug!(account = number, %amount, %balance, "deposit");
        self.persist();
        Ok(balance)
    }

    pub fn withdraw(
        &mut self,
        number: AccountNumber,
        pin: Pin,
        amount: Money,
    ) -> Result<Money, LedgerError> {
        let balance = withdrawal::handle(&mut self.ledger, &self.clock, number, pin, amount)?;
        debug!(account = number, %amount, %balance, "withdrawal");
        self.persist();
        Ok(balance)
    }

    /// Both sides are updated before the single save.
    pub fn transfer(
        &mut self,
        source: AccountNumber,
        pin: Pin,
        destination: AccountNumber,
        amount: Money,
    ) -> Result<TransferReceipt, LedgerError> {
        let receipt = transfer::handle(
            &mut self.ledger,
            &self.clock,
            source,
            pin,
            destination,
            amount,
        )?;
        debug!(source, destination, %amount, "transfer");
        self.persist();
        Ok(receipt)
    }

    pub fn change_pin(
        &mut self,
        number: AccountNumber,
        old_pin: Pin,
        new_pin: Pin,
    ) -> Result<(), LedgerError> {
        change_pin::handle(&mut self.ledger, &self.clock, number, old_pin, new_pin)?;
        info!(account = number, "pin changed");
        self.persist();
        Ok(())
    }

    pub fn balance(&self, number: AccountNumber, pin: Pin) -> Result<Money, LedgerError> {
        query::balance(&self.ledger, number, pin)
    }

    pub fn mini_statement(
        &self,
        number: AccountNumber,
        pin: Pin,
        count: usize,
    ) -> Result<&[LogEntry], LedgerError> {
        query::mini_statement(&self.ledger, number, pin, count)
    }

    pub fn edit_info(
        &mut self,
        number: AccountNumber,
        profile: AccountProfile,
    ) -> Result<(), LedgerError> {
        edit::handle(&mut self.ledger, &self.clock, number, profile)?;
        info!(account = number, "account info changed");
        self.persist();
        Ok(())
    }

    pub fn delete(&mut self, number: AccountNumber) -> Result<(), LedgerError> {
        close::handle(&mut self.ledger, &self.clock, number)?;
        info!(account = number, "account deleted, logs retained");
        self.persist();
        Ok(())
    }

    /// Live chain first, then the deleted registry. `None` means no logs
    /// exist for that number at all.
    pub fn logs_for(&self, number: AccountNumber) -> Option<&LogChain> {
        self.ledger.logs_for(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::clock::FixedClock,
        io::{codec, storage::InMemoryStorage},
        worker::handlers::{
            deposit,
            fixtures::{clock, profile, seed, stamped},
        },
    };

    fn processor() -> Processor<InMemoryStorage, FixedClock> {
        Processor::new(Ledger::new(), InMemoryStorage::new(), clock())
    }

    #[test]
    fn every_successful_mutation_saves_once() {
        let mut p = processor();

        let a = p.create(profile("AAA111", 1234), Money::new(500)).unwrap();
        let b = p.create(profile("BBB222", 42), Money::new(100)).unwrap();
        p.deposit(a, Pin::new(1234), Money::new(200)).unwrap();
        p.withdraw(a, Pin::new(1234), Money::new(50)).unwrap();
        p.transfer(a, Pin::new(1234), b, Money::new(10)).unwrap();
        p.change_pin(b, Pin::new(42), Pin::new(43)).unwrap();
        p.edit_info(b, profile("BBB223", 43)).unwrap();
        p.delete(b).unwrap();

        assert_eq!(p.storage().saves(), 8);
    }

    #[test]
    fn failed_operations_and_queries_do_not_save() {
        let mut p = processor();
        let a = p.create(profile("AAA111", 1234), Money::new(500)).unwrap();

        assert!(p.deposit(a, Pin::new(1), Money::new(5)).is_err());
        assert!(p.withdraw(a, Pin::new(1234), Money::new(5_000)).is_err());
        assert!(p.create(profile("AAA111", 1), Money::new(500)).is_err());
        assert!(p.delete(99).is_err());
        p.balance(a, Pin::new(1234)).unwrap();
        p.mini_statement(a, Pin::new(1234), 5).unwrap();

        assert_eq!(p.storage().saves(), 1);
    }

    #[test]
    fn write_failure_keeps_in_memory_state() {
        let mut p = processor();
        p.storage_mut().set_fail_writes(true);

        let a = p.create(profile("AAA111", 1234), Money::new(500)).unwrap();
        let balance = p.deposit(a, Pin::new(1234), Money::new(1)).unwrap();

        assert_eq!(balance, Money::new(501));
        assert_eq!(p.find(a).unwrap().balance, Money::new(501));
        assert_eq!(p.storage().saves(), 0);
    }

    #[test]
    fn load_restores_saved_state() {
        let mut p = processor();
        let a = p.create(profile("AAA111", 1234), Money::new(500)).unwrap();
        p.deposit(a, Pin::new(1234), Money::new(200)).unwrap();

        let restored = Processor::load(p.storage().clone(), clock()).unwrap();

        assert_eq!(restored.find(a), p.find(a));
        assert_eq!(restored.logs_for(a), p.logs_for(a));
        assert_eq!(restored.generate_account_number(), 2);
    }

    #[test]
    fn load_from_file_images_with_truncated_log_keeps_accounts() {
        let mut source = Ledger::new();
        let a = seed(&mut source, "AAA111", 1234, 500);
        let b = seed(&mut source, "BBB222", 42, 100);
        deposit::handle(&mut source, &clock(), b, Pin::new(42), Money::new(5)).unwrap();
        let accounts = codec::encode_accounts(&source).unwrap();
        let mut logs = codec::encode_logs(&source).unwrap();
        // cut into the last entry of the second block
        logs.truncate(logs.len() - 3);

        let mut p = Processor::load(InMemoryStorage::with_bytes(accounts, logs), clock()).unwrap();

        assert_eq!(p.find(a).unwrap().balance, Money::new(500));
        assert_eq!(p.find(b).unwrap().balance, Money::new(105));
        assert_eq!(
            p.logs_for(a).unwrap().entries()[0].text(),
            stamped("Account created")
        );
        assert!(p.logs_for(b).unwrap().is_empty());

        p.deposit(b, Pin::new(42), Money::new(1)).unwrap();
        assert_eq!(p.storage().saves(), 1);
        assert_eq!(p.logs_for(b).unwrap().len(), 1);
    }
}
