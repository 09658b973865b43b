use std::io::{self, BufRead, Write};

use tracing::warn;

use super::{Console, input};
use crate::{
    common::{clock::Clock, error::LedgerError},
    domain::{
        account::{AccountNumber, Pin},
        ledger::PinCheck,
    },
    io::storage::Storage,
    worker::processor::Processor,
};

impl<R: BufRead, W: Write> Console<R, W> {
    pub(super) fn atm_panel<S: Storage, C: Clock>(
        &mut self,
        processor: &mut Processor<S, C>,
    ) -> io::Result<()> {
        loop {
            let choice = self.menu(
                "ATM / CDM",
                &["ATM Service", "CDM Service", "Back to Main Menu"],
            )?;
            let cdm = match choice {
                Some(1) => false,
                Some(2) => true,
                Some(3) => return Ok(()),
                _ => {
                    self.say("Invalid option.")?;
                    continue;
                }
            };

            let number = self.ask_account("Enter Account Number: ")?;
            if !processor.exists(number) {
                self.say("Account not found.")?;
                continue;
            }
            let pin = self.ask("Enter PIN: ", input::pin)?;
            if processor.check_pin(number, pin) != PinCheck::Match {
                warn!(account = number, "rejected card login");
                self.say("PIN incorrect.")?;
                continue;
            }

            if cdm {
                self.cdm_service(processor, number, pin)?;
            } else {
                self.atm_service(processor, number, pin)?;
            }
        }
    }

    fn mini_statement_label(&self) -> String {
        format!(
            "Mini Statement (Last {} Transactions)",
            self.config.mini_statement_len
        )
    }

    fn atm_service<S: Storage, C: Clock>(
        &mut self,
        processor: &mut Processor<S, C>,
        number: AccountNumber,
        mut pin: Pin,
    ) -> io::Result<()> {
        let mini = self.mini_statement_label();
        loop {
            let choice = self.menu(
                "ATM SERVICE",
                &[
                    "Withdraw Cash",
                    "Check Account Balance",
                    mini.as_str(),
                    "Transfer Money to Another Account",
                    "Change PIN",
                    "Back to ATM/CDM Menu",
                ],
            )?;
            match choice {
                Some(1) => {
                    let amount = self.ask("Enter Amount to Withdraw: RM ", input::amount)?;
                    match processor.withdraw(number, pin, amount) {
                        Ok(_) => self.say("Withdraw successful.")?,
                        Err(e) => self.say(e)?,
                    }
                }
                Some(2) => self.show_balance(processor, number, pin)?,
                Some(3) => self.show_mini_statement(processor, number, pin)?,
                Some(4) => self.send(processor, number, pin, "Transfer")?,
                Some(5) => {
                    let old_pin = self.ask("Enter Old PIN: ", input::pin)?;
                    let new_pin = self.ask("Enter New PIN: ", input::pin)?;
                    match processor.change_pin(number, old_pin, new_pin) {
                        Ok(()) => {
                            pin = new_pin;
                            self.say("PIN changed.")?;
                        }
                        Err(LedgerError::PinMismatch) => self.say("Old PIN incorrect.")?,
                        Err(e) => self.say(e)?,
                    }
                }
                Some(6) => return Ok(()),
                _ => self.say("Invalid option.")?,
            }
        }
    }

    fn cdm_service<S: Storage, C: Clock>(
        &mut self,
        processor: &mut Processor<S, C>,
        number: AccountNumber,
        pin: Pin,
    ) -> io::Result<()> {
        let mini = self.mini_statement_label();
        loop {
            let choice = self.menu(
                "CDM SERVICE",
                &["Deposit Cash", "Check Account Balance", mini.as_str(), "Back to ATM/CDM Menu"],
            )?;
            match choice {
                Some(1) => self.cdm_deposit(processor, number, pin)?,
                Some(2) => self.show_balance(processor, number, pin)?,
                Some(3) => self.show_mini_statement(processor, number, pin)?,
                Some(4) => return Ok(()),
                _ => self.say("Invalid option.")?,
            }
        }
    }

    fn cdm_deposit<S: Storage, C: Clock>(
        &mut self,
        processor: &mut Processor<S, C>,
        number: AccountNumber,
        pin: Pin,
    ) -> io::Result<()> {
        loop {
            let choice = self.menu(
                "Deposit Cash",
                &["Deposit to My Account", "Deposit to Another Account", "Back to CDM Menu"],
            )?;
            match choice {
                Some(1) => {
                    let amount = self.ask("Enter Amount to Deposit: RM ", input::amount)?;
                    match processor.deposit(number, pin, amount) {
                        Ok(_) => self.say("Deposit successful.")?,
                        Err(e) => self.say(e)?,
                    }
                }
                // paid out of the session account
                Some(2) => self.send(processor, number, pin, "Deposit")?,
                Some(3) => return Ok(()),
                _ => self.say("Invalid option.")?,
            }
        }
    }

    fn send<S: Storage, C: Clock>(
        &mut self,
        processor: &mut Processor<S, C>,
        number: AccountNumber,
        pin: Pin,
        verb: &str,
    ) -> io::Result<()> {
        let destination = self.ask_account("Enter Recipient Account Number: ")?;
        if !processor.exists(destination) {
            return self.say("Recipient account not found.");
        }
        let amount = self.ask(&format!("Enter Amount to {verb}: RM "), input::amount)?;
        match processor.transfer(number, pin, destination, amount) {
            Ok(_) => self.say(format!("{verb} successful.")),
            Err(e) => self.say(e),
        }
    }

    fn show_balance<S: Storage, C: Clock>(
        &mut self,
        processor: &Processor<S, C>,
        number: AccountNumber,
        pin: Pin,
    ) -> io::Result<()> {
        match processor.balance(number, pin) {
            Ok(balance) => self.say(format!("Current Balance: RM {balance}")),
            Err(e) => self.say(e),
        }
    }

    fn show_mini_statement<S: Storage, C: Clock>(
        &mut self,
        processor: &Processor<S, C>,
        number: AccountNumber,
        pin: Pin,
    ) -> io::Result<()> {
        let count = self.config.mini_statement_len;
        match processor.mini_statement(number, pin, count) {
            Ok(entries) => self.show_entries(entries),
            Err(e) => self.say(e),
        }
    }
}
