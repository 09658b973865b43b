use std::io::{self, BufRead, Write};

use super::{Console, input, record_line};
use crate::{
    common::{clock::Clock, error::LedgerError, money::Money},
    domain::account::{AccountNumber, Pin},
    io::storage::Storage,
    worker::processor::Processor,
};

#[derive(Clone, Copy)]
enum Cash {
    Deposit,
    Withdraw,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub(super) fn staff_panel<S: Storage, C: Clock>(
        &mut self,
        processor: &mut Processor<S, C>,
    ) -> io::Result<()> {
        loop {
            let choice = self.menu(
                "STAFF PANEL",
                &[
                    "Check Account Info",
                    "Deposit Cash",
                    "Withdraw Cash",
                    "Check Logs of User",
                    "Back to Main Menu",
                ],
            )?;
            match choice {
                Some(1) => {
                    let number = self.ask_account("Enter Account Number: ")?;
                    match processor.find(number) {
                        Some(account) => self.say(record_line(account))?,
                        None => self.say("User not found.")?,
                    }
                }
                Some(2) => self.counter_cash(processor, Cash::Deposit)?,
                Some(3) => self.counter_cash(processor, Cash::Withdraw)?,
                Some(4) => {
                    let number = self.ask_account("Enter Account Number: ")?;
                    self.show_logs(processor, number)?;
                }
                Some(5) => return Ok(()),
                _ => self.say("Invalid option.")?,
            }
        }
    }

    /// Cash handled at the counter, with the record shown before and after.
    fn counter_cash<S: Storage, C: Clock>(
        &mut self,
        processor: &mut Processor<S, C>,
        kind: Cash,
    ) -> io::Result<()> {
        let verb = match kind {
            Cash::Deposit => "Deposit",
            Cash::Withdraw => "Withdraw",
        };
        let number = self.ask_account("Enter Account: ")?;
        let pin = self.ask("Enter Account PIN: ", input::pin)?;
        let amount = self.ask(&format!("Enter Amount to {verb}: RM "), input::amount)?;

        let Some(account) = processor.find(number) else {
            return self.say("Account not found.");
        };
        self.say(format!("Status BEFORE {verb}:"))?;
        self.say(record_line(account))?;

        match apply(processor, kind, number, pin, amount) {
            Ok(_) => {
                self.say(format!("Status AFTER {verb}:"))?;
                if let Some(account) = processor.find(number) {
                    self.say(record_line(account))?;
                }
                self.say(format!("{verb} successful."))
            }
            Err(e) => self.say(e),
        }
    }
}

fn apply<S: Storage, C: Clock>(
    processor: &mut Processor<S, C>,
    kind: Cash,
    number: AccountNumber,
    pin: Pin,
    amount: Money,
) -> Result<Money, LedgerError> {
    match kind {
        Cash::Deposit => processor.deposit(number, pin, amount),
        Cash::Withdraw => processor.withdraw(number, pin, amount),
    }
}
