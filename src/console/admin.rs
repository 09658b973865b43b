use std::io::{self, BufRead, Write};

use super::{Console, input, record_line};
use crate::{
    common::clock::Clock,
    domain::account::AccountProfile,
    io::{storage::Storage, writer},
    worker::processor::Processor,
};

impl<R: BufRead, W: Write> Console<R, W> {
    pub(super) fn admin_panel<S: Storage, C: Clock>(
        &mut self,
        processor: &mut Processor<S, C>,
    ) -> io::Result<()> {
        loop {
            let choice = self.menu(
                "ADMIN PANEL",
                &[
                    "Create Account",
                    "Delete Account",
                    "Search Account",
                    "Show All Accounts",
                    "Edit Information",
                    "Show Logs of Deleted Account",
                    "Back to Main Menu",
                ],
            )?;
            match choice {
                Some(1) => self.create_account(processor)?,
                Some(2) => {
                    let number = self.ask_account("Enter Account Number to Delete: ")?;
                    match processor.delete(number) {
                        Ok(()) => self.say("Account deleted.")?,
                        Err(e) => self.say(e)?,
                    }
                }
                Some(3) => {
                    let number = self.ask_account("Enter Account Number to Search: ")?;
                    match processor.find(number) {
                        Some(account) => self.say(record_line(account))?,
                        None => self.say("Account not found.")?,
                    }
                }
                Some(4) => {
                    let accounts = processor.ledger().accounts();
                    if accounts.is_empty() {
                        self.say("No accounts found.")?;
                    } else {
                        writer::write_accounts(&mut self.writer, accounts)
                            .map_err(io::Error::other)?;
                    }
                }
                Some(5) => self.edit_account(processor)?,
                Some(6) => {
                    let number = self.ask_account("Enter Account Number: ")?;
                    self.show_logs(processor, number)?;
                }
                Some(7) => return Ok(()),
                _ => self.say("Invalid option.")?,
            }
        }
    }

    fn ask_profile(&mut self, label: &str) -> io::Result<AccountProfile> {
        let name = self.ask(&format!("Enter {label}Name: "), |line| input::name(line, 4))?;
        let identity = self.ask(&format!("Enter {label}Passport No: "), input::passport)?;
        let gender = self.ask("Enter Gender (M/F): ", input::gender)?;
        let account_type = self.ask("Enter Account Type (C/S): ", input::account_type)?;
        let pin = self.ask(&format!("Enter {label}PIN: "), input::pin)?;
        Ok(AccountProfile {
            name,
            identity,
            gender,
            account_type,
            pin,
        })
    }

    fn create_account<S: Storage, C: Clock>(
        &mut self,
        processor: &mut Processor<S, C>,
    ) -> io::Result<()> {
        let profile = self.ask_profile("Customer's Full ")?;
        let minimum = self.config.min_opening_balance();
        let balance = loop {
            let amount = self.ask(
                &format!("Enter Balance (Min:{minimum}): RM "),
                input::amount,
            )?;
            if amount >= minimum {
                break amount;
            }
            self.say(format!("Minimum Balance is {minimum}."))?;
        };

        match processor.create(profile, balance) {
            Ok(number) => {
                self.say("Account created successfully.")?;
                self.say(format!("Generated Account Number: {number:04}"))
            }
            Err(e) => self.say(e),
        }
    }

    fn edit_account<S: Storage, C: Clock>(
        &mut self,
        processor: &mut Processor<S, C>,
    ) -> io::Result<()> {
        let number = self.ask_account("Enter Account Number: ")?;
        if !processor.exists(number) {
            return self.say("Account not found.");
        }
        let profile = self.ask_profile("New ")?;
        match processor.edit_info(number, profile) {
            Ok(()) => self.say("Information changed."),
            Err(e) => self.say(e),
        }
    }
}
