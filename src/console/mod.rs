//! Interactive menus over any line reader and writer.
//!
//! Every prompt re-asks until the line parses; running out of input ends
//! the session from whichever menu is active.

mod admin;
mod atm;
pub mod input;
mod staff;

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::{
    common::{clock::Clock, error::InputError},
    config::Config,
    domain::{
        account::{Account, AccountNumber},
        log_chain::LogEntry,
    },
    io::storage::Storage,
    worker::processor::Processor,
};

const RULE: &str = "********************************";

pub struct Console<R, W> {
    reader: R,
    writer: W,
    config: Config,
}

/// `Account No: 0001; Name: ..; ...; Balance: RM 500`
pub fn record_line(account: &Account) -> String {
    format!(
        "Account No: {:04}; Name: {}; Passport No: {}; Gender: {}; Type: {}; PIN: {}; Balance: RM {}",
        account.number,
        account.name,
        account.identity,
        account.gender,
        account.account_type,
        account.pin,
        account.balance
    )
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W, config: &Config) -> Self {
        Self {
            reader,
            writer,
            config: config.clone(),
        }
    }

    /// Runs the main menu until the operator exits or input is exhausted.
    pub fn run<S: Storage, C: Clock>(&mut self, processor: &mut Processor<S, C>) -> io::Result<()> {
        match self.main_menu(processor) {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("input closed, leaving console");
                self.writer.flush()
            }
            other => other,
        }
    }

    fn main_menu<S: Storage, C: Clock>(&mut self, processor: &mut Processor<S, C>) -> io::Result<()> {
        loop {
            let choice = self.menu(
                "MAIN MENU",
                &["Admin Login", "Staff Login", "ATM / CDM", "Exit"],
            )?;
            match choice {
                Some(1) => {
                    let pin = self.ask("Enter Admin PIN: ", input::pin)?;
                    if pin == self.config.admin_pin {
                        self.admin_panel(processor)?;
                    } else {
                        warn!("rejected admin login");
                        self.say("Wrong PIN.")?;
                    }
                }
                Some(2) => {
                    let pin = self.ask("Enter Staff PIN: ", input::pin)?;
                    if pin == self.config.staff_pin {
                        self.staff_panel(processor)?;
                    } else {
                        warn!("rejected staff login");
                        self.say("Wrong PIN.")?;
                    }
                }
                Some(3) => self.atm_panel(processor)?,
                Some(4) => {
                    self.say("Bye!")?;
                    return self.writer.flush();
                }
                _ => self.say("Invalid option.")?,
            }
        }
    }

    // -- prompt helpers --

    fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.writer, "{text}")
    }

    // Bytes that are not UTF-8 become U+FFFD, so the line fails whichever
    // parser reads it instead of ending the session.
    fn read_line(&mut self) -> io::Result<String> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn prompt(&mut self, text: &str) -> io::Result<String> {
        write!(self.writer, "{text}")?;
        self.writer.flush()?;
        self.read_line()
    }

    fn ask<T>(
        &mut self,
        text: &str,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> io::Result<T> {
        loop {
            let line = self.prompt(text)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) => self.say(e)?,
            }
        }
    }

    fn ask_account(&mut self, text: &str) -> io::Result<AccountNumber> {
        self.ask(text, input::account_number)
    }

    /// Prints a numbered menu and reads one choice. `None` when the line is
    /// not a number.
    fn menu(&mut self, title: &str, options: &[&str]) -> io::Result<Option<u8>> {
        writeln!(self.writer)?;
        self.say(format!("********** {title} **********"))?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.writer, "{}. {option}", i + 1)?;
        }
        self.say(RULE)?;
        let line = self.prompt("Enter an option: ")?;
        Ok(input::choice(&line).ok())
    }

    fn show_entries(&mut self, entries: &[LogEntry]) -> io::Result<()> {
        for entry in entries {
            self.say(entry.text())?;
        }
        Ok(())
    }

    /// Live chain, else the retained chain of a deleted account.
    fn show_logs<S: Storage, C: Clock>(
        &mut self,
        processor: &Processor<S, C>,
        number: AccountNumber,
    ) -> io::Result<()> {
        match processor.logs_for(number) {
            None => self.say("Logs Not Found....!!!"),
            Some(chain) if chain.is_empty() => self.say("[No logs]"),
            Some(chain) => {
                if !processor.exists(number) {
                    self.say(format!("Logs of deleted account {number:04}:"))?;
                }
                self.show_entries(chain.entries())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use clap::Parser;

    use super::*;
    use crate::{
        common::{clock::FixedClock, money::Money},
        domain::{
            account::{AccountProfile, AccountType, Gender, Pin},
            ledger::Ledger,
        },
        io::storage::InMemoryStorage,
        worker::handlers::fixtures::{clock, profile},
    };

    pub(super) type TestProcessor = Processor<InMemoryStorage, FixedClock>;

    pub(super) fn processor() -> TestProcessor {
        Processor::new(Ledger::new(), InMemoryStorage::new(), clock())
    }

    /// Processor with account 0001 (PIN 1234, RM 500) and 0002 (PIN 0042, RM 100).
    pub(super) fn seeded() -> TestProcessor {
        let mut p = processor();
        p.create(profile("AAA111", 1234), Money::new(500)).unwrap();
        p.create(profile("BBB222", 42), Money::new(100)).unwrap();
        p
    }

    pub(super) fn session(script: &str, processor: &mut TestProcessor) -> String {
        session_bytes(script.as_bytes(), processor)
    }

    pub(super) fn session_bytes(script: &[u8], processor: &mut TestProcessor) -> String {
        let config = Config::try_parse_from([
            "bank-ledger",
            "--admin-pin",
            "1111",
            "--staff-pin",
            "2222",
        ])
        .unwrap();
        let mut out = Vec::new();
        Console::new(Cursor::new(script), &mut out, &config)
            .run(processor)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn record_line_pads_number_and_pin() {
        let account = Account::new(
            1,
            AccountProfile {
                name: "Siti Aminah".into(),
                identity: "A1234567".into(),
                gender: Gender::Female,
                account_type: AccountType::Savings,
                pin: Pin::new(42),
            },
            Money::new(500),
        );

        assert_eq!(
            record_line(&account),
            "Account No: 0001; Name: Siti Aminah; Passport No: A1234567; Gender: Female; Type: Savings; PIN: 0042; Balance: RM 500"
        );
    }

    #[test]
    fn exit_says_goodbye() {
        let out = session("4\n", &mut processor());
        assert!(out.contains("********** MAIN MENU **********"));
        assert!(out.ends_with("Bye!\n"));
    }

    #[test]
    fn end_of_input_leaves_cleanly_from_any_menu() {
        let mut p = seeded();
        session("", &mut p);
        session("1\n1111\n", &mut p);
        session("3\n1\n0001\n1234\n", &mut p);
        session("1\n1111\n1\nSiti", &mut p);
        assert_eq!(p.ledger().accounts().len(), 2);
    }

    #[test]
    fn wrong_role_pin_is_rejected() {
        let out = session("1\n9999\n2\n1111\n4\n", &mut processor());
        assert_eq!(out.matches("Wrong PIN.").count(), 2);
        assert!(!out.contains("ADMIN PANEL"));
    }

    #[test]
    fn non_utf8_lines_are_rejected_not_fatal() {
        let mut p = seeded();
        let out = session_bytes(
            b"\xff\n1\n\xff\n1111\n3\n00\xe901\n0001\n7\n4\n",
            &mut p,
        );

        assert!(out.contains("Invalid option."));
        assert!(out.contains("PIN must be exactly 4 digits."));
        assert!(out.contains("Invalid input."));
        assert!(out.contains("Account No: 0001;"));
        assert!(out.ends_with("Bye!\n"));
    }

    #[test]
    fn invalid_lines_are_reprompted() {
        let out = session("x\n9\n1\n11\n1111\n7\n4\n", &mut processor());
        assert_eq!(out.matches("Invalid option.").count(), 2);
        assert!(out.contains("PIN must be exactly 4 digits."));
        assert!(out.contains("ADMIN PANEL"));
    }

    #[test]
    fn logs_of_unknown_account_are_not_found() {
        let out = session("2\n2222\n4\n0099\n5\n4\n", &mut processor());
        assert!(out.contains("Logs Not Found....!!!"));
    }
}
