use std::fmt;

use crate::common::{clock::Clock, error::InputError, event::LedgerEvent, money::Money};
use crate::domain::log_chain::LogChain;

pub type AccountNumber = u32;

/// Four-digit credential. Stored as an integer, so leading zeros only
/// exist in the rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pin(i32);

impl Pin {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl std::str::FromStr for Pin {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.len() != 4 || !t.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InputError::Pin);
        }
        t.parse().map(Pin).map_err(|_| InputError::Pin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_byte(&self) -> u8 {
        match self {
            Gender::Male => b'M',
            Gender::Female => b'F',
        }
    }

    /// Anything but `M` reads as female, matching how stored records were
    /// always displayed.
    pub fn from_byte(byte: u8) -> Self {
        if byte == b'M' {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("Male"),
            Gender::Female => f.write_str("Female"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Current,
    Savings,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Current => "Current",
            AccountType::Savings => "Savings",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Current" => Some(AccountType::Current),
            "Savings" => Some(AccountType::Savings),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The holder details supplied when opening an account or editing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub name: String,
    pub identity: String,
    pub gender: Gender,
    pub account_type: AccountType,
    pub pin: Pin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub number: AccountNumber,
    pub name: String,
    /// Passport or ID number.
    pub identity: String,
    pub gender: Gender,
    pub account_type: AccountType,
    pub pin: Pin,
    /// Never negative.
    pub balance: Money,
    log: LogChain,
}

impl Account {
    pub fn new(number: AccountNumber, profile: AccountProfile, balance: Money) -> Self {
        Self {
            number,
            name: profile.name,
            identity: profile.identity,
            gender: profile.gender,
            account_type: profile.account_type,
            pin: profile.pin,
            balance,
            log: LogChain::new(),
        }
    }

    pub fn pin_matches(&self, pin: Pin) -> bool {
        self.pin == pin
    }

    pub fn apply_profile(&mut self, profile: AccountProfile) {
        self.name = profile.name;
        self.identity = profile.identity;
        self.gender = profile.gender;
        self.account_type = profile.account_type;
        self.pin = profile.pin;
    }

    /// Appends `"<event> at <timestamp>"` to the log chain.
    pub fn record_event(&mut self, event: LedgerEvent, clock: &impl Clock) {
        self.log.append(format!("{event} at {}", clock.timestamp()));
    }

    pub fn log(&self) -> &LogChain {
        &self.log
    }

    /// Replaces the chain wholesale; only used when restoring from disk.
    pub fn attach_log(&mut self, log: LogChain) {
        self.log = log;
    }

    /// Consumes the account, handing its chain to the caller.
    pub fn into_log(self) -> LogChain {
        self.log
    }
}
