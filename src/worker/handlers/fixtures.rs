use crate::{
    common::{clock::FixedClock, money::Money},
    domain::{
        account::{AccountNumber, AccountProfile, AccountType, Gender, Pin},
        ledger::Ledger,
    },
    worker::handlers::open,
};

pub(crate) const STAMP: &str = "Mon Jan  1 09:00:00 2024";

pub(crate) fn clock() -> FixedClock {
    FixedClock::new(STAMP)
}

pub(crate) fn profile(identity: &str, pin: i32) -> AccountProfile {
    AccountProfile {
        name: "Test Holder".into(),
        identity: identity.into(),
        gender: Gender::Female,
        account_type: AccountType::Savings,
        pin: Pin::new(pin),
    }
}

// Opens an account through the real handler so it carries its creation log.
pub(crate) fn seed(ledger: &mut Ledger, identity: &str, pin: i32, balance: i64) -> AccountNumber {
    open::handle(ledger, &clock(), profile(identity, pin), Money::new(balance))
        .expect("seed account")
}

pub(crate) fn log_texts(ledger: &Ledger, number: AccountNumber) -> Vec<String> {
    ledger
        .logs_for(number)
        .map(|chain| chain.iter().map(|e| e.text().to_string()).collect())
        .unwrap_or_default()
}

pub(crate) fn stamped(message: &str) -> String {
    format!("{message} at {STAMP}")
}
