use crate::domain::account::AccountNumber;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Cli(#[from] clap::Error),
    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to load ledger: {0}")]
    Storage(#[from] StorageError),
}

/// Outcome of a rejected ledger operation. The message is what the menu
/// shows to the user.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account {0:04} not found.")]
    NotFound(AccountNumber),
    #[error("Recipient account {0:04} not found.")]
    DestinationNotFound(AccountNumber),
    #[error("PIN incorrect.")]
    PinMismatch,
    #[error("Invalid amount.")]
    InvalidAmount,
    #[error("Insufficient funds.")]
    InsufficientFunds,
    #[error("Account with this passport number already exists!")]
    DuplicateIdentity,
    #[error("Cannot transfer to the same account.")]
    SameAccount,
    #[error("No transactions.")]
    NoLogs,
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{field} value {value} does not fit the record format")]
    FieldOutOfRange { field: &'static str, value: i64 },
}

/// Rejected console input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid input.")]
    Number,
    #[error("Invalid name.")]
    Name,
    #[error("PIN must be exactly 4 digits.")]
    Pin,
    #[error("Please enter your passport number.")]
    PassportMissing,
    #[error("Passport number must be 6-9 letters/digits, no spaces or symbols.")]
    Passport,
    #[error("Invalid gender.")]
    Gender,
    #[error("Invalid account type.")]
    AccountType,
    #[error("Invalid amount: {0}")]
    Amount(String),
    #[error("Invalid choice.")]
    Choice,
}
