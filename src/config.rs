use std::path::PathBuf;

use clap::Parser;

use crate::{
    common::money::Money,
    domain::account::Pin,
    io::storage::{ACCOUNTS_FILE, FileStorage, LOGS_FILE},
};

/// Runtime settings. Role credentials live here rather than in code so
/// they can be changed per deployment.
#[derive(Parser, Debug, Clone)]
#[command(name = "bank-ledger", version, about = "Role-gated bank account ledger")]
pub struct Config {
    /// Directory holding the account and log files
    #[arg(long, env = "BANK_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Account file name inside the data directory
    #[arg(long, default_value = ACCOUNTS_FILE)]
    pub accounts_file: String,

    /// Log file name inside the data directory
    #[arg(long, default_value = LOGS_FILE)]
    pub logs_file: String,

    /// PIN for the admin panel
    #[arg(long, env = "BANK_ADMIN_PIN", default_value = "1111")]
    pub admin_pin: Pin,

    /// PIN for the staff panel
    #[arg(long, env = "BANK_STAFF_PIN", default_value = "2222")]
    pub staff_pin: Pin,

    /// Smallest balance an account can be opened with
    #[arg(long, default_value_t = 500)]
    pub min_opening_balance: i64,

    /// Number of entries shown in a mini statement
    #[arg(long, default_value_t = 5)]
    pub mini_statement_len: usize,
}

impl Config {
    pub fn accounts_path(&self) -> PathBuf {
        self.data_dir.join(&self.accounts_file)
    }

    pub fn logs_path(&self) -> PathBuf {
        self.data_dir.join(&self.logs_file)
    }

    pub fn min_opening_balance(&self) -> Money {
        Money::new(self.min_opening_balance)
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.accounts_path(), self.logs_path())
    }
}
