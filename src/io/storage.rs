//! Durable storage of the ledger.
//!
//! Both implementations go through [`codec`](crate::io::codec), so the
//! in-memory one exercises exactly the bytes that would hit the disk.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    common::error::StorageError,
    domain::ledger::Ledger,
    io::codec,
};

pub const ACCOUNTS_FILE: &str = "accounts.dat";
pub const LOGS_FILE: &str = "logs.dat";

/// Where the ledger lives between runs.
pub trait Storage {
    /// Rewrites the account file and the log file in full.
    fn save(&mut self, ledger: &Ledger) -> Result<(), StorageError>;

    /// Rebuilds a ledger from whatever was last saved.
    fn load(&self) -> Result<Ledger, StorageError>;
}

/// Attaches decoded log blocks to decoded accounts. Blocks without a live
/// account become deleted-registry entries.
pub fn assemble(accounts_bytes: &[u8], logs_bytes: &[u8]) -> Ledger {
    let mut ledger = Ledger::new();
    for account in codec::decode_accounts(accounts_bytes) {
        ledger.insert(account);
    }
    for block in codec::decode_logs(logs_bytes) {
        ledger.attach_log(block.number, block.chain);
    }
    ledger
}

// -- file storage implementation --

/// Two flat binary files on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileStorage {
    accounts_path: PathBuf,
    logs_path: PathBuf,
}

impl FileStorage {
    pub fn new(accounts_path: impl Into<PathBuf>, logs_path: impl Into<PathBuf>) -> Self {
        Self {
            accounts_path: accounts_path.into(),
            logs_path: logs_path.into(),
        }
    }

    /// `accounts.dat` and `logs.dat` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(ACCOUNTS_FILE), dir.join(LOGS_FILE))
    }

    pub fn accounts_path(&self) -> &Path {
        &self.accounts_path
    }

    pub fn logs_path(&self) -> &Path {
        &self.logs_path
    }
}

// write to a sibling temp file then rename over the target
fn replace_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut temp_path = path.as_os_str().to_owned();
    temp_path.push(".tmp");
    let temp_path = PathBuf::from(temp_path);

    let mut file = File::create(&temp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(&temp_path, path)
}

fn read_if_exists(path: &Path) -> io::Result<Vec<u8>> {
    match File::open(path) {
        Ok(mut file) => {
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            Ok(bytes)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

impl Storage for FileStorage {
    fn save(&mut self, ledger: &Ledger) -> Result<(), StorageError> {
        let accounts = codec::encode_accounts(ledger)?;
        let logs = codec::encode_logs(ledger)?;

        replace_file(&self.accounts_path, &accounts)?;
        replace_file(&self.logs_path, &logs)?;

        debug!(
            accounts = ledger.accounts().len(),
            deleted = ledger.deleted.len(),
            bytes = accounts.len() + logs.len(),
            "ledger saved"
        );
        Ok(())
    }

    fn load(&self) -> Result<Ledger, StorageError> {
        let accounts = read_if_exists(&self.accounts_path)?;
        let logs = read_if_exists(&self.logs_path)?;
        Ok(assemble(&accounts, &logs))
    }
}

// -- in-memory storage implementation --

/// Keeps the encoded files in memory. Can be told to fail writes.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStorage {
    accounts: Vec<u8>,
    logs: Vec<u8>,
    saves: usize,
    fail_writes: bool,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing file images.
    pub fn with_bytes(accounts: Vec<u8>, logs: Vec<u8>) -> Self {
        Self {
            accounts,
            logs,
            ..Self::default()
        }
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn accounts_bytes(&self) -> &[u8] {
        &self.accounts
    }

    pub fn logs_bytes(&self) -> &[u8] {
        &self.logs
    }
}

impl Storage for InMemoryStorage {
    fn save(&mut self, ledger: &Ledger) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "writes disabled",
            )));
        }
        self.accounts = codec::encode_accounts(ledger)?;
        self.logs = codec::encode_logs(ledger)?;
        self.saves += 1;
        Ok(())
    }

    fn load(&self) -> Result<Ledger, StorageError> {
        Ok(assemble(&self.accounts, &self.logs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::handlers::{close, deposit, fixtures::*};
    use crate::{common::money::Money, domain::account::Pin};
    use tempfile::tempdir;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        let a = seed(&mut ledger, "AAA111", 1234, 500);
        let b = seed(&mut ledger, "BBB222", 42, 900);
        seed(&mut ledger, "CCC333", 7, 100);
        deposit::handle(&mut ledger, &clock(), a, Pin::new(1234), Money::new(25)).unwrap();
        close::handle(&mut ledger, &clock(), b).unwrap();
        ledger
    }

    fn assert_same(left: &Ledger, right: &Ledger) {
        assert_eq!(left.accounts(), right.accounts());
        assert_eq!(left.deleted, right.deleted);
    }

    #[test]
    fn file_storage_round_trips_accounts_and_logs() {
        let dir = tempdir().unwrap();
        let ledger = sample_ledger();

        let mut storage = FileStorage::in_dir(dir.path());
        storage.save(&ledger).unwrap();

        let restored = FileStorage::in_dir(dir.path()).load().unwrap();
        assert_same(&ledger, &restored);
        assert_eq!(restored.next_account_number(), 4);
    }

    #[test]
    fn missing_files_load_as_empty_ledger() {
        let dir = tempdir().unwrap();

        let ledger = FileStorage::in_dir(dir.path()).load().unwrap();

        assert!(ledger.accounts().is_empty());
        assert!(ledger.deleted.is_empty());
    }

    #[test]
    fn save_replaces_previous_contents() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::in_dir(dir.path());
        storage.save(&sample_ledger()).unwrap();

        storage.save(&Ledger::new()).unwrap();

        assert_eq!(fs::metadata(storage.accounts_path()).unwrap().len(), 0);
        assert_eq!(fs::metadata(storage.logs_path()).unwrap().len(), 0);
        assert!(!dir.path().join("accounts.dat.tmp").exists());
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::in_dir(dir.path().join("missing"));

        assert!(matches!(
            storage.save(&sample_ledger()),
            Err(StorageError::Io(_))
        ));
    }

    #[test]
    fn in_memory_storage_round_trips() {
        let ledger = sample_ledger();
        let mut storage = InMemoryStorage::new();

        storage.save(&ledger).unwrap();

        assert_eq!(storage.saves(), 1);
        assert_eq!(
            storage.accounts_bytes().len(),
            2 * codec::ACCOUNT_RECORD_SIZE
        );
        assert_same(&ledger, &storage.load().unwrap());
    }

    #[test]
    fn in_memory_storage_can_fail_writes() {
        let mut storage = InMemoryStorage::new();
        storage.set_fail_writes(true);

        assert!(storage.save(&sample_ledger()).is_err());
        assert_eq!(storage.saves(), 0);
        assert!(storage.accounts_bytes().is_empty());
    }

    #[test]
    fn log_block_for_unknown_account_restores_as_deleted() {
        let mut source = sample_ledger();
        source.retire(1);
        let logs = codec::encode_logs(&source).unwrap();

        let restored = assemble(&[], &logs);

        assert!(restored.accounts().is_empty());
        assert!(restored.deleted.contains(1));
        assert!(restored.deleted.contains(2));
        assert!(restored.deleted.contains(3));
    }
}
