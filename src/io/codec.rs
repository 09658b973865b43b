//! Byte formats of the two data files.
//!
//! # Account record
//!
//! One fixed-size record per live account, laid out like the native struct
//! the files were first written with (little-endian, natural alignment):
//!
//! ```text
//! [number:i32][name:100B][identity:50B][gender:u8][type:10B][pad:3B][pin:i32][pad:4B][balance:i64]
//!  0           4          104           154        155       165     168      172     176   = 184B
//! ```
//!
//! Text fields are NUL-terminated and NUL-padded. Text that does not fit is
//! cut so the final byte stays NUL.
//!
//! # Log block
//!
//! ```text
//! [number:i32][count:i32] count x ([len:i32][text:len bytes])
//! ```
//!
//! Blocks repeat until end of file: live accounts first, then deleted ones.

use tracing::warn;

use crate::{
    common::{error::StorageError, money::Money},
    domain::{
        account::{Account, AccountNumber, AccountProfile, AccountType, Gender, Pin},
        ledger::Ledger,
        log_chain::LogChain,
    },
};

pub const NAME_CAPACITY: usize = 100;
pub const IDENTITY_CAPACITY: usize = 50;
pub const TYPE_CAPACITY: usize = 10;
pub const ACCOUNT_RECORD_SIZE: usize = 184;

const NAME_OFFSET: usize = 4;
const IDENTITY_OFFSET: usize = NAME_OFFSET + NAME_CAPACITY;
const GENDER_OFFSET: usize = IDENTITY_OFFSET + IDENTITY_CAPACITY;
const TYPE_OFFSET: usize = GENDER_OFFSET + 1;
const PIN_OFFSET: usize = 168;
const BALANCE_OFFSET: usize = 176;

/// A deserialized log block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogBlock {
    pub number: AccountNumber,
    pub chain: LogChain,
}

fn number_to_i32(number: AccountNumber) -> Result<i32, StorageError> {
    i32::try_from(number).map_err(|_| StorageError::FieldOutOfRange {
        field: "account number",
        value: i64::from(number),
    })
}

fn put_text(field: &mut [u8], text: &str) {
    // keep room for the terminating NUL and never split a character
    let mut end = text.len().min(field.len() - 1);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    field[..end].copy_from_slice(&text.as_bytes()[..end]);
}

fn get_text(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

fn read_i32(bytes: &[u8], at: usize) -> i32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[at..at + 4]);
    i32::from_le_bytes(raw)
}

fn read_i64(bytes: &[u8], at: usize) -> i64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[at..at + 8]);
    i64::from_le_bytes(raw)
}

/// Serializes one account into its fixed-size record.
pub fn encode_account(account: &Account) -> Result<[u8; ACCOUNT_RECORD_SIZE], StorageError> {
    let mut rec = [0u8; ACCOUNT_RECORD_SIZE];

    rec[..NAME_OFFSET].copy_from_slice(&number_to_i32(account.number)?.to_le_bytes());
    put_text(&mut rec[NAME_OFFSET..IDENTITY_OFFSET], &account.name);
    put_text(&mut rec[IDENTITY_OFFSET..GENDER_OFFSET], &account.identity);
    rec[GENDER_OFFSET] = account.gender.as_byte();
    put_text(
        &mut rec[TYPE_OFFSET..TYPE_OFFSET + TYPE_CAPACITY],
        account.account_type.as_str(),
    );
    rec[PIN_OFFSET..PIN_OFFSET + 4].copy_from_slice(&account.pin.as_i32().to_le_bytes());
    rec[BALANCE_OFFSET..].copy_from_slice(&account.balance.as_i64().to_le_bytes());

    Ok(rec)
}

/// Deserializes one record. Returns `None` for a record whose account
/// number is negative. Other fields are taken as-is.
pub fn decode_account(rec: &[u8; ACCOUNT_RECORD_SIZE]) -> Option<Account> {
    let raw_number = read_i32(rec, 0);
    let number = match AccountNumber::try_from(raw_number) {
        Ok(n) => n,
        Err(_) => {
            warn!(raw_number, "skipping account record with negative number");
            return None;
        }
    };

    let type_label = get_text(&rec[TYPE_OFFSET..TYPE_OFFSET + TYPE_CAPACITY]);
    let account_type = AccountType::from_label(&type_label).unwrap_or_else(|| {
        warn!(number, label = %type_label, "unknown account type, reading as Savings");
        AccountType::Savings
    });

    let profile = AccountProfile {
        name: get_text(&rec[NAME_OFFSET..IDENTITY_OFFSET]),
        identity: get_text(&rec[IDENTITY_OFFSET..GENDER_OFFSET]),
        gender: Gender::from_byte(rec[GENDER_OFFSET]),
        account_type,
        pin: Pin::new(read_i32(rec, PIN_OFFSET)),
    };

    Some(Account::new(
        number,
        profile,
        Money::new(read_i64(rec, BALANCE_OFFSET)),
    ))
}

/// The whole account file for a ledger, in ascending account order.
pub fn encode_accounts(ledger: &Ledger) -> Result<Vec<u8>, StorageError> {
    let mut buf = Vec::with_capacity(ledger.accounts().len() * ACCOUNT_RECORD_SIZE);
    for account in ledger.accounts().values() {
        buf.extend_from_slice(&encode_account(account)?);
    }
    Ok(buf)
}

/// Reads every complete record. A trailing partial record is ignored.
pub fn decode_accounts(bytes: &[u8]) -> Vec<Account> {
    let chunks = bytes.chunks_exact(ACCOUNT_RECORD_SIZE);
    if !chunks.remainder().is_empty() {
        warn!(
            trailing = chunks.remainder().len(),
            "account file ends with a partial record"
        );
    }

    chunks
        .filter_map(|chunk| {
            let mut rec = [0u8; ACCOUNT_RECORD_SIZE];
            rec.copy_from_slice(chunk);
            decode_account(&rec)
        })
        .collect()
}

fn encode_block(buf: &mut Vec<u8>, number: AccountNumber, chain: &LogChain) -> Result<(), StorageError> {
    let count = i32::try_from(chain.len()).map_err(|_| StorageError::FieldOutOfRange {
        field: "log entry count",
        value: chain.len() as i64,
    })?;

    buf.extend_from_slice(&number_to_i32(number)?.to_le_bytes());
    buf.extend_from_slice(&count.to_le_bytes());
    for entry in chain.iter() {
        let text = entry.text().as_bytes();
        let len = i32::try_from(text.len()).map_err(|_| StorageError::FieldOutOfRange {
            field: "log entry length",
            value: text.len() as i64,
        })?;
        buf.extend_from_slice(&len.to_le_bytes());
        buf.extend_from_slice(text);
    }
    Ok(())
}

/// The whole log file: one block per live account with entries, then one
/// per deleted account.
pub fn encode_logs(ledger: &Ledger) -> Result<Vec<u8>, StorageError> {
    let mut buf = Vec::new();
    for account in ledger.accounts().values() {
        if !account.log().is_empty() {
            encode_block(&mut buf, account.number, account.log())?;
        }
    }
    for (number, chain) in ledger.deleted.iter() {
        encode_block(&mut buf, number, chain)?;
    }
    Ok(buf)
}

/// Cursor over the log file that yields `None` once the input runs short.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(len)?;
        let slice = self.bytes.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    fn i32(&mut self) -> Option<i32> {
        let raw = self.take(4)?;
        Some(read_i32(raw, 0))
    }

    /// A length or count field; negative values count as corruption.
    fn length(&mut self) -> Option<usize> {
        usize::try_from(self.i32()?).ok()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }
}

/// Reads blocks until end of input. A block cut short or carrying a
/// negative count ends the stream; blocks read before it are kept.
pub fn decode_logs(bytes: &[u8]) -> Vec<LogBlock> {
    let mut reader = Reader { bytes, pos: 0 };
    let mut blocks = Vec::new();

    while !reader.at_end() {
        match read_block(&mut reader) {
            Some((raw_number, chain)) => match AccountNumber::try_from(raw_number) {
                Ok(number) => blocks.push(LogBlock { number, chain }),
                Err(_) => warn!(raw_number, "skipping log block with negative account number"),
            },
            None => {
                warn!(
                    offset = reader.pos,
                    loaded = blocks.len(),
                    "log file truncated, keeping blocks read so far"
                );
                break;
            }
        }
    }

    blocks
}

fn read_block(reader: &mut Reader<'_>) -> Option<(i32, LogChain)> {
    let number = reader.i32()?;
    let count = reader.length()?;
    let mut texts = Vec::new();
    for _ in 0..count {
        let len = reader.length()?;
        let text = reader.take(len)?;
        texts.push(String::from_utf8_lossy(text).into_owned());
    }
    Some((number, texts.into_iter().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(name: &str, identity: &str) -> Account {
        Account::new(
            3,
            AccountProfile {
                name: name.into(),
                identity: identity.into(),
                gender: Gender::Male,
                account_type: AccountType::Current,
                pin: Pin::new(42),
            },
            Money::new(1_250),
        )
    }

    #[test]
    fn record_layout_matches_fixed_offsets() {
        let rec = encode_account(&account("Ali Bin Abu", "A1234567")).unwrap();

        assert_eq!(rec.len(), ACCOUNT_RECORD_SIZE);
        assert_eq!(&rec[0..4], &3i32.to_le_bytes());
        assert_eq!(&rec[4..15], b"Ali Bin Abu");
        assert_eq!(rec[15], 0);
        assert_eq!(&rec[104..112], b"A1234567");
        assert_eq!(rec[154], b'M');
        assert_eq!(&rec[155..162], b"Current");
        assert_eq!(&rec[165..168], &[0, 0, 0]);
        assert_eq!(&rec[168..172], &42i32.to_le_bytes());
        assert_eq!(&rec[172..176], &[0, 0, 0, 0]);
        assert_eq!(&rec[176..184], &1_250i64.to_le_bytes());
    }

    #[test]
    fn record_decodes_back_to_the_same_account() {
        let original = account("Ali Bin Abu", "A1234567");
        let rec = encode_account(&original).unwrap();

        assert_eq!(decode_account(&rec), Some(original));
    }

    #[test]
    fn long_text_is_truncated_to_capacity_minus_one() {
        let long_name = "N".repeat(150);
        let long_identity = "I".repeat(80);
        let rec = encode_account(&account(&long_name, &long_identity)).unwrap();

        let decoded = decode_account(&rec).unwrap();
        assert_eq!(decoded.name, "N".repeat(NAME_CAPACITY - 1));
        assert_eq!(decoded.identity, "I".repeat(IDENTITY_CAPACITY - 1));
        assert_eq!(rec[NAME_OFFSET + NAME_CAPACITY - 1], 0);
    }

    #[test]
    fn truncation_backs_off_to_char_boundary() {
        // 98 ASCII bytes followed by a two-byte character straddling the cut
        let name = format!("{}é", "a".repeat(98));
        let rec = encode_account(&account(&name, "A1234567")).unwrap();

        assert_eq!(decode_account(&rec).unwrap().name, "a".repeat(98));
    }

    #[test]
    fn unknown_codes_fall_back() {
        let mut rec = encode_account(&account("Ali", "A1234567")).unwrap();
        rec[GENDER_OFFSET] = b'X';
        rec[TYPE_OFFSET..TYPE_OFFSET + TYPE_CAPACITY].copy_from_slice(b"Other\0\0\0\0\0");

        let decoded = decode_account(&rec).unwrap();
        assert_eq!(decoded.gender, Gender::Female);
        assert_eq!(decoded.account_type, AccountType::Savings);
    }

    #[test]
    fn partial_trailing_record_is_ignored() {
        let mut bytes = encode_account(&account("Ali", "A1234567")).unwrap().to_vec();
        bytes.extend_from_slice(&[1, 2, 3]);

        assert_eq!(decode_accounts(&bytes).len(), 1);
    }

    #[test]
    fn negative_account_number_record_is_skipped() {
        let mut rec = encode_account(&account("Ali", "A1234567")).unwrap();
        rec[0..4].copy_from_slice(&(-5i32).to_le_bytes());

        assert_eq!(decode_account(&rec), None);
    }

    #[test]
    fn log_block_layout() {
        let mut buf = Vec::new();
        let chain: LogChain = vec!["ab".to_string(), "cde".to_string()].into_iter().collect();
        encode_block(&mut buf, 7, &chain).unwrap();

        let mut expected = Vec::new();
        expected.extend_from_slice(&7i32.to_le_bytes());
        expected.extend_from_slice(&2i32.to_le_bytes());
        expected.extend_from_slice(&2i32.to_le_bytes());
        expected.extend_from_slice(b"ab");
        expected.extend_from_slice(&3i32.to_le_bytes());
        expected.extend_from_slice(b"cde");
        assert_eq!(buf, expected);

        assert_eq!(decode_logs(&buf), vec![LogBlock { number: 7, chain }]);
    }

    #[test]
    fn truncated_log_file_keeps_complete_blocks() {
        let first: LogChain = vec!["one".to_string()].into_iter().collect();
        let second: LogChain = vec!["two".to_string(), "three".to_string()].into_iter().collect();
        let mut buf = Vec::new();
        encode_block(&mut buf, 1, &first).unwrap();
        encode_block(&mut buf, 2, &second).unwrap();

        // cut inside the last entry's text
        buf.truncate(buf.len() - 2);

        assert_eq!(
            decode_logs(&buf),
            vec![LogBlock {
                number: 1,
                chain: first
            }]
        );
    }

    #[test]
    fn negative_entry_count_ends_the_stream() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&1i32.to_le_bytes());
        buf.extend_from_slice(&(-1i32).to_le_bytes());

        assert!(decode_logs(&buf).is_empty());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(decode_accounts(&[]).is_empty());
        assert!(decode_logs(&[]).is_empty());
    }
}
