use std::{collections::BTreeMap, io::Write};

use crate::domain::account::{Account, AccountNumber};

#[derive(serde::Serialize)]
/// Internal CSV output row for the account listing.
///
/// Headers written (in this order): `account,name,passport,gender,type,pin,balance`.
struct OutputRow<'a> {
    account: String,
    name: &'a str,
    passport: &'a str,
    gender: String,
    #[serde(rename = "type")]
    account_type: &'static str,
    pin: String,
    balance: String,
}

/// Writes the live accounts to a CSV writer.
///
/// Account numbers and PINs are zero-padded to 4 digits and balances are
/// prefixed with `RM`. Rows come out in ascending account order.
///
/// # Errors
///
/// Returns a `csv::Error` if writing/serializing any row fails.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use bank_ledger::io::writer::write_accounts;
///
/// let mut out = Vec::new();
/// write_accounts(&mut out, &BTreeMap::new()).unwrap();
/// assert!(out.is_empty());
/// ```
pub fn write_accounts<W: Write>(
    writer: W,
    accounts: &BTreeMap<AccountNumber, Account>,
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for acc in accounts.values() {
        let row = OutputRow {
            account: format!("{:04}", acc.number),
            name: &acc.name,
            passport: &acc.identity,
            gender: acc.gender.to_string(),
            account_type: acc.account_type.as_str(),
            pin: acc.pin.to_string(),
            balance: format!("RM {}", acc.balance),
        };
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::money::Money,
        domain::account::{AccountProfile, AccountType, Gender, Pin},
    };

    fn write_to_string(accounts: &BTreeMap<AccountNumber, Account>) -> String {
        let mut out = Vec::new();
        write_accounts(&mut out, accounts).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn account(number: AccountNumber, name: &str, pin: i32, balance: i64) -> Account {
        Account::new(
            number,
            AccountProfile {
                name: name.into(),
                identity: format!("ID{number:06}"),
                gender: Gender::Male,
                account_type: AccountType::Current,
                pin: Pin::new(pin),
            },
            Money::new(balance),
        )
    }

    #[test]
    fn writes_header_and_rows_in_account_order() {
        let mut accounts = BTreeMap::new();
        accounts.insert(12, account(12, "Second Holder", 42, 900));
        accounts.insert(3, account(3, "First Holder", 1234, 500));

        let s = write_to_string(&accounts);

        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 3, "expected header + 2 rows");
        assert_eq!(lines[0], "account,name,passport,gender,type,pin,balance");
        assert_eq!(lines[1], "0003,First Holder,ID000003,Male,Current,1234,RM 500");
        assert_eq!(lines[2], "0012,Second Holder,ID000012,Male,Current,0042,RM 900");
    }
}
