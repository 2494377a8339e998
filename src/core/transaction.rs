// This file implements the transaction record - one stamp-collecting transfer
// A transaction is a fixed-shape record; once constructed it never changes,
// and it has no identity beyond its field values (duplicates are permitted).

use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};

/// An immutable record of one stamp transfer.
///
/// Field order matters for the canonical block hash: fields are declared in
/// alphabetical key order so the serialized form is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    owner: String,
    stamp: String,
    value: u64,
    year: i64,
}

impl Transaction {
    // When I create a transaction internally, all four fields are already in hand
    pub fn new(owner: String, stamp: String, year: i64, value: u64) -> Transaction {
        Transaction {
            owner,
            stamp,
            value,
            year,
        }
    }

    /// Build a transaction from an external submission where any field may be
    /// absent. The first missing field is reported by name instead of being
    /// silently defaulted.
    pub fn from_parts(
        owner: Option<String>,
        stamp: Option<String>,
        year: Option<i64>,
        value: Option<u64>,
    ) -> Result<Transaction> {
        let owner = owner.ok_or_else(|| LedgerError::MissingField("owner".to_string()))?;
        let stamp = stamp.ok_or_else(|| LedgerError::MissingField("stamp".to_string()))?;
        let year = year.ok_or_else(|| LedgerError::MissingField("year".to_string()))?;
        let value = value.ok_or_else(|| LedgerError::MissingField("value".to_string()))?;

        Ok(Transaction::new(owner, stamp, year, value))
    }

    pub fn get_owner(&self) -> &str {
        self.owner.as_str()
    }

    pub fn get_stamp(&self) -> &str {
        self.stamp.as_str()
    }

    pub fn get_year(&self) -> i64 {
        self.year
    }

    pub fn get_value(&self) -> u64 {
        self.value
    }
}
