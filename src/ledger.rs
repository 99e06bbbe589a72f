//! The ledger store: the full set of recorded transactions, persisted as a
//! CSV file that is rewritten in full on every append.
//!
//! The file has the fixed header `Valor,Categoria,Data,Descricao` (amount,
//! category, date, description) with one row per transaction in insertion
//! order.

use std::{
    fs::File,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// The column names of the persisted ledger, in order.
pub const LEDGER_COLUMNS: [&str; 4] = ["Valor", "Categoria", "Data", "Descricao"];

/// A single recorded transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The amount of money, always finite.
    #[serde(rename = "Valor")]
    pub amount: f64,
    /// The category the transaction was recorded with.
    #[serde(rename = "Categoria")]
    pub category: String,
    /// The day the transaction happened.
    #[serde(rename = "Data")]
    pub date: Date,
    /// Free text describing the transaction, may be empty.
    #[serde(rename = "Descricao", default)]
    pub description: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// # Errors
    /// Returns [Error::NonFiniteAmount] if `amount` is NaN or infinite and
    /// [Error::EmptyCategory] if `category` is empty or only whitespace.
    pub fn new(amount: f64, category: &str, date: Date, description: &str) -> Result<Self, Error> {
        if !amount.is_finite() {
            return Err(Error::NonFiniteAmount(amount));
        }

        let category = category.trim();

        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        Ok(Self {
            amount,
            category: category.to_owned(),
            date,
            description: description.trim().to_owned(),
        })
    }
}

/// Loads and appends transactions to the ledger file at a fixed path.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    /// Create a store backed by the CSV file at `path`.
    ///
    /// The file does not need to exist yet, it is created on the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every persisted transaction in insertion order.
    ///
    /// A missing ledger file is treated as an empty ledger.
    ///
    /// # Errors
    /// Returns [Error::LedgerIo] if the file exists but cannot be opened and
    /// [Error::LedgerFormat] if a row cannot be parsed.
    pub fn load(&self) -> Result<Vec<Transaction>, Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    "Ledger file {} does not exist, using an empty ledger",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(error) => return Err(Error::LedgerIo(error.to_string())),
        };

        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

        reader
            .deserialize()
            .collect::<Result<Vec<Transaction>, csv::Error>>()
            .map_err(|error| Error::LedgerFormat(error.to_string()))
    }

    /// Append `transaction` to the ledger and rewrite the whole file.
    ///
    /// The rewrite is not atomic, a crash part way through may leave a
    /// truncated file behind.
    ///
    /// # Errors
    /// Returns an error if the current ledger cannot be loaded or the file
    /// cannot be written.
    pub fn append(&self, transaction: Transaction) -> Result<(), Error> {
        let mut transactions = self.load()?;
        transactions.push(transaction);
        self.write_all(&transactions)?;

        tracing::info!(
            "Appended transaction to {}, the ledger now has {} rows",
            self.path.display(),
            transactions.len()
        );

        Ok(())
    }

    fn write_all(&self, transactions: &[Transaction]) -> Result<(), Error> {
        let file = File::create(&self.path).map_err(|error| Error::LedgerIo(error.to_string()))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer
            .write_record(LEDGER_COLUMNS)
            .map_err(|error| Error::LedgerFormat(error.to_string()))?;

        for transaction in transactions {
            writer
                .serialize(transaction)
                .map_err(|error| Error::LedgerFormat(error.to_string()))?;
        }

        writer
            .flush()
            .map_err(|error| Error::LedgerIo(error.to_string()))
    }
}
