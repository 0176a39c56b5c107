use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::errors::StatementResult;
use crate::types::Transaction;

pub mod csv;
pub mod ods;

pub use self::csv::CsvWriter;
pub use self::ods::OdsWriter;

/// Column labels shared by every output format.
pub const HEADERS: [&str; 10] = [
    "Date",
    "Valuta",
    "Amount",
    "Currency",
    "Creditor",
    "Creditor IBAN",
    "Debtor",
    "Debtor IBAN",
    "Type",
    "Description",
];

pub trait Renderer {
    fn render(&self, transactions: &[Transaction], sink: &mut dyn Write) -> StatementResult<()>;
}

/// Output encoding selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    /// `;`-separated text
    #[default]
    #[serde(rename = "csv")]
    Csv,
    /// OpenDocument spreadsheet
    #[serde(rename = "ods")]
    Ods,
}

impl Renderer for OutputFormat {
    fn render(&self, transactions: &[Transaction], sink: &mut dyn Write) -> StatementResult<()> {
        match self {
            OutputFormat::Csv => CsvWriter.render(transactions, sink),
            OutputFormat::Ods => OdsWriter::default().render(transactions, sink),
        }
    }
}
