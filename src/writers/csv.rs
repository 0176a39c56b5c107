use std::io::Write;

use chrono::NaiveDate;
use csv::WriterBuilder;
use serde::Serialize;

use super::{HEADERS, Renderer};
use crate::errors::StatementResult;
use crate::types::Transaction;

/// `;`-separated text with a fixed header row.
///
/// Amounts always use a decimal point and two fraction digits, whatever the host
/// locale. Every row is flushed as soon as it is written.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    date: NaiveDate,
    valuta: NaiveDate,
    amount: String,
    currency: &'a str,
    creditor: &'a str,
    creditor_iban: String,
    debtor: &'a str,
    debtor_iban: String,
    transaction_type: &'a str,
    description: &'a str,
}

impl<'a> From<&'a Transaction> for CsvRow<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        CsvRow {
            date: transaction.booking_date,
            valuta: transaction.value_date,
            amount: format!("{:.2}", transaction.amount.amount),
            currency: &transaction.amount.currency,
            creditor: &transaction.creditor.name,
            creditor_iban: transaction.creditor.formatted_iban(),
            debtor: &transaction.debtor.name,
            debtor_iban: transaction.debtor.formatted_iban(),
            transaction_type: &transaction.transaction_type,
            description: &transaction.description,
        }
    }
}

impl Renderer for CsvWriter {
    fn render(&self, transactions: &[Transaction], sink: &mut dyn Write) -> StatementResult<()> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .delimiter(b';')
            .from_writer(sink);

        writer.write_record(HEADERS)?;
        writer.flush()?;

        for transaction in transactions {
            writer.serialize(CsvRow::from(transaction))?;
            writer.flush()?;
        }
        Ok(())
    }
}
