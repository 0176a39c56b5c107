use crate::{errors::StatementError, parsers::prelude::*};
use chrono::NaiveDate;
use iban::Iban;
use rust_decimal::Decimal;
use serde::Serialize;

/// Signed amount plus ISO 4217 currency code.
///
/// Debits carry a negative amount, credits a positive one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: String,
}

impl Money {
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }
}

/// Counterparty of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Party {
    pub name: String,
    pub iban: Option<Iban>,
}

impl Party {
    /// IBAN in its printed form (blocks of four), or an empty string when absent.
    pub fn formatted_iban(&self) -> String {
        self.iban
            .as_ref()
            .map(|iban| iban.to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Transaction {
    pub booking_date: NaiveDate,
    pub value_date: NaiveDate,
    pub amount: Money,
    pub creditor: Party,
    pub debtor: Party,
    pub transaction_type: String,
    pub description: String,
}

impl TryFrom<CamtTransaction> for Transaction {
    type Error = StatementError;

    fn try_from(entry: CamtTransaction) -> Result<Self, Self::Error> {
        let amount = match entry.indicator {
            CreditDebit::Debit if !entry.amount.is_zero() => -entry.amount,
            CreditDebit::Debit => entry.amount,
            CreditDebit::Credit => entry.amount,
        };

        Ok(Transaction {
            booking_date: entry.booking_date,
            value_date: entry.value_date,
            amount: Money {
                amount,
                currency: entry.currency,
            },
            creditor: entry.creditor,
            debtor: entry.debtor,
            transaction_type: entry.additional_info,
            description: entry.description,
        })
    }
}
