use chrono::NaiveDate;
use iban::Iban;
use log::warn;
use roxmltree::Node;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

use super::path::NodePath;
use super::types::{CamtDate, CreditDebit, DescriptionPolicy, normalize_whitespace};
use crate::errors::{StatementError, StatementResult};
use crate::types::Party;

// Paths relative to an `Ntry` element.
const INDICATOR: &str = "CdtDbtInd";
const AMOUNT: &str = "Amt";
const CURRENCY: &str = "Amt/@Ccy";
const BOOKING_DATE: &str = "BookgDt/Dt";
const VALUE_DATE: &str = "ValDt/Dt";
const CREDITOR_NAME: &[&str] = &[
    "NtryDtls/TxDtls/RltdPties/Cdtr/Nm",
    "NtryDtls/TxDtls/RltdPties/Cdtr/Pty/Nm",
];
const CREDITOR_IBAN: &str = "NtryDtls/TxDtls/RltdPties/CdtrAcct/Id/IBAN";
const DEBTOR_NAME: &[&str] = &[
    "NtryDtls/TxDtls/RltdPties/Dbtr/Nm",
    "NtryDtls/TxDtls/RltdPties/Dbtr/Pty/Nm",
];
const DEBTOR_IBAN: &str = "NtryDtls/TxDtls/RltdPties/DbtrAcct/Id/IBAN";
const ADDITIONAL_INFO: &str = "AddtlNtryInf";
const REMITTANCE: &str = "NtryDtls/TxDtls/RmtInf/Ustrd";

/// Texts of one `Ntry` element, before any interpretation.
#[derive(Debug, Default)]
pub(super) struct CamtTransactionRaw {
    indicator: Option<String>,
    amount: Option<String>,
    currency: Option<String>,
    booking_date: Option<CamtDate>,
    value_date: Option<CamtDate>,
    creditor_name: Option<String>,
    creditor_iban: Option<String>,
    debtor_name: Option<String>,
    debtor_iban: Option<String>,
    additional_info: Option<String>,
    remittance: Vec<String>,
}

impl CamtTransactionRaw {
    pub(super) fn from_node(entry: Node) -> Self {
        CamtTransactionRaw {
            indicator: entry.text_at(INDICATOR),
            amount: entry.text_at(AMOUNT),
            currency: entry
                .find(AMOUNT)
                .and_then(|amount| amount.attribute("Ccy"))
                .map(normalize_whitespace),
            booking_date: entry.text_at(BOOKING_DATE).map(CamtDate::from),
            value_date: entry.text_at(VALUE_DATE).map(CamtDate::from),
            creditor_name: entry.text_at_any(CREDITOR_NAME),
            creditor_iban: entry.text_at(CREDITOR_IBAN),
            debtor_name: entry.text_at_any(DEBTOR_NAME),
            debtor_iban: entry.text_at(DEBTOR_IBAN),
            additional_info: entry.text_at(ADDITIONAL_INFO),
            remittance: entry
                .filter(REMITTANCE)
                .into_iter()
                .map(|line| normalize_whitespace(line.text().unwrap_or_default()))
                .collect(),
        }
    }
}

/// One report entry with every field interpreted; the amount is still unsigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CamtTransaction {
    pub indicator: CreditDebit,
    pub amount: Decimal,
    pub currency: String,
    pub booking_date: NaiveDate,
    pub value_date: NaiveDate,
    pub creditor: Party,
    pub debtor: Party,
    pub additional_info: String,
    pub description: String,
}

impl CamtTransaction {
    pub(super) fn from_raw(
        raw: CamtTransactionRaw,
        description: DescriptionPolicy,
    ) -> StatementResult<Self> {
        let indicator = required(raw.indicator, INDICATOR)?;
        let indicator = CreditDebit::from_str(&indicator)
            .map_err(|reason| StatementError::malformed(INDICATOR, &indicator, reason))?;

        let amount = required(raw.amount, AMOUNT)?;
        let amount = parse_amount(&amount)?;
        let currency = required(raw.currency, CURRENCY)?;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(StatementError::malformed(
                CURRENCY,
                &currency,
                "expected a three-letter ISO 4217 code",
            ));
        }

        let booking_date = parse_date(required(raw.booking_date, BOOKING_DATE)?, BOOKING_DATE)?;
        let value_date = parse_date(required(raw.value_date, VALUE_DATE)?, VALUE_DATE)?;

        let creditor = Party {
            name: raw.creditor_name.unwrap_or_else(|| {
                warn!("No creditor found: Date {}, Amount {}", booking_date, amount);
                String::new()
            }),
            iban: parse_iban(raw.creditor_iban, CREDITOR_IBAN)?,
        };
        let debtor = Party {
            name: raw.debtor_name.unwrap_or_else(|| {
                warn!("No debtor found: Date {}, Amount {}", booking_date, amount);
                String::new()
            }),
            iban: parse_iban(raw.debtor_iban, DEBTOR_IBAN)?,
        };

        Ok(CamtTransaction {
            indicator,
            amount,
            currency,
            booking_date,
            value_date,
            creditor,
            debtor,
            additional_info: raw.additional_info.unwrap_or_default(),
            description: description.select(&raw.remittance),
        })
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> StatementResult<T> {
    value.ok_or(StatementError::MissingField { field })
}

fn parse_amount(text: &str) -> StatementResult<Decimal> {
    let amount = Decimal::from_str(text)
        .map_err(|e| StatementError::malformed(AMOUNT, text, format!("Invalid amount: {e}")))?;
    if amount.is_sign_negative() {
        return Err(StatementError::malformed(
            AMOUNT,
            text,
            "amount must not be negative, the sign comes from CdtDbtInd",
        ));
    }
    Ok(amount)
}

fn parse_date(date: CamtDate, field: &'static str) -> StatementResult<NaiveDate> {
    let text = date.as_str().to_string();
    NaiveDate::try_from(date).map_err(|e| StatementError::malformed(field, &text, e))
}

fn parse_iban(text: Option<String>, field: &'static str) -> StatementResult<Option<Iban>> {
    text.map(|text| {
        let electronic: String = text.split_whitespace().collect();
        electronic
            .parse::<Iban>()
            .map_err(|e| StatementError::malformed(field, &text, e))
    })
    .transpose()
}
