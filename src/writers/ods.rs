use std::collections::BTreeMap;
use std::io::Write;

use icu_locid::{Locale, locale};
use num_traits::ToPrimitive;
use spreadsheet_ods::color::Rgb;
use spreadsheet_ods::defaultstyles::DefaultFormat;
use spreadsheet_ods::style::units::Length;
use spreadsheet_ods::{
    CellStyle, CellStyleRef, Sheet, ValueFormatCurrency, ValueFormatDateTime, WorkBook,
};

use super::{HEADERS, Renderer};
use crate::errors::{StatementError, StatementResult};
use crate::types::{Money, Transaction};

// Same order as HEADERS.
const COLUMN_WIDTHS_CM: [f64; 10] = [2.5, 2.5, 3.2, 2.0, 6.0, 6.0, 6.0, 6.0, 5.0, 12.0];

const NEGATIVE_RED: (u8, u8, u8) = (0xc0, 0x00, 0x00);

/// Single-sheet OpenDocument workbook.
///
/// Dates are real date cells shown as `YYYY-MM-DD`, amounts are numeric cells with a
/// currency format of the workbook locale; negative amounts use a red variant.
#[derive(Debug, Clone)]
pub struct OdsWriter {
    locale: Locale,
}

impl OdsWriter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl Default for OdsWriter {
    fn default() -> Self {
        Self::new(locale!("de-DE"))
    }
}

struct Styles {
    header: CellStyleRef,
    text: CellStyleRef,
    date: CellStyleRef,
    // currency code -> (positive, negative)
    amounts: BTreeMap<String, (CellStyleRef, CellStyleRef)>,
}

impl Styles {
    fn register(workbook: &mut WorkBook, locale: &Locale, transactions: &[Transaction]) -> Self {
        let mut header = CellStyle::new("header", &DefaultFormat::default());
        header.set_font_bold();
        let header = workbook.add_cellstyle(header);

        // Data cells get an explicit style so nothing is inherited from the header row.
        let text = workbook.add_cellstyle(CellStyle::new("text", &DefaultFormat::default()));

        let mut date_format = ValueFormatDateTime::new_named("date_iso");
        date_format.part_year().long_style().build();
        date_format.part_text("-").build();
        date_format.part_month().long_style().build();
        date_format.part_text("-").build();
        date_format.part_day().long_style().build();
        let date_format = workbook.add_datetime_format(date_format);
        let date = workbook.add_cellstyle(CellStyle::new("date", &date_format));

        let mut amounts = BTreeMap::new();
        for transaction in transactions {
            let code = &transaction.amount.currency;
            if amounts.contains_key(code) {
                continue;
            }

            let format_name = format!("currency_{code}");
            let mut format = ValueFormatCurrency::new_localized(format_name.as_str(), locale.clone());
            format.part_number().fixed_decimal_places(2).grouping().build();
            format.part_text(" ").build();
            format
                .part_currency()
                .locale(locale.clone())
                .symbol(currency_symbol(code))
                .build();
            let format = workbook.add_currency_format(format);

            let positive_name = format!("amount_{code}");
            let positive = workbook.add_cellstyle(CellStyle::new(positive_name.as_str(), &format));

            let negative_name = format!("amount_negative_{code}");
            let mut negative = CellStyle::new(negative_name.as_str(), &format);
            let (r, g, b) = NEGATIVE_RED;
            negative.set_color(Rgb::new(r, g, b));
            let negative = workbook.add_cellstyle(negative);

            amounts.insert(code.clone(), (positive, negative));
        }

        Styles {
            header,
            text,
            date,
            amounts,
        }
    }

    fn amount(&self, money: &Money) -> &CellStyleRef {
        match self.amounts.get(&money.currency) {
            Some((_, negative)) if money.is_negative() => negative,
            Some((positive, _)) => positive,
            None => &self.text,
        }
    }
}

fn currency_symbol(code: &str) -> &str {
    match code {
        "EUR" => "€",
        "USD" => "$",
        "GBP" => "£",
        "JPY" => "¥",
        other => other,
    }
}

impl Renderer for OdsWriter {
    fn render(&self, transactions: &[Transaction], sink: &mut dyn Write) -> StatementResult<()> {
        let mut workbook = WorkBook::new(self.locale.clone());
        let styles = Styles::register(&mut workbook, &self.locale, transactions);
        let mut sheet = Sheet::new("Transactions");

        for (col, (label, width)) in HEADERS.iter().zip(COLUMN_WIDTHS_CM).enumerate() {
            let col = col as u32;
            sheet.set_col_width(col, Length::Cm(width));
            sheet.set_styled_value(0, col, *label, &styles.header);
        }

        for (index, transaction) in transactions.iter().enumerate() {
            let row = index as u32 + 1;
            let money = &transaction.amount;
            let amount = money.amount.to_f64().ok_or_else(|| {
                StatementError::malformed(
                    "Amt",
                    &money.amount.to_string(),
                    "not representable as a spreadsheet number",
                )
            })?;

            sheet.set_styled_value(row, 0, transaction.booking_date, &styles.date);
            sheet.set_styled_value(row, 1, transaction.value_date, &styles.date);
            sheet.set_styled_value(row, 2, amount, styles.amount(money));

            let texts = [
                money.currency.clone(),
                transaction.creditor.name.clone(),
                transaction.creditor.formatted_iban(),
                transaction.debtor.name.clone(),
                transaction.debtor.formatted_iban(),
                transaction.transaction_type.clone(),
                transaction.description.clone(),
            ];
            for (offset, text) in texts.into_iter().enumerate() {
                sheet.set_styled_value(row, 3 + offset as u32, text, &styles.text);
            }
        }

        workbook.push_sheet(sheet);
        let bytes = spreadsheet_ods::write_ods_buf(&mut workbook, Vec::new())?;
        sink.write_all(&bytes)?;
        sink.flush()?;
        Ok(())
    }
}
