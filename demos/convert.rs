use camt_statement_rs::{ConverterBuilder, OutputFormat};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let files = if args.is_empty() {
        println!("Using example reports from tests/fixtures\n");
        vec![
            "tests/fixtures/may.xml".to_string(),
            "tests/fixtures/june.xml".to_string(),
        ]
    } else {
        args
    };

    let transactions = ConverterBuilder::new().files(&files).collect()?;

    println!("Found {} transactions\n", transactions.len());

    for (i, tx) in transactions.iter().enumerate() {
        println!("Transaction {}:", i + 1);
        println!("  Date: {} (valuta {})", tx.booking_date, tx.value_date);
        println!("  Amount: {:.2} {}", tx.amount.amount, tx.amount.currency);
        println!("  Creditor: {} {}", tx.creditor.name, tx.creditor.formatted_iban());
        println!("  Debtor: {} {}", tx.debtor.name, tx.debtor.formatted_iban());
        if !tx.description.is_empty() {
            println!("  Description: {}", tx.description);
        }
        println!();
    }

    println!("As CSV:\n");
    let mut stdout = std::io::stdout().lock();
    ConverterBuilder::new()
        .files(&files)
        .format(OutputFormat::Csv)
        .convert(&mut stdout)?;

    Ok(())
}
