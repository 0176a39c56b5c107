use std::collections::HashSet;

use log::debug;

use crate::types::Transaction;

/// Removes exact duplicates and orders by booking date.
///
/// The first occurrence of a duplicate is kept. The sort is stable, so entries
/// sharing a booking date stay in encounter order (input file, then archive
/// member, then position in the document).
pub fn aggregate(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let total = transactions.len();

    let mut seen = HashSet::with_capacity(total);
    let mut unique: Vec<Transaction> = transactions
        .into_iter()
        .filter(|transaction| seen.insert(transaction.clone()))
        .collect();

    if unique.len() < total {
        debug!("Removed {} duplicate transactions", total - unique.len());
    }

    unique.sort_by_key(|transaction| transaction.booking_date);
    unique
}
