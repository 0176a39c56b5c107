use log::{debug, warn};
use roxmltree::Document;

use super::dto::{CamtTransaction, CamtTransactionRaw};
use super::path::NodePath;
use super::types::DescriptionPolicy;
use crate::errors::StatementResult;
use crate::parsers::traits::Parser;

/*
    camt.052 element names are heavily abbreviated:

    BkToCstmrAcctRpt  Bank-to-Customer Account Report
    Rpt               Report
    Ntry              Entry
    Amt               Amount
*/
const ENTRIES: &str = "Document/BkToCstmrAcctRpt/Rpt/Ntry";

/// Extracts report entries from a camt.052 account report.
#[derive(Debug, Clone, Copy, Default)]
pub struct CamtParser {
    description: DescriptionPolicy,
}

impl CamtParser {
    pub fn new(description: DescriptionPolicy) -> Self {
        Self { description }
    }
}

impl Parser for CamtParser {
    type Output = CamtTransaction;

    fn is_supported(content: &str) -> bool {
        content.contains("BkToCstmrAcctRpt")
    }

    fn parse(&self, content: &str) -> StatementResult<Vec<Self::Output>> {
        let document = Document::parse(content)?;
        let entries = document.root().filter(ENTRIES);

        if entries.is_empty() {
            warn!("No entries found");
            return Ok(vec![]);
        }
        debug!("Found {} entries", entries.len());

        entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                CamtTransaction::from_raw(CamtTransactionRaw::from_node(entry), self.description)
                    .map_err(|e| e.in_entry(index + 1))
            })
            .collect()
    }
}
