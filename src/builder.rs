use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::{
    aggregate::aggregate,
    archive::{self, Document},
    errors::{StatementError, StatementResult},
    parsers::prelude::*,
    types::Transaction,
    writers::{OutputFormat, Renderer},
};

/// Configures and runs a conversion: input files in, one rendered table out.
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    files: Vec<PathBuf>,
    format: Option<OutputFormat>,
    description: Option<DescriptionPolicy>,
}

impl ConverterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.push(path.as_ref().to_path_buf());
        self
    }

    pub fn files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.files
            .extend(paths.into_iter().map(|path| path.as_ref().to_path_buf()));
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn description(mut self, policy: DescriptionPolicy) -> Self {
        self.description = Some(policy);
        self
    }

    /// Reads every input and returns the deduplicated transactions ordered by booking date.
    pub fn collect(&self) -> StatementResult<Vec<Transaction>> {
        self.validate()?;
        info!("Files {:?}", self.files);

        let parser = CamtParser::new(self.description.unwrap_or_default());
        let mut transactions = Vec::new();
        for path in &self.files {
            for document in archive::resolve(path)? {
                let parsed = parse_document(&parser, &document)
                    .map_err(|e| e.in_document(&document.origin))?;
                debug!("{} transactions in {}", parsed.len(), document.origin);
                transactions.extend(parsed);
            }
        }

        Ok(aggregate(transactions))
    }

    /// Runs [`ConverterBuilder::collect`] and renders the result into `sink`.
    pub fn convert(self, sink: &mut dyn Write) -> StatementResult<()> {
        let transactions = self.collect()?;
        let format = self.format.unwrap_or_default();
        info!("Writing {} transactions as {:?}", transactions.len(), format);
        format.render(&transactions, sink)
    }

    fn validate(&self) -> StatementResult<()> {
        if self.files.is_empty() {
            return Err(StatementError::MissingInput);
        }

        if let Some(missing) = self.files.iter().find(|path| !path.is_file()) {
            return Err(StatementError::FileNotFound(missing.clone()));
        }

        let mut seen = HashSet::new();
        for path in &self.files {
            let canonical = fs::canonicalize(path).map_err(|source| {
                StatementError::UnreadableInput {
                    path: path.clone(),
                    source,
                }
            })?;
            if !seen.insert(canonical) {
                return Err(StatementError::DuplicateInput(path.clone()));
            }
        }
        Ok(())
    }
}

fn parse_document(parser: &CamtParser, document: &Document) -> StatementResult<Vec<Transaction>> {
    let content = String::from_utf8(document.content.clone())?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    if !CamtParser::is_supported(content) {
        warn!("{} does not look like a camt.052 account report", document.origin);
    }

    parser
        .parse(content)?
        .into_iter()
        .map(Transaction::try_from)
        .collect()
}
