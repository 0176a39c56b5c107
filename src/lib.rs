//! Convert camt.052 bank account reports, or zip bundles of them, into one
//! deduplicated, date-ordered table.
//!
//! ```rust,ignore
//! use camt_statement_rs::{ConverterBuilder, OutputFormat};
//!
//! let mut stdout = std::io::stdout().lock();
//! ConverterBuilder::new()
//!     .files(["may.xml", "june.zip"])
//!     .format(OutputFormat::Ods)
//!     .convert(&mut stdout)?;
//! ```

mod builder;
mod types;

pub mod aggregate;
pub mod archive;
pub mod errors;
pub mod parsers;
pub mod writers;

pub use builder::ConverterBuilder;
pub use parsers::prelude::*;
pub use types::{Money, Party, Transaction};
pub use writers::{OutputFormat, Renderer};
