mod dto;
mod parser;
mod path;
mod types;

pub mod prelude {
    pub use super::dto::CamtTransaction;
    pub use super::parser::CamtParser;
    pub use super::types::{CamtDate, CreditDebit, DescriptionPolicy};
}
