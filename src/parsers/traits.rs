use crate::errors::StatementResult;

pub trait Parser {
    type Output;

    fn parse(&self, content: &str) -> StatementResult<Vec<Self::Output>>;

    fn is_supported(content: &str) -> bool;
}
