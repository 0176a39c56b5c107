pub mod camt;
pub mod traits;

pub mod prelude {
    pub use super::camt::prelude::*;
    pub use super::traits::Parser;
}
