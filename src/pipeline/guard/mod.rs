pub mod deny;
pub mod pii;
pub mod sanitize;
pub mod types;

pub use deny::DenyList;
pub use pii::PiiScrubber;
pub use sanitize::sanitize;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Input too long ({len} chars). Limit is {max} characters.")]
    InputTooLarge { len: usize, max: usize },
}
