pub mod api;
pub mod cli_args;
pub mod common;
pub mod error;
pub mod link_utils;
pub mod platforms;
pub mod settings;
pub mod unaffiliator;
pub mod url_source;

pub use common::{CleaningRequest, CleaningResult, Platform};
pub use error::UnaffiliateError;
pub use unaffiliator::Unaffiliator;
