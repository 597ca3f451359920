pub mod constants;
pub mod types;

pub use types::{CleaningRequest, CleaningResult, Platform, UnaffiliateResult};
