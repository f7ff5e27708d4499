use crate::error::FetchError;

pub mod decode;
pub mod funds;
pub mod request;
#[cfg(test)]
pub(crate) mod test_support;

pub use funds::{parse_funds_payload, FundFetcher, FundRow};

/// Fund list endpoint filtered to fund-type quotes.
pub const DEFAULT_ENDPOINT: &str = "https://brapi.dev/api/quote/list?type=fund";

pub type FetchResult<T> = std::result::Result<T, FetchError>;
