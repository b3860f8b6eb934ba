#![no_std]
pub mod audit;
pub mod clients;
pub mod errors;
pub mod types;
pub mod validation;

pub use errors::ContractError;
pub use types::*;

// Config
pub const MAX_METADATA_LENGTH: u32 = 256;
pub const MAX_HISTORY_QUERY_LIMIT: u32 = 500;
pub const MAX_SIGNERS: u32 = 32;

// Amounts are i128 stroops; keep headroom for escrow sums.
pub const PRICE_UPPER_BOUND: i128 = i128::MAX / 2;
pub const PRICE_LOWER_BOUND: i128 = 0;
