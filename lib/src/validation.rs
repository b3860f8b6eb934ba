use soroban_sdk::String;

use crate::{errors::ContractError, MAX_METADATA_LENGTH, PRICE_UPPER_BOUND};

/// Auction timing must satisfy `now <= start < end`.
pub fn validate_auction_window(now: u64, start: u64, end: u64) -> Result<(), ContractError> {
    if start < now || start >= end {
        return Err(ContractError::InvalidWindow);
    }
    Ok(())
}

/// The snipe window must fit strictly inside the auction duration.
pub fn validate_snipe_window(start: u64, end: u64, snipe_window: u64) -> Result<(), ContractError> {
    if snipe_window >= end - start {
        return Err(ContractError::InvalidSnipeWindow);
    }
    Ok(())
}

/// Pricing parameters: positive floor and increment, non-negative reserve
/// and fee, all within the overflow-safe bound.
pub fn validate_pricing(
    starting_price: i128,
    bid_increment: i128,
    reserve_price: i128,
    entry_fee: i128,
) -> Result<(), ContractError> {
    if starting_price <= 0 || starting_price > PRICE_UPPER_BOUND {
        return Err(ContractError::InvalidInput);
    }
    if bid_increment <= 0 || bid_increment > PRICE_UPPER_BOUND {
        return Err(ContractError::InvalidInput);
    }
    if reserve_price < 0 || reserve_price > PRICE_UPPER_BOUND {
        return Err(ContractError::InvalidInput);
    }
    if entry_fee < 0 || entry_fee > PRICE_UPPER_BOUND {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

pub fn validate_metadata(metadata: &String) -> Result<(), ContractError> {
    if metadata.len() == 0 || metadata.len() > MAX_METADATA_LENGTH {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}
