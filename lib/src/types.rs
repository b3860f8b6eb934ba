use soroban_sdk::{contracttype, Address, BytesN};

/// Reference to the unique asset awarded to an auction winner.
///
/// Resolved at auction creation: the contract must answer the asset
/// interface probe and must report the auction house as current holder.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PrizeRef {
    pub contract: Address,
    pub token: BytesN<32>,
}

/// Construction parameters for a new auction, grouped into one value so the
/// entry point stays within the host's contract-argument limit.
#[derive(Clone, Debug)]
#[contracttype]
pub struct AuctionParams {
    pub start_time: u64,
    pub end_time: u64,
    pub starting_price: i128,
    pub bid_increment: i128,
    pub reserve_price: i128,
    pub entry_fee: i128,
    pub snipe_window: u64,
    pub snipe_extension: u64,
    pub prize: PrizeRef,
    pub whitelist_only: bool,
    pub blacklist_enabled: bool,
}

/// Full on-ledger record of a single ascending-bid auction.
///
/// All pricing and timing parameters are immutable after creation; the one
/// exception is `end_time`, which may only move forward via the
/// snipe-prevention rule in `place_bid`.
#[derive(Clone, Debug)]
#[contracttype]
pub struct Auction {
    pub start_time: u64,
    pub end_time: u64,
    pub starting_price: i128,
    pub bid_increment: i128,
    pub reserve_price: i128,
    /// Entry fee in payment-token units; 0 disables the fee gate.
    pub entry_fee: i128,
    /// Seconds before `end_time` within which a bid triggers an extension.
    /// 0 disables snipe prevention.
    pub snipe_window: u64,
    /// Seconds added to `end_time` per qualifying late bid. Repeated late
    /// bids extend without bound; that is the intended anti-sniping shape.
    pub snipe_extension: u64,
    pub prize: PrizeRef,
    /// When set, only whitelisted participants may bid.
    pub whitelist_only: bool,
    /// When set, blacklisted participants are rejected.
    pub blacklist_enabled: bool,
    pub highest_bid: i128,
    pub winner: Option<Address>,
    pub cancelled: bool,
    /// Guards the owner's one-shot withdrawal of the winning amount.
    pub owner_withdrew: bool,
    pub created_at: u64,
}

/// Per-(auction, participant) entry-fee bookkeeping.
///
/// Invariant: `withdrawn` implies `paid`; each flag flips at most once.
#[derive(Clone, Copy, Debug, Default)]
#[contracttype]
pub struct EntryFeeRecord {
    pub paid: bool,
    pub withdrawn: bool,
}

/// Append-only record of one completed identity change.
///
/// `None` stands for the null identity: the pre-init state for `previous`
/// and renounced ownership for `new_owner`.
#[derive(Clone, Debug)]
#[contracttype]
pub struct OwnershipRecord {
    pub previous: Option<Address>,
    pub new_owner: Option<Address>,
    pub timestamp: u64,
    /// SHA-256 fingerprint of the enclosing execution context, for audit.
    pub context: BytesN<32>,
}
