use soroban_sdk::contracterror;

/// Typed failure codes shared by every OpenGavel contract.
///
/// Each variant maps to exactly one precondition or value violation. Entry
/// points return `Result<_, ContractError>`; a failed invocation reverts and
/// leaves no partial state.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // Lifecycle / auth
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    ContractPaused = 4,
    InvalidInput = 5,

    // Auction registry
    DuplicateAuction = 10,
    AuctionNotFound = 11,
    InvalidWindow = 12,
    InvalidSnipeWindow = 13,
    UnsupportedPrizeAsset = 14,
    PrizeNotHeld = 15,

    // Bidding
    AuctionNotStarted = 20,
    AuctionStarted = 21,
    AuctionEnded = 22,
    AuctionCancelled = 23,
    OwnerCannotBid = 24,
    EntryFeeNotPaid = 25,
    Blacklisted = 26,
    NotWhitelisted = 27,
    BelowStartingPrice = 28,
    BidTooLow = 29,

    // Settlement
    AuctionStillActive = 30,
    NothingToWithdraw = 31,
    AlreadyWithdrawn = 32,
    NoEntryFee = 33,
    EntryFeeAlreadyPaid = 34,

    // Identity ledger
    InvalidNominee = 40,
    NoPendingNominee = 41,
    RenunciationLocked = 42,
    RenunciationUnlocked = 43,

    // Multi-signature quorum
    NotASigner = 50,
    AlreadySigned = 51,
    QuorumNotMet = 52,

    // Timelock queue
    NotQueued = 60,
    TooEarly = 61,
    Expired = 62,

    // Prize asset
    PrizeTokenExists = 70,
    PrizeTokenNotFound = 71,
}
