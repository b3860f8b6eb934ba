/// Audit logging module for contract operation tracking
///
/// Provides immutable audit log storage with auto-incrementing IDs and
/// paginated querying. Entries live in persistent storage under a separate
/// namespace and are never read back by core contract logic.
use soroban_sdk::{contracttype, Address, Bytes, BytesN, Env, Symbol, Vec};

// ============================================================================
// AUDIT LOG TYPES
// ============================================================================

/// Operation type categories for audit logging
#[contracttype]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum OperationType {
    // Auction operations
    AuctionCreated = 1,
    BidPlaced = 2,
    AuctionCancelled = 3,
    EscrowRefunded = 4,
    ProceedsWithdrawn = 5,
    PrizeClaimed = 6,
    EntryFeePaid = 7,
    EntryFeeRefunded = 8,
    MembershipUpdated = 9,
    MetadataUpdated = 10,
    PauseToggled = 11,
    PrizeReclaimed = 12,

    // Security control plane operations
    TransferProposed = 20,
    NomineeReset = 21,
    OwnershipTransferred = 22,
    OwnershipRenounced = 23,
    IdentityRecovered = 24,
    RenunciationToggled = 25,
    ApprovalSubmitted = 26,
    ActionQueued = 27,
    QueueReset = 28,
}

/// Immutable audit log entry
#[contracttype]
#[derive(Clone, Debug)]
pub struct AuditLog {
    /// Auto-incrementing unique identifier
    pub id: u64,
    /// Ledger timestamp at time of operation
    pub timestamp: u64,
    /// Address that triggered the operation
    pub operator: Address,
    /// Categorized operation type
    pub operation_type: OperationType,
    /// Auction the operation touched, when applicable
    pub auction_id: Option<BytesN<32>>,
    /// Amount moved or recorded by the operation; 0 when not monetary
    pub amount: i128,
    /// Fingerprint of the enclosing execution context
    pub context: BytesN<32>,
}

/// Tamper-evident fingerprint of the enclosing execution context: SHA-256
/// over the network id, ledger sequence and timestamp.
pub fn context_fingerprint(env: &Env) -> BytesN<32> {
    let mut data = Bytes::new(env);
    data.extend_from_array(&env.ledger().network_id().to_array());
    data.extend_from_array(&env.ledger().sequence().to_be_bytes());
    data.extend_from_array(&env.ledger().timestamp().to_be_bytes());
    env.crypto().sha256(&data).to_bytes()
}

// ============================================================================
// AUDIT LOG STORAGE
// ============================================================================

fn counter_key(env: &Env) -> Symbol {
    Symbol::new(env, "audit_log_id_counter")
}

/// Get the current audit log ID counter
pub fn get_log_id_counter(env: &Env) -> u64 {
    env.storage()
        .persistent()
        .get::<_, u64>(&counter_key(env))
        .unwrap_or(0)
}

fn increment_log_id_counter(env: &Env) -> u64 {
    let next = get_log_id_counter(env).saturating_add(1);
    env.storage().persistent().set(&counter_key(env), &next);
    next
}

/// Retrieve an audit log entry by ID
pub fn get_audit_log(env: &Env, log_id: u64) -> Option<AuditLog> {
    let key = (Symbol::new(env, "audit_log_entry"), log_id);
    env.storage().persistent().get(&key)
}

/// Create and store a new audit log entry
///
/// Assigns the next incrementing ID and stores the entry in persistent
/// storage. Entries cannot be modified or deleted after creation.
pub fn record_operation(
    env: &Env,
    operator: Address,
    operation_type: OperationType,
    auction_id: Option<BytesN<32>>,
    amount: i128,
) -> u64 {
    let log_id = increment_log_id_counter(env);
    let log = AuditLog {
        id: log_id,
        timestamp: env.ledger().timestamp(),
        operator,
        operation_type,
        auction_id,
        amount,
        context: context_fingerprint(env),
    };
    let key = (Symbol::new(env, "audit_log_entry"), log_id);
    env.storage().persistent().set(&key, &log);
    log_id
}

// ============================================================================
// AUDIT LOG QUERYING
// ============================================================================

/// Query audit logs with pagination
///
/// Returns logs inclusive of `start_id` and `end_id`, at most `max_results`
/// of them. Out-of-range IDs are clamped.
pub fn query_audit_logs(env: &Env, start_id: u64, end_id: u64, max_results: u32) -> Vec<AuditLog> {
    let total = get_log_id_counter(env);
    let start = if start_id == 0 { 1 } else { start_id };
    let end = end_id.min(total);
    let limit = if max_results == 0 {
        100
    } else {
        max_results.min(crate::MAX_HISTORY_QUERY_LIMIT)
    };

    let mut logs: Vec<AuditLog> = Vec::new(env);
    let mut current = start;
    while current <= end && logs.len() < limit {
        if let Some(log) = get_audit_log(env, current) {
            logs.push_back(log);
        }
        current += 1;
    }
    logs
}
