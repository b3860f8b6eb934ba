use soroban_sdk::{contracttype, Address, Env, Vec};

use gavel_lib::OwnershipRecord;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// One-time init marker; survives renunciation
    Initialized,
    /// Current owner identity (absent once renounced)
    Owner,
    /// Pending transfer nominee
    PendingOwner,
    /// Renunciation-unlock flag
    RenounceUnlocked,
    /// Fixed signer roster
    Signers,
    /// Required approvals (N of M)
    Threshold,
    /// Approval session validity in seconds
    ApprovalValidity,
    /// Per-signer has-signed flag for the live session
    HasSigned(Address),
    /// Running approval count for the live session
    ApprovalCount,
    /// Expiry tick of the live session (0 = no session)
    ApprovalExpiry,
    /// Timelock queue tick (0 = no pending action)
    QueuedAt,
    /// Timelock delay in seconds
    TimelockDelay,
    /// Timelock grace window in seconds
    TimelockGrace,
    /// Number of identity-history records
    HistoryCount,
    /// Identity-history record by index
    History(u32),
}

/* ---------------- LIFECYCLE ---------------- */

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

pub fn mark_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
}

/* ---------------- IDENTITY ---------------- */

pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Owner)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn remove_owner(env: &Env) {
    env.storage().instance().remove(&DataKey::Owner);
}

pub fn get_pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::PendingOwner)
}

pub fn set_pending_owner(env: &Env, nominee: &Address) {
    env.storage().instance().set(&DataKey::PendingOwner, nominee);
}

pub fn clear_pending_owner(env: &Env) {
    env.storage().instance().remove(&DataKey::PendingOwner);
}

pub fn is_renounce_unlocked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::RenounceUnlocked)
        .unwrap_or(false)
}

pub fn set_renounce_unlocked(env: &Env, unlocked: bool) {
    env.storage()
        .instance()
        .set(&DataKey::RenounceUnlocked, &unlocked);
}

/* ---------------- QUORUM ---------------- */

pub fn get_signers(env: &Env) -> Vec<Address> {
    env.storage().instance().get(&DataKey::Signers).unwrap()
}

pub fn set_signers(env: &Env, signers: &Vec<Address>) {
    env.storage().instance().set(&DataKey::Signers, signers);
}

pub fn get_threshold(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::Threshold).unwrap()
}

pub fn set_threshold(env: &Env, threshold: u32) {
    env.storage().instance().set(&DataKey::Threshold, &threshold);
}

pub fn get_approval_validity(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ApprovalValidity)
        .unwrap()
}

pub fn set_approval_validity(env: &Env, validity: u64) {
    env.storage()
        .instance()
        .set(&DataKey::ApprovalValidity, &validity);
}

pub fn has_signed(env: &Env, signer: &Address) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::HasSigned(signer.clone()))
        .unwrap_or(false)
}

pub fn set_signed(env: &Env, signer: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::HasSigned(signer.clone()), &true);
}

pub fn get_approval_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ApprovalCount)
        .unwrap_or(0)
}

pub fn set_approval_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::ApprovalCount, &count);
}

pub fn get_approval_expiry(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ApprovalExpiry)
        .unwrap_or(0)
}

pub fn set_approval_expiry(env: &Env, expiry: u64) {
    env.storage()
        .instance()
        .set(&DataKey::ApprovalExpiry, &expiry);
}

/// Clears every signature of the live session along with its count and
/// expiry. Used both for lazy expiry re-arming and for guard consumption.
pub fn clear_approvals(env: &Env) {
    let signers = get_signers(env);
    for signer in signers.iter() {
        env.storage().instance().remove(&DataKey::HasSigned(signer));
    }
    set_approval_count(env, 0);
    set_approval_expiry(env, 0);
}

/* ---------------- TIMELOCK ---------------- */

pub fn get_queued_at(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::QueuedAt).unwrap_or(0)
}

pub fn set_queued_at(env: &Env, queued_at: u64) {
    env.storage().instance().set(&DataKey::QueuedAt, &queued_at);
}

pub fn get_timelock_delay(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::TimelockDelay).unwrap()
}

pub fn set_timelock_delay(env: &Env, delay: u64) {
    env.storage().instance().set(&DataKey::TimelockDelay, &delay);
}

pub fn get_timelock_grace(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::TimelockGrace).unwrap()
}

pub fn set_timelock_grace(env: &Env, grace: u64) {
    env.storage().instance().set(&DataKey::TimelockGrace, &grace);
}

/* ---------------- IDENTITY HISTORY ---------------- */

pub fn get_history_count(env: &Env) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::HistoryCount)
        .unwrap_or(0)
}

pub fn get_history_entry(env: &Env, index: u32) -> Option<OwnershipRecord> {
    env.storage().persistent().get(&DataKey::History(index))
}

/// Appends a record at the next index. History is never rewritten.
pub fn push_history(env: &Env, record: &OwnershipRecord) {
    let count = get_history_count(env);
    env.storage().persistent().set(&DataKey::History(count), record);
    env.storage()
        .persistent()
        .set(&DataKey::HistoryCount, &(count + 1));
}
