#![no_std]

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol, Vec};

use gavel_lib::audit::{self, AuditLog, OperationType};
use gavel_lib::{ContractError, OwnershipRecord, MAX_HISTORY_QUERY_LIMIT, MAX_SIGNERS};

mod storage;


use storage::*;

/// Security control plane for the OpenGavel suite.
///
/// Composes three independent approval gates over the administrative
/// identity: a two-step ownership transfer, an N-of-M signature quorum with
/// session expiry, and a queue/delay/grace timelock. Ownership transfer
/// completion, renunciation and emergency recovery require the quorum and
/// the timelock to hold simultaneously; success consumes both.
#[contract]
pub struct SecurityGate;

#[contractimpl]
impl SecurityGate {
    /// Initialize the gate with its owner, signer roster and gate timings.
    ///
    /// The roster, threshold, approval validity and timelock parameters are
    /// immutable after construction.
    pub fn init_contract(
        env: Env,
        owner: Address,
        signers: Vec<Address>,
        threshold: u32,
        approval_validity: u64,
        timelock_delay: u64,
        timelock_grace: u64,
    ) -> Result<(), ContractError> {
        if is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        owner.require_auth();

        if signers.is_empty() || signers.len() > MAX_SIGNERS {
            return Err(ContractError::InvalidInput);
        }
        if threshold == 0 || threshold > signers.len() {
            return Err(ContractError::InvalidInput);
        }
        if approval_validity == 0 {
            return Err(ContractError::InvalidInput);
        }
        // A duplicate roster entry would let one key sign twice.
        for i in 0..signers.len() {
            for j in (i + 1)..signers.len() {
                if signers.get_unchecked(i) == signers.get_unchecked(j) {
                    return Err(ContractError::InvalidInput);
                }
            }
        }

        mark_initialized(&env);
        set_owner(&env, &owner);
        set_signers(&env, &signers);
        set_threshold(&env, threshold);
        set_approval_validity(&env, approval_validity);
        set_timelock_delay(&env, timelock_delay);
        set_timelock_grace(&env, timelock_grace);

        append_history(&env, None, Some(owner.clone()));

        env.events().publish(
            (Symbol::new(&env, "GateInitialized"),),
            (owner, threshold, approval_validity, timelock_delay, timelock_grace),
        );
        Ok(())
    }

    /* ---------------- IDENTITY LEDGER ---------------- */

    /// Current administrative identity; `None` once ownership is renounced.
    pub fn owner(env: Env) -> Option<Address> {
        get_owner(&env)
    }

    pub fn pending_owner(env: Env) -> Option<Address> {
        get_pending_owner(&env)
    }

    pub fn renunciation_unlocked(env: Env) -> bool {
        is_renounce_unlocked(&env)
    }

    /// Nominate a new owner. The nomination takes effect only when the
    /// nominee accepts through the fully gated `accept_transfer`.
    pub fn propose_transfer(
        env: Env,
        caller: Address,
        nominee: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        require_owner(&env, &caller)?;

        if nominee == caller || get_pending_owner(&env) == Some(nominee.clone()) {
            return Err(ContractError::InvalidNominee);
        }

        set_pending_owner(&env, &nominee);

        env.events().publish(
            (Symbol::new(&env, "TransferProposed"),),
            (caller.clone(), nominee),
        );
        audit::record_operation(&env, caller, OperationType::TransferProposed, None, 0);
        Ok(())
    }

    /// Clear the pending nominee without completing a transfer.
    pub fn reset_nominee(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        require_owner(&env, &caller)?;

        if get_pending_owner(&env).is_none() {
            return Err(ContractError::NoPendingNominee);
        }
        clear_pending_owner(&env);

        env.events()
            .publish((Symbol::new(&env, "NomineeReset"),), (caller.clone(),));
        audit::record_operation(&env, caller, OperationType::NomineeReset, None, 0);
        Ok(())
    }

    /// Complete a two-step ownership transfer. The caller must be the
    /// pending nominee, the quorum must be met and the timelock mature;
    /// success consumes both guards together with the identity change.
    pub fn accept_transfer(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        match get_pending_owner(&env) {
            None => return Err(ContractError::NoPendingNominee),
            Some(nominee) if nominee != caller => return Err(ContractError::Unauthorized),
            Some(_) => {}
        }
        ensure_quorum(&env)?;
        ensure_mature(&env)?;

        let previous = get_owner(&env);
        set_owner(&env, &caller);
        clear_pending_owner(&env);
        append_history(&env, previous.clone(), Some(caller.clone()));
        consume_guards(&env);

        env.events().publish(
            (Symbol::new(&env, "OwnershipTransferred"),),
            (previous, caller.clone()),
        );
        audit::record_operation(&env, caller, OperationType::OwnershipTransferred, None, 0);
        Ok(())
    }

    /// Open the renunciation lock. Required state: currently locked.
    pub fn unlock_renunciation(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        require_owner(&env, &caller)?;
        if is_renounce_unlocked(&env) {
            return Err(ContractError::RenunciationUnlocked);
        }
        set_renounce_unlocked(&env, true);

        env.events()
            .publish((Symbol::new(&env, "RenunciationUnlocked"),), (caller.clone(),));
        audit::record_operation(&env, caller, OperationType::RenunciationToggled, None, 0);
        Ok(())
    }

    /// Close the renunciation lock again. Required state: currently open.
    pub fn lock_renunciation(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        require_owner(&env, &caller)?;
        if !is_renounce_unlocked(&env) {
            return Err(ContractError::RenunciationLocked);
        }
        set_renounce_unlocked(&env, false);

        env.events()
            .publish((Symbol::new(&env, "RenunciationLocked"),), (caller.clone(),));
        audit::record_operation(&env, caller, OperationType::RenunciationToggled, None, 0);
        Ok(())
    }

    /// Renounce ownership irreversibly. Owner-only, requires the unlock
    /// flag, the quorum and a mature timelock; consumes both guards.
    pub fn renounce(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        require_owner(&env, &caller)?;
        if !is_renounce_unlocked(&env) {
            return Err(ContractError::RenunciationLocked);
        }
        ensure_quorum(&env)?;
        ensure_mature(&env)?;

        let previous = get_owner(&env);
        remove_owner(&env);
        clear_pending_owner(&env);
        set_renounce_unlocked(&env, false);
        append_history(&env, previous.clone(), None);
        consume_guards(&env);

        env.events()
            .publish((Symbol::new(&env, "OwnershipRenounced"),), (previous,));
        audit::record_operation(&env, caller, OperationType::OwnershipRenounced, None, 0);
        Ok(())
    }

    /// Emergency social recovery: any roster signer may install a new owner
    /// once the quorum and timelock both hold. This is the path back from a
    /// lost or renounced identity.
    pub fn recover_identity(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        require_signer(&env, &caller)?;
        ensure_quorum(&env)?;
        ensure_mature(&env)?;

        let previous = get_owner(&env);
        set_owner(&env, &new_owner);
        clear_pending_owner(&env);
        set_renounce_unlocked(&env, false);
        append_history(&env, previous.clone(), Some(new_owner.clone()));
        consume_guards(&env);

        env.events().publish(
            (Symbol::new(&env, "IdentityRecovered"),),
            (previous, new_owner),
        );
        audit::record_operation(&env, caller, OperationType::IdentityRecovered, None, 0);
        Ok(())
    }

    /* ---------------- MULTI-SIGNATURE QUORUM ---------------- */

    pub fn signers(env: Env) -> Vec<Address> {
        get_signers(&env)
    }

    pub fn threshold(env: Env) -> u32 {
        get_threshold(&env)
    }

    pub fn is_signer(env: Env, id: Address) -> bool {
        get_signers(&env).contains(&id)
    }

    pub fn has_signed(env: Env, id: Address) -> bool {
        storage::has_signed(&env, &id)
    }

    pub fn approval_count(env: Env) -> u32 {
        get_approval_count(&env)
    }

    pub fn approval_expiry(env: Env) -> u64 {
        get_approval_expiry(&env)
    }

    /// Submit one single-use approval toward the live session.
    ///
    /// The first signature of a session arms the expiry window; a signature
    /// arriving after expiry clears the stale session and starts a fresh one
    /// before being processed, so partial quorums never carry over.
    pub fn submit_approval(env: Env, signer: Address) -> Result<(), ContractError> {
        signer.require_auth();
        require_signer(&env, &signer)?;

        let now = env.ledger().timestamp();
        let count = get_approval_count(&env);
        if count == 0 {
            set_approval_expiry(&env, now + get_approval_validity(&env));
        } else if now > get_approval_expiry(&env) {
            clear_approvals(&env);
            set_approval_expiry(&env, now + get_approval_validity(&env));
        }

        if storage::has_signed(&env, &signer) {
            return Err(ContractError::AlreadySigned);
        }
        set_signed(&env, &signer);
        let new_count = get_approval_count(&env) + 1;
        set_approval_count(&env, new_count);

        env.events().publish(
            (Symbol::new(&env, "ApprovalSubmitted"),),
            (signer.clone(), new_count, get_approval_expiry(&env)),
        );
        audit::record_operation(&env, signer, OperationType::ApprovalSubmitted, None, 0);
        Ok(())
    }

    /// Guard predicate: threshold reached inside the validity window.
    pub fn quorum_met(env: Env) -> bool {
        let now = env.ledger().timestamp();
        get_approval_count(&env) >= get_threshold(&env) && now <= get_approval_expiry(&env)
    }

    /* ---------------- TIMELOCK QUEUE ---------------- */

    pub fn queued_at(env: Env) -> u64 {
        get_queued_at(&env)
    }

    pub fn timelock_delay(env: Env) -> u64 {
        get_timelock_delay(&env)
    }

    pub fn timelock_grace(env: Env) -> u64 {
        get_timelock_grace(&env)
    }

    /// Queue the single pending action. Owner or any roster signer may
    /// queue; re-queuing overwrites, so only the latest queue time counts.
    pub fn queue_action(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        let is_owner = get_owner(&env) == Some(caller.clone());
        if !is_owner && !get_signers(&env).contains(&caller) {
            return Err(ContractError::Unauthorized);
        }

        let now = env.ledger().timestamp();
        set_queued_at(&env, now);

        env.events()
            .publish((Symbol::new(&env, "ActionQueued"),), (caller.clone(), now));
        audit::record_operation(&env, caller, OperationType::ActionQueued, None, 0);
        Ok(())
    }

    /// Explicitly clear the pending queue without executing.
    pub fn reset_queue(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        require_owner(&env, &caller)?;
        set_queued_at(&env, 0);

        env.events()
            .publish((Symbol::new(&env, "QueueReset"),), (caller.clone(),));
        audit::record_operation(&env, caller, OperationType::QueueReset, None, 0);
        Ok(())
    }

    /* ---------------- HISTORY & AUDIT QUERIES ---------------- */

    pub fn history_count(env: Env) -> u32 {
        get_history_count(&env)
    }

    pub fn history_entry(env: Env, index: u32) -> Option<OwnershipRecord> {
        get_history_entry(&env, index)
    }

    /// Paginated identity history, oldest first.
    pub fn identity_history(env: Env, start: u32, limit: u32) -> Vec<OwnershipRecord> {
        let count = get_history_count(&env);
        let capped = limit.min(MAX_HISTORY_QUERY_LIMIT);
        let mut records = Vec::new(&env);
        let mut index = start;
        while index < count && records.len() < capped {
            if let Some(record) = get_history_entry(&env, index) {
                records.push_back(record);
            }
            index += 1;
        }
        records
    }

    pub fn audit_log_count(env: Env) -> u64 {
        audit::get_log_id_counter(&env)
    }

    pub fn audit_logs(env: Env, start_id: u64, end_id: u64, max_results: u32) -> Vec<AuditLog> {
        audit::query_audit_logs(&env, start_id, end_id, max_results)
    }
}

/* ---------------- GUARD HELPERS ---------------- */

fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
    match get_owner(env) {
        Some(owner) if owner == *caller => Ok(()),
        _ => Err(ContractError::Unauthorized),
    }
}

fn require_signer(env: &Env, caller: &Address) -> Result<(), ContractError> {
    if !get_signers(env).contains(caller) {
        return Err(ContractError::NotASigner);
    }
    Ok(())
}

fn ensure_quorum(env: &Env) -> Result<(), ContractError> {
    let now = env.ledger().timestamp();
    if get_approval_count(env) < get_threshold(env) || now > get_approval_expiry(env) {
        return Err(ContractError::QuorumNotMet);
    }
    Ok(())
}

fn ensure_mature(env: &Env) -> Result<(), ContractError> {
    let queued_at = get_queued_at(env);
    if queued_at == 0 {
        return Err(ContractError::NotQueued);
    }
    let now = env.ledger().timestamp();
    let delay = get_timelock_delay(env);
    if now < queued_at + delay {
        return Err(ContractError::TooEarly);
    }
    if now > queued_at + delay + get_timelock_grace(env) {
        return Err(ContractError::Expired);
    }
    Ok(())
}

/// Single-use semantics for both gates: a successful gated execution resets
/// the quorum session and zeroes the timelock queue in the same invocation
/// as the inner state change.
fn consume_guards(env: &Env) {
    clear_approvals(env);
    set_queued_at(env, 0);
}

fn append_history(env: &Env, previous: Option<Address>, new_owner: Option<Address>) {
    let record = OwnershipRecord {
        previous,
        new_owner,
        timestamp: env.ledger().timestamp(),
        context: audit::context_fingerprint(env),
    };
    push_history(env, &record);
}
