#![no_std]

use soroban_sdk::{contract, contractimpl, token, Address, BytesN, Env, String, Symbol, Vec};

use gavel_lib::audit::{self, AuditLog, OperationType};
use gavel_lib::clients::{GateClient, PrizeAssetClient};
use gavel_lib::{validation, Auction, AuctionParams, ContractError, EntryFeeRecord};

mod storage;


#[cfg(test)]
mod test_props;
#[cfg(test)]
mod test_settlement;

/// Parametric ascending-bid auction engine.
///
/// Auctions escrow bids in a single payment token and award a unique prize
/// asset to the highest bidder. Administrative identity is not stored here;
/// it is read from the injected security-gate contract on every owner call.
#[contract]
pub struct AuctionHouse;

#[contractimpl]
impl AuctionHouse {
    /// Initialize contract with its collaborators (one-time setup).
    ///
    /// The owner is resolved through the gate and must authorize the call,
    /// so the gate has to be initialized first.
    pub fn init_contract(
        env: Env,
        security_gate: Address,
        payment_token: Address,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        let owner: Option<Address> = GateClient::new(&env, &security_gate).owner();
        let owner = owner.ok_or(ContractError::NotInitialized)?;
        owner.require_auth();

        storage::set_security_gate(&env, &security_gate);
        storage::set_payment_token(&env, &payment_token);
        Ok(())
    }

    /* ---------------- REGISTRY ---------------- */

    /// Register a new auction. Owner-only; all parameters immutable after
    /// creation except `end_time` (snipe extensions only).
    pub fn create_auction(
        env: Env,
        caller: Address,
        id: BytesN<32>,
        params: AuctionParams,
    ) -> Result<(), ContractError> {
        require_owner(&env, &caller)?;
        ensure_not_paused(&env)?;

        if storage::has_auction(&env, &id) {
            return Err(ContractError::DuplicateAuction);
        }
        let now = env.ledger().timestamp();
        validation::validate_auction_window(now, params.start_time, params.end_time)?;
        validation::validate_snipe_window(params.start_time, params.end_time, params.snipe_window)?;
        validation::validate_pricing(
            params.starting_price,
            params.bid_increment,
            params.reserve_price,
            params.entry_fee,
        )?;

        // The prize must already sit in this contract's custody.
        let prize_client = PrizeAssetClient::new(&env, &params.prize.contract);
        if !prize_client.supports_asset_interface() {
            return Err(ContractError::UnsupportedPrizeAsset);
        }
        if prize_client.owner_of(&params.prize.token) != Some(env.current_contract_address()) {
            return Err(ContractError::PrizeNotHeld);
        }

        let auction = Auction {
            start_time: params.start_time,
            end_time: params.end_time,
            starting_price: params.starting_price,
            bid_increment: params.bid_increment,
            reserve_price: params.reserve_price,
            entry_fee: params.entry_fee,
            snipe_window: params.snipe_window,
            snipe_extension: params.snipe_extension,
            prize: params.prize,
            whitelist_only: params.whitelist_only,
            blacklist_enabled: params.blacklist_enabled,
            highest_bid: 0,
            winner: None,
            cancelled: false,
            owner_withdrew: false,
            created_at: now,
        };
        storage::set_auction(&env, &id, &auction);

        env.events().publish(
            (Symbol::new(&env, "AuctionCreated"),),
            (
                id.clone(),
                auction.start_time,
                auction.end_time,
                auction.starting_price,
            ),
        );
        audit::record_operation(
            &env,
            caller,
            OperationType::AuctionCreated,
            Some(id),
            auction.starting_price,
        );
        Ok(())
    }

    /// Cancel an auction that has not yet concluded. Owner-only. Cancelled
    /// auctions refund all escrow and never award the prize.
    pub fn cancel_auction(env: Env, caller: Address, id: BytesN<32>) -> Result<(), ContractError> {
        require_owner(&env, &caller)?;
        ensure_not_paused(&env)?;

        let mut auction = storage::get_auction(&env, &id).ok_or(ContractError::AuctionNotFound)?;
        if auction.cancelled {
            return Err(ContractError::AuctionCancelled);
        }
        if env.ledger().timestamp() > auction.end_time {
            return Err(ContractError::AuctionEnded);
        }
        auction.cancelled = true;
        storage::set_auction(&env, &id, &auction);

        env.events()
            .publish((Symbol::new(&env, "AuctionCancelled"),), (id.clone(),));
        audit::record_operation(&env, caller, OperationType::AuctionCancelled, Some(id), 0);
        Ok(())
    }

    /* ---------------- BIDDING ---------------- */

    /// Place (or raise) a bid. `amount` is an increment over the bidder's
    /// existing escrow; the bidder competes with the cumulative total.
    pub fn place_bid(
        env: Env,
        id: BytesN<32>,
        bidder: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        bidder.require_auth();
        ensure_not_paused(&env)?;

        let mut auction = storage::get_auction(&env, &id).ok_or(ContractError::AuctionNotFound)?;
        if current_owner(&env) == Some(bidder.clone()) {
            return Err(ContractError::OwnerCannotBid);
        }
        if auction.cancelled {
            return Err(ContractError::AuctionCancelled);
        }
        let now = env.ledger().timestamp();
        if now < auction.start_time {
            return Err(ContractError::AuctionNotStarted);
        }
        if now > auction.end_time {
            return Err(ContractError::AuctionEnded);
        }
        if auction.entry_fee > 0 && !storage::get_fee_record(&env, &id, &bidder).paid {
            return Err(ContractError::EntryFeeNotPaid);
        }
        if auction.blacklist_enabled && storage::is_blacklisted(&env, &id, &bidder) {
            return Err(ContractError::Blacklisted);
        }
        if auction.whitelist_only && !storage::is_whitelisted(&env, &id, &bidder) {
            return Err(ContractError::NotWhitelisted);
        }
        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let escrowed = storage::get_escrow(&env, &id, &bidder);
        let total = escrowed
            .checked_add(amount)
            .ok_or(ContractError::InvalidInput)?;
        if total < auction.starting_price {
            return Err(ContractError::BelowStartingPrice);
        }
        if auction.winner.is_some() {
            let floor = auction
                .highest_bid
                .checked_add(auction.bid_increment)
                .ok_or(ContractError::InvalidInput)?;
            if total < floor {
                return Err(ContractError::BidTooLow);
            }
        }

        payment_client(&env).transfer(&bidder, &env.current_contract_address(), &amount);
        storage::set_escrow(&env, &id, &bidder, total);

        auction.highest_bid = total;
        if auction.winner.as_ref() != Some(&bidder) {
            auction.winner = Some(bidder.clone());
        }
        // Late bids push the close out, re-opening the outcry each time.
        if auction.snipe_window > 0
            && auction.snipe_extension > 0
            && auction.end_time - now <= auction.snipe_window
        {
            auction.end_time += auction.snipe_extension;
        }
        storage::set_auction(&env, &id, &auction);

        env.events().publish(
            (Symbol::new(&env, "BidPlaced"),),
            (id.clone(), bidder.clone(), total, auction.end_time),
        );
        audit::record_operation(&env, bidder, OperationType::BidPlaced, Some(id), amount);
        Ok(())
    }

    /* ---------------- SETTLEMENT ---------------- */

    /// Withdraw after an auction has concluded (ended or cancelled).
    ///
    /// Who gets what depends on the outcome:
    /// - cancelled or reserve unmet: everyone, winner included, reclaims
    ///   their full escrow;
    /// - reserve met: the owner draws the winning amount once, the winner
    ///   claims the prize, losing bidders reclaim their escrow.
    pub fn withdraw(env: Env, id: BytesN<32>, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        ensure_not_paused(&env)?;

        let mut auction = storage::get_auction(&env, &id).ok_or(ContractError::AuctionNotFound)?;
        let now = env.ledger().timestamp();
        if !auction.cancelled && now <= auction.end_time {
            return Err(ContractError::AuctionStillActive);
        }

        if auction.cancelled || auction.highest_bid < auction.reserve_price {
            return refund_escrow(&env, &id, &caller);
        }

        if current_owner(&env) == Some(caller.clone()) {
            // Owner draws the winning amount from the winner's escrow.
            if auction.owner_withdrew {
                return Err(ContractError::AlreadyWithdrawn);
            }
            let winner = auction
                .winner
                .clone()
                .ok_or(ContractError::NothingToWithdraw)?;
            let proceeds = auction.highest_bid;
            let remaining = storage::get_escrow(&env, &id, &winner)
                .checked_sub(proceeds)
                .unwrap_or(0);
            storage::set_escrow(&env, &id, &winner, remaining);
            auction.owner_withdrew = true;
            storage::set_auction(&env, &id, &auction);

            payment_client(&env).transfer(&env.current_contract_address(), &caller, &proceeds);

            env.events().publish(
                (Symbol::new(&env, "ProceedsWithdrawn"),),
                (id.clone(), caller.clone(), proceeds),
            );
            audit::record_operation(
                &env,
                caller,
                OperationType::ProceedsWithdrawn,
                Some(id),
                proceeds,
            );
            return Ok(());
        }

        if auction.winner.as_ref() == Some(&caller) {
            // Winner claims the prize; escrow backing the bid stays behind
            // for the owner's draw.
            let prize_client = PrizeAssetClient::new(&env, &auction.prize.contract);
            let house = env.current_contract_address();
            if prize_client.owner_of(&auction.prize.token) != Some(house.clone()) {
                return Err(ContractError::PrizeNotHeld);
            }
            prize_client.transfer(&auction.prize.token, &house, &caller);

            env.events().publish(
                (Symbol::new(&env, "PrizeClaimed"),),
                (id.clone(), caller.clone()),
            );
            audit::record_operation(&env, caller, OperationType::PrizeClaimed, Some(id), 0);
            return Ok(());
        }

        refund_escrow(&env, &id, &caller)
    }

    /// Recover the prize from an auction that concluded without a sale
    /// (cancelled or reserve unmet). Owner-only; the token goes back to the
    /// owner, who may re-auction or burn it.
    pub fn reclaim_prize(env: Env, caller: Address, id: BytesN<32>) -> Result<(), ContractError> {
        require_owner(&env, &caller)?;
        ensure_not_paused(&env)?;

        let auction = storage::get_auction(&env, &id).ok_or(ContractError::AuctionNotFound)?;
        let now = env.ledger().timestamp();
        if !auction.cancelled && now <= auction.end_time {
            return Err(ContractError::AuctionStillActive);
        }
        // A sold prize belongs to the winner's claim path.
        let sold = !auction.cancelled
            && auction.winner.is_some()
            && auction.highest_bid >= auction.reserve_price;
        if sold {
            return Err(ContractError::NothingToWithdraw);
        }

        let prize_client = PrizeAssetClient::new(&env, &auction.prize.contract);
        let house = env.current_contract_address();
        if prize_client.owner_of(&auction.prize.token) != Some(house.clone()) {
            return Err(ContractError::PrizeNotHeld);
        }
        prize_client.transfer(&auction.prize.token, &house, &caller);

        env.events().publish(
            (Symbol::new(&env, "PrizeReclaimed"),),
            (id.clone(), caller.clone()),
        );
        audit::record_operation(&env, caller, OperationType::PrizeReclaimed, Some(id), 0);
        Ok(())
    }

    /* ---------------- ENTRY FEES ---------------- */

    /// Pay the auction's entry fee, unlocking the right to bid.
    pub fn pay_entry_fee(
        env: Env,
        id: BytesN<32>,
        participant: Address,
    ) -> Result<(), ContractError> {
        participant.require_auth();
        ensure_not_paused(&env)?;

        let auction = storage::get_auction(&env, &id).ok_or(ContractError::AuctionNotFound)?;
        if auction.entry_fee == 0 {
            return Err(ContractError::NoEntryFee);
        }
        if auction.cancelled {
            return Err(ContractError::AuctionCancelled);
        }
        if env.ledger().timestamp() > auction.end_time {
            return Err(ContractError::AuctionEnded);
        }
        let mut record = storage::get_fee_record(&env, &id, &participant);
        if record.paid {
            return Err(ContractError::EntryFeeAlreadyPaid);
        }
        record.paid = true;
        storage::set_fee_record(&env, &id, &participant, &record);

        payment_client(&env).transfer(
            &participant,
            &env.current_contract_address(),
            &auction.entry_fee,
        );

        env.events().publish(
            (Symbol::new(&env, "EntryFeePaid"),),
            (id.clone(), participant.clone(), auction.entry_fee),
        );
        audit::record_operation(
            &env,
            participant,
            OperationType::EntryFeePaid,
            Some(id),
            auction.entry_fee,
        );
        Ok(())
    }

    /// Reclaim a paid entry fee once the auction has concluded. One-shot.
    pub fn withdraw_entry_fee(
        env: Env,
        id: BytesN<32>,
        participant: Address,
    ) -> Result<(), ContractError> {
        participant.require_auth();
        ensure_not_paused(&env)?;

        let auction = storage::get_auction(&env, &id).ok_or(ContractError::AuctionNotFound)?;
        if auction.entry_fee == 0 {
            return Err(ContractError::NoEntryFee);
        }
        if !auction.cancelled && env.ledger().timestamp() <= auction.end_time {
            return Err(ContractError::AuctionStillActive);
        }
        let mut record = storage::get_fee_record(&env, &id, &participant);
        if !record.paid {
            return Err(ContractError::NothingToWithdraw);
        }
        if record.withdrawn {
            return Err(ContractError::AlreadyWithdrawn);
        }
        record.withdrawn = true;
        storage::set_fee_record(&env, &id, &participant, &record);

        payment_client(&env).transfer(
            &env.current_contract_address(),
            &participant,
            &auction.entry_fee,
        );

        env.events().publish(
            (Symbol::new(&env, "EntryFeeRefunded"),),
            (id.clone(), participant.clone(), auction.entry_fee),
        );
        audit::record_operation(
            &env,
            participant,
            OperationType::EntryFeeRefunded,
            Some(id),
            auction.entry_fee,
        );
        Ok(())
    }

    /* ---------------- MEMBERSHIP ---------------- */

    /// Add or remove a whitelist member. Owner-only, before the auction
    /// starts.
    pub fn set_whitelisted(
        env: Env,
        caller: Address,
        id: BytesN<32>,
        participant: Address,
        listed: bool,
    ) -> Result<(), ContractError> {
        require_owner(&env, &caller)?;
        ensure_not_paused(&env)?;
        ensure_before_start(&env, &id)?;

        storage::set_whitelisted(&env, &id, &participant, listed);
        env.events().publish(
            (Symbol::new(&env, "MembershipUpdated"),),
            (id.clone(), participant, listed),
        );
        audit::record_operation(&env, caller, OperationType::MembershipUpdated, Some(id), 0);
        Ok(())
    }

    /// Add or remove a blacklist member. Owner-only, before the auction
    /// starts.
    pub fn set_blacklisted(
        env: Env,
        caller: Address,
        id: BytesN<32>,
        participant: Address,
        listed: bool,
    ) -> Result<(), ContractError> {
        require_owner(&env, &caller)?;
        ensure_not_paused(&env)?;
        ensure_before_start(&env, &id)?;

        storage::set_blacklisted(&env, &id, &participant, listed);
        env.events().publish(
            (Symbol::new(&env, "MembershipUpdated"),),
            (id.clone(), participant, listed),
        );
        audit::record_operation(&env, caller, OperationType::MembershipUpdated, Some(id), 0);
        Ok(())
    }

    /* ---------------- METADATA ---------------- */

    /// Attach an off-chain metadata reference. Owner-only, before start.
    pub fn set_metadata(
        env: Env,
        caller: Address,
        id: BytesN<32>,
        uri: String,
    ) -> Result<(), ContractError> {
        require_owner(&env, &caller)?;
        ensure_before_start(&env, &id)?;
        validation::validate_metadata(&uri)?;

        storage::set_metadata(&env, &id, &uri);
        env.events()
            .publish((Symbol::new(&env, "MetadataUpdated"),), (id.clone(),));
        audit::record_operation(&env, caller, OperationType::MetadataUpdated, Some(id), 0);
        Ok(())
    }

    /* ---------------- CIRCUIT BREAKER ---------------- */

    /// Toggle the circuit breaker. Owner-only. While paused every
    /// state-mutating auction entry point is rejected.
    pub fn set_paused(env: Env, caller: Address, paused: bool) -> Result<(), ContractError> {
        require_owner(&env, &caller)?;

        storage::set_paused(&env, paused);
        env.events()
            .publish((Symbol::new(&env, "PauseToggled"),), (paused,));
        audit::record_operation(&env, caller, OperationType::PauseToggled, None, 0);
        Ok(())
    }

    /* ---------------- QUERIES ---------------- */

    pub fn get_auction(env: Env, id: BytesN<32>) -> Option<Auction> {
        storage::get_auction(&env, &id)
    }

    pub fn escrow_of(env: Env, id: BytesN<32>, bidder: Address) -> i128 {
        storage::get_escrow(&env, &id, &bidder)
    }

    pub fn entry_fee_record(env: Env, id: BytesN<32>, participant: Address) -> EntryFeeRecord {
        storage::get_fee_record(&env, &id, &participant)
    }

    pub fn is_whitelisted(env: Env, id: BytesN<32>, participant: Address) -> bool {
        storage::is_whitelisted(&env, &id, &participant)
    }

    pub fn is_blacklisted(env: Env, id: BytesN<32>, participant: Address) -> bool {
        storage::is_blacklisted(&env, &id, &participant)
    }

    pub fn metadata(env: Env, id: BytesN<32>) -> Option<String> {
        storage::get_metadata(&env, &id)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    pub fn security_gate(env: Env) -> Address {
        storage::get_security_gate(&env)
    }

    pub fn payment_token(env: Env) -> Address {
        storage::get_payment_token(&env)
    }

    pub fn audit_log_count(env: Env) -> u64 {
        audit::get_log_id_counter(&env)
    }

    pub fn audit_logs(env: Env, start_id: u64, end_id: u64, max_results: u32) -> Vec<AuditLog> {
        audit::query_audit_logs(&env, start_id, end_id, max_results)
    }
}

/* ---------------- HELPERS ---------------- */

fn current_owner(env: &Env) -> Option<Address> {
    GateClient::new(env, &storage::get_security_gate(env)).owner()
}

fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    if current_owner(env) != Some(caller.clone()) {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn ensure_not_paused(env: &Env) -> Result<(), ContractError> {
    if storage::is_paused(env) {
        return Err(ContractError::ContractPaused);
    }
    Ok(())
}

fn ensure_before_start(env: &Env, id: &BytesN<32>) -> Result<(), ContractError> {
    let auction = storage::get_auction(env, id).ok_or(ContractError::AuctionNotFound)?;
    if env.ledger().timestamp() >= auction.start_time {
        return Err(ContractError::AuctionStarted);
    }
    Ok(())
}

fn payment_client(env: &Env) -> token::Client<'_> {
    token::Client::new(env, &storage::get_payment_token(env))
}

/// Zero a caller's escrow and pay it back. Errors if nothing is held.
fn refund_escrow(env: &Env, id: &BytesN<32>, caller: &Address) -> Result<(), ContractError> {
    let amount = storage::get_escrow(env, id, caller);
    if amount == 0 {
        return Err(ContractError::NothingToWithdraw);
    }
    storage::set_escrow(env, id, caller, 0);
    payment_client(env).transfer(&env.current_contract_address(), caller, &amount);

    env.events().publish(
        (Symbol::new(env, "EscrowRefunded"),),
        (id.clone(), caller.clone(), amount),
    );
    audit::record_operation(
        env,
        caller.clone(),
        OperationType::EscrowRefunded,
        Some(id.clone()),
        amount,
    );
    Ok(())
}
