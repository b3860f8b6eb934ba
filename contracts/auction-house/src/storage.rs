use soroban_sdk::{contracttype, Address, BytesN, Env, String};

use gavel_lib::{Auction, EntryFeeRecord};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Address of the security-gate contract (identity source)
    SecurityGate,
    /// Payment token used for escrow and fees
    PaymentToken,
    /// Circuit-breaker flag
    Paused,
    /// Auction record by id
    Auction(BytesN<32>),
    /// Cumulative escrow: (auction, bidder)
    Escrow(BytesN<32>, Address),
    /// Entry-fee record: (auction, participant)
    EntryFee(BytesN<32>, Address),
    /// Whitelist membership: (auction, participant)
    Whitelisted(BytesN<32>, Address),
    /// Blacklist membership: (auction, participant)
    Blacklisted(BytesN<32>, Address),
    /// Off-chain metadata reference by auction id
    Metadata(BytesN<32>),
}

/* ---------------- CONFIG ---------------- */

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::SecurityGate)
}

pub fn set_security_gate(env: &Env, gate: &Address) {
    env.storage().instance().set(&DataKey::SecurityGate, gate);
}

pub fn get_security_gate(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::SecurityGate).unwrap()
}

pub fn set_payment_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::PaymentToken, token);
}

pub fn get_payment_token(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::PaymentToken).unwrap()
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&DataKey::Paused).unwrap_or(false)
}

/* ---------------- AUCTIONS ---------------- */

pub fn has_auction(env: &Env, id: &BytesN<32>) -> bool {
    env.storage().persistent().has(&DataKey::Auction(id.clone()))
}

pub fn get_auction(env: &Env, id: &BytesN<32>) -> Option<Auction> {
    env.storage().persistent().get(&DataKey::Auction(id.clone()))
}

pub fn set_auction(env: &Env, id: &BytesN<32>, auction: &Auction) {
    env.storage()
        .persistent()
        .set(&DataKey::Auction(id.clone()), auction);
}

/* ---------------- ESCROW LEDGER ---------------- */

pub fn get_escrow(env: &Env, id: &BytesN<32>, bidder: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Escrow(id.clone(), bidder.clone()))
        .unwrap_or(0)
}

pub fn set_escrow(env: &Env, id: &BytesN<32>, bidder: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Escrow(id.clone(), bidder.clone()), &amount);
}

/* ---------------- ENTRY FEES ---------------- */

pub fn get_fee_record(env: &Env, id: &BytesN<32>, participant: &Address) -> EntryFeeRecord {
    env.storage()
        .persistent()
        .get(&DataKey::EntryFee(id.clone(), participant.clone()))
        .unwrap_or(EntryFeeRecord {
            paid: false,
            withdrawn: false,
        })
}

pub fn set_fee_record(env: &Env, id: &BytesN<32>, participant: &Address, record: &EntryFeeRecord) {
    env.storage()
        .persistent()
        .set(&DataKey::EntryFee(id.clone(), participant.clone()), record);
}

/* ---------------- MEMBERSHIP ---------------- */

pub fn is_whitelisted(env: &Env, id: &BytesN<32>, participant: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Whitelisted(id.clone(), participant.clone()))
        .unwrap_or(false)
}

pub fn set_whitelisted(env: &Env, id: &BytesN<32>, participant: &Address, listed: bool) {
    env.storage()
        .persistent()
        .set(&DataKey::Whitelisted(id.clone(), participant.clone()), &listed);
}

pub fn is_blacklisted(env: &Env, id: &BytesN<32>, participant: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Blacklisted(id.clone(), participant.clone()))
        .unwrap_or(false)
}

pub fn set_blacklisted(env: &Env, id: &BytesN<32>, participant: &Address, listed: bool) {
    env.storage()
        .persistent()
        .set(&DataKey::Blacklisted(id.clone(), participant.clone()), &listed);
}

/* ---------------- METADATA ---------------- */

pub fn get_metadata(env: &Env, id: &BytesN<32>) -> Option<String> {
    env.storage().persistent().get(&DataKey::Metadata(id.clone()))
}

pub fn set_metadata(env: &Env, id: &BytesN<32>, uri: &String) {
    env.storage()
        .persistent()
        .set(&DataKey::Metadata(id.clone()), uri);
}
