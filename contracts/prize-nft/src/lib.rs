#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Address, BytesN, Env, Symbol};

use gavel_lib::ContractError;


#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    /// Current holder of a token
    TokenOwner(BytesN<32>),
    /// Total tokens ever minted
    MintCounter,
}

/// Unique-asset contract awarded through OpenGavel auctions.
///
/// Tokens are identified by opaque 32-byte keys chosen at mint time. The
/// auction house probes `supports_asset_interface` and `owner_of` before
/// accepting a token as an auction prize.
#[contract]
pub struct PrizeNft;

#[contractimpl]
impl PrizeNft {
    /// Initialize contract with admin (one-time setup)
    pub fn init_contract(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::MintCounter, &0u64);
        Ok(())
    }

    /// Mint a new prize token to `to`. Admin-only.
    pub fn mint(env: Env, to: Address, token: BytesN<32>) -> Result<(), ContractError> {
        verify_admin(&env)?;

        let key = DataKey::TokenOwner(token.clone());
        if env.storage().persistent().has(&key) {
            return Err(ContractError::PrizeTokenExists);
        }
        env.storage().persistent().set(&key, &to);

        let counter: u64 = env
            .storage()
            .instance()
            .get(&DataKey::MintCounter)
            .unwrap_or(0);
        env.storage()
            .instance()
            .set(&DataKey::MintCounter, &(counter + 1));

        env.events()
            .publish((Symbol::new(&env, "PrizeMinted"),), (token, to));
        Ok(())
    }

    /// Destroy a token. Only its current holder may burn.
    pub fn burn(env: Env, token: BytesN<32>) -> Result<(), ContractError> {
        let key = DataKey::TokenOwner(token.clone());
        let holder: Address = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(ContractError::PrizeTokenNotFound)?;
        holder.require_auth();
        env.storage().persistent().remove(&key);

        env.events()
            .publish((Symbol::new(&env, "PrizeBurned"),), (token, holder));
        Ok(())
    }

    /// Move a token between holders. `from` must hold the token and
    /// authorize the call.
    pub fn transfer(
        env: Env,
        token: BytesN<32>,
        from: Address,
        to: Address,
    ) -> Result<(), ContractError> {
        from.require_auth();

        let key = DataKey::TokenOwner(token.clone());
        let holder: Address = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(ContractError::PrizeTokenNotFound)?;
        if holder != from {
            return Err(ContractError::Unauthorized);
        }
        env.storage().persistent().set(&key, &to);

        env.events()
            .publish((Symbol::new(&env, "PrizeTransferred"),), (token, from, to));
        Ok(())
    }

    pub fn owner_of(env: Env, token: BytesN<32>) -> Option<Address> {
        env.storage().persistent().get(&DataKey::TokenOwner(token))
    }

    /// Capability probe used by the auction house at auction creation.
    pub fn supports_asset_interface(env: Env) -> bool {
        let _ = env;
        true
    }

    pub fn total_minted(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::MintCounter)
            .unwrap_or(0)
    }
}

fn verify_admin(env: &Env) -> Result<(), ContractError> {
    let admin: Address = env
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ContractError::NotInitialized)?;
    admin.require_auth();
    Ok(())
}
