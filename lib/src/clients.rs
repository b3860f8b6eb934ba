/// Cross-contract client interfaces.
///
/// The auction house talks to its collaborators through these traits; the
/// SDK generates an invoking client for each, so no wasm import is needed
/// and any conforming contract can be injected at init time.
use soroban_sdk::{contractclient, Address, BytesN, Env};

/// Interface of the prize-asset collaborator (see `contracts/prize-nft`).
#[contractclient(name = "PrizeAssetClient")]
pub trait PrizeAsset {
    /// Capability probe: answers `true` for contracts implementing the
    /// unique-asset interface the auction house expects.
    fn supports_asset_interface(env: Env) -> bool;

    fn owner_of(env: Env, token: BytesN<32>) -> Option<Address>;

    fn transfer(env: Env, token: BytesN<32>, from: Address, to: Address);
}

/// Read surface of the security gate consulted for role checks.
#[contractclient(name = "GateClient")]
pub trait IdentitySource {
    /// Current administrative identity; `None` once ownership is renounced.
    fn owner(env: Env) -> Option<Address>;
}
