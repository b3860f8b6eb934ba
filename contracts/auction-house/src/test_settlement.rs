#![cfg(test)]

use soroban_sdk::Env;

use gavel_lib::ContractError;

use crate::testutils::{
    auction_id, funded_bidder, make_auction, set_time, setup, AuctionOpts, END, START,
};

#[test]
fn withdraw_requires_conclusion() {
    let env = Env::default();
    let fx = setup(&env);
    let id = make_auction(&fx, 1, AuctionOpts::default());
    let alice = funded_bidder(&fx, 1_000);
    set_time(&env, START);
    fx.client.place_bid(&id, &alice, &100);

    assert_eq!(
        fx.client.try_withdraw(&id, &alice),
        Err(Ok(ContractError::AuctionStillActive))
    );
    set_time(&env, END);
    assert_eq!(
        fx.client.try_withdraw(&id, &alice),
        Err(Ok(ContractError::AuctionStillActive))
    );
}

#[test]
fn withdraw_unknown_auction_fails() {
    let env = Env::default();
    let fx = setup(&env);
    let alice = funded_bidder(&fx, 1_000);
    assert_eq!(
        fx.client.try_withdraw(&auction_id(&env, 9), &alice),
        Err(Ok(ContractError::AuctionNotFound))
    );
}

// Reserve price 150 is never met: 100 then 110. On conclusion both bidders
// reclaim their full escrow and the owner gets nothing.
#[test]
fn reserve_unmet_refunds_every_bidder() {
    let env = Env::default();
    let fx = setup(&env);
    let id = make_auction(&fx, 1, AuctionOpts::default());
    let alice = funded_bidder(&fx, 1_000);
    let bob = funded_bidder(&fx, 1_000);
    set_time(&env, START);

    fx.client.place_bid(&id, &alice, &100);
    fx.client.place_bid(&id, &bob, &110);
    set_time(&env, END + 1);

    fx.client.withdraw(&id, &alice);
    fx.client.withdraw(&id, &bob);
    assert_eq!(fx.token.balance(&alice), 1_000);
    assert_eq!(fx.token.balance(&bob), 1_000);
    assert_eq!(fx.token.balance(&fx.house), 0);

    assert_eq!(
        fx.client.try_withdraw(&id, &fx.owner),
        Err(Ok(ContractError::NothingToWithdraw))
    );
    // Prize never leaves custody.
    assert_eq!(fx.prize.owner_of(&auction_id(&env, 1)), Some(fx.house.clone()));
}

#[test]
fn reserve_met_settles_owner_winner_and_losers() {
    let env = Env::default();
    let fx = setup(&env);
    let id = make_auction(&fx, 1, AuctionOpts::default());
    let alice = funded_bidder(&fx, 1_000);
    let bob = funded_bidder(&fx, 1_000);
    set_time(&env, START);

    fx.client.place_bid(&id, &alice, &100);
    fx.client.place_bid(&id, &bob, &160);
    set_time(&env, END + 1);

    // Owner draws exactly the winning amount.
    fx.client.withdraw(&id, &fx.owner);
    assert_eq!(fx.token.balance(&fx.owner), 160);
    assert_eq!(fx.client.escrow_of(&id, &bob), 0);

    // Winner claims the prize, not money.
    fx.client.withdraw(&id, &bob);
    assert_eq!(fx.prize.owner_of(&auction_id(&env, 1)), Some(bob.clone()));
    assert_eq!(fx.token.balance(&bob), 840);

    // Loser reclaims escrow.
    fx.client.withdraw(&id, &alice);
    assert_eq!(fx.token.balance(&alice), 1_000);
    assert_eq!(fx.token.balance(&fx.house), 0);
}

#[test]
fn owner_draw_is_one_shot() {
    let env = Env::default();
    let fx = setup(&env);
    let id = make_auction(&fx, 1, AuctionOpts::default());
    let bob = funded_bidder(&fx, 1_000);
    set_time(&env, START);
    fx.client.place_bid(&id, &bob, &160);
    set_time(&env, END + 1);

    fx.client.withdraw(&id, &fx.owner);
    assert_eq!(
        fx.client.try_withdraw(&id, &fx.owner),
        Err(Ok(ContractError::AlreadyWithdrawn))
    );
}

#[test]
fn winner_prize_claim_is_one_shot() {
    let env = Env::default();
    let fx = setup(&env);
    let id = make_auction(&fx, 1, AuctionOpts::default());
    let bob = funded_bidder(&fx, 1_000);
    set_time(&env, START);
    fx.client.place_bid(&id, &bob, &160);
    set_time(&env, END + 1);

    fx.client.withdraw(&id, &bob);
    // The prize is gone from custody, so a second claim fails.
    assert_eq!(
        fx.client.try_withdraw(&id, &bob),
        Err(Ok(ContractError::PrizeNotHeld))
    );
}

#[test]
fn loser_refund_is_one_shot() {
    let env = Env::default();
    let fx = setup(&env);
    let id = make_auction(&fx, 1, AuctionOpts::default());
    let alice = funded_bidder(&fx, 1_000);
    let bob = funded_bidder(&fx, 1_000);
    set_time(&env, START);
    fx.client.place_bid(&id, &alice, &100);
    fx.client.place_bid(&id, &bob, &160);
    set_time(&env, END + 1);

    fx.client.withdraw(&id, &alice);
    assert_eq!(
        fx.client.try_withdraw(&id, &alice),
        Err(Ok(ContractError::NothingToWithdraw))
    );
}

// Cancellation overrides reserve satisfaction: even the standing winner
// reclaims escrow and the prize stays put.
#[test]
fn cancellation_refunds_even_the_winner() {
    let env = Env::default();
    let fx = setup(&env);
    let id = make_auction(&fx, 1, AuctionOpts::default());
    let bob = funded_bidder(&fx, 1_000);
    set_time(&env, START);
    fx.client.place_bid(&id, &bob, &200);

    fx.client.cancel_auction(&fx.owner, &id);

    // No need to wait for end_time once cancelled.
    fx.client.withdraw(&id, &bob);
    assert_eq!(fx.token.balance(&bob), 1_000);
    assert_eq!(fx.prize.owner_of(&auction_id(&env, 1)), Some(fx.house.clone()));

    assert_eq!(
        fx.client.try_withdraw(&id, &fx.owner),
        Err(Ok(ContractError::NothingToWithdraw))
    );
}

#[test]
fn zero_reserve_settles_on_any_bid() {
    let env = Env::default();
    let fx = setup(&env);
    let id = auction_id(&env, 1);
    let mut params = crate::testutils::auction_params(&fx, 1);
    params.reserve_price = 0;
    fx.client.create_auction(&fx.owner, &id, &params);
    let bob = funded_bidder(&fx, 1_000);
    set_time(&env, START);
    fx.client.place_bid(&id, &bob, &100);
    set_time(&env, END + 1);

    fx.client.withdraw(&id, &fx.owner);
    assert_eq!(fx.token.balance(&fx.owner), 100);
    fx.client.withdraw(&id, &bob);
    assert_eq!(fx.prize.owner_of(&auction_id(&env, 1)), Some(bob));
}

#[test]
fn unbid_auction_has_nothing_to_settle() {
    let env = Env::default();
    let fx = setup(&env);
    let id = make_auction(&fx, 1, AuctionOpts::default());
    set_time(&env, END + 1);

    assert_eq!(
        fx.client.try_withdraw(&id, &fx.owner),
        Err(Ok(ContractError::NothingToWithdraw))
    );
}

#[test]
fn entry_fees_refund_after_conclusion() {
    let env = Env::default();
    let fx = setup(&env);
    let id = make_auction(
        &fx,
        1,
        AuctionOpts {
            entry_fee: 25,
            ..AuctionOpts::default()
        },
    );
    let alice = funded_bidder(&fx, 1_000);
    let bob = funded_bidder(&fx, 1_000);
    fx.client.pay_entry_fee(&id, &alice);

    assert_eq!(
        fx.client.try_withdraw_entry_fee(&id, &alice),
        Err(Ok(ContractError::AuctionStillActive))
    );
    // Never paid, nothing to reclaim.
    set_time(&env, END + 1);
    assert_eq!(
        fx.client.try_withdraw_entry_fee(&id, &bob),
        Err(Ok(ContractError::NothingToWithdraw))
    );

    fx.client.withdraw_entry_fee(&id, &alice);
    assert_eq!(fx.token.balance(&alice), 1_000);
    assert!(fx.client.entry_fee_record(&id, &alice).withdrawn);
    assert_eq!(
        fx.client.try_withdraw_entry_fee(&id, &alice),
        Err(Ok(ContractError::AlreadyWithdrawn))
    );
}

// The refund paths never move the prize, so without reclamation a failed
// sale would leave the token stuck in custody forever.
#[test]
fn owner_reclaims_prize_after_cancellation() {
    let env = Env::default();
    let fx = setup(&env);
    let id = make_auction(&fx, 1, AuctionOpts::default());
    let bob = funded_bidder(&fx, 1_000);
    set_time(&env, START);
    fx.client.place_bid(&id, &bob, &200);
    fx.client.cancel_auction(&fx.owner, &id);
    fx.client.withdraw(&id, &bob);
    assert_eq!(fx.prize.owner_of(&auction_id(&env, 1)), Some(fx.house.clone()));

    fx.client.reclaim_prize(&fx.owner, &id);
    assert_eq!(fx.prize.owner_of(&auction_id(&env, 1)), Some(fx.owner.clone()));

    // Custody gone, so reclaiming twice fails.
    assert_eq!(
        fx.client.try_reclaim_prize(&fx.owner, &id),
        Err(Ok(ContractError::PrizeNotHeld))
    );
}

#[test]
fn owner_reclaims_prize_when_reserve_unmet() {
    let env = Env::default();
    let fx = setup(&env);
    let id = make_auction(&fx, 1, AuctionOpts::default());
    let bob = funded_bidder(&fx, 1_000);
    set_time(&env, START);
    fx.client.place_bid(&id, &bob, &110);
    set_time(&env, END + 1);

    fx.client.reclaim_prize(&fx.owner, &id);
    assert_eq!(fx.prize.owner_of(&auction_id(&env, 1)), Some(fx.owner.clone()));
}

#[test]
fn reclaim_only_for_unsold_concluded_auctions() {
    let env = Env::default();
    let fx = setup(&env);
    let id = make_auction(&fx, 1, AuctionOpts::default());
    let bob = funded_bidder(&fx, 1_000);
    set_time(&env, START);
    fx.client.place_bid(&id, &bob, &160);

    assert_eq!(
        fx.client.try_reclaim_prize(&fx.owner, &id),
        Err(Ok(ContractError::AuctionStillActive))
    );
    assert_eq!(
        fx.client.try_reclaim_prize(&bob, &id),
        Err(Ok(ContractError::Unauthorized))
    );

    // Reserve met: the prize is the winner's, not the owner's.
    set_time(&env, END + 1);
    assert_eq!(
        fx.client.try_reclaim_prize(&fx.owner, &id),
        Err(Ok(ContractError::NothingToWithdraw))
    );
    fx.client.withdraw(&id, &bob);
    assert_eq!(fx.prize.owner_of(&auction_id(&env, 1)), Some(bob));
}

#[test]
fn entry_fees_refund_after_cancellation() {
    let env = Env::default();
    let fx = setup(&env);
    let id = make_auction(
        &fx,
        1,
        AuctionOpts {
            entry_fee: 25,
            ..AuctionOpts::default()
        },
    );
    let alice = funded_bidder(&fx, 1_000);
    fx.client.pay_entry_fee(&id, &alice);
    fx.client.cancel_auction(&fx.owner, &id);

    fx.client.withdraw_entry_fee(&id, &alice);
    assert_eq!(fx.token.balance(&alice), 1_000);

    // Fees cannot be paid into a cancelled auction.
    let bob = funded_bidder(&fx, 1_000);
    assert_eq!(
        fx.client.try_pay_entry_fee(&id, &bob),
        Err(Ok(ContractError::AuctionCancelled))
    );
}
