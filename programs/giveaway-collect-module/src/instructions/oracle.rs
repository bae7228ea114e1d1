use anchor_lang::prelude::*;

use crate::{
    contexts::*,
    events::*,
    helpers::{rent_floor, LamportPayout},
    randomness::revealed_value,
};

/// ========================================
/// Randomness Fulfillment
/// ========================================

/// Settle a giveaway draw with revealed oracle randomness
///
/// Permissionless: whoever submits the Switchboard reveal can crank the draw.
/// The value comes from the randomness account named by the pending request,
/// so the caller has no influence on the winner.
///
/// Process:
/// 1. Match the randomness account against the pending request
/// 2. Read the revealed value for the current slot
/// 3. Select `collectors[value % draw_population]`
/// 4. Pay the prize from the module balance to the winner account
/// 5. Close the giveaway and release its escrow
///
/// Args:
/// - ctx: Context containing module_state, the giveaway, randomness account and winner
/// - creator_id: Profile that owns the publication
/// - publication_id: Publication within the profile
///
/// Returns: Result indicating success or failure
pub fn fulfill_randomness(
    ctx: Context<FulfillRandomness>,
    creator_id: u64,
    publication_id: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let request_id = ctx.accounts.randomness_account_data.key();
    let giveaway = &mut ctx.accounts.giveaway;

    // ============ REQUEST VALIDATION ============
    giveaway.check_fulfillable(&request_id)?;

    // ============ RANDOMNESS EXTRACTION ============
    let random_value = revealed_value(
        &ctx.accounts.randomness_account_data,
        giveaway.request_seed_slot,
        clock.slot,
    )?;

    // ============ DRAW AND PAYOUT ============
    let escrow_info = ctx.accounts.module_state.to_account_info();
    let winner_info = ctx.accounts.winner.to_account_info();
    let mut payout = LamportPayout {
        escrow: &escrow_info,
        recipient: &winner_info,
        rent_floor: rent_floor(&escrow_info)?,
    };
    let draw = giveaway.on_randomness_fulfilled(request_id, random_value, &mut payout)?;

    ctx.accounts
        .module_state
        .release_escrow(giveaway.prize_amount)?;

    msg!(
        "Draw for {}/{}: value {} picks collector {} of {}, {}",
        creator_id,
        publication_id,
        random_value,
        draw.winner_index,
        giveaway.draw_population,
        draw.winner
    );

    emit!(RandomnessReceived {
        request_id,
        winner: draw.winner,
        random_value,
        winner_index: draw.winner_index,
    });
    emit!(PrizePaid {
        creator_id,
        publication_id,
        winner: draw.winner,
        amount: giveaway.prize_amount,
    });
    Ok(())
}
