use anchor_lang::prelude::*;

use crate::{
    constants::GIVEAWAY,
    contexts::*,
    events::*,
    helpers::*,
    randomness::SwitchboardGateway,
    states::{CollectOutcome, Giveaway, PublicationData},
};

/// ========================================
/// Host Platform Hooks
/// ========================================

/// Configure a giveaway when a publication is created
///
/// Called by the host platform with the publication's collect module init data,
/// `abi.encode(uint256 prizeAmount, uint256 collectThreshold)`. The record is
/// created here, and any existing record fails with `AlreadyInitialized`. The
/// prize is reserved against the module balance immediately, so every configured
/// giveaway can be paid even if others finish first.
///
/// Args:
/// - ctx: Context containing module_state, the giveaway PDA and the hub signer
/// - creator_id: Profile that owns the publication
/// - publication_id: Publication within the profile
/// - init_data: ABI-encoded prize amount and collect threshold
///
/// Returns: Result indicating success or failure
pub fn initialize_publication_collect_module(
    ctx: Context<InitializePublication>,
    creator_id: u64,
    publication_id: u64,
    init_data: Vec<u8>,
) -> Result<()> {
    let giveaway_info = ctx.accounts.giveaway.to_account_info();
    ensure_unconfigured(&giveaway_info)?;

    let (prize_amount, collect_threshold) = decode_init_data(&init_data)?;

    let bump = ctx.bumps.giveaway;
    let mut giveaway = Giveaway::default();
    giveaway.configure(
        creator_id,
        publication_id,
        prize_amount,
        collect_threshold,
        bump,
    )?;

    // ============ RECORD CREATION ============
    let payer_info = ctx.accounts.payer.to_account_info();
    let system_program_info = ctx.accounts.system_program.to_account_info();
    let creator_seed = creator_id.to_le_bytes();
    let publication_seed = publication_id.to_le_bytes();
    let bump_seed = [bump];
    let signer_seeds: &[&[u8]] = &[GIVEAWAY, &creator_seed, &publication_seed, &bump_seed];
    create_giveaway(&giveaway_info, &payer_info, &system_program_info, signer_seeds)?;
    store_giveaway(&giveaway, &giveaway_info, &payer_info, &system_program_info)?;

    // ============ ESCROW RESERVATION ============
    let available = available_balance(&ctx.accounts.module_state.to_account_info())?;
    let module_state = &mut ctx.accounts.module_state;
    module_state.reserve_escrow(prize_amount, available)?;
    let giveaway_count = module_state.record_giveaway()?;

    msg!(
        "Giveaway {}/{}: prize {} lamports after {} collects, {} of {} available escrowed",
        creator_id,
        publication_id,
        prize_amount,
        collect_threshold,
        module_state.escrowed,
        available
    );

    emit!(GiveawayInitialized {
        creator_id,
        publication_id,
        prize_amount,
        collect_threshold,
        giveaway_count,
    });
    Ok(())
}

/// Record a collect against a publication's giveaway
///
/// Distinct collectors are appended in order. The collect that brings the count
/// to exactly the threshold must carry a committed Switchboard randomness
/// account, which becomes the pending draw request. Repeat collects by the same
/// collector are accepted by the host but not counted here.
///
/// Args:
/// - ctx: Context containing module_state, the giveaway, hub and collector
/// - creator_id: Profile that owns the publication
/// - publication_id: Publication within the profile
///
/// Returns: Result indicating success or failure
pub fn process_collect(
    ctx: Context<ProcessCollect>,
    creator_id: u64,
    publication_id: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let giveaway_info = ctx.accounts.giveaway.to_account_info();
    let mut giveaway = load_giveaway(&giveaway_info)?;

    let collector = ctx.accounts.collector.key();
    let randomness_info = ctx
        .accounts
        .randomness_account_data
        .as_ref()
        .map(|account| account.to_account_info());
    let mut gateway = SwitchboardGateway::new(randomness_info.as_ref(), clock.slot);

    let collector_count = match giveaway.on_collect(collector, &mut gateway)? {
        CollectOutcome::Duplicate => {
            msg!(
                "Collector {} already counted for {}/{}",
                collector,
                creator_id,
                publication_id
            );
            return Ok(());
        }
        CollectOutcome::Registered { collector_count } => collector_count,
        CollectOutcome::RandomnessRequested {
            request_id,
            collector_count,
        } => {
            msg!(
                "Threshold of {} reached for {}/{}, waiting on {}",
                giveaway.collect_threshold,
                creator_id,
                publication_id,
                request_id
            );
            emit!(RandomnessRequested {
                request_id,
                hub: ctx.accounts.hub.key(),
                creator_id,
                publication_id,
            });
            collector_count
        }
    };

    store_giveaway(
        &giveaway,
        &giveaway_info,
        &ctx.accounts.collector.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
    )?;

    emit!(CollectorRegistered {
        creator_id,
        publication_id,
        collector,
        collector_count,
    });
    Ok(())
}

/// ========================================
/// Queries
/// ========================================

/// Read a publication's giveaway in any status
///
/// Returned through Anchor return data; the instruction changes nothing.
///
/// Args:
/// - ctx: Context containing the giveaway PDA
///
/// Returns: Snapshot of prize, threshold, status and winner
pub fn get_publication_data(ctx: Context<GetPublicationData>) -> Result<PublicationData> {
    Ok(PublicationData::from(&*ctx.accounts.giveaway))
}
