//! Giveaway Collect Module Program
//!
//! A collect module for a social-graph host platform that turns a publication into
//! a funded giveaway:
//! - The host configures a prize and a collect threshold when the publication is created
//! - Distinct collectors are recorded on every collect
//! - The collect reaching the threshold requests Switchboard randomness
//! - The reveal selects one collector and pays the escrowed prize exactly once
//!
//! Prizes are native lamports held by the module state account. Every configured
//! prize is reserved up front, so a draw never lacks funds.

#![allow(deprecated)]
#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod helpers;
pub mod instructions;
pub mod randomness;
pub mod states;


pub use contexts::*;
pub use states::PublicationData;

declare_id!("5GvwyQhzPRo8vAmZ2X4Tkn3pKzVDB1rQSW8sFWYpF7Ju");

#[program]
pub mod giveaway_collect_module {
    use super::*;

    // ========================================
    // Admin Instructions
    // ========================================

    /// Create the module state with `hub` as the host platform authority
    pub fn initialize_module(ctx: Context<InitializeModule>, hub: Pubkey) -> Result<()> {
        instructions::admin::initialize_module(ctx, hub)
    }

    /// Rotate the host platform authority
    pub fn set_hub(ctx: Context<AdminAction>, new_hub: Pubkey) -> Result<()> {
        instructions::admin::set_hub(ctx, new_hub)
    }

    /// Transfer admin privileges
    pub fn transfer_admin(ctx: Context<AdminAction>, new_admin: Pubkey) -> Result<()> {
        instructions::admin::transfer_admin(ctx, new_admin)
    }

    /// Deposit lamports that future prizes can be reserved against
    pub fn fund_escrow(ctx: Context<FundEscrow>, amount: u64) -> Result<()> {
        instructions::admin::fund_escrow(ctx, amount)
    }

    /// Withdraw lamports not reserved by any giveaway
    pub fn withdraw_surplus(ctx: Context<AdminAction>, amount: u64) -> Result<()> {
        instructions::admin::withdraw_surplus(ctx, amount)
    }

    // ========================================
    // Host Platform Hooks
    // ========================================

    /// Publication-creation hook: configure prize and threshold from ABI init data
    pub fn initialize_publication_collect_module(
        ctx: Context<InitializePublication>,
        creator_id: u64,
        publication_id: u64,
        init_data: Vec<u8>,
    ) -> Result<()> {
        instructions::publication::initialize_publication_collect_module(
            ctx,
            creator_id,
            publication_id,
            init_data,
        )
    }

    /// Collect hook: register the collector, request randomness at the threshold
    pub fn process_collect(
        ctx: Context<ProcessCollect>,
        creator_id: u64,
        publication_id: u64,
    ) -> Result<()> {
        instructions::publication::process_collect(ctx, creator_id, publication_id)
    }

    // ========================================
    // Oracle Callback
    // ========================================

    /// Consume the revealed randomness, pay the winner and close the giveaway
    pub fn fulfill_randomness(
        ctx: Context<FulfillRandomness>,
        creator_id: u64,
        publication_id: u64,
    ) -> Result<()> {
        instructions::oracle::fulfill_randomness(ctx, creator_id, publication_id)
    }

    // ========================================
    // Queries
    // ========================================

    /// Snapshot of a publication's giveaway
    pub fn get_publication_data(
        ctx: Context<GetPublicationData>,
        _creator_id: u64,
        _publication_id: u64,
    ) -> Result<PublicationData> {
        instructions::publication::get_publication_data(ctx)
    }
}
