use anchor_lang::prelude::*;
use switchboard_on_demand::get_switchboard_on_demand_program_id;

use crate::{constants::*, errors::*, states::*};

/// ========================================
/// Account Structs
/// ========================================

/// Accounts required for creating the module state
#[derive(Accounts)]
pub struct InitializeModule<'info> {
    /// The module state account (PDA), also the escrow for every prize
    #[account(
        init,
        payer = admin,
        space = 8 + ModuleState::INIT_SPACE,
        seeds = [MODULE_STATE],
        bump
    )]
    pub module_state: Account<'info, ModuleState>,
    /// The admin account that will own the module
    #[account(mut)]
    pub admin: Signer<'info>,
    /// System program for account creation
    pub system_program: Program<'info, System>,
}

/// Accounts required for admin actions (hub rotation, admin transfer, surplus withdrawal)
#[derive(Accounts)]
pub struct AdminAction<'info> {
    /// The module state to modify
    #[account(
        mut,
        has_one = admin @ ModuleError::Unauthorized,
        seeds = [MODULE_STATE],
        bump = module_state.bump,
    )]
    pub module_state: Account<'info, ModuleState>,

    /// Admin account (must match module_state.admin), receives withdrawn surplus
    #[account(mut)]
    pub admin: Signer<'info>,
}

/// Accounts required for depositing prize funds
#[derive(Accounts)]
pub struct FundEscrow<'info> {
    /// The module state receiving the lamports
    #[account(
        mut,
        seeds = [MODULE_STATE],
        bump = module_state.bump,
    )]
    pub module_state: Account<'info, ModuleState>,

    /// Anyone may fund prizes
    #[account(mut)]
    pub funder: Signer<'info>,

    /// System program for SOL transfers
    pub system_program: Program<'info, System>,
}

/// Accounts required for the publication-creation hook
#[derive(Accounts)]
#[instruction(creator_id: u64, publication_id: u64)]
pub struct InitializePublication<'info> {
    /// The module state holding the escrow ledger
    #[account(
        mut,
        has_one = hub @ ModuleError::UnauthorizedHub,
        seeds = [MODULE_STATE],
        bump = module_state.bump,
    )]
    pub module_state: Account<'info, ModuleState>,

    /// The giveaway record for this publication (PDA)
    /// CHECK: Seeds are verified here; the handler creates the record, or fails
    /// with `AlreadyInitialized` whatever size the existing record has grown to
    #[account(
        mut,
        seeds = [GIVEAWAY, creator_id.to_le_bytes().as_ref(), publication_id.to_le_bytes().as_ref()],
        bump
    )]
    pub giveaway: UncheckedAccount<'info>,

    /// Host platform authority (must match module_state.hub)
    pub hub: Signer<'info>,

    /// Pays rent for the giveaway record
    #[account(mut)]
    pub payer: Signer<'info>,

    /// System program for account creation
    pub system_program: Program<'info, System>,
}

/// Accounts required for the collect hook
#[derive(Accounts)]
#[instruction(creator_id: u64, publication_id: u64)]
pub struct ProcessCollect<'info> {
    /// The module state
    #[account(
        has_one = hub @ ModuleError::UnauthorizedHub,
        seeds = [MODULE_STATE],
        bump = module_state.bump,
    )]
    pub module_state: Account<'info, ModuleState>,

    /// The giveaway record for this publication
    /// CHECK: Seeds are verified here; ownership and contents are checked by
    /// `load_giveaway` so a missing record fails as `UnknownPublication`
    #[account(
        mut,
        seeds = [GIVEAWAY, creator_id.to_le_bytes().as_ref(), publication_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub giveaway: UncheckedAccount<'info>,

    /// Host platform authority (must match module_state.hub)
    pub hub: Signer<'info>,

    /// The collector, pays for the record growing by one key
    #[account(mut)]
    pub collector: Signer<'info>,

    /// Switchboard randomness account, required on the collect that reaches the threshold
    /// CHECK: Owner and commit slot are validated by `SwitchboardGateway`
    pub randomness_account_data: Option<UncheckedAccount<'info>>,

    /// System program for rent top-ups
    pub system_program: Program<'info, System>,
}

/// Accounts required for settling a giveaway draw
#[derive(Accounts)]
#[instruction(creator_id: u64, publication_id: u64)]
pub struct FulfillRandomness<'info> {
    /// The module state paying the prize
    #[account(
        mut,
        seeds = [MODULE_STATE],
        bump = module_state.bump,
    )]
    pub module_state: Account<'info, ModuleState>,

    /// The giveaway record waiting on randomness
    #[account(
        mut,
        seeds = [GIVEAWAY, creator_id.to_le_bytes().as_ref(), publication_id.to_le_bytes().as_ref()],
        bump = giveaway.bump,
    )]
    pub giveaway: Account<'info, Giveaway>,

    /// Switchboard randomness account named by the pending request
    /// CHECK: Owned by Switchboard; address is matched against the pending request in the handler
    #[account(
        owner = get_switchboard_on_demand_program_id() @ FulfillmentError::InvalidRandomnessAccount
    )]
    pub randomness_account_data: AccountInfo<'info>,

    /// The drawn collector receiving the prize
    /// CHECK: Must equal the drawn winner, checked by `LamportPayout`
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,

    /// Whoever submits the reveal
    pub cranker: Signer<'info>,
}

/// Accounts required for reading a giveaway
#[derive(Accounts)]
#[instruction(creator_id: u64, publication_id: u64)]
pub struct GetPublicationData<'info> {
    /// The giveaway record for this publication
    #[account(
        seeds = [GIVEAWAY, creator_id.to_le_bytes().as_ref(), publication_id.to_le_bytes().as_ref()],
        bump = giveaway.bump,
    )]
    pub giveaway: Account<'info, Giveaway>,
}
