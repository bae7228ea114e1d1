use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::{contexts::*, errors::ModuleError, events::*, helpers::available_balance};

/// ========================================
/// Admin Instructions
/// ========================================

/// Initialize the collect module
///
/// Creates the module state with the caller as admin and `hub` as the host
/// platform authority allowed to call the publication hooks. The module state
/// account also holds the lamports that fund every prize.
///
/// Args:
/// - ctx: Context containing module_state PDA and admin accounts
/// - hub: Host platform authority
///
/// Returns: Result indicating success or failure
pub fn initialize_module(ctx: Context<InitializeModule>, hub: Pubkey) -> Result<()> {
    let module_state = &mut ctx.accounts.module_state;

    module_state.admin = ctx.accounts.admin.key();
    module_state.hub = hub;
    module_state.escrowed = 0;
    module_state.giveaway_count = 0;
    module_state.bump = ctx.bumps.module_state;

    emit!(ModuleInitialized {
        admin: ctx.accounts.admin.key(),
        hub,
        module_state: module_state.key(),
    });
    Ok(())
}

/// Point the module at a different host platform authority
///
/// Args:
/// - ctx: Context containing module_state to modify
/// - new_hub: Public key of the new host platform authority
///
/// Returns: Result indicating success or failure
pub fn set_hub(ctx: Context<AdminAction>, new_hub: Pubkey) -> Result<()> {
    let previous_hub = ctx.accounts.module_state.hub;
    ctx.accounts.module_state.hub = new_hub;

    emit!(HubUpdated {
        admin: ctx.accounts.admin.key(),
        previous_hub,
        new_hub,
    });
    Ok(())
}

/// Transfer admin privileges to a new account
///
/// Args:
/// - ctx: Context containing module_state to modify
/// - new_admin: Public key of the new admin
///
/// Returns: Result indicating success or failure
pub fn transfer_admin(ctx: Context<AdminAction>, new_admin: Pubkey) -> Result<()> {
    let previous_admin = ctx.accounts.module_state.admin;
    ctx.accounts.module_state.admin = new_admin;

    emit!(AdminTransferred {
        previous_admin,
        new_admin,
    });
    Ok(())
}

/// Deposit lamports into the module balance
///
/// Funds are not tied to a giveaway until a publication reserves them at
/// initialization.
///
/// Args:
/// - ctx: Context containing module_state and the funder
/// - amount: Lamports to deposit
///
/// Returns: Result indicating success or failure
pub fn fund_escrow(ctx: Context<FundEscrow>, amount: u64) -> Result<()> {
    require!(amount > 0, ModuleError::InvalidAmount);

    let cpi_context = CpiContext::new(
        ctx.accounts.system_program.to_account_info(),
        system_program::Transfer {
            from: ctx.accounts.funder.to_account_info(),
            to: ctx.accounts.module_state.to_account_info(),
        },
    );
    system_program::transfer(cpi_context, amount)?;

    let available = available_balance(&ctx.accounts.module_state.to_account_info())?;
    msg!(
        "Escrow funded with {} lamports, {} available, {} escrowed",
        amount,
        available,
        ctx.accounts.module_state.escrowed
    );

    emit!(EscrowFunded {
        funder: ctx.accounts.funder.key(),
        amount,
        available,
    });
    Ok(())
}

/// Withdraw lamports that no giveaway has reserved
///
/// Escrowed prize funds can never be withdrawn, so every configured giveaway
/// stays payable.
///
/// Args:
/// - ctx: Context containing module_state and the admin receiving the lamports
/// - amount: Lamports to withdraw
///
/// Returns: Result indicating success or failure
pub fn withdraw_surplus(ctx: Context<AdminAction>, amount: u64) -> Result<()> {
    require!(amount > 0, ModuleError::InvalidAmount);

    let module_info = ctx.accounts.module_state.to_account_info();
    let admin_info = ctx.accounts.admin.to_account_info();

    let surplus = ctx
        .accounts
        .module_state
        .surplus(available_balance(&module_info)?);
    require_gte!(surplus, amount, ModuleError::InsufficientSurplus);

    let module_after = module_info
        .lamports()
        .checked_sub(amount)
        .ok_or(ModuleError::Overflow)?;
    let admin_after = admin_info
        .lamports()
        .checked_add(amount)
        .ok_or(ModuleError::Overflow)?;
    **module_info.try_borrow_mut_lamports()? = module_after;
    **admin_info.try_borrow_mut_lamports()? = admin_after;

    emit!(SurplusWithdrawn {
        admin: ctx.accounts.admin.key(),
        amount,
        remaining_surplus: surplus - amount,
    });
    Ok(())
}
