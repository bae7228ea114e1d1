use crate::{
    constants::*,
    errors::{CollectError, ConfigError, PayoutError},
    states::Giveaway,
};

use anchor_lang::prelude::*;
use anchor_lang::system_program;

/// ========================================
/// Init Data Helper Functions
/// ========================================

/// Decodes publication init data into `(prize_amount, collect_threshold)`
///
/// The host platform passes `abi.encode(uint256 prizeAmount, uint256 collectThreshold)`:
/// two 32-byte big-endian words, nothing more. Values that do not fit the on-chain
/// field widths are rejected rather than truncated. Zero values decode fine and are
/// rejected by `Giveaway::configure`.
pub fn decode_init_data(init_data: &[u8]) -> Result<(u64, u32)> {
    require_eq!(init_data.len(), INIT_DATA_LEN, ConfigError::InvalidInitData);

    let (prize_word, threshold_word) = init_data.split_at(INIT_DATA_WORD_LEN);
    let prize_amount = abi_word_to_u64(prize_word)?;
    let collect_threshold =
        u32::try_from(abi_word_to_u64(threshold_word)?).map_err(|_| ConfigError::InvalidInitData)?;

    Ok((prize_amount, collect_threshold))
}

fn abi_word_to_u64(word: &[u8]) -> Result<u64> {
    let (high, low) = word.split_at(INIT_DATA_WORD_LEN - 8);
    require!(
        high.iter().all(|&b| b == 0),
        ConfigError::InvalidInitData
    );
    let low: [u8; 8] = low.try_into().map_err(|_| ConfigError::InvalidInitData)?;
    Ok(u64::from_be_bytes(low))
}

/// ========================================
/// Payout Helper Functions
/// ========================================

/// Moves prize funds out of the module balance
pub trait PrizePayout {
    /// Credits `amount` to `recipient` in full or fails without moving anything.
    fn pay(&mut self, recipient: Pubkey, amount: u64) -> Result<()>;
}

/// Pays lamports straight out of the program-owned module state account
///
/// The escrow account never drops below `rent_floor`, so a payout can not close
/// it. The recipient account must be the drawn winner and writable.
pub struct LamportPayout<'a, 'info> {
    pub escrow: &'a AccountInfo<'info>,
    pub recipient: &'a AccountInfo<'info>,
    pub rent_floor: u64,
}

impl PrizePayout for LamportPayout<'_, '_> {
    fn pay(&mut self, recipient: Pubkey, amount: u64) -> Result<()> {
        // ============ ACCOUNT MATCHING ============
        require_keys_eq!(
            *self.recipient.key,
            recipient,
            PayoutError::RecipientMismatch
        );
        require!(self.recipient.is_writable, PayoutError::TransferFailed);

        // ============ BALANCE VERIFICATION ============
        let escrow_after = self
            .escrow
            .lamports()
            .checked_sub(amount)
            .filter(|remaining| *remaining >= self.rent_floor)
            .ok_or(PayoutError::TransferFailed)?;
        let recipient_after = self
            .recipient
            .lamports()
            .checked_add(amount)
            .ok_or(PayoutError::TransferFailed)?;

        // ============ TRANSFER EXECUTION ============
        **self.escrow.try_borrow_mut_lamports()? = escrow_after;
        **self.recipient.try_borrow_mut_lamports()? = recipient_after;

        Ok(())
    }
}

/// Rent-exempt minimum for an account of its current size
pub fn rent_floor(account: &AccountInfo) -> Result<u64> {
    Ok(Rent::get()?.minimum_balance(account.data_len()))
}

/// Lamports held by the module state above its rent floor
pub fn available_balance(account: &AccountInfo) -> Result<u64> {
    Ok(account.lamports().saturating_sub(rent_floor(account)?))
}

/// ========================================
/// Giveaway Account Helper Functions
/// ========================================

/// Fails with `AlreadyInitialized` once the record exists
///
/// Records are only ever created configured, so any program-owned data at the
/// address counts, however many collectors it has grown by.
pub fn ensure_unconfigured(giveaway_account: &AccountInfo) -> Result<()> {
    require!(
        giveaway_account.owner != &crate::ID || giveaway_account.data_is_empty(),
        ConfigError::AlreadyInitialized
    );
    Ok(())
}

/// Creates an empty giveaway record at its PDA, owned by this program
///
/// Lamports already sitting at the address are kept and only topped up to the
/// rent-exempt minimum.
pub fn create_giveaway<'info>(
    giveaway_account: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    signer_seeds: &[&[u8]],
) -> Result<()> {
    let space = Giveaway::space(0);
    let required_lamports = Rent::get()?.minimum_balance(space);
    let current_lamports = giveaway_account.lamports();
    let signer = &[signer_seeds];

    if current_lamports == 0 {
        let cpi_context = CpiContext::new_with_signer(
            system_program.clone(),
            system_program::CreateAccount {
                from: payer.clone(),
                to: giveaway_account.clone(),
            },
            signer,
        );
        return system_program::create_account(
            cpi_context,
            required_lamports,
            space as u64,
            &crate::ID,
        );
    }

    let top_up = required_lamports.saturating_sub(current_lamports);
    if top_up > 0 {
        let cpi_context = CpiContext::new(
            system_program.clone(),
            system_program::Transfer {
                from: payer.clone(),
                to: giveaway_account.clone(),
            },
        );
        system_program::transfer(cpi_context, top_up)?;
    }

    let cpi_context = CpiContext::new_with_signer(
        system_program.clone(),
        system_program::Allocate {
            account_to_allocate: giveaway_account.clone(),
        },
        signer,
    );
    system_program::allocate(cpi_context, space as u64)?;

    let cpi_context = CpiContext::new_with_signer(
        system_program.clone(),
        system_program::Assign {
            account_to_assign: giveaway_account.clone(),
        },
        signer,
    );
    system_program::assign(cpi_context, &crate::ID)
}

/// Loads a giveaway record, reporting anything unconfigured as an unknown publication
pub fn load_giveaway(giveaway_account: &AccountInfo) -> Result<Giveaway> {
    require!(
        giveaway_account.owner == &crate::ID && !giveaway_account.data_is_empty(),
        CollectError::UnknownPublication
    );

    let data = giveaway_account.try_borrow_data()?;
    let giveaway = Giveaway::try_deserialize(&mut &data[..])
        .map_err(|_| CollectError::UnknownPublication)?;
    require!(giveaway.is_configured(), CollectError::UnknownPublication);

    Ok(giveaway)
}

/// Writes a giveaway record back, growing the account for new collectors
///
/// Extra rent for the larger account is paid by `payer`.
pub fn store_giveaway<'info>(
    giveaway: &Giveaway,
    giveaway_account: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
) -> Result<()> {
    let required_len = Giveaway::space(giveaway.collectors.len());

    if required_len > giveaway_account.data_len() {
        let required_lamports = Rent::get()?.minimum_balance(required_len);
        let top_up = required_lamports.saturating_sub(giveaway_account.lamports());
        if top_up > 0 {
            let cpi_context = CpiContext::new(
                system_program.clone(),
                system_program::Transfer {
                    from: payer.clone(),
                    to: giveaway_account.clone(),
                },
            );
            system_program::transfer(cpi_context, top_up)?;
        }
        giveaway_account.realloc(required_len, false)?;
    }

    let mut data = giveaway_account.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data;
    giveaway.try_serialize(&mut writer)?;

    Ok(())
}
