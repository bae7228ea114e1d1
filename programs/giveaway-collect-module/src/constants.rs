use anchor_lang::prelude::*;
/// Constants module for the Giveaway Collect Module program
///
/// Contains all program-wide constants and configuration values.

/// Maximum slot difference allowed between a randomness commit and the
/// collect that requests it
#[constant]
pub const MAX_SLOT_DIFFERENCE: u64 = 20;

/// Width of one ABI-encoded `uint256` word in publication init data
#[constant]
pub const INIT_DATA_WORD_LEN: usize = 32;

/// Init data is exactly `(uint256 prizeAmount, uint256 collectThreshold)`
#[constant]
pub const INIT_DATA_LEN: usize = 2 * INIT_DATA_WORD_LEN;

/// Seeds for PDA derivation

/// Seed for the module state PDA (admin, hub and escrow ledger)
#[constant]
pub const MODULE_STATE: &[u8] = b"module_state";

/// Seed for per-publication giveaway PDAs
#[constant]
pub const GIVEAWAY: &[u8] = b"giveaway";
