/// Error definitions for the Giveaway Collect Module program
///
/// Errors are grouped by the operation that raises them. Each group has its own
/// code range so clients can tell a bad configuration from a rejected callback.
use anchor_lang::prelude::*;

/// Module administration, access control and arithmetic
#[error_code]
pub enum ModuleError {
    #[msg("Signer is not the module admin.")]
    Unauthorized,
    #[msg("Signer is not the registered host platform.")]
    UnauthorizedHub,
    #[msg("Amount must be greater than zero.")]
    InvalidAmount,
    #[msg("Withdrawal would dip into escrowed prize funds.")]
    InsufficientSurplus,
    #[msg("Arithmetic overflow")]
    Overflow,
}

/// Rejected publication initialization. No record is created.
#[error_code(offset = 6100)]
pub enum ConfigError {
    #[msg("Collect threshold must be greater than zero.")]
    InvalidThreshold,
    #[msg("Prize amount must be greater than zero.")]
    InvalidPrize,
    #[msg("Module balance cannot cover this prize on top of outstanding prizes.")]
    InsufficientEscrow,
    #[msg("This publication already has a giveaway configured.")]
    AlreadyInitialized,
    #[msg("Init data must be exactly two ABI-encoded uint256 values in range.")]
    InvalidInitData,
}

/// Rejected collect. The collector registry is left untouched.
#[error_code(offset = 6200)]
pub enum CollectError {
    #[msg("No giveaway is configured for this publication.")]
    UnknownPublication,
    #[msg("The giveaway has already been drawn.")]
    AlreadyFinalized,
    #[msg("The collect reaching the threshold must carry a randomness account.")]
    RandomnessAccountMissing,
    #[msg("The randomness account is invalid or owned by the wrong program.")]
    InvalidRandomnessAccount,
    #[msg("The randomness commit is too old or already revealed to be used for a new draw.")]
    RandomnessNotCurrent,
}

/// Rejected randomness callback. State is unchanged and nothing is paid.
#[error_code(offset = 6300)]
pub enum FulfillmentError {
    #[msg("The randomness account does not match any pending request.")]
    UnknownRequest,
    #[msg("The giveaway is not waiting for randomness.")]
    NotPending,
    #[msg("The randomness account is invalid or owned by the wrong program.")]
    InvalidRandomnessAccount,
    #[msg("Randomness has not been resolved by the oracle yet.")]
    RandomnessNotResolved,
    #[msg("The randomness account was re-committed after the request.")]
    StaleRandomness,
    #[msg("The selected winner index was out of bounds. This should not happen.")]
    IndexOutOfBounds,
}

/// Failed prize transfer. Aborts the whole fulfillment.
#[error_code(offset = 6400)]
pub enum PayoutError {
    #[msg("The prize transfer could not be completed.")]
    TransferFailed,
    #[msg("The recipient account is not the selected winner.")]
    RecipientMismatch,
}
