/// Events module for the Giveaway Collect Module program
/// Contains all event structures that are emitted by the program instructions
/// for off-chain tracking and monitoring.
use anchor_lang::prelude::*;

/// Emitted when the module state is created
#[event]
pub struct ModuleInitialized {
    pub admin: Pubkey,
    pub hub: Pubkey,
    pub module_state: Pubkey,
}

/// Emitted when the host platform authority is rotated
#[event]
pub struct HubUpdated {
    pub admin: Pubkey,
    pub previous_hub: Pubkey,
    pub new_hub: Pubkey,
}

/// Emitted when admin privileges are transferred
#[event]
pub struct AdminTransferred {
    pub previous_admin: Pubkey,
    pub new_admin: Pubkey,
}

/// Emitted when lamports are deposited into the module balance
#[event]
pub struct EscrowFunded {
    pub funder: Pubkey,
    pub amount: u64,
    pub available: u64,
}

/// Emitted when the admin withdraws unearmarked lamports
#[event]
pub struct SurplusWithdrawn {
    pub admin: Pubkey,
    pub amount: u64,
    pub remaining_surplus: u64,
}

/// Emitted when a publication configures a giveaway
#[event]
pub struct GiveawayInitialized {
    pub creator_id: u64,
    pub publication_id: u64,
    pub prize_amount: u64,
    pub collect_threshold: u32,
    /// Giveaways configured so far, this one included
    pub giveaway_count: u64,
}

/// Emitted when a new distinct collector joins a giveaway
#[event]
pub struct CollectorRegistered {
    pub creator_id: u64,
    pub publication_id: u64,
    pub collector: Pubkey,
    pub collector_count: u32,
}

/// Emitted when the collect threshold is reached and a draw is requested
#[event]
pub struct RandomnessRequested {
    pub request_id: Pubkey,
    pub hub: Pubkey,
    pub creator_id: u64,
    pub publication_id: u64,
}

/// Emitted when the oracle value is consumed and a winner selected
#[event]
pub struct RandomnessReceived {
    pub request_id: Pubkey,
    pub winner: Pubkey,
    pub random_value: u64,
    pub winner_index: u32,
}

/// Emitted when the prize lands with the winner
#[event]
pub struct PrizePaid {
    pub creator_id: u64,
    pub publication_id: u64,
    pub winner: Pubkey,
    pub amount: u64,
}
