/// States module for the Giveaway Collect Module program
///
/// Contains the account structures used to store program state on-chain and the
/// giveaway lifecycle that mutates them. Lifecycle methods never touch the runtime
/// directly: randomness and prize transfers go through the `RandomnessGateway` and
/// `PrizePayout` seams so the same code runs in instructions and unit tests.
use anchor_lang::prelude::*;

use crate::{
    errors::{CollectError, ConfigError, FulfillmentError, ModuleError},
    helpers::PrizePayout,
    randomness::RandomnessGateway,
};

/// Global module state
///
/// Holds the admin and host platform authorities and the escrow ledger. The
/// account's own lamports are the module balance that funds every prize.
#[account]
#[derive(InitSpace, Default)]
pub struct ModuleState {
    /// Public key allowed to run admin instructions
    pub admin: Pubkey,
    /// Host platform authority allowed to call the publication hooks
    pub hub: Pubkey,
    /// Sum of prize amounts of every giveaway not yet paid out
    pub escrowed: u64,
    /// Number of giveaways ever configured
    pub giveaway_count: u64,
    /// PDA bump seed for this account
    pub bump: u8,
}

impl ModuleState {
    /// Earmarks `prize` against `available` module balance.
    ///
    /// `available` must cover the new prize plus every prize already escrowed.
    pub fn reserve_escrow(&mut self, prize: u64, available: u64) -> Result<()> {
        let required = self
            .escrowed
            .checked_add(prize)
            .ok_or(ModuleError::Overflow)?;
        require_gte!(available, required, ConfigError::InsufficientEscrow);
        self.escrowed = required;
        Ok(())
    }

    /// Releases a prize from the ledger once it has been paid.
    pub fn release_escrow(&mut self, prize: u64) -> Result<()> {
        self.escrowed = self
            .escrowed
            .checked_sub(prize)
            .ok_or(ModuleError::Overflow)?;
        Ok(())
    }

    /// Balance not earmarked for any prize
    pub fn surplus(&self, available: u64) -> u64 {
        available.saturating_sub(self.escrowed)
    }

    /// Counts a newly configured giveaway and returns the new total.
    pub fn record_giveaway(&mut self) -> Result<u64> {
        self.giveaway_count = self
            .giveaway_count
            .checked_add(1)
            .ok_or(ModuleError::Overflow)?;
        Ok(self.giveaway_count)
    }
}

/// Giveaway lifecycle. Only ever moves forward.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum GiveawayStatus {
    /// Accepting collectors until the threshold is reached
    #[default]
    Collecting,
    /// Threshold reached, waiting for the oracle
    RandomnessPending,
    /// Winner drawn and paid
    Done,
}

/// Per-publication giveaway record
///
/// One account per `(creator_id, publication_id)`. Never closed, so completed
/// giveaways remain queryable. The collector list grows by reallocation.
#[account]
#[derive(Default, Debug)]
pub struct Giveaway {
    /// PDA bump seed for this account
    pub bump: u8,
    /// Host profile that owns the publication
    pub creator_id: u64,
    /// Publication id within the creator's profile
    pub publication_id: u64,
    /// Lamports escrowed for the winner
    pub prize_amount: u64,
    /// Distinct collects required to trigger the draw
    pub collect_threshold: u32,
    /// Current lifecycle stage
    pub status: GiveawayStatus,
    /// Randomness account the draw is waiting on. Kept after the draw for audit.
    pub pending_request: Option<Pubkey>,
    /// Seed slot of the randomness account at request time
    pub request_seed_slot: u64,
    /// Collector count when randomness was requested. Later collectors are not drawn.
    pub draw_population: u32,
    /// Drawn collector, set together with `GiveawayStatus::Done`
    pub winner: Option<Pubkey>,
    /// Distinct collectors in the order they collected
    pub collectors: Vec<Pubkey>,
}

impl Giveaway {
    pub const BASE_SIZE: usize = 1 // bump
    + 8 // creator_id
    + 8 // publication_id
    + 8 // prize_amount
    + 4 // collect_threshold
    + 1 // status
    + (1 + 32) // pending_request
    + 8 // request_seed_slot
    + 4 // draw_population
    + (1 + 32) // winner
    + 4; // collectors vector prefix

    /// Account size, discriminator included, for a record holding `collectors` keys
    pub fn space(collectors: usize) -> usize {
        8 + Self::BASE_SIZE + collectors * 32
    }

    /// Prize amounts are always positive once configured
    pub fn is_configured(&self) -> bool {
        self.prize_amount > 0
    }

    /// Registry length. `register_collector` never lets it pass `u32::MAX`.
    pub fn collector_count(&self) -> u32 {
        registry_count(self.collectors.len()).unwrap_or(u32::MAX)
    }

    pub fn has_collected(&self, collector: &Pubkey) -> bool {
        self.collectors.contains(collector)
    }

    /// One-time setup of a freshly created record.
    pub fn configure(
        &mut self,
        creator_id: u64,
        publication_id: u64,
        prize_amount: u64,
        collect_threshold: u32,
        bump: u8,
    ) -> Result<()> {
        require!(!self.is_configured(), ConfigError::AlreadyInitialized);
        require!(collect_threshold > 0, ConfigError::InvalidThreshold);
        require!(prize_amount > 0, ConfigError::InvalidPrize);

        self.bump = bump;
        self.creator_id = creator_id;
        self.publication_id = publication_id;
        self.prize_amount = prize_amount;
        self.collect_threshold = collect_threshold;
        self.status = GiveawayStatus::Collecting;
        self.pending_request = None;
        self.request_seed_slot = 0;
        self.draw_population = 0;
        self.winner = None;
        self.collectors = Vec::new();
        Ok(())
    }

    /// Collector registry: appends `collector` unless already present.
    pub fn register_collector(&mut self, collector: Pubkey) -> Result<Registration> {
        if self.has_collected(&collector) {
            return Ok(Registration {
                accepted: false,
                current_count: self.collector_count(),
            });
        }
        let current_count = registry_count(self.collectors.len() + 1)?;
        self.collectors.push(collector);
        Ok(Registration {
            accepted: true,
            current_count,
        })
    }

    /// Handles one collect event.
    ///
    /// The collect that brings the distinct count to exactly the threshold while
    /// collecting requests randomness. The gateway is called before anything is
    /// recorded so a failed request leaves the registry as it was.
    pub fn on_collect<G: RandomnessGateway>(
        &mut self,
        collector: Pubkey,
        gateway: &mut G,
    ) -> Result<CollectOutcome> {
        require!(self.is_configured(), CollectError::UnknownPublication);
        require!(
            self.status != GiveawayStatus::Done,
            CollectError::AlreadyFinalized
        );

        if self.has_collected(&collector) {
            return Ok(CollectOutcome::Duplicate);
        }

        let crosses_threshold = self.status == GiveawayStatus::Collecting
            && self.collector_count() + 1 == self.collect_threshold;
        let request = if crosses_threshold {
            Some(gateway.request(self.creator_id, self.publication_id)?)
        } else {
            None
        };

        let registration = self.register_collector(collector)?;

        match request {
            Some(request) => {
                self.status = GiveawayStatus::RandomnessPending;
                self.pending_request = Some(request.request_id);
                self.request_seed_slot = request.seed_slot;
                self.draw_population = registration.current_count;
                Ok(CollectOutcome::RandomnessRequested {
                    request_id: request.request_id,
                    collector_count: registration.current_count,
                })
            }
            None => Ok(CollectOutcome::Registered {
                collector_count: registration.current_count,
            }),
        }
    }

    /// Rejects callbacks for requests this record never issued or already consumed.
    pub fn check_fulfillable(&self, request_id: &Pubkey) -> Result<()> {
        require!(
            self.pending_request == Some(*request_id),
            FulfillmentError::UnknownRequest
        );
        require!(
            self.status == GiveawayStatus::RandomnessPending,
            FulfillmentError::NotPending
        );
        Ok(())
    }

    /// Picks `collectors[random_value % draw_population]`.
    ///
    /// Plain modulo reduction, biased towards low indices when the population does
    /// not divide 2^64. Draws must stay equal to `random_value % population`.
    pub fn select_winner(&self, random_value: u64) -> Result<(u32, Pubkey)> {
        let population = self.draw_population as u64;
        require!(population > 0, FulfillmentError::IndexOutOfBounds);

        let winner_index = (random_value % population) as u32;
        let winner = self
            .collectors
            .get(winner_index as usize)
            .copied()
            .ok_or(FulfillmentError::IndexOutOfBounds)?;
        Ok((winner_index, winner))
    }

    /// Handles the oracle callback: draws, pays, then closes the giveaway.
    ///
    /// The record is only marked `Done` after the payout succeeded, so a failed
    /// transfer leaves it `RandomnessPending` with no winner.
    pub fn on_randomness_fulfilled<P: PrizePayout>(
        &mut self,
        request_id: Pubkey,
        random_value: u64,
        payout: &mut P,
    ) -> Result<Draw> {
        self.check_fulfillable(&request_id)?;
        let (winner_index, winner) = self.select_winner(random_value)?;

        payout.pay(winner, self.prize_amount)?;

        self.status = GiveawayStatus::Done;
        self.winner = Some(winner);
        Ok(Draw {
            winner,
            winner_index,
        })
    }
}

fn registry_count(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| error!(ModuleError::Overflow))
}

/// Result of a registry append
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registration {
    pub accepted: bool,
    pub current_count: u32,
}

/// What a collect did to the giveaway
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectOutcome {
    /// New collector recorded, no draw triggered
    Registered { collector_count: u32 },
    /// Collector was already registered; nothing changed
    Duplicate,
    /// New collector recorded and the draw requested
    RandomnessRequested {
        request_id: Pubkey,
        collector_count: u32,
    },
}

/// A completed draw
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Draw {
    pub winner: Pubkey,
    pub winner_index: u32,
}

/// Read-only snapshot returned by `get_publication_data`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PublicationData {
    pub prize_amount: u64,
    pub collect_threshold: u32,
    pub status: GiveawayStatus,
    pub winner: Option<Pubkey>,
    pub collector_count: u32,
    pub pending_request: Option<Pubkey>,
}

impl From<&Giveaway> for PublicationData {
    fn from(giveaway: &Giveaway) -> Self {
        Self {
            prize_amount: giveaway.prize_amount,
            collect_threshold: giveaway.collect_threshold,
            status: giveaway.status,
            winner: giveaway.winner,
            collector_count: giveaway.collector_count(),
            pending_request: giveaway.pending_request,
        }
    }
}
