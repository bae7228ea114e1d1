/// Randomness gateway for giveaway draws
///
/// A draw is a two-step round trip through Switchboard On-Demand. The collect
/// that reaches the threshold carries a freshly committed randomness account;
/// its address becomes the request id. A later `fulfill_randomness` reads the
/// revealed value from the same account.
use anchor_lang::prelude::*;
use switchboard_on_demand::{
    accounts::RandomnessAccountData, get_switchboard_on_demand_program_id,
};

use crate::{
    constants::MAX_SLOT_DIFFERENCE,
    errors::{CollectError, FulfillmentError},
};

/// An issued randomness request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomnessRequest {
    /// Correlation id the fulfillment must present
    pub request_id: Pubkey,
    /// Oracle seed slot the reveal must still carry
    pub seed_slot: u64,
}

/// Source of verifiable randomness for the giveaway state machine
pub trait RandomnessGateway {
    /// Issues a request for the given publication. Called at most once per giveaway.
    fn request(&mut self, creator_id: u64, publication_id: u64) -> Result<RandomnessRequest>;
}

/// Gateway backed by a Switchboard randomness account passed to the collect
pub struct SwitchboardGateway<'a, 'info> {
    randomness_account: Option<&'a AccountInfo<'info>>,
    slot: u64,
}

impl<'a, 'info> SwitchboardGateway<'a, 'info> {
    pub fn new(randomness_account: Option<&'a AccountInfo<'info>>, slot: u64) -> Self {
        Self {
            randomness_account,
            slot,
        }
    }
}

impl RandomnessGateway for SwitchboardGateway<'_, '_> {
    fn request(&mut self, creator_id: u64, publication_id: u64) -> Result<RandomnessRequest> {
        let randomness_account = self
            .randomness_account
            .ok_or(CollectError::RandomnessAccountMissing)?;

        require_keys_eq!(
            *randomness_account.owner,
            get_switchboard_on_demand_program_id(),
            CollectError::InvalidRandomnessAccount
        );

        // The commit must be recent and not yet revealed
        let randomness_data = RandomnessAccountData::parse(randomness_account.data.borrow())
            .map_err(|_| CollectError::InvalidRandomnessAccount)?;
        require!(
            self.slot >= randomness_data.seed_slot
                && self.slot - randomness_data.seed_slot <= MAX_SLOT_DIFFERENCE,
            CollectError::RandomnessNotCurrent
        );
        require!(
            randomness_data.reveal_slot < randomness_data.seed_slot,
            CollectError::RandomnessNotCurrent
        );

        msg!(
            "Requesting randomness {} for publication {}/{} (seed slot {})",
            randomness_account.key,
            creator_id,
            publication_id,
            randomness_data.seed_slot
        );

        Ok(RandomnessRequest {
            request_id: *randomness_account.key,
            seed_slot: randomness_data.seed_slot,
        })
    }
}

/// Reads the revealed value of a request as a little-endian `u64`.
///
/// Fails while the oracle has not revealed for `slot`, and when the account was
/// re-committed since the request (its seed slot moved).
pub fn revealed_value(
    randomness_account: &AccountInfo,
    expected_seed_slot: u64,
    slot: u64,
) -> Result<u64> {
    let randomness_data = RandomnessAccountData::parse(randomness_account.data.borrow())
        .map_err(|_| FulfillmentError::InvalidRandomnessAccount)?;

    require_eq!(
        randomness_data.seed_slot,
        expected_seed_slot,
        FulfillmentError::StaleRandomness
    );

    let random_value_bytes = randomness_data
        .get_value(slot)
        .map_err(|_| FulfillmentError::RandomnessNotResolved)?;

    let random_value = u64::from_le_bytes(
        random_value_bytes[0..8]
            .try_into()
            .map_err(|_| FulfillmentError::RandomnessNotResolved)?,
    );
    Ok(random_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::{CollectOutcome, Giveaway, GiveawayStatus};
    use anchor_lang::error::Error;
    use std::mem::offset_of;

    const RANDOMNESS_DISCRIMINATOR: [u8; 8] = [10, 66, 229, 135, 220, 239, 217, 114];
    const ACCOUNT_LEN: usize = RandomnessAccountData::size();

    /// Switchboard accounts are cast in place, so the fixture keeps u64 alignment
    #[repr(C, align(8))]
    struct RandomnessFixture([u8; ACCOUNT_LEN]);

    impl RandomnessFixture {
        fn new(seed_slot: u64, reveal_slot: u64, value: [u8; 32]) -> Self {
            let mut fixture = Self([0u8; ACCOUNT_LEN]);
            fixture.0[..8].copy_from_slice(&RANDOMNESS_DISCRIMINATOR);
            fixture.write(offset_of!(RandomnessAccountData, seed_slot), &seed_slot.to_le_bytes());
            fixture.write(
                offset_of!(RandomnessAccountData, reveal_slot),
                &reveal_slot.to_le_bytes(),
            );
            fixture.write(offset_of!(RandomnessAccountData, value), &value);
            fixture
        }

        fn committed(seed_slot: u64) -> Self {
            Self::new(seed_slot, 0, [0u8; 32])
        }

        fn revealed(seed_slot: u64, reveal_slot: u64, random_value: u64) -> Self {
            let mut value = [0xffu8; 32];
            value[..8].copy_from_slice(&random_value.to_le_bytes());
            Self::new(seed_slot, reveal_slot, value)
        }

        fn write(&mut self, field_offset: usize, bytes: &[u8]) {
            let start = 8 + field_offset;
            self.0[start..start + bytes.len()].copy_from_slice(bytes);
        }
    }

    fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: impl Into<Error>) {
        let expected: Error = expected.into();
        assert_eq!(result.unwrap_err(), expected);
    }

    fn request_at(
        fixture: &mut RandomnessFixture,
        owner: Pubkey,
        slot: u64,
    ) -> (Pubkey, Result<RandomnessRequest>) {
        let key = Pubkey::new_unique();
        let mut lamports = 1_000_000;
        let account = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut fixture.0,
            &owner,
            false,
            0,
        );
        let result = SwitchboardGateway::new(Some(&account), slot).request(7, 3);
        (key, result)
    }

    fn reveal_at(
        fixture: &mut RandomnessFixture,
        expected_seed_slot: u64,
        slot: u64,
    ) -> Result<u64> {
        let key = Pubkey::new_unique();
        let owner = get_switchboard_on_demand_program_id();
        let mut lamports = 1_000_000;
        let account = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut fixture.0,
            &owner,
            false,
            0,
        );
        revealed_value(&account, expected_seed_slot, slot)
    }

    #[test]
    fn fresh_commit_becomes_the_request() {
        let mut fixture = RandomnessFixture::committed(1_000);
        let (key, result) =
            request_at(&mut fixture, get_switchboard_on_demand_program_id(), 1_001);
        assert_eq!(
            result.unwrap(),
            RandomnessRequest {
                request_id: key,
                seed_slot: 1_000,
            }
        );
    }

    #[test]
    fn recommitted_account_is_accepted_again() {
        // revealed at 990, committed again at 1_000
        let mut fixture = RandomnessFixture::new(1_000, 990, [9u8; 32]);
        let (_, result) =
            request_at(&mut fixture, get_switchboard_on_demand_program_id(), 1_002);
        assert_eq!(result.unwrap().seed_slot, 1_000);
    }

    #[test]
    fn revealed_commit_is_not_a_new_request() {
        let mut fixture = RandomnessFixture::revealed(1_000, 1_002, 1);
        let (_, result) =
            request_at(&mut fixture, get_switchboard_on_demand_program_id(), 1_003);
        assert_error(result, CollectError::RandomnessNotCurrent);
    }

    #[test]
    fn collector_cannot_trigger_a_draw_with_a_known_value() {
        let mut giveaway = Giveaway::default();
        giveaway.configure(7, 3, 500, 2, 255).unwrap();
        let first = Pubkey::new_unique();
        giveaway
            .on_collect(first, &mut SwitchboardGateway::new(None, 1_003))
            .unwrap();

        let mut fixture = RandomnessFixture::revealed(1_000, 1_002, 1);
        let key = Pubkey::new_unique();
        let owner = get_switchboard_on_demand_program_id();
        let mut lamports = 1_000_000;
        let account = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut fixture.0,
            &owner,
            false,
            0,
        );
        let mut gateway = SwitchboardGateway::new(Some(&account), 1_003);

        assert_error(
            giveaway.on_collect(Pubkey::new_unique(), &mut gateway),
            CollectError::RandomnessNotCurrent,
        );
        assert_eq!(giveaway.status, GiveawayStatus::Collecting);
        assert_eq!(giveaway.collectors, vec![first]);
        assert_eq!(giveaway.pending_request, None);
    }

    #[test]
    fn below_threshold_collect_needs_no_randomness_account() {
        let mut giveaway = Giveaway::default();
        giveaway.configure(7, 3, 500, 3, 255).unwrap();
        assert_eq!(
            giveaway
                .on_collect(Pubkey::new_unique(), &mut SwitchboardGateway::new(None, 10))
                .unwrap(),
            CollectOutcome::Registered { collector_count: 1 }
        );
    }

    #[test]
    fn commit_outside_the_slot_window_is_rejected() {
        let owner = get_switchboard_on_demand_program_id();

        let mut stale = RandomnessFixture::committed(1_000);
        let (_, result) = request_at(&mut stale, owner, 1_000 + MAX_SLOT_DIFFERENCE + 1);
        assert_error(result, CollectError::RandomnessNotCurrent);

        let mut future = RandomnessFixture::committed(1_000);
        let (_, result) = request_at(&mut future, owner, 999);
        assert_error(result, CollectError::RandomnessNotCurrent);

        let mut edge = RandomnessFixture::committed(1_000);
        let (_, result) = request_at(&mut edge, owner, 1_000 + MAX_SLOT_DIFFERENCE);
        assert!(result.is_ok());
    }

    #[test]
    fn missing_randomness_account_is_rejected() {
        assert_error(
            SwitchboardGateway::new(None, 1_000).request(7, 3),
            CollectError::RandomnessAccountMissing,
        );
    }

    #[test]
    fn randomness_account_must_belong_to_switchboard() {
        let mut fixture = RandomnessFixture::committed(1_000);
        let (_, result) = request_at(&mut fixture, Pubkey::new_unique(), 1_001);
        assert_error(result, CollectError::InvalidRandomnessAccount);

        let mut garbage = RandomnessFixture::committed(1_000);
        garbage.0[0] ^= 0xff;
        let (_, result) =
            request_at(&mut garbage, get_switchboard_on_demand_program_id(), 1_001);
        assert_error(result, CollectError::InvalidRandomnessAccount);
    }

    #[test]
    fn revealed_value_is_first_eight_bytes_little_endian() {
        let mut fixture = RandomnessFixture::revealed(1_000, 1_002, 0x0102_0304_0506_0708);
        assert_eq!(
            reveal_at(&mut fixture, 1_000, 1_002).unwrap(),
            0x0102_0304_0506_0708
        );
    }

    #[test]
    fn unrevealed_or_expired_value_is_not_resolved() {
        let mut pending = RandomnessFixture::committed(1_000);
        assert_error(
            reveal_at(&mut pending, 1_000, 1_001),
            FulfillmentError::RandomnessNotResolved,
        );

        let mut expired = RandomnessFixture::revealed(1_000, 1_002, 7);
        assert_error(
            reveal_at(&mut expired, 1_000, 1_003),
            FulfillmentError::RandomnessNotResolved,
        );
    }

    #[test]
    fn recommitted_account_is_stale_for_the_old_request() {
        let mut fixture = RandomnessFixture::revealed(1_010, 1_012, 7);
        assert_error(
            reveal_at(&mut fixture, 1_000, 1_012),
            FulfillmentError::StaleRandomness,
        );
    }
}
