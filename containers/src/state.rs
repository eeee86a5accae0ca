use crate::block::{hash_tree_root, BlockBody, BlockHeader};
use crate::{
    Bytes32, Epoch, Error, Eth1Data, Gwei, PendingAttestations, Slot, Validator, ValidatorIndex,
};
use chain::config::{
    EpochsPerHistoricalVector, MaxEth1DataVotes, SlotsPerHistoricalRoot, ValidatorRegistryLimit,
};
use chain::ChainConfig;
use serde::{Deserialize, Serialize};
use ssz::{PersistentList, PersistentVector};
use ssz_derive::Ssz;

pub const MAX_EFFECTIVE_BALANCE: Gwei = 32_000_000_000;

/// Ring buffer of block or state roots indexed by `slot % SLOTS_PER_HISTORICAL_ROOT`.
pub type HistoricalRoots = PersistentVector<Bytes32, SlotsPerHistoricalRoot>;
pub type RandaoMixes = PersistentVector<Bytes32, EpochsPerHistoricalVector>;
pub type Eth1DataVotes = PersistentList<Eth1Data, MaxEth1DataVotes>;
pub type Validators = PersistentList<Validator, ValidatorRegistryLimit>;
pub type Balances = PersistentList<Gwei, ValidatorRegistryLimit>;

/// A snapshot of the beacon chain.
///
/// Every processing step takes a snapshot by reference and returns a new one. The collections
/// are persistent, so cloning is cheap and writes to a clone are never visible through the
/// original.
#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default, Serialize, Deserialize)]
pub struct State {
    pub genesis_time: u64,
    pub slot: Slot,
    pub latest_block_header: BlockHeader,
    pub block_roots: HistoricalRoots,
    pub state_roots: HistoricalRoots,

    // --- eth1 ---
    pub eth1_data: Eth1Data,
    pub eth1_data_votes: Eth1DataVotes,
    pub eth1_deposit_index: u64,

    // --- registry ---
    pub validators: Validators,
    pub balances: Balances,

    pub randao_mixes: RandaoMixes,

    // --- attestations ---
    pub previous_epoch_attestations: PendingAttestations,
    pub current_epoch_attestations: PendingAttestations,
}

impl State {
    pub fn genesis(
        config: &ChainConfig,
        genesis_time: u64,
        validators: Vec<Validator>,
        eth1_data: Eth1Data,
    ) -> Result<Self, Error> {
        let validator_count = validators.len() as u64;
        if validator_count > config.validator_registry_limit {
            return Err(Error::RegistryTooLarge {
                validators: validator_count,
                limit: config.validator_registry_limit,
            });
        }

        let mut validator_list = Validators::default();
        let mut balances = Balances::default();
        for validator in validators {
            balances
                .push(validator.effective_balance)
                .map_err(|_| Error::ListFull { list: "balances" })?;
            validator_list
                .push(validator)
                .map_err(|_| Error::ListFull { list: "validators" })?;
        }

        let genesis_header = BlockHeader {
            body_root: hash_tree_root(&BlockBody::default()),
            ..BlockHeader::default()
        };

        Ok(Self {
            genesis_time,
            slot: Slot(0),
            latest_block_header: genesis_header,
            block_roots: HistoricalRoots::default(),
            state_roots: HistoricalRoots::default(),
            eth1_data,
            eth1_data_votes: Eth1DataVotes::default(),
            eth1_deposit_index: validator_count,
            validators: validator_list,
            balances,
            randao_mixes: RandaoMixes::repeat_element(eth1_data.block_hash),
            previous_epoch_attestations: PendingAttestations::default(),
            current_epoch_attestations: PendingAttestations::default(),
        })
    }

    /// Genesis with `num_validators` interchangeable validators at full balance.
    pub fn generate_genesis(
        config: &ChainConfig,
        genesis_time: u64,
        num_validators: u64,
    ) -> Result<Self, Error> {
        let validators = (0..num_validators)
            .map(|index| Validator {
                withdrawal_credentials: withdrawal_credentials_for(index),
                ..Validator::active_at_genesis(Default::default(), MAX_EFFECTIVE_BALANCE)
            })
            .collect();

        let eth1_data = Eth1Data {
            deposit_root: Bytes32::zero(),
            deposit_count: num_validators,
            block_hash: Bytes32::from([0x42; 32]),
        };

        Self::genesis(config, genesis_time, validators, eth1_data)
    }

    #[must_use]
    pub fn current_epoch(&self, config: &ChainConfig) -> Epoch {
        self.slot.epoch(config)
    }

    #[must_use]
    pub fn previous_epoch(&self, config: &ChainConfig) -> Epoch {
        self.current_epoch(config).previous()
    }

    #[must_use]
    pub fn get_randao_mix(&self, epoch: Epoch) -> Bytes32 {
        *self.randao_mixes.mod_index(epoch.0)
    }

    #[must_use]
    pub fn active_validator_count(&self, epoch: Epoch) -> u64 {
        (&self.validators)
            .into_iter()
            .filter(|validator| validator.is_active_validator(epoch))
            .count() as u64
    }

    pub fn validator(&self, index: ValidatorIndex) -> Result<&Validator, Error> {
        self.validators
            .get(index.0)
            .map_err(|_| Error::ProposerIndexOutOfBounds {
                proposer_index: index,
                validator_count: self.validators.len_u64(),
            })
    }

    /// Checks the registry bounds every processing stage relies on.
    pub fn check_registry(&self, config: &ChainConfig) -> Result<(), Error> {
        let validators = self.validators.len_u64();
        let balances = self.balances.len_u64();

        if validators != balances {
            return Err(Error::RegistryLengthMismatch {
                validators,
                balances,
            });
        }

        if validators > config.validator_registry_limit {
            return Err(Error::RegistryTooLarge {
                validators,
                limit: config.validator_registry_limit,
            });
        }

        if self.eth1_deposit_index > self.eth1_data.deposit_count {
            return Err(Error::DepositIndexOverflow {
                deposit_index: self.eth1_deposit_index,
                deposit_count: self.eth1_data.deposit_count,
            });
        }

        Ok(())
    }
}

fn withdrawal_credentials_for(index: u64) -> Bytes32 {
    let mut bytes = [0; 32];
    bytes[24..].copy_from_slice(&index.to_be_bytes());
    Bytes32::from(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn generated_genesis_is_consistent() {
        let config = ChainConfig::minimal();
        let state = State::generate_genesis(&config, 0, 16).expect("genesis");

        assert_eq!(state.slot, Slot(0));
        assert_eq!(state.validators.len_u64(), 16);
        assert_eq!(state.balances.len_u64(), 16);
        assert_eq!(state.eth1_deposit_index, 16);
        assert_eq!(state.active_validator_count(Epoch(0)), 16);
        assert!(state.latest_block_header.state_root.is_zero());
        assert_eq!(state.get_randao_mix(Epoch(5)), state.eth1_data.block_hash);
        assert_eq!(state.check_registry(&config), Ok(()));
    }

    #[test]
    fn registry_length_mismatch_is_detected() {
        let config = ChainConfig::minimal();
        let mut state = State::generate_genesis(&config, 0, 4).expect("genesis");
        state.balances.push(1).expect("capacity");

        assert_eq!(
            state.check_registry(&config),
            Err(Error::RegistryLengthMismatch {
                validators: 4,
                balances: 5,
            }),
        );
    }

    #[test]
    fn deposit_index_beyond_deposit_count_is_detected() {
        let config = ChainConfig::minimal();
        let mut state = State::generate_genesis(&config, 0, 4).expect("genesis");
        state.eth1_deposit_index = 5;

        assert!(matches!(
            state.check_registry(&config),
            Err(Error::DepositIndexOverflow { .. }),
        ));
    }

    #[test]
    fn unknown_validator_is_out_of_bounds() {
        let state =
            State::generate_genesis(&ChainConfig::minimal(), 0, 2).expect("genesis");

        assert!(state.validator(ValidatorIndex(1)).is_ok());
        assert_eq!(
            state.validator(ValidatorIndex(2)),
            Err(Error::ProposerIndexOutOfBounds {
                proposer_index: ValidatorIndex(2),
                validator_count: 2,
            }),
        );
    }

    #[test]
    fn cloned_snapshot_does_not_observe_writes() {
        let state =
            State::generate_genesis(&ChainConfig::minimal(), 0, 2).expect("genesis");
        let mut clone = state.clone();
        *clone.block_roots.mod_index_mut(3) = Bytes32::from([9; 32]);

        assert!(state.block_roots.mod_index(3).is_zero());
        assert_eq!(*clone.block_roots.mod_index(3), Bytes32::from([9; 32]));
    }
}
