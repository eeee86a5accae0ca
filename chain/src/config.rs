use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use typenum::{Unsigned as _, U1099511627776, U128, U2048, U4096, U65536, U8192};

// SSZ capacities are part of the container schema and therefore fixed at compile time.
pub type SlotsPerHistoricalRoot = U8192;
pub type EpochsPerHistoricalVector = U65536;
pub type MaxValidatorsPerCommittee = U2048;
pub type ValidatorRegistryLimit = U1099511627776;
pub type MaxEth1DataVotes = U2048;
pub type MaxAttestations = U128;
pub type MaxPendingAttestations = U4096;

pub const SLOTS_PER_EPOCH: u64 = 32;
pub const EPOCHS_PER_ETH1_VOTING_PERIOD: u64 = 64;
pub const MIN_ATTESTATION_INCLUSION_DELAY: u64 = 1;
pub const SLOTS_PER_HISTORICAL_ROOT: u64 = SlotsPerHistoricalRoot::U64;
pub const EPOCHS_PER_HISTORICAL_VECTOR: u64 = EpochsPerHistoricalVector::U64;
pub const MAX_VALIDATORS_PER_COMMITTEE: u64 = MaxValidatorsPerCommittee::U64;
pub const VALIDATOR_REGISTRY_LIMIT: u64 = ValidatorRegistryLimit::U64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SLOTS_PER_EPOCH must be positive")]
    ZeroSlotsPerEpoch,
    #[error("EPOCHS_PER_ETH1_VOTING_PERIOD must be positive")]
    ZeroVotingPeriod,
    #[error("{name} is fixed at {compiled} by the container schema (configured: {configured})")]
    CapacityMismatch {
        name: &'static str,
        compiled: u64,
        configured: u64,
    },
    #[error(
        "MAX_VALIDATORS_PER_COMMITTEE must be in 1..={maximum} (configured: {configured})"
    )]
    CommitteeSizeOutOfRange { maximum: u64, configured: u64 },
    #[error("eth1 voting window of {window} slots does not fit in {maximum} votes")]
    VotingWindowTooLong { window: u64, maximum: u64 },
}

/// Protocol constants shared by every component.
///
/// Built once at startup and handed around by reference. Values that size SSZ containers
/// are also present here so a configuration file can be checked against the compiled schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ChainConfig {
    pub slots_per_epoch: u64,
    pub slots_per_historical_root: u64,
    pub epochs_per_historical_vector: u64,
    pub epochs_per_eth1_voting_period: u64,
    pub max_validators_per_committee: u64,
    pub validator_registry_limit: u64,
    pub min_attestation_inclusion_delay: u64,
}

pub const MAINNET_CONFIG: ChainConfig = ChainConfig {
    slots_per_epoch: SLOTS_PER_EPOCH,
    slots_per_historical_root: SLOTS_PER_HISTORICAL_ROOT,
    epochs_per_historical_vector: EPOCHS_PER_HISTORICAL_VECTOR,
    epochs_per_eth1_voting_period: EPOCHS_PER_ETH1_VOTING_PERIOD,
    max_validators_per_committee: MAX_VALIDATORS_PER_COMMITTEE,
    validator_registry_limit: VALIDATOR_REGISTRY_LIMIT,
    min_attestation_inclusion_delay: MIN_ATTESTATION_INCLUSION_DELAY,
};

impl Default for ChainConfig {
    fn default() -> Self {
        MAINNET_CONFIG
    }
}

impl ChainConfig {
    #[must_use]
    pub const fn mainnet() -> Self {
        MAINNET_CONFIG
    }

    /// Short epochs and voting periods for tests and local runs.
    #[must_use]
    pub const fn minimal() -> Self {
        Self {
            slots_per_epoch: 8,
            epochs_per_eth1_voting_period: 4,
            ..MAINNET_CONFIG
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open chain config {}", path.display()))?;
        let config: Self = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse chain config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration against the compiled capacities.
    ///
    /// Every other component expects a configuration that passed this check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slots_per_epoch == 0 {
            return Err(ConfigError::ZeroSlotsPerEpoch);
        }

        if self.epochs_per_eth1_voting_period == 0 {
            return Err(ConfigError::ZeroVotingPeriod);
        }

        for (name, compiled, configured) in [
            (
                "SLOTS_PER_HISTORICAL_ROOT",
                SLOTS_PER_HISTORICAL_ROOT,
                self.slots_per_historical_root,
            ),
            (
                "EPOCHS_PER_HISTORICAL_VECTOR",
                EPOCHS_PER_HISTORICAL_VECTOR,
                self.epochs_per_historical_vector,
            ),
            (
                "VALIDATOR_REGISTRY_LIMIT",
                VALIDATOR_REGISTRY_LIMIT,
                self.validator_registry_limit,
            ),
        ] {
            if compiled != configured {
                return Err(ConfigError::CapacityMismatch {
                    name,
                    compiled,
                    configured,
                });
            }
        }

        if !(1..=MAX_VALIDATORS_PER_COMMITTEE).contains(&self.max_validators_per_committee) {
            return Err(ConfigError::CommitteeSizeOutOfRange {
                maximum: MAX_VALIDATORS_PER_COMMITTEE,
                configured: self.max_validators_per_committee,
            });
        }

        let maximum = MaxEth1DataVotes::U64;
        match self
            .epochs_per_eth1_voting_period
            .checked_mul(self.slots_per_epoch)
        {
            Some(window) if window <= maximum => Ok(()),
            window => Err(ConfigError::VotingWindowTooLong {
                window: window.unwrap_or(u64::MAX),
                maximum,
            }),
        }
    }

    // The helpers below assume a configuration that passed `validate`. On one that did not they
    // saturate instead of panicking, and their results are meaningless.

    /// Length of the eth1 voting window in slots.
    #[must_use]
    pub const fn slots_per_eth1_voting_period(&self) -> u64 {
        self.epochs_per_eth1_voting_period
            .saturating_mul(self.slots_per_epoch)
    }

    /// Epoch of `slot`, or 0 when `slots_per_epoch` is zero.
    #[must_use]
    pub const fn epoch_at_slot(&self, slot: u64) -> u64 {
        match slot.checked_div(self.slots_per_epoch) {
            Some(epoch) => epoch,
            None => 0,
        }
    }

    #[must_use]
    pub const fn start_slot_at_epoch(&self, epoch: u64) -> Option<u64> {
        epoch.checked_mul(self.slots_per_epoch)
    }

    /// True for the last slot of an epoch, after which epoch processing runs.
    #[must_use]
    pub const fn is_epoch_end(&self, slot: u64) -> bool {
        match slot.checked_rem(self.slots_per_epoch) {
            Some(offset) => offset + 1 == self.slots_per_epoch,
            None => false,
        }
    }

    /// A link is a supermajority link when its vote count is strictly greater than this.
    #[must_use]
    pub const fn supermajority_threshold(&self) -> u64 {
        let committee = self.max_validators_per_committee;
        committee / 3 * 2 + committee % 3 * 2 / 3
    }
}
