use crate::{Error, PendingAttestations, State};
use chain::ChainConfig;
use core::mem;
use tracing::debug;

/// Rewards, penalties and registry updates applied at the last slot of every epoch.
///
/// Implementations must keep `validators` and `balances` the same length. The bookkeeping that
/// bounds the state's pools and windows is not their concern; `process_slots` applies it after
/// them through [`State::process_final_updates`].
pub trait EpochProcessor {
    fn process_epoch(&self, config: &ChainConfig, state: &State) -> Result<State, Error>;
}

impl<T: EpochProcessor + ?Sized> EpochProcessor for &T {
    fn process_epoch(&self, config: &ChainConfig, state: &State) -> Result<State, Error> {
        (**self).process_epoch(config, state)
    }
}

/// Applies no rewards or penalties.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEpochProcessor;

impl EpochProcessor for NullEpochProcessor {
    fn process_epoch(&self, _config: &ChainConfig, state: &State) -> Result<State, Error> {
        Ok(state.clone())
    }
}

impl State {
    /// End-of-epoch bookkeeping for a state at the last slot of an epoch.
    ///
    /// Resets eth1 votes when a voting period ends, carries the current RANDAO mix into the next
    /// epoch and rotates the attestation pools.
    pub fn process_final_updates(&self, config: &ChainConfig) -> Result<Self, Error> {
        if !self.slot.is_epoch_end(config) {
            return Err(Error::EpochProcessingOffBoundary { slot: self.slot });
        }

        for pending in &self.previous_epoch_attestations {
            let bits = pending.aggregation_bits.len();
            if bits == 0 || bits as u64 > config.max_validators_per_committee {
                return Err(Error::AttestationBitsOutOfRange {
                    bits,
                    maximum: config.max_validators_per_committee,
                });
            }
        }

        let mut state = self.clone();
        let current_epoch = state.current_epoch(config);
        let next_epoch = current_epoch.next();

        if next_epoch.0.checked_rem(config.epochs_per_eth1_voting_period) == Some(0) {
            debug!(
                epoch = %next_epoch,
                votes = state.eth1_data_votes.len_u64(),
                "resetting eth1 votes",
            );
            state.eth1_data_votes = Default::default();
        }

        *state.randao_mixes.mod_index_mut(next_epoch.0) = state.get_randao_mix(current_epoch);

        state.previous_epoch_attestations = mem::replace(
            &mut state.current_epoch_attestations,
            PendingAttestations::default(),
        );

        Ok(state)
    }
}
