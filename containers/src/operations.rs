use crate::{Attestation, BlockBody, Error, PendingAttestation, State};
use chain::ChainConfig;

/// Applies the operations of a block body: deposits, slashings, exits and attestations.
///
/// Implementations must keep `validators` and `balances` the same length and within the
/// registry limit.
pub trait OperationsProcessor {
    fn process_operations(
        &self,
        config: &ChainConfig,
        state: &State,
        body: &BlockBody,
    ) -> Result<State, Error>;
}

impl<T: OperationsProcessor + ?Sized> OperationsProcessor for &T {
    fn process_operations(
        &self,
        config: &ChainConfig,
        state: &State,
        body: &BlockBody,
    ) -> Result<State, Error> {
        (**self).process_operations(config, state, body)
    }
}

/// Records block attestations as pending attestations.
///
/// Bodies carry no deposits, slashings or exits, so attestations are the only operation.
#[derive(Clone, Copy, Debug, Default)]
pub struct AttestationRecorder;

impl OperationsProcessor for AttestationRecorder {
    fn process_operations(
        &self,
        config: &ChainConfig,
        state: &State,
        body: &BlockBody,
    ) -> Result<State, Error> {
        let mut state = state.clone();

        for attestation in &body.attestations {
            let pending = validate_attestation(config, &state, attestation)?;

            let pool = if pending.data.target.epoch == state.current_epoch(config) {
                &mut state.current_epoch_attestations
            } else {
                &mut state.previous_epoch_attestations
            };

            pool.push(pending).map_err(|_| Error::ListFull {
                list: "pending attestations",
            })?;
        }

        state.check_registry(config)?;

        Ok(state)
    }
}

fn validate_attestation(
    config: &ChainConfig,
    state: &State,
    attestation: &Attestation,
) -> Result<PendingAttestation, Error> {
    let data = attestation.data;
    let target_epoch = data.target.epoch;

    if target_epoch != state.previous_epoch(config) && target_epoch != state.current_epoch(config)
    {
        return Err(Error::AttestationTargetsWrongEpoch { data });
    }

    if target_epoch != data.slot.epoch(config) {
        return Err(Error::AttestationTargetsWrongEpoch { data });
    }

    let earliest = data
        .slot
        .0
        .saturating_add(config.min_attestation_inclusion_delay);
    let latest = data.slot.0.saturating_add(config.slots_per_epoch);

    if !(earliest..=latest).contains(&state.slot.0) {
        return Err(Error::AttestationOutsideInclusionRange {
            state_slot: state.slot,
            attestation_slot: data.slot,
        });
    }

    let bits = attestation.aggregation_bits.len();
    if bits == 0 || bits as u64 > config.max_validators_per_committee {
        return Err(Error::AttestationBitsOutOfRange {
            bits,
            maximum: config.max_validators_per_committee,
        });
    }

    Ok(PendingAttestation {
        aggregation_bits: attestation.aggregation_bits.clone(),
        data,
        inclusion_delay: state.slot.0 - data.slot.0,
        proposer_index: state.latest_block_header.proposer_index,
    })
}
