use crate::{AttestationData, Epoch, Root, Slot, ValidatorIndex};
use thiserror::Error;

/// Reasons a slot, block or attestation cannot be applied to a state.
///
/// Returned instead of a post-state; the input state is never modified.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("attestation has {bits} aggregation bits (expected 1..={maximum})")]
    AttestationBitsOutOfRange { bits: usize, maximum: u64 },
    #[error(
        "attestation in slot {attestation_slot} is outside \
         inclusion range for state at slot {state_slot}"
    )]
    AttestationOutsideInclusionRange {
        state_slot: Slot,
        attestation_slot: Slot,
    },
    #[error("attestation votes for a checkpoint in the wrong epoch: {data:?}")]
    AttestationTargetsWrongEpoch { data: AttestationData },
    #[error("block is not newer than latest block header ({block_slot} <= {block_header_slot})")]
    BlockNotNewerThanLatestBlockHeader {
        block_slot: Slot,
        block_header_slot: Slot,
    },
    #[error("deposit index {deposit_index} exceeds eth1 deposit count {deposit_count}")]
    DepositIndexOverflow {
        deposit_index: u64,
        deposit_count: u64,
    },
    #[error("epoch processing requires the last slot of an epoch (slot: {slot})")]
    EpochProcessingOffBoundary { slot: Slot },
    #[error("state has no active validators at epoch {epoch}")]
    NoActiveValidators { epoch: Epoch },
    #[error("parent root in block ({in_block}) does not match latest block header ({computed})")]
    ParentRootMismatch { computed: Root, in_block: Root },
    #[error("proposer index {proposer_index} is out of bounds for {validator_count} validators")]
    ProposerIndexOutOfBounds {
        proposer_index: ValidatorIndex,
        validator_count: u64,
    },
    #[error("proposer {proposer_index} is slashed")]
    ProposerSlashed { proposer_index: ValidatorIndex },
    #[error("randao reveal of proposer {proposer_index} is invalid for epoch {epoch}")]
    RandaoRevealInvalid {
        proposer_index: ValidatorIndex,
        epoch: Epoch,
    },
    #[error("registry has {validators} validators but {balances} balances")]
    RegistryLengthMismatch { validators: u64, balances: u64 },
    #[error("registry of {validators} validators exceeds limit of {limit}")]
    RegistryTooLarge { validators: u64, limit: u64 },
    #[error("slot mismatch (in_state: {in_state}, in_block: {in_block})")]
    SlotMismatch { in_state: Slot, in_block: Slot },
    #[error("target slot {target} is not later than state slot {current}")]
    SlotNotLater { current: Slot, target: Slot },
    #[error("slot {slot} cannot be advanced without overflow")]
    SlotOverflow { slot: Slot },
    #[error("state root in block ({in_block}) does not match computed ({computed})")]
    StateRootMismatch { computed: Root, in_block: Root },
    #[error("{list} is full")]
    ListFull { list: &'static str },
}
