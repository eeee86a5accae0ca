use containers::{Checkpoint, Root, Slot};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("block {root} is not in the store")]
    UnknownBlock { root: Root },
    #[error("block {root} at slot {slot} has parent at slot {parent_slot}")]
    ParentNotOlder {
        root: Root,
        slot: Slot,
        parent_slot: Slot,
    },
    #[error("anchor block {root} is at slot {slot} instead of genesis")]
    MissingGenesis { root: Root, slot: Slot },
    #[error("block {root} is a second genesis block")]
    DuplicateGenesis { root: Root },
    #[error("attestation target {in_attestation} does not match epoch boundary {expected}")]
    AttestationTargetMismatch {
        expected: Checkpoint,
        in_attestation: Checkpoint,
    },
    #[error("attestation source {in_attestation} does not match last justified {expected}")]
    AttestationSourceMismatch {
        expected: Checkpoint,
        in_attestation: Checkpoint,
    },
}
