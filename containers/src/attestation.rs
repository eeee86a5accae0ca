use crate::types::{BlsSignature, CommitteeIndex, Root, ValidatorIndex};
use crate::{Checkpoint, Slot};
use chain::config::{MaxAttestations, MaxPendingAttestations, MaxValidatorsPerCommittee};
use serde::{Deserialize, Serialize};
use ssz::{BitList, PersistentList};
use ssz_derive::Ssz;

/// Participation bits of a single committee.
pub type AggregationBits = BitList<MaxValidatorsPerCommittee>;

/// Attestations carried in a block body.
pub type Attestations = PersistentList<Attestation, MaxAttestations>;

/// Attestations recorded in the state for one epoch.
pub type PendingAttestations = PersistentList<PendingAttestation, MaxPendingAttestations>;

/// The vote itself: head, source and target as observed by a committee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Ssz, Default, Serialize, Deserialize)]
pub struct AttestationData {
    pub slot: Slot,
    pub index: CommitteeIndex,
    pub beacon_block_root: Root,
    pub source: Checkpoint,
    pub target: Checkpoint,
}

/// Committee-aggregated attestation as included in a block.
#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default, Serialize, Deserialize)]
pub struct Attestation {
    pub aggregation_bits: AggregationBits,
    pub data: AttestationData,
    pub signature: BlsSignature,
}

/// An attestation after inclusion. Never modified once recorded.
#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default, Serialize, Deserialize)]
pub struct PendingAttestation {
    pub aggregation_bits: AggregationBits,
    pub data: AttestationData,
    pub inclusion_delay: u64,
    pub proposer_index: ValidatorIndex,
}

impl PendingAttestation {
    /// Number of committee members that took part in the vote.
    #[must_use]
    pub fn participants(&self) -> usize {
        self.aggregation_bits.count_ones()
    }
}
