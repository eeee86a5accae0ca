pub mod attestation;
pub mod block;
pub mod block_processing;
pub mod checkpoint;
pub mod config;
pub mod epoch_processing;
pub mod error;
pub mod eth1;
pub mod operations;
pub mod slot;
pub mod slot_processing;
pub mod state;
pub mod transition;
pub mod types;
pub mod validator;
pub mod verifier;

pub use attestation::{
    AggregationBits, Attestation, AttestationData, Attestations, PendingAttestation,
    PendingAttestations,
};
pub use block::{hash_tree_root, Block, BlockBody, BlockHeader};
pub use checkpoint::Checkpoint;
pub use config::GenesisConfig;
pub use epoch_processing::{EpochProcessor, NullEpochProcessor};
pub use error::Error;
pub use eth1::Eth1Data;
pub use operations::{AttestationRecorder, OperationsProcessor};
pub use slot::{Epoch, Slot};
pub use state::State;
pub use transition::{Context, StateRootPolicy};
pub use types::{Bytes32, Gwei, Root, ValidatorIndex};
pub use validator::Validator;
pub use verifier::{NullVerifier, Verifier};
pub use ssz;
