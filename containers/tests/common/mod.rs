#![allow(dead_code)]

use chain::ChainConfig;
use containers::types::{BlsPublicKey, BlsSignature};
use containers::{
    Attestation, AttestationData, AttestationRecorder, Bytes32, Checkpoint, Context, Epoch,
    Eth1Data, NullEpochProcessor, NullVerifier, Slot, State, Verifier,
};
use ssz::BitList;

pub const VALIDATOR_COUNT: u64 = 16;

pub fn minimal_config() -> ChainConfig {
    ChainConfig::minimal()
}

pub fn genesis_state(config: &ChainConfig) -> State {
    State::generate_genesis(config, 0, VALIDATOR_COUNT).expect("genesis state")
}

pub type DefaultContext<'config> =
    Context<'config, NullVerifier, AttestationRecorder, NullEpochProcessor>;

pub fn default_context(config: &ChainConfig) -> DefaultContext<'_> {
    Context::new(config)
}

pub fn eth1_data(byte: u8) -> Eth1Data {
    Eth1Data {
        deposit_root: Bytes32::from([byte; 32]),
        deposit_count: VALIDATOR_COUNT,
        block_hash: Bytes32::from([byte; 32]),
    }
}

pub fn attestation(
    config: &ChainConfig,
    slot: u64,
    beacon_block_root: Bytes32,
    participants: usize,
) -> Attestation {
    let slot = Slot(slot);
    Attestation {
        aggregation_bits: BitList::new(true, participants),
        data: AttestationData {
            slot,
            index: 0,
            beacon_block_root,
            source: Checkpoint::default(),
            target: Checkpoint::new(slot.epoch(config), beacon_block_root),
        },
        signature: BlsSignature::default(),
    }
}

/// Rejects every signature.
pub struct RejectingVerifier;

impl Verifier for RejectingVerifier {
    fn verify_randao_reveal(&self, _: &BlsPublicKey, _: Epoch, _: &BlsSignature) -> bool {
        false
    }
}
