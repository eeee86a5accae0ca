use crate::{Bytes32, Root};
use serde::{Deserialize, Serialize};
use ssz_derive::Ssz;

/// The proposer's view of the deposit contract, voted on once per block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Ssz, Default, Serialize, Deserialize)]
pub struct Eth1Data {
    pub deposit_root: Root,
    pub deposit_count: u64,
    pub block_hash: Bytes32,
}
