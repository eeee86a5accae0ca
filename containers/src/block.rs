use crate::types::BlsSignature;
use crate::{Attestations, Bytes32, Eth1Data, Root, Slot, State, ValidatorIndex};
use serde::{Deserialize, Serialize};
use ssz::SszHash;
use ssz_derive::Ssz;

/// The body of a block, containing payload data.
#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default, Serialize, Deserialize)]
pub struct BlockBody {
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    pub graffiti: Bytes32,
    pub attestations: Attestations,
}

/// A block with its body replaced by the body root.
///
/// Hashes to the same root as the block it summarizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Ssz, Default, Serialize, Deserialize)]
pub struct BlockHeader {
    pub slot: Slot,
    pub proposer_index: ValidatorIndex,
    pub parent_root: Root,
    pub state_root: Root,
    pub body_root: Root,
}

#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default, Serialize, Deserialize)]
pub struct Block {
    pub slot: Slot,
    pub proposer_index: ValidatorIndex,
    pub parent_root: Root,
    pub state_root: Root,
    pub body: BlockBody,
}

/// Compute the SSZ hash tree root for any type implementing `SszHash`.
pub fn hash_tree_root<T: SszHash>(value: &T) -> Bytes32 {
    Bytes32(value.hash_tree_root())
}

impl BlockHeader {
    #[must_use]
    pub fn root(&self) -> Root {
        hash_tree_root(self)
    }
}

impl Block {
    #[must_use]
    pub fn root(&self) -> Root {
        hash_tree_root(self)
    }

    #[must_use]
    pub fn header(&self) -> BlockHeader {
        BlockHeader {
            slot: self.slot,
            proposer_index: self.proposer_index,
            parent_root: self.parent_root,
            state_root: self.state_root,
            body_root: hash_tree_root(&self.body),
        }
    }

    /// The slot-0 block committing to `genesis_state`.
    ///
    /// Its root is the root that `process_slot` records for the genesis slot.
    #[must_use]
    pub fn genesis_for(genesis_state: &State) -> Self {
        Self {
            slot: genesis_state.latest_block_header.slot,
            proposer_index: genesis_state.latest_block_header.proposer_index,
            parent_root: genesis_state.latest_block_header.parent_root,
            state_root: hash_tree_root(genesis_state),
            body: BlockBody::default(),
        }
    }
}
