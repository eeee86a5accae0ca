#![allow(dead_code)]

use chain::ChainConfig;
use containers::{AttestationData, Block, Bytes32, Checkpoint, Epoch, Root, Slot};
use fork_choice::{get_forkchoice_store, on_block, Store};

pub fn config_with_slots_per_epoch(slots_per_epoch: u64) -> ChainConfig {
    ChainConfig {
        slots_per_epoch,
        ..ChainConfig::minimal()
    }
}

/// A committee of 3, so 3 matching votes form a supermajority link.
pub fn small_committee_config(slots_per_epoch: u64) -> ChainConfig {
    ChainConfig {
        max_validators_per_committee: 3,
        ..config_with_slots_per_epoch(slots_per_epoch)
    }
}

pub fn genesis_block() -> Block {
    Block {
        state_root: Bytes32::from([0xaa; 32]),
        ..Block::default()
    }
}

pub fn child(parent_root: Root, slot: u64, tag: u8) -> Block {
    Block {
        slot: Slot(slot),
        parent_root,
        state_root: Bytes32::from([tag; 32]),
        ..Block::default()
    }
}

/// A store holding a single chain with blocks at `slots` (genesis excluded), oldest first.
///
/// Returns the store and the roots head first, ending at genesis.
pub fn linear_store(slots: &[u64]) -> (Store, Vec<Root>) {
    let mut store = get_forkchoice_store(genesis_block()).expect("genesis anchor");
    let mut roots = vec![store.genesis_root];

    for (tag, slot) in slots.iter().enumerate() {
        let parent = *roots.last().expect("genesis present");
        let root = on_block(&mut store, child(parent, *slot, tag as u8 + 1)).expect("valid block");
        roots.push(root);
    }

    roots.reverse();
    (store, roots)
}

pub fn attestation_data(
    slot: u64,
    head: Root,
    source: Checkpoint,
    target: Checkpoint,
) -> AttestationData {
    AttestationData {
        slot: Slot(slot),
        index: 0,
        beacon_block_root: head,
        source,
        target,
    }
}

pub fn links(source: Checkpoint, target: Checkpoint, count: usize) -> Vec<AttestationData> {
    vec![
        AttestationData {
            source,
            target,
            ..AttestationData::default()
        };
        count
    ]
}

pub fn checkpoint(epoch: u64, root: Root) -> Checkpoint {
    Checkpoint::new(Epoch(epoch), root)
}
