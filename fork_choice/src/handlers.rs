use crate::helpers::{chain_roots, epoch_checkpoint};
use crate::justification::latest_justified_checkpoint;
use crate::{Error, Store};
use chain::ChainConfig;
use containers::{AttestationData, Block, Root, Slot};
use tracing::{debug, warn};

/// Adds `block` to the store if its parent is known and older.
///
/// Adding a block that is already present is a no-op.
pub fn on_block(store: &mut Store, block: Block) -> Result<Root, Error> {
    let root = block.root();

    if store.contains(&root) {
        debug!(%root, "block already known");
        return Ok(root);
    }

    if block.slot == Slot(0) {
        return Err(Error::DuplicateGenesis { root });
    }

    let Some(parent) = store.blocks.get(&block.parent_root) else {
        warn!(%root, parent_root = %block.parent_root, "block with unknown parent");
        return Err(Error::UnknownBlock {
            root: block.parent_root,
        });
    };

    if parent.slot >= block.slot {
        return Err(Error::ParentNotOlder {
            root,
            slot: block.slot,
            parent_slot: parent.slot,
        });
    }

    debug!(%root, slot = %block.slot, "adding block to store");
    store.blocks.insert(root, block);

    Ok(root)
}

/// Checks the source and target of an attestation against the chain of its head block.
///
/// The target must be the epoch boundary block of the attestation's epoch. The source must be
/// the most recent checkpoint justified by `links` on that chain. The cost depends on the chain
/// and `links`, not on how far ahead the attestation's slot is.
pub fn validate_attestation(
    store: &Store,
    data: &AttestationData,
    links: &[AttestationData],
    config: &ChainConfig,
) -> Result<(), Error> {
    let chain = chain_roots(store, data.beacon_block_root)?;
    let epoch = data.slot.epoch(config);

    let target = epoch_checkpoint(&chain, epoch, config);
    if data.target != target {
        return Err(Error::AttestationTargetMismatch {
            expected: target,
            in_attestation: data.target,
        });
    }

    let source = latest_justified_checkpoint(&chain, epoch, links, config);
    if data.source != source {
        return Err(Error::AttestationSourceMismatch {
            expected: source,
            in_attestation: data.source,
        });
    }

    Ok(())
}

/// Whether an attestation is consistent with the store. See [`validate_attestation`].
#[must_use]
pub fn is_valid_attestation(
    store: &Store,
    data: &AttestationData,
    links: &[AttestationData],
    config: &ChainConfig,
) -> bool {
    validate_attestation(store, data, links, config).is_ok()
}
