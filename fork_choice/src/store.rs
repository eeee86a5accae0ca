use crate::Error;
use containers::{Block, Root, Slot};
use std::collections::HashMap;

/// Blocks known to a participant, keyed by block root.
///
/// Every block other than the genesis block has its parent in the store at a strictly smaller
/// slot. `on_block` is the only way to add blocks and keeps this property.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub genesis_root: Root,
    pub blocks: HashMap<Root, Block>,
}

/// Initialize the store from the genesis block.
pub fn get_forkchoice_store(anchor_block: Block) -> Result<Store, Error> {
    let root = anchor_block.root();

    if anchor_block.slot != Slot(0) {
        return Err(Error::MissingGenesis {
            root,
            slot: anchor_block.slot,
        });
    }

    Ok(Store {
        genesis_root: root,
        blocks: [(root, anchor_block)].into(),
    })
}

impl Store {
    pub fn block(&self, root: Root) -> Result<&Block, Error> {
        self.blocks.get(&root).ok_or(Error::UnknownBlock { root })
    }

    #[must_use]
    pub fn contains(&self, root: &Root) -> bool {
        self.blocks.contains_key(root)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
