use crate::{Error, Store};
use chain::ChainConfig;
use containers::{Checkpoint, Epoch, Root, Slot};

/// The ancestors of a block, head first, ending at the genesis block.
///
/// Slots are strictly decreasing along the chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    entries: Vec<(Root, Slot)>,
}

impl Chain {
    /// Builds a chain from `(root, slot)` pairs ordered head first.
    ///
    /// Returns `None` unless the slots are strictly decreasing and the last one is 0.
    #[must_use]
    pub fn from_entries(entries: Vec<(Root, Slot)>) -> Option<Self> {
        let decreasing = entries.windows(2).all(|pair| pair[0].1 > pair[1].1);
        let ends_at_genesis = matches!(entries.last(), Some((_, Slot(0))));

        (decreasing && ends_at_genesis).then_some(Self { entries })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A chain always holds at least the genesis block.
    #[must_use]
    pub fn head(&self) -> Root {
        self.entries[0].0
    }

    #[must_use]
    pub fn root(&self, index: usize) -> Option<Root> {
        self.entries.get(index).map(|(root, _)| *root)
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<Slot> {
        self.entries.get(index).map(|(_, slot)| *slot)
    }

    pub fn roots(&self) -> impl Iterator<Item = Root> + '_ {
        self.entries.iter().map(|(root, _)| *root)
    }

    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.entries.iter().map(|(_, slot)| *slot)
    }
}

/// Walks parent links from `root` down to the genesis block.
pub fn chain_roots(store: &Store, root: Root) -> Result<Chain, Error> {
    let mut entries = Vec::new();
    let mut current = root;

    loop {
        let block = store.block(current)?;
        entries.push((current, block.slot));

        if block.slot == Slot(0) {
            return Ok(Chain { entries });
        }

        let parent = store.block(block.parent_root)?;
        if parent.slot >= block.slot {
            return Err(Error::ParentNotOlder {
                root: current,
                slot: block.slot,
                parent_slot: parent.slot,
            });
        }

        current = block.parent_root;
    }
}

fn boundary_slot(epoch: Epoch, config: &ChainConfig) -> Slot {
    epoch.start_slot(config).unwrap_or(Slot(u64::MAX))
}

/// Index of the epoch boundary block of `epoch`: the most recent block at or before the first
/// slot of the epoch.
#[must_use]
pub fn compute_ebb(chain: &Chain, epoch: Epoch, config: &ChainConfig) -> usize {
    let boundary = boundary_slot(epoch, config);

    chain
        .slots()
        .position(|slot| slot <= boundary)
        .unwrap_or(chain.len() - 1)
}

/// The checkpoint of `epoch` on `chain`: the epoch paired with its epoch boundary block.
///
/// Costs one walk over the chain whatever the epoch.
#[must_use]
pub fn epoch_checkpoint(chain: &Chain, epoch: Epoch, config: &ChainConfig) -> Checkpoint {
    let (root, _) = chain.entries[compute_ebb(chain, epoch, config)];
    Checkpoint::new(epoch, root)
}

/// Epoch boundary block indices for `epoch`, `epoch - 1`, ..., 0.
///
/// Entry `k` belongs to epoch `epoch - k`. Indices are non-decreasing. The result has
/// `epoch + 1` entries, so epochs taken from untrusted input should go through
/// [`epoch_checkpoint`] instead.
#[must_use]
pub fn compute_all_ebbs(chain: &Chain, epoch: Epoch, config: &ChainConfig) -> Vec<usize> {
    let last = chain.len() - 1;
    let mut indices = Vec::new();
    let mut index = 0;

    for current in (0..=epoch.0).rev() {
        let boundary = boundary_slot(Epoch(current), config);
        while index < last && chain.entries[index].1 > boundary {
            index += 1;
        }
        indices.push(index);
    }

    indices
}

/// Checkpoints named by an epoch boundary sequence: entry `k` is `(epoch - k, chain[ebbs[k]])`.
///
/// Returns `None` if an index is not on the chain.
#[must_use]
pub fn checkpoint_sequence(chain: &Chain, epoch: Epoch, ebbs: &[usize]) -> Option<Vec<Checkpoint>> {
    ebbs.iter()
        .zip((0..=epoch.0).rev())
        .map(|(index, current)| Some(Checkpoint::new(Epoch(current), chain.root(*index)?)))
        .collect()
}
