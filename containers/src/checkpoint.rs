use crate::{Epoch, Root};
use serde::{Deserialize, Serialize};
use ssz_derive::Ssz;
use std::fmt;

/// A claimed epoch boundary: the epoch together with the root of its boundary block.
///
/// Checkpoints are the source and target of attestation votes and the unit of
/// justification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Ssz, Default, Serialize, Deserialize)]
pub struct Checkpoint {
    pub epoch: Epoch,
    pub root: Root,
}

impl Checkpoint {
    #[must_use]
    pub const fn new(epoch: Epoch, root: Root) -> Self {
        Self { epoch, root }
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.epoch, self.root)
    }
}
