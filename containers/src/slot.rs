use chain::ChainConfig;
use serde::{Deserialize, Serialize};
use ssz_derive::Ssz;
use std::fmt;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Ssz, Default, Serialize, Deserialize,
)]
#[ssz(transparent)]
pub struct Slot(pub u64);

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Ssz, Default, Serialize, Deserialize,
)]
#[ssz(transparent)]
pub struct Epoch(pub u64);

pub const GENESIS_SLOT: Slot = Slot(0);
pub const GENESIS_EPOCH: Epoch = Epoch(0);
pub const FAR_FUTURE_EPOCH: Epoch = Epoch(u64::MAX);

impl Slot {
    #[must_use]
    pub const fn epoch(self, config: &ChainConfig) -> Epoch {
        Epoch(config.epoch_at_slot(self.0))
    }

    /// The following slot, or `None` at the end of the 64-bit range.
    #[must_use]
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }

    #[must_use]
    pub const fn is_epoch_end(self, config: &ChainConfig) -> bool {
        config.is_epoch_end(self.0)
    }
}

impl Epoch {
    /// First slot of the epoch, or `None` if it does not fit in a slot number.
    #[must_use]
    pub const fn start_slot(self, config: &ChainConfig) -> Option<Slot> {
        match config.start_slot_at_epoch(self.0) {
            Some(slot) => Some(Slot(slot)),
            None => None,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(31, 0)]
    #[case(32, 1)]
    #[case(130, 4)]
    fn slot_to_epoch(#[case] slot: u64, #[case] epoch: u64) {
        assert_eq!(Slot(slot).epoch(&ChainConfig::mainnet()), Epoch(epoch));
    }

    #[test]
    fn epoch_start_slot() {
        let config = ChainConfig {
            slots_per_epoch: 64,
            ..ChainConfig::mainnet()
        };

        assert_eq!(Epoch(2).start_slot(&config), Some(Slot(128)));
        assert_eq!(GENESIS_EPOCH.start_slot(&config), Some(GENESIS_SLOT));
        assert_eq!(FAR_FUTURE_EPOCH.start_slot(&config), None);
    }

    #[test]
    fn next_slot_overflow() {
        assert_eq!(Slot(7).checked_next(), Some(Slot(8)));
        assert_eq!(Slot(u64::MAX).checked_next(), None);
    }

    #[test]
    fn previous_epoch_saturates_at_genesis() {
        assert_eq!(Epoch(3).previous(), Epoch(2));
        assert_eq!(GENESIS_EPOCH.previous(), GENESIS_EPOCH);
    }
}
