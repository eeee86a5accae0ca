use crate::slot::{FAR_FUTURE_EPOCH, GENESIS_EPOCH};
use crate::types::{BlsPublicKey, Bytes32, Gwei};
use crate::Epoch;
use serde::{Deserialize, Serialize};
use ssz_derive::Ssz;

#[derive(Clone, Debug, PartialEq, Eq, Default, Ssz, Serialize, Deserialize)]
pub struct Validator {
    pub pubkey: BlsPublicKey,
    pub withdrawal_credentials: Bytes32,
    pub effective_balance: Gwei,
    pub slashed: bool,
    pub activation_eligibility_epoch: Epoch,
    pub activation_epoch: Epoch,
    pub exit_epoch: Epoch,
    pub withdrawable_epoch: Epoch,
}

impl Validator {
    /// A validator that is active from genesis and has not scheduled an exit.
    #[must_use]
    pub fn active_at_genesis(pubkey: BlsPublicKey, effective_balance: Gwei) -> Self {
        Self {
            pubkey,
            withdrawal_credentials: Bytes32::zero(),
            effective_balance,
            slashed: false,
            activation_eligibility_epoch: GENESIS_EPOCH,
            activation_epoch: GENESIS_EPOCH,
            exit_epoch: FAR_FUTURE_EPOCH,
            withdrawable_epoch: FAR_FUTURE_EPOCH,
        }
    }

    #[must_use]
    pub fn is_active_validator(&self, epoch: Epoch) -> bool {
        self.activation_epoch <= epoch && epoch < self.exit_epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_validator_is_active_until_exit() {
        let mut validator = Validator::active_at_genesis(BlsPublicKey::default(), 32);
        assert!(validator.is_active_validator(GENESIS_EPOCH));
        assert!(validator.is_active_validator(Epoch(1_000)));

        validator.exit_epoch = Epoch(10);
        assert!(validator.is_active_validator(Epoch(9)));
        assert!(!validator.is_active_validator(Epoch(10)));
    }

    #[test]
    fn pending_validator_is_inactive() {
        let validator = Validator {
            activation_epoch: Epoch(5),
            ..Validator::active_at_genesis(BlsPublicKey::default(), 32)
        };

        assert!(!validator.is_active_validator(Epoch(4)));
        assert!(validator.is_active_validator(Epoch(5)));
    }
}
