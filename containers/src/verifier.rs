use crate::types::{BlsPublicKey, BlsSignature};
use crate::Epoch;

/// Signature checks required before a block may change the state.
pub trait Verifier {
    /// Whether `reveal` is the proposer's signature over `epoch`.
    fn verify_randao_reveal(
        &self,
        pubkey: &BlsPublicKey,
        epoch: Epoch,
        reveal: &BlsSignature,
    ) -> bool;
}

impl<T: Verifier + ?Sized> Verifier for &T {
    fn verify_randao_reveal(
        &self,
        pubkey: &BlsPublicKey,
        epoch: Epoch,
        reveal: &BlsSignature,
    ) -> bool {
        (**self).verify_randao_reveal(pubkey, epoch, reveal)
    }
}

/// Accepts every signature.
///
/// Only for tests and for replaying blocks that were verified elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullVerifier;

impl Verifier for NullVerifier {
    fn verify_randao_reveal(&self, _: &BlsPublicKey, _: Epoch, _: &BlsSignature) -> bool {
        true
    }
}
