use hex::FromHex;
use serde::{Deserialize, Serialize};
use ssz::{ByteVector, H256};
use ssz_derive::Ssz;
use std::fmt;
use std::str::FromStr;
use typenum::{U48, U96};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Ssz, Default, Serialize, Deserialize,
)]
#[ssz(transparent)]
pub struct Bytes32(pub H256);

/// Content root of a block, header or state.
pub type Root = Bytes32;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Ssz, Default, Serialize, Deserialize,
)]
#[ssz(transparent)]
pub struct ValidatorIndex(pub u64);

pub type Gwei = u64;
pub type CommitteeIndex = u64;

pub type BlsPublicKey = ByteVector<U48>;
pub type BlsSignature = ByteVector<U96>;

impl Bytes32 {
    #[must_use]
    pub fn zero() -> Self {
        Self(H256::zero())
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<[u8; 32]> for Bytes32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(H256::from(bytes))
    }
}

impl FromStr for Bytes32 {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes: [u8; 32] = <[u8; 32]>::from_hex(s)?;
        Ok(Bytes32(H256::from(bytes)))
    }
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.as_bytes()))
    }
}

impl fmt::Display for ValidatorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
