use crate::state::MAX_EFFECTIVE_BALANCE;
use crate::types::BlsPublicKey;
use crate::{Bytes32, Eth1Data, State, Validator};
use anyhow::{ensure, Context as _, Result};
use chain::ChainConfig;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct GenesisConfig {
    pub genesis_time: u64,
    #[serde(default)]
    pub validator_count: u64,
    /// Hex-encoded BLS public keys. When empty, `VALIDATOR_COUNT` anonymous validators are used.
    #[serde(default)]
    pub genesis_validators: Vec<String>,
    #[serde(default)]
    pub eth1_block_hash: Bytes32,
}

impl GenesisConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open genesis config {}", path.display()))?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)
            .with_context(|| format!("failed to parse genesis config {}", path.display()))?;
        Ok(config)
    }

    pub fn genesis_state(&self, config: &ChainConfig) -> Result<State> {
        if self.genesis_validators.is_empty() {
            ensure!(self.validator_count > 0, "genesis config has no validators");
            let mut state = State::generate_genesis(config, self.genesis_time, self.validator_count)?;
            if !self.eth1_block_hash.is_zero() {
                state.eth1_data.block_hash = self.eth1_block_hash;
                state.randao_mixes = crate::state::RandaoMixes::repeat_element(self.eth1_block_hash);
            }
            return Ok(state);
        }

        let validators = self
            .genesis_validators
            .iter()
            .map(|pubkey| {
                let bytes = hex::decode(pubkey.trim_start_matches("0x"))
                    .with_context(|| format!("invalid validator pubkey {pubkey}"))?;
                let pubkey = BlsPublicKey::try_from(bytes.as_slice())
                    .with_context(|| format!("validator pubkey {pubkey} is not 48 bytes"))?;
                Ok(Validator::active_at_genesis(pubkey, MAX_EFFECTIVE_BALANCE))
            })
            .collect::<Result<Vec<_>>>()?;

        let eth1_data = Eth1Data {
            deposit_root: Bytes32::zero(),
            deposit_count: validators.len() as u64,
            block_hash: self.eth1_block_hash,
        };

        Ok(State::genesis(config, self.genesis_time, validators, eth1_data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_anonymous_validators_from_count() {
        let genesis: GenesisConfig =
            serde_yaml::from_str("GENESIS_TIME: 1700000000\nVALIDATOR_COUNT: 3\n")
                .expect("valid yaml");

        let state = genesis
            .genesis_state(&ChainConfig::minimal())
            .expect("genesis state");

        assert_eq!(state.genesis_time, 1_700_000_000);
        assert_eq!(state.validators.len_u64(), 3);
    }

    #[test]
    fn builds_validators_from_pubkeys() {
        let pubkey = format!("0x{}", "ab".repeat(48));
        let genesis = GenesisConfig {
            genesis_time: 0,
            validator_count: 0,
            genesis_validators: vec![pubkey.clone(), pubkey],
            eth1_block_hash: Bytes32::from([4; 32]),
        };

        let state = genesis
            .genesis_state(&ChainConfig::minimal())
            .expect("genesis state");

        assert_eq!(state.validators.len_u64(), 2);
        assert_eq!(state.balances.len_u64(), 2);
        assert_eq!(state.eth1_data.block_hash, Bytes32::from([4; 32]));
        assert_eq!(
            state.validators.get(1).expect("validator").pubkey.as_bytes(),
            [0xab; 48].as_slice(),
        );
    }

    #[test]
    fn rejects_short_pubkey() {
        let genesis = GenesisConfig {
            genesis_time: 0,
            validator_count: 0,
            genesis_validators: vec!["abcd".to_owned()],
            eth1_block_hash: Bytes32::zero(),
        };

        assert!(genesis.genesis_state(&ChainConfig::minimal()).is_err());
    }

    #[test]
    fn rejects_empty_registry() {
        let genesis = GenesisConfig {
            genesis_time: 0,
            validator_count: 0,
            genesis_validators: vec![],
            eth1_block_hash: Bytes32::zero(),
        };

        assert!(genesis.genesis_state(&ChainConfig::minimal()).is_err());
    }
}
