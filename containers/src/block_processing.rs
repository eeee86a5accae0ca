use crate::block::hash_tree_root;
use crate::epoch_processing::EpochProcessor;
use crate::operations::OperationsProcessor;
use crate::transition::Context;
use crate::verifier::Verifier;
use crate::{Block, BlockBody, BlockHeader, Bytes32, Error, State};
use chain::ChainConfig;
use sha2::{Digest, Sha256};
use tracing::debug;

impl State {
    /// Applies a block to a state that has already been advanced to the block's slot.
    ///
    /// Runs header, RANDAO, eth1 data and operations processing in that order. Any failure
    /// rejects the whole block.
    pub fn process_block<V, O, E>(
        &self,
        context: &Context<'_, V, O, E>,
        block: &Block,
    ) -> Result<Self, Error>
    where
        V: Verifier,
        O: OperationsProcessor,
        E: EpochProcessor,
    {
        let config = context.config;

        let state = self.process_block_header(config, block)?;
        let state = state.process_randao(config, &context.verifier, &block.body)?;
        let state = state.process_eth1_data(config, &block.body)?;
        let state = context
            .operations
            .process_operations(config, &state, &block.body)?;

        debug!(
            slot = %block.slot,
            proposer_index = %block.proposer_index,
            attestations = block.body.attestations.len_u64(),
            "processed block",
        );

        Ok(state)
    }

    pub fn process_block_header(&self, config: &ChainConfig, block: &Block) -> Result<Self, Error> {
        if block.slot != self.slot {
            return Err(Error::SlotMismatch {
                in_state: self.slot,
                in_block: block.slot,
            });
        }

        if block.slot <= self.latest_block_header.slot {
            return Err(Error::BlockNotNewerThanLatestBlockHeader {
                block_slot: block.slot,
                block_header_slot: self.latest_block_header.slot,
            });
        }

        self.check_registry(config)?;

        let proposer = self.validator(block.proposer_index)?;
        if proposer.slashed {
            return Err(Error::ProposerSlashed {
                proposer_index: block.proposer_index,
            });
        }

        let computed = self.latest_block_header.root();
        if block.parent_root != computed {
            return Err(Error::ParentRootMismatch {
                computed,
                in_block: block.parent_root,
            });
        }

        let mut state = self.clone();
        state.latest_block_header = BlockHeader {
            slot: block.slot,
            proposer_index: block.proposer_index,
            parent_root: block.parent_root,
            state_root: Bytes32::zero(),
            body_root: hash_tree_root(&block.body),
        };

        Ok(state)
    }

    /// Mixes the proposer's RANDAO reveal into the mix of the current epoch.
    ///
    /// The reveal must pass `verifier` first.
    pub fn process_randao(
        &self,
        config: &ChainConfig,
        verifier: &impl Verifier,
        body: &BlockBody,
    ) -> Result<Self, Error> {
        let epoch = self.current_epoch(config);
        let proposer_index = self.latest_block_header.proposer_index;
        let proposer = self.validator(proposer_index)?;

        if !verifier.verify_randao_reveal(&proposer.pubkey, epoch, &body.randao_reveal) {
            return Err(Error::RandaoRevealInvalid {
                proposer_index,
                epoch,
            });
        }

        let reveal_hash = Sha256::digest(body.randao_reveal.as_bytes());
        let mut mix = self.get_randao_mix(epoch);
        for (byte, hashed) in mix.0.as_bytes_mut().iter_mut().zip(reveal_hash.iter()) {
            *byte ^= *hashed;
        }

        let mut state = self.clone();
        *state.randao_mixes.mod_index_mut(epoch.0) = mix;

        Ok(state)
    }

    /// Records the eth1 vote of the block and adopts it once it holds a strict majority of the
    /// voting period.
    pub fn process_eth1_data(&self, config: &ChainConfig, body: &BlockBody) -> Result<Self, Error> {
        let mut state = self.clone();

        state
            .eth1_data_votes
            .push(body.eth1_data)
            .map_err(|_| Error::ListFull {
                list: "eth1 data votes",
            })?;

        let vote_count = (&state.eth1_data_votes)
            .into_iter()
            .filter(|vote| **vote == body.eth1_data)
            .count() as u64;

        if vote_count * 2 > config.slots_per_eth1_voting_period() {
            debug!(
                deposit_count = body.eth1_data.deposit_count,
                block_hash = %body.eth1_data.block_hash,
                vote_count,
                "adopting eth1 data",
            );
            state.eth1_data = body.eth1_data;
        }

        Ok(state)
    }
}
