use crate::block::hash_tree_root;
use crate::epoch_processing::{EpochProcessor, NullEpochProcessor};
use crate::operations::{AttestationRecorder, OperationsProcessor};
use crate::verifier::{NullVerifier, Verifier};
use crate::{Block, BlockBody, Bytes32, Error, Slot, State, ValidatorIndex};
use chain::ChainConfig;
use tracing::{debug, warn};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum StateRootPolicy {
    #[default]
    Verify,
    Trust,
}

/// Configuration and collaborators shared by every stage of a state transition.
#[derive(Clone, Copy, Debug)]
pub struct Context<'config, V, O, E> {
    pub config: &'config ChainConfig,
    pub verifier: V,
    pub operations: O,
    pub epoch_processor: E,
}

impl<'config> Context<'config, NullVerifier, AttestationRecorder, NullEpochProcessor> {
    #[must_use]
    pub const fn new(config: &'config ChainConfig) -> Self {
        Self {
            config,
            verifier: NullVerifier,
            operations: AttestationRecorder,
            epoch_processor: NullEpochProcessor,
        }
    }
}

impl<'config, V, O, E> Context<'config, V, O, E> {
    #[must_use]
    pub fn with_verifier<V2: Verifier>(self, verifier: V2) -> Context<'config, V2, O, E> {
        Context {
            config: self.config,
            verifier,
            operations: self.operations,
            epoch_processor: self.epoch_processor,
        }
    }

    #[must_use]
    pub fn with_operations<O2: OperationsProcessor>(
        self,
        operations: O2,
    ) -> Context<'config, V, O2, E> {
        Context {
            config: self.config,
            verifier: self.verifier,
            operations,
            epoch_processor: self.epoch_processor,
        }
    }

    #[must_use]
    pub fn with_epoch_processor<E2: EpochProcessor>(
        self,
        epoch_processor: E2,
    ) -> Context<'config, V, O, E2> {
        Context {
            config: self.config,
            verifier: self.verifier,
            operations: self.operations,
            epoch_processor,
        }
    }
}

impl State {
    /// Advances the state to the slot of `block` and applies it.
    ///
    /// Either the full post-state is returned or the block is rejected; `self` is never
    /// modified.
    pub fn state_transition<V, O, E>(
        &self,
        context: &Context<'_, V, O, E>,
        block: &Block,
        policy: StateRootPolicy,
    ) -> Result<Self, Error>
    where
        V: Verifier,
        O: OperationsProcessor,
        E: EpochProcessor,
    {
        self.try_state_transition(context, block, policy)
            .inspect_err(|error| {
                warn!(
                    slot = %block.slot,
                    state_slot = %self.slot,
                    %error,
                    "rejected block",
                );
            })
    }

    fn try_state_transition<V, O, E>(
        &self,
        context: &Context<'_, V, O, E>,
        block: &Block,
        policy: StateRootPolicy,
    ) -> Result<Self, Error>
    where
        V: Verifier,
        O: OperationsProcessor,
        E: EpochProcessor,
    {
        let config = context.config;

        let state = self.process_slots(config, &context.epoch_processor, block.slot)?;

        let epoch = state.current_epoch(config);
        if state.active_validator_count(epoch) == 0 {
            return Err(Error::NoActiveValidators { epoch });
        }

        let state = state.process_block(context, block)?;

        if policy == StateRootPolicy::Verify {
            let computed = hash_tree_root(&state);
            if block.state_root != computed {
                return Err(Error::StateRootMismatch {
                    computed,
                    in_block: block.state_root,
                });
            }
        }

        debug!(
            slot = %block.slot,
            block_root = %block.root(),
            "state transition complete",
        );

        Ok(state)
    }

    /// Builds a block for `slot` on top of this state with a correct parent and state root.
    pub fn build_block<V, O, E>(
        &self,
        context: &Context<'_, V, O, E>,
        slot: Slot,
        proposer_index: ValidatorIndex,
        body: BlockBody,
    ) -> Result<Block, Error>
    where
        V: Verifier,
        O: OperationsProcessor,
        E: EpochProcessor,
    {
        let pre_state = self.process_slots(context.config, &context.epoch_processor, slot)?;

        let mut block = Block {
            slot,
            proposer_index,
            parent_root: pre_state.latest_block_header.root(),
            state_root: Bytes32::zero(),
            body,
        };

        let post_state = pre_state.process_block(context, &block)?;
        block.state_root = hash_tree_root(&post_state);

        Ok(block)
    }
}
