use crate::block::hash_tree_root;
use crate::epoch_processing::EpochProcessor;
use crate::{Error, Slot, State};
use chain::ChainConfig;
use tracing::{debug, trace};

impl State {
    /// Caches the roots of the current slot.
    ///
    /// Records the state root, fills in the state root of the latest block header if it is still
    /// unset, then records the root of that header. Does not advance `slot`.
    pub fn process_slot(&self) -> Result<Self, Error> {
        self.slot
            .checked_next()
            .ok_or(Error::SlotOverflow { slot: self.slot })?;

        let validators = self.validators.len_u64();
        let balances = self.balances.len_u64();
        if validators != balances {
            return Err(Error::RegistryLengthMismatch {
                validators,
                balances,
            });
        }

        let mut state = self.clone();
        state.cache_roots();
        Ok(state)
    }

    /// Advances the state to `target_slot`, running epoch processing at the end of every epoch.
    ///
    /// At each epoch end `epoch_processor` runs first, then [`State::process_final_updates`].
    pub fn process_slots(
        &self,
        config: &ChainConfig,
        epoch_processor: &impl EpochProcessor,
        target_slot: Slot,
    ) -> Result<Self, Error> {
        if self.slot >= target_slot {
            return Err(Error::SlotNotLater {
                current: self.slot,
                target: target_slot,
            });
        }

        self.check_registry(config)?;

        let mut state = self.clone();

        while state.slot < target_slot {
            state.cache_roots();

            if state.slot.is_epoch_end(config) {
                debug!(
                    slot = %state.slot,
                    epoch = %state.current_epoch(config),
                    "processing epoch",
                );
                state = epoch_processor.process_epoch(config, &state)?;
                state.check_registry(config)?;
                state = state.process_final_updates(config)?;
            }

            state.slot = state
                .slot
                .checked_next()
                .ok_or(Error::SlotOverflow { slot: state.slot })?;

            trace!(slot = %state.slot, "advanced slot");
        }

        Ok(state)
    }

    fn cache_roots(&mut self) {
        let slot = self.slot.0;

        let previous_state_root = hash_tree_root(self);
        *self.state_roots.mod_index_mut(slot) = previous_state_root;

        if self.latest_block_header.state_root.is_zero() {
            self.latest_block_header.state_root = previous_state_root;
        }

        let previous_block_root = self.latest_block_header.root();
        *self.block_roots.mod_index_mut(slot) = previous_block_root;
    }
}
