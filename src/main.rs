use std::path::PathBuf;

use anyhow::{anyhow, ensure, Context as _, Result};
use chain::ChainConfig;
use clap::Parser;
use containers::ssz::BitList;
use containers::{
    hash_tree_root, Attestation, AttestationData, Block, BlockBody, Checkpoint, Context, Epoch,
    GenesisConfig, NullEpochProcessor, Root, Slot, State, StateRootPolicy, ValidatorIndex,
};
use fork_choice::{
    chain_roots, epoch_checkpoint, get_forkchoice_store, is_valid_attestation,
    latest_justified_checkpoint, on_block, Store,
};
use tracing::info;

#[derive(Parser, Debug)]
struct Args {
    /// Number of genesis validators, ignored when a genesis file is given
    #[arg(short, long, default_value_t = 64)]
    validators: u64,

    /// Number of slots to advance past genesis
    #[arg(short, long, default_value_t = 64)]
    slots: u64,

    /// YAML chain configuration, defaults to mainnet values
    #[arg(long)]
    chain_config: Option<PathBuf>,

    /// YAML genesis description
    #[arg(long)]
    genesis: Option<PathBuf>,

    /// Use the minimal preset instead of mainnet
    #[arg(long, conflicts_with = "chain_config")]
    minimal: bool,

    /// Propose a block in every slot, each carrying a full-committee vote for its parent
    #[arg(long)]
    blocks: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match &args.chain_config {
        Some(path) => ChainConfig::load_from_file(path)?,
        None if args.minimal => ChainConfig::minimal(),
        None => ChainConfig::mainnet(),
    };
    config.validate().context("invalid chain configuration")?;

    let genesis = match &args.genesis {
        Some(path) => GenesisConfig::load_from_file(path)?.genesis_state(&config)?,
        None => {
            ensure!(args.validators > 0, "at least one validator is required");
            State::generate_genesis(&config, 0, args.validators)?
        }
    };

    info!(
        validators = genesis.validators.len_u64(),
        state_root = %hash_tree_root(&genesis),
        "built genesis state",
    );

    let target = Slot(args.slots);
    let state = if args.blocks {
        let (state, justified) = run_with_blocks(&config, genesis, target)?;
        info!(%justified, "latest justified checkpoint");
        state
    } else {
        run_empty_slots(&config, genesis, target)?
    };

    info!(
        slot = %state.slot,
        epoch = %state.current_epoch(&config),
        state_root = %hash_tree_root(&state),
        "done",
    );

    Ok(())
}

fn run_empty_slots(config: &ChainConfig, genesis: State, target: Slot) -> Result<State> {
    let mut state = genesis;

    while state.slot < target {
        let epoch_end = state
            .current_epoch(config)
            .next()
            .start_slot(config)
            .context("epoch start slot overflows")?;
        let next = epoch_end.min(target);

        state = state.process_slots(config, &NullEpochProcessor, next)?;
        info!(
            slot = %state.slot,
            state_root = %hash_tree_root(&state),
            "reached epoch boundary",
        );
    }

    Ok(state)
}

fn run_with_blocks(
    config: &ChainConfig,
    genesis: State,
    target: Slot,
) -> Result<(State, Checkpoint)> {
    let context = Context::new(config);
    let mut store = get_forkchoice_store(Block::genesis_for(&genesis))?;
    let mut head = store.genesis_root;
    let mut state = genesis;
    let mut links = Vec::new();
    let validator_count = state.validators.len_u64();
    ensure!(validator_count > 0, "proposing blocks requires at least one validator");
    let committee_size = validator_count.min(config.max_validators_per_committee);

    for slot in 1..=target.0 {
        let vote = head_vote(&store, head, Slot(slot - 1), &links, config)?;

        let mut body = BlockBody::default();
        body.attestations
            .push(Attestation {
                aggregation_bits: BitList::new(true, usize::try_from(committee_size)?),
                data: vote,
                signature: Default::default(),
            })
            .map_err(|_| anyhow!("block attestation list is full"))?;

        let proposer_index = ValidatorIndex(slot % validator_count);
        let block = state.build_block(&context, Slot(slot), proposer_index, body)?;
        state = state.state_transition(&context, &block, StateRootPolicy::Verify)?;
        head = on_block(&mut store, block)?;
        links.push(vote);

        if Slot(slot).is_epoch_end(config) {
            info!(
                slot,
                block_root = %head,
                state_root = %hash_tree_root(&state),
                justified = %vote.source,
                "epoch boundary block",
            );
        }
    }

    let chain = chain_roots(&store, head)?;
    let justified =
        latest_justified_checkpoint(&chain, state.current_epoch(config), &links, config);

    info!(
        blocks = store.len(),
        chain_length = chain.len(),
        votes = links.len(),
        "block tree built",
    );

    Ok((state, justified))
}

/// Attestation data for `head` at `slot`, sourced from the latest checkpoint justified by `links`.
fn head_vote(
    store: &Store,
    head: Root,
    slot: Slot,
    links: &[AttestationData],
    config: &ChainConfig,
) -> Result<AttestationData> {
    let chain = chain_roots(store, head)?;
    let epoch = slot.epoch(config);

    let vote = AttestationData {
        slot,
        index: 0,
        beacon_block_root: head,
        source: latest_justified_checkpoint(&chain, epoch, links, config),
        target: epoch_checkpoint(&chain, epoch, config),
    };

    ensure!(
        is_valid_attestation(store, &vote, links, config),
        "vote for {head} at slot {slot} is not valid",
    );

    Ok(vote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn recorded_votes_justify_epoch_boundaries() {
        let config = ChainConfig {
            max_validators_per_committee: 1,
            ..ChainConfig::minimal()
        };
        let genesis = State::generate_genesis(&config, 0, 4).expect("genesis");

        let (state, justified) =
            run_with_blocks(&config, genesis, Slot(24)).expect("every block applies");

        assert_eq!(state.slot, Slot(24));
        assert_eq!(justified.epoch, Epoch(2));
        assert_eq!(justified.root, *state.block_roots.mod_index(16));
    }

    #[test]
    fn committee_too_small_for_a_supermajority_keeps_genesis() {
        let config = ChainConfig::minimal();
        let genesis = State::generate_genesis(&config, 0, 4).expect("genesis");
        let genesis_root = Block::genesis_for(&genesis).root();

        let (_, justified) =
            run_with_blocks(&config, genesis, Slot(20)).expect("every block applies");

        assert_eq!(justified, Checkpoint::new(Epoch(0), genesis_root));
    }
}
