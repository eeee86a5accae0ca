use chain::ChainConfig;
use containers::{BlockBody, Error, NullEpochProcessor, Slot, State};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

mod common;
use common::{eth1_data, genesis_state, minimal_config};

#[fixture]
fn config() -> ChainConfig {
    minimal_config()
}

fn state_with_votes(config: &ChainConfig, candidate_votes: usize, other_votes: usize) -> State {
    let mut state = genesis_state(config);
    for _ in 0..candidate_votes {
        state.eth1_data_votes.push(eth1_data(1)).expect("capacity");
    }
    for _ in 0..other_votes {
        state.eth1_data_votes.push(eth1_data(2)).expect("capacity");
    }
    state
}

fn body_voting_for(byte: u8) -> BlockBody {
    BlockBody {
        eth1_data: eth1_data(byte),
        ..BlockBody::default()
    }
}

// The minimal voting window is 32 slots, so 17 votes are a strict majority.
#[rstest]
#[case::strict_majority(16, true)]
#[case::exact_half(15, false)]
#[case::first_vote(0, false)]
fn adopts_only_strict_majority(
    config: ChainConfig,
    #[case] previous_votes: usize,
    #[case] adopted: bool,
) {
    let state = state_with_votes(&config, previous_votes, 0);

    let next = state
        .process_eth1_data(&config, &body_voting_for(1))
        .expect("eth1 vote fits");

    assert_eq!(next.eth1_data_votes.len_u64(), previous_votes as u64 + 1);
    assert_eq!(next.eth1_data == eth1_data(1), adopted);
}

#[rstest]
fn other_votes_do_not_count(config: ChainConfig) {
    let state = state_with_votes(&config, 15, 15);

    let next = state
        .process_eth1_data(&config, &body_voting_for(1))
        .expect("eth1 vote fits");

    assert_eq!(next.eth1_data, state.eth1_data);
}

#[rstest]
fn adopted_value_stays_for_later_votes(config: ChainConfig) {
    let state = state_with_votes(&config, 16, 0);

    let adopted = state
        .process_eth1_data(&config, &body_voting_for(1))
        .expect("eth1 vote fits");
    let later = adopted
        .process_eth1_data(&config, &body_voting_for(2))
        .expect("eth1 vote fits");

    assert_eq!(later.eth1_data, eth1_data(1));
}

#[rstest]
fn full_vote_list_is_rejected(config: ChainConfig) {
    let state = state_with_votes(&config, 0, 2048);

    assert_eq!(
        state.process_eth1_data(&config, &body_voting_for(1)),
        Err(Error::ListFull {
            list: "eth1 data votes",
        }),
    );
}

#[rstest]
fn votes_from_an_earlier_period_are_not_counted(config: ChainConfig) {
    let state = state_with_votes(&config, 16, 0)
        .process_slots(&config, &NullEpochProcessor, Slot(40))
        .expect("slot processing succeeds");
    assert_eq!(state.eth1_data_votes.len_u64(), 0);

    let next = state
        .process_eth1_data(&config, &body_voting_for(1))
        .expect("eth1 vote fits");

    assert_eq!(next.eth1_data_votes.len_u64(), 1);
    assert_eq!(next.eth1_data, state.eth1_data);
}
