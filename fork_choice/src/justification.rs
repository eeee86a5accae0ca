use crate::helpers::{epoch_checkpoint, Chain};
use chain::ChainConfig;
use containers::{AttestationData, Checkpoint, Epoch};
use std::collections::{HashMap, HashSet};

/// Number of attestations voting for each `(source, target)` link.
#[must_use]
pub fn count_links(links: &[AttestationData]) -> HashMap<(Checkpoint, Checkpoint), u64> {
    let mut counts = HashMap::new();
    for data in links {
        *counts.entry((data.source, data.target)).or_insert(0) += 1;
    }
    counts
}

/// Whether more than two thirds of a committee voted from `source` to `target`.
#[must_use]
pub fn is_supermajority_link(
    source: &Checkpoint,
    target: &Checkpoint,
    links: &[AttestationData],
    config: &ChainConfig,
) -> bool {
    let count = links
        .iter()
        .filter(|data| data.source == *source && data.target == *target)
        .count() as u64;

    count > config.supermajority_threshold()
}

/// Sources of every supermajority link, grouped by target.
fn supermajority_sources(
    links: &[AttestationData],
    config: &ChainConfig,
) -> HashMap<Checkpoint, Vec<Checkpoint>> {
    let threshold = config.supermajority_threshold();
    let mut sources: HashMap<Checkpoint, Vec<Checkpoint>> = HashMap::new();

    for ((source, target), count) in count_links(links) {
        if count > threshold {
            sources.entry(target).or_default().push(source);
        }
    }

    sources
}

/// Justification status of every checkpoint in `checkpoints`, most recent epoch first.
///
/// The last entry (epoch 0) is justified by definition. Entry `i` is justified if some later
/// entry `j > i` is justified and has a supermajority link to it. Entries are resolved from the
/// end, looking up only the supermajority sources of each entry.
#[must_use]
pub fn justified_checkpoints(
    checkpoints: &[Checkpoint],
    links: &[AttestationData],
    config: &ChainConfig,
) -> Vec<bool> {
    let Some(last) = checkpoints.len().checked_sub(1) else {
        return Vec::new();
    };

    let sources = supermajority_sources(links, config);
    let mut justified = vec![false; checkpoints.len()];
    let mut justified_later = HashSet::from([checkpoints[last]]);
    justified[last] = true;

    for i in (0..last).rev() {
        let checkpoint = checkpoints[i];
        justified[i] = sources.get(&checkpoint).is_some_and(|sources| {
            sources
                .iter()
                .any(|source| justified_later.contains(source))
        });

        if justified[i] {
            justified_later.insert(checkpoint);
        }
    }

    justified
}

#[must_use]
pub fn is_justified(
    index: usize,
    checkpoints: &[Checkpoint],
    links: &[AttestationData],
    config: &ChainConfig,
) -> bool {
    justified_checkpoints(checkpoints, links, config)
        .get(index)
        .copied()
        .unwrap_or(false)
}

/// Index of the most recent justified checkpoint.
///
/// Falls back to the genesis entry, which is always justified.
#[must_use]
pub fn last_justified(
    checkpoints: &[Checkpoint],
    links: &[AttestationData],
    config: &ChainConfig,
) -> usize {
    let justified = justified_checkpoints(checkpoints, links, config);

    justified
        .iter()
        .position(|is_justified| *is_justified)
        .unwrap_or(checkpoints.len().saturating_sub(1))
}

/// The most recent justified checkpoint on `chain` up to `epoch`.
///
/// Same result as indexing the checkpoint sequence of `chain` with [`last_justified`], but only
/// the checkpoints named by supermajority links are visited, so the cost does not grow with
/// `epoch`.
#[must_use]
pub fn latest_justified_checkpoint(
    chain: &Chain,
    epoch: Epoch,
    links: &[AttestationData],
    config: &ChainConfig,
) -> Checkpoint {
    let genesis = epoch_checkpoint(chain, Epoch(0), config);
    let threshold = config.supermajority_threshold();
    let on_chain = |checkpoint: &Checkpoint| {
        checkpoint.epoch <= epoch && epoch_checkpoint(chain, checkpoint.epoch, config) == *checkpoint
    };

    let mut supermajority = count_links(links)
        .into_iter()
        .filter(|((source, target), count)| *count > threshold && source.epoch < target.epoch)
        .map(|(link, _)| link)
        .filter(|(source, target)| on_chain(source) && on_chain(target))
        .collect::<Vec<_>>();

    // A source is always older than its target, so its status is final once reached.
    supermajority.sort_by_key(|(_, target)| target.epoch);

    let mut justified = HashSet::from([genesis]);
    let mut latest = genesis;

    for (source, target) in supermajority {
        if justified.contains(&source) {
            justified.insert(target);
            if target.epoch > latest.epoch {
                latest = target;
            }
        }
    }

    latest
}
