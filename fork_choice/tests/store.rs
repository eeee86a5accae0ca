use containers::{Root, Slot};
use fork_choice::{get_forkchoice_store, on_block, Error};
use pretty_assertions::assert_eq;

mod common;
use common::{child, genesis_block, linear_store};

#[test]
fn anchor_must_be_genesis() {
    let anchor = child(Root::default(), 4, 1);

    assert_eq!(
        get_forkchoice_store(anchor.clone()).map(|store| store.len()),
        Err(Error::MissingGenesis {
            root: anchor.root(),
            slot: Slot(4),
        }),
    );
}

#[test]
fn store_starts_with_genesis() {
    let store = get_forkchoice_store(genesis_block()).expect("genesis anchor");

    assert_eq!(store.len(), 1);
    assert_eq!(store.genesis_root, genesis_block().root());
    assert!(store.contains(&store.genesis_root));
}

#[test]
fn rejects_block_with_unknown_parent() {
    let (mut store, _) = linear_store(&[1]);
    let orphan = child(Root::from([7; 32]), 5, 2);

    assert_eq!(
        on_block(&mut store, orphan),
        Err(Error::UnknownBlock {
            root: Root::from([7; 32]),
        }),
    );
    assert_eq!(store.len(), 2);
}

#[test]
fn rejects_block_not_newer_than_parent() {
    let (mut store, roots) = linear_store(&[6]);
    let block = child(roots[0], 6, 9);

    assert_eq!(
        on_block(&mut store, block.clone()),
        Err(Error::ParentNotOlder {
            root: block.root(),
            slot: Slot(6),
            parent_slot: Slot(6),
        }),
    );
}

#[test]
fn rejects_second_genesis() {
    let (mut store, _) = linear_store(&[]);
    let other = child(Root::default(), 0, 0x55);

    assert_eq!(
        on_block(&mut store, other.clone()),
        Err(Error::DuplicateGenesis { root: other.root() }),
    );
}

#[test]
fn duplicate_block_is_accepted_once() {
    let (mut store, roots) = linear_store(&[2]);
    let block = child(roots[0], 5, 3);

    let first = on_block(&mut store, block.clone()).expect("new block");
    let second = on_block(&mut store, block).expect("known block");

    assert_eq!(first, second);
    assert_eq!(store.len(), 3);
}

#[test]
fn forks_share_ancestors() {
    let (mut store, roots) = linear_store(&[2]);

    let left = on_block(&mut store, child(roots[0], 3, 10)).expect("left");
    let right = on_block(&mut store, child(roots[0], 4, 11)).expect("right");

    assert_ne!(left, right);
    assert_eq!(store.block(left).map(|block| block.parent_root), Ok(roots[0]));
    assert_eq!(store.block(right).map(|block| block.parent_root), Ok(roots[0]));
}
