//! Bag tests - 7-bag randomizer guarantees

use std::collections::HashSet;

use proptest::prelude::*;

use blockfall::core::Bag;
use blockfall::types::PieceKind;

#[test]
fn test_same_seed_same_sequence() {
    let mut a = Bag::new(42);
    let mut b = Bag::new(42);
    for _ in 0..50 {
        assert_eq!(a.choose(), b.choose());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let a: Vec<_> = {
        let mut bag = Bag::new(1);
        (0..14).map(|_| bag.choose()).collect()
    };
    let b: Vec<_> = {
        let mut bag = Bag::new(2);
        (0..14).map(|_| bag.choose()).collect()
    };
    assert_ne!(a, b);
}

#[test]
fn test_remaining_shrinks_then_refills() {
    let mut bag = Bag::new(7);
    assert_eq!(bag.remaining().len(), 7);
    for expected in (0..7).rev() {
        bag.choose();
        assert_eq!(bag.remaining().len(), expected);
    }
    bag.choose();
    assert_eq!(bag.remaining().len(), 6);
}

#[test]
fn test_preview_crosses_bag_boundary() {
    let mut bag = Bag::new(3);
    for _ in 0..5 {
        bag.choose();
    }
    let preview = bag.preview::<5>();
    let drawn: Vec<_> = (0..5).map(|_| bag.choose()).collect();
    assert_eq!(preview.to_vec(), drawn);
}

proptest! {
    #[test]
    fn aligned_windows_are_permutations(seed in any::<u32>(), bags in 1usize..12) {
        let mut bag = Bag::new(seed);
        for _ in 0..bags {
            let window: HashSet<PieceKind> = (0..7).map(|_| bag.choose()).collect();
            prop_assert_eq!(window.len(), 7);
        }
    }

    #[test]
    fn peek_matches_following_choose(seed in any::<u32>(), draws in 1usize..40) {
        let mut bag = Bag::new(seed);
        for _ in 0..draws {
            let peeked = bag.peek_next();
            prop_assert_eq!(bag.choose(), peeked);
        }
    }
}
