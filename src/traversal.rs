//! Index chains for Fenwick-tree traversals.
//!
//! A Fenwick tree stores partial sums in an array and navigates it purely
//! through bit arithmetic: a point update climbs by repeatedly adding the
//! lowest set bit of the current index, a prefix query descends by
//! repeatedly clearing it. These two chains are the whole algorithm; the
//! simulator records them verbatim and the layout module rebuilds the two
//! logical trees from them.

use smallvec::SmallVec;

/// A sequence of backing-array indices in visitation order.
///
/// Chains have at most `log2(end) + 1` entries, so they fit inline for any
/// realistic element count.
pub type IndexChain = SmallVec<[usize; 8]>;

/// The synthetic root of the update tree for `n` elements.
///
/// The update chain of every element ends at the same power of two, so the
/// display tree pads out to it. For `n >= 2` this is the smallest power of
/// two `>= n`; a single-element structure has no chain above slot 0.
pub fn end_boundary(n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    return n.next_power_of_two();
}

/// The ascending chain of slots touched by a point update at `i`.
///
/// Slot 0 is the fixed aggregate slot and updates in place, so its chain is
/// just `[0]`. For `i > 0` the chain advances by the lowest set bit until
/// it passes `end`; the final entry is always `end` itself.
pub fn successors_from(i: usize, end: usize) -> IndexChain {
    let mut chain = IndexChain::new();
    if i == 0 {
        chain.push(0);
        return chain;
    }
    let mut i = i;
    while i <= end {
        chain.push(i);
        i += i & i.wrapping_neg();
    }
    return chain;
}

/// The descending chain of slots summed by a prefix query ending at `i`.
///
/// Advances by clearing the lowest set bit until 0 is reached; slot 0 is
/// always the final entry. Unlike the update direction there is no upper
/// bound to check, the chain only descends.
pub fn predecessors_from(i: usize) -> IndexChain {
    let mut chain = IndexChain::new();
    let mut i = i;
    while i > 0 {
        chain.push(i);
        i &= i - 1;
    }
    chain.push(0);
    return chain;
}
