//! The Fenwick-tree simulator.
//!
//! [`FenwickSimulator`] owns the element vector and runs the full
//! update/query pass over it, recording every index chain it walks. It
//! recomputes everything from scratch whenever the element count or an
//! element value changes. That is deliberate: the interactive use case
//! needs correctness and complete traces, not incremental performance, and
//! the element count is small by construction.

use crate::traversal;
use crate::traversal::IndexChain;

/// Runs the Fenwick-tree algorithms over an element vector and records the
/// visited index chains.
///
/// The element pool is kept at maximum length so values survive resizes;
/// everything else (backing array, prefix sums, both trace tables, the end
/// boundary) is derived from the first `size` elements on every recompute.
#[derive(Clone, Debug)]
pub struct FenwickSimulator {
    /// Current element count.
    size: usize,
    /// Element values, length fixed at the configured maximum.
    elements: Vec<i64>,
    /// Fenwick partial sums; slot 0 is the fixed aggregate slot.
    backing: Vec<i64>,
    /// `prefix[i]` is the sum of elements `0..=i`.
    prefix: Vec<i64>,
    /// Update chain recorded per source element.
    update_trace: Vec<IndexChain>,
    /// Query chain recorded per source element.
    query_trace: Vec<IndexChain>,
    /// Synthetic root of the update tree, see [`traversal::end_boundary`].
    end: usize,
}

impl FenwickSimulator {
    /// Create a simulator over the given element pool and run the first
    /// full pass. `size` must be in `1..=elements.len()`.
    pub fn new(size: usize, elements: Vec<i64>) -> FenwickSimulator {
        debug_assert!(size >= 1 && size <= elements.len());
        let mut simulator = FenwickSimulator {
            size,
            elements,
            backing: Vec::new(),
            prefix: Vec::new(),
            update_trace: Vec::new(),
            query_trace: Vec::new(),
            end: 0,
        };
        simulator.recompute();
        return simulator;
    }

    /// Set the element count and recompute. The caller validates the range.
    pub fn set_size(&mut self, n: usize) {
        debug_assert!(n >= 1 && n <= self.elements.len());
        self.size = n;
        self.recompute();
    }

    /// Set one element value and recompute. The caller validates the index.
    pub fn set_element(&mut self, index: usize, value: i64) {
        debug_assert!(index < self.size);
        self.elements[index] = value;
        self.recompute();
    }

    /// Rebuild all derived state from the current elements.
    ///
    /// For each element in insertion order: walk its update chain, adding
    /// the value into every visited slot that actually exists (slots at or
    /// past `size` are traversed for trace completeness but never written),
    /// then walk its query chain and sum the visited slots. Interleaving
    /// the two passes is safe because an update chain only ever climbs, so
    /// slots at or below `i` are final once element `i` has been added.
    pub fn recompute(&mut self) {
        let n = self.size;
        self.end = traversal::end_boundary(n);
        self.backing = vec![0; n];
        self.prefix = Vec::with_capacity(n);
        self.update_trace = Vec::with_capacity(n);
        self.query_trace = Vec::with_capacity(n);

        for i in 0..n {
            let chain = traversal::successors_from(i, self.end);
            for &slot in chain.iter() {
                if slot < n {
                    self.backing[slot] += self.elements[i];
                }
            }
            self.update_trace.push(chain);

            let chain = traversal::predecessors_from(i);
            let mut sum = 0;
            for &slot in chain.iter() {
                sum += self.backing[slot];
            }
            self.query_trace.push(chain);
            self.prefix.push(sum);
        }
    }

    /// Current element count.
    pub fn size(&self) -> usize {
        return self.size;
    }

    /// The first `size` element values.
    pub fn elements(&self) -> &[i64] {
        return &self.elements[..self.size];
    }

    /// The Fenwick backing array.
    pub fn backing(&self) -> &[i64] {
        return &self.backing;
    }

    /// Prefix sums, one per element.
    pub fn prefix_sums(&self) -> &[i64] {
        return &self.prefix;
    }

    /// Update chains, one per element.
    pub fn update_trace(&self) -> &[IndexChain] {
        return &self.update_trace;
    }

    /// Query chains, one per element.
    pub fn query_trace(&self) -> &[IndexChain] {
        return &self.query_trace;
    }

    /// Synthetic root of the update tree.
    pub fn end_boundary(&self) -> usize {
        return self.end;
    }
}
