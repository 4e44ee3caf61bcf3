//! The engine facade.
//!
//! [`FenwickEngine`] is the single owned instance a presentation layer
//! talks to. It validates inputs at the boundary, runs the simulator, and
//! keeps both tree graphs and the containment matrix in sync. Every setter
//! is a total rebuild: recompute, then both graphs, then containment. A
//! setter either completes the whole rebuild or returns an error before
//! touching any state.

use log::debug;
use thiserror::Error;

use crate::layout;
use crate::layout::TreeGraph;
use crate::simulate::FenwickSimulator;
use crate::traversal::IndexChain;

/// Default upper bound on the element count.
pub const DEFAULT_MAX_SIZE: usize = 32;

/// Invalid-argument errors signalled at the engine boundary.
///
/// These abort the pending rebuild before any owned state is mutated, so
/// previously valid state stays intact.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The requested element count is outside `1..=max`.
    #[error("element count {n} outside valid range 1..={max}")]
    SizeOutOfRange { n: usize, max: usize },
    /// The element index is outside `0..size`.
    #[error("element index {index} outside valid range 0..{size}")]
    IndexOutOfRange { index: usize, size: usize },
}

/// The Fenwick-tree simulation engine.
///
/// Synchronous and single-threaded: every public operation runs its full
/// rebuild to completion before returning, so no partial state is ever
/// observable.
///
/// ```
/// use fentrace::engine::FenwickEngine;
///
/// let mut engine = FenwickEngine::new();
/// engine.set_size(8)?;
/// assert_eq!(engine.prefix_sums(), &[0, 1, 3, 6, 10, 15, 21, 28]);
/// assert_eq!(engine.query_tree().root, 0);
/// assert_eq!(engine.update_tree().root, 8);
/// # Ok::<(), fentrace::engine::EngineError>(())
/// ```
#[derive(Clone, Debug)]
pub struct FenwickEngine {
    max_size: usize,
    simulator: FenwickSimulator,
    update_tree: TreeGraph,
    query_tree: TreeGraph,
    containment: Vec<Vec<bool>>,
    hovered: Option<usize>,
}

impl FenwickEngine {
    /// Create an engine with the default maximum of 32 elements, starting
    /// at half capacity with each element set to its own index.
    pub fn new() -> FenwickEngine {
        return FenwickEngine::with_max_size(DEFAULT_MAX_SIZE);
    }

    /// Create an engine with a caller-chosen maximum element count.
    pub fn with_max_size(max_size: usize) -> FenwickEngine {
        let max_size = max_size.max(1);
        let size = (max_size / 2).max(1);
        let elements = (0..max_size as i64).collect();
        let simulator = FenwickSimulator::new(size, elements);
        let update_tree =
            TreeGraph::from_trace(simulator.update_trace(), simulator.end_boundary(), size);
        let query_tree = TreeGraph::from_trace(simulator.query_trace(), 0, size);
        let containment = layout::containment(size);
        return FenwickEngine {
            max_size,
            simulator,
            update_tree,
            query_tree,
            containment,
            hovered: None,
        };
    }

    /// Set the element count.
    ///
    /// Triggers a full rebuild and clears the hovered node. Fails with
    /// [`EngineError::SizeOutOfRange`] before mutating anything.
    pub fn set_size(&mut self, n: usize) -> Result<(), EngineError> {
        if n < 1 || n > self.max_size {
            return Err(EngineError::SizeOutOfRange { n, max: self.max_size });
        }
        debug!("resizing to {} elements", n);
        self.simulator.set_size(n);
        self.rebuild();
        return Ok(());
    }

    /// Set one element value.
    ///
    /// Triggers a full rebuild and clears the hovered node. Fails with
    /// [`EngineError::IndexOutOfRange`] before mutating anything.
    pub fn set_element(&mut self, index: usize, value: i64) -> Result<(), EngineError> {
        if index >= self.simulator.size() {
            return Err(EngineError::IndexOutOfRange {
                index,
                size: self.simulator.size(),
            });
        }
        debug!("setting element {} to {}", index, value);
        self.simulator.set_element(index, value);
        self.rebuild();
        return Ok(());
    }

    /// Re-derive both graphs and the containment matrix from the
    /// simulator's freshly recomputed traces.
    fn rebuild(&mut self) {
        let size = self.simulator.size();
        self.update_tree = TreeGraph::from_trace(
            self.simulator.update_trace(),
            self.simulator.end_boundary(),
            size,
        );
        self.query_tree = TreeGraph::from_trace(self.simulator.query_trace(), 0, size);
        self.containment = layout::containment(size);
        self.hovered = None;
    }

    /// Record which node the pointer is over. Render-only: the selector
    /// never feeds back into the computation, and any rebuild clears it.
    pub fn set_hovered(&mut self, node: Option<usize>) {
        self.hovered = node;
    }

    /// The currently hovered node, if any.
    pub fn hovered(&self) -> Option<usize> {
        return self.hovered;
    }

    /// Current element count.
    pub fn size(&self) -> usize {
        return self.simulator.size();
    }

    /// Maximum element count.
    pub fn max_size(&self) -> usize {
        return self.max_size;
    }

    /// Current element values.
    pub fn elements(&self) -> &[i64] {
        return self.simulator.elements();
    }

    /// The Fenwick backing array.
    pub fn backing(&self) -> &[i64] {
        return self.simulator.backing();
    }

    /// Prefix sums, one per element.
    pub fn prefix_sums(&self) -> &[i64] {
        return self.simulator.prefix_sums();
    }

    /// Update chains, one per element.
    pub fn update_trace(&self) -> &[IndexChain] {
        return self.simulator.update_trace();
    }

    /// Query chains, one per element.
    pub fn query_trace(&self) -> &[IndexChain] {
        return self.simulator.query_trace();
    }

    /// Synthetic root of the update tree.
    pub fn end_boundary(&self) -> usize {
        return self.simulator.end_boundary();
    }

    /// The update tree, rooted at the end boundary.
    pub fn update_tree(&self) -> &TreeGraph {
        return &self.update_tree;
    }

    /// The query tree, rooted at 0.
    pub fn query_tree(&self) -> &TreeGraph {
        return &self.query_tree;
    }

    /// The containment matrix: which elements each slot aggregates.
    pub fn containment(&self) -> &[Vec<bool>] {
        return &self.containment;
    }
}

impl Default for FenwickEngine {
    fn default() -> Self {
        return Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let engine = FenwickEngine::new();
        assert_eq!(engine.max_size(), 32);
        assert_eq!(engine.size(), 16);
        assert_eq!(engine.elements()[3], 3);
        assert_eq!(engine.end_boundary(), 16);
        assert_eq!(engine.hovered(), None);
    }

    #[test]
    fn size_out_of_range_is_rejected() {
        let mut engine = FenwickEngine::new();
        assert_eq!(
            engine.set_size(0),
            Err(EngineError::SizeOutOfRange { n: 0, max: 32 })
        );
        assert_eq!(
            engine.set_size(33),
            Err(EngineError::SizeOutOfRange { n: 33, max: 32 })
        );
    }

    #[test]
    fn index_out_of_range_is_rejected() {
        let mut engine = FenwickEngine::new();
        engine.set_size(4).unwrap();
        assert_eq!(
            engine.set_element(4, 1),
            Err(EngineError::IndexOutOfRange { index: 4, size: 4 })
        );
    }

    #[test]
    fn failed_setter_leaves_state_untouched() {
        let mut engine = FenwickEngine::new();
        engine.set_size(8).unwrap();
        engine.set_hovered(Some(3));
        let backing = engine.backing().to_vec();

        assert!(engine.set_size(0).is_err());
        assert!(engine.set_element(100, 1).is_err());

        assert_eq!(engine.size(), 8);
        assert_eq!(engine.backing(), backing.as_slice());
        // Even the hovered node survives a rejected rebuild.
        assert_eq!(engine.hovered(), Some(3));
    }

    #[test]
    fn successful_rebuild_clears_hover() {
        let mut engine = FenwickEngine::new();
        engine.set_hovered(Some(5));
        engine.set_size(8).unwrap();
        assert_eq!(engine.hovered(), None);

        engine.set_hovered(Some(2));
        engine.set_element(0, 7).unwrap();
        assert_eq!(engine.hovered(), None);
    }

    #[test]
    fn set_element_rebuilds_everything() {
        let mut engine = FenwickEngine::new();
        engine.set_size(4).unwrap();
        engine.set_element(2, 9).unwrap();

        assert_eq!(engine.backing(), &[0, 1, 10, 3]);
        assert_eq!(engine.prefix_sums(), &[0, 1, 10, 13]);

        // Containment still matches the new backing array.
        for (i, row) in engine.containment().iter().enumerate() {
            let sum: i64 = row
                .iter()
                .enumerate()
                .filter(|&(_, &contained)| contained)
                .map(|(j, _)| engine.elements()[j])
                .sum();
            assert_eq!(sum, engine.backing()[i]);
        }
    }

    #[test]
    fn trees_track_the_current_size() {
        let mut engine = FenwickEngine::new();
        engine.set_size(6).unwrap();
        assert_eq!(engine.update_tree().root, 8);
        assert_eq!(engine.update_tree().padding, vec![6, 8]);
        assert_eq!(engine.query_tree().nodes.len(), 6);

        engine.set_size(8).unwrap();
        assert_eq!(engine.update_tree().root, 8);
        // Only the synthetic root pads a power-of-two structure.
        assert_eq!(engine.update_tree().padding, vec![8]);
        assert_eq!(engine.update_tree().padding_children, vec![7, 6, 4]);
    }

    #[test]
    fn tiny_capacity_engine() {
        let engine = FenwickEngine::with_max_size(1);
        assert_eq!(engine.size(), 1);
        assert_eq!(engine.query_tree().x[&0], 50.0);
    }
}
