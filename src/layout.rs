//! Tree reconstruction and 2-D layout.
//!
//! The simulator only records flat index chains; this module folds them
//! back into the two logical trees and assigns every node a normalized
//! position a renderer can place directly. Key design decisions:
//!
//! 1. **Trace pairs are edges**: in any chain, `visited[j - 1]` is a child
//!    of `visited[j]`. Scanning every chain once recovers the whole tree.
//!
//! 2. **Leaf-count spacing**: the horizontal rank of a node is the number
//!    of leaves in earlier sibling subtrees, not the node count. Subtrees
//!    get width proportional to how many leaves they must fit.
//!
//! 3. **Padding nodes are precomputed**: nodes at or past the element
//!    count exist only to complete the update tree's power-of-two shape.
//!    They are split out into their own lists so the renderer can style
//!    them without an existence check per node.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::traversal::IndexChain;

/// Horizontal margin, in percent, kept clear on both sides.
pub const GUARD_X: f64 = 4.0;

/// Vertical margin, in percent, kept clear on both sides.
pub const GUARD_Y: f64 = 8.0;

/// One logical tree reconstructed from a trace table, with everything a
/// renderer needs: adjacency, depth, lateral rank, and normalized
/// coordinates in `[0, 100]` percent.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TreeGraph {
    /// The declared root; always its own parent.
    pub root: usize,
    /// Every node in the tree, ascending.
    pub nodes: Vec<usize>,
    /// Child index to parent index; the root maps to itself.
    pub parent: FxHashMap<usize, usize>,
    /// Parent index to ordered child list. Ascending for the query tree,
    /// descending for the update tree; this is the left-to-right render
    /// order.
    pub children: FxHashMap<usize, Vec<usize>>,
    /// Distance from the root, root at 0.
    pub depth: FxHashMap<usize, usize>,
    /// Leaves visited in earlier sibling subtrees, pre-order.
    pub lateral: FxHashMap<usize, usize>,
    /// Horizontal position in percent, within `[GUARD_X, 100 - GUARD_X]`.
    pub x: FxHashMap<usize, f64>,
    /// Vertical position in percent, within `[GUARD_Y, 100 - GUARD_Y]`.
    pub y: FxHashMap<usize, f64>,
    /// Nodes at or past the element count, ascending. Only the update tree
    /// has any.
    pub padding: Vec<usize>,
    /// The immediate children of each padding node, in padding order.
    pub padding_children: Vec<usize>,
}

impl TreeGraph {
    /// Reconstruct the tree for a trace table rooted at `root`, for a
    /// structure of `n` elements.
    ///
    /// The source element equal to the root is skipped; in particular the
    /// update tree never contains node 0, whose single-entry chain `[0]`
    /// contributes no edge.
    pub fn from_trace(trace: &[IndexChain], root: usize, n: usize) -> TreeGraph {
        let mut parent = FxHashMap::default();
        let mut children: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
        parent.insert(root, root);
        children.entry(root).or_default();

        for (i, chain) in trace.iter().enumerate().take(n) {
            if i == root {
                continue;
            }
            for j in 1..chain.len() {
                children.entry(chain[j]).or_default().push(chain[j - 1]);
                parent.insert(chain[j - 1], chain[j]);
            }
        }

        // Child order controls left-to-right rendering: ascending for the
        // query tree, descending for the update tree.
        for list in children.values_mut() {
            if root == 0 {
                list.sort_unstable();
            } else {
                list.sort_unstable_by(|a, b| b.cmp(a));
            }
            list.dedup();
        }

        let mut nodes: Vec<usize> = parent.keys().copied().collect();
        nodes.sort_unstable();

        let mut depth = FxHashMap::default();
        let mut lateral = FxHashMap::default();
        leaves_dfs(root, 0, 0, &children, &mut depth, &mut lateral);

        let max_lat = lateral.values().copied().max().unwrap_or(0);
        let max_depth = depth.values().copied().max().unwrap_or(0);

        let mut x = FxHashMap::default();
        let mut y = FxHashMap::default();
        for &node in nodes.iter() {
            // A single-column tree sits in the middle; a single-level tree
            // sits at the top guard. Both guards avoid dividing by zero.
            let nx = if max_lat == 0 {
                50.0
            } else {
                lateral[&node] as f64 * (100.0 - 2.0 * GUARD_X) / max_lat as f64 + GUARD_X
            };
            let ny = if max_depth == 0 {
                GUARD_Y
            } else {
                depth[&node] as f64 * (100.0 - 2.0 * GUARD_Y) / max_depth as f64 + GUARD_Y
            };
            x.insert(node, nx);
            y.insert(node, ny);
        }

        let padding: Vec<usize> = nodes.iter().copied().filter(|&node| node >= n).collect();
        let mut padding_children = Vec::new();
        for &node in padding.iter() {
            if let Some(list) = children.get(&node) {
                padding_children.extend_from_slice(list);
            }
        }

        return TreeGraph {
            root,
            nodes,
            parent,
            children,
            depth,
            lateral,
            x,
            y,
            padding,
            padding_children,
        };
    }

    /// The ordered children of a node; empty for leaves.
    pub fn children_of(&self, node: usize) -> &[usize] {
        return self.children.get(&node).map(Vec::as_slice).unwrap_or(&[]);
    }
}

/// Depth-first assignment of depth and lateral rank.
///
/// Returns the number of leaves in the subtree under `node`. A node's
/// lateral rank is its parent's rank plus the leaves already placed in
/// earlier siblings, so leaves land in distinct columns and interior nodes
/// share the column of their leftmost leaf.
fn leaves_dfs(
    node: usize,
    depth: usize,
    lat: usize,
    children: &FxHashMap<usize, Vec<usize>>,
    depth_map: &mut FxHashMap<usize, usize>,
    lat_map: &mut FxHashMap<usize, usize>,
) -> usize {
    depth_map.insert(node, depth);
    lat_map.insert(node, lat);

    let kids = match children.get(&node) {
        Some(kids) if !kids.is_empty() => kids,
        _ => return 1,
    };

    let mut leaves_below = 0;
    for &child in kids.iter() {
        leaves_below += leaves_dfs(child, depth + 1, lat + leaves_below, children, depth_map, lat_map);
    }
    return leaves_below;
}

/// The containment matrix: `matrix[i][j]` is true when slot `i`'s partial
/// sum currently folds in element `j`.
///
/// Slot 0 contains exactly element 0; slot `i > 0` contains the elements
/// in `(i & (i - 1), i]`.
pub fn containment(n: usize) -> Vec<Vec<bool>> {
    let mut matrix = vec![vec![false; n]; n];
    for i in 0..n {
        let floor = i & i.wrapping_sub(1);
        let mut j = i;
        while j > floor {
            matrix[i][j] = true;
            j -= 1;
        }
    }
    matrix[0][0] = true;
    return matrix;
}
