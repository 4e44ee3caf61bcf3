//! Fentrace - a Fenwick-tree simulation engine for interactive renderers.
//!
//! Runs the standard Binary Indexed Tree point-update and prefix-sum
//! traversals over a small element vector, records the exact index chains
//! they visit, and folds those chains back into two annotated trees (an
//! update tree and a query tree) with normalized 2-D positions, ready to
//! draw. The crate computes; a presentation layer renders.
//!
//! # Quick Start
//!
//! ```
//! use fentrace::engine::FenwickEngine;
//!
//! let mut engine = FenwickEngine::new();
//!
//! engine.set_size(8)?;
//! engine.set_element(2, 9)?;
//!
//! assert_eq!(engine.prefix_sums()[7], 35);
//! assert_eq!(engine.update_tree().root, engine.end_boundary());
//! # Ok::<(), fentrace::engine::EngineError>(())
//! ```

pub mod engine;
pub mod layout;
pub mod simulate;
pub mod traversal;
