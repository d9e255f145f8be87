//! # Lifepath Core
//!
//! The session side of the lifepath engine. A [`PathNavigator`] walks a shared,
//! read-only [`ChoiceGraph`](lifepath_rules::ChoiceGraph), offering only the
//! successors whose tag gates are open, and supports undoing one step at a time.
//!
//! ## Core Components
//!
//! - **navigator**: The stateful walker, its tag ledger and reachability gate
//! - **choice**: `ChoiceView`, the owned snapshot handed back to callers
//!
//! Each session owns its own navigator; the graph is the only shared piece.

pub mod choice;
pub mod navigator;

pub use choice::*;
pub use navigator::*;
