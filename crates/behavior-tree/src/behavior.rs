//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all behavior tree nodes. Composites, decorators and leaves
//! each implement it directly; there is no shared base type beyond the trait.

use std::fmt;

use crate::{Blackboard, Status};

/// Owned, dynamically dispatched behavior node.
pub type BoxedBehavior = Box<dyn Behavior>;

/// A behavior tree node that can be ticked against a blackboard.
///
/// Nodes own their children exclusively and keep whatever progress they need
/// across ticks in ordinary fields. A node must never block: waiting is
/// expressed by returning [`Status::Running`] until the work is done.
pub trait Behavior: Send {
    /// Evaluate this node once.
    ///
    /// # Arguments
    ///
    /// * `blackboard` - Shared memory of the owning tree. Leaves read sensor
    ///   data from it and write their results back.
    ///
    /// # Returns
    ///
    /// - `Status::Success` if the behavior succeeded
    /// - `Status::Failure` if the behavior failed
    /// - `Status::Running` if the behavior needs to be ticked again
    fn tick(&mut self, blackboard: &mut Blackboard) -> Status;

    /// Clear all progress state of this node and its descendants.
    ///
    /// After a reset the node behaves as if it had never been ticked.
    fn reset(&mut self) {}

    /// Node kind identifier (e.g. `"Sequence"`).
    fn kind(&self) -> &str;

    /// Owned children in execution order.
    fn children(&self) -> &[BoxedBehavior] {
        &[]
    }
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior>` to also implement `Behavior`,
/// enabling dynamic dispatch and heterogeneous collections of nodes.
impl Behavior for Box<dyn Behavior> {
    #[inline]
    fn tick(&mut self, blackboard: &mut Blackboard) -> Status {
        (**self).tick(blackboard)
    }

    #[inline]
    fn reset(&mut self) {
        (**self).reset()
    }

    #[inline]
    fn kind(&self) -> &str {
        (**self).kind()
    }

    #[inline]
    fn children(&self) -> &[BoxedBehavior] {
        (**self).children()
    }
}

/// Reset every child in order.
pub(crate) fn reset_all(children: &mut [BoxedBehavior]) {
    for child in children {
        child.reset();
    }
}

impl fmt::Debug for dyn Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.children().is_empty() {
            f.write_str(self.kind())
        } else {
            f.debug_tuple(self.kind())
                .field(&self.children())
                .finish()
        }
    }
}
