//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! This module provides the fundamental building blocks for creating complex
//! decision trees: [`Sequence`] (AND logic), [`Selector`] (OR logic) and
//! [`Parallel`] (threshold logic over all children).

use crate::behavior::reset_all;
use crate::{Behavior, Blackboard, BoxedBehavior, ConfigurationError, Status};

/// Executes child behaviors in order until one fails.
///
/// # Semantics
///
/// A `Sequence` node ticks its children from left to right, starting at the
/// child it stopped at last time:
/// - If a child returns `Failure`, the sequence **stops immediately**, returns
///   `Failure` and starts over from the first child next time
/// - If a child returns `Running`, the sequence returns `Running` and resumes
///   at that same child on the next tick
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success`, the sequence returns `Success`
///
/// This is analogous to a short-circuited logical AND (&&) operation. An empty
/// sequence succeeds.
pub struct Sequence {
    children: Vec<BoxedBehavior>,
    current: usize,
}

impl Sequence {
    /// Creates a new sequence with the given child behaviors.
    pub fn new(children: Vec<BoxedBehavior>) -> Self {
        Self {
            children,
            current: 0,
        }
    }

    /// Index of the child that will be ticked next.
    pub fn current(&self) -> usize {
        self.current
    }
}

impl Behavior for Sequence {
    fn tick(&mut self, blackboard: &mut Blackboard) -> Status {
        while let Some(child) = self.children.get_mut(self.current) {
            match child.tick(blackboard) {
                Status::Success => self.current += 1, // Move to next child
                Status::Failure => {
                    self.current = 0;
                    return Status::Failure; // Short-circuit
                }
                Status::Running => return Status::Running, // Resume here
            }
        }
        // All children succeeded
        self.current = 0;
        Status::Success
    }

    fn reset(&mut self) {
        self.current = 0;
        reset_all(&mut self.children);
    }

    fn kind(&self) -> &str {
        "Sequence"
    }

    fn children(&self) -> &[BoxedBehavior] {
        &self.children
    }
}

/// Executes child behaviors in order until one succeeds.
///
/// # Semantics
///
/// A `Selector` node ticks its children from left to right, starting at the
/// child it stopped at last time:
/// - If a child returns `Success`, the selector **stops immediately** and returns `Success`
/// - If a child returns `Running`, the selector returns `Running` and resumes
///   at that same child on the next tick
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure`
///
/// This is analogous to a short-circuited logical OR (||) operation. An empty
/// selector fails.
pub struct Selector {
    children: Vec<BoxedBehavior>,
    current: usize,
}

impl Selector {
    /// Creates a new selector with the given child behaviors.
    pub fn new(children: Vec<BoxedBehavior>) -> Self {
        Self {
            children,
            current: 0,
        }
    }

    /// Index of the child that will be ticked next.
    pub fn current(&self) -> usize {
        self.current
    }
}

impl Behavior for Selector {
    fn tick(&mut self, blackboard: &mut Blackboard) -> Status {
        while let Some(child) = self.children.get_mut(self.current) {
            match child.tick(blackboard) {
                Status::Success => {
                    self.current = 0;
                    return Status::Success; // Short-circuit
                }
                Status::Failure => self.current += 1, // Try next child
                Status::Running => return Status::Running,
            }
        }
        // All children failed
        self.current = 0;
        Status::Failure
    }

    fn reset(&mut self) {
        self.current = 0;
        reset_all(&mut self.children);
    }

    fn kind(&self) -> &str {
        "Selector"
    }

    fn children(&self) -> &[BoxedBehavior] {
        &self.children
    }
}

/// Ticks every child on every tick and aggregates the results by threshold.
///
/// # Semantics
///
/// All children are ticked exactly once per tick, in order, regardless of what
/// earlier children returned. Only then are the results aggregated:
/// - `successes >= success_threshold` → `Success`
/// - otherwise `failures >= failure_threshold` → `Failure`
/// - otherwise `Running` while any child is still running, else `Failure`
///
/// When the parallel resolves, children that were left `Running` are reset so
/// that the next run starts them fresh.
///
/// This is a *logical* fan-out: children run sequentially within one tick.
pub struct Parallel {
    children: Vec<BoxedBehavior>,
    success_threshold: usize,
    failure_threshold: usize,
    running: Vec<bool>,
}

impl Parallel {
    /// Creates a parallel node with explicit thresholds.
    ///
    /// `failure_threshold` defaults to `children - success_threshold + 1`, the
    /// point at which success becomes unreachable.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a threshold exceeds the child count or is
    /// zero while children exist.
    pub fn new(
        children: Vec<BoxedBehavior>,
        success_threshold: usize,
        failure_threshold: Option<usize>,
    ) -> Result<Self, ConfigurationError> {
        let count = children.len();
        if success_threshold > count || (count > 0 && success_threshold == 0) {
            return Err(ConfigurationError::invalid(
                "Parallel",
                "success_threshold",
                format!("must be between 1 and {count}, got {success_threshold}"),
            ));
        }

        let failure_threshold =
            failure_threshold.unwrap_or_else(|| count.saturating_sub(success_threshold) + 1);
        if failure_threshold == 0 || failure_threshold > count.max(1) {
            return Err(ConfigurationError::invalid(
                "Parallel",
                "failure_threshold",
                format!("must be between 1 and {}, got {failure_threshold}", count.max(1)),
            ));
        }

        Ok(Self {
            running: vec![false; count],
            children,
            success_threshold,
            failure_threshold,
        })
    }

    /// Succeeds only when every child succeeds; fails on the first failure.
    pub fn all(children: Vec<BoxedBehavior>) -> Self {
        let count = children.len();
        Self {
            running: vec![false; count],
            children,
            success_threshold: count,
            failure_threshold: 1,
        }
    }

    /// Succeeds as soon as one child succeeds; fails once every child failed.
    pub fn any(children: Vec<BoxedBehavior>) -> Self {
        let count = children.len();
        Self {
            running: vec![false; count],
            children,
            success_threshold: count.min(1),
            failure_threshold: count.max(1),
        }
    }

    pub fn success_threshold(&self) -> usize {
        self.success_threshold
    }

    pub fn failure_threshold(&self) -> usize {
        self.failure_threshold
    }
}

impl Behavior for Parallel {
    fn tick(&mut self, blackboard: &mut Blackboard) -> Status {
        let mut successes = 0;
        let mut failures = 0;
        let mut any_running = false;

        // Tick everything before looking at the tally
        for (child, running) in self.children.iter_mut().zip(self.running.iter_mut()) {
            let status = child.tick(blackboard);
            *running = status.is_running();
            match status {
                Status::Success => successes += 1,
                Status::Failure => failures += 1,
                Status::Running => any_running = true,
            }
        }

        let status = if successes >= self.success_threshold {
            Status::Success
        } else if failures >= self.failure_threshold {
            Status::Failure
        } else if any_running {
            Status::Running
        } else {
            Status::Failure
        };

        if status.is_done() {
            for (child, running) in self.children.iter_mut().zip(self.running.iter_mut()) {
                if std::mem::take(running) {
                    child.reset();
                }
            }
        }
        status
    }

    fn reset(&mut self) {
        self.running.fill(false);
        reset_all(&mut self.children);
    }

    fn kind(&self) -> &str {
        "Parallel"
    }

    fn children(&self) -> &[BoxedBehavior] {
        &self.children
    }
}
