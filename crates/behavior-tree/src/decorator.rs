//! Decorator behavior nodes.
//!
//! Decorators wrap a single child behavior and modify its result or execution.
//! This module provides [`Inverter`] (NOT logic), [`AlwaysSucceed`] and
//! [`AlwaysFail`] (result forcing), [`Repeater`] and [`RepeatUntil`]
//! (looping), and [`Guard`] (blackboard precondition).

use crate::{Behavior, Blackboard, BoxedBehavior, Predicate, Status};

/// Inverts the result of its child behavior.
///
/// # Semantics
///
/// - If the child returns `Success`, the inverter returns `Failure`
/// - If the child returns `Failure`, the inverter returns `Success`
/// - `Running` passes through unchanged
///
/// This is analogous to a logical NOT (!) operation.
pub struct Inverter {
    child: BoxedBehavior,
}

impl Inverter {
    /// Creates a new inverter that wraps the given child behavior.
    pub fn new(child: BoxedBehavior) -> Self {
        Self { child }
    }
}

impl Behavior for Inverter {
    fn tick(&mut self, blackboard: &mut Blackboard) -> Status {
        self.child.tick(blackboard).invert()
    }

    fn reset(&mut self) {
        self.child.reset();
    }

    fn kind(&self) -> &str {
        "Inverter"
    }

    fn children(&self) -> &[BoxedBehavior] {
        std::slice::from_ref(&self.child)
    }
}

/// Returns `Success` once the child finishes, regardless of its result.
///
/// # Semantics
///
/// - If the child returns `Success`, returns `Success`
/// - If the child returns `Failure`, **still returns `Success`**
/// - `Running` passes through unchanged
///
/// This is useful for:
/// - Optional behaviors that shouldn't cause a sequence to fail
/// - Logging/debugging nodes that observe state without affecting control flow
pub struct AlwaysSucceed {
    child: BoxedBehavior,
}

impl AlwaysSucceed {
    /// Creates a new always-succeed wrapper around the given child behavior.
    pub fn new(child: BoxedBehavior) -> Self {
        Self { child }
    }
}

impl Behavior for AlwaysSucceed {
    fn tick(&mut self, blackboard: &mut Blackboard) -> Status {
        match self.child.tick(blackboard) {
            Status::Running => Status::Running,
            _ => Status::Success,
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }

    fn kind(&self) -> &str {
        "AlwaysSucceed"
    }

    fn children(&self) -> &[BoxedBehavior] {
        std::slice::from_ref(&self.child)
    }
}

/// Returns `Failure` once the child finishes, regardless of its result.
///
/// Mirror image of [`AlwaysSucceed`]; lets a selector try the next branch even
/// after this one did something.
pub struct AlwaysFail {
    child: BoxedBehavior,
}

impl AlwaysFail {
    pub fn new(child: BoxedBehavior) -> Self {
        Self { child }
    }
}

impl Behavior for AlwaysFail {
    fn tick(&mut self, blackboard: &mut Blackboard) -> Status {
        match self.child.tick(blackboard) {
            Status::Running => Status::Running,
            _ => Status::Failure,
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }

    fn kind(&self) -> &str {
        "AlwaysFail"
    }

    fn children(&self) -> &[BoxedBehavior] {
        std::slice::from_ref(&self.child)
    }
}

/// How a [`Repeater`] treats a failing child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FailurePolicy {
    /// Stop repeating and fail.
    Fail,
    /// Count the failed run as a completed repetition.
    Ignore,
}

/// Re-runs its child a fixed number of times, or forever.
///
/// # Semantics
///
/// The child is ticked once per repeater tick:
/// - Child `Running` → `Running`
/// - Child finished → the repetition counter advances; `Success` once the
///   configured count is reached, `Running` while repetitions remain
/// - Child `Failure` under [`FailurePolicy::Fail`] → `Failure`
///
/// A count of zero succeeds without ticking the child. Without a count the
/// repeater never succeeds.
pub struct Repeater {
    child: BoxedBehavior,
    limit: Option<u32>,
    on_failure: FailurePolicy,
    completed: u32,
}

impl Repeater {
    /// Repeats `count` times.
    pub fn times(child: BoxedBehavior, count: u32, on_failure: FailurePolicy) -> Self {
        Self {
            child,
            limit: Some(count),
            on_failure,
            completed: 0,
        }
    }

    /// Repeats until the child fails (under [`FailurePolicy::Fail`]) or forever.
    pub fn forever(child: BoxedBehavior, on_failure: FailurePolicy) -> Self {
        Self {
            child,
            limit: None,
            on_failure,
            completed: 0,
        }
    }

    /// Repetitions completed in the current run.
    pub fn completed(&self) -> u32 {
        self.completed
    }
}

impl Behavior for Repeater {
    fn tick(&mut self, blackboard: &mut Blackboard) -> Status {
        if let Some(limit) = self.limit
            && self.completed >= limit
        {
            self.completed = 0;
            return Status::Success;
        }

        match self.child.tick(blackboard) {
            Status::Running => Status::Running,
            Status::Failure if self.on_failure == FailurePolicy::Fail => {
                self.completed = 0;
                Status::Failure
            }
            _ => {
                self.completed = self.completed.saturating_add(1);
                match self.limit {
                    Some(limit) if self.completed >= limit => {
                        self.completed = 0;
                        Status::Success
                    }
                    _ => Status::Running,
                }
            }
        }
    }

    fn reset(&mut self) {
        self.completed = 0;
        self.child.reset();
    }

    fn kind(&self) -> &str {
        "Repeater"
    }

    fn children(&self) -> &[BoxedBehavior] {
        std::slice::from_ref(&self.child)
    }
}

/// The child result a [`RepeatUntil`] waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RepeatTarget {
    Success,
    Failure,
}

impl RepeatTarget {
    fn matches(self, status: Status) -> bool {
        match self {
            RepeatTarget::Success => status.is_success(),
            RepeatTarget::Failure => status.is_failure(),
        }
    }
}

/// Retries its child until it produces the target result.
///
/// # Semantics
///
/// - Child returns the target → `Success`
/// - Child returns the other result → `Running` (retry next tick), or
///   `Failure` once `max_attempts` attempts have been used
/// - Child `Running` → `Running`
pub struct RepeatUntil {
    child: BoxedBehavior,
    target: RepeatTarget,
    max_attempts: Option<u32>,
    attempts: u32,
}

impl RepeatUntil {
    pub fn new(child: BoxedBehavior, target: RepeatTarget, max_attempts: Option<u32>) -> Self {
        Self {
            child,
            target,
            max_attempts,
            attempts: 0,
        }
    }
}

impl Behavior for RepeatUntil {
    fn tick(&mut self, blackboard: &mut Blackboard) -> Status {
        let status = self.child.tick(blackboard);
        if status.is_running() {
            return Status::Running;
        }
        if self.target.matches(status) {
            self.attempts = 0;
            return Status::Success;
        }

        self.attempts = self.attempts.saturating_add(1);
        match self.max_attempts {
            Some(max) if self.attempts >= max => {
                self.attempts = 0;
                Status::Failure
            }
            _ => Status::Running,
        }
    }

    fn reset(&mut self) {
        self.attempts = 0;
        self.child.reset();
    }

    fn kind(&self) -> &str {
        "RepeatUntil"
    }

    fn children(&self) -> &[BoxedBehavior] {
        std::slice::from_ref(&self.child)
    }
}

/// Ticks its child only while a blackboard predicate holds.
///
/// # Semantics
///
/// - Predicate false → `Failure`, the child is **not** ticked and its state is
///   left as it was
/// - Predicate true → the child's result
///
/// If the child was `Running` when the guard closed, it is reset the next time
/// the guard lets it run, so it never resumes stale progress.
pub struct Guard {
    predicate: Predicate,
    child: BoxedBehavior,
    child_running: bool,
    stale: bool,
}

impl Guard {
    pub fn new(predicate: Predicate, child: BoxedBehavior) -> Self {
        Self {
            predicate,
            child,
            child_running: false,
            stale: false,
        }
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

impl Behavior for Guard {
    fn tick(&mut self, blackboard: &mut Blackboard) -> Status {
        if !self.predicate.evaluate(blackboard) {
            if std::mem::take(&mut self.child_running) {
                self.stale = true;
            }
            return Status::Failure;
        }

        if std::mem::take(&mut self.stale) {
            self.child.reset();
        }
        let status = self.child.tick(blackboard);
        self.child_running = status.is_running();
        status
    }

    fn reset(&mut self) {
        self.child_running = false;
        self.stale = false;
        self.child.reset();
    }

    fn kind(&self) -> &str {
        "Guard"
    }

    fn children(&self) -> &[BoxedBehavior] {
        std::slice::from_ref(&self.child)
    }
}
