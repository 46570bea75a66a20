//! Generic leaf nodes.
//!
//! Leaves do the actual work of a tree. Game-specific actions live outside this
//! crate and plug in through [`Action`] or their own [`Behavior`] impls; the
//! leaves here only touch the blackboard.

use tracing::debug;

use crate::{Behavior, Blackboard, Param, Predicate, Status};

/// Succeeds when its predicate holds, fails otherwise.
pub struct Condition {
    predicate: Predicate,
}

impl Condition {
    pub fn new(predicate: Predicate) -> Self {
        Self { predicate }
    }
}

impl Behavior for Condition {
    fn tick(&mut self, blackboard: &mut Blackboard) -> Status {
        self.predicate.evaluate(blackboard).into()
    }

    fn kind(&self) -> &str {
        "Condition"
    }
}

/// Writes a value to the blackboard.
///
/// A `Key` parameter copies another entry; if that entry is absent the node
/// fails and the blackboard is left untouched.
pub struct SetValue {
    key: String,
    value: Param,
}

impl SetValue {
    pub fn new(key: impl Into<String>, value: impl Into<Param>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Behavior for SetValue {
    fn tick(&mut self, blackboard: &mut Blackboard) -> Status {
        match self.value.resolve(blackboard) {
            Some(value) => {
                blackboard.set(self.key.clone(), value);
                Status::Success
            }
            None => {
                debug!(
                    target: "behavior_tree::leaf",
                    key = %self.key,
                    source = ?self.value,
                    "source entry missing, nothing written"
                );
                Status::Failure
            }
        }
    }

    fn kind(&self) -> &str {
        "SetValue"
    }
}

/// Returns `Running` for a fixed number of ticks, then `Success`.
pub struct Wait {
    ticks: u32,
    elapsed: u32,
}

impl Wait {
    pub fn new(ticks: u32) -> Self {
        Self { ticks, elapsed: 0 }
    }

    /// Ticks spent waiting in the current run.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }
}

impl Behavior for Wait {
    fn tick(&mut self, _blackboard: &mut Blackboard) -> Status {
        if self.elapsed < self.ticks {
            self.elapsed += 1;
            Status::Running
        } else {
            self.elapsed = 0;
            Status::Success
        }
    }

    fn reset(&mut self) {
        self.elapsed = 0;
    }

    fn kind(&self) -> &str {
        "Wait"
    }
}

/// Always returns the same status.
pub struct Constant {
    status: Status,
}

impl Constant {
    pub fn succeed() -> Self {
        Self {
            status: Status::Success,
        }
    }

    pub fn fail() -> Self {
        Self {
            status: Status::Failure,
        }
    }

    pub fn running() -> Self {
        Self {
            status: Status::Running,
        }
    }
}

impl Behavior for Constant {
    fn tick(&mut self, _blackboard: &mut Blackboard) -> Status {
        self.status
    }

    fn kind(&self) -> &str {
        match self.status {
            Status::Success => "Succeed",
            Status::Failure => "Fail",
            Status::Running => "Running",
        }
    }
}

/// Leaf backed by a closure.
///
/// This is the shape external game actions take when they need no state of
/// their own beyond what the closure captures.
///
/// # Example
///
/// ```
/// use behavior_tree::{Action, Behavior, Blackboard, Status};
///
/// let mut heal = Action::new("Heal", |bb: &mut Blackboard| {
///     let hp = bb.get_int("hp").unwrap_or(0);
///     bb.set("hp", hp + 5);
///     Status::Success
/// });
///
/// let mut bb = Blackboard::new();
/// assert_eq!(heal.tick(&mut bb), Status::Success);
/// assert_eq!(bb.get_int("hp"), Some(5));
/// ```
pub struct Action<F> {
    kind: String,
    run: F,
}

impl<F> Action<F>
where
    F: FnMut(&mut Blackboard) -> Status + Send,
{
    pub fn new(kind: impl Into<String>, run: F) -> Self {
        Self {
            kind: kind.into(),
            run,
        }
    }
}

impl<F> Behavior for Action<F>
where
    F: FnMut(&mut Blackboard) -> Status + Send,
{
    fn tick(&mut self, blackboard: &mut Blackboard) -> Status {
        (self.run)(blackboard)
    }

    fn kind(&self) -> &str {
        &self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CompareOp, Value};

    #[test]
    fn condition_reflects_predicate() {
        let mut cond = Condition::new(Predicate::compare("hp", CompareOp::Le, 3));

        let mut bb: Blackboard = [("hp", 2)].into_iter().collect();
        assert_eq!(cond.tick(&mut bb), Status::Success);
        bb.set("hp", 9);
        assert_eq!(cond.tick(&mut bb), Status::Failure);
        bb.remove("hp");
        assert_eq!(cond.tick(&mut bb), Status::Failure);
    }

    #[test]
    fn set_value_writes_literal_and_copies_key() {
        let mut bb = Blackboard::new();
        assert_eq!(SetValue::new("mode", "patrol").tick(&mut bb), Status::Success);
        assert_eq!(bb.get_str("mode"), Some("patrol"));

        assert_eq!(
            SetValue::new("previous", Param::key("mode")).tick(&mut bb),
            Status::Success
        );
        assert_eq!(bb.get("previous"), Some(&Value::from("patrol")));
    }

    #[test]
    fn set_value_fails_on_missing_source() {
        let mut bb = Blackboard::new();
        assert_eq!(
            SetValue::new("target", Param::key("enemy")).tick(&mut bb),
            Status::Failure
        );
        assert!(bb.is_empty());
    }

    #[test]
    fn wait_runs_for_configured_ticks() {
        let mut wait = Wait::new(2);
        let mut bb = Blackboard::new();
        assert_eq!(wait.tick(&mut bb), Status::Running);
        assert_eq!(wait.tick(&mut bb), Status::Running);
        assert_eq!(wait.tick(&mut bb), Status::Success);
        // Re-enterable after finishing
        assert_eq!(wait.tick(&mut bb), Status::Running);
        wait.reset();
        assert_eq!(wait.elapsed(), 0);
    }

    #[test]
    fn constant_kinds() {
        assert_eq!(Constant::succeed().kind(), "Succeed");
        assert_eq!(Constant::fail().tick(&mut Blackboard::new()), Status::Failure);
        assert_eq!(Constant::running().kind(), "Running");
    }
}
