//! Builder utilities for constructing trees in code.
//!
//! Trees normally come from a [`NodeConf`](crate::NodeConf) through the
//! factory registry. These helpers cover tests and game code that wire small
//! trees by hand: instead of writing `Box::new(Sequence::new(vec![...]))`, use
//! `sequence(vec![...])`.

use crate::{
    AlwaysFail, AlwaysSucceed, BoxedBehavior, Condition, Constant, FailurePolicy, Guard, Inverter,
    Parallel, Param, Predicate, RepeatTarget, RepeatUntil, Repeater, Selector, Sequence, SetValue,
    Wait,
};

/// Creates a sequence node.
#[inline]
pub fn sequence(children: Vec<BoxedBehavior>) -> BoxedBehavior {
    Box::new(Sequence::new(children))
}

/// Creates a selector node.
#[inline]
pub fn selector(children: Vec<BoxedBehavior>) -> BoxedBehavior {
    Box::new(Selector::new(children))
}

/// Creates a parallel node that needs every child to succeed.
#[inline]
pub fn parallel_all(children: Vec<BoxedBehavior>) -> BoxedBehavior {
    Box::new(Parallel::all(children))
}

/// Creates a parallel node that needs one child to succeed.
#[inline]
pub fn parallel_any(children: Vec<BoxedBehavior>) -> BoxedBehavior {
    Box::new(Parallel::any(children))
}

#[inline]
pub fn inverter(child: BoxedBehavior) -> BoxedBehavior {
    Box::new(Inverter::new(child))
}

#[inline]
pub fn always_succeed(child: BoxedBehavior) -> BoxedBehavior {
    Box::new(AlwaysSucceed::new(child))
}

#[inline]
pub fn always_fail(child: BoxedBehavior) -> BoxedBehavior {
    Box::new(AlwaysFail::new(child))
}

/// Repeats `child` `count` times, stopping at the first failure.
#[inline]
pub fn repeat(count: u32, child: BoxedBehavior) -> BoxedBehavior {
    Box::new(Repeater::times(child, count, FailurePolicy::Fail))
}

/// Retries `child` until it succeeds.
#[inline]
pub fn retry_until_success(child: BoxedBehavior) -> BoxedBehavior {
    Box::new(RepeatUntil::new(child, RepeatTarget::Success, None))
}

#[inline]
pub fn guard(predicate: Predicate, child: BoxedBehavior) -> BoxedBehavior {
    Box::new(Guard::new(predicate, child))
}

#[inline]
pub fn condition(predicate: Predicate) -> BoxedBehavior {
    Box::new(Condition::new(predicate))
}

#[inline]
pub fn set_value(key: impl Into<String>, value: impl Into<Param>) -> BoxedBehavior {
    Box::new(SetValue::new(key, value))
}

#[inline]
pub fn wait(ticks: u32) -> BoxedBehavior {
    Box::new(Wait::new(ticks))
}

#[inline]
pub fn succeed() -> BoxedBehavior {
    Box::new(Constant::succeed())
}

#[inline]
pub fn fail() -> BoxedBehavior {
    Box::new(Constant::fail())
}

#[inline]
pub fn running() -> BoxedBehavior {
    Box::new(Constant::running())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Behavior, Blackboard, CompareOp, Status};

    #[test]
    fn hand_wired_tree_matches_built_semantics() {
        let mut root = selector(vec![
            guard(
                Predicate::compare("hp", CompareOp::Lt, 3),
                set_value("mode", "flee"),
            ),
            sequence(vec![
                set_value("mode", "patrol"),
                wait(1),
                repeat(2, always_succeed(fail())),
            ]),
        ]);

        let mut bb: Blackboard = [("hp", 10)].into_iter().collect();
        assert_eq!(root.tick(&mut bb), Status::Running);
        assert_eq!(bb.get_str("mode"), Some("patrol"));
        assert_eq!(root.tick(&mut bb), Status::Running);
        assert_eq!(root.tick(&mut bb), Status::Success);
        assert_eq!(root.kind(), "Selector");
        assert_eq!(root.children().len(), 2);
    }

    #[test]
    fn parallel_helpers() {
        let mut bb = Blackboard::new();
        assert_eq!(parallel_all(vec![succeed(), running()]).tick(&mut bb), Status::Running);
        assert_eq!(parallel_all(vec![succeed(), fail()]).tick(&mut bb), Status::Failure);
        assert_eq!(parallel_any(vec![fail(), succeed()]).tick(&mut bb), Status::Success);
    }

    #[test]
    fn retry_and_condition() {
        let mut bb = Blackboard::new();
        let mut node = retry_until_success(condition(Predicate::exists("door_open")));
        assert_eq!(node.tick(&mut bb), Status::Running);
        bb.set("door_open", true);
        assert_eq!(node.tick(&mut bb), Status::Success);
        assert_eq!(inverter(always_fail(succeed())).tick(&mut bb), Status::Success);
    }
}
