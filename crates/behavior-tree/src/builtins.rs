//! Factories for the node kinds shipped with this crate.

use crate::{
    AlwaysFail, AlwaysSucceed, BoxedBehavior, BuildError, Condition, ConfigurationError, Constant,
    FailurePolicy, Guard, Inverter, NodeConf, NodeFactory, Parallel, Param, Predicate,
    RepeatTarget, RepeatUntil, Repeater, Selector, Sequence, SetValue, TreeBuilder, Wait,
};

/// Kind identifiers of the built-in nodes.
pub mod kinds {
    pub const SEQUENCE: &str = "Sequence";
    pub const SELECTOR: &str = "Selector";
    pub const PARALLEL: &str = "Parallel";
    pub const INVERTER: &str = "Inverter";
    pub const ALWAYS_SUCCEED: &str = "AlwaysSucceed";
    pub const ALWAYS_FAIL: &str = "AlwaysFail";
    pub const REPEATER: &str = "Repeater";
    pub const REPEAT_UNTIL: &str = "RepeatUntil";
    pub const GUARD: &str = "Guard";
    pub const CONDITION: &str = "Condition";
    pub const SET_VALUE: &str = "SetValue";
    pub const WAIT: &str = "Wait";
    pub const SUCCEED: &str = "Succeed";
    pub const FAIL: &str = "Fail";
    pub const RUNNING: &str = "Running";
    pub const SUBTREE: &str = "Subtree";
}

type BuildResult = Result<BoxedBehavior, BuildError>;

fn entry(
    kind: &'static str,
    factory: impl NodeFactory + 'static,
) -> (&'static str, Box<dyn NodeFactory>) {
    (kind, Box::new(factory))
}

pub(crate) fn factories() -> Vec<(&'static str, Box<dyn NodeFactory>)> {
    vec![
        entry(kinds::SEQUENCE, sequence),
        entry(kinds::SELECTOR, selector),
        entry(kinds::PARALLEL, parallel),
        entry(kinds::INVERTER, inverter),
        entry(kinds::ALWAYS_SUCCEED, always_succeed),
        entry(kinds::ALWAYS_FAIL, always_fail),
        entry(kinds::REPEATER, repeater),
        entry(kinds::REPEAT_UNTIL, repeat_until),
        entry(kinds::GUARD, guard),
        entry(kinds::CONDITION, condition),
        entry(kinds::SET_VALUE, set_value),
        entry(kinds::WAIT, wait),
        entry(kinds::SUCCEED, succeed),
        entry(kinds::FAIL, fail),
        entry(kinds::RUNNING, running),
        entry(kinds::SUBTREE, subtree),
    ]
}

// ============================================================================
// Composites
// ============================================================================

fn sequence(conf: &NodeConf, builder: &mut TreeBuilder<'_>) -> BuildResult {
    Ok(Box::new(Sequence::new(builder.build_children(conf)?)))
}

fn selector(conf: &NodeConf, builder: &mut TreeBuilder<'_>) -> BuildResult {
    Ok(Box::new(Selector::new(builder.build_children(conf)?)))
}

fn parallel(conf: &NodeConf, builder: &mut TreeBuilder<'_>) -> BuildResult {
    let success_threshold = conf
        .optional::<usize>("success_threshold")?
        .unwrap_or(conf.children().len());
    let failure_threshold = conf.optional::<usize>("failure_threshold")?;
    let children = builder.build_children(conf)?;
    Ok(Box::new(Parallel::new(
        children,
        success_threshold,
        failure_threshold,
    )?))
}

// ============================================================================
// Decorators
// ============================================================================

fn inverter(conf: &NodeConf, builder: &mut TreeBuilder<'_>) -> BuildResult {
    Ok(Box::new(Inverter::new(builder.build_only_child(conf)?)))
}

fn always_succeed(conf: &NodeConf, builder: &mut TreeBuilder<'_>) -> BuildResult {
    Ok(Box::new(AlwaysSucceed::new(builder.build_only_child(conf)?)))
}

fn always_fail(conf: &NodeConf, builder: &mut TreeBuilder<'_>) -> BuildResult {
    Ok(Box::new(AlwaysFail::new(builder.build_only_child(conf)?)))
}

fn repeater(conf: &NodeConf, builder: &mut TreeBuilder<'_>) -> BuildResult {
    let count = conf.optional::<u32>("count")?;
    let on_failure: FailurePolicy = conf.required_parsed("on_failure")?;
    let child = builder.build_only_child(conf)?;
    Ok(Box::new(match count {
        Some(count) => Repeater::times(child, count, on_failure),
        None => Repeater::forever(child, on_failure),
    }))
}

fn repeat_until(conf: &NodeConf, builder: &mut TreeBuilder<'_>) -> BuildResult {
    let target: RepeatTarget = conf.required_parsed("until")?;
    let max_attempts = conf.optional::<u32>("max_attempts")?;
    if max_attempts == Some(0) {
        return Err(
            ConfigurationError::invalid(conf.kind(), "max_attempts", "must be at least 1").into(),
        );
    }
    let child = builder.build_only_child(conf)?;
    Ok(Box::new(RepeatUntil::new(child, target, max_attempts)))
}

fn guard(conf: &NodeConf, builder: &mut TreeBuilder<'_>) -> BuildResult {
    let predicate = Predicate::from_conf(conf)?;
    let child = builder.build_only_child(conf)?;
    Ok(Box::new(Guard::new(predicate, child)))
}

// ============================================================================
// Leaves
// ============================================================================

fn condition(conf: &NodeConf, builder: &mut TreeBuilder<'_>) -> BuildResult {
    builder.expect_leaf(conf)?;
    Ok(Box::new(Condition::new(Predicate::from_conf(conf)?)))
}

fn set_value(conf: &NodeConf, builder: &mut TreeBuilder<'_>) -> BuildResult {
    builder.expect_leaf(conf)?;
    let key: String = conf.required("key")?;
    let value: Param = conf.required("value")?;
    Ok(Box::new(SetValue::new(key, value)))
}

fn wait(conf: &NodeConf, builder: &mut TreeBuilder<'_>) -> BuildResult {
    builder.expect_leaf(conf)?;
    Ok(Box::new(Wait::new(conf.required("ticks")?)))
}

fn succeed(conf: &NodeConf, builder: &mut TreeBuilder<'_>) -> BuildResult {
    builder.expect_leaf(conf)?;
    Ok(Box::new(Constant::succeed()))
}

fn fail(conf: &NodeConf, builder: &mut TreeBuilder<'_>) -> BuildResult {
    builder.expect_leaf(conf)?;
    Ok(Box::new(Constant::fail()))
}

fn running(conf: &NodeConf, builder: &mut TreeBuilder<'_>) -> BuildResult {
    builder.expect_leaf(conf)?;
    Ok(Box::new(Constant::running()))
}

fn subtree(conf: &NodeConf, builder: &mut TreeBuilder<'_>) -> BuildResult {
    builder.expect_leaf(conf)?;
    let name: String = conf.required("name")?;
    builder.build_subtree(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Blackboard, NodeFactories, Status};

    fn build(conf: &NodeConf) -> Result<BoxedBehavior, BuildError> {
        NodeFactories::with_builtins().get_instance(conf)
    }

    fn minimal_conf(kind: &str) -> NodeConf {
        let conf = NodeConf::new(kind);
        match kind {
            kinds::INVERTER | kinds::ALWAYS_SUCCEED | kinds::ALWAYS_FAIL => {
                conf.with_child(NodeConf::new(kinds::SUCCEED))
            }
            kinds::REPEATER => conf
                .with_param("count", 1)
                .with_param("on_failure", "fail")
                .with_child(NodeConf::new(kinds::SUCCEED)),
            kinds::REPEAT_UNTIL => conf
                .with_param("until", "success")
                .with_child(NodeConf::new(kinds::SUCCEED)),
            kinds::GUARD => conf
                .with_param("key", "x")
                .with_child(NodeConf::new(kinds::SUCCEED)),
            kinds::CONDITION => conf.with_param("key", "x"),
            kinds::SET_VALUE => conf.with_param("key", "x").with_param("value", 1),
            kinds::WAIT => conf.with_param("ticks", 0),
            _ => conf,
        }
    }

    #[test]
    fn built_node_kind_matches_conf_kind() {
        for (kind, _) in factories() {
            if kind == kinds::SUBTREE {
                continue;
            }
            let node = build(&minimal_conf(kind)).unwrap();
            assert_eq!(node.kind(), kind);
        }
    }

    #[test]
    fn decorators_require_exactly_one_child() {
        for kind in [kinds::INVERTER, kinds::ALWAYS_SUCCEED, kinds::ALWAYS_FAIL] {
            let err = build(&NodeConf::new(kind)).err().unwrap();
            assert_eq!(
                err,
                BuildError::Configuration(ConfigurationError::ChildCount {
                    kind: kind.into(),
                    expected: "exactly 1",
                    actual: 0,
                })
            );

            let two = NodeConf::new(kind)
                .with_child(NodeConf::new(kinds::SUCCEED))
                .with_child(NodeConf::new(kinds::FAIL));
            assert_eq!(build(&two).err().unwrap().error_code(), "CONFIG_CHILD_COUNT");
        }
    }

    #[test]
    fn leaves_reject_children() {
        let conf = NodeConf::new(kinds::SUCCEED).with_child(NodeConf::new(kinds::FAIL));
        assert!(matches!(
            build(&conf),
            Err(BuildError::Configuration(ConfigurationError::ChildCount { .. }))
        ));
    }

    #[test]
    fn repeater_requires_failure_policy() {
        let conf = NodeConf::new(kinds::REPEATER)
            .with_param("count", 2)
            .with_child(NodeConf::new(kinds::SUCCEED));
        assert_eq!(
            build(&conf).err(),
            Some(BuildError::Configuration(ConfigurationError::MissingParameter {
                kind: kinds::REPEATER.into(),
                param: "on_failure".into(),
            }))
        );
    }

    #[test]
    fn repeater_rejects_negative_count() {
        let conf = NodeConf::new(kinds::REPEATER)
            .with_param("count", -1)
            .with_param("on_failure", "ignore")
            .with_child(NodeConf::new(kinds::SUCCEED));
        assert!(matches!(
            build(&conf),
            Err(BuildError::Configuration(ConfigurationError::InvalidParameter { .. }))
        ));
    }

    #[test]
    fn repeat_until_rejects_zero_attempts() {
        let conf = minimal_conf(kinds::REPEAT_UNTIL).with_param("max_attempts", 0);
        assert!(build(&conf).is_err());
    }

    #[test]
    fn parallel_thresholds_come_from_params() {
        let conf = NodeConf::new(kinds::PARALLEL)
            .with_param("success_threshold", 1)
            .with_children([
                NodeConf::new(kinds::FAIL),
                NodeConf::new(kinds::SUCCEED),
            ]);
        let mut node = build(&conf).unwrap();
        assert_eq!(node.tick(&mut Blackboard::new()), Status::Success);

        let too_many = conf.clone().with_param("success_threshold", 3);
        assert!(build(&too_many).is_err());
    }

    #[test]
    fn set_value_and_condition_round_trip_through_blackboard() {
        let conf = NodeConf::new(kinds::SEQUENCE).with_children([
            NodeConf::new(kinds::SET_VALUE)
                .with_param("key", "alert")
                .with_param("value", true),
            NodeConf::new(kinds::CONDITION)
                .with_param("key", "alert")
                .with_param("op", "eq")
                .with_param("value", true),
        ]);
        let mut bb = Blackboard::new();
        assert_eq!(build(&conf).unwrap().tick(&mut bb), Status::Success);
        assert_eq!(bb.get_bool("alert"), Some(true));
    }

    #[test]
    fn running_leaf_holds_its_parent_open() {
        let conf = NodeConf::new(kinds::SEQUENCE)
            .with_children([NodeConf::new(kinds::SUCCEED), NodeConf::new(kinds::RUNNING)]);
        let mut node = build(&conf).unwrap();
        let mut bb = Blackboard::new();
        assert_eq!(node.tick(&mut bb), Status::Running);
        assert_eq!(node.tick(&mut bb), Status::Running);
        assert_eq!(node.children()[1].kind(), kinds::RUNNING);
    }

    #[test]
    fn unknown_subtree_is_reported() {
        let conf = NodeConf::new(kinds::SUBTREE).with_param("name", "nowhere");
        assert_eq!(
            build(&conf).err(),
            Some(BuildError::Configuration(ConfigurationError::UnknownSubtree(
                "nowhere".into()
            )))
        );
    }
}
