//! A built node graph together with the blackboard it runs against.

use std::fmt::Write as _;

use tracing::{debug, trace};

use crate::{Behavior, Blackboard, BoxedBehavior, BuildError, NodeConf, NodeFactories, Status};

/// Root node plus blackboard, ticked as one unit.
///
/// The tree exclusively owns its nodes and its blackboard. Every tick runs
/// to completion on the caller's thread before returning.
pub struct BehaviorTree {
    root: BoxedBehavior,
    blackboard: Blackboard,
    ticks: u64,
    last_status: Option<Status>,
}

impl BehaviorTree {
    /// Wraps an already built root with an empty blackboard.
    pub fn new(root: BoxedBehavior) -> Self {
        Self {
            root,
            blackboard: Blackboard::new(),
            ticks: 0,
            last_status: None,
        }
    }

    /// Builds a tree from `conf` through the registry.
    pub fn from_conf(factories: &NodeFactories, conf: &NodeConf) -> Result<Self, BuildError> {
        factories.get_instance(conf).map(Self::new)
    }

    /// Replaces the blackboard, e.g. with pre-seeded facts.
    #[must_use]
    pub fn with_blackboard(mut self, blackboard: Blackboard) -> Self {
        self.blackboard = blackboard;
        self
    }

    /// Ticks the root once.
    pub fn tick(&mut self) -> Status {
        self.ticks += 1;
        let status = self.root.tick(&mut self.blackboard);
        trace!(
            target: "behavior_tree::tree",
            tick = self.ticks,
            root = self.root.kind(),
            %status,
            "tree ticked"
        );
        self.last_status = Some(status);
        status
    }

    /// Ticks until the root finishes or `max_ticks` ticks have run.
    ///
    /// Returns the finishing status, or `None` if the root was still running
    /// when the budget ran out.
    pub fn tick_until_done(&mut self, max_ticks: u64) -> Option<Status> {
        (0..max_ticks)
            .map(|_| self.tick())
            .find(|status| status.is_done())
    }

    /// Resets every node to its initial state.
    ///
    /// The blackboard and tick counter are left untouched.
    pub fn reset(&mut self) {
        self.root.reset();
        self.last_status = None;
        debug!(target: "behavior_tree::tree", root = self.root.kind(), "tree reset");
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    pub fn root(&self) -> &dyn Behavior {
        self.root.as_ref()
    }

    /// Number of ticks since construction.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Status returned by the most recent tick, cleared by [`reset`](Self::reset).
    pub fn last_status(&self) -> Option<Status> {
        self.last_status
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        fn count(node: &dyn Behavior) -> usize {
            1 + node
                .children()
                .iter()
                .map(|child| count(child.as_ref()))
                .sum::<usize>()
        }
        count(self.root())
    }

    /// Indented outline of node kinds, one per line.
    pub fn outline(&self) -> String {
        fn walk(node: &dyn Behavior, depth: usize, out: &mut String) {
            let _ = writeln!(out, "{:indent$}{}", "", node.kind(), indent = depth * 2);
            for child in node.children() {
                walk(child.as_ref(), depth + 1, out);
            }
        }
        let mut out = String::new();
        walk(self.root(), 0, &mut out);
        out
    }
}

impl std::fmt::Debug for BehaviorTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorTree")
            .field("root", &self.root.kind())
            .field("ticks", &self.ticks)
            .field("last_status", &self.last_status)
            .field("blackboard", &self.blackboard)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patrol() -> NodeConf {
        NodeConf::new("Sequence").with_children([
            NodeConf::new("Wait").with_param("ticks", 1),
            NodeConf::new("SetValue")
                .with_param("key", "arrived")
                .with_param("value", true),
        ])
    }

    #[test]
    fn ticks_are_counted_and_recorded() {
        let mut tree = BehaviorTree::from_conf(&NodeFactories::with_builtins(), &patrol()).unwrap();
        assert_eq!(tree.last_status(), None);
        assert_eq!(tree.tick(), Status::Running);
        assert_eq!(tree.tick(), Status::Success);
        assert_eq!(tree.tick_count(), 2);
        assert_eq!(tree.last_status(), Some(Status::Success));
        assert_eq!(tree.blackboard().get_bool("arrived"), Some(true));
    }

    #[test]
    fn tick_until_done_respects_budget() {
        let factories = NodeFactories::with_builtins();
        let mut tree = BehaviorTree::from_conf(&factories, &patrol()).unwrap();
        assert_eq!(tree.tick_until_done(1), None);
        assert_eq!(tree.tick_until_done(5), Some(Status::Success));
        assert_eq!(tree.tick_count(), 2);
    }

    #[test]
    fn reset_keeps_blackboard() {
        let factories = NodeFactories::with_builtins();
        let mut tree = BehaviorTree::from_conf(&factories, &patrol())
            .unwrap()
            .with_blackboard([("seed", 7)].into_iter().collect());
        tree.tick();
        tree.reset();
        assert_eq!(tree.last_status(), None);
        assert_eq!(tree.blackboard().get_int("seed"), Some(7));
        // Wait starts over after reset
        assert_eq!(tree.tick(), Status::Running);
    }

    #[test]
    fn outline_lists_nodes_depth_first() {
        let tree = BehaviorTree::from_conf(&NodeFactories::with_builtins(), &patrol()).unwrap();
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.outline(), "Sequence\n  Wait\n  SetValue\n");
    }
}
