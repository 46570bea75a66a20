//! Data-driven behavior tree runtime.
//!
//! Trees are described by [`NodeConf`] values, typically loaded from content
//! files, and turned into live node graphs by a [`NodeFactories`] registry.
//! A [`BehaviorTree`] owns the resulting root together with a [`Blackboard`]
//! and is ticked by its owner once per simulation step.
//!
//! - **Three-valued status**: nodes return `Success`, `Failure` or `Running`
//! - **Resumable**: composites remember the running child across ticks
//! - **Deterministic**: no clocks, threads or randomness inside the runtime
//! - **Errors at build time only**: ticking never fails
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - Composite nodes: [`Sequence`], [`Selector`], [`Parallel`]
//! - Decorator nodes: [`Inverter`], [`AlwaysSucceed`], [`AlwaysFail`],
//!   [`Repeater`], [`RepeatUntil`], [`Guard`]
//! - Leaf nodes: [`Condition`], [`SetValue`], [`Wait`], [`Constant`], [`Action`]
//! - Construction: [`NodeConf`] → [`NodeFactories::get_instance`] → [`BoxedBehavior`]

pub mod behavior;
pub mod blackboard;
pub mod builder;
pub mod builtins;
pub mod composite;
pub mod conf;
pub mod decorator;
pub mod error;
pub mod factory;
pub mod leaf;
pub mod predicate;
pub mod status;
pub mod tree;

// Re-export core types for ergonomic API
pub use behavior::{Behavior, BoxedBehavior};
pub use blackboard::{Blackboard, Value};
pub use builtins::kinds;
pub use composite::{Parallel, Selector, Sequence};
pub use conf::{FromParam, NodeConf, Param};
pub use decorator::{
    AlwaysFail, AlwaysSucceed, FailurePolicy, Guard, Inverter, RepeatTarget, RepeatUntil, Repeater,
};
pub use error::{BuildError, ConfigurationError};
pub use factory::{BuildConfig, DEFAULT_MAX_DEPTH, NodeFactories, NodeFactory, TreeBuilder};
pub use leaf::{Action, Condition, Constant, SetValue, Wait};
pub use predicate::{CompareOp, Predicate};
pub use status::Status;
pub use tree::BehaviorTree;
