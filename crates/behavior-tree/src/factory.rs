//! Factory registry that turns [`NodeConf`]s into node graphs.
//!
//! Every node kind registers one [`NodeFactory`] under its kind identifier at
//! startup. [`NodeFactories::get_instance`] then builds a whole tree from a
//! conf without the caller knowing any concrete node type: it looks up the
//! factory for the root kind and hands it a [`TreeBuilder`], through which the
//! factory resolves its own children with the same lookup, depth-first and in
//! configured order.
//!
//! # Example
//!
//! ```
//! use behavior_tree::{Action, NodeConf, NodeFactories, Status};
//!
//! let mut factories = NodeFactories::with_builtins();
//! factories
//!     .register_fn("Bark", |conf, builder| {
//!         builder.expect_leaf(conf)?;
//!         Ok(Box::new(Action::new("Bark", |bb: &mut behavior_tree::Blackboard| {
//!             bb.set("barked", true);
//!             Status::Success
//!         })))
//!     })
//!     .unwrap();
//!
//! let conf = NodeConf::new("Sequence").with_child(NodeConf::new("Bark"));
//! let mut root = factories.get_instance(&conf).unwrap();
//! let mut bb = behavior_tree::Blackboard::new();
//! assert_eq!(root.tick(&mut bb), Status::Success);
//! assert_eq!(bb.get_bool("barked"), Some(true));
//! ```

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::{BoxedBehavior, BuildError, ConfigurationError, NodeConf, builtins};

/// Default limit on tree nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Settings applied while building trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuildConfig {
    /// Deepest nesting accepted, counting the root as depth 1.
    pub max_depth: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Builds one node kind from its configuration.
///
/// Factories are stateless and may build any number of independent trees.
/// Children must be built through the supplied [`TreeBuilder`] so that cycle
/// and depth checks apply to them.
///
/// Any `Fn(&NodeConf, &mut TreeBuilder) -> Result<BoxedBehavior, BuildError>`
/// is a factory.
pub trait NodeFactory: Send + Sync {
    fn create(
        &self,
        conf: &NodeConf,
        builder: &mut TreeBuilder<'_>,
    ) -> Result<BoxedBehavior, BuildError>;
}

impl<F> NodeFactory for F
where
    F: Fn(&NodeConf, &mut TreeBuilder<'_>) -> Result<BoxedBehavior, BuildError> + Send + Sync,
{
    fn create(
        &self,
        conf: &NodeConf,
        builder: &mut TreeBuilder<'_>,
    ) -> Result<BoxedBehavior, BuildError> {
        self(conf, builder)
    }
}

/// Registry mapping node kind identifiers to factories.
///
/// Populated once at startup, read-only while building. It also holds a
/// library of named subtrees that `Subtree` nodes expand in place.
pub struct NodeFactories {
    by_kind: HashMap<String, Box<dyn NodeFactory>>,
    subtrees: HashMap<String, NodeConf>,
    config: BuildConfig,
}

impl NodeFactories {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            by_kind: HashMap::new(),
            subtrees: HashMap::new(),
            config: BuildConfig::default(),
        }
    }

    /// Creates a registry with every built-in node kind registered.
    pub fn with_builtins() -> Self {
        let mut factories = Self::new();
        for (kind, factory) in builtins::factories() {
            factories.by_kind.insert(kind.to_owned(), factory);
        }
        factories
    }

    /// Replaces the build settings.
    #[must_use]
    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Registers every built-in node kind.
    ///
    /// # Errors
    ///
    /// Fails if any built-in kind name is already taken.
    pub fn register_builtins(&mut self) -> Result<(), ConfigurationError> {
        for (kind, factory) in builtins::factories() {
            self.insert(kind.to_owned(), factory)?;
        }
        Ok(())
    }

    /// Registers a factory for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateKind`] if `kind` already has a
    /// factory.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        factory: impl NodeFactory + 'static,
    ) -> Result<(), ConfigurationError> {
        self.insert(kind.into(), Box::new(factory))
    }

    /// Registers a closure as the factory for `kind`.
    ///
    /// Same as [`register`](Self::register), but lets the compiler infer the
    /// closure's argument types.
    pub fn register_fn<F>(
        &mut self,
        kind: impl Into<String>,
        factory: F,
    ) -> Result<(), ConfigurationError>
    where
        F: Fn(&NodeConf, &mut TreeBuilder<'_>) -> Result<BoxedBehavior, BuildError>
            + Send
            + Sync
            + 'static,
    {
        self.insert(kind.into(), Box::new(factory))
    }

    fn insert(
        &mut self,
        kind: String,
        factory: Box<dyn NodeFactory>,
    ) -> Result<(), ConfigurationError> {
        if self.by_kind.contains_key(&kind) {
            return Err(ConfigurationError::DuplicateKind(kind));
        }
        debug!(target: "behavior_tree::factory", kind = %kind, "registered node kind");
        self.by_kind.insert(kind, factory);
        Ok(())
    }

    /// Registers a named subtree for `Subtree` nodes to expand.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateSubtree`] if the name is taken.
    pub fn register_subtree(
        &mut self,
        name: impl Into<String>,
        conf: NodeConf,
    ) -> Result<(), ConfigurationError> {
        let name = name.into();
        if self.subtrees.contains_key(&name) {
            return Err(ConfigurationError::DuplicateSubtree(name));
        }
        debug!(target: "behavior_tree::factory", subtree = %name, "registered subtree");
        self.subtrees.insert(name, conf);
        Ok(())
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.by_kind.contains_key(kind)
    }

    pub fn subtree(&self, name: &str) -> Option<&NodeConf> {
        self.subtrees.get(name)
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<_> = self.by_kind.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Registered subtree names, sorted.
    pub fn subtree_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.subtrees.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.by_kind.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }

    /// Builds the complete node graph described by `conf`.
    ///
    /// # Errors
    ///
    /// - [`BuildError::UnknownNodeKind`] if any node's kind has no factory
    /// - [`BuildError::Configuration`] for cycles, excessive depth, bad
    ///   parameters or child counts
    ///
    /// On error nothing is returned; the partially built nodes are dropped.
    pub fn get_instance(&self, conf: &NodeConf) -> Result<BoxedBehavior, BuildError> {
        let mut builder = TreeBuilder::new(self);
        match builder.build(conf) {
            Ok(node) => {
                debug!(
                    target: "behavior_tree::factory",
                    root = conf.label(),
                    nodes = builder.built,
                    "built behavior tree"
                );
                Ok(node)
            }
            Err(error) => {
                warn!(
                    target: "behavior_tree::factory",
                    root = conf.label(),
                    code = error.error_code(),
                    %error,
                    "rejected behavior tree"
                );
                Err(error)
            }
        }
    }
}

impl Default for NodeFactories {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for NodeFactories {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeFactories")
            .field("kinds", &self.by_kind.keys().collect::<Vec<_>>())
            .field("subtrees", &self.subtrees.keys().collect::<Vec<_>>())
            .field("config", &self.config)
            .finish()
    }
}

/// Recursive build capability handed to factories.
///
/// Tracks the current path from the root so that configurations which refer
/// back to themselves are rejected instead of recursing forever.
pub struct TreeBuilder<'a> {
    factories: &'a NodeFactories,
    path: Vec<PathEntry>,
    expanding: Vec<String>,
    built: usize,
}

struct PathEntry {
    label: String,
    id: Option<String>,
}

impl<'a> TreeBuilder<'a> {
    fn new(factories: &'a NodeFactories) -> Self {
        Self {
            factories,
            path: Vec::new(),
            expanding: Vec::new(),
            built: 0,
        }
    }

    /// Nesting depth of the node currently being built (root = 1).
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Builds `conf` and everything below it.
    pub fn build(&mut self, conf: &NodeConf) -> Result<BoxedBehavior, BuildError> {
        let max_depth = self.factories.config.max_depth;
        if self.path.len() >= max_depth {
            return Err(ConfigurationError::TooDeep { max_depth }.into());
        }

        if let Some(id) = conf.id()
            && self.path.iter().any(|entry| entry.id.as_deref() == Some(id))
        {
            return Err(self.cycle(id).into());
        }

        let factories = self.factories;
        let factory =
            factories
                .by_kind
                .get(conf.kind())
                .ok_or_else(|| BuildError::UnknownNodeKind {
                    kind: conf.kind().to_owned(),
                })?;

        self.path.push(PathEntry {
            label: conf.label().to_owned(),
            id: conf.id().map(str::to_owned),
        });
        let result = factory.create(conf, self);
        self.path.pop();

        if result.is_ok() {
            self.built += 1;
        }
        result
    }

    /// Builds every child of `conf`, preserving order.
    pub fn build_children(&mut self, conf: &NodeConf) -> Result<Vec<BoxedBehavior>, BuildError> {
        conf.children()
            .iter()
            .map(|child| self.build(child))
            .collect()
    }

    /// Builds the single child of a decorator conf.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::ChildCount`] unless `conf` has exactly one child.
    pub fn build_only_child(&mut self, conf: &NodeConf) -> Result<BoxedBehavior, BuildError> {
        match conf.children() {
            [child] => self.build(child),
            children => Err(ConfigurationError::ChildCount {
                kind: conf.kind().to_owned(),
                expected: "exactly 1",
                actual: children.len(),
            }
            .into()),
        }
    }

    /// Rejects a leaf conf that carries children.
    pub fn expect_leaf(&self, conf: &NodeConf) -> Result<(), ConfigurationError> {
        if conf.children().is_empty() {
            Ok(())
        } else {
            Err(ConfigurationError::ChildCount {
                kind: conf.kind().to_owned(),
                expected: "no",
                actual: conf.children().len(),
            })
        }
    }

    /// Builds the registered subtree `name` in place.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::UnknownSubtree`] if `name` is not registered
    /// - [`ConfigurationError::Cycle`] if `name` is already being expanded on
    ///   the current path
    pub fn build_subtree(&mut self, name: &str) -> Result<BoxedBehavior, BuildError> {
        if self.expanding.iter().any(|n| n == name) {
            return Err(self.cycle(name).into());
        }
        let factories = self.factories;
        let conf = factories
            .subtrees
            .get(name)
            .ok_or_else(|| ConfigurationError::UnknownSubtree(name.to_owned()))?;

        self.expanding.push(name.to_owned());
        let result = self.build(conf);
        self.expanding.pop();
        result
    }

    fn cycle(&self, id: &str) -> ConfigurationError {
        let mut path: Vec<&str> = self.path.iter().map(|entry| entry.label.as_str()).collect();
        path.push(id);
        ConfigurationError::Cycle {
            id: id.to_owned(),
            path: path.join(" > "),
        }
    }
}
