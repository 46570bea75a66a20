//! Construction-time errors.
//!
//! Errors only exist while a tree is being registered or built. Ticking never
//! fails: leaves map their own problems (a missing blackboard key, an
//! incomparable value) to [`Status::Failure`](crate::Status::Failure).
//!
//! # Taxonomy
//!
//! - [`ConfigurationError`]: the registry or a [`NodeConf`](crate::NodeConf)
//!   is malformed (duplicate kind, cycle, missing parameter, ...)
//! - [`BuildError::UnknownNodeKind`]: a conf names a kind with no factory
//!
//! Both abort construction entirely; no partially built tree is returned.

/// The registry or a node configuration is invalid.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// A factory is already registered for this kind.
    #[error("node kind '{0}' is already registered")]
    DuplicateKind(String),

    /// A subtree is already registered under this name.
    #[error("subtree '{0}' is already registered")]
    DuplicateSubtree(String),

    /// A `Subtree` node names a subtree that was never registered.
    #[error("subtree '{0}' is not registered")]
    UnknownSubtree(String),

    /// The configuration refers back to itself.
    #[error("cyclic configuration: '{id}' reached again via {path}")]
    Cycle { id: String, path: String },

    /// The configuration nests deeper than the builder allows.
    #[error("tree exceeds maximum depth of {max_depth}")]
    TooDeep { max_depth: usize },

    /// A parameter the node kind cannot do without is absent.
    #[error("node '{kind}' is missing required parameter '{param}'")]
    MissingParameter { kind: String, param: String },

    /// A parameter is present but unusable.
    #[error("node '{kind}' has invalid parameter '{param}': {reason}")]
    InvalidParameter {
        kind: String,
        param: String,
        reason: String,
    },

    /// The node kind does not accept this many children.
    #[error("node '{kind}' has {actual} children, expected {expected}")]
    ChildCount {
        kind: String,
        expected: &'static str,
        actual: usize,
    },
}

impl ConfigurationError {
    /// Shorthand for building [`MissingParameter`](Self::MissingParameter).
    pub fn missing(kind: &str, param: &str) -> Self {
        Self::MissingParameter {
            kind: kind.to_owned(),
            param: param.to_owned(),
        }
    }

    /// Shorthand for building [`InvalidParameter`](Self::InvalidParameter).
    pub fn invalid(kind: &str, param: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            kind: kind.to_owned(),
            param: param.to_owned(),
            reason: reason.into(),
        }
    }

    /// Static identifier for this error variant.
    pub const fn error_code(&self) -> &'static str {
        use ConfigurationError::*;
        match self {
            DuplicateKind(_) => "CONFIG_DUPLICATE_KIND",
            DuplicateSubtree(_) => "CONFIG_DUPLICATE_SUBTREE",
            UnknownSubtree(_) => "CONFIG_UNKNOWN_SUBTREE",
            Cycle { .. } => "CONFIG_CYCLE",
            TooDeep { .. } => "CONFIG_TOO_DEEP",
            MissingParameter { .. } => "CONFIG_MISSING_PARAMETER",
            InvalidParameter { .. } => "CONFIG_INVALID_PARAMETER",
            ChildCount { .. } => "CONFIG_CHILD_COUNT",
        }
    }
}

/// Tree construction failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// No factory is registered for the requested kind.
    #[error("unknown node kind '{kind}'")]
    UnknownNodeKind { kind: String },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl BuildError {
    /// Static identifier for this error variant.
    pub const fn error_code(&self) -> &'static str {
        match self {
            BuildError::UnknownNodeKind { .. } => "BUILD_UNKNOWN_NODE_KIND",
            BuildError::Configuration(e) => e.error_code(),
        }
    }

    /// Returns true if the error is a configuration problem rather than an
    /// unknown kind.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, BuildError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_converts_into_build_error() {
        let err: BuildError = ConfigurationError::DuplicateKind("Wait".into()).into();
        assert!(err.is_configuration());
        assert_eq!(err.error_code(), "CONFIG_DUPLICATE_KIND");
        assert_eq!(err.to_string(), "node kind 'Wait' is already registered");
    }

    #[test]
    fn unknown_kind_message_names_the_kind() {
        let err = BuildError::UnknownNodeKind {
            kind: "Teleport".into(),
        };
        assert!(!err.is_configuration());
        assert_eq!(err.to_string(), "unknown node kind 'Teleport'");
    }
}
