//! Declarative node configuration.
//!
//! A [`NodeConf`] describes one node to instantiate: its kind, its ordered
//! children and its parameters. Confs are produced once (in code or by a
//! loader), never mutated afterwards, and may be read by any number of
//! factory invocations.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::{Blackboard, ConfigurationError, Value};

/// A node parameter.
///
/// Literal parameters carry their value directly; `Key` parameters name a
/// blackboard entry that is looked up at tick time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Param {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Reference to a blackboard key.
    Key(String),
}

impl Param {
    /// Creates a blackboard key reference.
    pub fn key(name: impl Into<String>) -> Self {
        Param::Key(name.into())
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Param::Bool(_) => "bool",
            Param::Int(_) => "int",
            Param::Float(_) => "float",
            Param::Str(_) => "string",
            Param::Key(_) => "blackboard key",
        }
    }

    /// The literal value, or `None` for a key reference.
    pub fn as_literal(&self) -> Option<Value> {
        match self {
            Param::Bool(b) => Some(Value::Bool(*b)),
            Param::Int(i) => Some(Value::Int(*i)),
            Param::Float(f) => Some(Value::Float(*f)),
            Param::Str(s) => Some(Value::Str(s.clone())),
            Param::Key(_) => None,
        }
    }

    /// Resolves the parameter against a blackboard.
    ///
    /// Returns `None` when a key reference names an absent entry.
    pub fn resolve(&self, blackboard: &Blackboard) -> Option<Value> {
        match self {
            Param::Key(key) => blackboard.get(key).cloned(),
            literal => literal.as_literal(),
        }
    }
}

impl From<Value> for Param {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(b) => Param::Bool(b),
            Value::Int(i) => Param::Int(i),
            Value::Float(f) => Param::Float(f),
            Value::Str(s) => Param::Str(s),
        }
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Int(value.into())
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Float(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Str(value.to_owned())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Str(value)
    }
}

/// Conversion from a [`Param`] into a typed parameter value.
pub trait FromParam: Sized {
    /// Human-readable description of the accepted parameter type.
    const EXPECTED: &'static str;

    fn from_param(param: &Param) -> Option<Self>;
}

impl FromParam for bool {
    const EXPECTED: &'static str = "bool";

    fn from_param(param: &Param) -> Option<Self> {
        match param {
            Param::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromParam for i64 {
    const EXPECTED: &'static str = "int";

    fn from_param(param: &Param) -> Option<Self> {
        match param {
            Param::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromParam for u32 {
    const EXPECTED: &'static str = "non-negative int";

    fn from_param(param: &Param) -> Option<Self> {
        i64::from_param(param).and_then(|i| u32::try_from(i).ok())
    }
}

impl FromParam for u64 {
    const EXPECTED: &'static str = "non-negative int";

    fn from_param(param: &Param) -> Option<Self> {
        i64::from_param(param).and_then(|i| u64::try_from(i).ok())
    }
}

impl FromParam for usize {
    const EXPECTED: &'static str = "non-negative int";

    fn from_param(param: &Param) -> Option<Self> {
        i64::from_param(param).and_then(|i| usize::try_from(i).ok())
    }
}

impl FromParam for f64 {
    const EXPECTED: &'static str = "number";

    fn from_param(param: &Param) -> Option<Self> {
        match param {
            Param::Int(i) => Some(*i as f64),
            Param::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl FromParam for String {
    const EXPECTED: &'static str = "string";

    fn from_param(param: &Param) -> Option<Self> {
        match param {
            Param::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromParam for Param {
    const EXPECTED: &'static str = "any value";

    fn from_param(param: &Param) -> Option<Self> {
        Some(param.clone())
    }
}

/// Immutable description of one node and its subtree.
///
/// # Example
///
/// ```
/// use behavior_tree::{NodeConf, Param};
///
/// let conf = NodeConf::new("Sequence")
///     .with_child(NodeConf::new("Condition").with_param("key", "enemy_visible"))
///     .with_child(NodeConf::new("Wait").with_param("ticks", 3));
///
/// assert_eq!(conf.children().len(), 2);
/// assert_eq!(conf.children()[1].param("ticks"), Some(&Param::Int(3)));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeConf {
    kind: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    id: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    children: Vec<NodeConf>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeMap::is_empty")
    )]
    params: BTreeMap<String, Param>,
}

impl NodeConf {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            children: Vec::new(),
            params: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: NodeConf) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeConf>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Param>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn children(&self) -> &[NodeConf] {
        &self.children
    }

    pub fn params(&self) -> &BTreeMap<String, Param> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.get(name)
    }

    /// Reads an optional typed parameter.
    ///
    /// Absent parameters yield `Ok(None)`; present parameters of the wrong
    /// type are an error.
    pub fn optional<T: FromParam>(&self, name: &str) -> Result<Option<T>, ConfigurationError> {
        let Some(param) = self.params.get(name) else {
            return Ok(None);
        };
        T::from_param(param).map(Some).ok_or_else(|| {
            ConfigurationError::invalid(
                &self.kind,
                name,
                format!("expected {}, found {}", T::EXPECTED, param.type_name()),
            )
        })
    }

    /// Reads a required typed parameter.
    pub fn required<T: FromParam>(&self, name: &str) -> Result<T, ConfigurationError> {
        self.optional(name)?
            .ok_or_else(|| ConfigurationError::missing(&self.kind, name))
    }

    /// Reads an optional string parameter and parses it.
    pub fn optional_parsed<E: FromStr>(&self, name: &str) -> Result<Option<E>, ConfigurationError> {
        let Some(raw) = self.optional::<String>(name)? else {
            return Ok(None);
        };
        raw.parse().map(Some).map_err(|_| {
            ConfigurationError::invalid(&self.kind, name, format!("unrecognized value '{raw}'"))
        })
    }

    /// Reads a required string parameter and parses it.
    pub fn required_parsed<E: FromStr>(&self, name: &str) -> Result<E, ConfigurationError> {
        self.optional_parsed(name)?
            .ok_or_else(|| ConfigurationError::missing(&self.kind, name))
    }

    /// Id if present, otherwise the kind. Used to describe build paths.
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_child_order() {
        let conf = NodeConf::new("Selector")
            .with_children(["A", "B", "C"].map(NodeConf::new))
            .with_child(NodeConf::new("D"));
        let kinds: Vec<_> = conf.children().iter().map(NodeConf::kind).collect();
        assert_eq!(kinds, ["A", "B", "C", "D"]);
    }

    #[test]
    fn typed_parameters() {
        let conf = NodeConf::new("Repeater")
            .with_param("count", 3)
            .with_param("weight", 0.5)
            .with_param("on_failure", "ignore");

        assert_eq!(conf.required::<u32>("count"), Ok(3));
        assert_eq!(conf.required::<f64>("count"), Ok(3.0));
        assert_eq!(conf.optional::<f64>("weight"), Ok(Some(0.5)));
        assert_eq!(conf.optional::<bool>("absent"), Ok(None));
        assert_eq!(conf.required::<String>("on_failure").as_deref(), Ok("ignore"));
    }

    #[test]
    fn wrong_type_is_invalid_parameter() {
        let conf = NodeConf::new("Wait").with_param("ticks", "soon");
        let err = conf.required::<u32>("ticks").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_INVALID_PARAMETER");
        assert!(err.to_string().contains("expected non-negative int, found string"));
    }

    #[test]
    fn negative_count_is_rejected() {
        let conf = NodeConf::new("Wait").with_param("ticks", -1);
        assert!(conf.required::<u32>("ticks").is_err());
    }

    #[test]
    fn missing_parameter_names_kind_and_param() {
        let conf = NodeConf::new("Wait");
        assert_eq!(
            conf.required::<u32>("ticks"),
            Err(ConfigurationError::MissingParameter {
                kind: "Wait".into(),
                param: "ticks".into(),
            })
        );
    }

    #[test]
    fn key_params_resolve_against_blackboard() {
        let mut bb = Blackboard::new();
        bb.set("target", "door");
        assert_eq!(Param::key("target").resolve(&bb), Some(Value::from("door")));
        assert_eq!(Param::key("other").resolve(&bb), None);
        assert_eq!(Param::Int(4).resolve(&bb), Some(Value::Int(4)));
    }

    #[test]
    fn label_prefers_id() {
        assert_eq!(NodeConf::new("Sequence").label(), "Sequence");
        assert_eq!(NodeConf::new("Sequence").with_id("patrol").label(), "patrol");
    }
}
