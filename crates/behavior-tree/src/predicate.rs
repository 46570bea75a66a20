//! Blackboard predicates shared by [`Condition`](crate::Condition) leaves and
//! [`Guard`](crate::Guard) decorators.

use std::cmp::Ordering;

use tracing::trace;

use crate::{Blackboard, ConfigurationError, NodeConf, Param};

/// Comparison applied between a blackboard entry and an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// The key is present, whatever its value.
    #[default]
    Exists,
    /// The key is absent.
    Missing,
}

impl CompareOp {
    /// Returns true if the operator compares against an operand.
    pub const fn needs_operand(self) -> bool {
        !matches!(self, CompareOp::Exists | CompareOp::Missing)
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering.is_eq(),
            CompareOp::Ne => ordering.is_ne(),
            CompareOp::Lt => ordering.is_lt(),
            CompareOp::Le => ordering.is_le(),
            CompareOp::Gt => ordering.is_gt(),
            CompareOp::Ge => ordering.is_ge(),
            CompareOp::Exists | CompareOp::Missing => false,
        }
    }
}

/// `key <op> operand` evaluated against a blackboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    key: String,
    op: CompareOp,
    operand: Option<Param>,
}

impl Predicate {
    /// Predicate with an operand, e.g. `hp < 10`.
    pub fn compare(key: impl Into<String>, op: CompareOp, operand: impl Into<Param>) -> Self {
        Self {
            key: key.into(),
            op,
            operand: Some(operand.into()),
        }
    }

    /// Predicate that holds when `key` is present.
    pub fn exists(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            op: CompareOp::Exists,
            operand: None,
        }
    }

    /// Predicate that holds when `key` is absent.
    pub fn missing(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            op: CompareOp::Missing,
            operand: None,
        }
    }

    /// Reads `key`, `op` and `value` parameters from a conf.
    pub fn from_conf(conf: &NodeConf) -> Result<Self, ConfigurationError> {
        let key: String = conf.required("key")?;
        let op: CompareOp = conf.optional_parsed("op")?.unwrap_or_default();
        let operand = if op.needs_operand() {
            Some(conf.required::<Param>("value")?)
        } else {
            None
        };
        Ok(Self { key, op, operand })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn op(&self) -> CompareOp {
        self.op
    }

    /// Evaluates the predicate.
    ///
    /// An absent key, an unresolvable operand or incomparable values all
    /// evaluate to `false`.
    pub fn evaluate(&self, blackboard: &Blackboard) -> bool {
        let entry = blackboard.get(&self.key);
        match self.op {
            CompareOp::Exists => return entry.is_some(),
            CompareOp::Missing => return entry.is_none(),
            _ => {}
        }

        let Some(value) = entry else {
            trace!(target: "behavior_tree::leaf", key = %self.key, "predicate key missing");
            return false;
        };
        let Some(operand) = self.operand.as_ref().and_then(|p| p.resolve(blackboard)) else {
            trace!(target: "behavior_tree::leaf", key = %self.key, "predicate operand unresolved");
            return false;
        };

        match value.compare(&operand) {
            Some(ordering) => self.op.accepts(ordering),
            None => {
                trace!(
                    target: "behavior_tree::leaf",
                    key = %self.key,
                    left = value.type_name(),
                    right = operand.type_name(),
                    "predicate values are incomparable"
                );
                false
            }
        }
    }
}
