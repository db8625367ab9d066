//! Bitwise update builders.

use super::Build;
use crate::error::BuildError;
use crate::operator::{Operator, verb};
use crate::value::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOp {
    And,
    Or,
    Xor,
}

impl BitOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BitOp::And => "and",
            BitOp::Or => "or",
            BitOp::Xor => "xor",
        }
    }

    /// `$bit` operator with payload `{ <op>: value }`.
    pub fn apply(self, value: impl Into<Value>) -> Operator {
        let mut payload = Map::new();
        payload.insert(self.as_str().to_string(), value.into());
        Operator::new(verb::BIT, payload)
    }
}

impl fmt::Display for BitOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bitwise marker awaiting its operation. It carries no payload of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bit;

pub fn bit() -> Bit {
    Bit
}

impl Bit {
    pub fn and(self, value: impl Into<Value>) -> Operator {
        BitOp::And.apply(value)
    }

    pub fn or(self, value: impl Into<Value>) -> Operator {
        BitOp::Or.apply(value)
    }

    pub fn xor(self, value: impl Into<Value>) -> Operator {
        BitOp::Xor.apply(value)
    }

    pub fn payload(&self) -> Result<Value, BuildError> {
        Err(unselected())
    }
}

impl Build for Bit {
    fn build(self) -> Result<Operator, BuildError> {
        Err(unselected())
    }
}

fn unselected() -> BuildError {
    BuildError::Configuration {
        refinement: "bit",
        reason: "needs an operation (and, or, xor) before it has a payload",
    }
}

/// Shorthand for `bit().and(value)`.
pub fn and(value: impl Into<Value>) -> Operator {
    BitOp::And.apply(value)
}

/// Shorthand for `bit().or(value)`.
pub fn or(value: impl Into<Value>) -> Operator {
    BitOp::Or.apply(value)
}

/// Shorthand for `bit().xor(value)`.
pub fn xor(value: impl Into<Value>) -> Operator {
    BitOp::Xor.apply(value)
}
