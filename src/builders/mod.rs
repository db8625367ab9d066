//! Constructors for every supported verb.
//!
//! Plain builders return an [`Operator`] directly. Chainable ones (`push`,
//! `add_to_set`, `pop`, `positional`, `bit`) return a draft that collects
//! refinements and computes its payload only when read or finalized through
//! [`Build::build`].

pub mod array;
pub mod bitwise;
pub mod field;

pub use array::{
    AddToSet, Pop, Positional, Push, Selector, add_to_set, pop, positional, positional_tag, pull,
    pull_all, push, slice, sort,
};
pub use bitwise::{Bit, BitOp, and, bit, or, xor};
pub use field::{
    DateKind, current_date, inc, max, min, mul, rename, set, set_on_insert, timestamp, unset,
};

use crate::error::BuildError;
use crate::operator::Operator;

/// Finalize a builder into an immutable [`Operator`].
pub trait Build {
    fn build(self) -> Result<Operator, BuildError>;
}

impl Build for Operator {
    fn build(self) -> Result<Operator, BuildError> {
        Ok(self)
    }
}
