//! Compile nested update trees into flat update-instruction documents.
//!
//! A tree is a [`Value`]: plain data mixed with [`Operator`] nodes built by
//! the functions in [`builders`]. [`flatten`] walks it and groups every write
//! under its verb, keyed by the dotted path that leads to it:
//!
//! ```
//! use updoc::builders::inc;
//! use updoc::{flatten, map, FlattenOptions};
//!
//! let tree = map! { "stats" => map! { "hits" => inc(None), "name" => "home" } };
//! let doc = flatten(&tree, FlattenOptions::default()).into_value();
//! assert_eq!(
//!     doc,
//!     map! { "$inc" => map! { "stats.hits" => 1 }, "$set" => map! { "stats.name" => "home" } },
//! );
//! ```

pub mod builders;
pub mod codec;
pub mod diagnostics;
pub mod error;
pub mod flatten;
pub mod operator;
pub mod value;

pub type Result<T> = anyhow::Result<T>;

pub use builders::Build;
pub use error::BuildError;
pub use flatten::{FlattenOptions, Flattened, InstructionDocument, flatten};
pub use operator::{Operator, is_operator, operator_payload, operator_type};
pub use value::{Atomic, ForeignKind, ForeignLeaf, Map, Value};
