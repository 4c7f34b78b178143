//! Optional values that must be handled totally, and a structural equivalence
//! engine that compares object graphs containing them.
//!
//! ```
//! use maybe_equivalency::{record, Equivalency, Maybe, Pipeline};
//!
//! struct Inner { name: String }
//! struct Outer { id: i32, inner: Maybe<Inner> }
//! record!(Inner { name });
//! record!(Outer { id, inner });
//!
//! let subject = Outer { id: 1, inner: Maybe::filled(Inner { name: "a".into() }) };
//! let expected = Outer { id: 1, inner: Maybe::filled(Inner { name: "b".into() }) };
//!
//! let err = Equivalency::new(Pipeline::with_maybe_support())
//!     .compare(&subject, &expected)
//!     .unwrap_err();
//! assert_eq!(err.mismatches()[0].path, "inner.name");
//! ```

pub mod errors;
pub mod context;
pub mod engine;
pub mod steps;
pub mod structure;
pub mod testing;
mod combinators;
mod comparison;
mod maybe;
mod path;

pub use combinators::{
    bind, choose, empty, from, from_if, from_non_empty_text, match_action, match_or_default,
    single_or_empty, Action, Choose,
};
pub use context::EquivalencyOptions;
pub use engine::{Comparison, Equivalency, Report, Validator};
pub use errors::{EquivalencyError, MaybeError, Mismatch, Result};
pub use maybe::Maybe;
pub use path::{MemberPath, Segment};
pub use steps::{EquivalencyStep, MaybeEquivalencyStep, Outcome, Pipeline};
pub use structure::{Member, MaybeShape, Render, Shape, Slot, Structure, TypeInfo, TypeKind};
