//! Helpers for tests that work with [`Maybe`] values.
//!
//! [`MaybeAssertions`] adds `should_be_empty` / `should_be_filled` to maybes,
//! each with a `_because` variant that quotes a reason on failure.
//! With the `proptest` feature, [`filled`] and an `Arbitrary` impl generate
//! Filled maybes from a strategy for the payload.

use crate::maybe::Maybe;
use std::fmt::Debug;

pub trait MaybeAssertions<T> {
    /// Panics unless the subject is present and empty.
    #[track_caller]
    fn should_be_empty(&self) {
        self.should_be_empty_because("");
    }

    /// Panics unless the subject is present and filled; returns the payload.
    #[track_caller]
    fn should_be_filled(&self) -> &T {
        self.should_be_filled_because("")
    }

    /// [`should_be_empty`](Self::should_be_empty) with a reason quoted on failure.
    fn should_be_empty_because(&self, because: &str);

    fn should_be_filled_because(&self, because: &str) -> &T;
}

fn reason(because: &str) -> String {
    match because.trim() {
        "" => String::new(),
        text => format!(" because {text}"),
    }
}

impl<T: Debug> MaybeAssertions<T> for Maybe<T> {
    #[track_caller]
    fn should_be_empty_because(&self, because: &str) {
        if let Some(value) = self.as_ref().match_with(None, Some) {
            panic!(
                "Expected maybe to be empty{}, but it was filled with {value:?}.",
                reason(because)
            );
        }
    }

    #[track_caller]
    fn should_be_filled_because(&self, because: &str) -> &T {
        match self.as_ref().match_with(None, Some) {
            Some(value) => value,
            None => panic!(
                "Expected maybe to be something{}, but it was empty.",
                reason(because)
            ),
        }
    }
}

impl<T: Debug> MaybeAssertions<T> for Option<Maybe<T>> {
    #[track_caller]
    fn should_be_empty_because(&self, because: &str) {
        match self {
            Some(maybe) => maybe.should_be_empty_because(because),
            None => panic!("Expected maybe not to be <null>{}.", reason(because)),
        }
    }

    #[track_caller]
    fn should_be_filled_because(&self, because: &str) -> &T {
        match self {
            Some(maybe) => maybe.should_be_filled_because(because),
            None => panic!("Expected maybe not to be <null>{}.", reason(because)),
        }
    }
}

#[cfg(feature = "proptest")]
pub use generate::filled;

#[cfg(feature = "proptest")]
mod generate {
    use crate::maybe::Maybe;
    use proptest::prelude::*;
    use proptest::strategy::Map;

    /// Filled maybes whose payload is drawn from `payload`. Never yields Empty.
    pub fn filled<S: Strategy>(payload: S) -> Map<S, fn(S::Value) -> Maybe<S::Value>> {
        payload.prop_map(Maybe::filled as fn(S::Value) -> Maybe<S::Value>)
    }

    impl<T: Arbitrary> Arbitrary for Maybe<T> {
        type Parameters = T::Parameters;
        type Strategy = Map<T::Strategy, fn(T) -> Maybe<T>>;

        fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
            filled(any_with::<T>(args))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn filled_yields_the_payload() {
        assert_eq!(Maybe::filled(3).should_be_filled(), &3);
        Maybe::<i32>::empty().should_be_empty();
        Some(Maybe::<i32>::empty()).should_be_empty();
    }

    #[test]
    #[should_panic(expected = "Expected maybe to be something, but it was empty.")]
    fn empty_is_not_filled() {
        Maybe::<i32>::empty().should_be_filled();
    }

    #[test]
    #[should_panic(expected = "Expected maybe to be empty, but it was filled")]
    fn filled_is_not_empty() {
        Maybe::filled("x").should_be_empty();
    }

    #[test]
    #[should_panic(expected = "Expected maybe to be empty because the cache was cleared, but it")]
    fn reason_is_quoted_in_the_failure() {
        Maybe::filled(7).should_be_empty_because("the cache was cleared");
    }

    #[test]
    #[should_panic(expected = "Expected maybe not to be <null> because lookups always answer.")]
    fn reason_is_quoted_for_absent_subjects() {
        None::<Maybe<i32>>.should_be_filled_because("lookups always answer");
    }

    #[test]
    #[should_panic(expected = "Expected maybe not to be <null>.")]
    fn absent_is_neither() {
        None::<Maybe<i32>>.should_be_filled();
    }

    #[cfg(feature = "proptest")]
    proptest::proptest! {
        #[test]
        fn generated_maybes_are_always_filled(m in proptest::arbitrary::any::<Maybe<u8>>()) {
            m.should_be_filled();
        }
    }
}
