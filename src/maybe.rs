use crate::errors::MaybeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An optional value that is either `Empty` or `Filled` with exactly one payload.
///
/// The variant can only be observed through a total match ([`Maybe::match_with`]
/// or [`Maybe::try_match`]), so every consumer handles both cases. There is no
/// "is filled" predicate and no unchecked accessor.
///
/// Serializes as `null` when empty and as the bare payload when filled.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Maybe<T> {
    inner: Option<T>,
}

impl<T> Maybe<T> {
    pub const fn empty() -> Self {
        Self { inner: None }
    }

    /// Wraps `value` as Filled.
    ///
    /// `T` is taken as-is: an `Option` payload is an ordinary value, so
    /// `Maybe::filled(None::<i32>)` is Filled. Use [`Maybe::try_filled`] or
    /// [`crate::from`] to treat `None` as absence instead.
    pub fn filled(value: T) -> Self {
        Self { inner: Some(value) }
    }

    /// Builds a Filled value from a nullable source, failing when it is absent.
    ///
    /// Unlike [`crate::from`], absence is a contract violation here and is never
    /// coerced to `Empty`.
    pub fn try_filled(value: Option<T>) -> Result<Self, MaybeError> {
        value.map(Self::filled).ok_or(MaybeError::AbsentPayload)
    }

    /// Total match: `empty` when there is no payload, `filled(payload)` otherwise.
    pub fn match_with<R, F>(self, empty: R, filled: F) -> R
    where
        F: FnOnce(T) -> R,
    {
        match self.inner {
            Some(value) => filled(value),
            None => empty,
        }
    }

    /// Total match whose filled handler may yield an absent result.
    ///
    /// Returns [`MaybeError::AbsentResult`] when the payload is handled and the
    /// handler answers `None`. The handler is never called for `Empty`.
    pub fn try_match<R, F>(self, empty: R, filled: F) -> Result<R, MaybeError>
    where
        F: FnOnce(T) -> Option<R>,
    {
        match self.inner {
            Some(value) => filled(value).ok_or(MaybeError::AbsentResult),
            None => Ok(empty),
        }
    }

    pub fn as_ref(&self) -> Maybe<&T> {
        Maybe {
            inner: self.inner.as_ref(),
        }
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        Self { inner: value }
    }
}

impl<T: fmt::Debug> fmt::Debug for Maybe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(value) => f.debug_tuple("Filled").field(value).finish(),
            None => f.write_str("Empty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn match_picks_the_branch_for_the_variant() {
        assert_eq!(Maybe::filled(3).match_with(0, |v| v * 2), 6);
        assert_eq!(Maybe::<i32>::empty().match_with(0, |v| v * 2), 0);
    }

    #[test]
    fn try_filled_rejects_absent_payload() {
        assert_eq!(Maybe::<u8>::try_filled(None), Err(MaybeError::AbsentPayload));
        assert_eq!(Maybe::try_filled(Some(1u8)), Ok(Maybe::filled(1u8)));
    }

    #[test]
    fn try_match_rejects_absent_result_only_when_filled() {
        let filled = Maybe::filled("x").try_match("none", |_| None::<&str>);
        assert_eq!(filled, Err(MaybeError::AbsentResult));

        let empty = Maybe::<&str>::empty().try_match("none", |_| None);
        assert_eq!(empty, Ok("none"));
    }

    #[test]
    fn equality_is_by_value() {
        assert_eq!(Maybe::filled(String::from("a")), Maybe::filled("a".to_string()));
        assert_ne!(Maybe::filled(1), Maybe::filled(2));
        assert_ne!(Maybe::filled(1), Maybe::empty());
        assert_eq!(Maybe::<u64>::empty(), Maybe::default());
    }

    #[test]
    fn debug_names_the_variant() {
        assert_eq!(format!("{:?}", Maybe::filled(7)), "Filled(7)");
        assert_eq!(format!("{:?}", Maybe::<i32>::empty()), "Empty");
    }

    #[test]
    fn serde_maps_empty_to_null() {
        assert_eq!(serde_json::to_string(&Maybe::<i32>::empty()).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Maybe::filled(5)).unwrap(), "5");
        let back: Maybe<String> = serde_json::from_str("\"hi\"").unwrap();
        assert_eq!(back, Maybe::filled("hi".to_string()));
        let none: Maybe<String> = serde_json::from_str("null").unwrap();
        assert_eq!(none, Maybe::empty());
    }
}
