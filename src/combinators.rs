use crate::errors::MaybeError;
use crate::maybe::Maybe;
use itertools::Itertools;

/// A deferred side effect produced by [`match_action`]; the caller decides when to run it.
pub type Action<'a> = Box<dyn FnOnce() + 'a>;

/// Empty stays empty; a payload is transformed by `selector`.
pub fn bind<T, U, F>(source: Maybe<T>, selector: F) -> Maybe<U>
where
    F: FnOnce(T) -> U,
{
    source.match_with(Maybe::empty(), |v| Maybe::filled(selector(v)))
}

/// Total match whose branches are deferred actions rather than values.
///
/// Nothing runs until the returned [`Action`] is invoked, and then exactly one
/// of `empty` or `filled` runs, once.
pub fn match_action<'a, T, E, F>(source: Maybe<T>, empty: E, filled: F) -> Action<'a>
where
    T: 'a,
    E: FnOnce() + 'a,
    F: FnOnce(T) + 'a,
{
    let empty: Action<'a> = Box::new(empty);
    source.match_with(empty, |v| -> Action<'a> { Box::new(move || filled(v)) })
}

/// The payload, or `default` when empty.
pub fn match_or_default<T>(source: Maybe<T>, default: T) -> T {
    source.match_with(default, |v| v)
}

/// Lift a nullable value. Never fails.
pub fn from<T>(value: Option<T>) -> Maybe<T> {
    Maybe::from(value)
}

/// Filled iff `value` is present and satisfies `predicate`.
///
/// The predicate is only consulted for present values.
pub fn from_if<T, P>(value: Option<T>, predicate: P) -> Maybe<T>
where
    P: FnOnce(&T) -> bool,
{
    match value {
        Some(v) if predicate(&v) => Maybe::filled(v),
        _ => Maybe::empty(),
    }
}

pub fn from_non_empty_text<S: AsRef<str>>(text: Option<S>) -> Maybe<S> {
    from_if(text, |t| !t.as_ref().is_empty())
}

pub fn empty<T>() -> Maybe<T> {
    Maybe::empty()
}

/// Lazy iterator over the payloads of a sequence of maybes, in order.
///
/// Cloning it restarts from the same position, so it is restartable whenever
/// the underlying iterator is.
#[derive(Clone, Debug)]
pub struct Choose<I> {
    iter: I,
}

impl<T, I> Iterator for Choose<I>
where
    I: Iterator<Item = Maybe<T>>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.iter.find_map(|m| m.match_with(None, Some))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

pub fn choose<I, T>(source: I) -> Choose<I::IntoIter>
where
    I: IntoIterator<Item = Maybe<T>>,
{
    Choose {
        iter: source.into_iter(),
    }
}

/// The sole element of `source`, `Empty` when there is none.
///
/// Fails with [`MaybeError::Cardinality`] when there are two or more.
pub fn single_or_empty<I, T>(source: I) -> Result<Maybe<T>, MaybeError>
where
    I: IntoIterator<Item = Maybe<T>>,
{
    match source.into_iter().at_most_one() {
        Ok(Some(single)) => Ok(single),
        Ok(None) => Ok(Maybe::empty()),
        Err(rest) => Err(MaybeError::Cardinality {
            count: rest.count(),
        }),
    }
}
