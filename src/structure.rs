//! Runtime view of values for structural comparison.
//!
//! A [`Structure`] reports its [`Shape`]: absent, a scalar leaf, a sequence, a
//! record of named members, or a Maybe. Maybe values are exposed through the
//! erased [`MaybeShape`] capability, which answers "empty or filled" as a
//! [`Slot`] and hands back the payload as another `&dyn Structure`.

use crate::maybe::Maybe;
use itertools::Itertools;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Scalar,
    Sequence,
    Record,
    /// A Maybe of the contained type.
    Maybe(Box<TypeInfo>),
    /// Shape only known at runtime (e.g. JSON documents).
    Dynamic,
}

/// Declared (compile-time) type of a value taking part in a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    name: &'static str,
    kind: TypeKind,
}

impl TypeInfo {
    pub fn of<T: ?Sized>(kind: TypeKind) -> Self {
        Self {
            name: std::any::type_name::<T>(),
            kind,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// True for any Maybe, whatever it contains.
    pub fn is_maybe(&self) -> bool {
        matches!(self.kind, TypeKind::Maybe(_))
    }

    /// The contained type when this is a Maybe.
    pub fn contained(&self) -> Option<&TypeInfo> {
        match &self.kind {
            TypeKind::Maybe(inner) => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A named member of a record together with its declared type.
#[derive(Clone)]
pub struct Member<'a> {
    pub name: &'a str,
    pub declared: TypeInfo,
    pub value: &'a dyn Structure,
}

impl<'a> Member<'a> {
    /// Member whose declared type is the static type of `value`.
    pub fn of<T: Structure>(name: &'a str, value: &'a T) -> Self {
        Self {
            name,
            declared: T::declared_type(),
            value,
        }
    }
}

pub enum Shape<'a> {
    /// No value at all. Distinct from an empty Maybe.
    Absent,
    Scalar(Value),
    Sequence {
        element: TypeInfo,
        items: Vec<&'a dyn Structure>,
    },
    Record(Vec<Member<'a>>),
    Maybe(&'a dyn MaybeShape),
}

pub enum Slot<'a> {
    Empty,
    Filled(&'a dyn Structure),
}

/// Type-erased view of a Maybe.
pub trait MaybeShape {
    fn contained_type(&self) -> TypeInfo;
    fn slot(&self) -> Slot<'_>;
}

pub trait Structure {
    fn declared_type() -> TypeInfo
    where
        Self: Sized;

    fn runtime_type(&self) -> TypeInfo;

    fn shape(&self) -> Shape<'_>;
}

impl<T: Structure> MaybeShape for Maybe<T> {
    fn contained_type(&self) -> TypeInfo {
        T::declared_type()
    }

    fn slot(&self) -> Slot<'_> {
        self.as_ref()
            .match_with(Slot::Empty, |v| Slot::Filled(v as &dyn Structure))
    }
}

impl<T: Structure> Structure for Maybe<T> {
    fn declared_type() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Maybe(Box::new(T::declared_type())))
    }

    fn runtime_type(&self) -> TypeInfo {
        Self::declared_type()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Maybe(self)
    }
}

macro_rules! scalar_structure {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Structure for $ty {
                fn declared_type() -> TypeInfo {
                    TypeInfo::of::<$ty>(TypeKind::Scalar)
                }

                fn runtime_type(&self) -> TypeInfo {
                    Self::declared_type()
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(Value::from(self.clone()))
                }
            }
        )*
    };
}

scalar_structure!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, String);

impl Structure for char {
    fn declared_type() -> TypeInfo {
        TypeInfo::of::<char>(TypeKind::Scalar)
    }

    fn runtime_type(&self) -> TypeInfo {
        Self::declared_type()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Value::String(self.to_string()))
    }
}

impl Structure for &str {
    fn declared_type() -> TypeInfo {
        TypeInfo::of::<&str>(TypeKind::Scalar)
    }

    fn runtime_type(&self) -> TypeInfo {
        Self::declared_type()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Value::from(*self))
    }
}

/// `None` is an absent value; `Some` is seen through.
impl<T: Structure> Structure for Option<T> {
    fn declared_type() -> TypeInfo {
        T::declared_type()
    }

    fn runtime_type(&self) -> TypeInfo {
        match self {
            Some(v) => v.runtime_type(),
            None => T::declared_type(),
        }
    }

    fn shape(&self) -> Shape<'_> {
        match self {
            Some(v) => v.shape(),
            None => Shape::Absent,
        }
    }
}

impl<T: Structure> Structure for Box<T> {
    fn declared_type() -> TypeInfo {
        T::declared_type()
    }

    fn runtime_type(&self) -> TypeInfo {
        (**self).runtime_type()
    }

    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Structure> Structure for Vec<T> {
    fn declared_type() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Sequence)
    }

    fn runtime_type(&self) -> TypeInfo {
        Self::declared_type()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Sequence {
            element: T::declared_type(),
            items: self.iter().map(|v| v as &dyn Structure).collect(),
        }
    }
}

impl<T: Structure, const N: usize> Structure for [T; N] {
    fn declared_type() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Sequence)
    }

    fn runtime_type(&self) -> TypeInfo {
        Self::declared_type()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Sequence {
            element: T::declared_type(),
            items: self.iter().map(|v| v as &dyn Structure).collect(),
        }
    }
}

/// JSON `null` is absent; objects are records keyed by their field names.
impl Structure for Value {
    fn declared_type() -> TypeInfo {
        TypeInfo::of::<Value>(TypeKind::Dynamic)
    }

    fn runtime_type(&self) -> TypeInfo {
        let kind = match self {
            Value::Array(_) => TypeKind::Sequence,
            Value::Object(_) => TypeKind::Record,
            _ => TypeKind::Scalar,
        };
        TypeInfo::of::<Value>(kind)
    }

    fn shape(&self) -> Shape<'_> {
        match self {
            Value::Null => Shape::Absent,
            Value::Array(items) => Shape::Sequence {
                element: Self::declared_type(),
                items: items.iter().map(|v| v as &dyn Structure).collect(),
            },
            Value::Object(map) => Shape::Record(
                map.iter()
                    .map(|(k, v)| Member::of(k.as_str(), v))
                    .collect(),
            ),
            scalar => Shape::Scalar(scalar.clone()),
        }
    }
}

/// Implements [`Structure`] for a plain struct by listing its compared fields.
///
/// ```
/// use maybe_equivalency::{record, Maybe};
///
/// struct Foo { name: String }
/// struct Bar { id: i32, foo: Maybe<Foo> }
///
/// record!(Foo { name });
/// record!(Bar { id, foo });
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Structure for $ty {
            fn declared_type() -> $crate::TypeInfo {
                $crate::TypeInfo::of::<$ty>($crate::TypeKind::Record)
            }

            fn runtime_type(&self) -> $crate::TypeInfo {
                <Self as $crate::Structure>::declared_type()
            }

            fn shape(&self) -> $crate::Shape<'_> {
                $crate::Shape::Record(vec![
                    $( $crate::Member::of(stringify!($field), &self.$field) ),*
                ])
            }
        }
    };
}

/// Display adapter used in failure messages.
pub struct Render<'a>(pub &'a dyn Structure);

impl fmt::Display for Render<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.shape() {
            Shape::Absent => f.write_str("<null>"),
            Shape::Scalar(v) => write!(f, "{v}"),
            Shape::Sequence { items, .. } => {
                write!(f, "[{}]", items.into_iter().map(Render).join(", "))
            }
            Shape::Record(members) => {
                let fields = members
                    .into_iter()
                    .map(|m| format!("{}: {}", m.name, Render(m.value)))
                    .join(", ");
                write!(f, "{{ {fields} }}")
            }
            Shape::Maybe(m) => match m.slot() {
                Slot::Empty => f.write_str("Empty"),
                Slot::Filled(v) => write!(f, "Filled({})", Render(v)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct Foo {
        name: String,
        tag: Maybe<i32>,
    }

    record!(Foo { name, tag });

    #[test]
    fn maybe_types_report_their_contained_type() {
        let info = Maybe::<String>::declared_type();
        assert!(info.is_maybe());
        assert_eq!(info.contained(), Some(&String::declared_type()));
        assert!(!Option::<i32>::declared_type().is_maybe());
        assert!(Box::<Maybe<u8>>::declared_type().is_maybe());
    }

    #[test]
    fn option_none_is_absent_but_empty_maybe_is_not() {
        assert!(matches!(None::<i32>.shape(), Shape::Absent));
        assert!(matches!(Maybe::<i32>::empty().shape(), Shape::Maybe(_)));
    }

    #[test]
    fn record_macro_lists_members_with_declared_types() {
        let foo = Foo {
            name: "a".into(),
            tag: Maybe::filled(1),
        };
        let Shape::Record(members) = foo.shape() else {
            panic!("expected a record");
        };
        let names: Vec<_> = members.iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["name", "tag"]);
        assert!(members[1].declared.is_maybe());
    }

    #[test]
    fn render_describes_nested_values() {
        let foo = Foo {
            name: "a".into(),
            tag: Maybe::filled(1),
        };
        assert_eq!(Render(&foo).to_string(), r#"{ name: "a", tag: Filled(1) }"#);
        assert_eq!(Render(&Maybe::<i32>::empty()).to_string(), "Empty");
        assert_eq!(Render(&json!([1, null])).to_string(), "[1, <null>]");
    }
}
