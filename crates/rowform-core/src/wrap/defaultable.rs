use crate::wrap::Null;
use serde::{Deserialize, Serialize};

///
/// Defaultable
///
/// Value the caller may decline to supply, leaving the database to
/// compute it. `Default` is the wire DEFAULT marker, not a host default.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Defaultable<T> {
    #[default]
    Default,
    Value(T),
}

impl<T> Defaultable<T> {
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    pub const fn as_ref(&self) -> Defaultable<&T> {
        match self {
            Self::Default => Defaultable::Default,
            Self::Value(v) => Defaultable::Value(v),
        }
    }

    /// Explicitly supplied value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Default => None,
            Self::Value(v) => Some(v),
        }
    }

    /// Transform an explicit value; `Default` stays `Default`.
    pub fn map<U, F>(self, f: F) -> Defaultable<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Default => Defaultable::Default,
            Self::Value(v) => Defaultable::Value(f(v)),
        }
    }

    pub fn fold<U, F>(self, default: U, f: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Default => default,
            Self::Value(v) => f(v),
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Default => None,
            Self::Value(v) => Some(v),
        }
    }
}

impl<T> Defaultable<Null<T>> {
    /// Explicit NULL; distinct from [`Defaultable::Default`].
    #[must_use]
    pub const fn null() -> Self {
        Self::Value(Null::Null)
    }

    /// Explicit non-NULL value.
    pub const fn present(value: T) -> Self {
        Self::Value(Null::Value(value))
    }
}

impl<T> From<T> for Defaultable<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_and_explicit_null_stay_distinct() {
        let skipped: Defaultable<Null<i32>> = Defaultable::Default;
        let null: Defaultable<Null<i32>> = Defaultable::null();

        assert_ne!(skipped, null);
        assert!(skipped.is_default());
        assert!(!null.is_default());
        assert_eq!(null.value(), Some(&Null::Null));
    }

    #[test]
    fn map_leaves_default_untouched() {
        let d: Defaultable<i32> = Defaultable::Default;

        assert_eq!(d.map(|x| x + 1), Defaultable::Default);
        assert_eq!(Defaultable::Value(1).map(|x| x + 1), Defaultable::Value(2));
    }

    #[test]
    fn serialization_distinguishes_all_three_states() {
        let states: Vec<Defaultable<Null<i32>>> = vec![
            Defaultable::Default,
            Defaultable::null(),
            Defaultable::present(7),
        ];
        let json = serde_json::to_string(&states).unwrap();

        assert_eq!(json, r#"["Default",{"Value":null},{"Value":7}]"#);

        let back: Vec<Defaultable<Null<i32>>> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, states);
    }
}
