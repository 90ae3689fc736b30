use serde::{Deserialize, Deserializer, Serialize, Serializer};

///
/// Null
///
/// Value that may be SQL NULL. Serializes like `Option<T>`.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Null<T> {
    #[default]
    Null,
    Value(T),
}

impl<T> Null<T> {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub const fn as_ref(&self) -> Null<&T> {
        match self {
            Self::Null => Null::Null,
            Self::Value(v) => Null::Value(v),
        }
    }

    pub const fn as_mut(&mut self) -> Null<&mut T> {
        match self {
            Self::Null => Null::Null,
            Self::Value(v) => Null::Value(v),
        }
    }

    /// Case analysis: apply `f` to a present value, otherwise return `default`.
    pub fn fold<U, F>(self, default: U, f: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Null => default,
            Self::Value(v) => f(v),
        }
    }

    /// Transform a present value; NULL stays NULL.
    pub fn map<U, F>(self, f: F) -> Null<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Null => Null::Null,
            Self::Value(v) => Null::Value(f(v)),
        }
    }

    /// Chain a computation that may itself produce NULL.
    pub fn and_then<U, F>(self, f: F) -> Null<U>
    where
        F: FnOnce(T) -> Null<U>,
    {
        match self {
            Self::Null => Null::Null,
            Self::Value(v) => f(v),
        }
    }

    /// First non-NULL of `self` and `other`.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Null => other,
            value @ Self::Value(_) => value,
        }
    }

    #[must_use]
    pub fn or_else<F>(self, f: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Null => f(),
            value @ Self::Value(_) => value,
        }
    }

    /// Downgrade to a plain value with an explicit fallback.
    pub fn unwrap_or(self, fallback: T) -> T {
        self.fold(fallback, |v| v)
    }

    pub fn unwrap_or_else<F>(self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Null => f(),
            Self::Value(v) => v,
        }
    }

    pub fn into_option(self) -> Option<T> {
        self.into()
    }
}

impl<T> From<Option<T>> for Null<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

impl<T> From<Null<T>> for Option<T> {
    fn from(value: Null<T>) -> Self {
        match value {
            Null::Null => None,
            Null::Value(v) => Some(v),
        }
    }
}

impl<T: Serialize> Serialize for Null<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Value(v) => serializer.serialize_some(v),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Null<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}
