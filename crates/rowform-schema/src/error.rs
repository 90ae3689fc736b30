use serde::Serialize;
use std::{collections::BTreeMap, fmt};

///
/// ErrorTree
///
/// Route-aware collection of validation messages.
/// Validation keeps going after the first finding so every problem in a
/// schema is reported in one pass.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ErrorTree {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    messages: Vec<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    /// Record a message at this level.
    pub fn add(&mut self, message: impl fmt::Display) {
        self.messages.push(message.to_string());
    }

    /// Record a message under a child route.
    pub fn add_for(&mut self, route: impl Into<String>, message: impl fmt::Display) {
        self.children
            .entry(route.into())
            .or_default()
            .add(message);
    }

    /// Merge another tree under a child route; empty trees are dropped.
    pub fn merge_for(&mut self, route: impl Into<String>, other: Self) {
        if other.is_empty() {
            return;
        }

        let child = self.children.entry(route.into()).or_default();
        child.messages.extend(other.messages);
        for (key, tree) in other.children {
            child.merge_for(key, tree);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(Self::is_empty)
    }

    /// Number of messages across every route.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.values().map(Self::len).sum::<usize>()
    }

    /// Flatten into `(route, message)` pairs; the root route is empty.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);

        out
    }

    fn flatten_into(&self, route: &str, out: &mut Vec<(String, String)>) {
        for message in &self.messages {
            out.push((route.to_string(), message.clone()));
        }

        for (key, child) in &self.children {
            let next = if route.is_empty() {
                key.clone()
            } else {
                format!("{route}/{key}")
            };
            child.flatten_into(&next, out);
        }
    }

    /// Convert into a `Result`, failing when any message was recorded.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (route, message)) in self.flatten().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            if route.is_empty() {
                write!(f, "{message}")?;
            } else {
                write!(f, "{route}: {message}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

/// Push a formatted message onto an `ErrorTree`.
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}
