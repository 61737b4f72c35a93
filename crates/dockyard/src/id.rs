//! Typed identifiers for layout nodes.
//!
//! Ids are strings so layouts can be loaded from plain data. Every id is
//! unique across the whole tree regardless of node kind.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(
    /// Identifier of a [`Tab`](crate::model::Tab).
    TabId
);
define_id!(
    /// Identifier of a [`Panel`](crate::model::Panel).
    PanelId
);
define_id!(
    /// Identifier of a [`PanelGroup`](crate::model::PanelGroup).
    GroupId
);
define_id!(
    /// Identifier of a [`FloatingWindow`](crate::model::FloatingWindow).
    FloatId
);

/// Generates fresh ids of the form `{prefix}-{n}`.
///
/// The counter is shared between kinds so generated ids never collide with
/// each other; collisions with ids loaded from plain data are skipped by the
/// caller-supplied `is_taken` check.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, prefix: &str, is_taken: impl Fn(&str) -> bool) -> String {
        loop {
            self.next += 1;
            let candidate = format!("{prefix}-{}", self.next);
            if !is_taken(&candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_skips_taken_ids() {
        let mut ids = IdAllocator::new();
        let taken = ["panel-1", "panel-2"];
        let id = ids.allocate("panel", |candidate| taken.contains(&candidate));
        assert_eq!(id, "panel-3");
    }

    #[test]
    fn test_allocator_counter_is_shared_between_prefixes() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate("panel", |_| false), "panel-1");
        assert_eq!(ids.allocate("group", |_| false), "group-2");
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = PanelId::new("explorer");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"explorer\"");
        assert_eq!(id.to_string(), "explorer");
    }
}
