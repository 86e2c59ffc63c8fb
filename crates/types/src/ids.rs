//! Newtype wrappers for semantic IDs and URIs
//!
//! These types keep resource identifiers and grid cell indices from being
//! mixed up with plain strings and integers.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// A URI for a document resource (template assets, compliance graphics, etc.)
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ResourceUri(Arc<str>);

impl ResourceUri {
    /// Creates a new ResourceUri from a string
    pub fn new(uri: impl Into<Arc<str>>) -> Self {
        Self(uri.into())
    }

    /// Returns the string representation of this resource URI
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ResourceUri {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for ResourceUri {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for ResourceUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 1-based, row-major index of a cell within one page grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CellIndex(usize);

impl CellIndex {
    /// Creates an index from a 1-based value. Returns `None` for zero.
    pub fn new(one_based: usize) -> Option<Self> {
        (one_based > 0).then_some(Self(one_based))
    }

    /// Creates an index from a 0-based slot position.
    pub fn from_slot(slot: usize) -> Self {
        Self(slot + 1)
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// The 0-based position, usable as an index into a chunk.
    pub fn slot(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
