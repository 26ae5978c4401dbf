use alloc::{vec, vec::Vec};

use crate::map::MapHeader;

/// Which names a new node's name must not collide with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamePolicy {
    /// Names must be distinct among the named children of the same Object.
    /// Array elements and anonymous nodes are never checked.
    #[default]
    Siblings,
    /// Every declared name must be unique across the whole document,
    /// regardless of where it appears.
    ///
    /// This is far stricter than JSON requires: two records in the same
    /// array cannot both carry an `x` field. It exists to reproduce files
    /// written by tooling that kept one flat name registry.
    Document,
}

/// Configuration for building a [`Document`](crate::Document).
///
/// # Default
///
/// Sibling-scoped name checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Scope of the duplicate-name check.
    ///
    /// # Default
    ///
    /// [`NamePolicy::Siblings`]
    pub name_policy: NamePolicy,
}

/// Configuration for decoding a map file.
///
/// # Examples
///
/// ```rust
/// use spmap::{DecoderOptions, NamePolicy};
///
/// let options = DecoderOptions {
///     accepted_sentinels: vec![-11],
///     ..Default::default()
/// };
/// assert_eq!(options.name_policy, NamePolicy::Siblings);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Values of the leading header word that identify a supported file.
    ///
    /// An empty list accepts any value.
    ///
    /// # Default
    ///
    /// `[-1, -11]`
    pub accepted_sentinels: Vec<i32>,

    /// Name policy for the document built from the decoded map.
    ///
    /// # Default
    ///
    /// [`NamePolicy::Siblings`]
    pub name_policy: NamePolicy,
}

impl DecoderOptions {
    pub(crate) fn accepts(&self, sentinel: i32) -> bool {
        self.accepted_sentinels.is_empty() || self.accepted_sentinels.contains(&sentinel)
    }

    #[must_use]
    pub fn document_options(&self) -> DocumentOptions {
        DocumentOptions {
            name_policy: self.name_policy,
        }
    }
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            accepted_sentinels: vec![MapHeader::SENTINEL, MapHeader::LEGACY_SENTINEL],
            name_policy: NamePolicy::default(),
        }
    }
}
