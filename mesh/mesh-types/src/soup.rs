//! Unindexed triangle list.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Aabb, Facet, MeshBounds};

/// A surface stored as independent facets, the way STL files store it.
///
/// Vertices shared between facets are repeated; no connectivity is kept.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleSoup {
    /// Solid name (the word after `solid` in ASCII STL).
    pub name: String,
    /// The facets, in file order.
    pub facets: Vec<Facet>,
}

impl TriangleSoup {
    /// Create an empty soup with the given solid name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            facets: Vec::new(),
        }
    }

    /// Create an empty soup with room for `facet_count` facets.
    #[must_use]
    pub fn with_capacity(name: impl Into<String>, facet_count: usize) -> Self {
        Self {
            name: name.into(),
            facets: Vec::with_capacity(facet_count),
        }
    }

    /// Number of facets.
    #[inline]
    #[must_use]
    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    /// Number of (repeated) vertices, always three per facet.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.facets.len() * 3
    }

    /// Whether the soup has no facets.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// A copy with every vertex scaled about the origin.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            name: self.name.clone(),
            facets: self.facets.iter().map(|f| f.scaled(factor)).collect(),
        }
    }
}

impl MeshBounds for TriangleSoup {
    fn bounds(&self) -> Aabb {
        self.facets.as_slice().bounds()
    }
}

impl MeshBounds for [Facet] {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.iter().flat_map(|f| f.vertices.iter()))
    }
}
