use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VectorStoreError};

/// Exact nearest-neighbor index over inner products of normalized vectors.
///
/// Vectors are L2-normalized on insert and queries are normalized the same
/// way before scoring, so the inner product is exactly the cosine
/// similarity. Search is a full linear scan over row order, which keeps
/// results exact and ties stable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlatIpIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIpIndex {
    /// Create an empty index for vectors of `dimension`
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    /// Normalize and append a vector, returning its row
    pub fn add(&mut self, mut vector: Vec<f32>) -> Result<usize> {
        if vector.len() != self.dimension {
            return Err(VectorStoreError::InvalidDimension {
                expected: self.dimension,
                actual: vector.len(),
            });
        }

        normalize(&mut vector);
        self.vectors.push(vector);
        Ok(self.vectors.len() - 1)
    }

    /// Exact top-k rows by inner product, descending. Equal scores keep
    /// insertion order. `top_k` of zero is rejected; the query is
    /// normalized before scoring.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<(usize, f32)>> {
        if top_k == 0 {
            return Err(VectorStoreError::invalid_argument("top_k must be > 0"));
        }

        if query.len() != self.dimension {
            return Err(VectorStoreError::InvalidDimension {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut normalized = query.to_vec();
        normalize(&mut normalized);

        let mut scores: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(row, vector)| (row, dot(&normalized, vector)))
            .collect();

        // Stable sort: ties keep row order
        scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scores.truncate(top_k);

        Ok(scores)
    }

    /// Number of stored vectors
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check whether the index holds no vectors
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vector dimension
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Persist as JSON via a temp file and rename
    pub async fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec(self)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Load an index produced by [`FlatIpIndex::save`]
    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let index: Self = serde_json::from_slice(&bytes)?;
        Ok(index)
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vec {
        *value /= norm;
    }
}
