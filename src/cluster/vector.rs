//! Named word-count vectors over a shared vocabulary.

use super::traits::WordVector;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered set of distinct words shared by every vector in a run.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    words: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary, rejecting duplicate words.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(words.len());
        for (i, w) in words.iter().enumerate() {
            if index.insert(w.clone(), i).is_some() {
                return Err(Error::DuplicateWord(w.clone()));
            }
        }
        Ok(Self { words, index })
    }

    /// Words in vocabulary order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Position of `word`, if present.
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if the vocabulary has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl Eq for Vocabulary {}

/// A (optionally named) count vector over a shared [`Vocabulary`].
///
/// Raw blogs are immutable once loaded; centroids and merge representatives are
/// rebuilt by the clusterers.
#[derive(Clone, Debug)]
pub struct VectorEntity {
    name: Option<String>,
    vocabulary: Arc<Vocabulary>,
    counts: Vec<f64>,
}

impl VectorEntity {
    /// Create a named entity. `counts` must hold one value per vocabulary word.
    pub fn new(
        name: impl Into<String>,
        vocabulary: Arc<Vocabulary>,
        counts: Vec<f64>,
    ) -> Result<Self> {
        let mut entity = Self::unnamed(vocabulary, counts)?;
        entity.name = Some(name.into());
        Ok(entity)
    }

    /// Create an entity without a name (centroids, merged representatives).
    pub fn unnamed(vocabulary: Arc<Vocabulary>, counts: Vec<f64>) -> Result<Self> {
        if counts.len() != vocabulary.len() {
            return Err(Error::DimensionMismatch {
                expected: vocabulary.len(),
                found: counts.len(),
            });
        }
        Ok(Self {
            name: None,
            vocabulary,
            counts,
        })
    }

    /// Entity name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The shared vocabulary handle.
    pub fn shared_vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    /// Sum of all counts.
    pub fn total_count(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// Elementwise mean of two entities over the same vocabulary.
    pub fn average(&self, other: &VectorEntity) -> VectorEntity {
        debug_assert_eq!(self.counts.len(), other.counts.len());
        let counts = self
            .counts
            .iter()
            .zip(other.counts.iter())
            .map(|(a, b)| (a + b) / 2.0)
            .collect();
        VectorEntity {
            name: None,
            vocabulary: Arc::clone(&self.vocabulary),
            counts,
        }
    }

    pub(crate) fn counts_mut(&mut self) -> &mut [f64] {
        &mut self.counts
    }

    /// Display name used by renderings; unnamed entities render as an empty string.
    pub(crate) fn label(&self) -> String {
        self.name.clone().unwrap_or_default()
    }
}

impl WordVector for VectorEntity {
    fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    fn counts(&self) -> &[f64] {
        &self.counts
    }
}

/// Check the common preconditions of a clustering run.
pub(crate) fn check_aligned(data: &[VectorEntity], vocabulary: &Arc<Vocabulary>) -> Result<()> {
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }
    if vocabulary.is_empty() {
        return Err(Error::InvalidParameter {
            name: "vocabulary",
            message: "must contain at least one word",
        });
    }
    data.iter().try_for_each(|entity| check_vocabulary(entity, vocabulary))
}

/// Fail with [`Error::VocabularyMismatch`] unless `entity` is defined over `vocabulary`.
pub(crate) fn check_vocabulary(
    entity: &VectorEntity,
    vocabulary: &Arc<Vocabulary>,
) -> Result<()> {
    let own = entity.shared_vocabulary();
    if Arc::ptr_eq(own, vocabulary) || **own == **vocabulary {
        Ok(())
    } else {
        Err(Error::VocabularyMismatch {
            entity: entity.label(),
        })
    }
}
