use super::traits::WordVector;
use super::util;
use super::vector::{VectorEntity, Vocabulary};

/// A k-means partition center plus the inputs currently assigned to it.
///
/// Assignments are indices into the input slice, so "same blog" means same index,
/// never equal counts.
#[derive(Clone, Debug)]
pub struct Centroid {
    id: usize,
    vector: VectorEntity,
    assignments: Vec<usize>,
    // Sorted snapshot of the last assignment set that differed from its predecessor.
    previous: Vec<usize>,
    finished: bool,
}

impl Centroid {
    pub(crate) fn new(id: usize, vector: VectorEntity) -> Self {
        Self {
            id,
            vector,
            assignments: Vec::new(),
            previous: Vec::new(),
            finished: false,
        }
    }

    /// Position of this centroid in the result.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Current center.
    pub fn vector(&self) -> &VectorEntity {
        &self.vector
    }

    /// Indices of the inputs assigned in the last pass, in input order.
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Number of assigned inputs.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// True if nothing was assigned in the last pass.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// True if the last convergence check saw an unchanged assignment set.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn assign(&mut self, item: usize) {
        self.assignments.push(item);
    }

    pub(crate) fn clear(&mut self) {
        self.assignments.clear();
    }

    /// Move the center to the mean of its members.
    ///
    /// With no members the center keeps its previous counts; returns `false` in that case.
    pub(crate) fn recompute(&mut self, data: &[VectorEntity]) -> bool {
        let members = self.assignments.iter().map(|&i| &data[i]);
        util::mean_into(self.vector.counts_mut(), members)
    }

    /// Compare the current assignment set with the previous snapshot (order-independent).
    pub(crate) fn check_finished(&mut self) -> bool {
        let mut current = self.assignments.clone();
        current.sort_unstable();
        self.finished = current == self.previous;
        if !self.finished {
            self.previous = current;
        }
        self.finished
    }
}

impl WordVector for Centroid {
    fn vocabulary(&self) -> &Vocabulary {
        self.vector.vocabulary()
    }

    fn counts(&self) -> &[f64] {
        self.vector.counts()
    }
}
