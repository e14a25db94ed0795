//! K-means over word-count vectors with Pearson distance.
//!
//! # Algorithm
//!
//! 1. **Seed**: every centroid gets, per word, a random integer count drawn from
//!    `1..=(max - min + 1)`, where `min`/`max` are that word's observed extremes.
//! 2. **Assign**: each input goes to the centroid with the strictly smallest distance;
//!    the first centroid wins ties.
//! 3. **Update**: each centroid becomes the per-word mean of its members.
//!
//! Steps 2–3 repeat either a fixed number of times ([`Iterations::Fixed`]) or until
//! no centroid's membership changes between two passes ([`Iterations::UntilConverged`]).
//!
//! # Empty clusters
//!
//! A centroid that attracts no inputs keeps its previous counts instead of being
//! divided by zero. It stays available for later passes.
//!
//! # Randomness
//!
//! Only the seeding step is random. Use [`Kmeans::with_seed`] or
//! [`Kmeans::fit_with_rng`] for reproducible runs.

use super::centroid::Centroid;
use super::pearson;
use super::util;
use super::vector::{check_aligned, VectorEntity, Vocabulary};
use crate::error::{Error, Result};
use log::{debug, info, warn};
use rand::prelude::*;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Stopping rule for the assign/update loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iterations {
    /// Run exactly this many passes, stable or not.
    Fixed(usize),
    /// Run until every centroid's assignment set is unchanged from the previous pass.
    UntilConverged,
}

impl Default for Iterations {
    fn default() -> Self {
        Iterations::Fixed(20)
    }
}

/// K-means clustering configuration.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of centroids.
    k: usize,
    /// Stopping rule.
    iterations: Iterations,
    /// Upper bound on passes for [`Iterations::UntilConverged`].
    max_iter: usize,
    /// Random seed.
    seed: Option<u64>,
}

impl Kmeans {
    /// Create a k-means clusterer with `k` centroids and 20 fixed passes.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            iterations: Iterations::default(),
            max_iter: 1000,
            seed: None,
        }
    }

    /// Set the stopping rule.
    pub fn with_iterations(mut self, iterations: Iterations) -> Self {
        self.iterations = iterations;
        self
    }

    /// Cap the number of passes when running until convergence.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Configured number of centroids.
    pub fn n_clusters(&self) -> usize {
        self.k
    }

    /// Cluster `data` using the configured seed (or the thread RNG).
    pub fn fit<'a>(
        &self,
        data: &'a [VectorEntity],
        vocabulary: &Arc<Vocabulary>,
    ) -> Result<KmeansFit<'a>> {
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        self.fit_with_rng(data, vocabulary, &mut rng)
    }

    /// Cluster `data`, drawing the initial centroids from `rng`.
    pub fn fit_with_rng<'a, R: Rng>(
        &self,
        data: &'a [VectorEntity],
        vocabulary: &Arc<Vocabulary>,
        rng: &mut R,
    ) -> Result<KmeansFit<'a>> {
        self.validate(data, vocabulary)?;

        let mut centroids = self.init_centroids(data, vocabulary, rng)?;
        let mut iterations = 0usize;
        let mut converged = false;

        match self.iterations {
            Iterations::Fixed(n) => {
                for _ in 0..n {
                    iterations += 1;
                    converged = pass(&mut centroids, data, iterations);
                }
            }
            Iterations::UntilConverged => loop {
                if iterations >= self.max_iter {
                    warn!(
                        "kmeans did not converge within {} iterations (k={})",
                        self.max_iter, self.k
                    );
                    break;
                }
                iterations += 1;
                if pass(&mut centroids, data, iterations) {
                    converged = true;
                    break;
                }
            },
        }

        info!(
            "kmeans finished: k={}, n={}, iterations={}, converged={}",
            self.k,
            data.len(),
            iterations,
            converged
        );

        Ok(KmeansFit {
            data,
            centroids,
            iterations,
            converged,
        })
    }

    fn validate(&self, data: &[VectorEntity], vocabulary: &Arc<Vocabulary>) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }
        if let Iterations::Fixed(0) = self.iterations {
            return Err(Error::InvalidParameter {
                name: "iterations",
                message: "must be at least 1",
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        check_aligned(data, vocabulary)?;
        if self.k > data.len() {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: data.len(),
            });
        }
        Ok(())
    }

    /// Random per-word counts in `1..=(max - min + 1)`.
    fn init_centroids<R: Rng>(
        &self,
        data: &[VectorEntity],
        vocabulary: &Arc<Vocabulary>,
        rng: &mut R,
    ) -> Result<Vec<Centroid>> {
        let ranges = util::word_ranges(data, vocabulary.len());
        let mut centroids = Vec::with_capacity(self.k);
        for id in 0..self.k {
            let counts: Vec<f64> = ranges
                .iter()
                .map(|&(min, max)| (rng.random::<f64>() * (max - min + 1.0)).floor() + 1.0)
                .collect();
            let vector = VectorEntity::unnamed(Arc::clone(vocabulary), counts)?;
            centroids.push(Centroid::new(id, vector));
        }
        Ok(centroids)
    }
}

impl Default for Kmeans {
    fn default() -> Self {
        Self::new(5)
    }
}

/// One assign/update/check pass. Returns true if every centroid is finished.
fn pass(centroids: &mut [Centroid], data: &[VectorEntity], iteration: usize) -> bool {
    for c in centroids.iter_mut() {
        c.clear();
    }

    for (item, label) in assign_labels(centroids, data).into_iter().enumerate() {
        centroids[label].assign(item);
    }

    let mut empty = 0usize;
    for c in centroids.iter_mut() {
        if !c.recompute(data) {
            empty += 1;
        }
    }
    if empty > 0 {
        debug!("kmeans iteration {iteration}: {empty} empty centroid(s) kept their counts");
    }

    let mut finished = 0usize;
    for c in centroids.iter_mut() {
        if c.check_finished() {
            finished += 1;
        }
    }
    debug!(
        "kmeans iteration {iteration}: {finished}/{} centroids unchanged",
        centroids.len()
    );
    finished == centroids.len()
}

#[cfg(not(feature = "parallel"))]
fn assign_labels(centroids: &[Centroid], data: &[VectorEntity]) -> Vec<usize> {
    data.iter().map(|v| nearest(centroids, v)).collect()
}

#[cfg(feature = "parallel")]
fn assign_labels(centroids: &[Centroid], data: &[VectorEntity]) -> Vec<usize> {
    data.par_iter().map(|v| nearest(centroids, v)).collect()
}

/// Index of the closest centroid; strict `<` keeps the first one on ties.
fn nearest(centroids: &[Centroid], v: &VectorEntity) -> usize {
    let mut best = 0usize;
    let mut best_dist = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = pearson::distance(c, v);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Result of one k-means run. Borrows the clustered inputs.
#[derive(Debug, Clone)]
pub struct KmeansFit<'a> {
    data: &'a [VectorEntity],
    centroids: Vec<Centroid>,
    iterations: usize,
    converged: bool,
}

impl<'a> KmeansFit<'a> {
    /// Final centroids with their last assignment lists.
    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    /// Number of assign/update passes performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// True if the last pass left every centroid's membership unchanged.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// The clustered inputs.
    pub fn data(&self) -> &'a [VectorEntity] {
        self.data
    }

    /// The inputs assigned to `centroid`.
    pub fn members<'s>(
        &'s self,
        centroid: &'s Centroid,
    ) -> impl Iterator<Item = &'a VectorEntity> + 's {
        centroid.assignments().iter().map(move |&i| &self.data[i])
    }

    /// Centroid index per input, in input order.
    pub fn labels(&self) -> Vec<usize> {
        let mut labels = vec![0usize; self.data.len()];
        for c in &self.centroids {
            for &i in c.assignments() {
                labels[i] = c.id();
            }
        }
        labels
    }
}
