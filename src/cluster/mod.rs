//! Clustering algorithms for word-count vectors.
//!
//! Every input is a [`VectorEntity`]: a named count per word of a shared [`Vocabulary`].
//! Similarity is measured with the Pearson correlation distance ([`pearson`]), which
//! compares the *shape* of two count profiles and ignores their overall volume. A blog
//! that uses every word twice as often as another is at distance 0 from it.
//!
//! ## Algorithms
//!
//! ### K-means
//!
//! Partitional clustering into a fixed number of groups: assign each vector to the
//! nearest centroid, move each centroid to the mean of its members, repeat. Runs for a
//! fixed number of passes or until the assignment sets stop changing.
//!
//! **Objective**: none is optimised globally. Results depend on the random seeding, so
//! pass a seed when you need reproducibility.
//!
//! ### Agglomerative
//!
//! Bottom-up hierarchical clustering. Starts from one leaf per vector and repeatedly
//! merges the closest pair, representing each merge by the mean of its two children.
//! The result is a strict binary tree ([`MergeTree`]) and is fully deterministic.
//!
//! ## Usage
//!
//! ```rust
//! use blogclust::cluster::{Agglomerative, Iterations, Kmeans, VectorEntity, Vocabulary};
//! use std::sync::Arc;
//!
//! let vocab = Arc::new(Vocabulary::new(["rust", "cargo", "flour", "oven"]).unwrap());
//! let blog = |name: &str, counts: [f64; 4]| {
//!     VectorEntity::new(name, Arc::clone(&vocab), counts.to_vec()).unwrap()
//! };
//! let data = vec![
//!     blog("systems", [9.0, 7.0, 0.0, 1.0]),
//!     blog("crates", [8.0, 9.0, 1.0, 0.0]),
//!     blog("bread", [0.0, 1.0, 9.0, 7.0]),
//!     blog("pastry", [1.0, 0.0, 7.0, 9.0]),
//! ];
//!
//! // Flat partition.
//! let fit = Kmeans::new(2)
//!     .with_iterations(Iterations::UntilConverged)
//!     .with_seed(42)
//!     .fit(&data, &vocab)
//!     .unwrap();
//! assert_eq!(fit.labels().len(), data.len());
//!
//! // Merge tree.
//! let tree = Agglomerative::new().fit(&data, &vocab).unwrap();
//! assert_eq!(tree.merge_count(), data.len() - 1);
//! ```

mod centroid;
mod hierarchical;
mod kmeans;
pub mod pearson;
mod traits;
mod util;
mod vector;

pub use centroid::Centroid;
pub use hierarchical::{Agglomerative, MergeNode, MergeTree, NodeId, NodeKind, NodeShape};
pub use kmeans::{Iterations, Kmeans, KmeansFit};
pub use traits::WordVector;
pub(crate) use vector::check_vocabulary;
pub use vector::{VectorEntity, Vocabulary};
