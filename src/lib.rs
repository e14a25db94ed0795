//! Word-count clustering.
//!
//! `blogclust` groups text-frequency vectors ("blogs": a name plus a count per word of a
//! shared vocabulary) by Pearson correlation distance.
//!
//! The primary public API is under [`cluster`], which provides:
//! - k-means (random seeding, fixed-pass or run-until-stable)
//! - agglomerative hierarchical clustering (binary merge tree)
//!
//! [`dataset`] loads the tab-separated blog-data format and [`render`] turns results into
//! serde-serializable nested and tree-view shapes.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod dataset;
pub mod error;
pub mod render;

pub use cluster::{
    Agglomerative, Centroid, Iterations, Kmeans, KmeansFit, MergeNode, MergeTree, NodeId,
    NodeKind, NodeShape, VectorEntity, Vocabulary, WordVector,
};
pub use dataset::Dataset;
pub use error::{Error, Result};
