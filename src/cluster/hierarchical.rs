//! Agglomerative (bottom-up) hierarchical clustering.
//!
//! Every input starts as its own leaf. Each step finds the closest pair in the working
//! set, replaces it by a merge node whose representative is the elementwise mean of the
//! two children's representatives, and records the merge distance. With `n` inputs the
//! run performs exactly `n - 1` merges and ends with a single root.
//!
//! ## Determinism
//!
//! Pairs are scanned in working-set order (`i < j`, outer `i`) and only a strictly
//! smaller distance replaces the current best, so ties resolve to the first pair
//! encountered. New merge nodes are appended to the end of the working set. There is
//! no randomness: the same input order always yields the same tree.
//!
//! ## Complexity
//!
//! Each step scans all `O(m²)` live pairs; distances are memoised, so only the new
//! node's distances are computed per merge. Overall time is `O(n³)`.
//!
//! ## Representation
//!
//! Nodes live in an arena ([`MergeTree::nodes`]) addressed by [`NodeId`]. Leaves come
//! first (`id == input index`), merge nodes follow in creation order, and the root is the
//! last node. Parents are stored as optional ids.

use super::pearson;
use super::util::DistanceCache;
use super::vector::{check_aligned, VectorEntity, Vocabulary};
use crate::error::Result;
use crate::render::{self, NestedTree, TreeView};
use log::{debug, info};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Index of a node in a [`MergeTree`].
pub type NodeId = usize;

/// Payload of a tree node.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// Wraps one input vector (index into the clustered slice).
    Leaf {
        /// Input index.
        item: usize,
    },
    /// Merge of two subtrees.
    Merge {
        /// First child (earlier in the working set).
        left: NodeId,
        /// Second child.
        right: NodeId,
        /// Elementwise mean of the children's representatives.
        representative: VectorEntity,
    },
}

/// A node in the merge tree.
#[derive(Clone, Debug)]
pub struct MergeNode {
    /// Node identifier (also the index into the tree's `nodes` array).
    pub id: NodeId,

    /// Merge node that absorbed this one (`None` for the root).
    pub parent: Option<NodeId>,

    /// Merge distance (0.0 for leaves).
    pub distance: f64,

    /// Number of leaves under this node.
    pub size: usize,

    /// Leaf or merge payload.
    pub kind: NodeKind,
}

impl MergeNode {
    /// True for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// `(left, right)` for merge nodes.
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Merge { left, right, .. } => Some((left, right)),
        }
    }
}

/// How a node relates to its children; drives the nested rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeShape {
    /// A single input vector.
    Leaf,
    /// Merge node whose children are both leaves.
    LeafParent,
    /// Merge node whose children are both merge nodes.
    Connector,
    /// Merge node with one leaf child and one merge child.
    Mixed,
}

/// Agglomerative clusterer using Pearson distance and mean-representative merging.
#[derive(Clone, Debug, Default)]
pub struct Agglomerative;

impl Agglomerative {
    /// Create a new clusterer.
    pub fn new() -> Self {
        Self
    }

    /// Build the merge tree for `data`.
    pub fn fit<'a>(
        &self,
        data: &'a [VectorEntity],
        vocabulary: &Arc<Vocabulary>,
    ) -> Result<MergeTree<'a>> {
        check_aligned(data, vocabulary)?;

        let n = data.len();
        let mut nodes: Vec<MergeNode> = Vec::with_capacity(2 * n - 1);
        for i in 0..n {
            nodes.push(MergeNode {
                id: i,
                parent: None,
                distance: 0.0,
                size: 1,
                kind: NodeKind::Leaf { item: i },
            });
        }

        let mut working: Vec<NodeId> = (0..n).collect();
        let mut cache = DistanceCache::default();
        for i in 1..n {
            fill_distances(&mut cache, &nodes, data, i, &working[..i]);
        }

        let mut iterations = 0usize;
        while working.len() > 1 {
            iterations += 1;

            let (left, right, dist) = match closest_pair(&working, &mut cache, &nodes, data) {
                Some(pair) => pair,
                None => break,
            };

            let merged = representative(&nodes, data, left)
                .average(representative(&nodes, data, right));
            let id = nodes.len();
            let size = nodes[left].size + nodes[right].size;
            nodes.push(MergeNode {
                id,
                parent: None,
                distance: dist,
                size,
                kind: NodeKind::Merge {
                    left,
                    right,
                    representative: merged,
                },
            });
            nodes[left].parent = Some(id);
            nodes[right].parent = Some(id);

            working.retain(|&w| w != left && w != right);
            cache.evict(left);
            cache.evict(right);
            fill_distances(&mut cache, &nodes, data, id, &working);
            working.push(id);

            debug!(
                "merge {iterations}: {left} + {right} -> {id} (d={dist:.6}), {} left",
                working.len()
            );
        }

        let root = working.first().copied().unwrap_or(0);
        info!("hierarchical finished: n={n}, iterations={iterations}, root={root}");

        Ok(MergeTree {
            data,
            nodes,
            root,
            iterations,
        })
    }
}

fn representative<'n>(
    nodes: &'n [MergeNode],
    data: &'n [VectorEntity],
    id: NodeId,
) -> &'n VectorEntity {
    match &nodes[id].kind {
        NodeKind::Leaf { item } => &data[*item],
        NodeKind::Merge { representative, .. } => representative,
    }
}

/// First pair (in scan order) with the strictly smallest distance.
fn closest_pair(
    working: &[NodeId],
    cache: &mut DistanceCache,
    nodes: &[MergeNode],
    data: &[VectorEntity],
) -> Option<(NodeId, NodeId, f64)> {
    let mut best: Option<(NodeId, NodeId, f64)> = None;
    for (i, &a) in working.iter().enumerate() {
        for &b in &working[i + 1..] {
            let d = match cache.get(a, b) {
                Some(d) => d,
                None => {
                    let d = pearson::distance(
                        representative(nodes, data, a),
                        representative(nodes, data, b),
                    );
                    cache.insert(a, b, d);
                    d
                }
            };
            if best.map_or(true, |(_, _, bd)| d < bd) {
                best = Some((a, b, d));
            }
        }
    }
    best
}

#[cfg(not(feature = "parallel"))]
fn fill_distances(
    cache: &mut DistanceCache,
    nodes: &[MergeNode],
    data: &[VectorEntity],
    id: NodeId,
    others: &[NodeId],
) {
    let rep = representative(nodes, data, id);
    for &o in others {
        cache.insert(id, o, pearson::distance(rep, representative(nodes, data, o)));
    }
}

#[cfg(feature = "parallel")]
fn fill_distances(
    cache: &mut DistanceCache,
    nodes: &[MergeNode],
    data: &[VectorEntity],
    id: NodeId,
    others: &[NodeId],
) {
    let rep = representative(nodes, data, id);
    let dists: Vec<(NodeId, f64)> = others
        .par_iter()
        .map(|&o| (o, pearson::distance(rep, representative(nodes, data, o))))
        .collect();
    for (o, d) in dists {
        cache.insert(id, o, d);
    }
}

/// Result of an agglomerative run: a strict binary merge tree over the inputs.
#[derive(Clone, Debug)]
pub struct MergeTree<'a> {
    data: &'a [VectorEntity],
    nodes: Vec<MergeNode>,
    root: NodeId,
    iterations: usize,
}

impl<'a> MergeTree<'a> {
    /// Root node id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Access all nodes (leaves first, then merges in creation order).
    pub fn nodes(&self) -> &[MergeNode] {
        &self.nodes
    }

    /// Node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a node of this tree.
    pub fn node(&self, id: NodeId) -> &MergeNode {
        &self.nodes[id]
    }

    /// Number of merge steps performed (`n - 1`).
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// The clustered inputs.
    pub fn data(&self) -> &'a [VectorEntity] {
        self.data
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Number of merge nodes.
    pub fn merge_count(&self) -> usize {
        self.nodes.len() - self.leaf_count()
    }

    /// The input wrapped by a leaf.
    pub fn item(&self, id: NodeId) -> Option<&'a VectorEntity> {
        match self.nodes[id].kind {
            NodeKind::Leaf { item } => Some(&self.data[item]),
            NodeKind::Merge { .. } => None,
        }
    }

    /// Name of the input wrapped by a leaf.
    pub fn name(&self, id: NodeId) -> Option<&'a str> {
        self.item(id).and_then(VectorEntity::name)
    }

    /// The vector a node is compared by: the input for leaves, the mean for merges.
    pub fn representative(&self, id: NodeId) -> &VectorEntity {
        representative(&self.nodes, self.data, id)
    }

    /// Classify a node by its children.
    pub fn shape(&self, id: NodeId) -> NodeShape {
        match self.nodes[id].children() {
            None => NodeShape::Leaf,
            Some((l, r)) => match (self.nodes[l].is_leaf(), self.nodes[r].is_leaf()) {
                (true, true) => NodeShape::LeafParent,
                (false, false) => NodeShape::Connector,
                _ => NodeShape::Mixed,
            },
        }
    }

    /// Merge distances in merge order.
    pub fn merge_distances(&self) -> Vec<f64> {
        self.nodes
            .iter()
            .filter(|n| !n.is_leaf())
            .map(|n| n.distance)
            .collect()
    }

    /// Nested rendering (`leaf` / `connector` / `node` objects, blog names at the leaves).
    pub fn to_nested(&self) -> NestedTree {
        render::nested(self)
    }

    /// Tree-view rendering (`{text, children}` / `{text, icon: false}`).
    pub fn to_tree_view(&self) -> TreeView {
        render::tree_view(self)
    }
}
