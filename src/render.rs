//! JSON-friendly renderings of clustering results.
//!
//! Two shapes are produced for both result types:
//!
//! - **Nested** ([`NestedTree`], [`CentroidSummary`]): a compact description of the merge
//!   tree. A leaf renders as its blog name, a merge of two leaves as
//!   `{"type": "leaf", "blogs": [a, b]}`, a merge of two subtrees as
//!   `{"type": "connector", "next": [l, r]}`, and a mixed merge as
//!   `{"type": "node", "blog": leaf, "next": subtree}`.
//! - **Tree view** ([`TreeView`]): the `{text, children}` / `{text, icon: false}` shape
//!   expected by jsTree-style widgets.
//!
//! All renderers are pure functions of the result they are given.

use crate::cluster::{KmeansFit, MergeTree, NodeId, NodeShape};
use crate::error::Result;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Nested rendering of a merge tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NestedTree {
    /// A single blog, rendered as its name.
    Blog(String),
    /// A merge node.
    Branch(Branch),
}

/// Merge node in the nested rendering, tagged by `type`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Branch {
    /// Both children are blogs.
    Leaf {
        /// Left and right blog names.
        blogs: [String; 2],
    },
    /// Both children are merge nodes.
    Connector {
        /// Left and right subtrees.
        next: Box<[NestedTree; 2]>,
    },
    /// One blog child and one subtree child.
    Node {
        /// The blog child.
        blog: String,
        /// The subtree child.
        next: Box<NestedTree>,
    },
}

/// jsTree-style rendering.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TreeView {
    /// A blog.
    Item {
        /// Blog name.
        text: String,
        /// Always `false`: no icon for blogs.
        icon: bool,
    },
    /// A group of items or groups.
    Group {
        /// Group label (empty for merge nodes).
        text: String,
        /// Child entries.
        children: Vec<TreeView>,
    },
}

impl TreeView {
    fn item(text: String) -> Self {
        TreeView::Item { text, icon: false }
    }
}

/// Nested rendering of one k-means centroid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CentroidSummary {
    /// Number of assigned blogs.
    pub length: usize,
    /// Names of the assigned blogs, in input order.
    pub assignments: Vec<String>,
}

/// Render a merge tree in the nested shape.
pub fn nested(tree: &MergeTree<'_>) -> NestedTree {
    nested_node(tree, tree.root())
}

fn nested_node(tree: &MergeTree<'_>, id: NodeId) -> NestedTree {
    let Some((left, right)) = tree.node(id).children() else {
        return NestedTree::Blog(leaf_name(tree, id));
    };
    let branch = match tree.shape(id) {
        NodeShape::LeafParent => Branch::Leaf {
            blogs: [leaf_name(tree, left), leaf_name(tree, right)],
        },
        NodeShape::Connector => Branch::Connector {
            next: Box::new([nested_node(tree, left), nested_node(tree, right)]),
        },
        _ => {
            let (blog, subtree) = split_mixed(tree, left, right);
            Branch::Node {
                blog: leaf_name(tree, blog),
                next: Box::new(nested_node(tree, subtree)),
            }
        }
    };
    NestedTree::Branch(branch)
}

/// Render a merge tree in the tree-view shape.
pub fn tree_view(tree: &MergeTree<'_>) -> TreeView {
    tree_view_node(tree, tree.root())
}

fn tree_view_node(tree: &MergeTree<'_>, id: NodeId) -> TreeView {
    let Some((left, right)) = tree.node(id).children() else {
        return TreeView::item(leaf_name(tree, id));
    };
    let (first, second) = match tree.shape(id) {
        NodeShape::Mixed => split_mixed(tree, left, right),
        _ => (left, right),
    };
    TreeView::Group {
        text: String::new(),
        children: vec![tree_view_node(tree, first), tree_view_node(tree, second)],
    }
}

/// `(leaf child, subtree child)` of a mixed node.
fn split_mixed(tree: &MergeTree<'_>, left: NodeId, right: NodeId) -> (NodeId, NodeId) {
    if tree.node(left).is_leaf() {
        (left, right)
    } else {
        (right, left)
    }
}

fn leaf_name(tree: &MergeTree<'_>, id: NodeId) -> String {
    tree.name(id).unwrap_or_default().to_string()
}

/// Render every centroid as `{length, assignments}`.
pub fn centroid_summaries(fit: &KmeansFit<'_>) -> Vec<CentroidSummary> {
    fit.centroids()
        .iter()
        .map(|c| CentroidSummary {
            length: c.len(),
            assignments: fit.members(c).map(|m| m.label()).collect(),
        })
        .collect()
}

/// Render every centroid as a tree-view group labelled by its id.
pub fn centroid_tree_view(fit: &KmeansFit<'_>) -> Vec<TreeView> {
    fit.centroids()
        .iter()
        .map(|c| TreeView::Group {
            text: c.id().to_string(),
            children: fit.members(c).map(|m| TreeView::item(m.label())).collect(),
        })
        .collect()
}

/// Encode any rendering as JSON.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(s)
}

/// Write a rendering to `path` as JSON.
pub fn dump<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>, pretty: bool) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{Agglomerative, Iterations, Kmeans, VectorEntity, Vocabulary};
    use serde_json::json;
    use std::sync::Arc;

    fn dataset(rows: &[(&str, &[f64])]) -> (Arc<Vocabulary>, Vec<VectorEntity>) {
        let width = rows[0].1.len();
        let vocab = Arc::new(Vocabulary::new((0..width).map(|i| format!("w{i}"))).unwrap());
        let data = rows
            .iter()
            .map(|(name, counts)| {
                VectorEntity::new(*name, Arc::clone(&vocab), counts.to_vec()).unwrap()
            })
            .collect();
        (vocab, data)
    }

    #[test]
    fn nested_mixed_tree() {
        let (vocab, data) = dataset(&[
            ("X", &[10.0, 0.0]),
            ("Y", &[0.0, 10.0]),
            ("Z", &[10.0, 1.0]),
        ]);
        let tree = Agglomerative::new().fit(&data, &vocab).unwrap();

        let value = serde_json::to_value(tree.to_nested()).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "node",
                "blog": "Y",
                "next": { "type": "leaf", "blogs": ["X", "Z"] }
            })
        );

        let view = serde_json::to_value(tree.to_tree_view()).unwrap();
        assert_eq!(
            view,
            json!({
                "text": "",
                "children": [
                    { "text": "Y", "icon": false },
                    { "text": "", "children": [
                        { "text": "X", "icon": false },
                        { "text": "Z", "icon": false }
                    ]}
                ]
            })
        );
    }

    #[test]
    fn nested_connector() {
        // Two tight pairs pointing in opposite directions.
        let (vocab, data) = dataset(&[
            ("a1", &[9.0, 1.0, 0.0]),
            ("b1", &[0.0, 1.0, 9.0]),
            ("a2", &[9.0, 1.0, 1.0]),
            ("b2", &[1.0, 1.0, 9.0]),
        ]);
        let tree = Agglomerative::new().fit(&data, &vocab).unwrap();
        let value = serde_json::to_value(tree.to_nested()).unwrap();
        assert_eq!(value["type"], "connector");
        let next = value["next"].as_array().unwrap();
        assert_eq!(next.len(), 2);
        for child in next {
            assert_eq!(child["type"], "leaf");
        }
    }

    #[test]
    fn single_leaf_renders_as_name() {
        let (vocab, data) = dataset(&[("solo", &[1.0, 2.0])]);
        let tree = Agglomerative::new().fit(&data, &vocab).unwrap();
        assert_eq!(tree.to_nested(), NestedTree::Blog("solo".into()));
        assert_eq!(
            serde_json::to_value(tree.to_tree_view()).unwrap(),
            json!({ "text": "solo", "icon": false })
        );
    }

    #[test]
    fn centroid_renderings() {
        let (vocab, data) = dataset(&[
            ("p", &[1.0, 2.0, 3.0]),
            ("q", &[2.0, 4.0, 7.0]),
        ]);
        let fit = Kmeans::new(1)
            .with_iterations(Iterations::Fixed(2))
            .with_seed(1)
            .fit(&data, &vocab)
            .unwrap();

        let summaries = serde_json::to_value(centroid_summaries(&fit)).unwrap();
        assert_eq!(summaries, json!([{ "length": 2, "assignments": ["p", "q"] }]));

        let view = serde_json::to_value(centroid_tree_view(&fit)).unwrap();
        assert_eq!(
            view,
            json!([{
                "text": "0",
                "children": [
                    { "text": "p", "icon": false },
                    { "text": "q", "icon": false }
                ]
            }])
        );
    }

    #[test]
    fn json_string_and_dump() {
        let value = NestedTree::Branch(Branch::Leaf {
            blogs: ["a".into(), "b".into()],
        });
        assert_eq!(
            to_json_string(&value, false).unwrap(),
            r#"{"type":"leaf","blogs":["a","b"]}"#
        );
        assert!(to_json_string(&value, true).unwrap().contains('\n'));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.json");
        dump(&value, &path, false).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, r#"{"type":"leaf","blogs":["a","b"]}"#);
    }
}
