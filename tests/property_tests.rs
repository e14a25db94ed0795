use blogclust::cluster::{pearson, Agglomerative, Iterations, Kmeans, VectorEntity, Vocabulary};
use proptest::prelude::*;
use std::sync::Arc;

fn build(rows: &[Vec<f64>]) -> (Arc<Vocabulary>, Vec<VectorEntity>) {
    let width = rows[0].len();
    let vocab = Arc::new(Vocabulary::new((0..width).map(|i| format!("w{i}"))).unwrap());
    let data = rows
        .iter()
        .enumerate()
        .map(|(i, r)| VectorEntity::new(format!("blog{i}"), Arc::clone(&vocab), r.clone()).unwrap())
        .collect();
    (vocab, data)
}

fn count_rows(max_rows: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    (2usize..6).prop_flat_map(move |width| {
        prop::collection::vec(
            prop::collection::vec((0u32..20).prop_map(f64::from), width),
            1..max_rows,
        )
    })
}

proptest! {
    #[test]
    fn prop_distance_is_defined_and_bounded(
        a in prop::collection::vec((0u32..50).prop_map(f64::from), 4),
        b in prop::collection::vec((0u32..50).prop_map(f64::from), 4),
    ) {
        let (_, data) = build(&[a, b]);
        let d = pearson::distance(&data[0], &data[1]);
        prop_assert!(!d.is_nan());
        prop_assert!((-1e-9..=2.0 + 1e-9).contains(&d));
        prop_assert_eq!(d, pearson::distance(&data[1], &data[0]));
    }

    #[test]
    fn prop_self_distance_is_zero_or_degenerate(
        a in prop::collection::vec((0u32..50).prop_map(f64::from), 5),
    ) {
        let (_, data) = build(&[a]);
        match pearson::try_distance(&data[0], &data[0]) {
            Some(d) => prop_assert!(d.abs() < 1e-9),
            None => prop_assert_eq!(pearson::distance(&data[0], &data[0]), pearson::MAX_DISTANCE),
        }
    }

    #[test]
    fn prop_kmeans_all_assigned(rows in count_rows(20), k in 1usize..5, seed in any::<u64>()) {
        // Skip if k > n
        if k <= rows.len() {
            let (vocab, data) = build(&rows);
            let fit = Kmeans::new(k)
                .with_iterations(Iterations::Fixed(3))
                .with_seed(seed)
                .fit(&data, &vocab)
                .unwrap();

            prop_assert_eq!(fit.iterations(), 3);
            let labels = fit.labels();
            prop_assert_eq!(labels.len(), data.len());
            for &l in &labels {
                prop_assert!(l < k);
            }
            let total: usize = fit.centroids().iter().map(|c| c.len()).sum();
            prop_assert_eq!(total, data.len());
        }
    }

    #[test]
    fn prop_kmeans_single_cluster_takes_all(rows in count_rows(15), seed in any::<u64>()) {
        let (vocab, data) = build(&rows);
        let fit = Kmeans::new(1)
            .with_iterations(Iterations::UntilConverged)
            .with_seed(seed)
            .fit(&data, &vocab)
            .unwrap();
        prop_assert!(fit.converged());
        let expected: Vec<usize> = (0..data.len()).collect();
        prop_assert_eq!(fit.centroids()[0].assignments(), expected.as_slice());
    }

    #[test]
    fn prop_hierarchical_tree_shape(rows in count_rows(12)) {
        let (vocab, data) = build(&rows);
        let n = data.len();
        let tree = Agglomerative::new().fit(&data, &vocab).unwrap();

        prop_assert_eq!(tree.iterations(), n - 1);
        prop_assert_eq!(tree.leaf_count(), n);
        prop_assert_eq!(tree.merge_count(), n - 1);
        prop_assert_eq!(tree.node(tree.root()).size, n);
        prop_assert!(tree.node(tree.root()).parent.is_none());
        for d in tree.merge_distances() {
            prop_assert!(!d.is_nan());
        }
    }

    #[test]
    fn prop_hierarchical_is_deterministic(rows in count_rows(10)) {
        let (vocab, data) = build(&rows);
        let a = Agglomerative::new().fit(&data, &vocab).unwrap();
        let b = Agglomerative::new().fit(&data, &vocab).unwrap();
        for (x, y) in a.nodes().iter().zip(b.nodes()) {
            prop_assert_eq!(x.children(), y.children());
            prop_assert_eq!(x.distance.to_bits(), y.distance.to_bits());
        }
        prop_assert_eq!(a.to_nested(), b.to_nested());
    }
}
