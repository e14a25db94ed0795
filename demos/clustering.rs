//! K-means and hierarchical clustering on a small hand-written blog set.

use blogclust::render;
use blogclust::{Agglomerative, Iterations, Kmeans, VectorEntity, Vocabulary};
use std::sync::Arc;

fn main() {
    let vocab = Arc::new(
        Vocabulary::new(["compiler", "borrow", "flour", "oven", "goal", "league"]).unwrap(),
    );
    let blog = |name: &str, counts: [f64; 6]| {
        VectorEntity::new(name, Arc::clone(&vocab), counts.to_vec()).unwrap()
    };

    let data = vec![
        // Programming
        blog("Rustacean Station", [12.0, 9.0, 0.0, 1.0, 0.0, 1.0]),
        blog("Type Theory Daily", [15.0, 6.0, 1.0, 0.0, 1.0, 0.0]),
        blog("Lifetimes Weekly", [8.0, 14.0, 0.0, 0.0, 0.0, 2.0]),
        // Baking
        blog("Sourdough Notes", [0.0, 1.0, 14.0, 10.0, 0.0, 0.0]),
        blog("Crumb Shots", [1.0, 0.0, 9.0, 13.0, 1.0, 0.0]),
        // Football
        blog("Offside Trap", [0.0, 0.0, 1.0, 0.0, 11.0, 13.0]),
        blog("Sunday League", [1.0, 0.0, 0.0, 1.0, 14.0, 8.0]),
    ];

    // --- K-means (k=3) ---
    let fit = Kmeans::new(3)
        .with_iterations(Iterations::UntilConverged)
        .with_seed(42)
        .fit(&data, &vocab)
        .unwrap();
    println!(
        "=== K-means (k=3, {} iterations, converged={}) ===",
        fit.iterations(),
        fit.converged()
    );
    for centroid in fit.centroids() {
        let names: Vec<&str> = fit.members(centroid).filter_map(VectorEntity::name).collect();
        println!("  cluster {} => {:?}", centroid.id(), names);
    }

    // --- Hierarchical ---
    let tree = Agglomerative::new().fit(&data, &vocab).unwrap();
    println!("\n=== Hierarchical ({} merges) ===", tree.iterations());
    for (step, d) in tree.merge_distances().iter().enumerate() {
        println!("  merge {:2} at distance {:.4}", step + 1, d);
    }
    println!(
        "\n{}",
        render::to_json_string(&tree.to_nested(), true).unwrap()
    );
}
