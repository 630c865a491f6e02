//! Tests for the uniform shuffle and randomized Kruskal construction

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use rgbtree::AlgorithmError;
    use rgbtree::lattice::{Edge, Lattice};
    use rgbtree::tree::kruskal::shuffle;
    use rgbtree::tree::{
        KruskalBuilder, Orientation, SpanningTreeBuilder, build_tree_kruskal,
        verify_spanning_tree,
    };
    use std::collections::HashMap;

    // Tests shuffling permutes without losing elements
    // Verified by overwriting instead of swapping
    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut items: Vec<u32> = (0..1000).collect();

        shuffle(&mut items, &mut rng);

        assert_ne!(items, (0..1000).collect::<Vec<_>>());
        items.sort_unstable();
        assert_eq!(items, (0..1000).collect::<Vec<_>>());
    }

    // Tests all orderings of three items are roughly equally likely
    // Verified by drawing j from [0, i) instead of [0, i]
    #[test]
    fn test_shuffle_uniform_over_orderings() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<[u8; 3], usize> = HashMap::new();

        for _ in 0..6000 {
            let mut items = [0, 1, 2];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        assert!(counts.values().all(|&count| (800..=1200).contains(&count)));
    }

    // Tests short inputs are left alone
    // Verified by iterating from index 0
    #[test]
    fn test_shuffle_trivial_inputs() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut empty: [u32; 0] = [];
        let mut single = [9];

        shuffle(&mut empty, &mut rng);
        shuffle(&mut single, &mut rng);

        assert_eq!(single, [9]);
    }

    // Tests grid trees span with N - 1 lattice edges
    // Verified by accepting every edge
    #[test]
    fn test_grid_tree_spans() {
        let Ok(grid) = Lattice::grid(9, 7) else {
            unreachable!("Small grid should be valid");
        };
        let mut rng = StdRng::seed_from_u64(5);
        let Ok(builder) = KruskalBuilder::new(&grid, &mut rng) else {
            unreachable!("Edge list should allocate");
        };
        let Ok(tree) = builder.build() else {
            unreachable!("Connected grid should yield a tree");
        };

        assert_eq!(tree.orientation(), Orientation::Undirected);
        assert_eq!(tree.edge_count(), 62);
        assert!(verify_spanning_tree(&tree, grid.center()).is_ok());
        for Edge(a, b) in tree.edges() {
            assert!(grid.neighbors(a).any(|next| next == b));
        }
    }

    // Tests cube trees respect the degree bound
    // Verified by lowering adjacency capacity to 4
    #[test]
    fn test_cube_tree_degree_bound() {
        let Ok(cube) = Lattice::cube(5) else {
            unreachable!("Small cube should be valid");
        };
        let mut rng = StdRng::seed_from_u64(17);
        let Ok(tree) = KruskalBuilder::new(&cube, &mut rng).and_then(SpanningTreeBuilder::build)
        else {
            unreachable!("Connected cube should yield a tree");
        };

        assert!(verify_spanning_tree(&tree, 0).is_ok());
        assert!((0..125).all(|vertex| tree.adjacency().degree(vertex) <= 6));
    }

    // Tests identical seeds build identical trees
    // Verified by seeding the shuffle from entropy
    #[test]
    fn test_seeded_build_reproducible() {
        let Ok(grid) = Lattice::grid(6, 6) else {
            unreachable!("Small grid should be valid");
        };
        let build = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            grid.edges()
                .and_then(|edges| build_tree_kruskal(&grid, edges, &mut rng))
                .map(|tree| tree.edges())
                .ok()
        };

        assert!(build(1).is_some());
        assert_eq!(build(1), build(1));
    }

    // Tests a disconnected edge list fails instead of returning a forest
    // Verified by removing the accepted edge count check
    #[test]
    fn test_disconnected_edges_error() {
        let Ok(grid) = Lattice::grid(2, 2) else {
            unreachable!("Small grid should be valid");
        };
        let mut rng = StdRng::seed_from_u64(0);

        let result = build_tree_kruskal(&grid, vec![Edge(0, 1), Edge(2, 3)], &mut rng);

        assert!(matches!(
            result,
            Err(AlgorithmError::InvariantViolation { .. })
        ));
    }

    // Tests foreign vertices in the edge list are rejected
    // Verified by skipping endpoint validation
    #[test]
    fn test_out_of_range_edge_error() {
        let Ok(grid) = Lattice::grid(2, 2) else {
            unreachable!("Small grid should be valid");
        };
        let mut rng = StdRng::seed_from_u64(0);

        let result = build_tree_kruskal(&grid, vec![Edge(0, 1), Edge(1, 4)], &mut rng);

        assert!(matches!(
            result,
            Err(AlgorithmError::VertexOutOfRange { vertex: 4, .. })
        ));
    }
}
