//! Tests for loop-erased random walk construction

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use rgbtree::AlgorithmError;
    use rgbtree::lattice::{Edge, Lattice, LatticeSampler, VertexId};
    use rgbtree::tree::{
        Orientation, SpanningTreeBuilder, WilsonBuilder, build_tree_wilson, verify_spanning_tree,
    };

    fn scripted(steps: Vec<VertexId>) -> impl FnMut(VertexId) -> VertexId {
        let mut steps = steps.into_iter();
        move |_vertex| steps.next().unwrap_or(0)
    }

    // Tests a returning walk has its loop erased before splicing
    // Verified by splicing the raw walk
    #[test]
    fn test_loop_erased_before_splice() {
        let Ok(grid) = Lattice::grid(2, 2) else {
            unreachable!("Small grid should be valid");
        };
        let Ok(mut builder) = WilsonBuilder::new(&grid, 0, scripted(vec![3, 1, 0, 3, 1])) else {
            unreachable!("Builder should allocate");
        };

        let path = builder.walk_from(1).map(<[VertexId]>::to_vec).ok();
        assert_eq!(path, Some(vec![1, 0]));
        assert_eq!(builder.tree_size(), 2);
        assert!(builder.in_tree(1));
        assert!(!builder.in_tree(3));

        let Ok(tree) = builder.build() else {
            unreachable!("Scripted walk should complete");
        };
        assert_eq!(tree.edges(), vec![Edge(0, 1), Edge(1, 3), Edge(2, 3)]);
        assert_eq!(tree.adjacency().neighbors(1), &[3]);
    }

    // Tests probing a tree vertex walks nowhere
    // Verified by walking from tree vertices
    #[test]
    fn test_walk_from_tree_vertex_is_empty() {
        let Ok(grid) = Lattice::grid(3, 3) else {
            unreachable!("Small grid should be valid");
        };
        let Ok(mut builder) = WilsonBuilder::new(&grid, 4, scripted(vec![])) else {
            unreachable!("Builder should allocate");
        };

        assert_eq!(builder.walk_from(4).map(<[VertexId]>::len).ok(), Some(0));
        assert_eq!(builder.tree_size(), 1);
    }

    // Tests sampled trees span and point outward from the root
    // Verified by storing child-to-parent entries
    #[test]
    fn test_sampled_tree_spans() {
        let Ok(grid) = Lattice::grid(8, 5) else {
            unreachable!("Small grid should be valid");
        };
        let root = grid.center();
        let sampler = LatticeSampler::new(grid, StdRng::seed_from_u64(99));
        let Ok(tree) = build_tree_wilson(&grid, root, sampler) else {
            unreachable!("Connected grid should yield a tree");
        };

        assert_eq!(tree.orientation(), Orientation::Outward { root });
        assert_eq!(tree.edge_count(), 39);
        assert!(verify_spanning_tree(&tree, root).is_ok());
        for Edge(a, b) in tree.edges() {
            assert!(grid.neighbors(a).any(|next| next == b));
        }
    }

    // Tests cube trees built from a sampler span
    // Verified by stopping after the first walk
    #[test]
    fn test_cube_tree_spans() {
        let Ok(cube) = Lattice::cube(4) else {
            unreachable!("Small cube should be valid");
        };
        let sampler = LatticeSampler::new(cube, StdRng::seed_from_u64(1));
        let Ok(tree) = build_tree_wilson(&cube, cube.center(), sampler) else {
            unreachable!("Connected cube should yield a tree");
        };

        assert!(verify_spanning_tree(&tree, cube.center()).is_ok());
    }

    // Tests a root outside the lattice is rejected
    // Verified by skipping the root range check
    #[test]
    fn test_root_out_of_range() {
        let Ok(grid) = Lattice::grid(2, 2) else {
            unreachable!("Small grid should be valid");
        };

        assert!(matches!(
            build_tree_wilson(&grid, 4, scripted(vec![])),
            Err(AlgorithmError::VertexOutOfRange { vertex: 4, .. })
        ));
    }

    // Tests a sampler stepping off the lattice is reported
    // Verified by trusting sampled vertices
    #[test]
    fn test_sampler_out_of_range() {
        let Ok(grid) = Lattice::grid(2, 2) else {
            unreachable!("Small grid should be valid");
        };

        assert!(matches!(
            build_tree_wilson(&grid, 0, scripted(vec![17])),
            Err(AlgorithmError::VertexOutOfRange { vertex: 17, .. })
        ));
    }

    // Tests a single-vertex lattice needs no walks
    // Verified by requiring one walk per vertex
    #[test]
    fn test_single_vertex() {
        let Ok(cube) = Lattice::cube(1) else {
            unreachable!("Unit cube should be valid");
        };

        let tree = build_tree_wilson(&cube, 0, scripted(vec![])).ok();
        assert_eq!(tree.map(|tree| tree.edge_count()), Some(0));
    }
}
