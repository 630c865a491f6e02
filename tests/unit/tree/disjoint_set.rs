//! Tests for union-find connectivity, ranks and path compression

#[cfg(test)]
mod tests {
    use rgbtree::AlgorithmError;
    use rgbtree::tree::DisjointSet;

    // Tests fresh sets are singletons
    // Verified by initialising every parent to zero
    #[test]
    fn test_initial_singletons() {
        let Ok(mut set) = DisjointSet::new(4) else {
            unreachable!("Small set should allocate");
        };

        assert_eq!(set.len(), 4);
        for vertex in 0..4 {
            assert_eq!(set.find(vertex).ok(), Some(vertex));
        }
        assert_eq!(set.connected(0, 1).ok(), Some(false));
    }

    // Tests union merges once and reports redundant unions
    // Verified by always returning true from union
    #[test]
    fn test_union_reports_merge() {
        let Ok(mut set) = DisjointSet::new(5) else {
            unreachable!("Small set should allocate");
        };

        assert_eq!(set.union(0, 1).ok(), Some(true));
        assert_eq!(set.union(1, 0).ok(), Some(false));
        assert_eq!(set.union(2, 3).ok(), Some(true));
        assert_eq!(set.union(1, 3).ok(), Some(true));
        assert_eq!(set.union(0, 2).ok(), Some(false));

        assert_eq!(set.connected(0, 3).ok(), Some(true));
        assert_eq!(set.connected(0, 4).ok(), Some(false));
    }

    // Tests long chains resolve to one root
    // Verified by skipping the relink loop
    #[test]
    fn test_long_chain_single_root() {
        let count = 10_000;
        let Ok(mut set) = DisjointSet::new(count) else {
            unreachable!("Set should allocate");
        };

        for vertex in 1..count as u32 {
            assert_eq!(set.union(vertex - 1, vertex).ok(), Some(true));
        }

        let root = set.find(0).ok();
        for vertex in 0..count as u32 {
            assert_eq!(set.find(vertex).ok(), root);
        }
    }

    // Tests self-union is a no-op
    // Verified by incrementing rank on equal roots
    #[test]
    fn test_self_union() {
        let Ok(mut set) = DisjointSet::new(2) else {
            unreachable!("Small set should allocate");
        };

        assert_eq!(set.union(1, 1).ok(), Some(false));
        assert_eq!(set.connected(0, 1).ok(), Some(false));
    }

    // Tests out-of-range ids are reported
    // Verified by clamping the vertex id
    #[test]
    fn test_out_of_range() {
        let Ok(mut set) = DisjointSet::new(3) else {
            unreachable!("Small set should allocate");
        };

        assert!(matches!(
            set.find(3),
            Err(AlgorithmError::VertexOutOfRange {
                vertex: 3,
                vertex_count: 3
            })
        ));
        assert!(set.union(0, 9).is_err());
    }
}
