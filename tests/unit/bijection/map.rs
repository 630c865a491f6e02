//! Tests for permutation validation and inversion

#[cfg(test)]
mod tests {
    use rgbtree::AlgorithmError;
    use rgbtree::bijection::Bijection;

    // Tests the identity maps every vertex to itself
    // Verified by starting the identity at 1
    #[test]
    fn test_identity() {
        let Ok(identity) = Bijection::identity(5) else {
            unreachable!("Small map should allocate");
        };

        assert_eq!(identity.as_slice(), &[0, 1, 2, 3, 4]);
        assert!(identity.is_permutation());
        assert_eq!(identity.get(3), Some(3));
        assert_eq!(identity.get(5), None);
    }

    // Tests repeated and out-of-range images are rejected
    // Verified by only checking the range
    #[test]
    fn test_try_from_vec_rejects_defects() {
        assert!(Bijection::try_from_vec(vec![2, 0, 1]).is_ok());
        assert!(matches!(
            Bijection::try_from_vec(vec![0, 0, 1]),
            Err(AlgorithmError::InvariantViolation { .. })
        ));
        assert!(Bijection::try_from_vec(vec![0, 3, 1]).is_err());
    }

    // Tests composing with the inverse gives the identity
    // Verified by writing the inverse at the source index
    #[test]
    fn test_inverse() {
        let Ok(map) = Bijection::try_from_vec(vec![3, 0, 2, 1]) else {
            unreachable!("Valid permutation should be accepted");
        };
        let Ok(inverse) = map.inverse() else {
            unreachable!("Inverse should allocate");
        };

        assert_eq!(inverse.as_slice(), &[1, 3, 2, 0]);
        for vertex in 0..4 {
            assert_eq!(map.get(vertex).and_then(|image| inverse.get(image)), Some(vertex));
        }
    }

    // Tests the empty map is a valid permutation
    // Verified by requiring a non-empty domain
    #[test]
    fn test_empty_map() {
        let Ok(empty) = Bijection::try_from_vec(Vec::new()) else {
            unreachable!("Empty permutation should be accepted");
        };

        assert!(empty.is_empty());
        assert_eq!(empty.into_vec(), Vec::<u32>::new());
    }
}
