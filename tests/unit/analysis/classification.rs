//! Tests for the shape signature candidate index

#[cfg(test)]
mod tests {
    use tilefill::AlgorithmError;
    use tilefill::analysis::classification::ShapeClassificationIndex;
    use tilefill::spatial::grid::Cell;
    use tilefill::spatial::path::ClosedPath;

    fn square() -> ClosedPath {
        ClosedPath::new(
            [(0, 0), (0, 1), (1, 1), (1, 0)]
                .into_iter()
                .map(Cell::from)
                .collect(),
        )
        .unwrap_or_else(|error| unreachable!("square rejected: {error}"))
    }

    // Verifies observing a fringe records one candidate per signature
    // Verified by keying observations by path index instead of signature
    #[test]
    fn test_observe_records_signatures() {
        let path = square();
        let mut index = ShapeClassificationIndex::new();
        let observed = index.observe(&path, &[0x60, 0x61, 0x62, 0x63]);
        assert!(observed.is_ok());
        assert_eq!(index.len(), 4);

        let first = path
            .signature(0)
            .unwrap_or_else(|error| unreachable!("signature failed: {error}"));
        assert_eq!(
            index.get(&first).map(|tiles| tiles.iter().copied().collect::<Vec<_>>()),
            Some(vec![0x60])
        );
    }

    // Verifies repeated observations accumulate into a sorted set
    // Verified by replacing the set instead of extending it
    #[test]
    fn test_insert_accumulates() {
        let path = square();
        let signature = path
            .signature(2)
            .unwrap_or_else(|error| unreachable!("signature failed: {error}"));
        let mut index = ShapeClassificationIndex::new();
        index.insert(signature, [0x70, 0x50]);
        index.insert(signature, [0x60, 0x50]);
        assert_eq!(
            index.get(&signature).map(|tiles| tiles.iter().copied().collect::<Vec<_>>()),
            Some(vec![0x50, 0x60, 0x70])
        );
    }

    // Verifies a tile list of the wrong length is rejected
    // Verified by zipping without the length check
    #[test]
    fn test_observe_rejects_length_mismatch() {
        let mut index = ShapeClassificationIndex::new();
        let result = index.observe(&square(), &[0x60]);
        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidParameter {
                parameter: "tiles",
                ..
            })
        ));
        assert!(index.is_empty());
    }

    // Verifies an unseen signature is reported as an unknown shape
    // Verified by returning an empty set for unseen signatures
    #[test]
    fn test_candidates_unknown_signature() {
        let path = square();
        let signature = path
            .signature(1)
            .unwrap_or_else(|error| unreachable!("signature failed: {error}"));
        let mut index = ShapeClassificationIndex::new();
        assert!(matches!(
            index.candidates(&signature),
            Err(AlgorithmError::UnknownShape { index: 0, .. })
        ));

        index.insert(signature, [0x61]);
        assert_eq!(
            index
                .candidates(&signature)
                .map(|tiles| tiles.iter().copied().collect::<Vec<_>>())
                .ok(),
            Some(vec![0x61])
        );
    }
}
