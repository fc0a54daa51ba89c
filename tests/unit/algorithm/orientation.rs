//! Tests for orientation scoring, edge audits and the orientation search

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use tilefill::algorithm::orientation::{
        OrientationScore, evaluate, family_mismatches, search,
    };
    use tilefill::spatial::grid::{Assignment, Cell, TileGrid};
    use tilefill::spatial::regions::detect_regions;
    use tilefill::spatial::tiles::{FALLBACK_TILE, PLACEHOLDER_TILE, TileFamily};

    const P: u16 = PLACEHOLDER_TILE;

    fn grid(rows: &[Vec<u16>]) -> TileGrid {
        TileGrid::from_rows(rows).unwrap_or_else(|error| unreachable!("valid grid rejected: {error}"))
    }

    fn score(failures: usize, fallbacks: usize, fills: usize) -> OrientationScore {
        OrientationScore {
            failures,
            fallbacks,
            fills,
        }
    }

    // Verifies failures dominate, then fallbacks, then more fills
    // Verified by comparing fills ascending instead of descending
    #[test]
    fn test_score_ordering() {
        assert!(score(0, 5, 0).is_better_than(&score(1, 0, 9)));
        assert!(score(0, 1, 0).is_better_than(&score(0, 2, 9)));
        assert!(score(0, 0, 5).is_better_than(&score(0, 0, 3)));
        assert!(!score(0, 0, 3).is_better_than(&score(0, 0, 3)));
        assert_eq!(score(1, 2, 3).to_string(), "failures=1 fallbacks=2 fills=3");
    }

    // Tests kept tiles are counted against the family their cell expects
    // Verified by comparing against the origin family for every cell
    #[test]
    fn test_family_mismatches() {
        let pre_assigned = BTreeMap::from([(Cell::new(0, 0), 0xA1), (Cell::new(1, 0), 0xA3)]);
        assert_eq!(family_mismatches(&pre_assigned, TileFamily::from_index(0)), 2);
        assert_eq!(family_mismatches(&pre_assigned, TileFamily::from_index(1)), 0);
    }

    // Verifies a kept forest tile is merged into the fill and matched on its edge
    // Verified by leaving kept tiles out of the returned assignment
    #[test]
    fn test_evaluate_with_kept_tile() {
        let grid = grid(&[vec![0xA0, P]]);
        let regions = detect_regions(&grid);
        let Some(region) = regions.first() else {
            unreachable!("one region expected");
        };

        let fill = evaluate(&grid, region, TileFamily::from_index(0))
            .unwrap_or_else(|error| unreachable!("evaluate failed: {error}"));
        let expected: Assignment = [(Cell::new(0, 0), 0xA0), (Cell::new(0, 1), 0xA1)]
            .into_iter()
            .collect();
        assert_eq!(fill.assignment, expected);
        assert_eq!(fill.score, score(0, 0, 2));
    }

    // Verifies the search moves to the orientation that fits a kept tile
    // Verified by returning the first orientation unconditionally
    #[test]
    fn test_search_follows_kept_tile() {
        let grid = grid(&[vec![0xA1, P]]);
        let regions = detect_regions(&grid);
        let Some(region) = regions.first() else {
            unreachable!("one region expected");
        };

        let fill = search(&grid, region).unwrap_or_else(|error| unreachable!("search failed: {error}"));
        assert_eq!(fill.orientation.index(), 1);
        assert_eq!(fill.assignment.get(&Cell::new(0, 1)), Some(&0xA2));
        assert_eq!(fill.score, score(0, 0, 2));

        let fixed = evaluate(&grid, region, TileFamily::from_index(0))
            .unwrap_or_else(|error| unreachable!("evaluate failed: {error}"));
        assert_eq!(fixed.score.failures, 1);
    }

    // Verifies ties keep the first orientation and a lone cell falls back cleanly
    // Verified by replacing the best on equal scores
    #[test]
    fn test_search_tie_keeps_first() {
        let grid = grid(&[
            vec![0x00, 0x00, 0x00],
            vec![0x00, P, 0x00],
            vec![0x00, 0x00, 0x00],
        ]);
        let regions = detect_regions(&grid);
        let Some(region) = regions.first() else {
            unreachable!("one region expected");
        };

        let fill = search(&grid, region).unwrap_or_else(|error| unreachable!("search failed: {error}"));
        assert_eq!(fill.orientation.index(), 0);
        assert_eq!(fill.score, score(0, 1, 0));
        assert_eq!(fill.assignment.get(&Cell::new(1, 1)), Some(&FALLBACK_TILE));
        assert_eq!(fill.fallback.len(), 1);
    }
}
