//! Tests for the rule-based rough fill

#[cfg(test)]
mod tests {
    use tilefill::RoughFill;
    use tilefill::spatial::grid::{Cell, TileGrid};
    use tilefill::spatial::tiles::PLACEHOLDER_TILE;

    const P: u16 = PLACEHOLDER_TILE;

    fn grid(rows: &[Vec<u16>]) -> TileGrid {
        TileGrid::from_rows(rows).unwrap_or_else(|error| unreachable!("valid grid rejected: {error}"))
    }

    // Verifies open placeholders get base rough by checkerboard parity
    // Verified by using row parity alone
    #[test]
    fn test_base_rough_checkerboard() {
        let grid = TileGrid::placeholders(3, 3);
        let assignment = RoughFill.fill(&grid);
        assert_eq!(assignment.len(), 9);
        for (cell, tile) in &assignment {
            let expected = if (cell.row + cell.col) % 2 == 0 { 0x29 } else { 0x2C };
            assert_eq!(*tile, expected, "cell {cell}");
        }
    }

    // Verifies only placeholders connected to the origin are filled
    // Verified by seeding the traversal from every placeholder
    #[test]
    fn test_only_origin_component() {
        let grid = grid(&[vec![P, 0x66, P]]);
        let assignment = RoughFill.fill(&grid);
        assert_eq!(assignment.len(), 1);
        assert_eq!(assignment.get(&Cell::new(0, 0)), Some(&0x70));
    }

    // Verifies the right-hand marker wins over the one below
    // Verified by checking the down rule before the right rule
    #[test]
    fn test_edge_rule_priority() {
        let marked_right = grid(&[vec![P, 0x66], vec![0x64, 0x00]]);
        assert_eq!(RoughFill::tile_for(&marked_right, Cell::new(0, 0)), 0x70);

        let below = grid(&[vec![P, 0x00], vec![0x64, 0x00]]);
        assert_eq!(RoughFill::tile_for(&below, Cell::new(0, 0)), 0x71);
    }

    // Verifies odd cells take the second tile of an edge pair
    // Verified by always using the first tile of the pair
    #[test]
    fn test_edge_rule_parity() {
        let unmarked = grid(&[vec![0x00, P, 0x67]]);
        // A right-fringe marker only counts when it sits to the left
        assert_eq!(RoughFill::tile_for(&unmarked, Cell::new(0, 1)), 0x2C);

        let marked = grid(&[vec![0x67, P]]);
        assert_eq!(RoughFill::tile_for(&marked, Cell::new(0, 1)), 0x87);
    }

    // Verifies a grid whose origin is not a placeholder is left alone
    // Verified by starting the traversal at the first placeholder found
    #[test]
    fn test_origin_not_placeholder() {
        let grid = grid(&[vec![0x00, P], vec![P, P]]);
        assert!(RoughFill::reachable(&grid).is_empty());
        assert!(RoughFill.fill(&grid).is_empty());
    }
}
