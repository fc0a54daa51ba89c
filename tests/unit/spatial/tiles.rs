//! Tests for exertion vectors and the forest family model

#[cfg(test)]
mod tests {
    use tilefill::spatial::grid::Direction;
    use tilefill::spatial::tiles::{
        EXERTION_CODES, Exertion, FALLBACK_TILE, PLACEHOLDER_TILE, TileFamily, exertion,
        exertions, is_fill_tile, is_forest_tile, total_ones,
    };

    // Verifies exertion codes are dense and invertible
    // Verified by dropping the width offset from code
    #[test]
    fn test_exertion_codes_round_trip() {
        let mut seen = Vec::new();
        for code in 0..EXERTION_CODES {
            let value = Exertion::from_code(code);
            assert!(value.is_some(), "code {code} should decode");
            if let Some(value) = value {
                assert_eq!(value.code(), code);
                seen.push(value);
            }
        }
        assert_eq!(Exertion::from_code(EXERTION_CODES), None);
        seen.dedup();
        assert_eq!(seen.len(), EXERTION_CODES);
    }

    // Verifies a 1-bit zero and a 2-bit zero are distinct values
    // Verified by comparing bits only in PartialEq
    #[test]
    fn test_zero_width_is_part_of_identity() {
        assert_ne!(Exertion::zero(1), Exertion::zero(2));
        assert!(Exertion::zero(1).is_zero());
        assert!(Exertion::zero(2).is_zero());
        assert_eq!(Exertion::two(1, 0).to_string(), "10");
        assert_eq!(Exertion::one(1).to_string(), "1");
    }

    // Tests the exertion table for a fill tile and a border tile
    // Verified by shifting the table index by one
    #[test]
    fn test_exertion_table_entries() {
        assert_eq!(
            exertions(0xA0).copied(),
            Some([
                Exertion::one(1),
                Exertion::one(1),
                Exertion::two(1, 1),
                Exertion::one(1)
            ])
        );
        assert_eq!(exertion(0xA5, Direction::Down), Some(Exertion::two(0, 0)));
        assert_eq!(exertion(0xAB, Direction::Up), Some(Exertion::two(1, 0)));
        assert_eq!(exertion(0x29, Direction::Up), None);
        assert_eq!(exertion(FALLBACK_TILE, Direction::Up), None);
    }

    // Verifies fill tiles carry the most set bits in their family
    // Verified by reordering the first family so a border tile comes first
    #[test]
    fn test_fill_tiles_have_most_ones() {
        for family in TileFamily::ALL {
            let fill = family.fill_tile();
            assert_eq!(family.variants().first(), Some(&fill));
            assert!(is_fill_tile(fill));
            assert_eq!(total_ones(fill), 5);
            for &tile in family.variants().iter().skip(1) {
                assert!(total_ones(tile) < total_ones(fill));
                assert!(!is_fill_tile(tile));
            }
        }
    }

    // Verifies family layout repeats every four columns and two rows
    // Verified by using row % 4 instead of row % 2
    #[test]
    fn test_family_at_cell() {
        let origin = TileFamily::from_index(1);
        assert_eq!(TileFamily::at(0, 0, origin).index(), 1);
        assert_eq!(TileFamily::at(0, 1, origin).index(), 2);
        assert_eq!(TileFamily::at(1, 0, origin).index(), 3);
        assert_eq!(TileFamily::at(1, 3, origin).index(), 2);
        assert_eq!(TileFamily::at(2, 0, origin).index(), 1);
        assert_eq!(TileFamily::at(0, 4, origin).index(), 1);
    }

    // Tests family membership and edge widths
    // Verified by returning the first family for every tile in of_tile
    #[test]
    fn test_family_membership_and_widths() {
        assert_eq!(TileFamily::of_tile(0xA9).map(TileFamily::index), Some(0));
        assert_eq!(TileFamily::of_tile(0xAA).map(TileFamily::index), Some(1));
        assert_eq!(TileFamily::of_tile(0xB5).map(TileFamily::index), Some(2));
        assert_eq!(TileFamily::of_tile(0xBB).map(TileFamily::index), Some(3));
        assert_eq!(TileFamily::of_tile(0x3F), None);

        let first = TileFamily::from_index(0);
        assert_eq!(first.width(Direction::Down), 2);
        assert_eq!(first.width(Direction::Up), 1);
        assert_eq!(first.zero(Direction::Down), Exertion::zero(2));
        assert_eq!(TileFamily::from_index(1).width(Direction::Up), 2);
        assert_eq!(first.to_string(), "$A0");
    }

    // Verifies the forest range excludes the placeholder and fallback
    // Verified by widening is_forest_tile to the full byte range
    #[test]
    fn test_forest_range() {
        assert!(is_forest_tile(0xA0));
        assert!(is_forest_tile(0xBB));
        assert!(!is_forest_tile(0x9F));
        assert!(!is_forest_tile(0xBC));
        assert!(!is_forest_tile(PLACEHOLDER_TILE));
        assert!(!is_forest_tile(FALLBACK_TILE));
    }
}
