//! Tests for worklist propagation over grid and path networks

#[cfg(test)]
mod tests {
    use tilefill::AlgorithmError;
    use tilefill::algorithm::bitset::{SlotSet, TileBitset};
    use tilefill::algorithm::constraint::{CellConstraint, ConstraintNetwork};
    use tilefill::algorithm::propagation::{ArcNetwork, PathNetwork, Worklist, propagate};
    use tilefill::analysis::frequency::NeighborFrequencyTable;
    use tilefill::spatial::grid::{Cell, Direction};
    use tilefill::spatial::tiles::{Exertion, TileFamily, TileId};

    struct Spinning;

    impl ArcNetwork for Spinning {
        const NAME: &'static str = "spinning";

        fn arc_count(&self) -> usize {
            1
        }

        fn units(&self) -> usize {
            0
        }

        fn revise(&mut self, _arc: usize, requeue: &mut Vec<usize>) {
            requeue.push(0);
        }
    }

    fn pair(left: CellConstraint, right: CellConstraint) -> ConstraintNetwork {
        ConstraintNetwork::new(
            (1, 2),
            vec![(Cell::new(0, 0), left), (Cell::new(0, 1), right)],
        )
    }

    fn set(tiles: &[TileId]) -> TileBitset {
        tiles.iter().copied().collect()
    }

    // Verifies the worklist never holds an arc twice
    // Verified by skipping the queued check in push
    #[test]
    fn test_worklist_deduplicates() {
        let mut worklist = Worklist::new(8);
        assert!(worklist.push(3));
        assert!(!worklist.push(3));
        assert!(!worklist.push(8));
        assert!(worklist.push(1));
        assert_eq!(worklist.len(), 2);

        assert_eq!(worklist.pop(), Some(3));
        assert!(worklist.push(3));
        assert_eq!(worklist.pop(), Some(1));
        assert_eq!(worklist.pop(), Some(3));
        assert!(worklist.is_empty());
    }

    // Verifies a network that never settles stops at the iteration cap
    // Verified by removing the limit check from propagate
    #[test]
    fn test_limit_reported() {
        let result = propagate(&mut Spinning, [0]);
        match result {
            Err(AlgorithmError::PropagationLimit {
                network,
                iterations,
                limit,
            }) => {
                assert_eq!(network, "spinning");
                assert_eq!(iterations, 500);
                assert_eq!(limit, 500);
            }
            other => unreachable!("Expected PropagationLimit, got {other:?}"),
        }
    }

    // Verifies narrowing one side of an edge narrows the neighbour's facing side
    // Verified by narrowing only the arc's own slot in revise
    #[test]
    fn test_grid_edge_narrows_neighbor() {
        let mut left = CellConstraint::new(TileFamily::from_index(0));
        left.constrain_to(Direction::Right, Exertion::one(0));
        left.settle();
        let mut network = pair(left, CellConstraint::new(TileFamily::from_index(1)));

        let seeds = network.internal_arcs();
        let stats = propagate(&mut network, seeds);
        assert!(stats.is_ok());

        let right = network.constraint_mut(1);
        assert_eq!(
            right.map(CellConstraint::valid_tiles),
            Some(vec![0xAA, 0xAB, 0xAF])
        );
        assert!(network.conflicted_cells().is_empty());
    }

    // Verifies disjoint edge sets mark the arc's cell as conflicted
    // Verified by returning early without marking on an empty intersection
    #[test]
    fn test_grid_disjoint_edge_conflicts() {
        let mut left = CellConstraint::new(TileFamily::from_index(0));
        left.constrain(Direction::Right, SlotSet::single(1));
        let mut right = CellConstraint::new(TileFamily::from_index(1));
        right.constrain(Direction::Left, SlotSet::single(0));
        let mut network = pair(left, right);

        let seeds = network.internal_arcs();
        assert!(propagate(&mut network, seeds).is_ok());
        assert_eq!(network.conflicted_cells(), vec![Cell::new(0, 0)]);
    }

    // Verifies path candidates without support along the loop are pruned
    // Verified by filtering only the left side of each path arc
    #[test]
    fn test_path_network_prunes() {
        let mut table = NeighborFrequencyTable::new();
        table.record(1, Direction::Right, 3, 3);
        table.record(2, Direction::Right, 3, 1);
        table.record(3, Direction::Down, 4, 3);
        table.record(4, Direction::Left, 5, 3);
        table.record(5, Direction::Up, 1, 3);
        table.record(5, Direction::Up, 2, 3);

        let travel = vec![
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ];
        let candidates = vec![set(&[1, 2]), set(&[3]), set(&[4]), set(&[5])];
        let mut network = PathNetwork::new(candidates, travel, &table, 3);

        assert!(propagate(&mut network, 0..4).is_ok());
        let settled: Vec<Vec<TileId>> = network
            .candidates()
            .iter()
            .map(TileBitset::to_vec)
            .collect();
        assert_eq!(settled, vec![vec![1], vec![3], vec![4], vec![5]]);
    }

    // Verifies a missing link empties the position that cannot continue
    // Verified by emptying the right side too when the left empties
    #[test]
    fn test_path_network_reports_empty_position() {
        let mut table = NeighborFrequencyTable::new();
        table.record(1, Direction::Right, 3, 3);
        table.record(3, Direction::Down, 4, 3);
        table.record(5, Direction::Up, 1, 3);

        let travel = vec![
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ];
        let candidates = vec![set(&[1]), set(&[3]), set(&[4]), set(&[5])];
        let mut network = PathNetwork::new(candidates, travel, &table, 3);

        assert!(propagate(&mut network, 0..4).is_ok());
        let empty: Vec<bool> = network.candidates().iter().map(TileBitset::is_empty).collect();
        assert_eq!(empty, vec![false, false, true, false]);
        assert_eq!(network.candidates().get(3).map(TileBitset::count), Some(1));
    }
}
