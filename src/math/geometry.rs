//! Integer plane geometry over grid coordinates
//!
//! Everything here treats a cell as the point `(x, y) = (row, col)`. In that
//! frame a path traced clockwise on screen has a negative shoelace sum.

use crate::spatial::grid::{Cell, Direction};

/// Twice the signed area enclosed by a cyclic sequence of cells
///
/// Exact integer shoelace sum; the closing edge from the last cell back to
/// the first is always included.
pub fn twice_signed_area(points: &[Cell]) -> i64 {
    let n = points.len();
    let mut sum = 0i64;
    for (i, current) in points.iter().enumerate() {
        let Some(next) = points.get((i + 1) % n) else {
            continue;
        };
        let (x_i, y_i) = (current.row as i64, current.col as i64);
        let (x_j, y_j) = (next.row as i64, next.col as i64);
        sum += x_i * y_j - x_j * y_i;
    }
    sum
}

/// 2D cross product of two unit steps in the `(row, col)` frame
pub const fn cross(first: Direction, second: Direction) -> isize {
    let [r1, c1] = first.delta();
    let [r2, c2] = second.delta();
    r1 * c2 - c1 * r2
}
