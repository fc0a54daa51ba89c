//! Plain-text tile grids
//!
//! One grid row per line, tiles as whitespace-separated hex bytes with an
//! optional `$` prefix and `..` for a placeholder. Blank lines and lines
//! starting with `#` are skipped.

use crate::io::configuration::PLACEHOLDER_TOKEN;
use crate::io::error::{AlgorithmError, Result, file_system_error};
use crate::spatial::grid::TileGrid;
use crate::spatial::tiles::{PLACEHOLDER_TILE, TileId};
use ndarray::Array2;
use std::fmt::Write as _;
use std::path::Path;

/// Parse one tile token
pub fn parse_token(token: &str) -> Option<TileId> {
    if token == PLACEHOLDER_TOKEN {
        return Some(PLACEHOLDER_TILE);
    }
    let digits = token.strip_prefix('$').unwrap_or(token);
    if digits.is_empty() || digits.len() > 2 {
        return None;
    }
    TileId::from_str_radix(digits, 16).ok()
}

/// Parse a whole grid
///
/// # Errors
///
/// Returns `InvalidGridData` for an unreadable token, a row whose width
/// differs from the first row, or text without any rows
pub fn parse_grid(text: &str) -> Result<TileGrid> {
    let mut rows: Vec<Vec<TileId>> = Vec::new();
    let mut width = None;

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let row = trimmed
            .split_whitespace()
            .map(|token| {
                parse_token(token).ok_or_else(|| AlgorithmError::InvalidGridData {
                    line: line_number,
                    reason: format!("unreadable tile '{token}'"),
                })
            })
            .collect::<Result<Vec<TileId>>>()?;

        let expected = *width.get_or_insert(row.len());
        if row.len() != expected {
            return Err(AlgorithmError::InvalidGridData {
                line: line_number,
                reason: format!("expected {expected} tiles, found {}", row.len()),
            });
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(AlgorithmError::InvalidGridData {
            line: 0,
            reason: "no tile rows".to_string(),
        });
    }
    TileGrid::from_rows(&rows)
}

/// Render a grid in the same format `parse_grid` reads
pub fn format_grid(grid: &TileGrid) -> String {
    let mut text = String::new();
    let array: &Array2<TileId> = grid.as_array();
    for row in array.rows() {
        let tokens: Vec<String> = row
            .iter()
            .map(|&tile| {
                if tile == PLACEHOLDER_TILE {
                    PLACEHOLDER_TOKEN.to_string()
                } else {
                    format!("{tile:02X}")
                }
            })
            .collect();
        let _ = writeln!(text, "{}", tokens.join(" "));
    }
    text
}

/// Read and parse a grid file
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read, otherwise any
/// [`parse_grid`] error
pub fn read_grid(path: &Path) -> Result<TileGrid> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| file_system_error(path, "read grid", source))?;
    parse_grid(&text)
}

/// Write a grid file
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be written
pub fn write_grid(path: &Path, grid: &TileGrid) -> Result<()> {
    std::fs::write(path, format_grid(grid))
        .map_err(|source| file_system_error(path, "write grid", source))
}
