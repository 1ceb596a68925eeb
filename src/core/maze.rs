//! Tile map loading and validation.
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::MapError;

/// The 16x16 reference map.
pub const DEFAULT_MAP: &str = concat!(
    "0000222222220000",
    "1              0",
    "1      11111   0",
    "1     0        0",
    "0     0  1110000",
    "0     3        0",
    "0   10000      0",
    "0   3   11100  0",
    "5   4   0      0",
    "5   4   1  00000",
    "0       1      0",
    "2       1      0",
    "0       0      0",
    "0 0000000      0",
    "0              0",
    "0002222222200000",
);
pub const DEFAULT_MAP_W: usize = 16;
pub const DEFAULT_MAP_H: usize = 16;

/// Passable cell code.
pub const BLANK: char = ' ';

/// Maps cell codes to tile indices.
#[derive(Clone, Debug)]
pub struct CellCodes {
    table: HashMap<char, usize>,
}

impl CellCodes {
    pub fn new() -> Self {
        Self { table: HashMap::new() }
    }

    pub fn with(mut self, code: char, tile: usize) -> Self {
        self.table.insert(code, tile);
        self
    }

    #[inline]
    pub fn tile_of(&self, code: char) -> Option<usize> {
        self.table.get(&code).copied()
    }
}

impl Default for CellCodes {
    /// `'0'..='9'` map to tiles 0..=9.
    fn default() -> Self {
        ('0'..='9').enumerate().fold(Self::new(), |codes, (tile, c)| codes.with(c, tile))
    }
}

/// A single map cell: passable, or a wall drawn with a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall { code: char, tile: usize },
}

impl Cell {
    #[inline]
    pub fn is_occupied(self) -> bool {
        matches!(self, Cell::Wall { .. })
    }

    #[inline]
    pub fn tile(self) -> Option<usize> {
        match self {
            Cell::Wall { tile, .. } => Some(tile),
            Cell::Empty => None,
        }
    }
}

/// Immutable row-major grid of cells.
#[derive(Clone, Debug)]
pub struct TileMap {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// `true` for any code other than blank.
#[inline]
pub fn is_occupied(code: char) -> bool {
    code != BLANK
}

impl TileMap {
    /// Parses a literal of exactly `width * height` codes without delimiters.
    pub fn from_literal(literal: &str, width: usize, height: usize, codes: &CellCodes) -> Result<Self, MapError> {
        let chars: Vec<char> = literal.chars().collect();
        let expected = width * height;
        if expected == 0 {
            return Err(MapError::Empty);
        }
        if chars.len() != expected {
            return Err(MapError::LiteralLength { width, height, expected, actual: chars.len() });
        }
        let mut cells = Vec::with_capacity(expected);
        for (idx, &code) in chars.iter().enumerate() {
            let cell = if is_occupied(code) {
                let tile = codes.tile_of(code).ok_or(MapError::UnknownCode {
                    code,
                    x: idx % width,
                    y: idx / width,
                })?;
                Cell::Wall { code, tile }
            } else {
                Cell::Empty
            };
            cells.push(cell);
        }
        Ok(Self { width, height, cells })
    }

    /// Parses a text grid, one row per line. Trailing empty lines are ignored.
    pub fn from_rows(text: &str, codes: &CellCodes) -> Result<Self, MapError> {
        let rows: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        let rows = match rows.iter().rposition(|r| !r.is_empty()) {
            Some(last) => &rows[..=last],
            None => return Err(MapError::Empty),
        };
        let width = rows[0].chars().count();
        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != width {
                return Err(MapError::RaggedRow { row, expected: width, actual });
            }
        }
        Self::from_literal(&rows.concat(), width, rows.len(), codes)
    }

    pub fn load(path: &Path, codes: &CellCodes) -> Result<Self, MapError> {
        let text = fs::read_to_string(path).map_err(|source| MapError::Io { path: path.to_path_buf(), source })?;
        let map = Self::from_rows(&text, codes)?;
        tracing::info!(path = %path.display(), width = map.width, height = map.height, "map loaded");
        Ok(map)
    }

    /// The built-in 16x16 map.
    pub fn reference() -> Self {
        Self::from_literal(DEFAULT_MAP, DEFAULT_MAP_W, DEFAULT_MAP_H, &CellCodes::default())
            .expect("built-in map is well formed")
    }

    #[inline] pub fn width(&self) -> usize { self.width }
    #[inline] pub fn height(&self) -> usize { self.height }

    /// Cell at column `i`, row `j`.
    ///
    /// # Panics
    /// If `(i, j)` lies outside the map.
    #[inline]
    pub fn cell_at(&self, i: usize, j: usize) -> Cell {
        assert!(i < self.width && j < self.height, "cell ({i}, {j}) outside {}x{} map", self.width, self.height);
        self.cells[i + j * self.width]
    }

    /// Cell at column `i`, row `j`, or `None` outside the map.
    #[inline]
    pub fn cell(&self, i: usize, j: usize) -> Option<Cell> {
        (i < self.width && j < self.height).then(|| self.cells[i + j * self.width])
    }

    /// Cell containing the world point `(x, y)`.
    #[inline]
    pub fn cell_at_point(&self, x: f32, y: f32) -> Option<Cell> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        self.cell(x as usize, y as usize)
    }

    pub fn iter_walls(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.tile().map(|tile| (idx % self.width, idx / self.width, tile))
        })
    }

    /// Checks that every wall tile exists in an atlas of `tile_count` tiles.
    pub fn validate_tiles(&self, tile_count: usize) -> Result<(), MapError> {
        match self.iter_walls().find(|&(_, _, tile)| tile >= tile_count) {
            Some((x, y, tile)) => Err(MapError::TileOutOfRange { x, y, tile, available: tile_count }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_map_parses() {
        let map = TileMap::reference();
        assert_eq!((map.width(), map.height()), (16, 16));
        assert_eq!(map.cell_at(0, 0), Cell::Wall { code: '0', tile: 0 });
        assert_eq!(map.cell_at(4, 0), Cell::Wall { code: '2', tile: 2 });
        assert_eq!(map.cell_at(0, 8), Cell::Wall { code: '5', tile: 5 });
        assert_eq!(map.cell_at(3, 2), Cell::Empty);
        assert!(!map.cell_at(1, 1).is_occupied());
    }

    #[test]
    fn literal_length_mismatch_is_rejected() {
        let err = TileMap::from_literal("00 0", 2, 3, &CellCodes::default()).unwrap_err();
        assert!(matches!(err, MapError::LiteralLength { expected: 6, actual: 4, .. }));
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = TileMap::from_literal("0 #0", 2, 2, &CellCodes::default()).unwrap_err();
        assert!(matches!(err, MapError::UnknownCode { code: '#', x: 0, y: 1 }));
    }

    #[test]
    fn custom_code_table() {
        let codes = CellCodes::new().with('#', 3);
        let map = TileMap::from_literal("# ", 2, 1, &codes).unwrap();
        assert_eq!(map.cell_at(0, 0).tile(), Some(3));
        assert_eq!(map.cell_at(1, 0), Cell::Empty);
    }

    #[test]
    fn validate_tiles_reports_first_out_of_range_cell() {
        let map = TileMap::reference();
        assert!(map.validate_tiles(6).is_ok());
        let err = map.validate_tiles(5).unwrap_err();
        assert!(matches!(err, MapError::TileOutOfRange { x: 0, y: 8, tile: 5, available: 5 }));
    }

    #[test]
    fn rows_are_concatenated() {
        let map = TileMap::from_rows("111\n1 1\n111\n\n", &CellCodes::default()).unwrap();
        assert_eq!((map.width(), map.height()), (3, 3));
        assert_eq!(map.cell_at(1, 1), Cell::Empty);
        assert!(map.cell_at(2, 2).is_occupied());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = TileMap::from_rows("111\n1 \n111", &CellCodes::default()).unwrap_err();
        assert!(matches!(err, MapError::RaggedRow { row: 1, expected: 3, actual: 2 }));
    }

    #[test]
    fn out_of_bounds_lookups() {
        let map = TileMap::reference();
        assert_eq!(map.cell(16, 0), None);
        assert_eq!(map.cell_at_point(-0.5, 1.0), None);
        assert_eq!(map.cell_at_point(1.5, 1.5), Some(Cell::Empty));
    }

    #[test]
    #[should_panic]
    fn cell_at_fails_fast_outside_map() {
        TileMap::reference().cell_at(0, 16);
    }

    #[test]
    fn map_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.txt");
        std::fs::write(&path, "22\n2 \n").unwrap();
        let map = TileMap::load(&path, &CellCodes::default()).unwrap();
        assert_eq!(map.iter_walls().count(), 3);
    }
}
