//! Square Go board: stone occupancy only.
//!
//! Cells are addressed as `(col, row)`. Row 0 is the bottom line when the
//! board is printed, so vertex `A1` is `(0, 0)`.

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// A board coordinate, `(col, row)`.
pub type Point = (usize, usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Color>>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn contains(&self, (col, row): Point) -> bool {
        col < self.size && row < self.size
    }

    fn idx(&self, (col, row): Point) -> usize {
        row * self.size + col
    }

    /// Stone at `pt`; `None` for empty or off-board points.
    pub fn get(&self, pt: Point) -> Option<Color> {
        if !self.contains(pt) {
            return None;
        }
        self.cells[self.idx(pt)]
    }

    #[inline]
    pub fn is_empty_at(&self, pt: Point) -> bool {
        self.contains(pt) && self.get(pt).is_none()
    }

    /// Overwrite a cell without applying any rule.
    ///
    /// # Panics
    ///
    /// Panics if `pt` is off the board.
    pub fn set(&mut self, pt: Point, stone: Option<Color>) {
        assert!(self.contains(pt), "point {pt:?} outside {size}x{size} board", size = self.size);
        let i = self.idx(pt);
        self.cells[i] = stone;
    }

    /// 4-connected neighbors that lie on the board.
    pub fn neighbors(&self, (col, row): Point) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        let mut v = Vec::with_capacity(4);
        if col > 0 {
            v.push((col - 1, row));
        }
        if col + 1 < s {
            v.push((col + 1, row));
        }
        if row > 0 {
            v.push((col, row - 1));
        }
        if row + 1 < s {
            v.push((col, row + 1));
        }
        v.into_iter()
    }

    /// Every point of the board, column by column.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        (0..s).flat_map(move |col| (0..s).map(move |row| (col, row)))
    }

    /// Number of stones of `color` on the board.
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }
}

/// Parse a vertex such as `D4` (letters skip `I`) into a point.
///
/// Returns `None` for malformed or off-board vertices.
pub fn parse_vertex(s: &str, size: usize) -> Option<Point> {
    let bytes = s.trim().as_bytes();
    if bytes.len() < 2 {
        return None;
    }

    let col_char = bytes[0].to_ascii_uppercase();
    if !col_char.is_ascii_uppercase() || col_char == b'I' {
        return None;
    }
    let mut col = (col_char - b'A') as usize;
    if col_char > b'I' {
        col -= 1;
    }

    let row: usize = std::str::from_utf8(&bytes[1..]).ok()?.parse().ok()?;
    if row == 0 {
        return None;
    }

    let pt = (col, row - 1);
    (col < size && row - 1 < size).then_some(pt)
}

/// Format a point as a vertex string (e.g. `D4`).
pub fn vertex_name((col, row): Point) -> String {
    let mut c = (b'A' + col as u8) as char;
    if c >= 'I' {
        c = (c as u8 + 1) as char;
    }
    format!("{c}{}", row + 1)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.size).rev() {
            write!(f, "{:>2} ", row + 1)?;
            for col in 0..self.size {
                let ch = match self.get((col, row)) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for col in 0..self.size {
            let name = vertex_name((col, 0));
            write!(f, "{} ", &name[..1])?;
        }
        writeln!(f)
    }
}
