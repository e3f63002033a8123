//! Built-in bitmap font used to shape text bursts.

use crate::surface::GlyphOutline;
use glam::DVec2;
use std::collections::HashMap;

const CJK: &[(char, [&str; 16])] = &[
    (
        '新',
        [
            "...#..........##",
            "...#......####..",
            "#######..#......",
            ".#...#...#......",
            "..#.#....#......",
            "########.#######",
            "...#.....#...#..",
            "...#.....#...#..",
            "#######..#...#..",
            "...#.....#...#..",
            "..###....#...#..",
            ".#.#.#..#....#..",
            "#..#..#.#....#..",
            "...#....#....#..",
            "...#...#.....#..",
            "..##.........#..",
        ],
    ),
    (
        '年',
        [
            "...#............",
            "..#.............",
            "..############..",
            ".#.....#........",
            "#......#........",
            "..###########...",
            "..#....#........",
            "..#....#........",
            "..#....#........",
            "################",
            ".......#........",
            ".......#........",
            ".......#........",
            ".......#........",
            ".......#........",
            ".......#........",
        ],
    ),
    (
        '快',
        [
            "..#.......#.....",
            "..#.......#.....",
            "..#...######....",
            "#.#.#.....#.#...",
            "#.#.#.....#.#...",
            "#.#.......#.#...",
            "..#...##########",
            "..#.......#.....",
            "..#.......##....",
            "..#......#..#...",
            "..#......#..#...",
            "..#.....#....#..",
            "..#.....#....#..",
            "..#....#......#.",
            "..#...#........#",
            "..#.............",
        ],
    ),
    (
        '乐',
        [
            "..........###...",
            "....######......",
            "...#............",
            "...#............",
            "...#............",
            "..##############",
            ".......#........",
            ".......#........",
            "...#...#...#....",
            "..#....#....#...",
            ".#.....#.....#..",
            "#......#......#.",
            ".......#........",
            ".......#........",
            ".....###........",
            "................",
        ],
    ),
];

const ASCII: &[(char, [&str; 7])] = &[
    ('A', [".###.", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]),
    ('B', ["####.", "#...#", "#...#", "####.", "#...#", "#...#", "####."]),
    ('C', [".###.", "#...#", "#....", "#....", "#....", "#...#", ".###."]),
    ('D', ["####.", "#...#", "#...#", "#...#", "#...#", "#...#", "####."]),
    ('E', ["#####", "#....", "#....", "####.", "#....", "#....", "#####"]),
    ('F', ["#####", "#....", "#....", "####.", "#....", "#....", "#...."]),
    ('G', [".###.", "#...#", "#....", "#.###", "#...#", "#...#", ".####"]),
    ('H', ["#...#", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]),
    ('I', [".###.", "..#..", "..#..", "..#..", "..#..", "..#..", ".###."]),
    ('J', ["..###", "...#.", "...#.", "...#.", "...#.", "#..#.", ".##.."]),
    ('K', ["#...#", "#..#.", "#.#..", "##...", "#.#..", "#..#.", "#...#"]),
    ('L', ["#....", "#....", "#....", "#....", "#....", "#....", "#####"]),
    ('M', ["#...#", "##.##", "#.#.#", "#.#.#", "#...#", "#...#", "#...#"]),
    ('N', ["#...#", "#...#", "##..#", "#.#.#", "#..##", "#...#", "#...#"]),
    ('O', [".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."]),
    ('P', ["####.", "#...#", "#...#", "####.", "#....", "#....", "#...."]),
    ('Q', [".###.", "#...#", "#...#", "#...#", "#.#.#", "#..#.", ".##.#"]),
    ('R', ["####.", "#...#", "#...#", "####.", "#.#..", "#..#.", "#...#"]),
    ('S', [".####", "#....", "#....", ".###.", "....#", "....#", "####."]),
    ('T', ["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "..#.."]),
    ('U', ["#...#", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."]),
    ('V', ["#...#", "#...#", "#...#", "#...#", "#...#", ".#.#.", "..#.."]),
    ('W', ["#...#", "#...#", "#...#", "#.#.#", "#.#.#", "#.#.#", ".#.#."]),
    ('X', ["#...#", "#...#", ".#.#.", "..#..", ".#.#.", "#...#", "#...#"]),
    ('Y', ["#...#", "#...#", ".#.#.", "..#..", "..#..", "..#..", "..#.."]),
    ('Z', ["#####", "....#", "...#.", "..#..", ".#...", "#....", "#####"]),
    ('0', [".###.", "#...#", "#..##", "#.#.#", "##..#", "#...#", ".###."]),
    ('1', ["..#..", ".##..", "..#..", "..#..", "..#..", "..#..", ".###."]),
    ('2', [".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"]),
    ('3', ["#####", "...#.", "..#..", "...#.", "....#", "#...#", ".###."]),
    ('4', ["...#.", "..##.", ".#.#.", "#..#.", "#####", "...#.", "...#."]),
    ('5', ["#####", "#....", "####.", "....#", "....#", "#...#", ".###."]),
    ('6', ["..##.", ".#...", "#....", "####.", "#...#", "#...#", ".###."]),
    ('7', ["#####", "....#", "...#.", "..#..", ".#...", ".#...", ".#..."]),
    ('8', [".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."]),
    ('9', [".###.", "#...#", "#...#", ".####", "....#", "...#.", ".##.."]),
    ('!', ["..#..", "..#..", "..#..", "..#..", "..#..", ".....", "..#.."]),
    ('?', [".###.", "#...#", "....#", "...#.", "..#..", ".....", "..#.."]),
    ('.', [".....", ".....", ".....", ".....", ".....", ".##..", ".##.."]),
    (',', [".....", ".....", ".....", ".....", ".##..", "..#..", ".#..."]),
    ('-', [".....", ".....", ".....", "#####", ".....", ".....", "....."]),
    ('\'', ["..#..", "..#..", ".#...", ".....", ".....", ".....", "....."]),
    (':', [".....", ".##..", ".##..", ".....", ".##..", ".##..", "....."]),
];

/// A filled mask, `#` marking covered cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    columns: usize,
    rows: usize,
    cells: Vec<bool>,
}

impl Glyph {
    pub fn from_rows(rows: &[&str]) -> Self {
        let columns = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut cells = vec![false; columns * rows.len()];
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                cells[y * columns + x] = c == '#';
            }
        }
        Self {
            columns,
            rows: rows.len(),
            cells,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn is_filled(&self, column: usize, row: usize) -> bool {
        column < self.columns && row < self.rows && self.cells[row * self.columns + column]
    }

    pub fn coverage(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.cells.iter().filter(|&&c| c).count() as f64 / self.cells.len() as f64
    }

    /// Width over height; the glyph is drawn `font_size` tall.
    fn aspect(&self) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            self.columns as f64 / self.rows as f64
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BitmapFont {
    glyphs: HashMap<char, Glyph>,
}

impl BitmapFont {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled CJK greeting plus uppercase ASCII, digits and punctuation.
    pub fn builtin() -> Self {
        let mut font = Self::new();
        for (ch, rows) in CJK {
            font.insert(*ch, Glyph::from_rows(rows));
        }
        for (ch, rows) in ASCII {
            font.insert(*ch, Glyph::from_rows(rows));
        }
        font
    }

    pub fn insert(&mut self, ch: char, glyph: Glyph) {
        self.glyphs.insert(ch, glyph);
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs
            .get(&ch)
            .or_else(|| self.glyphs.get(&ch.to_ascii_uppercase()))
    }
}

impl GlyphOutline for BitmapFont {
    fn bounds(&self, ch: char, font_size: f64) -> Option<DVec2> {
        let glyph = self.glyph(ch)?;
        Some(DVec2::new(font_size * glyph.aspect(), font_size))
    }

    fn contains(&self, ch: char, font_size: f64, offset: DVec2) -> bool {
        let (Some(glyph), Some(size)) = (self.glyph(ch), self.bounds(ch, font_size)) else {
            return false;
        };
        if size.x <= 0.0 || size.y <= 0.0 {
            return false;
        }
        let u = (offset.x / size.x + 0.5) * glyph.columns as f64;
        let v = (offset.y / size.y + 0.5) * glyph.rows as f64;
        if u < 0.0 || v < 0.0 {
            return false;
        }
        glyph.is_filled(u as usize, v as usize)
    }

    fn coverage(&self, ch: char) -> f64 {
        self.glyph(ch).map_or(0.0, Glyph::coverage)
    }
}
