//! Static level grid and the axis-separated collision resolver.

use crate::geometry::Aabb;
use crate::physics::{Body, Contacts};

/// Tolerance used by contact tests so bodies resting exactly on an edge
/// are not reported as penetrating because of float rounding.
const CONTACT_SKIN: f32 = 0.01;

/// Terrain class of one grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Solid,
    /// Jump-through platform: blocks landing from above only.
    OneWay,
}

/// Immutable level grid in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct TileMap {
    cols: u32,
    rows: u32,
    tile_size: u32,
    one_way_band: f32,
    cells: Vec<Cell>,
}

impl TileMap {
    /// Creates an all-empty grid.
    pub fn new(cols: u32, rows: u32, tile_size: u32, one_way_band: f32) -> Self {
        Self {
            cols,
            rows,
            tile_size,
            one_way_band,
            cells: vec![Cell::Empty; cols as usize * rows as usize],
        }
    }

    /// Overwrites one cell; out-of-range writes are ignored.
    pub fn set(&mut self, col: u32, row: u32, cell: Cell) {
        if col < self.cols && row < self.rows {
            let index = self.index(col, row);
            self.cells[index] = cell;
        }
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn pixel_width(&self) -> f32 {
        (self.cols * self.tile_size) as f32
    }

    pub fn pixel_height(&self) -> f32 {
        (self.rows * self.tile_size) as f32
    }

    fn index(&self, col: u32, row: u32) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    /// Bounds-checked cell lookup.
    pub fn cell(&self, col: i32, row: i32) -> Option<Cell> {
        if col < 0 || row < 0 || col as u32 >= self.cols || row as u32 >= self.rows {
            return None;
        }
        Some(self.cells[self.index(col as u32, row as u32)])
    }

    pub fn solid_at(&self, col: i32, row: i32) -> bool {
        self.cell(col, row) == Some(Cell::Solid)
    }

    pub fn one_way_at(&self, col: i32, row: i32) -> bool {
        self.cell(col, row) == Some(Cell::OneWay)
    }

    /// Solidity of the cell containing a pixel.
    pub fn solid_at_px(&self, x: f32, y: f32) -> bool {
        self.solid_at(self.to_cell(x), self.to_cell(y))
    }

    fn to_cell(&self, px: f32) -> i32 {
        (px / self.tile_size as f32).floor() as i32
    }

    pub fn cell_rect(&self, col: i32, row: i32) -> Aabb {
        let ts = self.tile_size as f32;
        Aabb::from_xywh(col as f32 * ts, row as f32 * ts, ts, ts)
    }

    /// Cells covered by `rect`, expanded by one cell on every side.
    fn broad_phase(&self, rect: &Aabb) -> impl Iterator<Item = (i32, i32)> + use<> {
        let c0 = self.to_cell(rect.left) - 1;
        let c1 = self.to_cell(rect.right) + 1;
        let r0 = self.to_cell(rect.top) - 1;
        let r1 = self.to_cell(rect.bottom) + 1;
        (r0..=r1).flat_map(move |row| (c0..=c1).map(move |col| (col, row)))
    }

    fn solid_hits<'a>(&'a self, rect: &Aabb) -> impl Iterator<Item = Aabb> + use<'a> {
        let inner = rect.inset(CONTACT_SKIN);
        self.broad_phase(rect)
            .filter(move |&(col, row)| self.solid_at(col, row))
            .map(move |(col, row)| self.cell_rect(col, row))
            .filter(move |cell| cell.overlaps(&inner))
    }

    /// Top edges of one-way cells whose landing band contains the bottom of
    /// `rect`. The band is `band` pixels tall.
    fn one_way_hits<'a>(&'a self, rect: &Aabb, band: f32) -> impl Iterator<Item = f32> + use<'a> {
        let inner = rect.inset(CONTACT_SKIN);
        let bottom = rect.bottom;
        self.broad_phase(rect)
            .filter(move |&(col, row)| self.one_way_at(col, row))
            .map(move |(col, row)| self.cell_rect(col, row))
            .filter(move |cell| {
                bottom > cell.top + CONTACT_SKIN
                    && bottom < cell.top + band
                    && inner.right > cell.left
                    && inner.left < cell.right
            })
            .map(|cell| cell.top)
    }

    /// True when `rect` overlaps any solid cell.
    pub fn rect_collides_solid(&self, rect: &Aabb) -> bool {
        self.solid_hits(rect).next().is_some()
    }

    /// True when the bottom edge of `rect` sits inside the thin landing band
    /// at the top of a one-way cell.
    pub fn rect_collides_one_way_from_above(&self, rect: &Aabb) -> bool {
        self.one_way_hits(rect, self.one_way_band).next().is_some()
    }

    /// Moves `body` by its velocity, resolving the horizontal axis first and
    /// the vertical axis second.
    ///
    /// Blocked axes have their velocity zeroed. `grounded` is set only when a
    /// downward motion comes to rest on a solid or one-way surface.
    pub fn resolve_move(&self, body: &mut Body) -> Contacts {
        let mut contacts = Contacts::empty();
        body.grounded = false;

        if body.vx != 0.0 {
            let moved = body.bounds_at(body.x + body.vx, body.y);
            let moving_right = body.vx > 0.0;
            let edge = self
                .solid_hits(&moved)
                .map(|cell| if moving_right { cell.left } else { cell.right });
            let edge = if moving_right {
                edge.reduce(f32::min)
            } else {
                edge.reduce(f32::max)
            };
            match edge {
                Some(edge) if moving_right => {
                    body.x = edge - body.w;
                    body.vx = 0.0;
                    contacts |= Contacts::WALL_RIGHT;
                }
                Some(edge) => {
                    body.x = edge;
                    body.vx = 0.0;
                    contacts |= Contacts::WALL_LEFT;
                }
                None => body.x = moved.left,
            }
        }

        let moved = body.bounds_at(body.x, body.y + body.vy);
        if body.vy > 0.0 {
            // A fast fall may skip past the fixed band; widen it to the distance travelled.
            let band = self.one_way_band.max(body.vy + CONTACT_SKIN);
            let floor = self
                .solid_hits(&moved)
                .map(|cell| cell.top)
                .chain(self.one_way_hits(&moved, band))
                .reduce(f32::min);
            match floor {
                Some(top) => {
                    body.y = top - body.h;
                    body.vy = 0.0;
                    body.grounded = true;
                    contacts |= Contacts::FLOOR;
                }
                None => body.y = moved.top,
            }
        } else if body.vy < 0.0 {
            let ceiling = self.solid_hits(&moved).map(|cell| cell.bottom).reduce(f32::max);
            match ceiling {
                Some(bottom) => {
                    body.y = bottom;
                    body.vy = 0.0;
                    contacts |= Contacts::CEILING;
                }
                None => body.y = moved.top,
            }
        }

        contacts
    }
}
