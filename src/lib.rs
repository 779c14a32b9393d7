//! Rooms-and-mazes dungeon generator
//!
//! A dungeon is carved in four phases: random rooms are placed on the odd
//! lattice, the space left is filled with growing-tree mazes, the resulting
//! regions are joined through connectors, and finally every dead end is
//! filled back in.

use std::fmt::Display;

use bitflags::bitflags;
use rand::{Rng, SeedableRng};
use rand_wyrand::WyRand;

pub mod config;
pub use config::{Config, PartialConfig};

mod error;
pub use error::{Error, Result};

mod generate;

mod regions;
pub use regions::{DisjointSet, RegionId};

mod room;
pub use room::{Cells, Room};

mod vector;
pub use vector::{Vector, CARDINALS};

/// Kind of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    #[default]
    Wall,
    Floor,
    Connector,
}

impl Tile {
    /// Character used by the text rendering
    #[inline(always)]
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Tile::Wall => ' ',
            Tile::Floor => '*',
            Tile::Connector => '#',
        }
    }
}

bitflags! {
    /// Open sides of a cell, one flag per entry of `CARDINALS`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Exits: u8 {
        const Down  = 0b0001;
        const Up    = 0b0010;
        const Left  = 0b0100;
        const Right = 0b1000;
    }
}

impl Exits {
    /// Flag of the `i`-th cardinal direction
    #[inline(always)]
    #[must_use]
    pub const fn nth(i: usize) -> Exits {
        Exits::from_bits_truncate(1 << i)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_dead_end(self) -> bool {
        self.bits().count_ones() == 1
    }
}

/// A dungeon generator and the grid it produces
#[derive(Debug, Clone)]
pub struct Dungeon {
    /// General config for the dungeon
    config: Config,
    /// Tiles, row major
    grid: Box<[Tile]>,
    /// Region of each floor cell, row major
    regions: Box<[RegionId]>,
    /// Rooms in placement order
    rooms: Vec<Room>,
    /// Next region id to hand out
    next_region: u32,
    generated: bool,
}

impl Dungeon {
    /// Create an ungenerated dungeon with a given config
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let len = config.rows * config.cols;
        Ok(Self {
            config,
            grid: vec![Tile::Wall; len].into_boxed_slice(),
            regions: vec![RegionId::UNASSIGNED; len].into_boxed_slice(),
            rooms: Vec::new(),
            next_region: 0,
            generated: false,
        })
    }

    /// Generate the dungeon, drawing randomness from a generator seeded with `Config::seed`
    pub fn generate(&mut self) -> Result<()> {
        let mut rng = WyRand::seed_from_u64(self.config.seed);
        self.generate_with(&mut rng)
    }

    /// Generate the dungeon with an explicit source of randomness
    pub fn generate_with<R>(&mut self, rng: &mut R) -> Result<()>
    where
        R: Rng + ?Sized,
    {
        if self.generated {
            return Err(Error::AlreadyGenerated);
        }
        log::info!(
            "Generating a {}x{} dungeon",
            self.config.rows,
            self.config.cols
        );
        self.place_rooms(rng)?;
        self.fill_mazes(rng)?;
        self.connect_regions(rng)?;
        self.eliminate_dead_ends()?;
        self.generated = true;
        Ok(())
    }

    #[inline(always)]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.config.rows
    }

    #[inline(always)]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.config.cols
    }

    #[inline(always)]
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline(always)]
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Rooms in the order they were placed
    #[inline(always)]
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    #[inline(always)]
    #[must_use]
    pub fn in_bounds(&self, pos: Vector) -> bool {
        (0..self.config.rows as i64).contains(&pos.x)
            && (0..self.config.cols as i64).contains(&pos.y)
    }

    pub fn tile_at(&self, pos: Vector) -> Result<Tile> {
        self.check_generated()?;
        self.tile(pos)
    }

    pub fn is_wall(&self, pos: Vector) -> Result<bool> {
        Ok(self.tile_at(pos)? == Tile::Wall)
    }

    /// Region a floor cell was carved in, `None` for walls and connectors
    pub fn region_at(&self, pos: Vector) -> Result<Option<RegionId>> {
        self.check_generated()?;
        let region = self.regions[self.index(pos)?];
        Ok(region.is_assigned().then_some(region))
    }

    /// Open sides of a cell
    pub fn exits(&self, pos: Vector) -> Result<Exits> {
        self.check_generated()?;
        self.open_exits(pos)
    }

    /// Cardinal directions whose `steps`-th cell stays on the grid
    pub fn valid_directions_from(
        &self,
        pos: Vector,
        steps: i64,
    ) -> impl Iterator<Item = Vector> + '_ {
        CARDINALS
            .into_iter()
            .filter(move |dir| self.in_bounds(pos + *dir * steps))
    }

    /// Adjacent cells that are on the grid
    pub fn neighbours(&self, pos: Vector) -> impl Iterator<Item = Vector> + '_ {
        self.valid_directions_from(pos, 1).map(move |dir| pos + dir)
    }

    /// Spawn point: the middle of the first room placed
    pub fn rand_pos(&self) -> Result<Vector> {
        self.check_generated()?;
        self.rooms.first().map(Room::center).ok_or(Error::NoRooms)
    }

    /// Call `f` on every cell of the inclusive rectangle `area`, or of the whole grid
    pub fn traverse<F>(&self, area: Option<(Vector, Vector)>, f: F) -> Result<()>
    where
        F: FnMut(Vector),
    {
        let (top_left, bottom_right) = match area {
            Some((top_left, bottom_right)) => {
                self.index(top_left)?;
                self.index(bottom_right)?;
                (top_left, bottom_right)
            }
            None => (Vector::ZERO, self.last_cell()),
        };
        Cells::new(top_left, bottom_right).for_each(f);
        Ok(())
    }

    /// All tiles, row major
    pub fn tiles(&self) -> Result<&[Tile]> {
        self.check_generated()?;
        Ok(&self.grid)
    }

    /// All tiles as their configured codes, row major
    pub fn codes(&self) -> Result<Vec<u8>> {
        Ok(self
            .tiles()?
            .iter()
            .map(|t| self.config.code(*t))
            .collect())
    }

    fn check_generated(&self) -> Result<()> {
        if self.generated {
            Ok(())
        } else {
            Err(Error::NotGenerated)
        }
    }

    #[inline(always)]
    fn index(&self, pos: Vector) -> Result<usize> {
        if !self.in_bounds(pos) {
            return Err(Error::OutOfBounds { pos });
        }
        Ok(pos.x as usize * self.config.cols + pos.y as usize)
    }

    #[inline(always)]
    fn last_cell(&self) -> Vector {
        Vector::new(self.config.rows as i64 - 1, self.config.cols as i64 - 1)
    }

    fn tile(&self, pos: Vector) -> Result<Tile> {
        Ok(self.grid[self.index(pos)?])
    }

    fn open_exits(&self, pos: Vector) -> Result<Exits> {
        let mut exits = Exits::empty();
        for (i, dir) in CARDINALS.into_iter().enumerate() {
            let n = pos + dir;
            if self.in_bounds(n) && self.tile(n)? != Tile::Wall {
                exits |= Exits::nth(i);
            }
        }
        Ok(exits)
    }

    fn new_region(&mut self) -> RegionId {
        let region = RegionId::new(self.next_region);
        self.next_region += 1;
        region
    }

    fn set_floor(&mut self, pos: Vector, region: RegionId) -> Result<()> {
        let i = self.index(pos)?;
        self.grid[i] = Tile::Floor;
        self.regions[i] = region;
        Ok(())
    }

    fn set_connector(&mut self, pos: Vector) -> Result<()> {
        let i = self.index(pos)?;
        self.grid[i] = Tile::Connector;
        Ok(())
    }

    fn erase(&mut self, pos: Vector) -> Result<()> {
        let i = self.index(pos)?;
        self.grid[i] = Tile::Wall;
        self.regions[i] = RegionId::UNASSIGNED;
        Ok(())
    }
}

impl Display for Dungeon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.grid.chunks(self.config.cols) {
            for tile in row {
                write!(f, "{}", tile.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
