//! The four carving phases
//!
//! Rooms and maze cells live on odd rows and columns, so that two distinct
//! cells are always separated by a single wall cell. That wall is where a
//! connector can be opened.

use rand::Rng;

use crate::{Cells, DisjointSet, Dungeon, RegionId, Result, Room, Tile, Vector};

/// Random odd number in `lo..=hi`, `lo` odd
fn rand_odd<R>(rng: &mut R, lo: i64, hi: i64) -> i64
where
    R: Rng + ?Sized,
{
    debug_assert!(lo % 2 == 1 && lo <= hi);
    lo + 2 * rng.gen_range(0..=(hi - lo) / 2)
}

impl Dungeon {
    /// Try `room_placement_attempts` times to place a random room
    pub(crate) fn place_rooms<R>(&mut self, rng: &mut R) -> Result<()>
    where
        R: Rng + ?Sized,
    {
        let [rows, cols] = [self.rows() as i64, self.cols() as i64];
        let [min, max] = [
            self.config.min_room_size as i64,
            self.config.max_room_size as i64,
        ];
        for attempt in 0..self.config.room_placement_attempts {
            let top_left = Vector::new(
                rand_odd(rng, 1, rows - 2),
                rand_odd(rng, 1, cols - 2),
            );
            let width = rand_odd(rng, min, max);
            let height = rand_odd(rng, min, max);
            let bottom_right = top_left + Vector::new(height - 1, width - 1);
            let room = Room::new(top_left, bottom_right)?;

            if !self.in_bounds(bottom_right)
                || self.rooms.iter().any(|r| r.intersects(&room))
            {
                log::trace!("Attempt {attempt}: discarding room {top_left}-{bottom_right}");
                continue;
            }

            let region = self.new_region();
            for pos in room.cells() {
                self.set_floor(pos, region)?;
            }
            self.rooms.push(room);
        }
        log::debug!(
            "Placed {} rooms in {} attempts",
            self.rooms.len(),
            self.config.room_placement_attempts
        );
        Ok(())
    }

    /// Grow a maze from every interior lattice cell still walled in
    ///
    /// Seeds stay off the last row and column, whose walls are never
    /// scanned for connectors when the grid has an even side.
    pub(crate) fn fill_mazes<R>(&mut self, rng: &mut R) -> Result<()>
    where
        R: Rng + ?Sized,
    {
        let first = self.next_region;
        for r in (1..self.rows() as i64 - 1).step_by(2) {
            for c in (1..self.cols() as i64 - 1).step_by(2) {
                let pos = Vector::new(r, c);
                if self.tile(pos)? == Tile::Wall {
                    let region = self.new_region();
                    self.grow_maze(pos, region, rng)?;
                }
            }
        }
        log::debug!("Grew {} mazes", self.next_region - first);
        Ok(())
    }

    /// Growing tree: extend from the newest live cell, backtrack when stuck
    fn grow_maze<R>(&mut self, start: Vector, region: RegionId, rng: &mut R) -> Result<()>
    where
        R: Rng + ?Sized,
    {
        let curliness = self.config.curliness;
        let mut live = vec![start];
        let mut last_dir = None;
        self.set_floor(start, region)?;

        while let Some(&cell) = live.last() {
            let mut open = Vec::with_capacity(4);
            for dir in self.valid_directions_from(cell, 2) {
                if self.is_isolated(cell + dir * 2)? {
                    open.push(dir);
                }
            }

            if open.is_empty() {
                live.pop();
                last_dir = None;
                continue;
            }

            let dir = match last_dir {
                Some(last) if open.contains(&last) && !rng.gen_bool(curliness) => last,
                _ => open[rng.gen_range(0..open.len())],
            };
            let next = cell + dir * 2;
            self.set_floor(cell + dir, region)?;
            self.set_floor(next, region)?;
            live.push(next);
            last_dir = Some(dir);
        }
        log::trace!("Maze {region} grown from {start}");
        Ok(())
    }

    /// A wall cell whose neighbours are all walls too
    fn is_isolated(&self, pos: Vector) -> Result<bool> {
        if self.tile(pos)? != Tile::Wall {
            return Ok(false);
        }
        for n in self.neighbours(pos) {
            if self.tile(n)? != Tile::Wall {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Open connectors until all regions are joined
    ///
    /// Connectors are opened in scan order. Returns the number of regions
    /// still independent, which is 1 unless the grid ran out of connectors.
    pub(crate) fn connect_regions<R>(&mut self, rng: &mut R) -> Result<usize>
    where
        R: Rng + ?Sized,
    {
        let mut connectors = self.find_connectors()?;
        log::debug!(
            "Found {} connectors between {} regions",
            connectors.len(),
            self.next_region
        );

        let extra_chance = self.config.extra_connector_chance;
        let mut merged = DisjointSet::new(self.next_region);
        let [mut opened, mut extra] = [0usize; 2];
        while merged.independent() > 1 {
            let Some((pos, touched)) = connectors.first().cloned() else {
                log::warn!(
                    "Ran out of connectors with {} regions left",
                    merged.independent()
                );
                break;
            };
            self.set_connector(pos)?;
            opened += 1;

            let reps: Vec<_> = touched.iter().map(|r| merged.find(*r)).collect();
            if let Some((dest, sources)) = reps.split_first() {
                for source in sources {
                    merged.union(*source, *dest);
                }
            }

            let mut kept = Vec::with_capacity(connectors.len());
            for (pos, touched) in connectors {
                if !merged.same_set(&touched) {
                    kept.push((pos, touched));
                } else if rng.gen_bool(extra_chance) {
                    self.set_connector(pos)?;
                    extra += 1;
                }
            }
            connectors = kept;
        }
        log::debug!("Opened {opened} connectors and {extra} extra ones");
        Ok(merged.independent())
    }

    /// Interior walls touching two or more regions, with the regions they touch
    fn find_connectors(&self) -> Result<Vec<(Vector, Vec<RegionId>)>> {
        let mut connectors = vec![];
        let interior = Cells::new(
            Vector::new(1, 1),
            Vector::new(self.rows() as i64 - 2, self.cols() as i64 - 2),
        );
        for pos in interior {
            if self.tile(pos)? != Tile::Wall {
                continue;
            }
            let mut touched = Vec::with_capacity(4);
            for n in self.neighbours(pos) {
                let region = self.regions[self.index(n)?];
                if region.is_assigned() && !touched.contains(&region) {
                    touched.push(region);
                }
            }
            if touched.len() >= 2 {
                connectors.push((pos, touched));
            }
        }
        Ok(connectors)
    }

    /// Fill back dead ends until none is left
    ///
    /// Returns the number of cells erased.
    pub(crate) fn eliminate_dead_ends(&mut self) -> Result<usize> {
        let mut erased = 0;
        let mut passes = 0;
        loop {
            passes += 1;
            let mut done = true;
            for pos in Cells::new(Vector::ZERO, self.last_cell()) {
                if self.tile(pos)? != Tile::Wall && self.open_exits(pos)?.is_dead_end() {
                    self.erase(pos)?;
                    erased += 1;
                    done = false;
                }
            }
            if done {
                break;
            }
        }
        log::debug!("Erased {erased} dead end cells in {passes} passes");
        Ok(erased)
    }
}
