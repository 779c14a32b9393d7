use crate::{Error, Result, Vector};

/// A rectangular room, both corners inclusive
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Room {
    top_left: Vector,
    bottom_right: Vector,
}

impl Room {
    /// Build a room, refusing degenerate or inverted rectangles
    ///
    /// ```
    /// use dungeon::{Error, Room, Vector};
    ///
    /// assert!(Room::new(Vector::new(1, 1), Vector::new(3, 3)).is_ok());
    /// assert!(matches!(
    ///     Room::new(Vector::new(3, 3), Vector::new(1, 1)),
    ///     Err(Error::InvalidRoom { .. })
    /// ));
    /// ```
    pub fn new(top_left: Vector, bottom_right: Vector) -> Result<Self> {
        if top_left.x >= bottom_right.x || top_left.y >= bottom_right.y {
            return Err(Error::InvalidRoom {
                top_left,
                bottom_right,
            });
        }
        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    #[inline(always)]
    #[must_use]
    pub const fn top_left(&self) -> Vector {
        self.top_left
    }

    #[inline(always)]
    #[must_use]
    pub const fn bottom_right(&self) -> Vector {
        self.bottom_right
    }

    /// Check if two rooms share at least a cell
    ///
    /// Touching rooms count as intersecting.
    /// ```
    /// use dungeon::{Room, Vector};
    ///
    /// let a = Room::new(Vector::new(1, 1), Vector::new(3, 3)).unwrap();
    /// let b = Room::new(Vector::new(5, 5), Vector::new(7, 7)).unwrap();
    /// let c = Room::new(Vector::new(3, 3), Vector::new(5, 5)).unwrap();
    /// assert!(!a.intersects(&b));
    /// assert!(a.intersects(&c));
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn intersects(&self, other: &Room) -> bool {
        !(self.bottom_right.x < other.top_left.x
            || other.bottom_right.x < self.top_left.x
            || self.bottom_right.y < other.top_left.y
            || other.bottom_right.y < self.top_left.y)
    }

    #[inline(always)]
    #[must_use]
    pub const fn contains(&self, pos: &Vector) -> bool {
        self.top_left.x <= pos.x
            && pos.x <= self.bottom_right.x
            && self.top_left.y <= pos.y
            && pos.y <= self.bottom_right.y
    }

    /// Number of rows and columns covered
    #[inline(always)]
    #[must_use]
    pub const fn shape(&self) -> [u64; 2] {
        [
            self.bottom_right.x.abs_diff(self.top_left.x) + 1,
            self.bottom_right.y.abs_diff(self.top_left.y) + 1,
        ]
    }

    /// Middle cell, rounding towards the top left
    ///
    /// ```
    /// use dungeon::{Room, Vector};
    ///
    /// let room = Room::new(Vector::new(1, 3), Vector::new(5, 9)).unwrap();
    /// assert_eq!(room.center(), Vector::new(3, 6))
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn center(&self) -> Vector {
        let half = self.bottom_right.minus(self.top_left);
        self.top_left.plus(Vector::new(half.x / 2, half.y / 2))
    }

    /// All cells of the room, row by row
    #[must_use]
    pub fn cells(&self) -> Cells {
        Cells::new(self.top_left, self.bottom_right)
    }
}

/// Row-major walk over an inclusive rectangle of cells
#[derive(Debug, Clone)]
pub struct Cells {
    top_left: Vector,
    bottom_right: Vector,
    next: Option<Vector>,
}

impl Cells {
    /// ```
    /// use dungeon::{Cells, Vector};
    ///
    /// let cells: Vec<_> = Cells::new(Vector::new(0, 0), Vector::new(1, 1)).collect();
    /// assert_eq!(
    ///     cells,
    ///     [Vector::new(0, 0), Vector::new(0, 1), Vector::new(1, 0), Vector::new(1, 1)]
    /// );
    /// ```
    #[must_use]
    pub fn new(top_left: Vector, bottom_right: Vector) -> Self {
        let empty = top_left.x > bottom_right.x || top_left.y > bottom_right.y;
        Self {
            top_left,
            bottom_right,
            next: (!empty).then_some(top_left),
        }
    }
}

impl Iterator for Cells {
    type Item = Vector;

    fn next(&mut self) -> Option<Vector> {
        let current = self.next?;
        self.next = if current.y < self.bottom_right.y {
            Some(Vector::new(current.x, current.y + 1))
        } else if current.x < self.bottom_right.x {
            Some(Vector::new(current.x + 1, self.top_left.y))
        } else {
            None
        };
        Some(current)
    }
}
