use std::{
    fmt::Display,
    ops::{Add, Mul, Neg, Sub},
};

use crate::{Error, Result};

/// A point or displacement on the grid
///
/// `x` is the row and `y` the column.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Vector {
    pub x: i64,
    pub y: i64,
}

/// Unit steps, in the order they are tried: +row, -row, -column, +column
pub const CARDINALS: [Vector; 4] = [
    Vector::new(1, 0),
    Vector::new(-1, 0),
    Vector::new(0, -1),
    Vector::new(0, 1),
];

impl Vector {
    pub const ZERO: Vector = Vector::new(0, 0);

    #[inline(always)]
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// ```
    /// use dungeon::Vector;
    ///
    /// assert_eq!(Vector::new(1, 3).plus(Vector::new(2, -1)), Vector::new(3, 2))
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn plus(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y)
    }

    #[inline(always)]
    #[must_use]
    pub const fn minus(self, other: Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }

    /// ```
    /// use dungeon::Vector;
    ///
    /// assert_eq!(Vector::new(0, -1).scaled_by(2), Vector::new(0, -2))
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn scaled_by(self, n: i64) -> Vector {
        Vector::new(self.x * n, self.y * n)
    }

    #[inline(always)]
    #[must_use]
    pub const fn dot(self, other: Vector) -> i64 {
        self.x * other.x + self.y * other.y
    }

    #[inline(always)]
    #[must_use]
    pub fn magnitude(self) -> f64 {
        (self.dot(self) as f64).sqrt()
    }

    #[inline(always)]
    #[must_use]
    pub fn distance_from(self, other: Vector) -> f64 {
        self.minus(other).magnitude()
    }

    /// Unit vector pointing the same way, as floating point components
    ///
    /// ```
    /// use dungeon::{Error, Vector};
    ///
    /// assert_eq!(Vector::new(0, -4).normalized(), Ok([0., -1.]));
    /// assert_eq!(Vector::ZERO.normalized(), Err(Error::DegenerateVector));
    /// ```
    pub fn normalized(self) -> Result<[f64; 2]> {
        let m = self.magnitude();
        if m == 0. {
            return Err(Error::DegenerateVector);
        }
        Ok([self.x as f64 / m, self.y as f64 / m])
    }

    /// Rotate counterclockwise by `theta` radians
    #[must_use]
    pub fn rotated(self, theta: f64) -> [f64; 2] {
        let (sin, cos) = theta.sin_cos();
        let [x, y] = [self.x as f64, self.y as f64];
        [x * cos - y * sin, x * sin + y * cos]
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        self.plus(rhs)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        self.minus(rhs)
    }
}

impl Mul<i64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i64) -> Vector {
        self.scaled_by(rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.scaled_by(-1)
    }
}

impl Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_match_methods() {
        let a = Vector::new(3, -2);
        let b = Vector::new(-1, 5);
        assert_eq!(a + b, a.plus(b));
        assert_eq!(a - b, Vector::new(4, -7));
        assert_eq!(a * 3, Vector::new(9, -6));
        assert_eq!(-a, Vector::new(-3, 2));
    }

    #[test]
    fn cardinals_are_unit_steps() {
        for d in CARDINALS {
            assert_eq!(d.dot(d), 1);
            assert!(CARDINALS.contains(&-d));
        }
    }

    #[test]
    fn rotate_quarter_turn() {
        let [x, y] = Vector::new(1, 0).rotated(std::f64::consts::FRAC_PI_2);
        assert!(x.abs() < 1e-12);
        assert!((y - 1.).abs() < 1e-12);
    }

    #[test]
    fn distance() {
        assert_eq!(Vector::new(0, 0).distance_from(Vector::new(3, 4)), 5.);
        assert_eq!(Vector::new(2, 2).to_string(), "[2, 2]");
    }
}
