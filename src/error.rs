use thiserror::Error;

use crate::Vector;

/// Errors produced while building or querying a dungeon
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("this dungeon doesn't have a cell at {pos}")]
    OutOfBounds { pos: Vector },

    #[error("top left corner {top_left} must be above and to the left of bottom right corner {bottom_right}")]
    InvalidRoom {
        top_left: Vector,
        bottom_right: Vector,
    },

    #[error("this dungeon has already been generated")]
    AlreadyGenerated,

    #[error("this dungeon has not been generated yet")]
    NotGenerated,

    #[error("cannot normalize the zero vector")]
    DegenerateVector,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no room was placed in this dungeon")]
    NoRooms,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
