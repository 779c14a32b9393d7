use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, Tile};

/// Config for a dungeon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed used by `Dungeon::generate`
    pub seed: u64,
    /// Number of rows of the grid
    pub rows: usize,
    /// Number of columns of the grid
    pub cols: usize,
    /// Probability that a maze turns instead of going straight
    /// -> 0 means long straight corridors
    /// -> 1 means a turn at every step
    pub curliness: f64,
    /// Probability that an unneeded connector is opened anyway
    pub extra_connector_chance: f64,
    /// Fraction of dead ends to keep. Reserved: every dead end is removed
    pub dead_endiness: f64,
    /// Smallest side of a room (odd)
    pub min_room_size: usize,
    /// Largest side of a room (odd)
    pub max_room_size: usize,
    /// Number of tries to place a random room
    pub room_placement_attempts: usize,
    /// Code of wall tiles in `Dungeon::codes`
    pub wall_tile: u8,
    /// Code of floor tiles in `Dungeon::codes`
    pub floor_tile: u8,
    /// Code of connector tiles in `Dungeon::codes`
    pub connector_tile: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 0,
            rows: 101,
            cols: 101,
            curliness: 0.2,
            extra_connector_chance: 0.02,
            dead_endiness: 0.,
            min_room_size: 5,
            max_room_size: 9,
            room_placement_attempts: 10,
            wall_tile: 0,
            floor_tile: 1,
            connector_tile: 2,
        }
    }
}

impl Config {
    /// Check that the generator can work with these values
    ///
    /// ```
    /// use dungeon::Config;
    ///
    /// assert!(Config::default().validate().is_ok());
    /// assert!(Config { min_room_size: 4, ..Default::default() }.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| -> Result<()> { Err(Error::InvalidConfig(msg)) };
        if self.rows < 3 || self.cols < 3 {
            return fail(format!(
                "grid must be at least 3x3, got {}x{}",
                self.rows, self.cols
            ));
        }
        for (name, p) in [
            ("curliness", self.curliness),
            ("extra_connector_chance", self.extra_connector_chance),
            ("dead_endiness", self.dead_endiness),
        ] {
            if !(0. ..=1.).contains(&p) {
                return fail(format!("{name} must be in [0, 1], got {p}"));
            }
        }
        for (name, s) in [
            ("min_room_size", self.min_room_size),
            ("max_room_size", self.max_room_size),
        ] {
            if s < 3 || s % 2 == 0 {
                return fail(format!("{name} must be odd and at least 3, got {s}"));
            }
        }
        if self.min_room_size > self.max_room_size {
            return fail(format!(
                "min_room_size ({}) is bigger than max_room_size ({})",
                self.min_room_size, self.max_room_size
            ));
        }
        if self.wall_tile == self.floor_tile
            || self.wall_tile == self.connector_tile
            || self.floor_tile == self.connector_tile
        {
            return fail(format!(
                "tile codes must be distinct, got {}/{}/{}",
                self.wall_tile, self.floor_tile, self.connector_tile
            ));
        }
        Ok(())
    }

    /// Code of a tile kind
    #[inline(always)]
    #[must_use]
    pub const fn code(&self, tile: Tile) -> u8 {
        match tile {
            Tile::Wall => self.wall_tile,
            Tile::Floor => self.floor_tile,
            Tile::Connector => self.connector_tile,
        }
    }
}

/// Partial config for a dungeon
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Parser, Default)]
pub struct PartialConfig {
    /// Seed of the dungeon
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Number of rows of the grid
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    /// Number of columns of the grid
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cols: Option<usize>,
    /// Probability that a maze turns instead of going straight
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curliness: Option<f64>,
    /// Probability that an unneeded connector is opened anyway
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_connector_chance: Option<f64>,
    /// Fraction of dead ends to keep (reserved)
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dead_endiness: Option<f64>,
    /// Smallest side of a room
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_room_size: Option<usize>,
    /// Largest side of a room
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_room_size: Option<usize>,
    /// Number of tries to place a random room
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_placement_attempts: Option<usize>,
    /// Code of wall tiles
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_tile: Option<u8>,
    /// Code of floor tiles
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_tile: Option<u8>,
    /// Code of connector tiles
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_tile: Option<u8>,
}

impl PartialConfig {
    /// Layer `other` on top of `self`
    pub fn merge(self, other: PartialConfig) -> Self {
        Self {
            seed: other.seed.or(self.seed),
            rows: other.rows.or(self.rows),
            cols: other.cols.or(self.cols),
            curliness: other.curliness.or(self.curliness),
            extra_connector_chance: other
                .extra_connector_chance
                .or(self.extra_connector_chance),
            dead_endiness: other.dead_endiness.or(self.dead_endiness),
            min_room_size: other.min_room_size.or(self.min_room_size),
            max_room_size: other.max_room_size.or(self.max_room_size),
            room_placement_attempts: other
                .room_placement_attempts
                .or(self.room_placement_attempts),
            wall_tile: other.wall_tile.or(self.wall_tile),
            floor_tile: other.floor_tile.or(self.floor_tile),
            connector_tile: other.connector_tile.or(self.connector_tile),
        }
    }

    pub fn or_defaults(self) -> Config {
        let default = Config::default();
        Config {
            seed: self.seed.unwrap_or(default.seed),
            rows: self.rows.unwrap_or(default.rows),
            cols: self.cols.unwrap_or(default.cols),
            curliness: self.curliness.unwrap_or(default.curliness),
            extra_connector_chance: self
                .extra_connector_chance
                .unwrap_or(default.extra_connector_chance),
            dead_endiness: self.dead_endiness.unwrap_or(default.dead_endiness),
            min_room_size: self.min_room_size.unwrap_or(default.min_room_size),
            max_room_size: self.max_room_size.unwrap_or(default.max_room_size),
            room_placement_attempts: self
                .room_placement_attempts
                .unwrap_or(default.room_placement_attempts),
            wall_tile: self.wall_tile.unwrap_or(default.wall_tile),
            floor_tile: self.floor_tile.unwrap_or(default.floor_tile),
            connector_tile: self.connector_tile.unwrap_or(default.connector_tile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_the_overlay() {
        let base = PartialConfig {
            rows: Some(21),
            cols: Some(31),
            ..Default::default()
        };
        let overlay = PartialConfig {
            cols: Some(41),
            curliness: Some(0.5),
            ..Default::default()
        };
        let config = base.merge(overlay).or_defaults();
        assert_eq!(config.rows, 21);
        assert_eq!(config.cols, 41);
        assert_eq!(config.curliness, 0.5);
        assert_eq!(config.max_room_size, Config::default().max_room_size);
    }

    #[test]
    fn empty_partial_is_default() {
        assert_eq!(PartialConfig::default().or_defaults(), Config::default());
    }

    #[test]
    fn validation_failures() {
        let bad = [
            Config {
                rows: 2,
                ..Default::default()
            },
            Config {
                curliness: 1.5,
                ..Default::default()
            },
            Config {
                extra_connector_chance: -0.1,
                ..Default::default()
            },
            Config {
                min_room_size: 1,
                max_room_size: 1,
                ..Default::default()
            },
            Config {
                min_room_size: 9,
                max_room_size: 5,
                ..Default::default()
            },
            Config {
                connector_tile: 1,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "{config:?} should be refused"
            );
        }
    }

    #[test]
    fn codes() {
        let config = Config {
            wall_tile: b'#',
            floor_tile: b'.',
            connector_tile: b'+',
            ..Default::default()
        };
        assert_eq!(config.code(Tile::Wall), b'#');
        assert_eq!(config.code(Tile::Floor), b'.');
        assert_eq!(config.code(Tile::Connector), b'+');
    }
}
