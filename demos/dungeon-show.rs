use std::{fs::read_to_string, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use simple_logger::SimpleLogger;

use dungeon::{Dungeon, Exits, PartialConfig, Tile, Vector};

#[derive(Debug, Parser)]
struct Args {
    /// Configuration file for the dungeon
    #[clap(short)]
    config: Option<PathBuf>,
    /// Overrides on top of the configuration file
    #[clap(flatten)]
    overrides: PartialConfig,
    /// Output image. The dungeon is printed as text if missing
    #[clap(short, long)]
    output: Option<PathBuf>,
}

const TILE_SIZE: u32 = 8;
const WALL_SIZE: u32 = 1;
const WALL_COLOR: [u8; 3] = [0, 0, 0];
const FLOOR_COLOR: [u8; 3] = [200, 190, 160];
const CONNECTOR_COLOR: [u8; 3] = [160, 60, 40];

fn color(tile: Tile) -> [u8; 3] {
    match tile {
        Tile::Wall => WALL_COLOR,
        Tile::Floor => FLOOR_COLOR,
        Tile::Connector => CONNECTOR_COLOR,
    }
}

fn render(dungeon: &Dungeon) -> anyhow::Result<image::RgbImage> {
    let mut image = image::RgbImage::new(
        TILE_SIZE * dungeon.cols() as u32,
        TILE_SIZE * dungeon.rows() as u32,
    );
    let mut failure = None;
    dungeon.traverse(None, |pos| {
        if failure.is_some() {
            return;
        }
        let cell = dungeon
            .tile_at(pos)
            .and_then(|tile| Ok((tile, dungeon.exits(pos)?)));
        let (tile, exits) = match cell {
            Ok(cell) => cell,
            Err(err) => {
                failure = Some(err);
                return;
            }
        };
        let [top, left] = [pos.x as u32 * TILE_SIZE, pos.y as u32 * TILE_SIZE];
        let fill = color(tile);
        for x in left..left + TILE_SIZE {
            for y in top..top + TILE_SIZE {
                image[(x, y)].0 = fill;
            }
        }
        if tile == Tile::Wall {
            return;
        }
        // outline the closed sides
        let closed = !exits;
        if closed.contains(Exits::Up) {
            for x in left..left + TILE_SIZE {
                for y in top..top + WALL_SIZE {
                    image[(x, y)].0 = WALL_COLOR;
                }
            }
        }
        if closed.contains(Exits::Down) {
            for x in left..left + TILE_SIZE {
                for y in top + TILE_SIZE - WALL_SIZE..top + TILE_SIZE {
                    image[(x, y)].0 = WALL_COLOR;
                }
            }
        }
        if closed.contains(Exits::Left) {
            for x in left..left + WALL_SIZE {
                for y in top..top + TILE_SIZE {
                    image[(x, y)].0 = WALL_COLOR;
                }
            }
        }
        if closed.contains(Exits::Right) {
            for x in left + TILE_SIZE - WALL_SIZE..left + TILE_SIZE {
                for y in top..top + TILE_SIZE {
                    image[(x, y)].0 = WALL_COLOR;
                }
            }
        }
    })?;
    if let Some(err) = failure {
        return Err(err).context("While reading the dungeon");
    }
    Ok(image)
}

fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .without_timestamps()
        .with_level(if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .env()
        .init()
        .context("While initializing logging")?;

    let Args {
        config,
        overrides,
        output,
    } = Args::parse();
    let config: PartialConfig = config
        .map(|path| {
            read_to_string(path)
                .context("Cannot read config file")
                .and_then(|s| toml::from_str(&s).context("Cannot parse config file"))
        })
        .transpose()
        .context("While loading configs")?
        .unwrap_or_default();
    let config = config.merge(overrides).or_defaults();

    let mut dungeon = Dungeon::new(config).context("While configuring the dungeon")?;
    dungeon.generate().context("While generating the dungeon")?;
    match dungeon.rand_pos() {
        Ok(Vector { x, y }) => log::info!("Spawn point at row {x}, column {y}"),
        Err(err) => log::warn!("No spawn point: {err}"),
    }

    match output {
        Some(output) => render(&dungeon)?
            .save(output)
            .context("While saving the image")?,
        None => print!("{dungeon}"),
    }
    Ok(())
}
