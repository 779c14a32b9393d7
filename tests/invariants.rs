use std::collections::VecDeque;

use rand::{thread_rng, Rng};

use dungeon::{Config, Dungeon, Tile, Vector, CARDINALS};

fn random_config(rng: &mut impl Rng) -> Config {
    let min_room_size = 2 * rng.gen_range(1..4) + 1;
    Config {
        seed: rng.gen(),
        rows: rng.gen_range(5..64),
        cols: rng.gen_range(5..64),
        curliness: rng.gen_range((0.)..=(1.)),
        extra_connector_chance: rng.gen_range((0.)..(0.2)),
        dead_endiness: 0.,
        min_room_size,
        max_room_size: min_room_size + 2 * rng.gen_range(0..4),
        room_placement_attempts: rng.gen_range(0..100),
        ..Default::default()
    }
}

fn generated(config: Config) -> Dungeon {
    let mut dungeon = Dungeon::new(config).unwrap();
    dungeon.generate().unwrap();
    dungeon
}

fn open_cells(dungeon: &Dungeon) -> Vec<Vector> {
    let mut cells = vec![];
    dungeon
        .traverse(None, |pos| {
            if !dungeon.is_wall(pos).unwrap() {
                cells.push(pos)
            }
        })
        .unwrap();
    cells
}

#[test]
fn every_open_cell_is_reachable() {
    for _ in 0..50 {
        let config = random_config(&mut thread_rng());
        let dungeon = generated(config);
        let cells = open_cells(&dungeon);
        let Some(&start) = cells.first() else {
            continue;
        };

        let mut seen = vec![false; dungeon.rows() * dungeon.cols()];
        let idx = |p: Vector| p.x as usize * dungeon.cols() + p.y as usize;
        let mut queue = VecDeque::from([start]);
        seen[idx(start)] = true;
        let mut reached = 0;
        while let Some(pos) = queue.pop_front() {
            reached += 1;
            for n in dungeon.neighbours(pos) {
                if !seen[idx(n)] && !dungeon.is_wall(n).unwrap() {
                    seen[idx(n)] = true;
                    queue.push_back(n);
                }
            }
        }
        assert_eq!(reached, cells.len(), "{config:?}\n{dungeon}");
    }
}

#[test]
fn rooms_are_disjoint_and_inside() {
    for _ in 0..50 {
        let config = random_config(&mut thread_rng());
        let dungeon = generated(config);
        let rooms = dungeon.rooms();
        for (i, room) in rooms.iter().enumerate() {
            assert!(dungeon.in_bounds(room.top_left()), "{config:?}");
            assert!(dungeon.in_bounds(room.bottom_right()), "{config:?}");
            for other in &rooms[..i] {
                assert!(!room.intersects(other), "{config:?}: {room:?} {other:?}");
            }
            for pos in room.cells() {
                assert_eq!(dungeon.tile_at(pos), Ok(Tile::Floor));
            }
        }
    }
}

#[test]
fn no_dead_ends_are_left() {
    for _ in 0..50 {
        let config = random_config(&mut thread_rng());
        let dungeon = generated(config);
        for pos in open_cells(&dungeon) {
            let exits = dungeon.exits(pos).unwrap();
            assert!(!exits.is_dead_end(), "{config:?}: dead end at {pos}");
            let open = CARDINALS
                .into_iter()
                .filter(|d| dungeon.in_bounds(pos + *d) && !dungeon.is_wall(pos + *d).unwrap())
                .count();
            assert_eq!(open as u32, exits.bits().count_ones());
        }
    }
}

#[test]
fn same_seed_same_dungeon() {
    for _ in 0..10 {
        let config = random_config(&mut thread_rng());
        let a = generated(config);
        let b = generated(config);
        assert_eq!(a.tiles().unwrap(), b.tiles().unwrap());
        assert_eq!(a.rooms(), b.rooms());
        assert_eq!(a.to_string(), b.to_string());
    }
}

#[test]
fn default_dungeon_spawns_on_floor() {
    let dungeon = generated(Config::default());
    assert_eq!(dungeon.rows(), 101);
    let spawn = dungeon.rand_pos().unwrap();
    assert_eq!(dungeon.tile_at(spawn), Ok(Tile::Floor));
    assert!(dungeon.rooms()[0].contains(&spawn));
}
