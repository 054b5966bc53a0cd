//! Level loading
//!
//! Binary layout, all integers little-endian `u32`:
//! `height`, `width`, `max object count`, then `width * height` tile bytes in
//! row-major order.

use std::path::Path;

use glam::IVec2;

use super::state::{Actor, BrickStyle, GameObject, HazardLook, Level, ObjectKind, World, DEFAULT_GOAL};
use crate::error::LevelLoadError;
use crate::settings::Settings;

/// Three header words
pub const LEVEL_HEADER_SIZE: usize = 12;

/// What one tile byte places in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Object(ObjectKind),
    /// Actor spawn point; not stored as an object
    Spawn,
    /// Goal position; not stored as an object
    Goal,
}

impl Tile {
    pub fn from_code(code: u8) -> Self {
        match code {
            b'G' => Tile::Object(ObjectKind::Solid(BrickStyle::Green)),
            b'R' => Tile::Object(ObjectKind::Solid(BrickStyle::Red)),
            b'M' => Tile::Object(ObjectKind::Solid(BrickStyle::Mossy)),
            b'W' => Tile::Object(ObjectKind::Hazard(HazardLook::Web)),
            b'S' => Tile::Object(ObjectKind::Hazard(HazardLook::Spider)),
            b'C' => Tile::Object(ObjectKind::Collectible),
            b'P' => Tile::Spawn,
            b'E' => Tile::Goal,
            _ => Tile::Empty,
        }
    }
}

/// A parsed but not yet built level file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelFile {
    pub width: u32,
    pub height: u32,
    pub object_count: u32,
    pub tiles: Vec<u8>,
}

fn word(bytes: &[u8], index: usize) -> u32 {
    let at = index * 4;
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

impl LevelFile {
    pub fn parse(bytes: &[u8]) -> Result<Self, LevelLoadError> {
        if bytes.len() < LEVEL_HEADER_SIZE {
            return Err(LevelLoadError::HeaderTooShort {
                actual: bytes.len(),
            });
        }
        let height = word(bytes, 0);
        let width = word(bytes, 1);
        let object_count = word(bytes, 2);

        if width == 0 || height == 0 {
            return Err(LevelLoadError::EmptyGrid { width, height });
        }

        let expected = width as usize * height as usize;
        let body = &bytes[LEVEL_HEADER_SIZE..];
        if body.len() < expected {
            return Err(LevelLoadError::Truncated {
                expected,
                actual: body.len(),
            });
        }

        Ok(Self {
            width,
            height,
            object_count,
            tiles: body[..expected].to_vec(),
        })
    }

    pub fn build(&self, settings: &Settings) -> Result<(World, Actor), LevelLoadError> {
        build_world_from_tiles(
            self.width,
            self.height,
            &self.tiles,
            self.object_count,
            settings,
        )
    }
}

/// Turn a tile grid into the world table and a freshly spawned actor.
///
/// Objects keep grid order, which is the order the resolver visits them in.
pub fn build_world_from_tiles(
    width: u32,
    height: u32,
    tiles: &[u8],
    object_capacity: u32,
    settings: &Settings,
) -> Result<(World, Actor), LevelLoadError> {
    if width == 0 || height == 0 {
        return Err(LevelLoadError::EmptyGrid { width, height });
    }
    let expected = width as usize * height as usize;
    if tiles.len() < expected {
        return Err(LevelLoadError::Truncated {
            expected,
            actual: tiles.len(),
        });
    }

    settings.validate()?;
    let tile_size = settings.tile_size as u32;
    let (Some(width_px), Some(height_px)) = (
        width.checked_mul(tile_size).filter(|&px| px <= i32::MAX as u32),
        height.checked_mul(tile_size).filter(|&px| px <= i32::MAX as u32),
    ) else {
        return Err(LevelLoadError::TooLarge { width, height });
    };

    // The declared count is untrusted; the grid bounds the real object count
    let capacity = object_capacity as usize;
    let mut objects = Vec::with_capacity(capacity.min(expected));
    let mut spawn = IVec2::ZERO;
    let mut goal = DEFAULT_GOAL;

    for (index, &code) in tiles[..expected].iter().enumerate() {
        let x = (index % width as usize) as i32;
        let y = (index / width as usize) as i32;
        let pos = IVec2::new(x, y) * settings.tile_size;

        match Tile::from_code(code) {
            Tile::Object(kind) => {
                if objects.len() == capacity {
                    return Err(LevelLoadError::TooManyObjects { capacity });
                }
                objects.push(GameObject::new(pos, kind));
            }
            Tile::Spawn => spawn = pos,
            Tile::Goal => goal = pos,
            Tile::Empty => {}
        }
    }

    let level = Level {
        width_px,
        height_px,
        object_capacity,
        goal,
    };
    log::info!(
        "Level {}x{} tiles: {} objects, spawn ({}, {}), goal ({}, {})",
        width,
        height,
        objects.len(),
        spawn.x,
        spawn.y,
        goal.x,
        goal.y
    );

    Ok((World::new(level, objects), Actor::spawn(spawn, settings)))
}

/// Read, parse and build a level file
pub fn load_level(
    path: impl AsRef<Path>,
    settings: &Settings,
) -> Result<(World, Actor), LevelLoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LevelLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    LevelFile::parse(&bytes)?.build(settings)
}

/// Encode a text grid (one line per row) into the binary level format.
///
/// Letters are upper-cased; the declared object count is the number of
/// object tiles in the grid.
pub fn encode_level_text(text: &str) -> Vec<u8> {
    let rows: Vec<String> = text.lines().map(|line| line.to_ascii_uppercase()).collect();
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |row| row.len()) as u32;
    let objects = rows
        .iter()
        .flat_map(|row| row.bytes())
        .filter(|&code| matches!(Tile::from_code(code), Tile::Object(_)))
        .count() as u32;

    let mut bytes = Vec::with_capacity(LEVEL_HEADER_SIZE + (width * height) as usize);
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&objects.to_le_bytes());
    for row in &rows {
        bytes.extend_from_slice(row.as_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SettingsError;

    const SAMPLE: &str = "\
.......
.P..c.E
gggwrmg
";

    #[test]
    fn test_encode_writes_header() {
        let bytes = encode_level_text(SAMPLE);
        assert_eq!(&bytes[0..4], &3u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &7u32.to_le_bytes());
        // c + seven ground/hazard tiles
        assert_eq!(&bytes[8..12], &8u32.to_le_bytes());
        assert_eq!(bytes.len(), LEVEL_HEADER_SIZE + 21);
        assert_eq!(bytes[LEVEL_HEADER_SIZE + 14], b'G');
    }

    #[test]
    fn test_build_places_objects_in_grid_order() {
        let settings = Settings::default();
        let level = LevelFile::parse(&encode_level_text(SAMPLE)).unwrap();
        let (world, actor) = level.build(&settings).unwrap();

        assert_eq!(world.level.width_px, 280);
        assert_eq!(world.level.height_px, 120);
        assert_eq!(world.level.goal, IVec2::new(240, 40));
        assert_eq!(actor.pos(), IVec2::new(40, 40));

        assert_eq!(world.objects.len(), 8);
        assert_eq!(world.objects[0].kind, ObjectKind::Collectible);
        assert_eq!(world.objects[0].pos, IVec2::new(160, 40));
        assert_eq!(world.objects[4].kind, ObjectKind::Hazard(HazardLook::Web));
        assert_eq!(world.objects[6].kind, ObjectKind::Solid(BrickStyle::Mossy));
        assert_eq!(world.objects[6].frame_index, 2);
    }

    #[test]
    fn test_missing_markers_use_defaults() {
        let settings = Settings::default();
        let (world, actor) = build_world_from_tiles(2, 1, b"GG", 2, &settings).unwrap();
        assert_eq!(actor.pos(), IVec2::ZERO);
        assert_eq!(world.level.goal, DEFAULT_GOAL);
    }

    #[test]
    fn test_unknown_bytes_are_empty() {
        let settings = Settings::default();
        let (world, _) = build_world_from_tiles(3, 1, b"x?G", 1, &settings).unwrap();
        assert_eq!(world.objects.len(), 1);
        assert_eq!(world.objects[0].pos, IVec2::new(80, 0));
    }

    #[test]
    fn test_rejects_bad_input() {
        let settings = Settings::default();

        assert!(matches!(
            LevelFile::parse(&[1, 0, 0]),
            Err(LevelLoadError::HeaderTooShort { actual: 3 })
        ));

        let mut bytes = encode_level_text(SAMPLE);
        bytes.truncate(bytes.len() - 2);
        assert!(matches!(
            LevelFile::parse(&bytes),
            Err(LevelLoadError::Truncated {
                expected: 21,
                actual: 19
            })
        ));

        assert!(matches!(
            build_world_from_tiles(0, 4, b"", 0, &settings),
            Err(LevelLoadError::EmptyGrid { .. })
        ));

        assert!(matches!(
            build_world_from_tiles(3, 1, b"GGG", 2, &settings),
            Err(LevelLoadError::TooManyObjects { capacity: 2 })
        ));
    }

    #[test]
    fn test_huge_declared_object_count_is_harmless() {
        let settings = Settings::default();
        let mut bytes = encode_level_text("P.G");
        bytes[8..12].copy_from_slice(&u32::MAX.to_le_bytes());

        let (world, actor) = LevelFile::parse(&bytes).unwrap().build(&settings).unwrap();
        assert_eq!(world.objects.len(), 1);
        assert_eq!(world.level.object_capacity, u32::MAX);
        assert_eq!(actor.pos(), IVec2::ZERO);
    }

    #[test]
    fn test_bad_tile_size_is_an_error() {
        let settings = Settings {
            tile_size: -40,
            ..Default::default()
        };
        assert!(matches!(
            build_world_from_tiles(2, 1, b"GG", 2, &settings),
            Err(LevelLoadError::InvalidSettings(SettingsError::NonPositive {
                field: "tile_size",
                value: -40
            }))
        ));
    }

    #[test]
    fn test_oversized_level_is_an_error() {
        let settings = Settings {
            tile_size: i32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            build_world_from_tiles(2, 1, b"..", 0, &settings),
            Err(LevelLoadError::TooLarge { width: 2, height: 1 })
        ));
    }

    #[test]
    fn test_spawned_actor_uses_tuned_animation() {
        let settings = Settings {
            animation_duration: 7,
            ..Default::default()
        };
        let (_, actor) = build_world_from_tiles(1, 1, b"P", 0, &settings).unwrap();
        assert_eq!(actor.animation_timer, 7);
    }

    #[test]
    fn test_load_level_from_disk() {
        let settings = Settings::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.bin");
        std::fs::write(&path, encode_level_text(SAMPLE)).unwrap();

        let (world, _) = load_level(&path, &settings).unwrap();
        assert_eq!(world.objects.len(), 8);

        let err = load_level(dir.path().join("missing.bin"), &settings).unwrap_err();
        assert!(matches!(err, LevelLoadError::Io { .. }));
    }
}
