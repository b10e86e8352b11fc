//! Maze construction.

use bevy_ecs::resource::Resource;
use glam::Vec3;
use rand::Rng;
use tracing::debug;

use crate::constants::{maze, movement, placement};

/// Whether a wall bounds the maze or sits on an interior cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallKind {
    Interior,
    Boundary,
}

impl WallKind {
    /// The wall's contribution to the player collision radius.
    pub fn collision_radius(self) -> f32 {
        match self {
            WallKind::Interior => movement::WALL_RADIUS,
            WallKind::Boundary => movement::BOUNDARY_WALL_RADIUS,
        }
    }
}

/// A single axis-aligned wall block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    /// World-space center.
    pub position: Vec3,
    /// Extent along each axis.
    pub scale: Vec3,
}

impl Wall {
    /// A standard block centered on an interior cell.
    pub fn interior(position: Vec3) -> Self {
        Self {
            position,
            scale: Vec3::new(maze::WALL_THICKNESS, maze::WALL_HEIGHT, maze::WALL_THICKNESS),
        }
    }

    /// Boundary walls are recognised by an oversized footprint on X or Z.
    pub fn kind(&self) -> WallKind {
        if self.scale.x > maze::WALL_THICKNESS || self.scale.z > maze::WALL_THICKNESS {
            WallKind::Boundary
        } else {
            WallKind::Interior
        }
    }

    pub fn is_boundary(&self) -> bool {
        self.kind() == WallKind::Boundary
    }
}

/// The generated wall layout, plus the two spawn points it was cleared around.
///
/// Walls never change after generation; a reset replaces the whole resource.
#[derive(Resource, Debug, Clone)]
pub struct Maze {
    /// Half-extent; interior cells span `0..size` on each axis.
    pub size: i32,
    pub spawn: Vec3,
    pub antagonist_spawn: Vec3,
    walls: Vec<Wall>,
    /// Row-major cell occupancy, indexed `[i * size + j]`.
    cells: Vec<bool>,
}

impl Maze {
    /// Randomly fills interior cells and clears the area around both spawn points.
    pub fn generate<R: Rng + ?Sized>(
        size: i32,
        wall_probability: f64,
        spawn: Vec3,
        antagonist_spawn: Vec3,
        rng: &mut R,
    ) -> Maze {
        let probability = wall_probability.clamp(0.0, 1.0);
        let mut walls = Self::boundary_walls(size);

        for i in 0..size {
            for j in 0..size {
                if rng.random_bool(probability) {
                    walls.push(Wall::interior(Self::cell_center(size, i, j)));
                }
            }
        }

        let placed = walls.len();
        walls.retain(|wall| {
            wall.is_boundary()
                || (wall.position.distance(spawn) > maze::CLEARANCE_RADIUS
                    && wall.position.distance(antagonist_spawn) > maze::CLEARANCE_RADIUS)
        });

        debug!(size, walls = walls.len(), cleared = placed - walls.len(), "Maze generated");
        Self::from_walls(size, spawn, antagonist_spawn, walls)
    }

    /// Builds a maze from an explicit wall list. Occupancy is derived from the interior walls.
    pub fn from_walls(size: i32, spawn: Vec3, antagonist_spawn: Vec3, walls: Vec<Wall>) -> Maze {
        let side = size.max(0) as usize;
        let mut cells = vec![false; side * side];
        for wall in walls.iter().filter(|wall| !wall.is_boundary()) {
            if let Some((i, j)) = Self::cell_of(size, wall.position) {
                cells[i * side + j] = true;
            }
        }

        Maze {
            size,
            spawn,
            antagonist_spawn,
            walls,
            cells,
        }
    }

    /// The four thick walls enclosing a maze of the given half-extent.
    pub fn boundary_walls(size: i32) -> Vec<Wall> {
        let extent = size as f32;
        let span = extent * 2.0;
        let y = maze::WALL_CENTER_Y;
        let (thick, high) = (maze::WALL_THICKNESS, maze::WALL_HEIGHT);

        vec![
            Wall {
                position: Vec3::new(-extent, y, 0.0),
                scale: Vec3::new(thick, high, span),
            },
            Wall {
                position: Vec3::new(extent, y, 0.0),
                scale: Vec3::new(thick, high, span),
            },
            Wall {
                position: Vec3::new(0.0, y, -extent),
                scale: Vec3::new(span, high, thick),
            },
            Wall {
                position: Vec3::new(0.0, y, extent),
                scale: Vec3::new(span, high, thick),
            },
        ]
    }

    /// World-space center of interior cell `(i, j)`.
    pub fn cell_center(size: i32, i: i32, j: i32) -> Vec3 {
        let to_world = |n: i32| n as f32 * maze::CELL_SPACING - size as f32 + maze::CELL_SPACING;
        Vec3::new(to_world(i), maze::WALL_CENTER_Y, to_world(j))
    }

    fn cell_of(size: i32, position: Vec3) -> Option<(usize, usize)> {
        let to_cell = |v: f32| ((v + size as f32 - maze::CELL_SPACING) / maze::CELL_SPACING).round() as i32;
        let (i, j) = (to_cell(position.x), to_cell(position.z));
        ((0..size).contains(&i) && (0..size).contains(&j)).then_some((i as usize, j as usize))
    }

    /// Every wall, boundaries first.
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn boundaries(&self) -> impl Iterator<Item = &Wall> {
        self.walls.iter().filter(|wall| wall.is_boundary())
    }

    pub fn interior(&self) -> impl Iterator<Item = &Wall> {
        self.walls.iter().filter(|wall| !wall.is_boundary())
    }

    /// Whether interior cell `(i, j)` holds a wall. Out-of-range cells read as unoccupied.
    pub fn is_occupied(&self, i: i32, j: i32) -> bool {
        if !(0..self.size).contains(&i) || !(0..self.size).contains(&j) {
            return false;
        }
        self.cells[(i * self.size + j) as usize]
    }

    /// Half-width of the square pickups are sampled in; 18 at the default size.
    pub fn placement_extent(&self) -> f32 {
        (self.size as f32 - placement::PLACEMENT_MARGIN).max(0.0)
    }

    /// The largest |x| or |z| the player may occupy.
    pub fn boundary_limit(&self) -> f32 {
        (self.size - 1) as f32
    }
}
