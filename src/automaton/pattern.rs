//! Random soups with optional point symmetry and a clipping shape.
//!
//! Symmetry is applied about the center of the target rectangle. Positions
//! are handled in doubled coordinates relative to that center so odd and
//! even sizes share one code path.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::neighborhood::Cell;
use super::region::Rect;
use super::world::World;

/// Point group applied to a random fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symmetry {
    /// No symmetry.
    #[default]
    C1,
    /// Half-turn rotation.
    C2,
    /// Quarter-turn rotations.
    C4,
    /// Mirror across the vertical axis.
    D2,
    /// Mirrors across both axes.
    D4,
    /// Full square symmetry: rotations and mirrors.
    D8,
}

impl Symmetry {
    /// Images of a doubled, center-relative position under this group.
    fn images(self, u: i64, v: i64) -> Vec<(i64, i64)> {
        match self {
            Symmetry::C1 => vec![(u, v)],
            Symmetry::C2 => vec![(u, v), (-u, -v)],
            Symmetry::C4 => vec![(u, v), (-v, u), (-u, -v), (v, -u)],
            Symmetry::D2 => vec![(u, v), (-u, v)],
            Symmetry::D4 => vec![(u, v), (-u, v), (u, -v), (-u, -v)],
            Symmetry::D8 => vec![
                (u, v),
                (-v, u),
                (-u, -v),
                (v, -u),
                (-u, v),
                (v, u),
                (u, -v),
                (-v, -u),
            ],
        }
    }

    /// Orbit representative used to share one random roll across the orbit.
    fn representative(self, u: i64, v: i64) -> (i64, i64) {
        self.images(u, v).into_iter().min().unwrap_or((u, v))
    }
}

/// Outline clipping a random fill inside its rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Square,
    Diamond,
    Octagon,
}

impl Shape {
    /// `u`, `v` are doubled offsets from the center, so the half extents are
    /// `width` and `height` in the same units.
    fn contains(self, u: i64, v: i64, width: i64, height: i64) -> bool {
        let taxicab = u.abs() * height + v.abs() * width;
        match self {
            Shape::Square => true,
            Shape::Diamond => taxicab <= width * height,
            Shape::Octagon => 2 * taxicab <= 3 * width * height,
        }
    }
}

/// Parameters for [`random_fill`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomFill {
    pub width: i32,
    pub height: i32,
    /// Chance in percent that a cell is live (clamped to 0..=100).
    pub fill_percent: u8,
    pub symmetry: Symmetry,
    pub shape: Shape,
}

impl Default for RandomFill {
    fn default() -> Self {
        RandomFill {
            width: 32,
            height: 32,
            fill_percent: 50,
            symmetry: Symmetry::C1,
            shape: Shape::Square,
        }
    }
}

impl RandomFill {
    /// Rectangle of this size centered on the origin.
    pub fn centered_rect(&self) -> Rect {
        Rect::new(-self.width / 2, -self.height / 2, self.width, self.height)
    }
}

/// Paint a random soup into `rect`.
///
/// Every cell inside `shape` is overwritten; live cells get a random state in
/// `1..states`. Cells in the same symmetry orbit receive the same state. With
/// `clear` the world is emptied first.
///
/// # Returns
/// Number of live cells painted.
pub fn random_fill<R: Rng + ?Sized>(
    world: &mut World,
    rect: Rect,
    params: &RandomFill,
    states: Cell,
    clear: bool,
    rng: &mut R,
) -> usize {
    if clear {
        world.clear();
    }
    if rect.is_empty() {
        return 0;
    }

    let states = states.max(2);
    let chance = f64::from(params.fill_percent.min(100)) / 100.0;
    let (width, height) = (i64::from(rect.width), i64::from(rect.height));
    let center_x = 2 * i64::from(rect.x) + width - 1;
    let center_y = 2 * i64::from(rect.y) + height - 1;

    let mut rolls: HashMap<(i64, i64), Cell> = HashMap::new();
    let mut live = 0;

    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            let u = 2 * i64::from(x) - center_x;
            let v = 2 * i64::from(y) - center_y;
            if !params.shape.contains(u, v, width, height) {
                continue;
            }

            let key = params.symmetry.representative(u, v);
            let state = *rolls.entry(key).or_insert_with(|| {
                if rng.gen_bool(chance) {
                    rng.gen_range(1..states)
                } else {
                    0
                }
            });

            world.paint_cell(x, y, state);
            if state != 0 {
                live += 1;
            }
        }
    }

    tracing::debug!(
        live,
        symmetry = ?params.symmetry,
        shape = ?params.shape,
        "random fill"
    );
    live
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn fill(symmetry: Symmetry, shape: Shape, percent: u8, size: i32) -> (World, Rect) {
        let params = RandomFill {
            width: size,
            height: size,
            fill_percent: percent,
            symmetry,
            shape,
        };
        let rect = Rect::new(3, -7, size, size);
        let mut world = World::new();
        let mut rng = SmallRng::seed_from_u64(7);
        random_fill(&mut world, rect, &params, 2, false, &mut rng);
        (world, rect)
    }

    #[test]
    fn test_full_and_empty_fill() {
        let (world, rect) = fill(Symmetry::C1, Shape::Square, 100, 9);
        assert_eq!(world.population(), rect.area() as u64);

        let (world, _) = fill(Symmetry::C1, Shape::Square, 0, 9);
        assert_eq!(world.population(), 0);
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn test_c4_symmetry_holds() {
        let (world, rect) = fill(Symmetry::C4, Shape::Square, 50, 10);
        let n = rect.width - 1;
        for j in 0..rect.height {
            for i in 0..rect.width {
                let here = world.cell_at(rect.x + i, rect.y + j);
                let turned = world.cell_at(rect.x + n - j, rect.y + i);
                assert_eq!(here, turned, "({i}, {j})");
            }
        }
    }

    #[test]
    fn test_d8_symmetry_holds() {
        let (world, rect) = fill(Symmetry::D8, Shape::Square, 50, 11);
        let n = rect.width - 1;
        for j in 0..rect.height {
            for i in 0..rect.width {
                let here = world.cell_at(rect.x + i, rect.y + j);
                assert_eq!(here, world.cell_at(rect.x + n - i, rect.y + j));
                assert_eq!(here, world.cell_at(rect.x + j, rect.y + i));
            }
        }
    }

    #[test]
    fn test_diamond_clips_corners() {
        let (world, rect) = fill(Symmetry::C1, Shape::Diamond, 100, 9);
        assert_eq!(world.cell_at(rect.x, rect.y), 0);
        assert_eq!(world.cell_at(rect.x + 4, rect.y + 4), 1);
        assert_eq!(world.cell_at(rect.x + 4, rect.y), 1);

        let (octagon, _) = fill(Symmetry::C1, Shape::Octagon, 100, 9);
        assert!(octagon.population() > world.population());
        assert!(octagon.population() < rect.area() as u64);
    }

    #[test]
    fn test_clear_flag() {
        let mut world = World::new();
        world.paint_cell(500, 500, 1);
        let mut rng = SmallRng::seed_from_u64(1);
        let params = RandomFill {
            fill_percent: 0,
            ..RandomFill::default()
        };
        random_fill(&mut world, params.centered_rect(), &params, 2, true, &mut rng);
        assert_eq!(world.cell_at(500, 500), 0);
    }

    #[test]
    fn test_multi_state_fill() {
        let mut world = World::new();
        let mut rng = SmallRng::seed_from_u64(3);
        let params = RandomFill {
            fill_percent: 100,
            ..RandomFill::default()
        };
        random_fill(&mut world, params.centered_rect(), &params, 4, false, &mut rng);
        let rect = params.centered_rect();
        let mut buf = vec![0; rect.area()];
        world.extract_region(rect, &mut buf);
        assert!(buf.iter().all(|&c| (1..4).contains(&c)));
    }
}
