//! Battlefield boundary queries used by the turn policy.
//! This module owns the single out-of-range predicate and the corner/edge check built on it.
//! It does not own tile contents, occupancy, or movement rules.

use serde::{Deserialize, Serialize};

use crate::types::Pos;

/// The arena's view of which cells are playable.
pub trait BattlefieldBounds {
    fn is_out_of_range(&self, x: i32, y: i32) -> bool;
}

/// Rectangular arena with playable cells `0..width` by `0..height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battlefield {
    pub width: u32,
    pub height: u32,
}

impl Battlefield {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        !self.is_out_of_range(pos.x, pos.y)
    }
}

impl BattlefieldBounds for Battlefield {
    fn is_out_of_range(&self, x: i32, y: i32) -> bool {
        x < 0 || y < 0 || (x as u32) >= self.width || (y as u32) >= self.height
    }
}

/// True when all four orthogonal neighbours of `pos` are playable.
///
/// A neighbour whose coordinate would overflow `i32` counts as out of range.
pub fn is_clear_of_edges(pos: Pos, bounds: &(impl BattlefieldBounds + ?Sized)) -> bool {
    [(1, 0), (-1, 0), (0, 1), (0, -1)].into_iter().all(|(dx, dy)| {
        match (pos.x.checked_add(dx), pos.y.checked_add(dy)) {
            (Some(x), Some(y)) => !bounds.is_out_of_range(x, y),
            _ => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn rectangle_bounds_exclude_negative_and_far_cells() {
        let field = Battlefield::new(10, 6);
        assert!(field.in_bounds(Pos { x: 0, y: 0 }));
        assert!(field.in_bounds(Pos { x: 9, y: 5 }));
        assert!(field.is_out_of_range(-1, 0));
        assert!(field.is_out_of_range(0, -1));
        assert!(field.is_out_of_range(10, 0));
        assert!(field.is_out_of_range(0, 6));
    }

    #[test]
    fn interior_cell_is_clear_of_edges() {
        let field = Battlefield::new(10, 10);
        assert!(is_clear_of_edges(Pos { x: 5, y: 5 }, &field));
        assert!(is_clear_of_edges(Pos { x: 1, y: 8 }, &field));
    }

    #[test]
    fn edge_and_corner_cells_are_not_clear() {
        let field = Battlefield::new(10, 10);
        for pos in [
            Pos { x: 0, y: 5 },
            Pos { x: 9, y: 5 },
            Pos { x: 5, y: 0 },
            Pos { x: 5, y: 9 },
            Pos { x: 0, y: 0 },
            Pos { x: 9, y: 9 },
        ] {
            assert!(!is_clear_of_edges(pos, &field), "{pos:?} touches the arena edge");
        }
    }

    #[test]
    fn edge_check_consults_all_four_neighbours() {
        struct Probe(RefCell<Vec<(i32, i32)>>);
        impl BattlefieldBounds for Probe {
            fn is_out_of_range(&self, x: i32, y: i32) -> bool {
                self.0.borrow_mut().push((x, y));
                false
            }
        }

        let probe = Probe(Default::default());
        assert!(is_clear_of_edges(Pos { x: 3, y: 7 }, &probe));
        let mut seen = probe.0.into_inner();
        seen.sort();
        assert_eq!(seen, vec![(2, 7), (3, 6), (3, 8), (4, 7)]);
    }

    #[test]
    fn neighbours_past_the_integer_range_are_not_clear() {
        struct Unbounded;
        impl BattlefieldBounds for Unbounded {
            fn is_out_of_range(&self, _x: i32, _y: i32) -> bool {
                false
            }
        }

        assert!(is_clear_of_edges(Pos { x: 0, y: 0 }, &Unbounded));
        for pos in [
            Pos { x: i32::MAX, y: 0 },
            Pos { x: i32::MIN, y: 0 },
            Pos { x: 0, y: i32::MAX },
            Pos { x: 0, y: i32::MIN },
        ] {
            assert!(!is_clear_of_edges(pos, &Unbounded), "{pos:?} has no neighbour past the edge");
        }
    }
}
