//! Cardinal directions used for facing, movement, and sprite selection.

use glam::Vec2;

/// One of the four cardinal directions. Entities never face or move diagonally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn as_usize(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// Unit offset in screen coordinates (y grows downward).
    pub fn offset(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Picks the dominant axis of a displacement vector.
    ///
    /// Horizontal wins only when `|x| > |y|`, so ties resolve vertically,
    /// and a zero vector has no direction. Used by enemy pursuit and the
    /// touch joystick, which share the no-diagonals rule.
    pub fn from_dominant_axis(v: Vec2) -> Option<Direction> {
        if v == Vec2::ZERO {
            return None;
        }
        if v.x.abs() > v.y.abs() {
            Some(if v.x > 0.0 { Direction::Right } else { Direction::Left })
        } else {
            Some(if v.y > 0.0 { Direction::Down } else { Direction::Up })
        }
    }

    /// Facing angle in degrees, screen coordinates (0° = right, 90° = down).
    pub fn angle_degrees(self) -> f32 {
        match self {
            Direction::Right => 0.0,
            Direction::Down => 90.0,
            Direction::Left => 180.0,
            Direction::Up => -90.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_are_axis_exclusive() {
        for direction in Direction::DIRECTIONS {
            let offset = direction.offset();
            assert_eq!(offset.x == 0.0 || offset.y == 0.0, true);
            assert_eq!(offset.length(), 1.0);
        }
    }

    #[test]
    fn test_dominant_axis_prefers_horizontal() {
        assert_eq!(Direction::from_dominant_axis(Vec2::new(5.0, -4.0)), Some(Direction::Right));
        assert_eq!(Direction::from_dominant_axis(Vec2::new(-5.0, 4.0)), Some(Direction::Left));
    }

    #[test]
    fn test_dominant_axis_ties_resolve_vertically() {
        assert_eq!(Direction::from_dominant_axis(Vec2::new(3.0, 3.0)), Some(Direction::Down));
        assert_eq!(Direction::from_dominant_axis(Vec2::new(3.0, -3.0)), Some(Direction::Up));
    }

    #[test]
    fn test_dominant_axis_zero_vector() {
        assert_eq!(Direction::from_dominant_axis(Vec2::ZERO), None);
    }

    #[test]
    fn test_as_usize_matches_directions_order() {
        for (i, direction) in Direction::DIRECTIONS.iter().enumerate() {
            assert_eq!(direction.as_usize(), i);
        }
    }
}
