use super::square::Square;

/// The eight ray directions, as (file, rank) steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ORTHOGONAL: [Direction; 4] = [Direction::North, Direction::South, Direction::West, Direction::East];
    pub const DIAGONAL: [Direction; 4] =
        [Direction::NorthWest, Direction::NorthEast, Direction::SouthWest, Direction::SouthEast];
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }

    /// Index delta of one step; only meaningful together with an edge check.
    pub const fn index_delta(self) -> i8 {
        let (df, dr) = self.delta();
        dr * 8 + df
    }
}

/// Knight jumps as (file, rank) offsets, clockwise from "up-right".
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];

/// Walks outward from a start square (exclusive) until the edge or the step limit.
///
/// Occupancy is the caller's business: sliding pieces stop at the first
/// occupied square they see.
#[derive(Clone, Debug)]
pub struct Ray {
    current: Square,
    direction: Direction,
    remaining: u8,
}

impl Ray {
    pub fn new(start: Square, direction: Direction) -> Self {
        Self::limited(start, direction, 7)
    }

    pub fn limited(start: Square, direction: Direction, limit: u8) -> Self {
        Self { current: start, direction, remaining: limit }
    }
}

impl Iterator for Ray {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.remaining == 0 {
            return None;
        }
        let (df, dr) = self.direction.delta();
        let next = self.current.offset(df, dr)?;
        self.current = next;
        self.remaining -= 1;
        Some(next)
    }
}
