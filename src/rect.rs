//! Inclusive bounding rectangle in column coordinates, used to restrict which columns get scanned.

use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

use crate::world::ColumnPos;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RectError {
    #[error("expected 4 comma-separated values, got {0}")]
    TokenCount(usize),

    #[error("'{0}' is not an integer: {1}")]
    NotAnInteger(String, ParseIntError),
}

/// An axis-aligned rectangle, `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    xmin: i32,
    xmax: i32,
    zmin: i32,
    zmax: i32,
}

impl Rect {
    /// Builds a rectangle from its bounds, swapping any pair given in reverse order.
    pub fn new(x1: i32, x2: i32, z1: i32, z2: i32) -> Self {
        Self {
            xmin: x1.min(x2),
            xmax: x1.max(x2),
            zmin: z1.min(z2),
            zmax: z1.max(z2),
        }
    }

    /// Parses `xmin,xmax,zmin,zmax`. Either corner may come first.
    pub fn parse(s: &str) -> Result<Self, RectError> {
        let tokens: Vec<&str> = s.split(',').collect();
        if tokens.len() != 4 {
            return Err(RectError::TokenCount(tokens.len()));
        }

        let mut bounds = [0i32; 4];
        for (bound, token) in bounds.iter_mut().zip(&tokens) {
            let token = token.trim();
            *bound = token
                .parse()
                .map_err(|e| RectError::NotAnInteger(token.to_string(), e))?;
        }

        Ok(Self::new(bounds[0], bounds[1], bounds[2], bounds[3]))
    }

    /// Inclusive on all four bounds.
    pub fn contains(&self, x: i32, z: i32) -> bool {
        (self.xmin..=self.xmax).contains(&x) && (self.zmin..=self.zmax).contains(&z)
    }

    pub fn contains_column(&self, pos: ColumnPos) -> bool {
        self.contains(pos.x, pos.z)
    }

    pub fn xmin(&self) -> i32 {
        self.xmin
    }

    pub fn xmax(&self) -> i32 {
        self.xmax
    }

    pub fn zmin(&self) -> i32 {
        self.zmin
    }

    pub fn zmax(&self) -> i32 {
        self.zmax
    }
}

impl FromStr for Rect {
    type Err = RectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "x {}..={}, z {}..={}",
            self.xmin(),
            self.xmax(),
            self.zmin(),
            self.zmax()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_parse_swaps_reversed_bounds() {
        let rect = Rect::parse("5,1,10,2").unwrap();
        assert_eq!(rect.xmin(), 1);
        assert_eq!(rect.xmax(), 5);
        assert_eq!(rect.zmin(), 2);
        assert_eq!(rect.zmax(), 10);
    }

    #[test]
    fn test_parse_swaps_each_axis_independently() {
        let rect = Rect::parse("-3,7,4,-4").unwrap();
        assert_eq!(rect, Rect::new(-3, 7, -4, 4));
    }

    #[test]
    fn test_parse_tolerates_spaces() {
        let rect: Rect = " 1, 2 ,3,4 ".parse().unwrap();
        assert_eq!(rect, Rect::new(1, 2, 3, 4));
    }

    #[test]
    fn test_parse_wrong_token_count() {
        assert_eq!(Rect::parse("1,2,3"), Err(RectError::TokenCount(3)));
        assert_eq!(Rect::parse("1,2,3,4,5"), Err(RectError::TokenCount(5)));
        assert_eq!(Rect::parse(""), Err(RectError::TokenCount(1)));
    }

    #[test]
    fn test_parse_not_an_integer() {
        assert!(matches!(
            Rect::parse("1,two,3,4"),
            Err(RectError::NotAnInteger(token, _)) if token == "two"
        ));
        assert!(matches!(
            Rect::parse("1,2,3,4.5"),
            Err(RectError::NotAnInteger(..))
        ));
    }

    #[test]
    fn test_contains_single_point() {
        let rect = Rect::new(0, 0, 0, 0);
        assert!(rect.contains(0, 0));
        assert!(!rect.contains(1, 0));
        assert!(!rect.contains(0, 1));
        assert!(!rect.contains(-1, 0));
        assert!(!rect.contains(0, -1));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let rect = Rect::new(-2, 3, 10, 12);
        for (x, z) in [(-2, 10), (3, 10), (-2, 12), (3, 12), (0, 11)] {
            assert!(rect.contains(x, z), "({x}, {z}) should be inside");
        }
        for (x, z) in [(-3, 10), (4, 10), (0, 9), (0, 13)] {
            assert!(!rect.contains(x, z), "({x}, {z}) should be outside");
        }
    }

    #[test]
    fn test_contains_extreme_coordinates() {
        let rect = Rect::new(i32::MIN, i32::MAX, i32::MIN, i32::MAX);
        assert!(rect.contains(i32::MIN, i32::MAX));
        assert!(rect.contains(0, 0));
    }

    #[test]
    fn test_contains_is_repeatable() {
        let mut rng = rand::thread_rng();
        let rect = Rect::new(-50, 50, -20, 80);
        for _ in 0..10_000 {
            let x = rng.gen_range(-100..100);
            let z = rng.gen_range(-100..100);
            assert_eq!(rect.contains(x, z), rect.contains(x, z));
            assert_eq!(
                rect.contains(x, z),
                rect.contains_column(ColumnPos::new(x, z))
            );
        }
    }
}
