//! Circular index arithmetic over a sequence of `size` pages.

use crate::error::{Error, Result};

/// Wrap `base + delta` into `[0, size)`.
///
/// Returns [`Error::EmptySequence`] when `size` is zero.
#[inline]
pub fn wrap(base: usize, delta: isize, size: usize) -> Result<usize> {
    if size == 0 {
        return Err(Error::EmptySequence);
    }
    Ok((base as isize + delta).rem_euclid(size as isize) as usize)
}

/// Signed shortest distance from `from` to `to` on a ring of `size`.
///
/// Ties (exactly half way round) resolve to the positive direction.
pub fn shortest_delta(from: usize, to: usize, size: usize) -> Result<isize> {
    let forward = wrap(to, -(from as isize), size)? as isize;
    let size = size as isize;
    if forward * 2 > size {
        Ok(forward - size)
    } else {
        Ok(forward)
    }
}

/// Swipe direction derived from a physical slot delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Toward the previous page
    Left,
    /// Toward the next page
    Right,
    #[default]
    None,
}

impl Direction {
    pub fn from_delta(delta: isize) -> Self {
        match delta.signum() {
            -1 => Direction::Left,
            1 => Direction::Right,
            _ => Direction::None,
        }
    }

    /// Unit step for this direction: -1, 0 or +1
    pub fn step(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::None => 0,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::None => write!(f, "none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_basic() {
        assert_eq!(wrap(2, 1, 5).unwrap(), 3);
        assert_eq!(wrap(4, 1, 5).unwrap(), 0);
        assert_eq!(wrap(0, -1, 5).unwrap(), 4);
        assert_eq!(wrap(0, -11, 5).unwrap(), 4);
        assert_eq!(wrap(3, 12, 5).unwrap(), 0);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(matches!(wrap(0, 1, 0), Err(Error::EmptySequence)));
    }

    #[test]
    fn test_wrap_composes() {
        let steps = [1isize, 1, -1, 0, 1, -1, -1, -1, 1, 1, 1, 0, -1];
        for size in 1..=7usize {
            for start in 0..size {
                let mut pos = start;
                for (i, step) in steps.iter().enumerate() {
                    pos = wrap(pos, *step, size).unwrap();
                    let total: isize = steps[..=i].iter().sum();
                    assert_eq!(pos, wrap(start, total, size).unwrap(), "size={} start={}", size, start);
                }
            }
        }
    }

    #[test]
    fn test_shortest_delta() {
        assert_eq!(shortest_delta(0, 1, 5).unwrap(), 1);
        assert_eq!(shortest_delta(0, 4, 5).unwrap(), -1);
        assert_eq!(shortest_delta(4, 0, 5).unwrap(), 1);
        assert_eq!(shortest_delta(1, 3, 4).unwrap(), 2);
        assert_eq!(shortest_delta(2, 2, 3).unwrap(), 0);
    }

    #[test]
    fn test_direction_from_delta() {
        assert_eq!(Direction::from_delta(1), Direction::Right);
        assert_eq!(Direction::from_delta(2), Direction::Right);
        assert_eq!(Direction::from_delta(-1), Direction::Left);
        assert_eq!(Direction::from_delta(0), Direction::None);
        assert_eq!(Direction::Left.step(), -1);
    }
}
