use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Logical direction requested by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = anyhow::Error;

    fn try_from(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'U' => Ok(Direction::Up),
            'D' => Ok(Direction::Down),
            'L' => Ok(Direction::Left),
            'R' => Ok(Direction::Right),
            other => bail!("'{other}' is not a direction (expected U, D, L or R)"),
        }
    }
}

/// Unit vector applied to the snake's head on every tick.
///
/// Exactly one component is non-zero. The only way to build one is from a
/// [`Direction`], so that property cannot be broken from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Heading {
    dx: i32,
    dy: i32,
}

impl Heading {
    pub fn dx(&self) -> i32 {
        self.dx
    }

    pub fn dy(&self) -> i32 {
        self.dy
    }
}

impl From<Direction> for Heading {
    fn from(direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { dx, dy }
    }
}

/// One step of a headless script: either turn before the tick, or don't.
pub type ScriptStep = Option<Direction>;

/// Parse a headless script such as `"RR.DDl"`.
///
/// `.` means "no input before this tick"; whitespace is ignored.
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>> {
    script
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '.' => Ok(None),
            c => Direction::try_from(c).map(Some),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_heading_is_unit_vector() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let heading = Heading::from(dir);
            assert_eq!(heading.dx().abs() + heading.dy().abs(), 1);
        }
    }

    #[test]
    fn test_direction_from_char() {
        assert_eq!(Direction::try_from('u').unwrap(), Direction::Up);
        assert_eq!(Direction::try_from('D').unwrap(), Direction::Down);
        assert_eq!(Direction::try_from('l').unwrap(), Direction::Left);
        assert_eq!(Direction::try_from('R').unwrap(), Direction::Right);
        assert!(Direction::try_from('x').is_err());
    }

    #[test]
    fn test_parse_script() {
        let steps = parse_script("R. d L").unwrap();
        assert_eq!(
            steps,
            vec![
                Some(Direction::Right),
                None,
                Some(Direction::Down),
                Some(Direction::Left),
            ]
        );

        assert!(parse_script("").unwrap().is_empty());
        assert!(parse_script("RRx").is_err());
    }
}
