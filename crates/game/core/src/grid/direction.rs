/// Facing / movement direction of a character.
///
/// `None` is not a spatial direction: it means "stay put" and is what an idle
/// input resolves to.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
    None,
}

impl Direction {
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step on the tile lattice (`+y` points down the screen).
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }

    /// Direction pointing the other way. `None` stays `None`.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub const fn is_none(self) -> bool {
        matches!(self, Direction::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_content_names() {
        assert_eq!(Direction::from_str("UP").unwrap(), Direction::Up);
        assert_eq!(Direction::from_str("right").unwrap(), Direction::Right);
        assert_eq!(Direction::from_str("NONE").unwrap(), Direction::None);
        assert!(Direction::from_str("NORTH").is_err());
        assert_eq!(Direction::Left.to_string(), "LEFT");
    }

    #[test]
    fn opposite_is_an_involution() {
        for direction in Direction::iter() {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }
}
