use crate::grid::Direction;

/// One frame of a character sprite sheet as the renderer should show it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpriteFrame {
    pub index: u16,
    pub flip_x: bool,
}

impl SpriteFrame {
    pub const fn new(index: u16) -> Self {
        Self {
            index,
            flip_x: false,
        }
    }

    pub const fn flipped(index: u16) -> Self {
        Self {
            index,
            flip_x: true,
        }
    }
}

/// Per-character lookup from facing to the idle frame.
///
/// `none` is shown when a character has never faced anywhere; by convention
/// it equals the `down` entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdleFrames {
    pub up: SpriteFrame,
    pub down: SpriteFrame,
    pub left: SpriteFrame,
    pub right: SpriteFrame,
    pub none: SpriteFrame,
}

impl IdleFrames {
    /// Idle frames of the player sheet, which has distinct side frames.
    pub const PLAYER: Self = Self::new(
        SpriteFrame::new(1),
        SpriteFrame::new(7),
        SpriteFrame::new(10),
        SpriteFrame::new(4),
    );

    pub const fn new(
        up: SpriteFrame,
        down: SpriteFrame,
        left: SpriteFrame,
        right: SpriteFrame,
    ) -> Self {
        Self {
            up,
            down,
            left,
            right,
            none: down,
        }
    }

    /// Sheets laid out as `down, up, side` starting at `base`, where facing
    /// right reuses the side frame mirrored horizontally.
    pub const fn npc_sheet(base: u16) -> Self {
        Self::new(
            SpriteFrame::new(base + 1),
            SpriteFrame::new(base),
            SpriteFrame::new(base + 2),
            SpriteFrame::flipped(base + 2),
        )
    }

    pub const fn frame_for(&self, direction: Direction) -> SpriteFrame {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::None => self.none,
        }
    }
}

impl Default for IdleFrames {
    fn default() -> Self {
        Self::PLAYER
    }
}
