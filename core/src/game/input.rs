//! Console and controller latches.
//!
//! All lines are active low: a cleared bit is a pressed button or a held
//! stick direction. `swchb` carries the console switches and keeps its
//! value across frames; the joystick and fire latches are rewritten from
//! the acted [`Action`] every tick.

// ---- SWCHB console switches ----

/// Right (player 2) difficulty, 1 = pro.
pub const P1_DIFF_MASK: u8 = 0b1000_0000;
/// Left (player 1) difficulty, 1 = pro.
pub const P0_DIFF_MASK: u8 = 0b0100_0000;
pub const SELECT_MASK: u8 = 0b0000_0010;
pub const RESET_MASK: u8 = 0b0000_0001;

// ---- SWCHA joystick lines (player 1 nibble; player 2 mirrors in bits 3..0) ----

/// Low while the stick is held left.
pub const STICK_LEFT: u8 = 0b1000_0000;
/// Low while the stick is held right.
pub const STICK_RIGHT: u8 = 0b0100_0000;

/// Bit 7 of INPT4/INPT5, low while the fire button is pressed.
pub const ACTION_MASK: u8 = 0b1000_0000;

/// The action set recorded in trace fixtures, in fixture code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Action {
    Noop = 0,
    Fire = 1,
    Right = 2,
    Left = 3,
    RightFire = 4,
    LeftFire = 5,
}

impl Action {
    /// Decode a fixture action code.
    pub fn from_code(code: u8) -> Option<Action> {
        match code {
            0 => Some(Action::Noop),
            1 => Some(Action::Fire),
            2 => Some(Action::Right),
            3 => Some(Action::Left),
            4 => Some(Action::RightFire),
            5 => Some(Action::LeftFire),
            _ => None,
        }
    }

    pub const ALL: [Action; 6] = [
        Action::Noop,
        Action::Fire,
        Action::Right,
        Action::Left,
        Action::RightFire,
        Action::LeftFire,
    ];
}

/// Input line state as the game logic reads it each frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLatches {
    pub swcha: u8,
    pub swchb: u8,
    pub intpt4: u8,
    pub intpt5: u8,
}

impl InputLatches {
    /// Everything released; both difficulty switches default to pro.
    pub fn new() -> Self {
        InputLatches {
            swcha: 0xFF,
            swchb: 0xFF,
            intpt4: 0xFF,
            intpt5: 0xFF,
        }
    }

    /// Rewrite the player-1 joystick and fire latches from `action`.
    /// Console switches are left alone.
    pub fn latch(&mut self, action: Action) {
        self.swcha = 0xFF;
        self.intpt4 = 0xFF;
        self.intpt5 = 0xFF;

        match action {
            Action::Noop => {}
            Action::Fire => self.intpt4 &= !ACTION_MASK,
            Action::Right => self.swcha &= !STICK_RIGHT,
            Action::Left => self.swcha &= !STICK_LEFT,
            Action::RightFire => {
                self.swcha &= !STICK_RIGHT;
                self.intpt4 &= !ACTION_MASK;
            }
            Action::LeftFire => {
                self.swcha &= !STICK_LEFT;
                self.intpt4 &= !ACTION_MASK;
            }
        }
    }
}

impl Default for InputLatches {
    fn default() -> Self {
        Self::new()
    }
}
