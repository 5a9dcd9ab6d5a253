//! The Gopher game machine: one 128-byte memory image, the console and
//! joystick latches, the sprite-selection state and the carry bit that
//! survives from one frame to the next.
//!
//! The per-concern logic lives in submodules as `impl Gopher` blocks:
//! state dispatch in `state`, entity updates in `farmer`/`gopher`/`duck`,
//! the dirt bitmap in `dirt`, scoring and the tune scheduler in
//! `score`/`audio`.

pub mod audio;
pub mod dirt;
pub mod duck;
pub mod farmer;
pub mod gopher;
pub mod input;
pub mod render;
pub mod rng;
pub mod score;
pub mod state;

use crate::alu;
use crate::mem::{MemoryImage, field};
use input::{Action, InputLatches};
use render::RenderState;

// ---- Playfield horizontal limits ----

pub const XMIN: u8 = 0;
pub const XMAX: u8 = 159;

pub const XMIN_GOPHER: u8 = XMIN + 3;
pub const XMAX_GOPHER: u8 = XMAX - 11;
pub const XMIN_DUCK: u8 = XMIN + 12;
pub const XMAX_DUCK: u8 = XMAX - 11;
pub const XMIN_FARMER: u8 = XMIN + 20;
pub const XMAX_FARMER: u8 = XMAX - 11;

pub const HORIZ_POS_HOLE_00: u8 = 15;
pub const HORIZ_POS_HOLE_01: u8 = 31;
pub const HORIZ_POS_HOLE_02: u8 = 47;
pub const HORIZ_POS_HOLE_03: u8 = 111;
pub const HORIZ_POS_HOLE_04: u8 = 127;
pub const HORIZ_POS_HOLE_05: u8 = 143;

pub const HORIZ_POS_CARROT_00: u8 = 63;
pub const HORIZ_POS_CARROT_01: u8 = 79;
pub const HORIZ_POS_CARROT_02: u8 = 95;

pub const INIT_FARMER_HORIZ_POS: u8 = (XMAX / 2) + 4;
pub const INIT_GOPHER_HORIZ_POS: u8 = XMAX_GOPHER - 1;
pub const INIT_SEED_VERT_POS: u8 = 8;

// ---- Game selection ----

pub const ACTIVE_PLAYER_MASK: u8 = 0xF0;
pub const GAME_SELECTION_MASK: u8 = 0x0F;
pub const MAX_GAME_SELECTION: u8 = 3;

// ---- Gopher movement ----

/// Low nibble of `gopherVertMovementValues`: index into
/// [`GOPHER_TARGET_VERT_POSITIONS`] (0 meaning underground).
pub const GOPHER_VERT_TARGET_MASK: u8 = 0x0F;
/// While set, the horizontal direction is not re-rolled.
pub const GOPHER_VERT_LOCKED_BIT: u8 = 0b1000_0000;
/// Lock bit plus target index 8, used to fake out the player at high score.
pub const GOPHER_VERT_FAKING_TARGET_MASK: u8 = 0x88;

/// Bit 7 of `gopherHorizMovementValues`: 1 = moving left.
pub const GOPHER_HORIZ_DIR_MASK: u8 = 0b1000_0000;
/// When set, the target index 8..=10 selects a carrot column.
pub const GOPHER_CARROT_TARGET_BIT: u8 = 0b0000_1000;
pub const GOPHER_TUNNEL_TARGET_MASK: u8 = 0b0000_0111;
pub const GOPHER_CARROT_STEAL_MASK: u8 = 0b0000_0011;
/// Clear: tunnels 0..=3 reachable; set: tunnels 0, 4, 5.
pub const GOPHER_TARGET_RIGHT_TUNNELS_BIT: u8 = 0b0000_0100;

pub const VERT_POS_GOPHER_UNDERGROUND: u8 = 0;
pub const VERT_POS_GOPHER_ABOVE_GROUND: u8 = 35;
pub const VERT_POS_GOPHER_TAUNTING: u8 = VERT_POS_GOPHER_ABOVE_GROUND - 1;

// ---- Duck and seed ----

pub const INIT_DUCK_ANIMATION_TIMER: u8 = 32;
pub const DUCK_ANIMATION_DOWN_WING: u8 = INIT_DUCK_ANIMATION_TIMER - 8;
pub const DUCK_ANIMATION_STATIONARY_WING: u8 = DUCK_ANIMATION_DOWN_WING - 8;
pub const DUCK_ANIMATION_UP_WING: u8 = DUCK_ANIMATION_STATIONARY_WING - 8;

/// Bit 7 of `duckAttributes`: 1 = moving left.
pub const DUCK_HORIZ_DIR_MASK: u8 = 0b1000_0000;
pub const SEED_TARGET_HORIZ_POS_MASK: u8 = 0b0111_1111;

pub const INIT_DECAYING_TIMER_VALUE: u8 = 120;
pub const DISABLE_SEED: u8 = 128;

// ---- Points (value minus 1, the add runs with carry pre-set) ----

pub const POINTS_FILL_TUNNEL: u8 = 0x19;
pub const POINTS_BONK_GOPHER: u8 = 0x99;

// ---- Wait timers (frames until the counter wraps to 255) ----

pub const WAIT_TIME_GAME_START: u8 = 16;
pub const WAIT_TIME_DISPLAY_COPYRIGHT: u8 = 128;
pub const WAIT_TIME_CARROT_STOLEN: u8 = 136;

// ---- TIA reflect values ----

pub const NO_REFLECT: u8 = 0b0000;
pub const REFLECT: u8 = 0b1000;

/// Hole columns 0..=5, the two edge tunnels again at 6..=7, then the three
/// carrot columns (rightmost first) at 8..=10.
pub const HORIZONTAL_TARGET_VALUES: [u8; 11] = [
    HORIZ_POS_HOLE_00,
    HORIZ_POS_HOLE_01,
    HORIZ_POS_HOLE_02,
    HORIZ_POS_HOLE_03,
    HORIZ_POS_HOLE_04,
    HORIZ_POS_HOLE_05,
    HORIZ_POS_HOLE_00,
    HORIZ_POS_HOLE_05,
    HORIZ_POS_CARROT_02,
    HORIZ_POS_CARROT_01,
    HORIZ_POS_CARROT_00,
];

/// Vertical target for each value of the low nibble of
/// `gopherVertMovementValues`. 34 entries taunt, 35 entries steal.
pub const GOPHER_TARGET_VERT_POSITIONS: [u8; 16] = [
    VERT_POS_GOPHER_UNDERGROUND,
    VERT_POS_GOPHER_UNDERGROUND + 7,
    VERT_POS_GOPHER_UNDERGROUND + 14,
    VERT_POS_GOPHER_ABOVE_GROUND - 13,
    VERT_POS_GOPHER_TAUNTING,
    VERT_POS_GOPHER_ABOVE_GROUND,
    VERT_POS_GOPHER_UNDERGROUND + 7,
    VERT_POS_GOPHER_UNDERGROUND + 14,
    VERT_POS_GOPHER_ABOVE_GROUND - 13,
    VERT_POS_GOPHER_ABOVE_GROUND,
    VERT_POS_GOPHER_TAUNTING,
    VERT_POS_GOPHER_UNDERGROUND + 14,
    VERT_POS_GOPHER_ABOVE_GROUND - 13,
    VERT_POS_GOPHER_ABOVE_GROUND,
    VERT_POS_GOPHER_TAUNTING,
    VERT_POS_GOPHER_ABOVE_GROUND,
];

/// The sixteen values of the `gameState` byte. Any other stored value is a
/// corrupted machine and panics on dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GameState {
    DisplayCopyright = 0,
    DisplayCopyrightWait = 1,
    DisplayCompany = 2,
    DisplayCompanyWait = 3,
    ResetPlayerVariables = 4,
    DisplayGameSelection = 5,
    PauseGameState = 6,
    MainGameLoop = 7,
    GopherStoleCarrot = 8,
    DuckWait = 9,
    InitGameForAlternatePlayer = 10,
    AlternatePlayers = 11,
    InitGameForGameOver = 12,
    DisplayPlayerNumber = 13,
    PauseForActionButton = 14,
    WaitForNewGame = 15,
}

impl GameState {
    pub fn from_byte(value: u8) -> GameState {
        match value {
            0 => GameState::DisplayCopyright,
            1 => GameState::DisplayCopyrightWait,
            2 => GameState::DisplayCompany,
            3 => GameState::DisplayCompanyWait,
            4 => GameState::ResetPlayerVariables,
            5 => GameState::DisplayGameSelection,
            6 => GameState::PauseGameState,
            7 => GameState::MainGameLoop,
            8 => GameState::GopherStoleCarrot,
            9 => GameState::DuckWait,
            10 => GameState::InitGameForAlternatePlayer,
            11 => GameState::AlternatePlayers,
            12 => GameState::InitGameForGameOver,
            13 => GameState::DisplayPlayerNumber,
            14 => GameState::PauseForActionButton,
            15 => GameState::WaitForNewGame,
            _ => panic!("corrupted gameState byte {value:#04x}"),
        }
    }
}

/// One Gopher machine. All game variables live in `mem`; `carry` is the
/// processor carry left by the previous frame's terminal instruction and
/// consumed by the next frame's RNG step.
pub struct Gopher {
    pub mem: MemoryImage,
    pub input: InputLatches,
    pub render: RenderState,
    carry: u8,
}

impl Gopher {
    pub fn new() -> Self {
        Gopher {
            mem: MemoryImage::new(),
            input: InputLatches::new(),
            render: RenderState::default(),
            carry: 0,
        }
    }

    /// Zero the RAM and run the single state dispatch the cartridge
    /// performs before its first displayed frame.
    pub fn power_on(&mut self) {
        self.mem.clear();
        self.input = InputLatches::new();
        self.render = RenderState::default();
        self.carry = self.update_game_state();
    }

    /// Power on and walk the console through the fixed start sequence the
    /// recorded traces begin from: settle frames, console reset, `mode`
    /// game-select presses, reset again, fire, then the pre-round wait.
    /// Ends one frame into the main game loop.
    ///
    /// `difficulty` bit 0 drives the left difficulty switch, bit 1 the
    /// right one (1 = pro).
    pub fn reset(&mut self, difficulty: u8, mode: u8) {
        self.power_on();

        if difficulty & 1 == 0 {
            self.input.swchb &= !input::P0_DIFF_MASK;
        }
        if difficulty & 2 == 0 {
            self.input.swchb &= !input::P1_DIFF_MASK;
        }

        for _ in 0..60 {
            self.tick(Action::Noop);
        }
        // Console reset held over two bursts, as the original driver does.
        for _ in 0..4 {
            self.console_reset_tick();
        }
        for _ in 0..8 {
            self.console_reset_tick();
        }
        for _ in 0..mode {
            for _ in 0..5 {
                self.console_select_tick();
            }
            self.tick(Action::Noop);
        }
        for _ in 0..4 {
            self.console_reset_tick();
        }
        self.tick(Action::Fire);
        for _ in 0..238 {
            self.tick(Action::Noop);
        }
        self.tick(Action::Noop);
    }

    /// Run one frame with `action` latched on the active controls.
    /// Returns the frame's terminal carry.
    pub fn tick(&mut self, action: Action) -> u8 {
        self.input.latch(action);
        self.step()
    }

    /// Run one frame with whatever is currently latched.
    pub fn step(&mut self) -> u8 {
        self.carry = self.update_game(self.carry);
        self.carry
    }

    pub fn carry(&self) -> u8 {
        self.carry
    }

    pub fn game_state(&self) -> GameState {
        GameState::from_byte(self.mem[field::GAME_STATE])
    }

    fn console_reset_tick(&mut self) {
        self.input.latch(Action::Noop);
        self.input.swchb &= !input::RESET_MASK;
        self.step();
        self.input.swchb |= input::RESET_MASK;
    }

    fn console_select_tick(&mut self) {
        self.input.latch(Action::Noop);
        self.input.swchb &= !input::SELECT_MASK;
        self.step();
        self.input.swchb |= input::SELECT_MASK;
    }

    /// The per-frame entry point. Takes the previous frame's carry and
    /// returns this frame's.
    fn update_game(&mut self, carry: u8) -> u8 {
        self.mem[field::FRAME_COUNT] = alu::increment(self.mem[field::FRAME_COUNT]);

        if alu::flip(self.input.swcha) != 0 {
            // Any joystick input resets the idle timer.
            self.mem[field::GAME_IDLE_TIMER] = 0;
        }

        if self.mem[field::GAME_IDLE_TIMER] >= 128 {
            // Idled out: the frame ends before the dispatch, carry kept.
            return carry;
        }

        if self.mem[field::FRAME_COUNT] == 0 {
            // Idle timer advances every 256 frames.
            self.mem[field::GAME_IDLE_TIMER] = self.mem[field::GAME_IDLE_TIMER].wrapping_add(1);
        }

        let carry = self.play_game_audio(carry);
        self.next_random(carry);

        self.update_duck();
        self.update_seed();

        if self.mem[field::GAME_STATE] == GameState::MainGameLoop as u8 {
            self.update_gopher_digging();
            self.update_farmer();
        }

        self.check_for_reset_button_pressed();
        self.update_game_state()
    }

    /// Console reset forces a fresh game for the currently selected mode.
    fn check_for_reset_button_pressed(&mut self) {
        if self.input.swchb & input::RESET_MASK == 0 {
            self.mem[field::GAME_SELECTION] &= GAME_SELECTION_MASK;
            self.mem[field::GAME_STATE] = GameState::ResetPlayerVariables as u8;
        }
    }

    pub fn is_single_player_game(&self) -> bool {
        self.mem[field::GAME_SELECTION] & 1 == 0
    }

    pub fn is_second_player_active(&self) -> bool {
        alu::is_negative(self.mem[field::GAME_SELECTION])
    }

    pub fn is_duck_enabled(&self) -> bool {
        self.mem[field::GAME_SELECTION] & GAME_SELECTION_MASK < 2
    }
}

impl Default for Gopher {
    fn default() -> Self {
        Self::new()
    }
}
