//! The 128-byte zero-page RAM image and its symbolic field layout.
//!
//! Byte offsets are the contract with recorded hardware traces: every
//! variable lives at the exact address the cartridge assigned it, and the
//! conformance harness reports mismatches by these names.

use std::ops::{Index, IndexMut};

pub const RAM_SIZE: usize = 128;

/// Field offsets into the RAM image.
pub mod field {
    /// 4 rows x 6 playfield bytes, surface row first.
    pub const GARDEN_DIRT_VALUES: usize = 0;
    pub const GARDEN_DIRT_ROW_BYTES: usize = 6;
    pub const GARDEN_DIRT_SIZE: usize = 24;

    pub const DUCK_GRAPHIC_PTRS: usize = 24;
    pub const DUCK_HORIZ_POS: usize = 28;
    pub const FARMER_GRAPHIC_PTRS: usize = 29;
    pub const FARMER_HORIZ_POS: usize = 31;
    pub const CARROT_TOP_GRAPHIC_PTRS: usize = 32;
    pub const CARROT_GRAPHIC_PTRS: usize = 34;
    pub const DISPLAYING_CARROT_ATTRIBUTES: usize = 36;
    pub const ZONE00_GOPHER_GRAPHIC_PTRS: usize = 39;
    pub const GOPHER_HORIZ_POS: usize = 41;
    pub const GOPHER_NUSIZ_VALUE: usize = 42;
    pub const ZONE01_GOPHER_GRAPHIC_PTRS: usize = 43;
    pub const ZONE02_GOPHER_GRAPHIC_PTRS: usize = 45;
    pub const FARMER_ANIMATION_IDX: usize = 47;

    /// 10-byte player block: 3 BCD score bytes MSB first, direction-timer
    /// seed, carrot pattern, then the reserved player's copy of all five.
    pub const PLAYER_INFORMATION_VALUES: usize = 48;
    pub const CURRENT_PLAYER_SCORE: usize = 48;
    pub const INIT_GOPHER_CHANGE_DIRECTION_TIMER: usize = 51;
    pub const CARROT_PATTERN: usize = 52;
    pub const RESERVED_PLAYER_INFORMATION: usize = 53;
    pub const RESERVED_PLAYER_SCORE: usize = 53;
    pub const RESERVED_GOPHER_CHANGE_DIRECTION_TIMER: usize = 56;
    pub const RESERVED_CARROT_PATTERN: usize = 57;
    pub const PLAYER_INFORMATION_SIZE: usize = 10;

    pub const DIGIT_GRAPHIC_PTRS: usize = 58;
    pub const ACTION_BUTTON_DEBOUNCE: usize = 70;
    pub const TMP_MULTI: usize = 71;
    pub const TMP_SIX_DIGIT_DISPLAY_LOOP: usize = 72;
    pub const RANDOM: usize = 73;
    pub const FRAME_COUNT: usize = 75;
    pub const GAME_IDLE_TIMER: usize = 76;
    pub const AUDIO_INDEX_VALUES: usize = 77;
    pub const AUDIO_DURATION_VALUES: usize = 79;
    pub const AUDIO_CHANNEL_INDEX: usize = 81;
    pub const GAME_STATE: usize = 82;
    pub const GAME_SELECTION: usize = 83;
    pub const SELECT_DEBOUNCE: usize = 84;
    /// Shares a byte with the select debounce; the selection screen and the
    /// main loop never run in the same state.
    pub const GOPHER_HORIZ_ANIMATION_RATE: usize = 84;
    pub const GOPHER_VERT_POS: usize = 85;
    pub const GOPHER_REFLECT_STATE: usize = 86;
    pub const GOPHER_HORIZ_MOVEMENT_VALUES: usize = 87;
    pub const GOPHER_VERT_MOVEMENT_VALUES: usize = 88;
    pub const GOPHER_CHANGE_DIRECTION_TIMER: usize = 89;
    pub const GOPHER_TAUNT_TIMER: usize = 90;
    pub const DUCK_ATTRIBUTES: usize = 91;
    pub const FALLING_SEED_VERT_POS: usize = 92;
    pub const FALLING_SEED_SCANLINE: usize = 93;
    pub const DUCK_ANIMATION_TIMER: usize = 94;
    pub const FALLING_SEED_HORIZ_POS: usize = 95;
    pub const HELD_SEED_DECAYING_TIMER: usize = 96;
}

/// Symbolic name for a RAM byte, for mismatch diagnostics.
pub fn field_name(offset: usize) -> &'static str {
    match offset {
        0 => "gardenDirtValues_1stRow_LeftPF0",
        1 => "gardenDirtValues_1stRow_LeftPF1",
        2 => "gardenDirtValues_1stRow_LeftPF2",
        3 => "gardenDirtValues_1stRow_RightPF0",
        4 => "gardenDirtValues_1stRow_RightPF1",
        5 => "gardenDirtValues_1stRow_RightPF2",
        6 => "gardenDirtValues_2ndRow_LeftPF0",
        7 => "gardenDirtValues_2ndRow_LeftPF1",
        8 => "gardenDirtValues_2ndRow_LeftPF2",
        9 => "gardenDirtValues_2ndRow_RightPF0",
        10 => "gardenDirtValues_2ndRow_RightPF1",
        11 => "gardenDirtValues_2ndRow_RightPF2",
        12 => "gardenDirtValues_3rdRow_LeftPF0",
        13 => "gardenDirtValues_3rdRow_LeftPF1",
        14 => "gardenDirtValues_3rdRow_LeftPF2",
        15 => "gardenDirtValues_3rdRow_RightPF0",
        16 => "gardenDirtValues_3rdRow_RightPF1",
        17 => "gardenDirtValues_3rdRow_RightPF2",
        18 => "gardenDirtValues_4thRow_LeftPF0",
        19 => "gardenDirtValues_4thRow_LeftPF1",
        20 => "gardenDirtValues_4thRow_LeftPF2",
        21 => "gardenDirtValues_4thRow_RightPF0",
        22 => "gardenDirtValues_4thRow_RightPF1",
        23 => "gardenDirtValues_4thRow_RightPF2",
        24..=27 => "duckGraphicPtrs",
        28 => "duckHorizPos",
        29 | 30 => "farmerGraphicPtrs",
        31 => "farmerHorizPos",
        32 | 33 => "carrotTopGraphicPtrs",
        34 | 35 => "carrotGraphicsPtrs",
        36..=38 => "displayingCarrotAttributes",
        39 | 40 => "zone00_GopherGraphicsPtrs",
        41 => "gopherHorizPos",
        42 => "gopherNUSIZValue",
        43 | 44 => "zone01_GopherGraphicsPtrs",
        45 | 46 => "zone02_GopherGraphicsPtrs",
        47 => "farmerAnimationIdx",
        48 => "currentPlayerScore_MSB",
        49 => "currentPlayerScore_middle",
        50 => "currentPlayerScore_LSB",
        51 => "initGopherChangeDirectionTimer",
        52 => "currentPlayerCarrotPattern",
        53 => "reservedPlayerScore_MSB",
        54 => "reservedPlayerScore_middle",
        55 => "reservedPlayerScore_LSB",
        56 => "reservedGopherChangeDirectionTimer",
        57 => "reservedPlayerCarrotPattern",
        58..=69 => "digitGraphicPtrs",
        70 => "actionButtonDebounce",
        71 => "tmpMulti",
        72 => "tmpSixDigitDisplayLoop",
        73 => "random",
        74 => "random+1",
        75 => "frameCount",
        76 => "gameIdleTimer",
        77 => "leftAudioIndexValue",
        78 => "rightAudioIndexValue",
        79 => "leftAudioDurationValue",
        80 => "rightAudioDurationValue",
        81 => "audioChannelIndex",
        82 => "gameState",
        83 => "gameSelection",
        84 => "selectDebounce / gopherHorizAnimationRate",
        85 => "gopherVertPos",
        86 => "gopherReflectState",
        87 => "gopherHorizMovementValues",
        88 => "gopherVertMovementValues",
        89 => "gopherChangeDirectionTimer",
        90 => "gopherTauntTimer",
        91 => "duckAttributes",
        92 => "fallingSeedVertPos",
        93 => "fallingSeedScanline",
        94 => "duckAnimationTimer",
        95 => "fallingSeedHorizPos",
        96 => "heldSeedDecayingTimer",
        97..=127 => "unused",
        _ => panic!("RAM offset {offset} out of range"),
    }
}

/// The 128-byte RAM image. Indexing out of range is an invariant violation
/// and panics.
#[derive(Clone, PartialEq, Eq)]
pub struct MemoryImage {
    bytes: [u8; RAM_SIZE],
}

impl MemoryImage {
    pub fn new() -> Self {
        MemoryImage {
            bytes: [0; RAM_SIZE],
        }
    }

    pub fn clear(&mut self) {
        self.bytes = [0; RAM_SIZE];
    }

    pub fn as_bytes(&self) -> &[u8; RAM_SIZE] {
        &self.bytes
    }

    /// Zero `count` bytes starting at `offset`.
    pub fn clear_run(&mut self, offset: usize, count: usize) {
        for byte in &mut self.bytes[offset..offset + count] {
            *byte = 0;
        }
    }

    /// Swap single bytes between two offsets.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.bytes.swap(a, b);
    }
}

impl Default for MemoryImage {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for MemoryImage {
    type Output = u8;

    #[inline]
    fn index(&self, offset: usize) -> &u8 {
        &self.bytes[offset]
    }
}

impl IndexMut<usize> for MemoryImage {
    #[inline]
    fn index_mut(&mut self, offset: usize) -> &mut u8 {
        &mut self.bytes[offset]
    }
}
