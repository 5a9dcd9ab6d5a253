//! The tune table and the two-channel audio scheduler.
//!
//! Tunes are concatenated into one table. The first byte of each tune is
//! the waveform selector for the channel; every following byte packs a
//! frequency in the low bits and a duration in the top three, and a zero
//! byte ends the tune. Only the scheduling side lives here: which table
//! index each channel sits at and how many frames the current note has
//! left. Synthesis is the display hardware's problem.

use crate::alu;
use crate::mem::field;

use super::Gopher;

// Tune start offsets into `AUDIO_VALUES`.
pub const STARTING_THEME_00: u8 = 0;
pub const STARTING_THEME_01: u8 = 31;
pub const BONK_GOPHER: u8 = 57;
pub const GOPHER_TAUNT: u8 = 64;
pub const STOLEN_CARROT: u8 = 87;
pub const DIG_TUNNEL: u8 = 112;
pub const FILL_TUNNEL: u8 = 116;
pub const DUCK_QUACKING: u8 = 122;
pub const GAME_OVER_THEME_00: u8 = 130;
pub const GAME_OVER_THEME_01: u8 = 149;

pub const END_AUDIO_TUNE: u8 = 0;
pub const AUDIO_DURATION_MASK: u8 = 0xE0;

#[rustfmt::skip]
pub const AUDIO_VALUES: [u8; 168] = [
    // Starting theme, voice 0 (high square wave).
    4,
    6 << 4 | 15, 7 << 4 | 1, 7 << 4 | 3, 7 << 4 | 4, 7 << 4 | 3,
    7 << 4 | 1, 7 << 4 | 3, 7 << 4 | 10, 7 << 4 | 15, 7 << 4 | 13,
    7 << 4 | 10, 7 << 4 | 7, 7 << 4 | 10, 7 << 4 | 15, 28 << 3 | 26,
    6 << 4 | 15, 7 << 4 | 3, 6 << 4 | 15, 7 << 4 | 3, 7 << 4 | 1,
    7 << 4 | 4, 7 << 4 | 1, 7 << 4 | 10, 7 << 4 | 4, 7 << 4 | 2,
    7 << 4 | 1, 7 << 4 | 0, 16 << 3 | 15, 20 << 3 | 9, END_AUDIO_TUNE,
    // Starting theme, voice 1 (low square wave).
    12,
    7 << 4 | 1, 7 << 4 | 1, 28 << 3 | 26, 7 << 4 | 4, 7 << 4 | 4,
    7 << 4 | 1, 7 << 4 | 1, 28 << 3 | 15, 28 << 3 | 17, 7 << 4 | 1,
    7 << 4 | 4, 7 << 4 | 1, 7 << 4 | 4, 7 << 4 | 3, 7 << 4 | 7,
    7 << 4 | 3, 7 << 4 | 7, 7 << 4 | 1, 7 << 4 | 2, 7 << 4 | 3,
    7 << 4 | 6, 7 << 4 | 4, 7 << 4 | 1, 7 << 4 | 10, END_AUDIO_TUNE,
    // Bonk (low square wave).
    12,
    1 << 4 | 10, 1 << 4 | 2, 11, 6, 1,
    END_AUDIO_TUNE,
    // Gopher taunt (high square wave).
    4,
    3 << 4 | 7, 1 << 4 | 0, 3 << 4 | 7, 1 << 4 | 0, 1 << 4 | 7,
    3 << 4 | 11, 1 << 4 | 3, 3 << 4 | 11, 1 << 4 | 4, 14,
    1 << 4 | 4, 14, 1 << 4 | 4, 3 << 4 | 7, 1 << 4 | 0,
    3 << 4 | 7, 1 << 4 | 0, 1 << 4 | 7, 1 << 4 | 11, 1 << 4 | 3,
    3 << 4 | 11, END_AUDIO_TUNE,
    // Stolen carrot (low buzz).
    7,
    1 << 4 | 3, 7, 1 << 4 | 3, 7, 1 << 4 | 2,
    6, 1 << 4 | 2, 6, 1 << 4 | 1, 5,
    1 << 4 | 1, 5, 1 << 4 | 0, 4, 15,
    3, 14, 2, 13, 2,
    12, 1, 7 << 4 | 2, END_AUDIO_TUNE,
    // Dig (white noise).
    8,
    4, 3, END_AUDIO_TUNE,
    // Fill (bass).
    6,
    1, 4, 2, 6, END_AUDIO_TUNE,
    // Quack (saw).
    1,
    15, 14, 2 << 4 | 13, 2 << 4 | 12, 4 << 4 | 11,
    12, END_AUDIO_TUNE,
    // Game over theme, voice 0 (high square wave).
    4,
    28 << 3 | 7, 28 << 3 | 11, 28 << 3 | 17, 28 << 3 | 26, 3 << 4 | 3,
    2 << 4 | 0, 3 << 4 | 3, 2 << 4 | 0, 3 << 4 | 3, 2 << 4 | 0,
    3 << 4 | 3, 2 << 4 | 0, 7 << 4 | 4, 6 << 4 | 0, 7 << 4 | 4,
    6 << 4 | 0, 7 << 4 | 15, END_AUDIO_TUNE,
    // Game over theme, voice 1 (high square wave).
    4,
    28 << 3 | 11, 28 << 3 | 17, 28 << 3 | 26, 28 << 3 | 19, 3 << 4 | 7,
    2 << 4 | 0, 3 << 4 | 7, 2 << 4 | 0, 3 << 4 | 7, 2 << 4 | 0,
    3 << 4 | 7, 2 << 4 | 0, 7 << 4 | 10, 6 << 4 | 0, 7 << 4 | 10,
    6 << 4 | 0, 7 << 4 | 3, END_AUDIO_TUNE,
];

impl Gopher {
    /// Queue a tune: alternate the write channel and point its index one
    /// past the waveform byte.
    pub(crate) fn set_game_audio_values(&mut self, tune_offset: u8) {
        self.mem[field::AUDIO_CHANNEL_INDEX] = alu::increment(self.mem[field::AUDIO_CHANNEL_INDEX]);
        let channel = (self.mem[field::AUDIO_CHANNEL_INDEX] & 1) as usize;
        self.mem[field::AUDIO_INDEX_VALUES + channel] = tune_offset + 1;
    }

    /// Per-frame scheduler step, channel 1 then channel 0, threading the
    /// carry the final duration shift produces.
    pub(crate) fn play_game_audio(&mut self, carry: u8) -> u8 {
        let carry = self.play_game_audio_channel(1, carry);
        self.play_game_audio_channel(0, carry)
    }

    fn play_game_audio_channel(&mut self, channel: usize, carry: u8) -> u8 {
        if self.mem[field::AUDIO_DURATION_VALUES + channel] == 0 {
            return self.check_to_play_next_audio_frequency(channel, carry);
        }

        self.mem[field::AUDIO_DURATION_VALUES + channel] -= 1;
        carry
    }

    /// Decode the next tune byte into a note duration. The top three bits
    /// hold the duration; the shift distance depends on the sign bit and
    /// the last shift runs through the carry. A zero byte ends the tune
    /// without advancing the index.
    fn check_to_play_next_audio_frequency(&mut self, channel: usize, carry: u8) -> u8 {
        let audio_value =
            AUDIO_VALUES[self.mem[field::AUDIO_INDEX_VALUES + channel] as usize];
        if audio_value == END_AUDIO_TUNE {
            return carry;
        }

        let mut a = audio_value & AUDIO_DURATION_MASK;
        let shift_amount = if alu::is_positive(a) { 4 } else { 3 };
        a >>= shift_amount - 1;
        let (a, carry) = alu::shift_right_with_carry(a);

        self.mem[field::AUDIO_INDEX_VALUES + channel] =
            self.mem[field::AUDIO_INDEX_VALUES + channel].wrapping_add(1);
        self.mem[field::AUDIO_DURATION_VALUES + channel] = a;

        carry
    }
}
