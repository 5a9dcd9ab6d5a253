//! The garden dirt bitmap.
//!
//! Four rows of six TIA playfield bytes each, surface row first in memory.
//! A set bit is removed dirt. PF0 uses only its top four bits, PF1 counts
//! its pixels from bit 7 downwards and PF2 from bit 0 upwards, so the mask
//! table below is the only place that ordering lives.

use crate::alu;
use crate::mem::{MemoryImage, field};

use super::{
    GOPHER_CARROT_TARGET_BIT, GOPHER_TUNNEL_TARGET_MASK, Gopher, HORIZONTAL_TARGET_VALUES,
    VERT_POS_GOPHER_UNDERGROUND, audio,
};

/// Bit masks per coarse column within one half of the playfield:
/// PF0 (4 ascending), PF1 (8 descending), PF2 (8 ascending).
pub const DIRT_MASKING_BITS: [u8; 20] = [
    1 << 4,
    1 << 5,
    1 << 6,
    1 << 7,
    1 << 7,
    1 << 6,
    1 << 5,
    1 << 4,
    1 << 3,
    1 << 2,
    1 << 1,
    1 << 0,
    1 << 0,
    1 << 1,
    1 << 2,
    1 << 3,
    1 << 4,
    1 << 5,
    1 << 6,
    1 << 7,
];

/// Playfield byte within a row for each of the 40 coarse columns:
/// left PF0/PF1/PF2 then right PF0/PF1/PF2.
pub const PF_BYTE_MAP: [usize; 40] = [
    0, 0, 0, 0, // left PF0
    1, 1, 1, 1, 1, 1, 1, 1, // left PF1
    2, 2, 2, 2, 2, 2, 2, 2, // left PF2
    3, 3, 3, 3, // right PF0
    4, 4, 4, 4, 4, 4, 4, 4, // right PF1
    5, 5, 5, 5, 5, 5, 5, 5, // right PF2
];

/// Map a pixel column to (playfield byte within the row, mask index).
#[inline]
pub fn dirt_column(x_pos: u8) -> (usize, usize) {
    let coarse = x_pos as usize / 4;
    (PF_BYTE_MAP[coarse], coarse % 20)
}

/// Row base offset into the dirt bitmap for a gopher vertical position.
/// The deepest row sits last in memory; positions at or above ground never
/// reach this map.
#[inline]
pub fn dirt_row_base(vert_pos: u8) -> usize {
    match vert_pos {
        0 => 18,
        1..=6 => 12,
        7..=13 => 6,
        14..=34 => 0,
        _ => panic!("gopher vertical position {vert_pos} outside the dirt rows"),
    }
}

impl Gopher {
    /// Reset the garden and seed the gopher's first movement values from
    /// the RNG bytes.
    pub(crate) fn init_garden_dirt_values(&mut self, carry: u8) -> u8 {
        self.mem
            .clear_run(field::GARDEN_DIRT_VALUES, field::GARDEN_DIRT_SIZE);

        self.mem[field::GOPHER_TAUNT_TIMER] = 0;

        // Open the deepest row at both edges for the gopher's start.
        self.mem[field::GARDEN_DIRT_VALUES + 23] = 0xF0;
        self.mem[field::GARDEN_DIRT_VALUES + 18] = 0xF0;

        self.mem[field::GOPHER_VERT_MOVEMENT_VALUES] =
            self.mem[field::RANDOM] & !super::GOPHER_VERT_LOCKED_BIT;
        self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] = self.mem[field::RANDOM + 1]
            & (super::GOPHER_HORIZ_DIR_MASK | GOPHER_TUNNEL_TARGET_MASK);

        self.advance_current_game_state(carry)
    }

    /// Remove dirt at pixel column `x_pos` on the gopher's current row.
    /// Already-removed dirt is a no-op (no dig sound). Off the underground
    /// row the adjacent mask is removed as well; when that mask is bit 7
    /// or bit 0 the write advances one byte, which aliases across
    /// playfield boundaries exactly like the cartridge does.
    pub(crate) fn gopher_digging(&mut self, x_pos: u8) {
        let (x_byte_offset, dirt_mask_index) = dirt_column(x_pos);
        let mut byte_offset = x_byte_offset + dirt_row_base(self.mem[field::GOPHER_VERT_POS]);

        if DIRT_MASKING_BITS[dirt_mask_index] & self.mem[field::GARDEN_DIRT_VALUES + byte_offset]
            != 0
        {
            return;
        }

        self.mem[field::GARDEN_DIRT_VALUES + byte_offset] |= DIRT_MASKING_BITS[dirt_mask_index];

        self.set_game_audio_values(audio::DIG_TUNNEL);

        if self.mem[field::GOPHER_VERT_POS] != VERT_POS_GOPHER_UNDERGROUND {
            let adjacent_dirt_mask = DIRT_MASKING_BITS[dirt_mask_index + 1];

            if alu::is_negative(adjacent_dirt_mask) || adjacent_dirt_mask == 1 {
                byte_offset += 1;
            }

            self.mem[field::GARDEN_DIRT_VALUES + byte_offset] |= adjacent_dirt_mask;
        }

        self.check_to_change_gopher_horizontal_direction();
    }

    /// Farmer shovel action on hole `hole_idx`. Restores the pair of dirt
    /// bits one row above the topmost dirt (plus the wider pair on the
    /// bottom row), refusing while the gopher is climbing that column or
    /// the column is already full.
    pub(crate) fn fill_tunnel(&mut self, hole_idx: usize) {
        if self.mem[field::GOPHER_VERT_POS] != VERT_POS_GOPHER_UNDERGROUND {
            // Climbing or above ground; its column cannot be filled.
            let gopher_target_idx = self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES]
                & (GOPHER_CARROT_TARGET_BIT | GOPHER_TUNNEL_TARGET_MASK);

            if HORIZONTAL_TARGET_VALUES[gopher_target_idx as usize]
                == HORIZONTAL_TARGET_VALUES[hole_idx]
            {
                return;
            }
        }

        let (byte_offset, fill_mask_index) = dirt_column(HORIZONTAL_TARGET_VALUES[hole_idx]);

        // Scan surface to bottom for the first present dirt.
        let mut first_dirt_y_pos = 4usize;
        for y_pos in 0..4 {
            let dirt_bit = self.mem[field::GARDEN_DIRT_VALUES + byte_offset + y_pos * 6]
                & DIRT_MASKING_BITS[fill_mask_index];
            if dirt_bit == 0 {
                first_dirt_y_pos = y_pos;
                break;
            }
        }

        if first_dirt_y_pos == 0 {
            // Column already full to the surface.
            return;
        }
        let target_fill_y_pos = first_dirt_y_pos - 1;

        let mut fill_byte_offset = byte_offset + target_fill_y_pos * 6;
        let mut fill_mask_index = fill_mask_index;

        self.fill_in_tunnel(fill_byte_offset, fill_mask_index);

        if target_fill_y_pos == 3 {
            // Bottom row widens one column to the left.
            self.fill_in_tunnel(fill_byte_offset, fill_mask_index - 1);
        }

        if alu::is_negative(DIRT_MASKING_BITS[fill_mask_index])
            || DIRT_MASKING_BITS[fill_mask_index] == 1
        {
            // Mask edge, the right-hand bit lives in the next byte.
            fill_byte_offset += 1;
        }

        fill_mask_index += 1;
        self.fill_in_tunnel(fill_byte_offset, fill_mask_index);

        if target_fill_y_pos == 3 {
            // Bottom row widens one column to the right.
            self.fill_in_tunnel(fill_byte_offset, fill_mask_index + 1);
        }

        self.set_game_audio_values(audio::FILL_TUNNEL);

        self.increment_score(super::POINTS_FILL_TUNNEL);
    }

    fn fill_in_tunnel(&mut self, byte_offset: usize, mask_index: usize) {
        self.mem[field::GARDEN_DIRT_VALUES + byte_offset] &=
            alu::flip(DIRT_MASKING_BITS[mask_index]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::field;

    fn underground_gopher() -> Gopher {
        let mut game = Gopher::new();
        game.mem[field::GOPHER_VERT_POS] = VERT_POS_GOPHER_UNDERGROUND;
        // Direction locked so digging leaves the direction timer alone.
        game.mem[field::GOPHER_VERT_MOVEMENT_VALUES] = super::super::GOPHER_VERT_LOCKED_BIT;
        game
    }

    #[test]
    fn test_dirt_column_covers_every_pixel() {
        // byte/mask pairs must walk PF0(4)/PF1(8)/PF2(8) per half.
        for x_pos in 0..160u8 {
            let (byte, mask_index) = dirt_column(x_pos);
            let coarse = x_pos as usize / 4;
            assert_eq!(byte, PF_BYTE_MAP[coarse]);
            assert_eq!(mask_index, coarse % 20);
            assert!(DIRT_MASKING_BITS[mask_index].count_ones() == 1);
        }
        // Spot checks across the byte boundaries.
        assert_eq!(dirt_column(15), (0, 3));
        assert_eq!(dirt_column(16), (1, 4));
        assert_eq!(dirt_column(47), (1, 11));
        assert_eq!(dirt_column(48), (2, 12));
        assert_eq!(dirt_column(80), (3, 0));
        assert_eq!(dirt_column(159), (5, 19));
    }

    #[test]
    fn test_dirt_row_base_bands() {
        assert_eq!(dirt_row_base(0), 18);
        assert_eq!(dirt_row_base(1), 12);
        assert_eq!(dirt_row_base(6), 12);
        assert_eq!(dirt_row_base(7), 6);
        assert_eq!(dirt_row_base(13), 6);
        assert_eq!(dirt_row_base(14), 0);
        assert_eq!(dirt_row_base(34), 0);
    }

    #[test]
    #[should_panic]
    fn test_dirt_row_base_rejects_above_ground() {
        dirt_row_base(35);
    }

    #[test]
    fn test_digging_underground_removes_one_bit() {
        let mut game = underground_gopher();
        game.gopher_digging(100);

        // x 100 is PF1 bit 6 in the right half, bottom row.
        assert_eq!(game.mem[field::GARDEN_DIRT_VALUES + 18 + 4], 0x40);
        // Single bit: no adjacent write on the bottom row.
        let dirt: Vec<u8> = (0..24).map(|i| game.mem[field::GARDEN_DIRT_VALUES + i]).collect();
        assert_eq!(dirt.iter().map(|b| b.count_ones()).sum::<u32>(), 1);
    }

    #[test]
    fn test_digging_twice_queues_one_dig_sound() {
        let mut game = underground_gopher();
        game.gopher_digging(100);
        let channel_index = game.mem[field::AUDIO_CHANNEL_INDEX];
        let audio_index = game.mem[field::AUDIO_INDEX_VALUES + (channel_index & 1) as usize];
        assert_eq!(audio_index, audio::DIG_TUNNEL + 1);

        game.gopher_digging(100);
        assert_eq!(game.mem[field::AUDIO_CHANNEL_INDEX], channel_index);
    }

    #[test]
    fn test_mid_climb_dig_removes_the_adjacent_column() {
        let mut game = underground_gopher();
        game.mem[field::GOPHER_VERT_POS] = 8; // third row

        game.gopher_digging(super::super::HORIZ_POS_HOLE_01);

        // x 31 is PF1 bit 4; the adjacent column is bit 3 of the same byte.
        assert_eq!(game.mem[field::GARDEN_DIRT_VALUES + 6 + 1], 0x18);
        assert_eq!(game.mem[field::GARDEN_DIRT_VALUES + 6 + 2], 0x00);
    }

    #[test]
    fn test_mid_climb_dig_advances_bytes_at_the_mask_edge() {
        let mut game = underground_gopher();
        game.mem[field::GOPHER_VERT_POS] = 8;

        game.gopher_digging(super::super::HORIZ_POS_HOLE_02);

        // x 47 is PF1 bit 0; the adjacent mask value 1 triggers the byte
        // advance, so the second write lands in the PF2 byte.
        assert_eq!(game.mem[field::GARDEN_DIRT_VALUES + 6 + 1], 0x01);
        assert_eq!(game.mem[field::GARDEN_DIRT_VALUES + 6 + 2], 0x01);
    }

    #[test]
    fn test_fill_refused_while_column_surface_is_intact() {
        let mut game = underground_gopher();
        // Tunnel dug from below only: bottom two rows removed.
        game.mem[field::GARDEN_DIRT_VALUES + 18] = 0x80;
        game.mem[field::GARDEN_DIRT_VALUES + 12] = 0x80;

        game.fill_tunnel(0);

        assert_eq!(game.mem[field::GARDEN_DIRT_VALUES + 18], 0x80);
        assert_eq!(game.mem[field::CURRENT_PLAYER_SCORE + 2], 0);
    }

    #[test]
    fn test_fill_restores_the_topmost_removed_row() {
        let mut game = underground_gopher();
        // Hole 0 column broke the surface: top two rows removed.
        game.mem[field::GARDEN_DIRT_VALUES] = 0x80;
        game.mem[field::GARDEN_DIRT_VALUES + 6] = 0x80;
        game.mem[field::GARDEN_DIRT_VALUES + 7] = 0x80;

        game.fill_tunnel(0);

        // Row 1 refilled in both its own byte and the neighbour byte;
        // row 0 stays open.
        assert_eq!(game.mem[field::GARDEN_DIRT_VALUES + 6], 0x00);
        assert_eq!(game.mem[field::GARDEN_DIRT_VALUES + 7], 0x00);
        assert_eq!(game.mem[field::GARDEN_DIRT_VALUES], 0x80);
        // 20 stored score units land in the low byte, and the fill tune
        // is queued.
        assert_eq!(game.mem[field::CURRENT_PLAYER_SCORE + 2], 0x20);
        let channel = (game.mem[field::AUDIO_CHANNEL_INDEX] & 1) as usize;
        assert_eq!(
            game.mem[field::AUDIO_INDEX_VALUES + channel],
            audio::FILL_TUNNEL + 1
        );
    }

    #[test]
    fn test_fill_widens_on_the_bottom_row() {
        let mut game = underground_gopher();
        // Hole 1 column fully removed.
        for row in 0..4 {
            game.mem[field::GARDEN_DIRT_VALUES + 1 + row * 6] = 0x10;
        }
        game.mem[field::GARDEN_DIRT_VALUES + 19] = 0xFF;

        game.fill_tunnel(1);

        // Bottom row refills four columns wide.
        assert_eq!(game.mem[field::GARDEN_DIRT_VALUES + 19], 0xC3);
    }

    #[test]
    fn test_fill_refused_while_gopher_climbs_the_column() {
        let mut game = underground_gopher();
        game.mem[field::GOPHER_VERT_POS] = 8;
        game.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] = 0; // targeting hole 0
        game.mem[field::GARDEN_DIRT_VALUES] = 0x80;
        game.mem[field::GARDEN_DIRT_VALUES + 6] = 0x80;

        game.fill_tunnel(0);

        assert_eq!(game.mem[field::GARDEN_DIRT_VALUES + 6], 0x80);
        assert_eq!(game.mem[field::CURRENT_PLAYER_SCORE + 2], 0);
    }
}

/// Text rendering of the garden for mismatch diagnostics: `#` present
/// dirt, `.` removed, with the gopher's column and row marked.
pub fn render_garden(mem: &MemoryImage) -> String {
    let gopher_column = mem[field::GOPHER_HORIZ_POS] as usize / 4;
    let vert_pos = mem[field::GOPHER_VERT_POS];
    let gopher_row = if vert_pos <= 34 {
        Some(dirt_row_base(vert_pos) / 6)
    } else {
        None
    };

    let mut out = String::new();
    // Memory rows already run surface first.
    for row in 0..4 {
        for coarse in 0..40 {
            let byte = mem[field::GARDEN_DIRT_VALUES + PF_BYTE_MAP[coarse] + row * 6];
            let removed = byte & DIRT_MASKING_BITS[coarse % 20] != 0;
            out.push(if removed { '.' } else { '#' });
        }
        if gopher_row == Some(row) {
            out.push_str(" <- gopher");
        }
        out.push('\n');
    }
    for _ in 0..gopher_column {
        out.push(' ');
    }
    out.push_str("^ gopher column\n");
    out
}
