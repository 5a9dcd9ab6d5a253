//! BCD scoring.
//!
//! Three packed-BCD bytes, most significant first, displayed with a fixed
//! trailing zero: the stored value is the score divided by 10. Point
//! constants are one less than the awarded value because the add runs
//! with the carry pre-set.

use crate::alu;
use crate::mem::field;

use super::Gopher;

impl Gopher {
    /// Add `amount` (pre-biased BCD) to the score, propagating the decimal
    /// carry toward the most significant byte. A carry out of the low byte
    /// triggers the difficulty ramp and the duck spawn check.
    pub(crate) fn increment_score(&mut self, amount: u8) {
        let mut amount = amount;

        for score_byte_offset in (0..3).rev() {
            let (new_byte_value, carry) = alu::bcd_add_with_carry(
                amount,
                self.mem[field::CURRENT_PLAYER_SCORE + score_byte_offset],
                1,
            );
            self.mem[field::CURRENT_PLAYER_SCORE + score_byte_offset] = new_byte_value;

            if carry == 0 {
                return;
            }

            if score_byte_offset == 2 {
                self.check_to_decrement_gopher_direction_timer();
                self.check_to_spawn_duck();
            }

            amount = 0;
        }
    }

    /// Every even hundreds digit shortens the direction-timer seed, down
    /// to a floor of 1, which makes the gopher change course more often.
    fn check_to_decrement_gopher_direction_timer(&mut self) {
        if self.mem[field::CURRENT_PLAYER_SCORE + 1] & 1 != 0 {
            return;
        }

        if self.mem[field::INIT_GOPHER_CHANGE_DIRECTION_TIMER] > 1 {
            self.mem[field::INIT_GOPHER_CHANGE_DIRECTION_TIMER] -= 1;
        }
    }
}
