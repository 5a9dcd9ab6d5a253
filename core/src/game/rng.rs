//! The two-byte pseudo-random generator.

use crate::alu;
use crate::mem::field;

use super::Gopher;

impl Gopher {
    /// Advance the RNG pair once. Runs every frame with the previous
    /// frame's terminal carry, and once more mid-frame (carry forced to 1)
    /// when the gopher rolls new targets.
    pub(crate) fn next_random(&mut self, carry: u8) {
        let start_r0 = self.mem[field::RANDOM];
        let start_r1 = self.mem[field::RANDOM + 1];

        let (r0, carry) = alu::rotate_left_with_carry(start_r0, carry);
        self.mem[field::RANDOM] = r0;
        let (r1, carry) = alu::rotate_left_with_carry(start_r1, carry);
        self.mem[field::RANDOM + 1] = r1;

        // Plain binary add; the carry out is discarded.
        let (r0, _) = alu::add_with_carry(self.mem[field::RANDOM], 195, carry);
        self.mem[field::RANDOM] = r0;

        self.mem[field::RANDOM] = start_r0 ^ self.mem[field::RANDOM];
        self.mem[field::RANDOM + 1] = start_r1 ^ self.mem[field::RANDOM + 1];
    }
}
