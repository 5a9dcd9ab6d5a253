//! Byte arithmetic with explicit carry, matching 6507 flag semantics.
//!
//! Every helper is a pure function over `u8`. Carry in and carry out are
//! `u8` values restricted to 0 or 1 so they can be threaded straight into
//! the next addition, the way the cartridge code threads the processor
//! carry flag between instructions.

/// Bitwise complement (EOR #$FF).
#[inline]
pub fn flip(value: u8) -> u8 {
    !value
}

/// Wrapping increment (INC).
#[inline]
pub fn increment(value: u8) -> u8 {
    value.wrapping_add(1)
}

/// Wrapping decrement (DEC).
#[inline]
pub fn decrement(value: u8) -> u8 {
    value.wrapping_sub(1)
}

/// Bit 7 set, the N-flag test.
#[inline]
pub fn is_negative(value: u8) -> bool {
    value & 0x80 != 0
}

/// Bit 7 clear.
#[inline]
pub fn is_positive(value: u8) -> bool {
    value & 0x80 == 0
}

/// ADC: binary add, returns (result, carry out).
#[inline]
pub fn add_with_carry(a: u8, b: u8, carry: u8) -> (u8, u8) {
    debug_assert!(carry <= 1);
    let sum = a as u16 + b as u16 + carry as u16;
    (sum as u8, (sum > 0xFF) as u8)
}

/// SBC: binary subtract with the inverted borrow convention. Carry in of 1
/// means "no borrow pending"; carry out is 1 when no borrow occurred
/// (minuend >= subtrahend + borrow).
#[inline]
pub fn subtract_with_carry(a: u8, b: u8, carry: u8) -> (u8, u8) {
    debug_assert!(carry <= 1);
    let diff = a as i16 - b as i16 - (1 - carry) as i16;
    (diff as u8, (diff >= 0) as u8)
}

/// ADC in decimal mode: packed BCD add, digit by digit with a -10
/// correction on each overflowing digit. Inputs are assumed to hold valid
/// BCD digits; the result for non-BCD inputs follows the same correction
/// rule rather than the quirkier silicon behaviour, which the cartridge
/// never relies on.
#[inline]
pub fn bcd_add_with_carry(a: u8, b: u8, carry: u8) -> (u8, u8) {
    debug_assert!(carry <= 1);
    let mut ones = (a & 0x0F) + (b & 0x0F) + carry;
    let mut tens_carry = 0u8;
    if ones > 9 {
        ones -= 10;
        tens_carry = 1;
    }
    let mut tens = (a >> 4) + (b >> 4) + tens_carry;
    let mut carry_out = 0u8;
    if tens > 9 {
        tens -= 10;
        carry_out = 1;
    }
    ((tens << 4) | ones, carry_out)
}

/// ROL: rotate left through carry, returns (result, carry out = old bit 7).
#[inline]
pub fn rotate_left_with_carry(value: u8, carry: u8) -> (u8, u8) {
    debug_assert!(carry <= 1);
    ((value << 1) | carry, (value >> 7) & 1)
}

/// ASL: shift left, returns (result, carry out = old bit 7).
#[inline]
pub fn shift_left_with_carry(value: u8) -> (u8, u8) {
    (value << 1, (value >> 7) & 1)
}

/// LSR: shift right, returns (result, carry out = old bit 0).
#[inline]
pub fn shift_right_with_carry(value: u8) -> (u8, u8) {
    (value >> 1, value & 1)
}

/// The cartridge's absolute-distance idiom: SBC with carry pre-set, then
/// flip-and-increment when bit 7 of the result is set. Distances wider than
/// 128 therefore alias, which the proximity checks depend on.
#[inline]
pub fn abs_distance(a: u8, b: u8) -> u8 {
    let (diff, _) = subtract_with_carry(a, b, 1);
    if is_negative(diff) {
        increment(flip(diff))
    } else {
        diff
    }
}
