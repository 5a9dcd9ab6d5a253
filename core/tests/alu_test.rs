use burrow_core::alu;

// =============================================================================
// ADC / SBC
// =============================================================================

#[test]
fn test_add_with_carry_basic() {
    assert_eq!(alu::add_with_carry(0x10, 0x22, 0), (0x32, 0));
    assert_eq!(alu::add_with_carry(0x10, 0x22, 1), (0x33, 0));
}

#[test]
fn test_add_with_carry_overflow() {
    assert_eq!(alu::add_with_carry(0xFF, 0x01, 0), (0x00, 1));
    assert_eq!(alu::add_with_carry(0xFF, 0xFF, 1), (0xFF, 1));
}

#[test]
fn test_subtract_with_carry_no_borrow() {
    // Carry in 1 means no pending borrow; carry out 1 means none occurred.
    assert_eq!(alu::subtract_with_carry(0x50, 0x20, 1), (0x30, 1));
    assert_eq!(alu::subtract_with_carry(0x20, 0x20, 1), (0x00, 1));
}

#[test]
fn test_subtract_with_carry_borrow() {
    assert_eq!(alu::subtract_with_carry(0x20, 0x21, 1), (0xFF, 0));
    // Pending borrow eats one more.
    assert_eq!(alu::subtract_with_carry(0x20, 0x20, 0), (0xFF, 0));
}

#[test]
fn test_subtract_matches_wrapping_semantics() {
    for a in 0..=255u8 {
        for b in [0u8, 1, 0x7F, 0x80, 0xFF] {
            let (diff, carry) = alu::subtract_with_carry(a, b, 1);
            assert_eq!(diff, a.wrapping_sub(b));
            assert_eq!(carry, (a >= b) as u8);
        }
    }
}

// =============================================================================
// Decimal mode
// =============================================================================

#[test]
fn test_bcd_add_simple() {
    assert_eq!(alu::bcd_add_with_carry(0x05, 0x03, 0), (0x08, 0));
    assert_eq!(alu::bcd_add_with_carry(0x09, 0x01, 0), (0x10, 0));
}

#[test]
fn test_bcd_add_carry_in() {
    assert_eq!(alu::bcd_add_with_carry(0x19, 0x00, 1), (0x20, 0));
}

#[test]
fn test_bcd_add_carry_out() {
    assert_eq!(alu::bcd_add_with_carry(0x99, 0x00, 1), (0x00, 1));
    assert_eq!(alu::bcd_add_with_carry(0x50, 0x50, 0), (0x00, 1));
}

#[test]
fn test_bcd_add_exhaustive_against_decimal() {
    // Every valid packed-BCD pair with both carries.
    for a_dec in 0..100u16 {
        for b_dec in 0..100u16 {
            for carry in 0..=1u16 {
                let a = ((a_dec / 10) << 4 | (a_dec % 10)) as u8;
                let b = ((b_dec / 10) << 4 | (b_dec % 10)) as u8;
                let (result, carry_out) = alu::bcd_add_with_carry(a, b, carry as u8);

                let sum = a_dec + b_dec + carry;
                let expected = ((sum % 100 / 10) << 4 | (sum % 10)) as u8;
                assert_eq!(result, expected, "{a_dec} + {b_dec} + {carry}");
                assert_eq!(carry_out, (sum > 99) as u8, "{a_dec} + {b_dec} + {carry}");
            }
        }
    }
}

// =============================================================================
// Shifts and rotates
// =============================================================================

#[test]
fn test_rotate_left_with_carry() {
    assert_eq!(alu::rotate_left_with_carry(0b0100_0001, 0), (0b1000_0010, 0));
    assert_eq!(alu::rotate_left_with_carry(0b1000_0000, 1), (0b0000_0001, 1));
}

#[test]
fn test_rotate_left_nine_times_is_identity() {
    // 8 data bits plus the carry bit make a 9-bit ring.
    for start in [0u8, 1, 0x5A, 0x80, 0xFF] {
        let mut value = start;
        let mut carry = 0u8;
        for _ in 0..9 {
            let (v, c) = alu::rotate_left_with_carry(value, carry);
            value = v;
            carry = c;
        }
        assert_eq!((value, carry), (start, 0));
    }
}

#[test]
fn test_shift_left_with_carry() {
    assert_eq!(alu::shift_left_with_carry(0x01), (0x02, 0));
    assert_eq!(alu::shift_left_with_carry(0x80), (0x00, 1));
    assert_eq!(alu::shift_left_with_carry(0xC1), (0x82, 1));
}

#[test]
fn test_shift_right_with_carry() {
    assert_eq!(alu::shift_right_with_carry(0x02), (0x01, 0));
    assert_eq!(alu::shift_right_with_carry(0x01), (0x00, 1));
    assert_eq!(alu::shift_right_with_carry(0x83), (0x41, 1));
}

// =============================================================================
// Unary helpers
// =============================================================================

#[test]
fn test_flip_increment_decrement() {
    assert_eq!(alu::flip(0x0F), 0xF0);
    assert_eq!(alu::increment(0xFF), 0x00);
    assert_eq!(alu::decrement(0x00), 0xFF);
}

#[test]
fn test_sign_tests() {
    assert!(alu::is_negative(0x80));
    assert!(alu::is_negative(0xFF));
    assert!(alu::is_positive(0x00));
    assert!(alu::is_positive(0x7F));
}

// =============================================================================
// Absolute distance idiom
// =============================================================================

#[test]
fn test_abs_distance_basic() {
    assert_eq!(alu::abs_distance(10, 3), 7);
    assert_eq!(alu::abs_distance(3, 10), 7);
    assert_eq!(alu::abs_distance(83, 83), 0);
}

#[test]
fn test_abs_distance_matches_native_within_position_range() {
    // Every pair of screen positions stays within the 128-wide window
    // where the flip-and-increment idiom equals a true absolute value.
    for a in 0..=159u8 {
        for b in (a.saturating_sub(127))..=(a.saturating_add(96).min(159)) {
            let expected = (a as i16 - b as i16).unsigned_abs() as u8;
            if expected < 128 {
                assert_eq!(alu::abs_distance(a, b), expected, "{a} vs {b}");
            }
        }
    }
}

#[test]
fn test_abs_distance_aliases_past_128() {
    // 200 apart reads as 56; the proximity checks rely on the alias
    // staying large rather than on a true distance.
    assert_eq!(alu::abs_distance(0, 200), 56);
}
