//! Farmer movement and the shovel/plant action.

use crate::alu;
use crate::mem::field;

use super::input::{ACTION_MASK, STICK_LEFT, STICK_RIGHT};
use super::render::FarmerSprite;
use super::{DISABLE_SEED, Gopher, HORIZONTAL_TARGET_VALUES, XMAX_FARMER, XMIN_FARMER};

impl Gopher {
    /// Joystick-driven horizontal movement, clamped to the garden. The
    /// second player's stick lives in the low nibble.
    pub(crate) fn update_farmer_movement(&mut self) {
        let mut joystick_values = self.input.swcha;

        if self.is_second_player_active() {
            joystick_values <<= 4;
        }

        if joystick_values & (STICK_LEFT | STICK_RIGHT) == STICK_LEFT | STICK_RIGHT {
            // Neither direction held.
        } else if joystick_values & STICK_LEFT != 0 {
            // Left line still high, so the stick is held right.
            if self.mem[field::FARMER_HORIZ_POS] < XMAX_FARMER {
                self.mem[field::FARMER_HORIZ_POS] += 1;
            }
        } else if self.mem[field::FARMER_HORIZ_POS] >= XMIN_FARMER {
            self.mem[field::FARMER_HORIZ_POS] -= 1;
        }
    }

    /// Pre-dispatch action-button step: advances a running swing, or
    /// starts one on a fresh (debounced) button press.
    pub(crate) fn update_farmer(&mut self) {
        if self.mem[field::FARMER_ANIMATION_IDX] != 0 {
            self.increment_farmer_animation_index();
            return;
        }

        let action_button_state = if self.is_second_player_active() {
            self.input.intpt5
        } else {
            self.input.intpt4
        } & ACTION_MASK;

        if action_button_state == 0 {
            if self.mem[field::ACTION_BUTTON_DEBOUNCE] != 0 {
                // Held since last frame; needs one released frame first.
                return;
            }

            self.mem[field::ACTION_BUTTON_DEBOUNCE] = 0xFF;
            self.increment_farmer_animation_index();
        } else {
            self.mem[field::ACTION_BUTTON_DEBOUNCE] = 0;
        }
    }

    /// 8-step swing; frames 2 and 4 switch the sprite, frame 8 resolves
    /// the action and resets.
    fn increment_farmer_animation_index(&mut self) {
        let next_animation_index = self.mem[field::FARMER_ANIMATION_IDX] + 1;
        self.mem[field::FARMER_ANIMATION_IDX] = next_animation_index;

        if next_animation_index == 8 {
            self.mem[field::FARMER_ANIMATION_IDX] = 0;
            self.render.farmer = FarmerSprite::Sprite00;

            self.farmer_action();
        } else if next_animation_index == 2 {
            self.render.farmer = FarmerSprite::Sprite01;
        } else if next_animation_index == 4 {
            self.render.farmer = FarmerSprite::Sprite02;
        }
    }

    /// Resolve the swing: fill the nearest hole, or plant a held seed on
    /// a carrot column. Planting over a live carrot wastes the seed.
    fn farmer_action(&mut self) {
        let shovel_x = self.mem[field::FARMER_HORIZ_POS].wrapping_sub(4);

        // Nearest target within 6 pixels, carrots checked first.
        let mut target: Option<usize> = None;
        for x in (0..=10).rev() {
            if alu::abs_distance(shovel_x, HORIZONTAL_TARGET_VALUES[x]) < 6 {
                target = Some(x);
                break;
            }
        }

        let Some(target_idx) = target else {
            return;
        };

        if target_idx < 8 {
            // Indices 8..=10 are carrots, everything below is a tunnel.
            self.fill_tunnel(target_idx);
            return;
        }

        if self.mem[field::HELD_SEED_DECAYING_TIMER] == 0 {
            return;
        }

        self.mem[field::CARROT_PATTERN] |= 1 << (target_idx - 8);
        self.mem[field::FALLING_SEED_VERT_POS] = DISABLE_SEED;
        self.mem[field::HELD_SEED_DECAYING_TIMER] = 0;
    }
}
