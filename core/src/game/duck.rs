//! Duck flight, the falling seed and duck spawning.

use crate::alu;
use crate::mem::field;

use super::render::{DuckFace, DuckWing};
use super::{
    DISABLE_SEED, DUCK_ANIMATION_DOWN_WING, DUCK_ANIMATION_STATIONARY_WING,
    DUCK_ANIMATION_UP_WING, DUCK_HORIZ_DIR_MASK, Gopher, INIT_DECAYING_TIMER_VALUE,
    INIT_DUCK_ANIMATION_TIMER, INIT_SEED_VERT_POS, SEED_TARGET_HORIZ_POS_MASK, XMAX, XMAX_DUCK,
    XMIN_DUCK, audio,
};

pub const SEED_GROUND_LEVEL: u8 = 107;
/// Catch band, inclusive low / exclusive high.
pub const SEED_MIN_CATCHING_Y: u8 = 83;
pub const SEED_MAX_CATCHING_Y: u8 = 87;

impl Gopher {
    /// Per-frame duck update: wing animation on an 8-frame cadence, a
    /// quack every 32 frames and one pixel of travel until the duck
    /// leaves the screen.
    pub(crate) fn update_duck(&mut self) {
        let mut animation_timer = self.mem[field::DUCK_ANIMATION_TIMER];

        if animation_timer == 0 {
            self.disable_duck();
            return;
        }

        animation_timer -= 1;

        if animation_timer == 0 {
            self.mem[field::DUCK_ANIMATION_TIMER] = INIT_DUCK_ANIMATION_TIMER;
            self.render.duck_wings = DuckWing::Stationary;
        } else {
            self.mem[field::DUCK_ANIMATION_TIMER] = animation_timer;

            if animation_timer == DUCK_ANIMATION_DOWN_WING {
                self.render.duck_wings = DuckWing::Down;
            } else if animation_timer == DUCK_ANIMATION_STATIONARY_WING {
                self.render.duck_wings = DuckWing::Stationary;
            } else if animation_timer == DUCK_ANIMATION_UP_WING {
                self.render.duck_wings = DuckWing::Up;
            }
        }

        if self.mem[field::FRAME_COUNT] & 0x1F == 0 {
            self.set_game_audio_values(audio::DUCK_QUACKING);
        }

        if alu::is_negative(self.mem[field::DUCK_ATTRIBUTES]) {
            self.mem[field::DUCK_HORIZ_POS] = self.mem[field::DUCK_HORIZ_POS].wrapping_sub(1);
        } else {
            self.mem[field::DUCK_HORIZ_POS] = self.mem[field::DUCK_HORIZ_POS].wrapping_add(1);
        }

        if self.mem[field::DUCK_HORIZ_POS] < XMIN_DUCK
            || self.mem[field::DUCK_HORIZ_POS] >= XMAX_DUCK
        {
            self.disable_duck();
        }
    }

    fn disable_duck(&mut self) {
        self.render.duck_wings = DuckWing::Disabled;
        self.render.duck_face = DuckFace::Disabled;
        self.mem[field::DUCK_ANIMATION_TIMER] = 0;
    }

    /// Per-frame seed update: carried by the duck until its target
    /// column, held by the farmer while the decay timer runs, falling
    /// otherwise.
    pub(crate) fn update_seed(&mut self) {
        if alu::is_negative(self.mem[field::FALLING_SEED_VERT_POS]) {
            return;
        }

        if self.mem[field::HELD_SEED_DECAYING_TIMER] != 0 {
            self.update_seed_held_by_farmer();
            return;
        }

        if self.mem[field::DUCK_ATTRIBUTES] & SEED_TARGET_HORIZ_POS_MASK
            == self.mem[field::FALLING_SEED_HORIZ_POS]
        {
            self.update_falling_seed();
            return;
        }

        // Still moving with the duck.
        if alu::is_negative(self.mem[field::DUCK_ATTRIBUTES]) {
            self.mem[field::FALLING_SEED_HORIZ_POS] =
                self.mem[field::FALLING_SEED_HORIZ_POS].wrapping_sub(1);
        } else {
            self.mem[field::FALLING_SEED_HORIZ_POS] =
                self.mem[field::FALLING_SEED_HORIZ_POS].wrapping_add(1);
        }
    }

    fn update_falling_seed(&mut self) {
        let new_seed_y = self.mem[field::FALLING_SEED_VERT_POS] + 1;
        self.mem[field::FALLING_SEED_VERT_POS] = new_seed_y;

        if new_seed_y == SEED_GROUND_LEVEL {
            self.mem[field::FALLING_SEED_VERT_POS] = DISABLE_SEED;
        } else if (SEED_MIN_CATCHING_Y..SEED_MAX_CATCHING_Y).contains(&new_seed_y)
            && alu::abs_distance(
                self.mem[field::FALLING_SEED_HORIZ_POS],
                self.mem[field::FARMER_HORIZ_POS],
            ) < 5
        {
            // Caught.
            self.mem[field::HELD_SEED_DECAYING_TIMER] = INIT_DECAYING_TIMER_VALUE;
        }
    }

    fn update_seed_held_by_farmer(&mut self) {
        self.mem[field::FALLING_SEED_HORIZ_POS] = self.mem[field::FARMER_HORIZ_POS];
        self.mem[field::HELD_SEED_DECAYING_TIMER] -= 1;

        if self.mem[field::HELD_SEED_DECAYING_TIMER] == 0 {
            self.mem[field::FALLING_SEED_VERT_POS] = DISABLE_SEED;
        }
    }

    /// Called when the score's hundreds digit just carried: spawn the
    /// duck on 4xx/9xx crossings, if the mode allows it, a carrot is
    /// missing and no seed is in flight.
    pub(crate) fn check_to_spawn_duck(&mut self) {
        if !self.is_duck_enabled()
            || self.mem[field::CARROT_PATTERN] == 7
            || !alu::is_negative(self.mem[field::FALLING_SEED_VERT_POS])
        {
            return;
        }

        let score_100_digit = self.mem[field::CURRENT_PLAYER_SCORE + 1] & 0x0F;
        if score_100_digit != 4 && score_100_digit != 9 {
            return;
        }

        let new_attributes = self.mem[field::RANDOM];
        self.mem[field::DUCK_ATTRIBUTES] = new_attributes;

        // Direction bit picks the entry edge; the seed trails the duck.
        let (duck_spawn_x, seed_spawn_x) = if alu::is_negative(new_attributes) {
            (XMAX_DUCK, XMAX - 19)
        } else {
            (XMIN_DUCK, XMIN_DUCK + 8)
        };

        self.mem[field::DUCK_HORIZ_POS] = duck_spawn_x;
        self.mem[field::FALLING_SEED_HORIZ_POS] = seed_spawn_x;

        let seed_target_pos = new_attributes & SEED_TARGET_HORIZ_POS_MASK;

        if seed_target_pos < 20 {
            // Unreachable for the farmer; recentre the drop column.
            self.mem[field::DUCK_ATTRIBUTES] =
                (self.mem[field::DUCK_ATTRIBUTES] & DUCK_HORIZ_DIR_MASK) | ((XMAX + 1) / 2);
        }

        self.init_duck_state();
    }

    fn init_duck_state(&mut self) {
        self.mem[field::DUCK_ANIMATION_TIMER] = INIT_DUCK_ANIMATION_TIMER;
        self.render.duck_wings = DuckWing::Stationary;
        self.render.duck_face = DuckFace::Face;

        self.mem[field::FALLING_SEED_VERT_POS] = INIT_SEED_VERT_POS;
        self.mem[field::HELD_SEED_DECAYING_TIMER] = 0;
    }
}
