//! Gopher movement, targeting, taunting and animation.

use crate::alu;
use crate::mem::field;

use super::render::{GopherZone00, GopherZone01, GopherZone02};
use super::{
    GOPHER_CARROT_STEAL_MASK, GOPHER_CARROT_TARGET_BIT, GOPHER_HORIZ_DIR_MASK,
    GOPHER_TARGET_RIGHT_TUNNELS_BIT, GOPHER_TARGET_VERT_POSITIONS, GOPHER_TUNNEL_TARGET_MASK,
    GOPHER_VERT_FAKING_TARGET_MASK, GOPHER_VERT_LOCKED_BIT, GOPHER_VERT_TARGET_MASK, Gopher,
    HORIZONTAL_TARGET_VALUES, INIT_GOPHER_HORIZ_POS, NO_REFLECT, POINTS_BONK_GOPHER, REFLECT,
    VERT_POS_GOPHER_ABOVE_GROUND, VERT_POS_GOPHER_TAUNTING, VERT_POS_GOPHER_UNDERGROUND, XMAX,
    XMAX_GOPHER, XMIN_GOPHER, audio,
};

impl Gopher {
    /// Pre-dispatch digging step: runs every main-loop frame before the
    /// state handler.
    pub(crate) fn update_gopher_digging(&mut self) {
        // Past 10,000 points an idle vertical target is replaced by the
        // faking target so the gopher feints surfacing more often.
        if self.mem[field::CURRENT_PLAYER_SCORE] != 0
            && self.mem[field::GOPHER_VERT_MOVEMENT_VALUES] & !GOPHER_VERT_LOCKED_BIT == 0
        {
            self.mem[field::GOPHER_VERT_MOVEMENT_VALUES] |= GOPHER_VERT_FAKING_TARGET_MASK;
        }

        if self.mem[field::GOPHER_VERT_POS] == VERT_POS_GOPHER_UNDERGROUND {
            // Tunnelling; facing right digs one sprite width ahead.
            let dig_x = self.mem[field::GOPHER_HORIZ_POS].wrapping_add(
                if self.mem[field::GOPHER_REFLECT_STATE] == REFLECT {
                    8
                } else {
                    0
                },
            );
            self.gopher_digging(dig_x);
        } else if self.mem[field::GOPHER_VERT_POS] != VERT_POS_GOPHER_ABOVE_GROUND {
            // Climbing; dig straight up the targeted tunnel column.
            let target_idx =
                (self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] & GOPHER_TUNNEL_TARGET_MASK) as usize;
            self.gopher_digging(HORIZONTAL_TARGET_VALUES[target_idx]);
        }
    }

    pub(crate) fn check_to_change_gopher_horizontal_direction(&mut self) {
        if self.mem[field::GOPHER_VERT_MOVEMENT_VALUES] & GOPHER_VERT_LOCKED_BIT != 0 {
            return;
        }

        self.mem[field::GOPHER_CHANGE_DIRECTION_TIMER] =
            self.mem[field::GOPHER_CHANGE_DIRECTION_TIMER].wrapping_sub(1);

        if self.mem[field::GOPHER_CHANGE_DIRECTION_TIMER] == 0 {
            self.mem[field::GOPHER_VERT_MOVEMENT_VALUES] |= GOPHER_VERT_LOCKED_BIT;
            self.mem[field::GOPHER_CHANGE_DIRECTION_TIMER] =
                self.mem[field::INIT_GOPHER_CHANGE_DIRECTION_TIMER];
        } else if self.mem[field::GOPHER_VERT_POS] == VERT_POS_GOPHER_UNDERGROUND {
            self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] ^= GOPHER_HORIZ_DIR_MASK;
        } else {
            self.mem[field::GOPHER_VERT_MOVEMENT_VALUES] = GOPHER_VERT_LOCKED_BIT;
        }
    }

    /// Horizontal travel toward the current target, or the vertical /
    /// steal handling once within 3 pixels of it. Returns `Some(carry)`
    /// when a stolen carrot already ended the frame.
    pub(crate) fn update_gopher_movement(&mut self) -> Option<u8> {
        if self.mem[field::GOPHER_TAUNT_TIMER] != 0 {
            return None;
        }

        let x_target_idx = (self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES]
            & (GOPHER_CARROT_TARGET_BIT | GOPHER_TUNNEL_TARGET_MASK))
            as usize;
        let x_target = HORIZONTAL_TARGET_VALUES[x_target_idx];

        if alu::abs_distance(self.mem[field::GOPHER_HORIZ_POS], x_target) < 3 {
            return self.gopher_steal_carrot_or_move_vertically(x_target_idx);
        }

        if self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] & GOPHER_HORIZ_DIR_MASK != 0 {
            self.mem[field::GOPHER_HORIZ_POS] =
                self.mem[field::GOPHER_HORIZ_POS].wrapping_sub(2);
            self.mem[field::GOPHER_REFLECT_STATE] = NO_REFLECT;

            if self.mem[field::GOPHER_HORIZ_POS] < XMIN_GOPHER {
                self.mem[field::GOPHER_HORIZ_POS] = XMAX_GOPHER;
            }
        } else {
            self.mem[field::GOPHER_HORIZ_POS] =
                self.mem[field::GOPHER_HORIZ_POS].wrapping_add(2);
            self.mem[field::GOPHER_REFLECT_STATE] = REFLECT;

            if self.mem[field::GOPHER_HORIZ_POS] >= XMAX_GOPHER {
                self.mem[field::GOPHER_HORIZ_POS] = XMIN_GOPHER;
            }
        }

        None
    }

    fn gopher_steal_carrot_or_move_vertically(&mut self, x_target_idx: usize) -> Option<u8> {
        if self.mem[field::GOPHER_VERT_POS] != VERT_POS_GOPHER_ABOVE_GROUND {
            self.move_gopher_vertically(x_target_idx);
            return None;
        }

        let target_carrot =
            self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] & GOPHER_CARROT_STEAL_MASK;
        debug_assert!(target_carrot <= 2);
        let target_carrot_mask = 1u8 << target_carrot;

        self.mem[field::CARROT_PATTERN] &= !target_carrot_mask;

        Some(self.advance_current_game_state(0))
    }

    fn move_gopher_vertically(&mut self, x_target_idx: usize) {
        let mut target_x = HORIZONTAL_TARGET_VALUES[x_target_idx];
        if self.mem[field::GOPHER_REFLECT_STATE] == REFLECT {
            target_x += 1;
        }

        // Stick to the column while climbing.
        self.mem[field::GOPHER_HORIZ_POS] = target_x;

        let y_target = GOPHER_TARGET_VERT_POSITIONS
            [(self.mem[field::GOPHER_VERT_MOVEMENT_VALUES] & GOPHER_VERT_TARGET_MASK) as usize];
        if self.mem[field::GOPHER_VERT_POS] == y_target {
            self.gopher_reached_vertical_target();
            return;
        }

        if self.mem[field::GOPHER_VERT_POS] < y_target {
            self.mem[field::GOPHER_VERT_POS] += 1;

            if self.mem[field::GOPHER_VERT_POS] == VERT_POS_GOPHER_ABOVE_GROUND {
                self.set_gopher_carrot_target();
            }
        } else {
            self.mem[field::GOPHER_VERT_POS] -= 1;
        }
    }

    /// Fully surfaced: pick the carrot to run for, nearest first from the
    /// gopher's side of the screen.
    fn set_gopher_carrot_target(&mut self) {
        if self.mem[field::GOPHER_HORIZ_POS] <= XMAX / 2 {
            self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] = GOPHER_CARROT_TARGET_BIT;

            if self.mem[field::CARROT_PATTERN] & (1 << 2) != 0 {
                self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] += 2;
            } else if self.mem[field::CARROT_PATTERN] & (1 << 1) != 0 {
                self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] += 1;
            }
        } else {
            self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] =
                GOPHER_HORIZ_DIR_MASK | GOPHER_CARROT_TARGET_BIT;

            if self.mem[field::CARROT_PATTERN] & (1 << 0) != 0 {
                // Rightmost carrot, index offset 0.
            } else if self.mem[field::CARROT_PATTERN] & (1 << 1) != 0 {
                self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] += 1;
            } else {
                self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] += 2;
            }
        }
    }

    fn gopher_reached_vertical_target(&mut self) {
        if self.mem[field::GOPHER_VERT_MOVEMENT_VALUES] & GOPHER_VERT_TARGET_MASK
            == VERT_POS_GOPHER_UNDERGROUND
        {
            // Back at the bottom: roll the next target.
            self.set_gopher_new_target_values();
            return;
        }

        self.mem[field::GOPHER_VERT_MOVEMENT_VALUES] = GOPHER_VERT_LOCKED_BIT;

        if self.mem[field::GOPHER_VERT_POS] == VERT_POS_GOPHER_TAUNTING {
            self.mem[field::GOPHER_VERT_POS] -= 1;
        }
    }

    fn set_gopher_new_target_values(&mut self) {
        self.next_random(1);
        self.mem[field::GOPHER_VERT_MOVEMENT_VALUES] = self.mem[field::RANDOM];
        self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] =
            self.mem[field::RANDOM + 1] & (GOPHER_HORIZ_DIR_MASK | GOPHER_TUNNEL_TARGET_MASK);

        // Pro difficulty switch, or any score past 10,000.
        let difficulty = if self.is_second_player_active() {
            self.input.swchb
        } else {
            self.input.swchb << 1
        };
        if self.mem[field::CURRENT_PLAYER_SCORE] != 0 || alu::is_negative(difficulty) {
            self.smart_gopher_tunnel_targeting();
        }

        self.normal_gopher_logic();
    }

    /// Bias the tunnel choice toward the farmer's half of the garden.
    /// A resulting target of 0 is bumped to the right tunnels, as the
    /// cartridge does.
    fn smart_gopher_tunnel_targeting(&mut self) {
        if self.mem[field::FARMER_HORIZ_POS] >= 80 {
            self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] &=
                alu::flip(GOPHER_TARGET_RIGHT_TUNNELS_BIT);
        }

        if self.mem[field::FARMER_HORIZ_POS] < 80
            || self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] == 0
        {
            self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] |= GOPHER_TARGET_RIGHT_TUNNELS_BIT;
        }
    }

    fn normal_gopher_logic(&mut self) {
        if self.mem[field::GOPHER_CHANGE_DIRECTION_TIMER] != 0 {
            self.mem[field::GOPHER_CHANGE_DIRECTION_TIMER] -= 1;
            self.mem[field::GOPHER_VERT_MOVEMENT_VALUES] &= 0x7F;
        }

        if self.mem[field::GOPHER_CHANGE_DIRECTION_TIMER] == 0 {
            self.mem[field::GOPHER_CHANGE_DIRECTION_TIMER] =
                self.mem[field::INIT_GOPHER_CHANGE_DIRECTION_TIMER];
            self.mem[field::GOPHER_VERT_MOVEMENT_VALUES] |= 0x80;
        }
    }

    pub(crate) fn check_for_farmer_bonking_gopher(&mut self) {
        // Needs the back half of the shovel swing, the gopher at head
        // height and the farmer within 6 pixels of the gopher's head.
        if self.mem[field::FARMER_ANIMATION_IDX] < 4
            || self.mem[field::GOPHER_VERT_POS] < VERT_POS_GOPHER_TAUNTING
            || alu::abs_distance(
                self.mem[field::FARMER_HORIZ_POS],
                self.mem[field::GOPHER_HORIZ_POS].wrapping_add(3),
            ) >= 6
        {
            return;
        }

        self.set_game_audio_values(audio::BONK_GOPHER);
        self.increment_score(POINTS_BONK_GOPHER);

        self.mem[field::GOPHER_HORIZ_POS] = INIT_GOPHER_HORIZ_POS - 4;
        self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] =
            self.mem[field::RANDOM] & (GOPHER_HORIZ_DIR_MASK | GOPHER_TUNNEL_TARGET_MASK);
        self.mem[field::GOPHER_VERT_MOVEMENT_VALUES] = 0;
        self.mem[field::GOPHER_VERT_POS] = 0;
        self.mem[field::GOPHER_TAUNT_TIMER] = 0;
    }

    pub(crate) fn update_gopher_taunt_logic(&mut self) {
        if self.mem[field::GOPHER_VERT_POS] == VERT_POS_GOPHER_TAUNTING {
            if self.mem[field::GOPHER_TAUNT_TIMER] != 0 {
                self.mem[field::GOPHER_TAUNT_TIMER] -= 1;
            } else {
                self.set_game_audio_values(audio::GOPHER_TAUNT);
                self.mem[field::GOPHER_TAUNT_TIMER] = 28;
            }
        }

        if self.mem[field::GOPHER_TAUNT_TIMER] != 0 {
            self.set_taunting_gopher_facing_direction();
        }
    }

    fn set_taunting_gopher_facing_direction(&mut self) {
        if self.mem[field::FARMER_HORIZ_POS] <= self.mem[field::GOPHER_HORIZ_POS] {
            if self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] & GOPHER_HORIZ_DIR_MASK == 0 {
                // Turn to face left.
                self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] |= GOPHER_HORIZ_DIR_MASK;
                self.mem[field::GOPHER_REFLECT_STATE] = NO_REFLECT;
                self.mem[field::GOPHER_HORIZ_POS] -= 1;
            }
        } else if self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] & GOPHER_HORIZ_DIR_MASK != 0 {
            // Turn to face right.
            self.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] &= alu::flip(GOPHER_HORIZ_DIR_MASK);
            self.mem[field::GOPHER_HORIZ_POS] += 1;
            self.mem[field::GOPHER_REFLECT_STATE] = REFLECT;
        }
    }

    /// Select the three zone sprites, overlay the taunt frames, then run
    /// the crawl animation whose result is the frame's carry.
    pub(crate) fn update_gopher_animation(&mut self) -> u8 {
        self.update_gopher_01_sprite();
        self.update_gopher_00_sprite();
        self.update_gopher_02_sprite();

        if self.mem[field::GOPHER_TAUNT_TIMER] != 0 {
            self.animate_taunting_gopher();
        }

        self.animate_crawling_gopher()
    }

    fn update_gopher_01_sprite(&mut self) {
        let y_pos = self.mem[field::GOPHER_VERT_POS];

        if y_pos == VERT_POS_GOPHER_ABOVE_GROUND || y_pos < VERT_POS_GOPHER_UNDERGROUND + 7 {
            self.render.gopher_01 = GopherZone01::NullSprite;
        } else {
            self.render.gopher_01 = GopherZone01::RisingSprite;
            self.render.gopher_rising_px_start = y_pos;
        }
    }

    fn update_gopher_00_sprite(&mut self) {
        if self.mem[field::GOPHER_VERT_POS] == VERT_POS_GOPHER_UNDERGROUND {
            self.render.gopher_00 = GopherZone00::NullSprite;
            return;
        }

        if self.mem[field::GOPHER_VERT_POS] == VERT_POS_GOPHER_ABOVE_GROUND {
            self.render.gopher_00 = GopherZone00::Running00;
            return;
        }

        self.render.gopher_00 = match self.render.gopher_01 {
            GopherZone01::NullSprite => GopherZone00::NullRunning,
            GopherZone01::RisingSprite => GopherZone00::RisingSpriteMatching,
        };
    }

    fn update_gopher_02_sprite(&mut self) {
        let y_pos = self.mem[field::GOPHER_VERT_POS];

        if y_pos < VERT_POS_GOPHER_UNDERGROUND + 7 {
            self.render.gopher_02 = GopherZone02::Running00;
        } else if y_pos >= VERT_POS_GOPHER_ABOVE_GROUND - 13 {
            self.render.gopher_02 = GopherZone02::NullSprite;
        } else {
            // Zone 01 always shows the rising sprite in this band.
            match self.render.gopher_01 {
                GopherZone01::RisingSprite => {
                    self.render.gopher_02 = GopherZone02::RisingSpriteMatching;
                }
                GopherZone01::NullSprite => {
                    panic!("zone 01 sprite empty while the gopher is mid-climb")
                }
            }
        }
    }

    fn animate_taunting_gopher(&mut self) {
        let timer = self.mem[field::GOPHER_TAUNT_TIMER];
        self.render.gopher_00 = if timer < 7 {
            GopherZone00::TauntSprite01
        } else if timer < 14 {
            GopherZone00::TauntSprite00
        } else if timer < 21 {
            GopherZone00::TauntSprite01
        } else {
            GopherZone00::TauntSprite00
        };
    }

    /// Alternate the running frame while the gopher travels on the
    /// surface or in the tunnel. Returns the frame's terminal carry.
    fn animate_crawling_gopher(&mut self) -> u8 {
        let y_pos = self.mem[field::GOPHER_VERT_POS];

        if y_pos != VERT_POS_GOPHER_UNDERGROUND && y_pos != VERT_POS_GOPHER_ABOVE_GROUND {
            return 0;
        }

        if self.mem[field::FRAME_COUNT] & 3 == 0 {
            self.mem[field::GOPHER_HORIZ_ANIMATION_RATE] =
                alu::flip(self.mem[field::GOPHER_HORIZ_ANIMATION_RATE]);
        }

        if self.mem[field::GOPHER_HORIZ_ANIMATION_RATE] == 0 {
            return (y_pos != VERT_POS_GOPHER_UNDERGROUND) as u8;
        }

        if y_pos != VERT_POS_GOPHER_UNDERGROUND {
            self.render.gopher_00 = GopherZone00::Running01;
        } else {
            self.render.gopher_02 = GopherZone02::Running01;
        }

        1
    }
}
