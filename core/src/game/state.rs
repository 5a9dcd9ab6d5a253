//! Game state dispatch and the non-entity state handlers.
//!
//! Every handler terminates the frame by returning the carry the
//! cartridge's display kernel would inherit, so the dispatch result is the
//! machine's next inter-frame carry.

use crate::alu;
use crate::mem::field;

use super::audio;
use super::input::ACTION_MASK;
use super::render::{DigitGraphic, DuckFace, DuckWing, FarmerSprite};
use super::render::{GopherZone00, GopherZone01, GopherZone02};
use super::{
    ACTIVE_PLAYER_MASK, DISABLE_SEED, GAME_SELECTION_MASK, GameState, Gopher,
    INIT_FARMER_HORIZ_POS, INIT_GOPHER_HORIZ_POS, MAX_GAME_SELECTION, WAIT_TIME_CARROT_STOLEN,
    WAIT_TIME_DISPLAY_COPYRIGHT, WAIT_TIME_GAME_START,
};

impl Gopher {
    /// Dispatch on the `gameState` byte. The left shift exists only to
    /// produce the carry some handlers take; the state never exceeds 15,
    /// so that carry is always 0.
    pub(crate) fn update_game_state(&mut self) -> u8 {
        let gs = self.mem[field::GAME_STATE];
        let (_, carry) = alu::shift_left_with_carry(gs);
        debug_assert_eq!(carry, 0);

        match GameState::from_byte(gs) {
            GameState::DisplayCopyright => self.display_copyright_information(),
            GameState::DisplayCopyrightWait
            | GameState::DisplayCompanyWait
            | GameState::PauseGameState => self.advance_game_state_after_frame_count_expire(),
            GameState::DisplayCompany => self.display_company_information(),
            GameState::ResetPlayerVariables => self.reset_player_variables(carry),
            GameState::DisplayGameSelection => self.display_game_selection(),
            GameState::MainGameLoop => self.update_main_game_loop(),
            GameState::GopherStoleCarrot => self.carrot_stolen_by_gopher(),
            GameState::DuckWait => self.wait_for_duck_to_advance_game_state(),
            GameState::InitGameForAlternatePlayer | GameState::InitGameForGameOver => {
                self.init_game_round_data(carry)
            }
            GameState::AlternatePlayers => self.check_to_alternate_players(),
            GameState::DisplayPlayerNumber => self.display_player_number_information(),
            GameState::PauseForActionButton => self.wait_for_action_button_to_start_round(),
            GameState::WaitForNewGame => self.wait_to_start_new_game(),
        }
    }

    pub(crate) fn advance_current_game_state(&mut self, carry: u8) -> u8 {
        self.mem[field::GAME_STATE] = self.mem[field::GAME_STATE].wrapping_add(1);
        carry
    }

    fn advance_game_state_after_frame_count_expire(&mut self) -> u8 {
        if self.mem[field::FRAME_COUNT] != 255 {
            return 0;
        }
        self.advance_current_game_state(1)
    }

    fn display_copyright_information(&mut self) -> u8 {
        self.render.digit_graphic = DigitGraphic::Copyright;
        self.mem[field::FRAME_COUNT] = WAIT_TIME_DISPLAY_COPYRIGHT;
        self.reset_player_variables(1)
    }

    fn display_company_information(&mut self) -> u8 {
        self.render.digit_graphic = DigitGraphic::Company;
        self.reset_player_variables(1)
    }

    fn reset_player_variables(&mut self, carry: u8) -> u8 {
        self.mem
            .clear_run(field::PLAYER_INFORMATION_VALUES, field::PLAYER_INFORMATION_SIZE);

        self.mem[field::CARROT_PATTERN] = 7;
        self.mem[field::RESERVED_CARROT_PATTERN] = 7;
        self.mem[field::INIT_GOPHER_CHANGE_DIRECTION_TIMER] = 15;
        self.mem[field::RESERVED_GOPHER_CHANGE_DIRECTION_TIMER] = 15;

        self.init_game_round_data(carry)
    }

    pub(crate) fn init_game_round_data(&mut self, carry: u8) -> u8 {
        self.render.duck_wings = DuckWing::Disabled;
        self.render.duck_face = DuckFace::Disabled;
        self.mem[field::FALLING_SEED_VERT_POS] = DISABLE_SEED;
        self.render.farmer = FarmerSprite::Sprite00;
        self.render.gopher_00 = GopherZone00::NullRunning;
        self.render.gopher_01 = GopherZone01::NullSprite;
        self.render.gopher_02 = GopherZone02::Running00;

        self.mem[field::FARMER_HORIZ_POS] = INIT_FARMER_HORIZ_POS;
        self.mem[field::GOPHER_HORIZ_POS] = INIT_GOPHER_HORIZ_POS;
        self.mem[field::DUCK_HORIZ_POS] = INIT_GOPHER_HORIZ_POS;
        self.mem[field::GOPHER_CHANGE_DIRECTION_TIMER] =
            self.mem[field::INIT_GOPHER_CHANGE_DIRECTION_TIMER];
        self.mem[field::GOPHER_VERT_POS] = 0;
        self.mem[field::GOPHER_REFLECT_STATE] = 0;
        self.mem[field::HELD_SEED_DECAYING_TIMER] = 0;
        self.mem[field::DUCK_ANIMATION_TIMER] = 0;

        self.init_garden_dirt_values(carry)
    }

    fn display_game_selection(&mut self) -> u8 {
        self.render.digit_graphic = DigitGraphic::GameSelection;

        if self.input.swchb & super::input::SELECT_MASK != 0 {
            return self.select_button_not_pressed();
        }

        if self.mem[field::SELECT_DEBOUNCE] != 0 {
            // Select still held from the previous frame.
            return 0;
        }

        let carry = (self.mem[field::GAME_SELECTION] == MAX_GAME_SELECTION) as u8;
        self.mem[field::GAME_SELECTION] =
            self.mem[field::GAME_SELECTION].wrapping_add(1) % (MAX_GAME_SELECTION + 1);
        self.mem[field::SELECT_DEBOUNCE] = 0xFF;

        carry
    }

    fn select_button_not_pressed(&mut self) -> u8 {
        self.mem[field::SELECT_DEBOUNCE] = 0;

        if alu::is_negative(self.input.intpt4) {
            // Fire not pressed, keep showing the selection.
            return 0;
        }

        self.set_game_audio_values(audio::STARTING_THEME_00);
        self.set_game_audio_values(audio::STARTING_THEME_01);

        self.mem[field::FRAME_COUNT] = WAIT_TIME_GAME_START;

        self.advance_current_game_state(0)
    }

    fn display_player_number_information(&mut self) -> u8 {
        if self.is_single_player_game() {
            return self.advance_current_game_state(0);
        }

        self.render.digit_graphic = DigitGraphic::PlayerNumber;
        self.advance_current_game_state(self.is_second_player_active() as u8)
    }

    fn update_main_game_loop(&mut self) -> u8 {
        self.update_farmer_movement();

        match self.update_gopher_movement() {
            // A stolen carrot already advanced the state and ended the
            // frame; bonking is never checked on that path.
            Some(carry) => carry,
            None => {
                self.check_for_farmer_bonking_gopher();
                self.update_gopher_taunt_logic();
                self.update_gopher_animation()
            }
        }
    }

    pub(crate) fn carrot_stolen_by_gopher(&mut self) -> u8 {
        self.render.gopher_00 = GopherZone00::NullSprite;
        self.render.gopher_01 = GopherZone01::NullSprite;
        self.render.gopher_02 = GopherZone02::NullSprite;

        self.mem[field::FRAME_COUNT] = WAIT_TIME_CARROT_STOLEN;
        self.set_game_audio_values(audio::STOLEN_CARROT);
        self.advance_current_game_state(0)
    }

    fn wait_for_duck_to_advance_game_state(&mut self) -> u8 {
        if self.mem[field::DUCK_ANIMATION_TIMER] != 0 {
            return 0;
        }
        self.advance_game_state_after_frame_count_expire()
    }

    fn wait_for_action_button_to_start_round(&mut self) -> u8 {
        if self.mem[field::CARROT_PATTERN] == 0 {
            // No carrots left for this player.
            return self.advance_current_game_state(0);
        }

        let action_button = if self.is_second_player_active() {
            self.input.intpt5
        } else {
            self.input.intpt4
        } & ACTION_MASK;
        if action_button == 0 {
            self.mem[field::GAME_STATE] = GameState::MainGameLoop as u8;
        }

        0
    }

    fn wait_to_start_new_game(&mut self) -> u8 {
        // The cartridge indexes the tune table with the RAM address of the
        // audio index, not the byte stored there. That entry is never 0,
        // so this branch is taken every frame; kept as observed.
        if audio::AUDIO_VALUES[field::AUDIO_INDEX_VALUES] != 0
            || self.input.intpt4 & ACTION_MASK != 0
        {
            return self.decrement_current_game_state();
        }

        self.init_player_information_values()
    }

    fn init_player_information_values(&mut self) -> u8 {
        self.mem
            .clear_run(field::PLAYER_INFORMATION_VALUES, field::PLAYER_INFORMATION_SIZE);

        self.mem[field::CARROT_PATTERN] = 7;
        self.mem[field::RESERVED_CARROT_PATTERN] = 7;
        self.mem[field::INIT_GOPHER_CHANGE_DIRECTION_TIMER] = 15;
        self.mem[field::RESERVED_GOPHER_CHANGE_DIRECTION_TIMER] = 15;
        self.mem[field::GAME_SELECTION] &= GAME_SELECTION_MASK;
        self.mem[field::FRAME_COUNT] = WAIT_TIME_GAME_START;
        self.mem[field::GAME_STATE] = GameState::DisplayGameSelection as u8;

        self.set_game_audio_values(audio::STARTING_THEME_00);
        self.set_game_audio_values(audio::STARTING_THEME_01);

        self.init_game_round_data(0)
    }

    /// Walks the game-over screen back to the player-number display every
    /// 256 frames so a two-player game alternates the shown score.
    fn decrement_current_game_state(&mut self) -> u8 {
        let carry = (self.mem[field::FRAME_COUNT] >= 128) as u8;
        if self.mem[field::FRAME_COUNT] != 128 {
            return carry;
        }

        if self.is_single_player_game() {
            return carry;
        }

        self.mem[field::GAME_STATE] = self.mem[field::GAME_STATE].wrapping_sub(1);
        self.alternate_player_information(carry)
    }

    fn check_to_alternate_players(&mut self) -> u8 {
        if self.is_single_player_game() {
            return self.check_for_game_over_state();
        }

        if self.mem[field::RESERVED_CARROT_PATTERN] != 0 {
            // The other player still has carrots.
            return self.alternate_player_information(0);
        }

        self.check_for_game_over_state()
    }

    fn check_for_game_over_state(&mut self) -> u8 {
        if self.mem[field::CARROT_PATTERN] != 0 {
            return self.advance_current_game_state(0);
        }

        self.set_game_audio_values(audio::GAME_OVER_THEME_00);
        self.set_game_audio_values(audio::GAME_OVER_THEME_01);

        self.mem[field::GAME_STATE] = GameState::WaitForNewGame as u8;
        0
    }

    /// Swap the score and timer-seed bytes of the two player blocks; the
    /// carrot patterns stay in place, matching the original swap loop.
    fn alternate_player_information(&mut self, carry: u8) -> u8 {
        if !self.is_single_player_game() {
            self.mem[field::GAME_SELECTION] ^= ACTIVE_PLAYER_MASK;

            for offset in 0..4 {
                self.mem.swap(
                    field::PLAYER_INFORMATION_VALUES + offset,
                    field::RESERVED_PLAYER_INFORMATION + offset,
                );
            }
        }

        self.advance_current_game_state(carry)
    }
}
