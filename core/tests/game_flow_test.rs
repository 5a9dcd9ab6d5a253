use burrow_core::game::audio;
use burrow_core::game::input;
use burrow_core::prelude::*;

// =============================================================================
// Reset sequence
// =============================================================================

#[test]
fn test_reset_lands_one_frame_into_the_main_loop() {
    let mut game = Gopher::new();
    game.reset(0, 0);

    assert_eq!(game.game_state(), GameState::MainGameLoop);
    assert_eq!(game.mem[field::FRAME_COUNT], 255);
}

#[test]
fn test_reset_round_data() {
    let mut game = Gopher::new();
    game.reset(0, 0);

    assert_eq!(game.mem[field::FARMER_HORIZ_POS], 83);
    assert_eq!(game.mem[field::GOPHER_HORIZ_POS], 147);
    assert_eq!(game.mem[field::DUCK_HORIZ_POS], 147);
    assert_eq!(game.mem[field::GOPHER_VERT_POS], 0);
    assert_eq!(game.mem[field::FALLING_SEED_VERT_POS], 128);

    assert_eq!(game.mem[field::CARROT_PATTERN], 7);
    assert_eq!(game.mem[field::RESERVED_CARROT_PATTERN], 7);
    assert_eq!(game.mem[field::INIT_GOPHER_CHANGE_DIRECTION_TIMER], 15);

    // Score starts blank.
    assert_eq!(game.mem[field::CURRENT_PLAYER_SCORE], 0);
    assert_eq!(game.mem[field::CURRENT_PLAYER_SCORE + 1], 0);
    assert_eq!(game.mem[field::CURRENT_PLAYER_SCORE + 2], 0);
}

#[test]
fn test_reset_garden_has_only_the_edge_tunnels_open() {
    let mut game = Gopher::new();
    game.reset(0, 0);

    for offset in 0..24 {
        let expected = if offset == 18 || offset == 23 { 0xF0 } else { 0 };
        assert_eq!(
            game.mem[field::GARDEN_DIRT_VALUES + offset],
            expected,
            "dirt byte {offset}"
        );
    }
}

#[test]
fn test_reset_selects_the_requested_mode() {
    let mut game = Gopher::new();
    game.reset(0, 2);
    assert_eq!(game.mem[field::GAME_SELECTION], 2);
    assert!(game.is_single_player_game());
    assert!(!game.is_duck_enabled());

    let mut game = Gopher::new();
    game.reset(0, 1);
    assert_eq!(game.mem[field::GAME_SELECTION], 1);
    assert!(!game.is_single_player_game());
    assert!(game.is_duck_enabled());
}

#[test]
fn test_difficulty_bits_drive_the_console_switches() {
    let mut game = Gopher::new();
    game.reset(0, 0);
    assert_eq!(game.input.swchb & input::P0_DIFF_MASK, 0);
    assert_eq!(game.input.swchb & input::P1_DIFF_MASK, 0);

    let mut game = Gopher::new();
    game.reset(3, 0);
    assert_ne!(game.input.swchb & input::P0_DIFF_MASK, 0);
    assert_ne!(game.input.swchb & input::P1_DIFF_MASK, 0);
}

// =============================================================================
// Farmer movement through the joystick
// =============================================================================

/// Reset and pin the gopher in its taunt pose; underground the taunt
/// timer never counts down, so the round cannot end mid-test.
fn reset_with_pinned_gopher() -> Gopher {
    let mut game = Gopher::new();
    game.reset(0, 0);
    game.mem[field::GOPHER_TAUNT_TIMER] = 255;
    game
}

#[test]
fn test_joystick_moves_the_farmer() {
    let mut game = reset_with_pinned_gopher();

    for _ in 0..10 {
        game.tick(Action::Right);
    }
    assert_eq!(game.mem[field::FARMER_HORIZ_POS], 93);

    for _ in 0..20 {
        game.tick(Action::Left);
    }
    assert_eq!(game.mem[field::FARMER_HORIZ_POS], 73);
}

#[test]
fn test_farmer_clamps_at_the_garden_edges() {
    let mut game = reset_with_pinned_gopher();

    for _ in 0..200 {
        game.tick(Action::Right);
    }
    assert_eq!(game.mem[field::FARMER_HORIZ_POS], 148);

    for _ in 0..200 {
        game.tick(Action::Left);
    }
    assert_eq!(game.mem[field::FARMER_HORIZ_POS], 19);
}

// =============================================================================
// Idle timer
// =============================================================================

#[test]
fn test_idled_out_machine_freezes_everything_but_the_frame_counter() {
    let mut game = Gopher::new();
    game.reset(0, 0);
    game.mem[field::GAME_IDLE_TIMER] = 128;

    let random_before = game.mem[field::RANDOM];
    let state_before = game.game_state();
    let frame_before = game.mem[field::FRAME_COUNT];

    game.tick(Action::Noop);

    assert_eq!(game.mem[field::RANDOM], random_before);
    assert_eq!(game.game_state(), state_before);
    assert_eq!(game.mem[field::FRAME_COUNT], frame_before.wrapping_add(1));
}

#[test]
fn test_joystick_input_wakes_an_idle_machine() {
    let mut game = Gopher::new();
    game.reset(0, 0);
    game.mem[field::GAME_IDLE_TIMER] = 128;

    let random_before = game.mem[field::RANDOM];
    game.tick(Action::Left);

    assert_eq!(game.mem[field::GAME_IDLE_TIMER], 0);
    assert_ne!(game.mem[field::RANDOM], random_before);
}

// =============================================================================
// Stolen carrot and the post-steal states
// =============================================================================

fn gopher_about_to_steal() -> Gopher {
    let mut game = Gopher::new();
    game.mem[field::GAME_STATE] = GameState::MainGameLoop as u8;
    game.mem[field::CARROT_PATTERN] = 7;
    game.mem[field::GOPHER_VERT_POS] = 35;
    game.mem[field::GOPHER_HORIZ_POS] = 95;
    // Carrot target bit set, steal index 0.
    game.mem[field::GOPHER_HORIZ_MOVEMENT_VALUES] = 0x08;
    game
}

#[test]
fn test_gopher_on_a_carrot_steals_it() {
    let mut game = gopher_about_to_steal();
    game.tick(Action::Noop);

    assert_eq!(game.mem[field::CARROT_PATTERN], 6);
    assert_eq!(game.game_state(), GameState::GopherStoleCarrot);
}

#[test]
fn test_stolen_carrot_state_queues_the_tune_and_waits() {
    let mut game = gopher_about_to_steal();
    game.tick(Action::Noop);
    game.tick(Action::Noop);

    assert_eq!(game.game_state(), GameState::DuckWait);
    assert_eq!(game.mem[field::FRAME_COUNT], 136);

    let channel = (game.mem[field::AUDIO_CHANNEL_INDEX] & 1) as usize;
    assert_eq!(
        game.mem[field::AUDIO_INDEX_VALUES + channel],
        audio::STOLEN_CARROT + 1
    );
}

#[test]
fn test_duck_wait_advances_when_the_frame_counter_expires() {
    let mut game = Gopher::new();
    game.mem[field::GAME_STATE] = GameState::DuckWait as u8;
    game.mem[field::FRAME_COUNT] = 253;

    game.tick(Action::Noop);
    assert_eq!(game.game_state(), GameState::DuckWait);

    game.tick(Action::Noop);
    assert_eq!(game.game_state(), GameState::InitGameForAlternatePlayer);
}

// =============================================================================
// Round start gate
// =============================================================================

#[test]
fn test_action_button_starts_the_round() {
    let mut game = Gopher::new();
    game.mem[field::GAME_STATE] = GameState::PauseForActionButton as u8;
    game.mem[field::CARROT_PATTERN] = 7;

    game.tick(Action::Noop);
    assert_eq!(game.game_state(), GameState::PauseForActionButton);

    game.tick(Action::Fire);
    assert_eq!(game.game_state(), GameState::MainGameLoop);
}

#[test]
fn test_no_carrots_skips_straight_past_the_gate() {
    let mut game = Gopher::new();
    game.mem[field::GAME_STATE] = GameState::PauseForActionButton as u8;
    game.mem[field::CARROT_PATTERN] = 0;

    game.tick(Action::Noop);
    assert_eq!(game.game_state(), GameState::WaitForNewGame);
}

// =============================================================================
// Game over and two-player alternation
// =============================================================================

#[test]
fn test_out_of_carrots_single_player_is_game_over() {
    let mut game = Gopher::new();
    game.mem[field::GAME_STATE] = GameState::AlternatePlayers as u8;
    game.mem[field::CARROT_PATTERN] = 0;

    game.tick(Action::Noop);

    assert_eq!(game.game_state(), GameState::WaitForNewGame);
    // Both game-over voices queued.
    assert_eq!(
        game.mem[field::AUDIO_INDEX_VALUES + 1],
        audio::GAME_OVER_THEME_00 + 1
    );
    assert_eq!(
        game.mem[field::AUDIO_INDEX_VALUES],
        audio::GAME_OVER_THEME_01 + 1
    );
}

#[test]
fn test_carrots_left_means_the_round_restarts() {
    let mut game = Gopher::new();
    game.mem[field::GAME_STATE] = GameState::AlternatePlayers as u8;
    game.mem[field::CARROT_PATTERN] = 5;

    game.tick(Action::Noop);

    assert_eq!(game.game_state(), GameState::InitGameForGameOver);
}

#[test]
fn test_alternation_swaps_scores_but_not_carrot_patterns() {
    let mut game = Gopher::new();
    game.mem[field::GAME_STATE] = GameState::AlternatePlayers as u8;
    game.mem[field::GAME_SELECTION] = 1; // two players, first active

    game.mem[field::CURRENT_PLAYER_SCORE] = 0x01;
    game.mem[field::CURRENT_PLAYER_SCORE + 1] = 0x02;
    game.mem[field::CURRENT_PLAYER_SCORE + 2] = 0x03;
    game.mem[field::INIT_GOPHER_CHANGE_DIRECTION_TIMER] = 4;
    game.mem[field::CARROT_PATTERN] = 0;

    game.mem[field::RESERVED_PLAYER_SCORE] = 0x05;
    game.mem[field::RESERVED_PLAYER_SCORE + 1] = 0x06;
    game.mem[field::RESERVED_PLAYER_SCORE + 2] = 0x07;
    game.mem[field::RESERVED_GOPHER_CHANGE_DIRECTION_TIMER] = 8;
    game.mem[field::RESERVED_CARROT_PATTERN] = 5;

    game.tick(Action::Noop);

    assert_eq!(game.mem[field::GAME_SELECTION], 0xF1);
    assert!(game.is_second_player_active());

    assert_eq!(game.mem[field::CURRENT_PLAYER_SCORE], 0x05);
    assert_eq!(game.mem[field::CURRENT_PLAYER_SCORE + 1], 0x06);
    assert_eq!(game.mem[field::CURRENT_PLAYER_SCORE + 2], 0x07);
    assert_eq!(game.mem[field::INIT_GOPHER_CHANGE_DIRECTION_TIMER], 8);
    assert_eq!(game.mem[field::RESERVED_PLAYER_SCORE], 0x01);
    assert_eq!(game.mem[field::RESERVED_GOPHER_CHANGE_DIRECTION_TIMER], 4);

    // Carrot patterns stay with their slots.
    assert_eq!(game.mem[field::CARROT_PATTERN], 0);
    assert_eq!(game.mem[field::RESERVED_CARROT_PATTERN], 5);

    assert_eq!(game.game_state(), GameState::InitGameForGameOver);
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_two_machines_fed_the_same_actions_agree() {
    let mut a = Gopher::new();
    let mut b = Gopher::new();
    a.reset(0, 0);
    b.reset(0, 0);

    let script = [
        Action::Right,
        Action::Right,
        Action::Fire,
        Action::Noop,
        Action::Left,
        Action::LeftFire,
        Action::Noop,
        Action::RightFire,
    ];
    for frame in 0..2000 {
        let action = script[frame % script.len()];
        a.tick(action);
        b.tick(action);
    }

    assert_eq!(a.mem.as_bytes(), b.mem.as_bytes());
    assert_eq!(a.carry(), b.carry());
}
