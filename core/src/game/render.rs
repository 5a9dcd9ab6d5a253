//! Sprite selections the display kernel would draw from.
//!
//! The logic core never touches pixels; it only decides which graphic each
//! screen zone shows. These enums are that decision, one value per zone.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuckWing {
    Disabled,
    Stationary,
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuckFace {
    Disabled,
    Face,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FarmerSprite {
    Sprite00,
    Sprite01,
    Sprite02,
}

/// Top gopher zone: running/taunting graphics above ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GopherZone00 {
    NullRunning,
    NullSprite,
    RisingSpriteMatching,
    Running00,
    Running01,
    TauntSprite00,
    TauntSprite01,
}

/// Middle gopher zone: the rising sprite while climbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GopherZone01 {
    NullSprite,
    RisingSprite,
}

/// Bottom gopher zone: the underground tunnel graphics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GopherZone02 {
    NullSprite,
    Running00,
    Running01,
    RisingSpriteMatching,
}

/// Which full-screen digit graphic the score line shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitGraphic {
    Copyright,
    Company,
    GameSelection,
    PlayerNumber,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    pub duck_wings: DuckWing,
    pub duck_face: DuckFace,
    pub farmer: FarmerSprite,
    pub digit_graphic: DigitGraphic,
    /// First scanline of the rising sprite while `gopher_01` shows it.
    pub gopher_rising_px_start: u8,
    pub gopher_00: GopherZone00,
    pub gopher_01: GopherZone01,
    pub gopher_02: GopherZone02,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            duck_wings: DuckWing::Disabled,
            duck_face: DuckFace::Disabled,
            farmer: FarmerSprite::Sprite00,
            digit_graphic: DigitGraphic::Copyright,
            gopher_rising_px_start: 0,
            gopher_00: GopherZone00::NullRunning,
            gopher_01: GopherZone01::NullSprite,
            gopher_02: GopherZone02::Running00,
        }
    }
}
