//! Colors for game elements

/// 8-bit RGB color with alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Translucent wash drawn over the previous frame (motion trails)
pub const BACKGROUND_FADE: Color = Color::rgba(0, 0, 30, 0.1);
pub const STAR: Color = Color::rgba(255, 255, 255, 0.8);
pub const PLAYER: Color = Color::rgb(0x00, 0xf2, 0xfe);
pub const PLAYER_SHIELDED: Color = Color::rgb(0x4f, 0xac, 0xfe);
pub const SHIELD_RING: Color = Color::rgb(0x4f, 0xac, 0xfe);
pub const ENEMY: Color = Color::rgb(0xff, 0x6b, 0x6b);
pub const PROJECTILE: Color = Color::rgb(0xff, 0xd7, 0x00);
pub const COIN: Color = Color::rgb(0xff, 0xd7, 0x00);
pub const POWER_UP: Color = Color::rgb(0x4c, 0xaf, 0x50);
pub const EXPLOSION: Color = Color::rgb(0xff, 0x6b, 0x6b);
pub const SPARKLE: Color = Color::rgb(0xff, 0xd7, 0x00);
