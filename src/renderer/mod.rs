//! Render stage
//!
//! Draws a `GameState` onto anything implementing [`Surface`]. The browser build
//! backs it with a Canvas 2D context; headless runs and tests record commands
//! into a [`CommandBuffer`].

pub mod colors;
pub mod shapes;

use glam::Vec2;

use crate::consts::SHIELD_RADIUS;
use crate::sim::{GameState, ParticleTint};
use colors::Color;

/// Particle square size
const PARTICLE_SIZE: f32 = 4.0;
/// Shield ring stroke width
const SHIELD_LINE_WIDTH: f32 = 3.0;

/// A 2D drawing surface in playfield coordinates
pub trait Surface {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);
    fn set_alpha(&mut self, alpha: f32);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { pos: Vec2, size: Vec2, color: Color },
    FillPolygon { points: Vec<Vec2>, color: Color },
    StrokeCircle { center: Vec2, radius: f32, line_width: f32, color: Color },
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
    SetAlpha(f32),
}

/// Surface that records draw calls instead of rasterizing them
#[derive(Debug, Default)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Filled rects drawn with the given color
    pub fn rects_with(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { color: fill, .. } if *fill == color))
            .count()
    }
}

impl Surface for CommandBuffer {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect { pos, size, color });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            line_width,
            color,
        });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, angle: f32) {
        self.commands.push(DrawCommand::Rotate(angle));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::SetAlpha(alpha));
    }
}

/// Draw one frame. Layering: background, stars, player, enemies, projectiles,
/// coins, power-ups, particles.
pub fn render<S: Surface + ?Sized>(state: &GameState, surface: &mut S, time_ms: f64) {
    let field = state.playfield;

    // Fade the previous frame instead of clearing it
    surface.fill_rect(
        Vec2::ZERO,
        Vec2::new(field.width, field.height),
        colors::BACKGROUND_FADE,
    );

    for star in shapes::starfield(field.width, field.height, time_ms) {
        surface.fill_rect(star, Vec2::ONE, colors::STAR);
    }

    draw_player(state, surface);

    for enemy in &state.enemies {
        surface.fill_rect(enemy.pos, enemy.size, colors::ENEMY);
    }
    for projectile in &state.projectiles {
        surface.fill_rect(projectile.pos, projectile.size, colors::PROJECTILE);
    }
    for coin in &state.coins {
        let half = coin.size / 2.0;
        surface.save();
        surface.translate(coin.pos + half);
        surface.rotate(coin.rotation);
        surface.fill_rect(-half, coin.size, colors::COIN);
        surface.restore();
    }
    for power_up in &state.power_ups {
        surface.fill_rect(power_up.pos, power_up.size, colors::POWER_UP);
    }

    for particle in &state.particles {
        let color = match particle.tint {
            ParticleTint::Explosion => colors::EXPLOSION,
            ParticleTint::Sparkle => colors::SPARKLE,
        };
        surface.set_alpha(particle.life.clamp(0.0, 1.0));
        surface.fill_rect(
            particle.pos - Vec2::splat(PARTICLE_SIZE / 2.0),
            Vec2::splat(PARTICLE_SIZE),
            color,
        );
    }
    if !state.particles.is_empty() {
        surface.set_alpha(1.0);
    }
}

fn draw_player<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    let player = &state.player;
    let color = if player.shield {
        colors::PLAYER_SHIELDED
    } else {
        colors::PLAYER
    };
    surface.fill_rect(player.pos, player.size, color);
    surface.fill_polygon(&shapes::ship_outline(player), color);

    if player.shield {
        surface.stroke_circle(
            player.center(),
            SHIELD_RADIUS,
            SHIELD_LINE_WIDTH,
            colors::SHIELD_RING,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Coin, Particle, Playfield, PowerUpKind};

    fn started() -> GameState {
        let mut state = GameState::new(3, Playfield::default());
        state.start();
        state
    }

    #[test]
    fn test_empty_frame() {
        let state = started();
        let mut buffer = CommandBuffer::new();
        render(&state, &mut buffer, 0.0);

        // Background + stars + player rect + player triangle
        assert_eq!(buffer.commands.len(), 1 + shapes::STAR_COUNT + 2);
        assert_eq!(buffer.rects_with(colors::STAR), shapes::STAR_COUNT);
        assert!(matches!(
            buffer.commands[0],
            DrawCommand::FillRect { color, .. } if color == colors::BACKGROUND_FADE
        ));
    }

    #[test]
    fn test_shield_ring_drawn_only_when_shielded() {
        let mut state = started();
        let mut buffer = CommandBuffer::new();
        render(&state, &mut buffer, 0.0);
        let rings = |b: &CommandBuffer| {
            b.commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::StrokeCircle { .. }))
                .count()
        };
        assert_eq!(rings(&buffer), 0);

        state.use_power_up(PowerUpKind::Shield);
        buffer.clear();
        render(&state, &mut buffer, 0.0);
        assert_eq!(rings(&buffer), 1);
        assert_eq!(buffer.rects_with(colors::PLAYER_SHIELDED), 1);
    }

    #[test]
    fn test_coin_drawn_rotated_about_center() {
        let mut state = started();
        state.coins.push(Coin {
            pos: Vec2::new(100.0, 100.0),
            size: Vec2::splat(20.0),
            speed: 2.0,
            rotation: 0.5,
        });
        let mut buffer = CommandBuffer::new();
        render(&state, &mut buffer, 0.0);

        let start = buffer
            .commands
            .iter()
            .position(|c| *c == DrawCommand::Save)
            .unwrap();
        assert_eq!(
            buffer.commands[start..start + 5],
            [
                DrawCommand::Save,
                DrawCommand::Translate(Vec2::new(110.0, 110.0)),
                DrawCommand::Rotate(0.5),
                DrawCommand::FillRect {
                    pos: Vec2::new(-10.0, -10.0),
                    size: Vec2::splat(20.0),
                    color: colors::COIN,
                },
                DrawCommand::Restore,
            ]
        );
    }

    #[test]
    fn test_particles_fade_and_alpha_resets() {
        let mut state = started();
        state.particles.push(Particle {
            pos: Vec2::new(50.0, 50.0),
            vel: Vec2::ZERO,
            life: 0.4,
            tint: ParticleTint::Sparkle,
        });
        let mut buffer = CommandBuffer::new();
        render(&state, &mut buffer, 0.0);

        assert!(buffer.commands.contains(&DrawCommand::SetAlpha(0.4)));
        assert_eq!(buffer.commands.last(), Some(&DrawCommand::SetAlpha(1.0)));
        assert!(buffer.commands.contains(&DrawCommand::FillRect {
            pos: Vec2::new(48.0, 48.0),
            size: Vec2::splat(4.0),
            color: colors::SPARKLE,
        }));
    }
}
