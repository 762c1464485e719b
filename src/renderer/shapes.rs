//! Shape generation for 2D primitives

use glam::Vec2;

use crate::sim::Player;

/// Number of background stars
pub const STAR_COUNT: usize = 50;

/// Rocket outline for the player: nose at top centre, base along the bottom edge
pub fn ship_outline(player: &Player) -> [Vec2; 3] {
    let Vec2 { x, y } = player.pos;
    let Vec2 { x: w, y: h } = player.size;
    [
        Vec2::new(x + w / 2.0, y),
        Vec2::new(x, y + h),
        Vec2::new(x + w, y + h),
    ]
}

/// Scrolling starfield positions at `time_ms`
///
/// Stars are laid out on a fixed lattice and drift downward with time, so no
/// state needs to be kept between frames.
pub fn starfield(width: f32, height: f32, time_ms: f64) -> impl Iterator<Item = Vec2> {
    let scroll = time_ms * 0.1;
    (0..STAR_COUNT).map(move |i| {
        let x = ((i * 123) as f64).rem_euclid(width as f64);
        let y = (i as f64 * 456.0 + scroll).rem_euclid(height as f64);
        Vec2::new(x as f32, y as f32)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Playfield;

    #[test]
    fn test_ship_outline() {
        let mut player = Player::new(&Playfield::default(), 5.0);
        player.pos = Vec2::new(10.0, 20.0);
        let [nose, left, right] = ship_outline(&player);
        assert_eq!(nose, Vec2::new(25.0, 20.0));
        assert_eq!(left, Vec2::new(10.0, 50.0));
        assert_eq!(right, Vec2::new(40.0, 50.0));
    }

    #[test]
    fn test_starfield_stays_on_screen() {
        for time in [0.0, 1234.5, 9_999_999.0] {
            let stars: Vec<_> = starfield(350.0, 500.0, time).collect();
            assert_eq!(stars.len(), STAR_COUNT);
            for star in stars {
                assert!(star.x >= 0.0 && star.x < 350.0);
                assert!(star.y >= 0.0 && star.y < 500.0);
            }
        }
    }
}
