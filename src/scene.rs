use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};

/// Scale advance per animated frame; a full sweep from 1.0 to 2.0 takes
/// 180 frames.
const SCALE_STEP: f32 = 1.0 / 180.0;

/// The fixed per-frame drawing operation: paint the background, then fill
/// a circle at the surface center through a translate/scale transform.
pub struct CircleScene {
    cx: f32,
    cy: f32,
    radius: f32,
    scale: f32,
    animate: bool,
    background: Color,
    fill: Color,
}

impl CircleScene {
    /// Solid red circle on green, radius a quarter of the width.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cx: width as f32 / 2.0,
            cy: height as f32 / 2.0,
            radius: width as f32 / 4.0,
            scale: 1.0,
            animate: false,
            background: Color::from_rgba8(0, 255, 0, 255),
            fill: Color::from_rgba8(255, 0, 0, 255),
        }
    }

    /// Translucent overlay circle, same geometry.
    pub fn overlay(width: u32, height: u32) -> Self {
        Self {
            fill: Color::from_rgba8(255, 0, 128, 128),
            ..Self::new(width, height)
        }
    }

    /// Circle whose scale grows by 1/180 per frame and wraps from 2.0 back
    /// to 1.0.
    pub fn animated(width: u32, height: u32) -> Self {
        Self {
            animate: true,
            ..Self::new(width, height)
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn draw(&mut self, pixmap: &mut Pixmap) {
        pixmap.fill(self.background);

        let mut paint = Paint::default();
        paint.set_color(self.fill);
        paint.anti_alias = true;

        // The path is rebuilt every frame on purpose: circle construction
        // is part of the measured workload.
        if let Some(path) = PathBuilder::from_circle(0.0, 0.0, self.radius) {
            let transform =
                Transform::from_translate(self.cx, self.cy).pre_scale(self.scale, self.scale);
            pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
        }

        if self.animate {
            self.scale += SCALE_STEP;
            if self.scale >= 2.0 {
                self.scale = 1.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let p = pixmap.pixel(x, y).unwrap();
        (p.red(), p.green(), p.blue(), p.alpha())
    }

    #[test]
    fn paints_background_and_centered_circle() {
        let mut scene = CircleScene::new(64, 64);
        let mut pixmap = Pixmap::new(64, 64).unwrap();
        scene.draw(&mut pixmap);

        // Corner is untouched background.
        assert_eq!(pixel(&pixmap, 0, 0), (0, 255, 0, 255));
        // Center is inside the filled circle.
        assert_eq!(pixel(&pixmap, 32, 32), (255, 0, 0, 255));
        // Outside the circle (radius 16), still background.
        assert_eq!(pixel(&pixmap, 32, 8), (0, 255, 0, 255));
    }

    #[test]
    fn overlay_circle_blends_with_the_background() {
        let mut scene = CircleScene::overlay(64, 64);
        let mut pixmap = Pixmap::new(64, 64).unwrap();
        scene.draw(&mut pixmap);

        let (r, g, _, a) = pixel(&pixmap, 32, 32);
        // Translucent fill over the green background keeps both channels.
        assert!(r > 0);
        assert!(g > 0);
        assert_eq!(a, 255);
    }

    #[test]
    fn static_scene_does_not_animate() {
        let mut scene = CircleScene::new(64, 64);
        let mut pixmap = Pixmap::new(64, 64).unwrap();
        for _ in 0..10 {
            scene.draw(&mut pixmap);
        }
        assert_eq!(scene.scale(), 1.0);
    }

    #[test]
    fn animated_scale_advances_and_wraps() {
        let mut scene = CircleScene::animated(64, 64);
        let mut pixmap = Pixmap::new(64, 64).unwrap();

        scene.draw(&mut pixmap);
        assert!(scene.scale() > 1.0);

        for _ in 0..400 {
            scene.draw(&mut pixmap);
            assert!(scene.scale() >= 1.0);
            assert!(scene.scale() < 2.0);
        }
    }

    #[test]
    fn growing_circle_covers_more_pixels() {
        let mut scene = CircleScene::animated(64, 64);
        let mut pixmap = Pixmap::new(64, 64).unwrap();

        scene.draw(&mut pixmap);
        // Point just outside the initial radius of 16.
        assert_eq!(pixel(&pixmap, 32 + 18, 32), (0, 255, 0, 255));

        for _ in 0..90 {
            scene.draw(&mut pixmap);
        }
        // Scale is now ~1.5, the same point is covered.
        assert_eq!(pixel(&pixmap, 32 + 18, 32), (255, 0, 0, 255));
    }
}
