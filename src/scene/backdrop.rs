//! Animated backdrop drawn behind every state

use crate::raster::FrameBuffer;
use crate::rgb;

/// Pulsing background with drifting scanline bands and, during gameplay,
/// a center-line light sweep. Keeps its own clock so menus and frozen
/// states can keep animating.
#[derive(Debug, Default, Clone)]
pub struct Backdrop {
    total_time: f32,
}

impl Backdrop {
    /// Gameplay variant: background, bands, and the light sweep
    pub fn draw(&mut self, dt: f32, frame: &mut FrameBuffer) {
        self.total_time += dt;
        self.draw_base(frame);
        self.draw_light_sweep(frame);
    }

    /// Menu variant: background and bands only
    pub fn draw_simple(&mut self, dt: f32, frame: &mut FrameBuffer) {
        self.total_time += dt;
        self.draw_base(frame);
    }

    fn draw_base(&self, frame: &mut FrameBuffer) {
        let pulse = 0.5 + 0.5 * (self.total_time * 0.5).sin();
        let brightness = 0.4 + 0.4 * pulse;
        let color = rgb(
            (0x30 as f32 * brightness) as u32,
            (0x30 as f32 * brightness) as u32,
            (0x50 as f32 * brightness) as u32,
        );
        frame.clear(color);

        let offset = (self.total_time * 0.5).sin() * 20.0;
        for i in 0..=10 {
            let band_color = if i % 2 == 0 { 0x00282838 } else { 0x00202030 };
            frame.fill_rect(0.0, (i - 5) as f32 * 20.0 + offset, 60.0, 10.0, band_color);
        }
    }

    fn draw_light_sweep(&self, frame: &mut FrameBuffer) {
        let pulse = 0.5 + 0.5 * (self.total_time * 2.0).sin();
        let intensity = (80.0 + 100.0 * pulse) as u32;
        let color = rgb(intensity, intensity, 255);

        let mut y = -50;
        while y <= 50 {
            frame.fill_rect(0.0, y as f32, 0.5, 4.0, color);
            y += 10;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_covers_the_frame() {
        let mut backdrop = Backdrop::default();
        let mut frame = FrameBuffer::new(160, 90);
        backdrop.draw(1.0 / 60.0, &mut frame);
        // clear touched every pixel; nothing is left at the zero fill
        assert!(frame.pixels().iter().all(|&p| p != 0));
    }

    #[test]
    fn test_draw_tolerates_degenerate_viewport() {
        let mut backdrop = Backdrop::default();
        let mut frame = FrameBuffer::new(0, 0);
        backdrop.draw(0.5, &mut frame);
        backdrop.draw_simple(0.5, &mut frame);
    }
}
