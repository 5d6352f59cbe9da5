//! Celebration effect timers
//!
//! Two tiny state machines, Inactive <-> Active. The scene starts them,
//! ticks them once per frame, and reads them back for drawing; neither one
//! polls input or touches score/physics.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

/// One spark of a burst
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds remaining
    pub life: f32,
}

/// A one-shot radial burst of particles
#[derive(Debug, Clone)]
pub struct ParticleBurst {
    pub particles: Vec<Particle>,
    pub active: bool,
    /// Where the burst was started; picks the render palette
    pub origin: Vec2,
    pub lifetime: f32,
    count: usize,
    speed_min: f32,
    speed_max: f32,
}

impl Default for ParticleBurst {
    fn default() -> Self {
        Self {
            particles: Vec::new(),
            active: false,
            origin: Vec2::ZERO,
            lifetime: 1.0,
            count: 80,
            speed_min: 30.0,
            speed_max: 80.0,
        }
    }
}

impl ParticleBurst {
    /// Spawn the full particle load at (x, y): uniform direction, uniform
    /// speed in [speed_min, speed_max], life in [0.5, 1.0] x lifetime.
    pub fn start(&mut self, x: f32, y: f32, rng: &mut impl Rng) {
        self.origin = Vec2::new(x, y);
        self.particles.clear();
        self.particles.reserve(self.count);
        self.active = true;

        for _ in 0..self.count {
            let angle = rng.random::<f32>() * TAU;
            let speed = self.speed_min + rng.random::<f32>() * (self.speed_max - self.speed_min);
            let life = self.lifetime * (0.5 + rng.random::<f32>() * 0.5);
            self.particles.push(Particle {
                pos: Vec2::new(x, y),
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life,
            });
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        for p in &mut self.particles {
            p.pos += p.vel * dt;
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
        if self.particles.is_empty() {
            self.active = false;
        }
    }

    pub fn finished(&self) -> bool {
        !self.active
    }

    /// Drop all particles immediately (restart / back to menu)
    pub fn cancel(&mut self) {
        self.particles.clear();
        self.active = false;
    }
}

/// Full-field flash that fades out linearly
#[derive(Debug, Clone)]
pub struct FlashEffect {
    pub alpha: f32,
    pub active: bool,
    pub fade_speed: f32,
}

impl Default for FlashEffect {
    fn default() -> Self {
        Self {
            alpha: 0.0,
            active: false,
            fade_speed: 3.0,
        }
    }
}

impl FlashEffect {
    pub fn start(&mut self) {
        self.alpha = 1.0;
        self.active = true;
    }

    pub fn tick(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.alpha -= dt * self.fade_speed;
        if self.alpha <= 0.0 {
            self.alpha = 0.0;
            self.active = false;
        }
    }

    pub fn finished(&self) -> bool {
        !self.active
    }

    pub fn cancel(&mut self) {
        self.alpha = 0.0;
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_spawns_full_count_and_finishes_when_drained() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut burst = ParticleBurst::default();
        assert!(burst.finished());

        burst.start(10.0, -5.0, &mut rng);
        assert!(!burst.finished());
        assert_eq!(burst.particles.len(), 80);

        // everything dies within the max particle life of 1 x lifetime
        let mut elapsed = 0.0;
        while elapsed <= burst.lifetime {
            burst.tick(1.0 / 60.0);
            elapsed += 1.0 / 60.0;
        }
        assert!(burst.finished());
        assert!(burst.particles.is_empty());
    }

    #[test]
    fn test_particle_lives_span_half_to_full_lifetime() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut burst = ParticleBurst::default();
        burst.start(0.0, 0.0, &mut rng);
        for p in &burst.particles {
            assert!(p.life >= burst.lifetime * 0.5 && p.life <= burst.lifetime);
            let speed = p.vel.length();
            assert!((30.0..=80.0).contains(&speed));
        }
    }

    #[test]
    fn test_finished_iff_no_particles_remain() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut burst = ParticleBurst::default();
        burst.start(0.0, 0.0, &mut rng);

        while !burst.finished() {
            assert!(!burst.particles.is_empty());
            burst.tick(0.05);
        }
        assert!(burst.particles.is_empty());
    }

    #[test]
    fn test_cancel_cuts_a_running_burst() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut burst = ParticleBurst::default();
        burst.start(0.0, 0.0, &mut rng);
        burst.cancel();
        assert!(burst.finished());
        assert!(burst.particles.is_empty());
    }

    #[test]
    fn test_flash_fades_linearly_to_inactive() {
        let mut flash = FlashEffect::default();
        assert!(flash.finished());

        flash.start();
        assert_eq!(flash.alpha, 1.0);

        flash.tick(0.1);
        assert!((flash.alpha - 0.7).abs() < 1e-5);
        assert!(!flash.finished());

        // 1 / fade_speed seconds in total
        flash.tick(0.3);
        assert!(flash.finished());
        assert_eq!(flash.alpha, 0.0);
    }
}
