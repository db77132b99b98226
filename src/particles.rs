use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn rgba(self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {alpha})", self.0, self.1, self.2)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleConfig {
    pub count: usize,
    pub min_radius: f64,
    pub max_radius: f64,
    pub max_speed: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    pub link_distance: f64,
    pub link_max_opacity: f64,
    pub link_width: f64,
    pub color: Rgb,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            min_radius: 1.0,
            max_radius: 6.0,
            max_speed: 1.0,
            min_opacity: 0.2,
            max_opacity: 0.7,
            link_distance: 100.0,
            link_max_opacity: 0.2,
            link_width: 1.0,
            color: Rgb(97, 175, 239),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
    pub opacity: f64,
}

impl Particle {
    pub fn random(config: &ParticleConfig, width: f64, height: f64, rng: &mut impl Rng) -> Self {
        let half_speed = config.max_speed / 2.0;
        Self {
            x: sample(rng, 0.0, width),
            y: sample(rng, 0.0, height),
            radius: sample(rng, config.min_radius, config.max_radius),
            vx: sample(rng, -half_speed, half_speed),
            vy: sample(rng, -half_speed, half_speed),
            opacity: sample(rng, config.min_opacity, config.max_opacity),
        }
    }

    pub fn advance(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x < 0.0 || self.x > width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > height {
            self.vy = -self.vy;
        }

        self.x = self.x.clamp(0.0, width.max(0.0));
        self.y = self.y.clamp(0.0, height.max(0.0));
    }
}

fn sample(rng: &mut impl Rng, low: f64, high: f64) -> f64 {
    if high > low {
        rng.random_range(low..high)
    } else {
        low
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub opacity: f64,
}

/// Line opacity for two particles `distance` apart, `None` past the threshold.
pub fn link_opacity(distance: f64, threshold: f64, max_opacity: f64) -> Option<f64> {
    (distance < threshold).then(|| (threshold - distance) / threshold * max_opacity)
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    config: ParticleConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new(config: ParticleConfig, width: f64, height: f64, rng: &mut impl Rng) -> Self {
        let particles = (0..config.count)
            .map(|_| Particle::random(&config, width, height, rng))
            .collect();

        Self {
            config,
            width,
            height,
            particles,
        }
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        for particle in &mut self.particles {
            particle.x = particle.x.clamp(0.0, width.max(0.0));
            particle.y = particle.y.clamp(0.0, height.max(0.0));
        }
    }

    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.advance(width, height);
        }
    }

    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for (index, a) in self.particles.iter().enumerate() {
            for b in &self.particles[index + 1..] {
                let distance = (a.x - b.x).hypot(a.y - b.y);
                if let Some(opacity) = link_opacity(
                    distance,
                    self.config.link_distance,
                    self.config.link_max_opacity,
                ) {
                    links.push(Link {
                        from: (a.x, a.y),
                        to: (b.x, b.y),
                        opacity,
                    });
                }
            }
        }
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle {
            x,
            y,
            radius: 2.0,
            vx,
            vy,
            opacity: 0.5,
        }
    }

    #[test]
    fn spawns_configured_count_within_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let config = ParticleConfig::default();
        let field = ParticleField::new(config, 800.0, 600.0, &mut rng);

        assert_eq!(field.particles().len(), 50);
        for p in field.particles() {
            assert!((0.0..800.0).contains(&p.x));
            assert!((0.0..600.0).contains(&p.y));
            assert!((1.0..6.0).contains(&p.radius));
            assert!((-0.5..0.5).contains(&p.vx));
            assert!((-0.5..0.5).contains(&p.vy));
            assert!((0.2..0.7).contains(&p.opacity));
        }
    }

    #[test]
    fn zero_sized_canvas_spawns_at_origin() {
        let mut rng = Pcg32::seed_from_u64(1);
        let field = ParticleField::new(ParticleConfig::default(), 0.0, 0.0, &mut rng);

        assert!(field.particles().iter().all(|p| p.x == 0.0 && p.y == 0.0));
    }

    #[test]
    fn crossing_right_edge_reflects_and_clamps() {
        let mut p = particle(99.8, 50.0, 0.5, 0.0);
        p.advance(100.0, 100.0);

        assert_eq!(p.x, 100.0);
        assert_eq!(p.vx, -0.5);

        p.advance(100.0, 100.0);
        assert_eq!(p.x, 99.5);
    }

    #[test]
    fn crossing_top_edge_reflects_and_clamps() {
        let mut p = particle(10.0, 0.2, 0.0, -0.4);
        p.advance(100.0, 100.0);

        assert_eq!(p.y, 0.0);
        assert_eq!(p.vy, 0.4);
    }

    #[test]
    fn resize_pulls_particles_inside() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = ParticleField::new(ParticleConfig::default(), 1000.0, 1000.0, &mut rng);
        field.resize(200.0, 100.0);

        assert!(field
            .particles()
            .iter()
            .all(|p| p.x <= 200.0 && p.y <= 100.0));
    }

    #[test]
    fn link_opacity_fades_linearly() {
        assert_eq!(link_opacity(0.0, 100.0, 0.2), Some(0.2));
        assert_eq!(link_opacity(50.0, 100.0, 0.2), Some(0.1));
        assert_eq!(link_opacity(100.0, 100.0, 0.2), None);
        assert_eq!(link_opacity(150.0, 100.0, 0.2), None);
    }

    #[test]
    fn links_cover_each_close_pair_once() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut field = ParticleField::new(
            ParticleConfig {
                count: 0,
                ..ParticleConfig::default()
            },
            500.0,
            500.0,
            &mut rng,
        );
        field.particles = vec![
            particle(0.0, 0.0, 0.0, 0.0),
            particle(30.0, 40.0, 0.0, 0.0),
            particle(400.0, 400.0, 0.0, 0.0),
        ];

        let links = field.links();

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].from, (0.0, 0.0));
        assert_eq!(links[0].to, (30.0, 40.0));
        assert!((links[0].opacity - 0.1).abs() < 1e-12);
    }

    #[test]
    fn rgba_formats_color() {
        assert_eq!(Rgb(97, 175, 239).rgba(0.5), "rgba(97, 175, 239, 0.5)");
    }

    proptest! {
        #[test]
        fn particles_never_leave_canvas(
            x in 0.0f64..300.0,
            y in 0.0f64..200.0,
            vx in -5.0f64..5.0,
            vy in -5.0f64..5.0,
            frames in 1usize..500,
        ) {
            let mut p = particle(x, y, vx, vy);
            for _ in 0..frames {
                p.advance(300.0, 200.0);
                prop_assert!((0.0..=300.0).contains(&p.x));
                prop_assert!((0.0..=200.0).contains(&p.y));
                prop_assert_eq!(p.vx.abs(), vx.abs());
                prop_assert_eq!(p.vy.abs(), vy.abs());
            }
        }
    }
}
