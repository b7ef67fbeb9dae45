use super::config::{RainConfig, SnowConfig};
use super::{StageSize, Weather};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleMode {
    None,
    Rain,
    Snow,
}

impl ParticleMode {
    pub fn for_weather(weather: Weather) -> Self {
        match weather {
            Weather::Rainy => ParticleMode::Rain,
            Weather::Snowy => ParticleMode::Snow,
            Weather::Clear | Weather::Cloudy => ParticleMode::None,
        }
    }
}

/// A raindrop falling at a fixed near-vertical angle. The velocity
/// components are derived once from the per-drop speed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct RainDrop {
    pub x: f32,
    pub y: f32,
    pub x_speed: f32,
    pub y_speed: f32,
}

/// A snowflake with an independent sinusoidal sway. Phase, frequency
/// and amplitude are drawn once at creation and never regenerated.
#[derive(Debug, Clone, PartialEq)]
pub struct SnowFlake {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub sway_amplitude: f32,
    pub sway_frequency: f32,
    pub phase: f32,
}

/// Fixed-size particle pools, rebuilt whenever the weather enters or
/// leaves a precipitation mode. Each particle updates from its own
/// prior state and the shared delta only, so iteration order never
/// matters.
#[derive(Debug)]
pub struct WeatherParticles {
    mode: ParticleMode,
    pub rain: Vec<RainDrop>,
    pub snow: Vec<SnowFlake>,
    elapsed_ms: f32,
}

impl Default for WeatherParticles {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherParticles {
    pub fn new() -> Self {
        Self {
            mode: ParticleMode::None,
            rain: Vec::new(),
            snow: Vec::new(),
            elapsed_ms: 0.0,
        }
    }

    pub fn mode(&self) -> ParticleMode {
        self.mode
    }

    /// Swaps the pool when the mode changes; a no-op otherwise so the
    /// particles in flight are not disturbed.
    pub fn set_mode<R: Rng>(
        &mut self,
        mode: ParticleMode,
        stage: StageSize,
        rain_cfg: &RainConfig,
        snow_cfg: &SnowConfig,
        rng: &mut R,
    ) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.rain.clear();
        self.snow.clear();

        // Degenerate stages still get full pools, just crammed into a
        // one-unit band.
        let spawn_height = stage.height.max(1.0);

        match mode {
            ParticleMode::Rain => {
                let angle = rain_cfg.angle_deg.to_radians();
                let band = (stage.width * rain_cfg.spawn_width_factor).max(1.0);
                self.rain = (0..rain_cfg.count)
                    .map(|_| {
                        let speed = rng.random_range(rain_cfg.speed_min..rain_cfg.speed_max);
                        RainDrop {
                            x: rng.random_range(0.0..band),
                            y: rng.random_range(0.0..spawn_height),
                            x_speed: speed * angle.cos(),
                            y_speed: speed * angle.sin(),
                        }
                    })
                    .collect();
            }
            ParticleMode::Snow => {
                let band = (stage.width * snow_cfg.spawn_width_factor).max(1.0);
                self.snow = (0..snow_cfg.count)
                    .map(|_| SnowFlake {
                        x: rng.random_range(0.0..band),
                        y: rng.random_range(0.0..spawn_height),
                        speed: rng.random_range(snow_cfg.speed_min..snow_cfg.speed_max),
                        sway_amplitude: rng
                            .random_range(snow_cfg.sway_amplitude_min..snow_cfg.sway_amplitude_max),
                        sway_frequency: rng
                            .random_range(snow_cfg.sway_frequency_min..snow_cfg.sway_frequency_max),
                        phase: rng.random_range(0.0..std::f32::consts::TAU),
                    })
                    .collect();
            }
            ParticleMode::None => {}
        }
    }

    pub fn advance<R: Rng>(
        &mut self,
        delta_ms: f32,
        stage: StageSize,
        rain_cfg: &RainConfig,
        snow_cfg: &SnowConfig,
        rng: &mut R,
    ) {
        self.elapsed_ms += delta_ms;

        match self.mode {
            ParticleMode::Rain => {
                for drop in &mut self.rain {
                    drop.x -= delta_ms * drop.x_speed / 1000.0;
                    drop.y += delta_ms * drop.y_speed / 1000.0;

                    if drop.x < -rain_cfg.margin || drop.y > stage.height + rain_cfg.margin {
                        let band = (stage.width * rain_cfg.spawn_width_factor).max(1.0);
                        drop.x = rng.random_range(0.0..band);
                        drop.y = -rain_cfg.margin;
                    }
                }
            }
            ParticleMode::Snow => {
                let elapsed = self.elapsed_ms;
                for flake in &mut self.snow {
                    let sway = (elapsed * flake.sway_frequency + flake.phase).sin();
                    flake.x += sway * snow_cfg.sway_step;
                    flake.y += delta_ms * flake.speed / 1000.0;

                    if flake.y > stage.height + snow_cfg.margin {
                        let band = (stage.width * snow_cfg.spawn_width_factor).max(1.0);
                        flake.x = rng.random_range(0.0..band);
                        flake.y = -snow_cfg.margin;
                    }
                }
            }
            ParticleMode::None => {}
        }
    }
}
