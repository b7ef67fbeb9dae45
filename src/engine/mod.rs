use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod banner;
pub mod celestial;
pub mod clock;
pub mod config;
pub mod environment;
pub mod particles;
pub mod vehicles;

use crate::ads::Ad;
use config::EngineConfig;
use environment::{Environment, FieldKey};
use particles::{ParticleMode, WeatherParticles};
use vehicles::VehicleEntity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Clear,
    Cloudy,
    Rainy,
    Snowy,
}

impl Weather {
    pub fn cycle(self) -> Self {
        match self {
            Weather::Clear => Weather::Cloudy,
            Weather::Cloudy => Weather::Rainy,
            Weather::Rainy => Weather::Snowy,
            Weather::Snowy => Weather::Clear,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Weather::Clear => "clear",
            Weather::Cloudy => "cloudy",
            Weather::Rainy => "rainy",
            Weather::Snowy => "snowy",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Weather {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clear" => Ok(Weather::Clear),
            "cloudy" => Ok(Weather::Cloudy),
            "rainy" | "rain" => Ok(Weather::Rainy),
            "snowy" | "snow" => Ok(Weather::Snowy),
            other => Err(format!(
                "unknown weather '{other}' (expected clear, cloudy, rainy or snowy)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn cycle(self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Autumn,
            Season::Autumn => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "autumn" | "fall" => Ok(Season::Autumn),
            "winter" => Ok(Season::Winter),
            other => Err(format!(
                "unknown season '{other}' (expected spring, summer, autumn or winter)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    Day,
    Night,
}

/// Plain 24-bit color, shared by palettes and the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Simulation stage dimensions in stage units. The renderer decides
/// how units map onto terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageSize {
    pub width: f32,
    pub height: f32,
}

/// Owns every live scene entity and drives them forward. All mutation
/// happens through `&mut self` on the single host task; `advance` only
/// depends on the prior state and the elapsed delta, so two engines
/// fed the same seed, ads and deltas stay in lockstep.
#[derive(Debug)]
pub struct SceneEngine {
    config: EngineConfig,
    stage: StageSize,
    weather: Weather,
    season: Season,
    ads: Vec<Ad>,
    vehicles: Vec<VehicleEntity>,
    particles: WeatherParticles,
    field: Option<(FieldKey, Environment)>,
    rng: ChaCha8Rng,
}

impl SceneEngine {
    pub fn new(config: EngineConfig, stage: StageSize) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut engine = Self {
            config,
            stage,
            weather: Weather::Clear,
            season: Season::Summer,
            ads: Vec::new(),
            vehicles: Vec::new(),
            particles: WeatherParticles::new(),
            field: None,
            rng,
        };
        engine.rebuild_particles();
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stage(&self) -> StageSize {
        self.stage
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn vehicles(&self) -> &[VehicleEntity] {
        &self.vehicles
    }

    pub fn particles(&self) -> &WeatherParticles {
        &self.particles
    }

    /// Replaces the active advertisement snapshot. Vehicles whose ads
    /// survive the swap keep flying from their current offset; removed
    /// ads drop their vehicles on the spot.
    pub fn sync_ads(&mut self, ads: Vec<Ad>) {
        self.vehicles =
            vehicles::build_entities(&ads, &self.vehicles, self.stage, &self.config, &mut self.rng);
        self.ads = ads;
    }

    pub fn set_weather(&mut self, weather: Weather) {
        if weather == self.weather {
            return;
        }
        self.weather = weather;
        self.rebuild_particles();
    }

    pub fn set_season(&mut self, season: Season) {
        self.season = season;
    }

    /// Recomputes all layout-dependent state for new stage dimensions.
    /// Banner widths and lane centers are derived from the stage, so
    /// vehicles are rebuilt in place; particle pools respawn across
    /// the new spawn band.
    pub fn resize(&mut self, stage: StageSize) {
        if stage == self.stage {
            return;
        }
        self.stage = stage;
        let ads = std::mem::take(&mut self.ads);
        self.sync_ads(ads);

        self.particles.set_mode(
            ParticleMode::None,
            self.stage,
            &self.config.rain,
            &self.config.snow,
            &mut self.rng,
        );
        self.rebuild_particles();
    }

    /// Advances every entity by the elapsed wall-clock delta. Hosts
    /// pass whatever their frame clock measured; the engine clamps to
    /// the configured maximum so stalls do not teleport entities.
    pub fn advance(&mut self, delta_ms: f32) {
        let delta_ms = delta_ms.clamp(0.0, self.config.max_frame_delta_ms);
        for vehicle in &mut self.vehicles {
            vehicle.advance(delta_ms, self.stage.width);
        }
        self.particles.advance(
            delta_ms,
            self.stage,
            &self.config.rain,
            &self.config.snow,
            &mut self.rng,
        );
    }

    /// Memoized procedural decoration for the current conditions. The
    /// field regenerates only when weather, season or the rounded
    /// stage dimensions change.
    pub fn environment(&mut self) -> &Environment {
        let key = FieldKey::new(self.weather, self.season, self.stage);
        if matches!(&self.field, Some((cached, _)) if *cached != key) {
            self.field = None;
        }
        let config = &self.config;
        &self
            .field
            .get_or_insert_with(|| (key, environment::generate(key, config)))
            .1
    }

    /// Topmost vehicle whose icon-plus-banner region covers the point,
    /// in stage units.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<&VehicleEntity> {
        self.vehicles
            .iter()
            .rev()
            .find(|vehicle| vehicle.contains(x, y, self.config.banner.vehicle_margin))
    }

    fn rebuild_particles(&mut self) {
        self.particles.set_mode(
            ParticleMode::for_weather(self.weather),
            self.stage,
            &self.config.rain,
            &self.config.snow,
            &mut self.rng,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ads::{AdDuration, VehicleType};

    fn ad(id: &str) -> Ad {
        Ad {
            id: id.to_string(),
            message: "fresh bread daily".to_string(),
            vehicle_type: VehicleType::Airplane,
            duration: AdDuration::OneDay,
            active: true,
        }
    }

    fn engine(seed: u64) -> SceneEngine {
        SceneEngine::new(
            EngineConfig {
                seed,
                ..EngineConfig::default()
            },
            StageSize {
                width: 1280.0,
                height: 720.0,
            },
        )
    }

    #[test]
    fn test_same_seed_and_inputs_stay_in_lockstep() {
        let mut a = engine(42);
        let mut b = engine(42);
        let ads = vec![ad("one"), ad("two")];
        a.sync_ads(ads.clone());
        b.sync_ads(ads);
        a.set_weather(Weather::Snowy);
        b.set_weather(Weather::Snowy);

        for _ in 0..300 {
            a.advance(16.0);
            b.advance(16.0);
        }
        let ax: Vec<f32> = a.vehicles().iter().map(|v| v.x).collect();
        let bx: Vec<f32> = b.vehicles().iter().map(|v| v.x).collect();
        assert_eq!(ax, bx);
        assert_eq!(a.particles().snow, b.particles().snow);
    }

    #[test]
    fn test_weather_change_swaps_particle_pools() {
        let mut engine = engine(1);
        assert!(engine.particles().rain.is_empty());

        engine.set_weather(Weather::Rainy);
        assert_eq!(engine.particles().rain.len(), 300);
        assert!(engine.particles().snow.is_empty());

        engine.set_weather(Weather::Snowy);
        assert!(engine.particles().rain.is_empty());
        assert_eq!(engine.particles().snow.len(), 200);
    }

    #[test]
    fn test_environment_is_memoized_until_conditions_change() {
        let mut engine = engine(5);
        let first = engine.environment().clone();
        engine.advance(16.0);
        assert_eq!(*engine.environment(), first, "no churn between frames");

        engine.set_season(Season::Winter);
        assert_ne!(*engine.environment(), first);
    }

    #[test]
    fn test_resize_rebuilds_layout_and_keeps_ads() {
        let mut engine = engine(9);
        engine.sync_ads(vec![ad("sticky")]);
        engine.resize(StageSize {
            width: 640.0,
            height: 480.0,
        });
        assert_eq!(engine.vehicles().len(), 1);
        assert_eq!(engine.vehicles()[0].ad.id, "sticky");
        let lane_y = engine.config().lanes.center_y(0, 480.0);
        assert_eq!(engine.vehicles()[0].y, lane_y);
    }

    #[test]
    fn test_removed_ads_drop_their_vehicles_synchronously() {
        let mut engine = engine(11);
        engine.sync_ads(vec![ad("a"), ad("b"), ad("c")]);
        assert_eq!(engine.vehicles().len(), 3);

        engine.sync_ads(vec![ad("b")]);
        assert_eq!(engine.vehicles().len(), 1);
        assert_eq!(engine.vehicles()[0].ad.id, "b");
        assert_eq!(engine.vehicles()[0].lane, 0, "survivor takes the top lane");
    }

    #[test]
    fn test_hit_test_finds_the_vehicle_under_the_point() {
        let mut engine = engine(13);
        engine.sync_ads(vec![ad("target")]);
        let vehicle = &engine.vehicles()[0];
        let (px, py) = (vehicle.x + 1.0, vehicle.y + 1.0);
        let hit = engine.hit_test(px, py);
        assert!(hit.is_some());
        assert_eq!(hit.map(|v| v.ad.id.as_str()), Some("target"));
        assert!(engine.hit_test(-5000.0, -5000.0).is_none());
    }

    #[test]
    fn test_weather_and_season_parse_round_trip() {
        assert_eq!("rainy".parse::<Weather>(), Ok(Weather::Rainy));
        assert_eq!("SNOW".parse::<Weather>(), Ok(Weather::Snowy));
        assert!("drizzle".parse::<Weather>().is_err());
        assert_eq!("fall".parse::<Season>(), Ok(Season::Autumn));
        assert!("monsoon".parse::<Season>().is_err());
    }

    #[test]
    fn test_advance_clamps_runaway_deltas() {
        let mut engine = engine(17);
        engine.sync_ads(vec![ad("clamped")]);
        let before = engine.vehicles()[0].x;
        engine.advance(600_000.0);
        let after = engine.vehicles()[0].x;
        let max_step = engine.config().max_frame_delta_ms * engine.vehicles()[0].speed / 1000.0;
        let wrapped = after == -engine.vehicles()[0].wrap_width();
        assert!(
            wrapped || ((after - before) - max_step).abs() < 0.001,
            "expected one clamped step, moved from {before} to {after}"
        );
    }
}
