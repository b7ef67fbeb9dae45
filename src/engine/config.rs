use super::{Rgb, Season, Weather};
use crate::ads::VehicleType;

/// Every tuning constant the simulation relies on, passed into the
/// engine at construction. Defaults match the live scene; the spawn
/// band multipliers and the rain angle are empirical values kept
/// configurable rather than derived.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub seed: u64,
    pub max_frame_delta_ms: f32,
    pub lanes: LaneConfig,
    pub vehicles: VehicleConfig,
    pub banner: BannerConfig,
    pub rain: RainConfig,
    pub snow: SnowConfig,
    pub clouds: CloudConfig,
    pub terrain: TerrainConfig,
    pub star_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_frame_delta_ms: 250.0,
            lanes: LaneConfig::default(),
            vehicles: VehicleConfig::default(),
            banner: BannerConfig::default(),
            rain: RainConfig::default(),
            snow: SnowConfig::default(),
            clouds: CloudConfig::default(),
            terrain: TerrainConfig::default(),
            star_count: 100,
        }
    }
}

/// Six fixed horizontal bands between 23% and 71% of the stage
/// height, one advertisement vehicle per band.
#[derive(Debug, Clone)]
pub struct LaneConfig {
    pub bands: [(f32, f32); 6],
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            bands: [
                (0.23, 0.31),
                (0.31, 0.39),
                (0.39, 0.47),
                (0.47, 0.55),
                (0.55, 0.63),
                (0.63, 0.71),
            ],
        }
    }
}

impl LaneConfig {
    pub fn center_y(&self, lane: usize, stage_height: f32) -> f32 {
        let (start, end) = self.bands[lane.min(self.bands.len() - 1)];
        stage_height * (start + (end - start) / 2.0)
    }
}

#[derive(Debug, Clone)]
pub struct VehicleConfig {
    pub base_speed: f32,
    pub airplane_factor: f32,
    pub balloon_factor: f32,
    pub airship_factor: f32,
    pub icon_size: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            base_speed: 24.0,
            airplane_factor: 1.2,
            balloon_factor: 0.6,
            airship_factor: 0.8,
            icon_size: 80.0,
        }
    }
}

impl VehicleConfig {
    pub fn speed(&self, vehicle: VehicleType) -> f32 {
        let factor = match vehicle {
            VehicleType::Airplane => self.airplane_factor,
            VehicleType::Balloon => self.balloon_factor,
            VehicleType::Airship | VehicleType::Unknown => self.airship_factor,
        };
        self.base_speed * factor
    }
}

#[derive(Debug, Clone)]
pub struct BannerConfig {
    pub font_size: f32,
    pub monospace_glyph_factor: f32,
    pub sans_glyph_factor: f32,
    /// Added to the raw glyph estimate and subtracted again when
    /// estimating characters per line.
    pub horizontal_padding: f32,
    pub box_padding: f32,
    pub min_width: f32,
    /// Viewports at or below this width count as narrow devices.
    pub narrow_viewport_max: f32,
    pub narrow_fraction: f32,
    pub wide_fraction: f32,
    /// Gap reserved between the banner and its vehicle.
    pub vehicle_margin: f32,
    pub min_lines: usize,
    pub line_height_factor: f32,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            monospace_glyph_factor: 0.6,
            sans_glyph_factor: 0.55,
            horizontal_padding: 16.0,
            box_padding: 5.0,
            min_width: 120.0,
            narrow_viewport_max: 600.0,
            narrow_fraction: 0.99,
            wide_fraction: 0.60,
            vehicle_margin: 10.0,
            min_lines: 2,
            line_height_factor: 1.2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RainConfig {
    pub count: usize,
    pub speed_min: f32,
    pub speed_max: f32,
    /// Fall angle from the horizontal, near-vertical.
    pub angle_deg: f32,
    /// Respawn band extends this far past the stage width so drift
    /// still covers the full viewport.
    pub spawn_width_factor: f32,
    pub margin: f32,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            count: 300,
            speed_min: 300.0,
            speed_max: 700.0,
            angle_deg: 84.0,
            spawn_width_factor: 1.5,
            margin: 10.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SnowConfig {
    pub count: usize,
    pub speed_min: f32,
    pub speed_max: f32,
    pub sway_amplitude_min: f32,
    pub sway_amplitude_max: f32,
    pub sway_frequency_min: f32,
    pub sway_frequency_max: f32,
    /// Horizontal displacement applied per frame, scaled by the sway
    /// sine.
    pub sway_step: f32,
    pub spawn_width_factor: f32,
    pub margin: f32,
}

impl Default for SnowConfig {
    fn default() -> Self {
        Self {
            count: 200,
            speed_min: 30.0,
            speed_max: 80.0,
            sway_amplitude_min: 20.0,
            sway_amplitude_max: 50.0,
            sway_frequency_min: 0.001,
            sway_frequency_max: 0.002,
            sway_step: 0.5,
            spawn_width_factor: 1.2,
            margin: 10.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CloudConfig {
    pub clear_count: usize,
    pub cloudy_count: usize,
    pub precipitation_count: usize,
    /// Clouds occupy the top fraction of the stage.
    pub band_end: f32,
    /// Unscaled sprite height, used to keep scaled clouds inside the
    /// band.
    pub sprite_height: f32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            clear_count: 1,
            cloudy_count: 8,
            precipitation_count: 12,
            band_end: 0.25,
            sprite_height: 100.0,
        }
    }
}

impl CloudConfig {
    pub fn count(&self, weather: Weather) -> usize {
        match weather {
            Weather::Clear => self.clear_count,
            Weather::Cloudy => self.cloudy_count,
            Weather::Rainy | Weather::Snowy => self.precipitation_count,
        }
    }

    pub fn scale_range(&self, weather: Weather) -> (f32, f32) {
        match weather {
            Weather::Rainy | Weather::Snowy => (1.6, 2.4),
            Weather::Cloudy => (0.8, 1.8),
            Weather::Clear => (0.5, 0.8),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TerrainConfig {
    /// Terrain band starts here and runs to the bottom of the stage.
    pub band_start: f32,
    /// Height of the solid ground strip inside the band.
    pub strip_height: f32,
    pub tree_spacing: f32,
    /// Tree count is computed against width * density, denser than the
    /// strict viewport to avoid edge gaps.
    pub tree_density: f32,
    pub tree_scale_min: f32,
    pub tree_scale_max: f32,
    pub tree_height_base: f32,
    pub tree_height_jitter: f32,
    pub trunk_width_base: f32,
    pub trunk_width_jitter: f32,
    pub foliage_tiers: usize,
    pub wave_amplitude: f32,
    pub wave_frequency: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            band_start: 0.71,
            strip_height: 80.0,
            tree_spacing: 60.0,
            tree_density: 1.2,
            tree_scale_min: 0.8,
            tree_scale_max: 1.2,
            tree_height_base: 60.0,
            tree_height_jitter: 20.0,
            trunk_width_base: 8.0,
            trunk_width_jitter: 4.0,
            foliage_tiers: 3,
            wave_amplitude: 10.0,
            wave_frequency: 0.02,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationProfile {
    pub count: usize,
    pub size_min: f32,
    pub size_max: f32,
    /// Fraction of decorations gathered around random cluster centers
    /// instead of spread uniformly. Only spring flowers cluster.
    pub cluster_chance: f32,
}

impl TerrainConfig {
    pub fn decoration_profile(&self, season: Season) -> DecorationProfile {
        match season {
            Season::Spring => DecorationProfile {
                count: 60,
                size_min: 2.0,
                size_max: 6.0,
                cluster_chance: 0.7,
            },
            Season::Summer => DecorationProfile {
                count: 20,
                size_min: 3.0,
                size_max: 8.0,
                cluster_chance: 0.0,
            },
            Season::Autumn => DecorationProfile {
                count: 60,
                size_min: 2.0,
                size_max: 4.0,
                cluster_chance: 0.0,
            },
            Season::Winter => DecorationProfile {
                count: 30,
                size_min: 1.0,
                size_max: 3.0,
                cluster_chance: 0.0,
            },
        }
    }

    pub fn ground_color(&self, season: Season) -> Rgb {
        match season {
            Season::Spring => Rgb::new(115, 169, 68),
            Season::Summer => Rgb::new(79, 119, 45),
            Season::Autumn => Rgb::new(156, 102, 68),
            Season::Winter => Rgb::new(248, 249, 250),
        }
    }

    pub fn tree_palette(&self, season: Season) -> &'static [Rgb] {
        match season {
            Season::Spring | Season::Summer => LEAFY_TREE_COLORS,
            Season::Autumn => AUTUMN_TREE_COLORS,
            Season::Winter => EVERGREEN_TREE_COLORS,
        }
    }

    pub fn decoration_palette(&self, season: Season) -> &'static [Rgb] {
        match season {
            Season::Spring => SPRING_FLOWER_COLORS,
            Season::Summer => SUMMER_BUSH_COLORS,
            Season::Autumn => AUTUMN_LEAF_COLORS,
            Season::Winter => WINTER_PATCH_COLORS,
        }
    }
}

const LEAFY_TREE_COLORS: &[Rgb] = &[Rgb::new(49, 87, 44)];

const EVERGREEN_TREE_COLORS: &[Rgb] = &[Rgb::new(28, 56, 1)];

const SUMMER_BUSH_COLORS: &[Rgb] = &[Rgb::new(144, 169, 85)];

const WINTER_PATCH_COLORS: &[Rgb] = &[Rgb::new(255, 255, 255)];

const AUTUMN_TREE_COLORS: &[Rgb] = &[
    Rgb::new(139, 69, 19),
    Rgb::new(210, 105, 30),
    Rgb::new(205, 133, 63),
    Rgb::new(222, 184, 135),
    Rgb::new(210, 105, 30),
    Rgb::new(255, 140, 0),
];

const AUTUMN_LEAF_COLORS: &[Rgb] = &[
    Rgb::new(212, 163, 115),
    Rgb::new(233, 188, 136),
    Rgb::new(250, 237, 205),
];

const SPRING_FLOWER_COLORS: &[Rgb] = &[
    Rgb::new(255, 105, 180),
    Rgb::new(255, 182, 193),
    Rgb::new(255, 20, 147),
    Rgb::new(153, 50, 204),
    Rgb::new(138, 43, 226),
    Rgb::new(65, 105, 225),
    Rgb::new(100, 149, 237),
    Rgb::new(255, 215, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(255, 250, 250),
    Rgb::new(255, 165, 0),
    Rgb::new(255, 127, 80),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_centers_are_ordered_and_bounded() {
        let lanes = LaneConfig::default();
        let height = 1000.0;
        let centers: Vec<f32> = (0..6).map(|i| lanes.center_y(i, height)).collect();
        for pair in centers.windows(2) {
            assert!(pair[0] < pair[1], "lane centers should descend the sky");
        }
        assert!(centers[0] >= height * 0.23);
        assert!(centers[5] <= height * 0.71);
    }

    #[test]
    fn test_vehicle_speed_ordering() {
        let vehicles = VehicleConfig::default();
        let airplane = vehicles.speed(VehicleType::Airplane);
        let airship = vehicles.speed(VehicleType::Airship);
        let balloon = vehicles.speed(VehicleType::Balloon);
        assert!(airplane > airship, "airplane should be the fastest");
        assert!(airship > balloon, "balloon should be the slowest");
    }

    #[test]
    fn test_cloud_count_by_weather() {
        let clouds = CloudConfig::default();
        assert_eq!(clouds.count(Weather::Clear), 1);
        assert_eq!(clouds.count(Weather::Cloudy), 8);
        assert_eq!(clouds.count(Weather::Rainy), 12);
        assert_eq!(clouds.count(Weather::Snowy), 12);
    }

    #[test]
    fn test_palettes_cover_every_season() {
        let terrain = TerrainConfig::default();
        for season in [Season::Spring, Season::Summer, Season::Autumn, Season::Winter] {
            assert!(!terrain.tree_palette(season).is_empty());
            assert!(!terrain.decoration_palette(season).is_empty());
        }
        assert_eq!(terrain.tree_palette(Season::Summer), &[Rgb::new(49, 87, 44)]);
        assert_eq!(terrain.tree_palette(Season::Winter), &[Rgb::new(28, 56, 1)]);
        assert_eq!(terrain.tree_palette(Season::Autumn).len(), 6);
        assert_eq!(
            terrain.decoration_palette(Season::Winter),
            &[Rgb::new(255, 255, 255)]
        );
        assert_eq!(terrain.decoration_palette(Season::Spring).len(), 12);
    }

    #[test]
    fn test_decoration_profiles_per_season() {
        let terrain = TerrainConfig::default();
        assert_eq!(terrain.decoration_profile(Season::Spring).count, 60);
        assert_eq!(terrain.decoration_profile(Season::Summer).count, 20);
        assert_eq!(terrain.decoration_profile(Season::Autumn).count, 60);
        assert_eq!(terrain.decoration_profile(Season::Winter).count, 30);
        assert!(terrain.decoration_profile(Season::Spring).cluster_chance > 0.0);
        assert_eq!(terrain.decoration_profile(Season::Winter).cluster_chance, 0.0);
    }
}
