use super::config::EngineConfig;
use super::{Rgb, Season, StageSize, Weather};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Driving inputs for a procedural field. Stage dimensions are rounded
/// to whole units so sub-pixel resize noise does not churn the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKey {
    pub weather: Weather,
    pub season: Season,
    pub width: u32,
    pub height: u32,
}

impl FieldKey {
    pub fn new(weather: Weather, season: Season, stage: StageSize) -> Self {
        Self {
            weather,
            season,
            width: stage.width.max(0.0).round() as u32,
            height: stage.height.max(0.0).round() as u32,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    pub x: f32,
    /// Ground line the trunk stands on, in stage coordinates.
    pub y: f32,
    pub scale: f32,
    pub color: Rgb,
    pub height: f32,
    pub trunk_width: f32,
    pub foliage_tiers: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub brightness: f32,
}

/// One generated field. Positions stay fixed until the key changes,
/// which keeps static decoration from boiling frame to frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub clouds: Vec<Cloud>,
    pub trees: Vec<Tree>,
    pub decorations: Vec<Decoration>,
    pub stars: Vec<Star>,
}

/// Derives a generator seed from the engine seed and the field key, so
/// the same inputs always reproduce the same field while distinct keys
/// get independent streams.
pub fn field_seed(seed: u64, key: FieldKey) -> u64 {
    let mut mixed = seed ^ 0x9E37_79B9_7F4A_7C15;
    for part in [
        key.weather as u64,
        key.season as u64,
        key.width as u64,
        key.height as u64,
    ] {
        mixed ^= part.wrapping_add(0x9E37_79B9_7F4A_7C15);
        mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
        mixed ^= mixed >> 31;
    }
    mixed
}

pub fn generate(key: FieldKey, cfg: &EngineConfig) -> Environment {
    let mut rng = ChaCha8Rng::seed_from_u64(field_seed(cfg.seed, key));
    let width = key.width as f32;
    let height = key.height as f32;

    Environment {
        clouds: generate_clouds(key.weather, width, height, cfg, &mut rng),
        trees: generate_trees(key.season, width, height, cfg, &mut rng),
        decorations: generate_decorations(key.season, width, height, cfg, &mut rng),
        stars: generate_stars(width, height, cfg, &mut rng),
    }
}

fn generate_clouds<R: Rng>(
    weather: Weather,
    width: f32,
    height: f32,
    cfg: &EngineConfig,
    rng: &mut R,
) -> Vec<Cloud> {
    let (scale_min, scale_max) = cfg.clouds.scale_range(weather);
    let band_height = height * cfg.clouds.band_end;

    (0..cfg.clouds.count(weather))
        .map(|_| {
            let scale = rng.random_range(scale_min..scale_max);
            // Keep the scaled sprite inside the cloud band.
            let max_y = (band_height - cfg.clouds.sprite_height * scale).max(0.0);
            let y = if max_y > 0.0 {
                rng.random_range(0.0..max_y)
            } else {
                0.0
            };
            Cloud {
                x: rng.random_range(0.0..width.max(1.0)),
                y,
                scale,
            }
        })
        .collect()
}

fn generate_trees<R: Rng>(
    season: Season,
    width: f32,
    height: f32,
    cfg: &EngineConfig,
    rng: &mut R,
) -> Vec<Tree> {
    let terrain = &cfg.terrain;
    let palette = terrain.tree_palette(season);
    let count = (width * terrain.tree_density / terrain.tree_spacing).floor() as usize;

    let mut trees: Vec<Tree> = (0..count)
        .map(|_| {
            let x = rng.random_range(0.0..width.max(1.0));
            let scale = rng.random_range(terrain.tree_scale_min..terrain.tree_scale_max);
            let tree_height =
                (terrain.tree_height_base + rng.random_range(0.0..terrain.tree_height_jitter))
                    * scale;
            let trunk_width =
                (terrain.trunk_width_base + rng.random_range(0.0..terrain.trunk_width_jitter))
                    * scale;
            let color = palette[rng.random_range(0..palette.len())];
            Tree {
                x,
                y: ground_line(x, height, terrain),
                scale,
                color,
                height: tree_height,
                trunk_width,
                foliage_tiers: terrain.foliage_tiers,
            }
        })
        .collect();
    trees.sort_by(|a, b| a.x.total_cmp(&b.x));
    trees
}

fn generate_decorations<R: Rng>(
    season: Season,
    width: f32,
    height: f32,
    cfg: &EngineConfig,
    rng: &mut R,
) -> Vec<Decoration> {
    let terrain = &cfg.terrain;
    let profile = terrain.decoration_profile(season);
    let palette = terrain.decoration_palette(season);
    let strip = terrain.strip_height;

    (0..profile.count)
        .map(|_| {
            let (x, y) = if rng.random_range(0.0..1.0) < profile.cluster_chance {
                // Gather around a random cluster center with a small
                // scatter, producing flower patches.
                let center_x = rng.random_range(0.0..width.max(1.0));
                let center_y = height - rng.random_range(0.0..(strip - 15.0).max(1.0));
                (
                    center_x + (rng.random_range(0.0..1.0) - 0.5) * 30.0,
                    center_y + (rng.random_range(0.0..1.0) - 0.5) * 15.0,
                )
            } else {
                (
                    rng.random_range(0.0..width.max(1.0)),
                    height - rng.random_range(0.0..(strip - 10.0).max(1.0)),
                )
            };
            Decoration {
                x,
                y,
                size: rng.random_range(profile.size_min..profile.size_max),
                color: palette[rng.random_range(0..palette.len())],
            }
        })
        .collect()
}

fn generate_stars<R: Rng>(width: f32, height: f32, cfg: &EngineConfig, rng: &mut R) -> Vec<Star> {
    // Stars stay above the first vehicle lane.
    let band = height * cfg.lanes.bands[0].0;
    (0..cfg.star_count)
        .map(|_| Star {
            x: rng.random_range(0.0..width.max(1.0)),
            y: rng.random_range(0.0..band.max(1.0)),
            radius: rng.random_range(0.5..2.0),
            brightness: rng.random_range(0.5..1.0),
        })
        .collect()
}

/// Wavy ground line the terrain strip and the trees follow.
pub fn ground_line(x: f32, stage_height: f32, terrain: &super::config::TerrainConfig) -> f32 {
    stage_height - terrain.strip_height + (x * terrain.wave_frequency).sin() * terrain.wave_amplitude
}
