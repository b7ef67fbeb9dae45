use super::banner::{self, BannerLayout, FontFamily};
use super::config::EngineConfig;
use super::StageSize;
use crate::ads::{Ad, VehicleType};
use rand::Rng;

/// Upper bound on concurrent vehicles; one per lane.
pub const MAX_VEHICLES: usize = 6;

/// Ephemeral animation state for one active advertisement. Lives
/// exactly as long as the ad is present in the active list; position
/// is the x of the vehicle icon, with the banner trailing to its left.
#[derive(Debug, Clone)]
pub struct VehicleEntity {
    pub ad: Ad,
    pub lane: usize,
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub icon_size: f32,
    /// None when the ad carries no message; the vehicle then flies
    /// bannerless.
    pub banner: Option<BannerLayout>,
}

impl VehicleEntity {
    /// Distance past the stage edges a vehicle must clear before
    /// wrapping, so the trailing banner never pops in mid-screen.
    pub fn wrap_width(&self) -> f32 {
        match &self.banner {
            Some(banner) => banner.width,
            None => self.icon_size,
        }
    }

    pub fn advance(&mut self, delta_ms: f32, stage_width: f32) {
        let new_x = self.x + delta_ms * self.speed / 1000.0;
        if new_x - self.wrap_width() > stage_width {
            self.x = -self.wrap_width();
        } else {
            self.x = new_x;
        }
    }

    /// Hit region covering the icon and the trailing banner. Both are
    /// drawn centered on `y`, so the region spans whichever of the two
    /// is taller, symmetrically around the lane center.
    pub fn contains(&self, px: f32, py: f32, banner_gap: f32) -> bool {
        let left = match &self.banner {
            Some(banner) => self.x - banner.width - banner_gap,
            None => self.x,
        };
        let right = self.x + self.icon_size;

        let mut half_height = self.icon_size / 2.0;
        if let Some(banner) = &self.banner {
            half_height = half_height.max(banner.height / 2.0);
        }

        px >= left && px <= right && py >= self.y - half_height && py <= self.y + half_height
    }
}

pub fn font_for(vehicle: VehicleType) -> FontFamily {
    // Airship LED boards use a fixed-width face; smoke writing and
    // towed banners do not.
    match vehicle {
        VehicleType::Airship => FontFamily::Monospace,
        _ => FontFamily::SansSerif,
    }
}

/// Builds the vehicle registry from an active-ads snapshot. Lane index
/// is the ad's position in the sequence; ads beyond the sixth are not
/// instantiated. Vehicles already flying keep their horizontal offset
/// across snapshot refreshes, new ones spawn at a random offset across
/// the extended stage.
pub fn build_entities<R: Rng>(
    ads: &[Ad],
    previous: &[VehicleEntity],
    stage: StageSize,
    cfg: &EngineConfig,
    rng: &mut R,
) -> Vec<VehicleEntity> {
    let icon_size = cfg.vehicles.icon_size;

    ads.iter()
        .take(MAX_VEHICLES)
        .enumerate()
        .map(|(lane, ad)| {
            let banner = if ad.message.is_empty() {
                None
            } else {
                Some(banner::layout(
                    &ad.message,
                    stage.width,
                    icon_size,
                    font_for(ad.vehicle_type),
                    &cfg.banner,
                ))
            };

            let x = previous
                .iter()
                .find(|entity| entity.ad.id == ad.id)
                .map(|entity| entity.x)
                .unwrap_or_else(|| rng.random_range(-icon_size..stage.width + icon_size));

            VehicleEntity {
                ad: ad.clone(),
                lane,
                x,
                y: cfg.lanes.center_y(lane, stage.height),
                speed: cfg.vehicles.speed(ad.vehicle_type),
                icon_size,
                banner,
            }
        })
        .collect()
}
