use super::{Rgb, StageSize, TimeOfDay, Weather};

/// Hours in [6, 18) count as day, everything else as night. The host
/// re-evaluates this on its own timer; the engine only maps.
pub fn time_of_day_for_hour(hour: u32) -> TimeOfDay {
    if (6..18).contains(&hour) {
        TimeOfDay::Day
    } else {
        TimeOfDay::Night
    }
}

/// Flat background color per time of day. Weather does not tint the
/// sky yet; cloud cover and precipitation carry the mood instead.
pub fn background_color(time_of_day: TimeOfDay, _weather: Weather) -> Rgb {
    match time_of_day {
        TimeOfDay::Day => Rgb::new(135, 206, 235),
        TimeOfDay::Night => Rgb::new(10, 20, 40),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelestialKind {
    Sun,
    Moon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub kind: CelestialKind,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub glow_radius: f32,
    pub color: Rgb,
}

/// Sun near the top left by day, moon near the top right at night,
/// both vertically centered in the cloud band with a soft outer glow.
pub fn celestial_body(
    time_of_day: TimeOfDay,
    stage: StageSize,
    cloud_band_end: f32,
) -> CelestialBody {
    let y = stage.height * cloud_band_end / 2.0;
    match time_of_day {
        TimeOfDay::Day => CelestialBody {
            kind: CelestialKind::Sun,
            x: stage.width * 0.15,
            y,
            radius: 40.0,
            glow_radius: 60.0,
            color: Rgb::new(255, 215, 0),
        },
        TimeOfDay::Night => CelestialBody {
            kind: CelestialKind::Moon,
            x: stage.width * 0.85,
            y,
            radius: 40.0,
            glow_radius: 45.0,
            color: Rgb::new(255, 255, 255),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_window() {
        assert_eq!(time_of_day_for_hour(6), TimeOfDay::Day);
        assert_eq!(time_of_day_for_hour(12), TimeOfDay::Day);
        assert_eq!(time_of_day_for_hour(17), TimeOfDay::Day);
        assert_eq!(time_of_day_for_hour(18), TimeOfDay::Night);
        assert_eq!(time_of_day_for_hour(5), TimeOfDay::Night);
        assert_eq!(time_of_day_for_hour(0), TimeOfDay::Night);
        assert_eq!(time_of_day_for_hour(23), TimeOfDay::Night);
    }

    #[test]
    fn test_background_colors() {
        for weather in [Weather::Clear, Weather::Cloudy, Weather::Rainy, Weather::Snowy] {
            assert_eq!(
                background_color(TimeOfDay::Day, weather),
                Rgb::new(135, 206, 235)
            );
            assert_eq!(
                background_color(TimeOfDay::Night, weather),
                Rgb::new(10, 20, 40)
            );
        }
    }

    #[test]
    fn test_sun_left_moon_right() {
        let stage = StageSize {
            width: 1000.0,
            height: 800.0,
        };
        let sun = celestial_body(TimeOfDay::Day, stage, 0.25);
        assert_eq!(sun.kind, CelestialKind::Sun);
        assert_eq!(sun.x, 150.0);
        assert_eq!(sun.y, 100.0);

        let moon = celestial_body(TimeOfDay::Night, stage, 0.25);
        assert_eq!(moon.kind, CelestialKind::Moon);
        assert_eq!(moon.x, 850.0);
        assert!(moon.glow_radius > moon.radius);
    }
}
