use crate::ads::Ad;
use crate::engine::{Season, TimeOfDay, Weather};

/// Host-side view state layered over the engine: the HUD line, the
/// current selection and the manual environment overrides. The engine
/// itself never sees any of this.
pub struct SceneState {
    pub weather: Weather,
    pub season: Season,
    /// When set, the day/night cycle stops following the wall clock.
    pub night_override: bool,
    pub hide_hud: bool,
    /// Snapshot of the ad whose vehicle was last clicked.
    pub selected_ad: Option<Ad>,
    pub ads_error: Option<String>,
    pub total_ads: usize,
    pub flying_ads: usize,
    pub cached_hud: String,
    pub hud_needs_update: bool,
}

impl SceneState {
    pub fn new(weather: Weather, season: Season, night_override: bool, hide_hud: bool) -> Self {
        Self {
            weather,
            season,
            night_override,
            hide_hud,
            selected_ad: None,
            ads_error: None,
            total_ads: 0,
            flying_ads: 0,
            cached_hud: String::new(),
            hud_needs_update: true,
        }
    }

    pub fn cycle_weather(&mut self) -> Weather {
        self.weather = self.weather.cycle();
        self.hud_needs_update = true;
        self.weather
    }

    pub fn cycle_season(&mut self) -> Season {
        self.season = self.season.cycle();
        self.hud_needs_update = true;
        self.season
    }

    pub fn toggle_night(&mut self) -> bool {
        self.night_override = !self.night_override;
        self.hud_needs_update = true;
        self.night_override
    }

    pub fn select(&mut self, ad: Option<Ad>) {
        self.selected_ad = ad;
        self.hud_needs_update = true;
    }

    pub fn update_ads_counts(&mut self, total: usize, flying: usize) {
        if total != self.total_ads || flying != self.flying_ads {
            self.total_ads = total;
            self.flying_ads = flying;
            self.hud_needs_update = true;
        }
        self.ads_error = None;
    }

    pub fn set_ads_error(&mut self, error: String) {
        self.ads_error = Some(error);
        self.hud_needs_update = true;
    }

    pub fn time_of_day_label(&self, time_of_day: TimeOfDay) -> &'static str {
        if self.night_override {
            return "night (forced)";
        }
        match time_of_day {
            TimeOfDay::Day => "day",
            TimeOfDay::Night => "night",
        }
    }

    pub fn update_cached_hud(&mut self, time_of_day: TimeOfDay) {
        if !self.hud_needs_update {
            return;
        }

        self.cached_hud = if let Some(ref error) = self.ads_error {
            format!(
                "{} | Weather: {} | Season: {} | Press 'q' to quit",
                error, self.weather, self.season
            )
        } else {
            format!(
                "Weather: {} | Season: {} | {} | Ads: {}/{} | w/s/n to change, 'q' to quit",
                self.weather,
                self.season,
                self.time_of_day_label(time_of_day),
                self.flying_ads,
                self.total_ads
            )
        };

        self.hud_needs_update = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ads;

    fn state() -> SceneState {
        SceneState::new(Weather::Clear, Season::Summer, false, false)
    }

    #[test]
    fn test_cycle_weather_walks_all_conditions() {
        let mut state = state();
        let mut seen = vec![state.weather];
        for _ in 0..3 {
            seen.push(state.cycle_weather());
        }
        assert_eq!(
            seen,
            vec![
                Weather::Clear,
                Weather::Cloudy,
                Weather::Rainy,
                Weather::Snowy
            ]
        );
        assert_eq!(state.cycle_weather(), Weather::Clear);
    }

    #[test]
    fn test_hud_caches_until_marked_dirty() {
        let mut state = state();
        state.update_ads_counts(5, 3);
        state.update_cached_hud(TimeOfDay::Day);
        let first = state.cached_hud.clone();
        assert!(first.contains("Ads: 3/5"));

        state.update_cached_hud(TimeOfDay::Day);
        assert_eq!(state.cached_hud, first);

        state.cycle_season();
        state.update_cached_hud(TimeOfDay::Day);
        assert!(state.cached_hud.contains("autumn"));
    }

    #[test]
    fn test_ads_error_takes_over_the_hud() {
        let mut state = state();
        state.set_ads_error("Error loading ads: boom".to_string());
        state.update_cached_hud(TimeOfDay::Day);
        assert!(state.cached_hud.starts_with("Error loading ads"));

        state.update_ads_counts(2, 2);
        state.update_cached_hud(TimeOfDay::Day);
        assert!(state.cached_hud.contains("Ads: 2/2"));
    }

    #[test]
    fn test_night_override_label() {
        let mut state = state();
        assert_eq!(state.time_of_day_label(TimeOfDay::Day), "day");
        state.toggle_night();
        assert_eq!(state.time_of_day_label(TimeOfDay::Day), "night (forced)");
    }

    #[test]
    fn test_selection_stores_the_ad_snapshot() {
        let mut state = state();
        let ad = ads::samples().remove(0);
        state.select(Some(ad.clone()));
        assert_eq!(state.selected_ad, Some(ad));
        state.select(None);
        assert_eq!(state.selected_ad, None);
    }
}
