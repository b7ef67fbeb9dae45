use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::AdsError;

/// Messages longer than this are cut before layout; anything beyond it
/// would exceed the widest banner anyway.
pub const MAX_MESSAGE_CHARS: usize = 240;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Airplane,
    Balloon,
    Airship,
    /// Forward-compatible catch-all for vehicle types this build does
    /// not know about.
    #[serde(other)]
    Unknown,
}

impl VehicleType {
    pub fn label(self) -> &'static str {
        match self {
            VehicleType::Airplane => "airplane",
            VehicleType::Balloon => "balloon",
            VehicleType::Airship => "airship",
            VehicleType::Unknown => "unknown",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdDuration {
    #[serde(rename = "1d")]
    OneDay,
    #[default]
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1m")]
    OneMonth,
}

impl AdDuration {
    pub fn label(self) -> &'static str {
        match self {
            AdDuration::OneDay => "1 day",
            AdDuration::OneWeek => "1 week",
            AdDuration::OneMonth => "1 month",
        }
    }
}

/// One advertisement booking as stored in the ads file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    pub id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub vehicle_type: VehicleType,
    #[serde(default)]
    pub duration: AdDuration,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Reduces a raw ads snapshot to what the scene will fly: inactive
/// bookings are dropped, overlong messages are cut at the character
/// limit, and unknown vehicle types fall back to the airplane.
pub fn sanitize(ads: Vec<Ad>) -> Vec<Ad> {
    ads.into_iter()
        .filter(|ad| ad.active)
        .map(|mut ad| {
            if ad.message.chars().count() > MAX_MESSAGE_CHARS {
                ad.message = ad.message.chars().take(MAX_MESSAGE_CHARS).collect();
            }
            if ad.vehicle_type == VehicleType::Unknown {
                ad.vehicle_type = VehicleType::Airplane;
            }
            ad
        })
        .collect()
}

pub fn load_from_json(content: &str) -> Result<Vec<Ad>, AdsError> {
    let ads: Vec<Ad> = serde_json::from_str(content)?;
    Ok(sanitize(ads))
}

pub fn load_from_path(path: &Path) -> Result<Vec<Ad>, AdsError> {
    let content = std::fs::read_to_string(path).map_err(|e| AdsError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    load_from_json(&content)
}

/// Built-in bookings shown when no ads file is configured, so the
/// scene is never empty on first launch.
pub fn samples() -> Vec<Ad> {
    vec![
        Ad {
            id: "sample-1".to_string(),
            message: "Grand opening! Visit Joe's Diner on 5th street".to_string(),
            vehicle_type: VehicleType::Airplane,
            duration: AdDuration::OneWeek,
            active: true,
        },
        Ad {
            id: "sample-2".to_string(),
            message: "Summer sale at the marina, all boats 20% off".to_string(),
            vehicle_type: VehicleType::Balloon,
            duration: AdDuration::OneMonth,
            active: true,
        },
        Ad {
            id: "sample-3".to_string(),
            message: "LIVE MUSIC TONIGHT".to_string(),
            vehicle_type: VehicleType::Airship,
            duration: AdDuration::OneDay,
            active: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_camel_case_fields() {
        let json = r#"[
            {
                "id": "a1",
                "message": "fly with us",
                "vehicleType": "balloon",
                "duration": "1m",
                "active": true
            }
        ]"#;
        let ads = load_from_json(json).unwrap();
        assert_eq!(ads.len(), 1);
        assert_eq!(ads[0].id, "a1");
        assert_eq!(ads[0].vehicle_type, VehicleType::Balloon);
        assert_eq!(ads[0].duration, AdDuration::OneMonth);
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let json = r#"[{"id": "bare"}]"#;
        let ads = load_from_json(json).unwrap();
        assert_eq!(ads[0].message, "");
        assert_eq!(ads[0].vehicle_type, VehicleType::Airplane);
        assert_eq!(ads[0].duration, AdDuration::OneWeek);
        assert!(ads[0].active);
    }

    #[test]
    fn test_unknown_vehicle_type_falls_back_to_airplane() {
        let json = r#"[{"id": "x", "vehicleType": "zeppelin"}]"#;
        let ads = load_from_json(json).unwrap();
        assert_eq!(ads[0].vehicle_type, VehicleType::Airplane);
    }

    #[test]
    fn test_inactive_ads_are_filtered_out() {
        let json = r#"[
            {"id": "on", "active": true},
            {"id": "off", "active": false}
        ]"#;
        let ads = load_from_json(json).unwrap();
        assert_eq!(ads.len(), 1);
        assert_eq!(ads[0].id, "on");
    }

    #[test]
    fn test_overlong_messages_are_truncated() {
        let long: String = "é".repeat(MAX_MESSAGE_CHARS + 50);
        let ads = sanitize(vec![Ad {
            id: "long".to_string(),
            message: long,
            vehicle_type: VehicleType::Airplane,
            duration: AdDuration::OneDay,
            active: true,
        }]);
        assert_eq!(ads[0].message.chars().count(), MAX_MESSAGE_CHARS);
    }

    #[test]
    fn test_load_from_path_file_not_found() {
        let path = PathBuf::from("/tmp/nonexistent_skywrite_ads_12345.json");
        let result = load_from_path(&path);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), "ReadError");
    }

    #[test]
    fn test_load_from_json_invalid() {
        let result = load_from_json("{ not json");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), "ParseError");
    }

    #[test]
    fn test_load_from_path_round_trip() {
        let path = std::env::temp_dir().join("skywrite_test_ads_roundtrip.json");
        let json = serde_json::to_string(&samples()).unwrap();
        std::fs::write(&path, json).unwrap();

        let ads = load_from_path(&path).unwrap();
        assert_eq!(ads, samples());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_samples_are_already_sane() {
        let ads = sanitize(samples());
        assert_eq!(ads.len(), 3);
        for ad in &ads {
            assert!(ad.active);
            assert!(ad.message.chars().count() <= MAX_MESSAGE_CHARS);
        }
    }
}
