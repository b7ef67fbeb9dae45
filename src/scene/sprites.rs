use crate::ads::VehicleType;

pub const AIRPLANE: &[&str] = &[
    "    __",
    "<==(__)==>",
    "     \\\\",
];

pub const BALLOON: &[&str] = &[
    " .----.",
    "(      )",
    " `-..-'",
    "  \\  /",
    "  [__]",
];

pub const AIRSHIP: &[&str] = &[
    " ._________.",
    "(___________)=>",
    "     [==]",
];

pub const CLOUD: &[&str] = &[
    "   .--.",
    " .(    ).",
    "(___.__)__)",
];

pub const SUN: &[&str] = &[
    "\\ | /",
    "- O -",
    "/ | \\",
];

pub const MOON: &[&str] = &[
    " __",
    "(  `",
    " \\__,",
];

pub fn vehicle_sprite(vehicle: VehicleType) -> &'static [&'static str] {
    match vehicle {
        VehicleType::Airplane => AIRPLANE,
        VehicleType::Balloon => BALLOON,
        VehicleType::Airship | VehicleType::Unknown => AIRSHIP,
    }
}
