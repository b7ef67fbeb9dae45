use clap::Parser;
use skywrite::app::App;
use skywrite::config::Config;
use skywrite::engine::{Season, Weather};
use skywrite::render::TerminalRenderer;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about = "An animated terminal sky full of flying advertisements", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "CONDITION",
        help = "Override the weather condition (clear, cloudy, rainy, snowy)"
    )]
    weather: Option<String>,

    #[arg(
        short = 'S',
        long,
        value_name = "SEASON",
        help = "Override the season (spring, summer, autumn, winter)"
    )]
    season: Option<String>,

    #[arg(short, long, help = "Force night time (moon and stars)")]
    night: bool,

    #[arg(long, value_name = "SEED", help = "Fix the simulation seed")]
    seed: Option<u64>,

    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "JSON file with advertisement bookings, reloaded periodically"
    )]
    ads: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            eprintln!("\nContinuing with the default scene (clear summer day)");
            eprintln!("\nTo customize, create a config file at:");
            eprintln!("  $XDG_CONFIG_HOME/skywrite/config.toml");
            eprintln!("  or ~/.config/skywrite/config.toml");
            eprintln!("\nExample config.toml:");
            eprintln!("  [scene]");
            eprintln!("  weather = \"rainy\"");
            eprintln!("  season = \"autumn\"");
            eprintln!();
            Config::default()
        }
    };

    if let Some(ref weather_str) = cli.weather {
        match weather_str.parse::<Weather>() {
            Ok(weather) => config.scene.weather = weather,
            Err(e) => eprintln!("{}", e),
        }
    }
    if let Some(ref season_str) = cli.season {
        match season_str.parse::<Season>() {
            Ok(season) => config.scene.season = season,
            Err(e) => eprintln!("{}", e),
        }
    }
    if cli.seed.is_some() {
        config.scene.seed = cli.seed;
    }
    if cli.ads.is_some() {
        config.ads.file = cli.ads;
    }

    let seed = config.scene.seed.unwrap_or_else(|| rand::random());

    let mut renderer = TerminalRenderer::new()?;
    renderer.init()?;

    let (term_width, term_height) = renderer.get_size();

    let mut app = App::new(&config, seed, term_width, term_height);
    if cli.night {
        app.force_night();
    }

    let result = app.run(&mut renderer).await;

    renderer.cleanup()?;

    result
}
