use crate::ads::{self, Ad};
use crate::app_state::SceneState;
use crate::config::Config;
use crate::engine::clock::FrameClock;
use crate::engine::config::EngineConfig;
use crate::engine::{celestial, SceneEngine, TimeOfDay};
use crate::render::TerminalRenderer;
use crate::scene::{self, SkyScene};
use chrono::{Local, Timelike};
use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

const INPUT_POLL_FPS: u64 = 30;
const FRAME_DURATION: Duration = Duration::from_millis(1000 / INPUT_POLL_FPS);
const DAY_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// A check timestamp already past the interval, so the next
/// `refresh_time_of_day` runs right away.
fn day_check_due_now() -> Instant {
    Instant::now()
        .checked_sub(DAY_CHECK_INTERVAL)
        .unwrap_or_else(Instant::now)
}

pub struct App {
    engine: SceneEngine,
    state: SceneState,
    clock: FrameClock,
    time_of_day: TimeOfDay,
    last_day_check: Instant,
    ads_receiver: Option<mpsc::Receiver<Result<Vec<Ad>, String>>>,
}

impl App {
    pub fn new(config: &Config, seed: u64, term_width: u16, term_height: u16) -> Self {
        let stage = scene::stage_for(term_width, term_height);
        let engine_config = EngineConfig {
            seed,
            ..EngineConfig::default()
        };

        let mut engine = SceneEngine::new(engine_config, stage);
        engine.set_weather(config.scene.weather);
        engine.set_season(config.scene.season);

        let mut state = SceneState::new(
            config.scene.weather,
            config.scene.season,
            false,
            config.scene.hide_hud,
        );

        let ads_receiver = if let Some(path) = config.ads.file.clone() {
            let (tx, rx) = mpsc::channel(1);
            let reload = Duration::from_secs(config.ads.reload_secs);

            tokio::spawn(async move {
                loop {
                    let result = match tokio::fs::read_to_string(&path).await {
                        Ok(content) => ads::load_from_json(&content).map_err(|e| e.to_string()),
                        Err(e) => {
                            Err(format!("could not read ads file {}: {}", path.display(), e))
                        }
                    };
                    if tx.send(result).await.is_err() {
                        break;
                    }
                    tokio::time::sleep(reload).await;
                }
            });
            Some(rx)
        } else {
            let samples = ads::samples();
            let total = samples.len();
            engine.sync_ads(samples);
            state.update_ads_counts(total, engine.vehicles().len());
            None
        };

        let max_delta = engine.config().max_frame_delta_ms;
        Self {
            engine,
            state,
            clock: FrameClock::new(max_delta),
            time_of_day: TimeOfDay::Day,
            last_day_check: day_check_due_now(),
            ads_receiver,
        }
    }

    pub fn force_night(&mut self) {
        self.state.night_override = true;
    }

    fn refresh_time_of_day(&mut self) {
        if self.state.night_override {
            self.time_of_day = TimeOfDay::Night;
            return;
        }
        if self.last_day_check.elapsed() < DAY_CHECK_INTERVAL {
            return;
        }
        self.last_day_check = Instant::now();
        self.time_of_day = celestial::time_of_day_for_hour(Local::now().hour());
    }

    pub async fn run(&mut self, renderer: &mut TerminalRenderer) -> io::Result<()> {
        loop {
            if let Some(ref mut receiver) = self.ads_receiver {
                if let Ok(result) = receiver.try_recv() {
                    match result {
                        Ok(ads) => {
                            let total = ads.len();
                            self.engine.sync_ads(ads);
                            self.state
                                .update_ads_counts(total, self.engine.vehicles().len());
                        }
                        Err(e) => {
                            self.state
                                .set_ads_error(format!("Error loading ads: {}", e));
                        }
                    }
                }
            }

            self.refresh_time_of_day();

            let delta_ms = self.clock.tick();
            self.engine.advance(delta_ms);

            self.state.update_cached_hud(self.time_of_day);
            SkyScene::render(renderer, &mut self.engine, &self.state, self.time_of_day)?;

            if event::poll(FRAME_DURATION)? {
                match event::read()? {
                    Event::Resize(width, height) => {
                        renderer.manual_resize(width, height)?;
                        self.engine.resize(scene::stage_for(width, height));
                    }
                    Event::Mouse(mouse) => {
                        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                            let (x, y) = scene::cell_to_stage(mouse.column, mouse.row);
                            let selected = self.engine.hit_test(x, y).map(|v| v.ad.clone());
                            self.state.select(selected);
                        }
                    }
                    Event::Key(key_event) => match key_event.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => break,
                        KeyCode::Char('c')
                            if key_event.modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            break;
                        }
                        KeyCode::Char('w') => {
                            let weather = self.state.cycle_weather();
                            self.engine.set_weather(weather);
                        }
                        KeyCode::Char('s') => {
                            let season = self.state.cycle_season();
                            self.engine.set_season(season);
                        }
                        KeyCode::Char('n') => {
                            self.state.toggle_night();
                            // Re-evaluate immediately instead of
                            // waiting for the next scheduled check.
                            self.last_day_check = day_check_due_now();
                        }
                        KeyCode::Esc => {
                            self.state.select(None);
                        }
                        _ => {}
                    },
                    _ => {}
                }
            }
        }

        Ok(())
    }
}
