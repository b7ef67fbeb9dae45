pub mod sprites;

use crossterm::style::Color;
use std::io;

use crate::app_state::SceneState;
use crate::engine::vehicles::VehicleEntity;
use crate::engine::{celestial, environment, SceneEngine, StageSize, TimeOfDay, Weather};
use crate::render::{to_term_color, TerminalRenderer};

/// Stage units per terminal cell. Cells are roughly twice as tall as
/// they are wide, so the vertical step is doubled to keep the scene
/// proportions square-ish.
pub const CELL_W: f32 = 10.0;
pub const CELL_H: f32 = 20.0;

pub fn stage_for(term_width: u16, term_height: u16) -> StageSize {
    StageSize {
        width: term_width as f32 * CELL_W,
        height: term_height as f32 * CELL_H,
    }
}

/// Stage coordinates of a cell's center, for mouse hit-testing.
pub fn cell_to_stage(col: u16, row: u16) -> (f32, f32) {
    ((col as f32 + 0.5) * CELL_W, (row as f32 + 0.5) * CELL_H)
}

fn to_col(x: f32) -> Option<u16> {
    let col = (x / CELL_W).floor();
    (col >= 0.0 && col <= u16::MAX as f32).then(|| col as u16)
}

fn to_row(y: f32) -> Option<u16> {
    let row = (y / CELL_H).floor();
    (row >= 0.0 && row <= u16::MAX as f32).then(|| row as u16)
}

/// Splits a banner message into display lines of at most
/// `chars_per_line` characters, breaking on whitespace where one fits.
pub fn wrap_message(message: &str, chars_per_line: usize) -> Vec<String> {
    let chars_per_line = chars_per_line.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in message.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if current.is_empty() {
            current = word.to_string();
        } else if current_len + 1 + word_len <= chars_per_line {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }

        // Words longer than a full line are hard-split.
        while current.chars().count() > chars_per_line {
            let head: String = current.chars().take(chars_per_line).collect();
            let tail: String = current.chars().skip(chars_per_line).collect();
            lines.push(head);
            current = tail;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn banner_style(vehicle: crate::ads::VehicleType) -> (Color, Color) {
    match vehicle {
        // LED board: amber dots on a dark housing.
        crate::ads::VehicleType::Airship => (
            Color::Rgb {
                r: 255,
                g: 176,
                b: 0,
            },
            Color::Rgb { r: 20, g: 20, b: 20 },
        ),
        _ => (
            Color::Rgb { r: 30, g: 30, b: 30 },
            Color::Rgb {
                r: 245,
                g: 245,
                b: 240,
            },
        ),
    }
}

/// Paints one frame from the engine's current state. Draw order is
/// fixed: sky, stars, sun or moon, clouds, terrain, vehicles,
/// precipitation, HUD, selection panel.
pub struct SkyScene;

impl SkyScene {
    pub fn render(
        renderer: &mut TerminalRenderer,
        engine: &mut SceneEngine,
        state: &SceneState,
        time_of_day: TimeOfDay,
    ) -> io::Result<()> {
        let stage = engine.stage();
        let weather = engine.weather();
        let season = engine.season();

        renderer.clear_with_background(celestial::background_color(time_of_day, weather))?;

        let cloud_band_end = engine.config().clouds.band_end;
        let ground_color = to_term_color(engine.config().terrain.ground_color(season));
        let terrain = engine.config().terrain.clone();
        let field = engine.environment().clone();

        if time_of_day == TimeOfDay::Night {
            Self::render_stars(renderer, &field.stars)?;
        }

        Self::render_celestial(renderer, time_of_day, stage, cloud_band_end)?;
        Self::render_clouds(renderer, &field, time_of_day)?;
        Self::render_terrain(renderer, &field, stage, &terrain, ground_color)?;

        for vehicle in engine.vehicles() {
            Self::render_vehicle(renderer, vehicle)?;
        }

        Self::render_particles(renderer, engine)?;

        if !state.hide_hud {
            renderer.render_line_colored(2, 1, &state.cached_hud, Color::Cyan)?;
        }
        if let Some(ref ad) = state.selected_ad {
            Self::render_selection_panel(renderer, ad)?;
        }

        renderer.flush()
    }

    fn render_stars(renderer: &mut TerminalRenderer, stars: &[environment::Star]) -> io::Result<()> {
        for star in stars {
            if let (Some(col), Some(row)) = (to_col(star.x), to_row(star.y)) {
                let glyph = if star.radius > 1.2 { '+' } else { '.' };
                renderer.render_char(col, row, glyph, Color::White)?;
            }
        }
        Ok(())
    }

    fn render_celestial(
        renderer: &mut TerminalRenderer,
        time_of_day: TimeOfDay,
        stage: StageSize,
        cloud_band_end: f32,
    ) -> io::Result<()> {
        let body = celestial::celestial_body(time_of_day, stage, cloud_band_end);
        let (sprite, color) = match body.kind {
            celestial::CelestialKind::Sun => (sprites::SUN, Color::Yellow),
            celestial::CelestialKind::Moon => (sprites::MOON, Color::White),
        };
        if let (Some(col), Some(row)) = (to_col(body.x), to_row(body.y)) {
            Self::draw_sprite(renderer, col, row, sprite, color)?;
        }
        Ok(())
    }

    fn render_clouds(
        renderer: &mut TerminalRenderer,
        field: &environment::Environment,
        time_of_day: TimeOfDay,
    ) -> io::Result<()> {
        let color = match time_of_day {
            TimeOfDay::Day => Color::White,
            TimeOfDay::Night => Color::Grey,
        };
        for cloud in &field.clouds {
            if let (Some(col), Some(row)) = (to_col(cloud.x), to_row(cloud.y)) {
                Self::draw_sprite(renderer, col, row, sprites::CLOUD, color)?;
            }
        }
        Ok(())
    }

    fn render_terrain(
        renderer: &mut TerminalRenderer,
        field: &environment::Environment,
        stage: StageSize,
        terrain: &crate::engine::config::TerrainConfig,
        ground_color: Color,
    ) -> io::Result<()> {
        let term_width = (stage.width / CELL_W) as u16;
        let term_height = (stage.height / CELL_H).ceil() as u16;

        // Solid strip following the wavy ground line.
        for col in 0..term_width {
            let x = (col as f32 + 0.5) * CELL_W;
            let ground_y = environment::ground_line(x, stage.height, terrain);
            if let Some(top_row) = to_row(ground_y) {
                for row in top_row..term_height {
                    renderer.render_cell(col, row, ' ', ground_color, ground_color)?;
                }
            }
        }

        for decoration in &field.decorations {
            if let (Some(col), Some(row)) = (to_col(decoration.x), to_row(decoration.y)) {
                let glyph = if decoration.size > 4.0 { '*' } else { '.' };
                renderer.render_cell(col, row, glyph, to_term_color(decoration.color), ground_color)?;
            }
        }

        for tree in &field.trees {
            Self::render_tree(renderer, tree, ground_color)?;
        }

        Ok(())
    }

    fn render_tree(
        renderer: &mut TerminalRenderer,
        tree: &environment::Tree,
        ground_color: Color,
    ) -> io::Result<()> {
        let (Some(col), Some(base_row)) = (to_col(tree.x), to_row(tree.y)) else {
            return Ok(());
        };
        let rows = ((tree.height / CELL_H).ceil() as u16).max(2);
        let foliage = to_term_color(tree.color);
        let trunk = Color::Rgb {
            r: 101,
            g: 67,
            b: 33,
        };

        // Foliage tiers stack above a one-cell trunk.
        for i in 0..rows.saturating_sub(1) {
            let row = base_row.saturating_sub(2 + i);
            renderer.render_char(col, row, '^', foliage)?;
        }
        renderer.render_cell(col, base_row.saturating_sub(1), '|', trunk, ground_color)?;
        Ok(())
    }

    fn render_vehicle(renderer: &mut TerminalRenderer, vehicle: &VehicleEntity) -> io::Result<()> {
        let sprite = sprites::vehicle_sprite(vehicle.ad.vehicle_type);
        let sprite_rows = sprite.len() as f32;
        let icon_row_y = vehicle.y - sprite_rows * CELL_H / 2.0;

        if let Some(ref banner) = vehicle.banner {
            let cols = ((banner.width / CELL_W).round() as usize).max(1);
            let lines = wrap_message(&vehicle.ad.message, banner.chars_per_line);
            let (fg, bg) = banner_style(vehicle.ad.vehicle_type);

            let banner_left = vehicle.x - banner.width - 10.0;
            let banner_top = vehicle.y - banner.height / 2.0;
            for (i, line) in lines.iter().take(banner.line_count).enumerate() {
                let padded = format!("{line:^cols$}");
                let y = banner_top + i as f32 * CELL_H;
                if let (Some(col), Some(row)) = (to_col(banner_left), to_row(y)) {
                    renderer.render_line_on(col, row, &padded, fg, bg)?;
                }
            }
        }

        if let (Some(col), Some(row)) = (to_col(vehicle.x), to_row(icon_row_y)) {
            Self::draw_sprite(renderer, col, row, sprite, Color::White)?;
        }
        Ok(())
    }

    fn render_particles(renderer: &mut TerminalRenderer, engine: &SceneEngine) -> io::Result<()> {
        match engine.weather() {
            Weather::Rainy => {
                let color = Color::Rgb { r: 0, g: 50, b: 154 };
                for drop in &engine.particles().rain {
                    if let (Some(col), Some(row)) = (to_col(drop.x), to_row(drop.y)) {
                        renderer.render_char(col, row, '/', color)?;
                    }
                }
            }
            Weather::Snowy => {
                for flake in &engine.particles().snow {
                    if let (Some(col), Some(row)) = (to_col(flake.x), to_row(flake.y)) {
                        renderer.render_char(col, row, '*', Color::White)?;
                    }
                }
            }
            Weather::Clear | Weather::Cloudy => {}
        }
        Ok(())
    }

    fn render_selection_panel(renderer: &mut TerminalRenderer, ad: &crate::ads::Ad) -> io::Result<()> {
        let bg = Color::Rgb { r: 25, g: 25, b: 35 };
        let fg = Color::White;
        let width = 44usize;

        let mut lines = vec![
            format!("Ad      : {}", ad.id),
            format!("Vehicle : {}", ad.vehicle_type.label()),
            format!("Duration: {}", ad.duration.label()),
        ];
        for (i, line) in wrap_message(&ad.message, width - 12).into_iter().enumerate() {
            if i == 0 {
                lines.push(format!("Message : {line}"));
            } else {
                lines.push(format!("          {line}"));
            }
        }
        lines.push("Esc to close".to_string());

        for (i, line) in lines.iter().enumerate() {
            let padded = format!(" {line:<width$}");
            renderer.render_line_on(2, 3 + i as u16, &padded, fg, bg)?;
        }
        Ok(())
    }

    fn draw_sprite(
        renderer: &mut TerminalRenderer,
        col: u16,
        row: u16,
        sprite: &[&str],
        color: Color,
    ) -> io::Result<()> {
        for (dy, line) in sprite.iter().enumerate() {
            for (dx, c) in line.chars().enumerate() {
                if c == ' ' {
                    continue;
                }
                let x = col.saturating_add(dx as u16);
                let y = row.saturating_add(dy as u16);
                renderer.render_char(x, y, c, color)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_mapping_scales_cells() {
        let stage = stage_for(120, 40);
        assert_eq!(stage.width, 1200.0);
        assert_eq!(stage.height, 800.0);
    }

    #[test]
    fn test_cell_center_round_trips_through_to_col() {
        let (x, y) = cell_to_stage(17, 9);
        assert_eq!(to_col(x), Some(17));
        assert_eq!(to_row(y), Some(9));
    }

    #[test]
    fn test_offscreen_coordinates_map_to_none() {
        assert_eq!(to_col(-15.0), None);
        assert_eq!(to_row(-0.1), None);
        assert_eq!(to_col(0.0), Some(0));
    }

    #[test]
    fn test_wrap_message_respects_line_width() {
        let lines = wrap_message("visit the night market every friday evening", 14);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 14, "line too long: {line:?}");
        }
    }

    #[test]
    fn test_wrap_message_hard_splits_long_words() {
        let lines = wrap_message("supercalifragilistic", 6);
        assert_eq!(lines[0].chars().count(), 6);
        assert!(lines.len() >= 3);
    }

    #[test]
    fn test_wrap_message_empty_input() {
        assert_eq!(wrap_message("", 10), vec![String::new()]);
    }
}
