use super::config::BannerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Monospace,
    SansSerif,
}

/// Estimated banner geometry for one advertisement message. This is a
/// conservative heuristic rather than exact text shaping; the output
/// feeds both rendering and the vehicle wraparound distance.
#[derive(Debug, Clone, PartialEq)]
pub struct BannerLayout {
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    pub line_count: usize,
    pub chars_per_line: usize,
}

/// Computes banner dimensions from the message length, the glyph-width
/// estimate for the font family, and the viewport constraints.
/// Degenerate viewports (width <= 0) collapse to the minimum banner
/// width instead of producing negative geometry.
pub fn layout(
    message: &str,
    viewport_width: f32,
    icon_size: f32,
    font: FontFamily,
    cfg: &BannerConfig,
) -> BannerLayout {
    let glyph_factor = match font {
        FontFamily::Monospace => cfg.monospace_glyph_factor,
        FontFamily::SansSerif => cfg.sans_glyph_factor,
    };
    let glyph_width = cfg.font_size * glyph_factor;
    let char_count = message.chars().count();

    let raw_width = char_count as f32 * glyph_width + cfg.horizontal_padding;
    let fraction = if viewport_width <= cfg.narrow_viewport_max {
        cfg.narrow_fraction
    } else {
        cfg.wide_fraction
    };
    let max_width = fraction * viewport_width - icon_size - cfg.vehicle_margin;
    // The floor wins when the cap collapses below it.
    let width = raw_width.min(max_width).max(cfg.min_width);

    let chars_per_line = (((width - cfg.horizontal_padding) / glyph_width).floor() as usize).max(1);
    let line_count = char_count.div_ceil(chars_per_line).max(cfg.min_lines);

    let line_height = cfg.font_size * cfg.line_height_factor;
    let min_height = line_height * cfg.min_lines as f32 + cfg.box_padding;
    let height = (line_height * line_count as f32 + cfg.box_padding).max(min_height);

    BannerLayout {
        width,
        height,
        font_size: cfg.font_size,
        line_count,
        chars_per_line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> BannerConfig {
        BannerConfig::default()
    }

    #[test]
    fn test_width_respects_floor_and_cap() {
        let cfg = cfg();
        for len in [0usize, 1, 10, 60, 120, 240] {
            let message: String = "x".repeat(len);
            let narrow = layout(&message, 360.0, 80.0, FontFamily::SansSerif, &cfg);
            assert!(narrow.width >= cfg.min_width);
            assert!(narrow.width <= 360.0 * cfg.narrow_fraction);

            let wide = layout(&message, 1920.0, 80.0, FontFamily::SansSerif, &cfg);
            assert!(wide.width >= cfg.min_width);
            assert!(wide.width <= 1920.0 * cfg.wide_fraction);
        }
    }

    #[test]
    fn test_width_monotonically_non_decreasing_in_length() {
        let cfg = cfg();
        let mut last = 0.0;
        for len in 0..=240 {
            let message: String = "m".repeat(len);
            let banner = layout(&message, 1200.0, 80.0, FontFamily::SansSerif, &cfg);
            assert!(
                banner.width >= last,
                "width shrank from {} to {} at length {}",
                last,
                banner.width,
                len
            );
            last = banner.width;
        }
    }

    #[test]
    fn test_monospace_glyphs_are_wider() {
        let cfg = cfg();
        let message = "GRAND OPENING THIS WEEKEND";
        let led = layout(message, 1920.0, 80.0, FontFamily::Monospace, &cfg);
        let sans = layout(message, 1920.0, 80.0, FontFamily::SansSerif, &cfg);
        assert!(led.width > sans.width);
    }

    #[test]
    fn test_line_count_floor_is_two() {
        let banner = layout("hi", 1920.0, 80.0, FontFamily::SansSerif, &cfg());
        assert_eq!(banner.line_count, 2);
    }

    #[test]
    fn test_degenerate_viewport_clamps_to_floor() {
        let cfg = cfg();
        for width in [0.0, -50.0] {
            let banner = layout("some message", width, 80.0, FontFamily::SansSerif, &cfg);
            assert_eq!(banner.width, cfg.min_width);
            assert!(banner.height.is_finite());
            assert!(banner.height > 0.0);
        }
    }

    #[test]
    fn test_long_message_wraps_to_more_lines() {
        let cfg = cfg();
        let short = layout(&"a".repeat(20), 800.0, 80.0, FontFamily::SansSerif, &cfg);
        let long = layout(&"a".repeat(240), 800.0, 80.0, FontFamily::SansSerif, &cfg);
        assert!(long.line_count > short.line_count);
        assert!(long.height > short.height);
    }
}
