//! Clamps out-of-range configuration values in place and logs a warning,
//! mirroring the teacher's `config/validate/*.rs` clamp-and-log pattern
//! (e.g. `validate_history`) rather than failing construction outright —
//! the same "log and silently repair" policy spec.md §7 calls for on
//! `HistoryStateError`, applied here to config at load time.

use super::Config;

fn clamp_f64(label: &str, value: &mut f64, min: f64, max: f64) {
    if *value < min {
        log::warn!("{label} {value} too small; clamping to {min}");
        *value = min;
    } else if *value > max {
        log::warn!("{label} {value} too large; clamping to {max}");
        *value = max;
    }
}

fn clamp_usize(label: &str, value: &mut usize, min: usize, max: usize) {
    if *value < min {
        log::warn!("{label} {value} too small; clamping to {min}");
        *value = min;
    } else if *value > max {
        log::warn!("{label} {value} too large; clamping to {max}");
        *value = max;
    }
}

impl Config {
    /// Validates and clamps every numeric setting to a sane range. Called
    /// once after deserializing a settings tree from whatever transport
    /// the host application uses (file, IPC, embedded defaults).
    pub fn validate_and_clamp(&mut self) {
        self.validate_recognizer();
        self.validate_history();
        self.validate_cache();
        self.validate_selection();
        self.validate_page_part_threshold();
    }

    fn validate_recognizer(&mut self) {
        let r = &mut self.recognizer;
        clamp_f64("recognizer.line_sensitivity", &mut r.line_sensitivity, 0.001, 1.0);
        clamp_f64("recognizer.snap_angle", &mut r.snap_angle, 0.0, 0.5);
        clamp_f64(
            "recognizer.ellipse_sensitivity",
            &mut r.ellipse_sensitivity,
            0.001,
            1.0,
        );
        clamp_f64(
            "recognizer.ellipse_to_circle_snapping",
            &mut r.ellipse_to_circle_snapping,
            0.0,
            0.5,
        );
        clamp_f64(
            "recognizer.rect_angle_tolerance",
            &mut r.rect_angle_tolerance,
            0.01,
            1.0,
        );
        clamp_f64(
            "recognizer.rect_closing_tolerance",
            &mut r.rect_closing_tolerance,
            0.001,
            1.0,
        );
    }

    fn validate_history(&mut self) {
        clamp_usize(
            "history.history_length_visible_slides",
            &mut self.history.history_length_visible_slides,
            1,
            10_000,
        );
        clamp_usize(
            "history.history_length_hidden_slides",
            &mut self.history.history_length_hidden_slides,
            0,
            10_000,
        );
        if self.history.history_length_hidden_slides > self.history.history_length_visible_slides {
            log::warn!(
                "history_length_hidden_slides ({}) exceeds history_length_visible_slides ({}); clamping down",
                self.history.history_length_hidden_slides,
                self.history.history_length_visible_slides
            );
            self.history.history_length_hidden_slides = self.history.history_length_visible_slides;
        }
    }

    fn validate_cache(&mut self) {
        if self.cache.max_memory == 0 {
            log::warn!("cache.max_memory is 0; nothing would ever be cached, using 64MiB instead");
            self.cache.max_memory = 64 * 1024 * 1024;
        }
        clamp_usize("cache.max_cache_pages", &mut self.cache.max_cache_pages, 1, 100_000);
    }

    fn validate_selection(&mut self) {
        clamp_f64(
            "selection.selection_rect_handle_size",
            &mut self.selection.selection_rect_handle_size,
            2.0,
            64.0,
        );
        clamp_f64(
            "selection.path_min_selectable_width",
            &mut self.selection.path_min_selectable_width,
            1.0,
            64.0,
        );
    }

    fn validate_page_part_threshold(&mut self) {
        clamp_f64("page_part_threshold", &mut self.page_part_threshold, 0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_inverted_history_bounds() {
        let mut config = Config {
            history: super::super::HistoryConfig {
                history_length_visible_slides: 5,
                history_length_hidden_slides: 50,
            },
            ..Config::default()
        };
        config.validate_and_clamp();
        assert_eq!(config.history.history_length_hidden_slides, 5);
    }

    #[test]
    fn clamps_zero_cache_memory() {
        let mut config = Config {
            cache: super::super::CacheConfig {
                max_memory: 0,
                max_cache_pages: 10,
            },
            ..Config::default()
        };
        config.validate_and_clamp();
        assert!(config.cache.max_memory > 0);
    }

    #[test]
    fn clamps_out_of_range_recognizer_threshold() {
        let mut config = Config::default();
        config.recognizer.snap_angle = 10.0;
        config.validate_and_clamp();
        assert!(config.recognizer.snap_angle <= 0.5);
    }
}
