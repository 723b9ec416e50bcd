//! Editor configuration with runtime-adjustable defaults.

use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct EditorConfig {
    pub tab_size: u8,
    /// Lines per wheel notch.
    pub scroll_lines: usize,
    pub show_line_numbers: bool,
    /// Debounce window for minimap regeneration.
    pub minimap_debounce_ms: u64,
    pub minimap_width: u16,
    /// Overview lines are truncated to this many characters before draw.
    pub minimap_max_line_chars: usize,
    pub sidebar_width_percent: u16,
    /// Directory searched for `<name>.json` theme overlays on switch.
    pub theme_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: 4,
            scroll_lines: 1,
            show_line_numbers: true,
            minimap_debounce_ms: 120,
            minimap_width: 20,
            minimap_max_line_chars: 200,
            sidebar_width_percent: 20,
            theme_dir: PathBuf::from("themes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.tab_size, 4);
        assert_eq!(config.minimap_debounce_ms, 120);
        assert_eq!(config.minimap_max_line_chars, 200);
        assert!(config.show_line_numbers);
        assert_eq!(config.theme_dir, PathBuf::from("themes"));
    }
}
