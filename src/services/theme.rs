//! Theme provider: color and dimension lookup by dotted key.
//!
//! Built-in dark and light palettes, optionally overridden by a
//! `<name>.json` file ({"colors": {...}, "dimensions": {...}}).
//! Lookup failures fall back to the caller-supplied default; a load
//! failure degrades to the built-in palette with a warning instead of
//! failing the application. Constructed once by the workbench and
//! passed by reference, never a global.

use ratatui::style::Color;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ThemeFile {
    #[serde(default)]
    colors: HashMap<String, String>,
    #[serde(default)]
    dimensions: HashMap<String, i64>,
}

pub struct ThemeProvider {
    colors: FxHashMap<String, Color>,
    dimensions: FxHashMap<String, i64>,
    name: String,
    generation: u64,
}

impl ThemeProvider {
    pub fn dark() -> Self {
        let mut colors = FxHashMap::default();
        for (key, value) in [
            ("editor.background", Color::Rgb(0x1e, 0x1e, 0x1e)),
            ("editor.foreground", Color::Rgb(0xd4, 0xd4, 0xd4)),
            ("editor.currentLine", Color::Rgb(0x2a, 0x2a, 0x2a)),
            ("editor.lineNumber.background", Color::Rgb(0x1e, 0x1e, 0x1e)),
            ("editor.lineNumber.foreground", Color::Rgb(0x6e, 0x76, 0x81)),
            ("editor.tab.background", Color::Rgb(0x25, 0x25, 0x26)),
            ("editor.tab.activeBackground", Color::Rgb(0x1e, 0x1e, 0x1e)),
            ("editor.modifiedIndicator", Color::Rgb(0xe8, 0xae, 0x3c)),
            ("minimap.foreground", Color::Rgb(0x85, 0x85, 0x85)),
            ("minimap.viewportBackground", Color::Rgb(0x3a, 0x3d, 0x41)),
            ("sidebar.background", Color::Rgb(0x25, 0x25, 0x26)),
            ("sidebar.foreground", Color::Rgb(0xcc, 0xcc, 0xcc)),
            ("sidebar.selectedBackground", Color::Rgb(0x09, 0x4b, 0x71)),
            ("sidebar.selectedForeground", Color::Rgb(0xff, 0xff, 0xff)),
            ("statusbar.foreground", Color::Rgb(0x9c, 0xa3, 0xaf)),
            ("header.foreground", Color::Rgb(0x4f, 0xc1, 0xff)),
            ("primary", Color::Rgb(0x0e, 0x63, 0x9c)),
        ] {
            colors.insert(key.to_string(), value);
        }

        let mut dimensions = FxHashMap::default();
        dimensions.insert("minimap.width".to_string(), 20);
        dimensions.insert("sidebar.widthPercent".to_string(), 20);

        Self {
            colors,
            dimensions,
            name: "dark".to_string(),
            generation: 0,
        }
    }

    pub fn light() -> Self {
        let mut theme = Self::dark();
        for (key, value) in [
            ("editor.background", Color::Rgb(0xff, 0xff, 0xff)),
            ("editor.foreground", Color::Rgb(0x1f, 0x23, 0x28)),
            ("editor.currentLine", Color::Rgb(0xf3, 0xf4, 0xf6)),
            ("editor.lineNumber.background", Color::Rgb(0xff, 0xff, 0xff)),
            ("editor.lineNumber.foreground", Color::Rgb(0x9c, 0xa3, 0xaf)),
            ("editor.tab.background", Color::Rgb(0xec, 0xec, 0xec)),
            ("editor.tab.activeBackground", Color::Rgb(0xff, 0xff, 0xff)),
            ("minimap.foreground", Color::Rgb(0xa0, 0xa0, 0xa0)),
            ("minimap.viewportBackground", Color::Rgb(0xd0, 0xd4, 0xd9)),
            ("sidebar.background", Color::Rgb(0xf3, 0xf3, 0xf3)),
            ("sidebar.foreground", Color::Rgb(0x33, 0x33, 0x33)),
            ("statusbar.foreground", Color::Rgb(0x4b, 0x55, 0x63)),
        ] {
            theme.colors.insert(key.to_string(), value);
        }
        theme.name = "light".to_string();
        theme
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bumped on every successful switch or reload; views compare it to
    /// notice a theme change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get_color(&self, key: &str, fallback: Color) -> Color {
        self.colors.get(key).copied().unwrap_or(fallback)
    }

    pub fn get_dimension(&self, key: &str, fallback: i64) -> i64 {
        self.dimensions.get(key).copied().unwrap_or(fallback)
    }

    /// Switch between the built-in palettes.
    pub fn switch_builtin(&mut self, name: &str) {
        let next = match name {
            "light" => Self::light(),
            _ => Self::dark(),
        };
        self.colors = next.colors;
        self.dimensions = next.dimensions;
        self.name = next.name;
        self.generation += 1;
        tracing::info!(theme = self.name, "switched theme");
    }

    /// Overlay `<dir>/<name>.json` on top of the matching built-in
    /// palette. Returns false (keeping the current maps) on any read or
    /// parse failure.
    pub fn load_from_dir(&mut self, dir: &Path, name: &str) -> bool {
        let path = dir.join(format!("{name}.json"));
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // No overlay for this theme; the built-in palette stands.
                tracing::debug!(path = %path.display(), "no theme file");
                return false;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read theme file");
                return false;
            }
        };

        let parsed: ThemeFile = match serde_json::from_str(&data) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid theme JSON");
                return false;
            }
        };

        let base = if name == "light" {
            Self::light()
        } else {
            Self::dark()
        };
        self.colors = base.colors;
        self.dimensions = base.dimensions;

        for (key, value) in parsed.colors {
            match parse_color(&value) {
                Some(color) => {
                    self.colors.insert(key, color);
                }
                None => tracing::warn!(key, value, "ignoring malformed theme color"),
            }
        }
        for (key, value) in parsed.dimensions {
            self.dimensions.insert(key, value);
        }

        self.name = name.to_string();
        self.generation += 1;
        tracing::info!(theme = name, path = %path.display(), "loaded theme");
        true
    }
}

fn parse_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Default for ThemeProvider {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_lookup_with_fallback() {
        let theme = ThemeProvider::dark();
        assert_eq!(
            theme.get_color("editor.background", Color::Reset),
            Color::Rgb(0x1e, 0x1e, 0x1e)
        );
        assert_eq!(theme.get_color("no.such.key", Color::Cyan), Color::Cyan);
        assert_eq!(theme.get_dimension("minimap.width", 0), 20);
        assert_eq!(theme.get_dimension("no.such.key", 7), 7);
    }

    #[test]
    fn test_switch_bumps_generation() {
        let mut theme = ThemeProvider::dark();
        let before = theme.generation();
        theme.switch_builtin("light");
        assert_eq!(theme.name(), "light");
        assert!(theme.generation() > before);
    }

    #[test]
    fn test_load_from_json_overlay() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("dark.json"),
            r##"{"colors": {"editor.background": "#123456", "bad": "nope"},
                 "dimensions": {"minimap.width": 30}}"##,
        )
        .unwrap();

        let mut theme = ThemeProvider::dark();
        assert!(theme.load_from_dir(dir.path(), "dark"));
        assert_eq!(
            theme.get_color("editor.background", Color::Reset),
            Color::Rgb(0x12, 0x34, 0x56)
        );
        // Malformed entry is skipped, untouched keys keep defaults.
        assert_eq!(theme.get_color("bad", Color::Cyan), Color::Cyan);
        assert_eq!(theme.get_dimension("minimap.width", 0), 30);
    }

    #[test]
    fn test_load_failure_degrades() {
        let dir = tempdir().unwrap();
        let mut theme = ThemeProvider::dark();
        assert!(!theme.load_from_dir(dir.path(), "missing"));
        assert_eq!(theme.name(), "dark");
        assert_eq!(
            theme.get_color("editor.background", Color::Reset),
            Color::Rgb(0x1e, 0x1e, 0x1e)
        );
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#ff0080"), Some(Color::Rgb(0xff, 0x00, 0x80)));
        assert_eq!(parse_color("ff0080"), None);
        assert_eq!(parse_color("#ff008"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
    }
}
