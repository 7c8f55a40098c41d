//! Application settings

use serde::{Deserialize, Serialize};

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Base URL of the topography REST backend
    pub base_url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Canvas display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Show elevation labels next to point names
    pub show_elevations: bool,
    /// Label font size in points
    pub label_font_size: f32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [15, 23, 42],
            show_elevations: true,
            label_font_size: 11.0,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { font_size: 14.0 }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    /// Backend connection
    pub server: ServerSettings,
    /// Canvas display
    pub viewport: ViewportSettings,
    /// UI settings
    #[serde(default)]
    pub ui: UiSettings,
}

impl AppSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "topocad", "topocad") {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    return settings;
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "topocad", "topocad") {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    let _ = std::fs::write(config_path, json);
                }
            }
        }
    }
}
