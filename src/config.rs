use anyhow::{Context, Result};
use serde::Deserialize;
use std::{env, time::Duration};

use crate::game::{word_search::DEFAULT_PLACEMENT_ATTEMPTS, LevelSettings, SelectionMode};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub catalog_path: Option<String>,
    pub pacing_delay_ms: u64,
    pub word_search_min_size: usize,
    pub placement_attempts: usize,
    pub strict_selection: bool,
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
            frontend_dir: env::var("FRONTEND_DIR").unwrap_or_else(|_| "../frontend".to_string()),
        };

        let game = GameConfig {
            catalog_path: env::var("CATALOG_PATH").ok().filter(|path| !path.is_empty()),
            pacing_delay_ms: env::var("GAME_PACING_DELAY_MS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .context("GAME_PACING_DELAY_MS must be a number of milliseconds")?,
            word_search_min_size: env::var("GAME_WORD_SEARCH_MIN_SIZE")
                .unwrap_or_else(|_| "8".to_string())
                .parse()
                .unwrap_or(8),
            placement_attempts: env::var("GAME_PLACEMENT_ATTEMPTS")
                .unwrap_or_else(|_| DEFAULT_PLACEMENT_ATTEMPTS.to_string())
                .parse()
                .unwrap_or(DEFAULT_PLACEMENT_ATTEMPTS),
            strict_selection: env::var("GAME_STRICT_SELECTION")
                .map(|value| parse_flag(&value))
                .unwrap_or(false),
            seed: env::var("GAME_SEED")
                .ok()
                .map(|value| value.parse::<u64>())
                .transpose()
                .context("GAME_SEED must be an unsigned integer")?,
        };

        Ok(Config { server, game })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl GameConfig {
    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    pub fn level_settings(&self) -> LevelSettings {
        LevelSettings {
            word_search_min_size: self.word_search_min_size,
            placement_attempts: self.placement_attempts,
            selection_mode: if self.strict_selection {
                SelectionMode::Strict
            } else {
                SelectionMode::Permissive
            },
            ..LevelSettings::default()
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_config(strict_selection: bool) -> GameConfig {
        GameConfig {
            catalog_path: None,
            pacing_delay_ms: 250,
            word_search_min_size: 6,
            placement_attempts: 100,
            strict_selection,
            seed: None,
        }
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" On "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_level_settings_follow_config() {
        let settings = game_config(true).level_settings();
        assert_eq!(settings.word_search_min_size, 6);
        assert_eq!(settings.placement_attempts, 100);
        assert_eq!(settings.selection_mode, SelectionMode::Strict);
        assert_eq!(settings.word_search_words, 3);

        let settings = game_config(false).level_settings();
        assert_eq!(settings.selection_mode, SelectionMode::Permissive);
    }

    #[test]
    fn test_pacing_delay() {
        assert_eq!(game_config(false).pacing_delay(), Duration::from_millis(250));
    }
}
