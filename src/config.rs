use bevy::prelude::*;
use clap::Parser;

use crate::game_logic::Difficulty;

/// Two-player split-screen racing through Tapioca City
#[derive(Parser, Debug, Clone)]
#[command(name = "tapioca-racers", version, about)]
pub struct GameArgs {
    /// Skip the title screen and race right away (easy, medium or hard)
    #[arg(long)]
    pub difficulty: Option<String>,

    /// Base URL of the session server
    #[arg(long, env = "RACER_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    pub server_url: String,

    /// Do not ask the server for a game id
    #[arg(long)]
    pub no_session: bool,
}

#[derive(Resource, Clone, Debug)]
pub struct GameConfig {
    pub server_url: String,
    pub create_session: bool,
    /// Set when the race should start without title and dialogue.
    pub quick_start: Option<Difficulty>,
}

impl From<GameArgs> for GameConfig {
    fn from(args: GameArgs) -> Self {
        Self {
            server_url: args.server_url.trim_end_matches('/').to_string(),
            create_session: !args.no_session,
            // an unrecognised value still starts the race, on medium
            quick_start: args
                .difficulty
                .as_deref()
                .map(|value| Difficulty::parse_or_default(Some(value))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_start_falls_back_to_medium() {
        let args = GameArgs::try_parse_from(["tapioca-racers", "--difficulty", "ludicrous"]).unwrap();
        let config = GameConfig::from(args);
        assert_eq!(config.quick_start, Some(Difficulty::Medium));
    }

    #[test]
    fn test_defaults_show_title_screen() {
        let args = GameArgs::try_parse_from([
            "tapioca-racers",
            "--server-url",
            "http://example.test:3000/",
        ])
        .unwrap();
        let config = GameConfig::from(args);

        assert_eq!(config.quick_start, None);
        assert!(config.create_session);
        assert_eq!(config.server_url, "http://example.test:3000");
    }
}
