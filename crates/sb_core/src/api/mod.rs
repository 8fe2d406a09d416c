pub mod config_env;
pub mod json_api;

pub use config_env::{load_config_file, load_config_from_env, CONFIG_PATH_ENV};
pub use json_api::{
    game_request_schema, simulate_game, simulate_game_json, GameRequest, GameResponse, LineScore,
};
