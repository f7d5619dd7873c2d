use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub max_players: usize,
    pub idle_timeout_secs: u64,
    pub top_scores_limit: usize,
}

impl Config {
    pub fn new() -> Self {
        Self {
            max_players: env::var("QUIZ_MAX_PLAYERS")
                .unwrap_or_else(|_| "6".to_string())
                .parse()
                .expect("Invalid QUIZ_MAX_PLAYERS"),
            idle_timeout_secs: env::var("QUIZ_IDLE_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .expect("Invalid QUIZ_IDLE_TIMEOUT_SECONDS"),
            top_scores_limit: env::var("QUIZ_TOP_SCORES_LIMIT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("Invalid QUIZ_TOP_SCORES_LIMIT"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
