use std::env;
use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub report_dir: String,

    // Synthetic source
    pub employee_count: usize,
    pub history_days: i64,
    pub generator_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            report_dir: env::var("REPORT_DIR").unwrap_or_else(|_| "reports".to_string()),

            employee_count: env::var("EMPLOYEE_COUNT")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .unwrap(),
            history_days: env::var("HISTORY_DAYS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            generator_seed: env::var("GENERATOR_SEED")
                .ok()
                .map(|s| s.parse().expect("GENERATOR_SEED must be an integer")),
        }
    }
}
