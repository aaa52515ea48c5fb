use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./data/devtime.db?mode=rwc".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "development-secret-change-in-production".to_string()),
            token_ttl_hours: token_ttl_hours(env::var("TOKEN_TTL_HOURS").ok().as_deref()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        }
    }
}

const DEFAULT_TOKEN_TTL_HOURS: i64 = 24 * 7;
const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365 * 10;

/// Falls back to seven days when unset, unparseable or outside one hour to ten years.
fn token_ttl_hours(raw: Option<&str>) -> i64 {
    raw.and_then(|h| h.trim().parse().ok())
        .filter(|h: &i64| (1..=MAX_TOKEN_TTL_HOURS).contains(h))
        .unwrap_or(DEFAULT_TOKEN_TTL_HOURS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_ttl_accepts_values_in_range() {
        assert_eq!(token_ttl_hours(Some("1")), 1);
        assert_eq!(token_ttl_hours(Some("48")), 48);
        assert_eq!(token_ttl_hours(Some("87600")), 87600);
    }

    #[test]
    fn token_ttl_falls_back_to_seven_days() {
        assert_eq!(token_ttl_hours(None), 168);
        assert_eq!(token_ttl_hours(Some("soon")), 168);
        assert_eq!(token_ttl_hours(Some("0")), 168);
        assert_eq!(token_ttl_hours(Some("-5")), 168);
        assert_eq!(token_ttl_hours(Some("87601")), 168);
        assert_eq!(token_ttl_hours(Some("9223372036854775807")), 168);
    }
}
