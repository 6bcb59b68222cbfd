use std::env;

pub const DEFAULT_API_BASE_URL: &str = "https://api.healthmanthan.com/api";
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub bind_addr: String,
    pub session_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let session_ttl_hours = parse_ttl_hours(env::var("SESSION_TTL_HOURS").ok().as_deref())?;

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            anyhow::bail!("API_BASE_URL must be an http(s) URL, got {api_base_url}");
        }

        Ok(Self {
            api_base_url,
            bind_addr,
            session_ttl_hours,
        })
    }
}

/// Unset means 24. Anything outside 1..=MAX_SESSION_TTL_HOURS is a startup error.
fn parse_ttl_hours(raw: Option<&str>) -> anyhow::Result<i64> {
    let Some(raw) = raw else {
        return Ok(24);
    };
    let hours: i64 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("SESSION_TTL_HOURS must be a whole number, got {raw}"))?;
    if !(1..=MAX_SESSION_TTL_HOURS).contains(&hours) {
        anyhow::bail!("SESSION_TTL_HOURS must be between 1 and {MAX_SESSION_TTL_HOURS}, got {hours}");
    }
    Ok(hours)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            bind_addr: "127.0.0.1:8080".to_string(),
            session_ttl_hours: 24,
        }
    }
}
