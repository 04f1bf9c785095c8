use std::{env, time::Duration};

// Runtime/client constants. Every value falls back to the reference client defaults.

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8888;
pub const DEFAULT_CLIENT_NAME: &str = "RUST";
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(250);

pub fn server_host() -> String {
    host_or_default(env::var("BATTLE_CITY_HOST").ok().as_deref())
}

pub fn server_port() -> u16 {
    port_or_default(env::var("BATTLE_CITY_PORT").ok().as_deref())
}

pub fn client_name() -> String {
    name_or_default(env::var("BATTLE_CITY_NAME").ok().as_deref())
}

pub fn tick_interval() -> Duration {
    tick_or_default(env::var("BATTLE_CITY_TICK_MS").ok().as_deref())
}

fn host_or_default(raw: Option<&str>) -> String {
    raw.filter(|v| !v.trim().is_empty())
        .unwrap_or(DEFAULT_HOST)
        .to_string()
}

fn port_or_default(raw: Option<&str>) -> u16 {
    raw.and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_PORT)
}

fn name_or_default(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_CLIENT_NAME)
        .to_string()
}

fn tick_or_default(raw: Option<&str>) -> Duration {
    raw.and_then(|value| value.parse::<u64>().ok())
        // A zero period would spin the tick loop.
        .filter(|&millis| millis > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_TICK_INTERVAL)
}
