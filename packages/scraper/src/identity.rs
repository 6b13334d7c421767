//! Browser identity pool.
//!
//! Each request goes out with a `User-Agent` picked at random from a small
//! set of realistic desktop browser signatures.

use rand::seq::IndexedRandom as _;

/// Desktop browser signatures used when no pool is configured.
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:89.0) Gecko/20100101 Firefox/89.0",
];

/// Returns [`DEFAULT_USER_AGENTS`] as owned strings.
#[must_use]
pub fn default_user_agents() -> Vec<String> {
    DEFAULT_USER_AGENTS.iter().map(|ua| (*ua).to_owned()).collect()
}

/// Picks a `User-Agent` from `pool`, falling back to the first default
/// signature when the pool is empty.
#[must_use]
pub fn pick_user_agent(pool: &[String]) -> &str {
    pool.choose(&mut rand::rng())
        .map_or(DEFAULT_USER_AGENTS[0], String::as_str)
}
