use std::time::Duration;

/// Build a reqwest client with sane defaults (bounded connect/total timeouts).
/// The user API is untrusted; an unbounded wait would stall the whole
/// cooperative serving loop.
pub fn make_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(2))
        .timeout(Duration::from_secs(6))
        .build()
        .expect("reqwest client")
}
