use std::sync::LazyLock;

/// Shared outbound HTTP client for the provider integrations. Built on first use and
/// kept for the life of the process; `reqwest::Client` is an `Arc` internally so clones
/// share one connection pool.
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
});
