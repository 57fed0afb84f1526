use reqwest::Client;
use std::time::Duration;

/// 构建 HTTP 客户端
///
/// 凭据按请求附加，客户端本身不携带任何身份信息。
pub fn build_client(timeout_secs: u64) -> reqwest::Result<Client> {
    Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client() {
        assert!(build_client(30).is_ok());
    }
}
