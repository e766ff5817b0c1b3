use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use rolemap_core::{Config, Error, Request, Response, Result, Transport};

/// `Transport` backed by a `reqwest` HTTP client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: HttpClient,
}

impl HttpTransport {
    /// Create a transport for the given cluster URL with default client settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, HttpClient::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: HttpClient) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Build the underlying HTTP client from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let mut builder = HttpClient::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(default_headers(config)?);

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        if config.insecure_skip_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if !config.ca_cert_path.is_empty() {
            let pem = std::fs::read(&config.ca_cert_path).map_err(|e| {
                Error::Config(format!("reading CA certificate {}: {}", config.ca_cert_path, e))
            })?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(Error::transport)?;
            builder = builder.add_root_certificate(cert);
        }

        let client = builder.build().map_err(Error::transport)?;
        tracing::debug!(url = %config.url, "HTTP transport configured");

        Ok(Self::with_client(config.url.clone(), client))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn default_headers(config: &Config) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::InvalidHeader(name.clone()))?;
        let value =
            HeaderValue::from_str(value).map_err(|_| Error::InvalidHeader(name.to_string()))?;
        headers.append(name, value);
    }
    Ok(headers)
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn perform(&self, request: Request) -> Result<Response> {
        let url = format!("{}{}", self.base_url, request.path_and_query());

        let mut builder = self.client.request(request.method, &url);

        let mut headers = request.headers;
        if request.body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        builder = builder.headers(headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(Error::transport)?;

        let status_code = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(Error::transport)?;

        Ok(Response {
            status_code,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let transport = HttpTransport::new("http://localhost:9200/");
        assert_eq!(transport.base_url(), "http://localhost:9200");
    }

    #[test]
    fn test_from_config_rejects_invalid_header() {
        let mut config = Config::default();
        config
            .headers
            .insert("bad header".to_string(), "x".to_string());

        assert!(matches!(
            HttpTransport::from_config(&config),
            Err(Error::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_from_config_missing_ca_cert() {
        let config = Config {
            ca_cert_path: "/nonexistent/ca.pem".to_string(),
            ..Config::default()
        };

        assert!(matches!(
            HttpTransport::from_config(&config),
            Err(Error::Config(_))
        ));
    }
}
