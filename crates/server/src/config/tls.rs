use serde::Deserialize;

/// Inbound HTTPS termination.
///
/// # Example
///
/// ```toml
/// [tls]
/// enabled = true
/// cert_path = "/etc/letsencrypt/live/files.example.com/fullchain.pem"
/// key_path = "/etc/letsencrypt/live/files.example.com/privkey.pem"
/// ```
#[derive(Debug, Deserialize)]
pub struct TlsConfig {
    /// Whether the listener terminates TLS.
    #[serde(default)]
    pub enabled: bool,

    /// Path to the PEM certificate chain.
    #[serde(default)]
    pub cert_path: Option<String>,

    /// Path to the PEM private key.
    #[serde(default)]
    pub key_path: Option<String>,

    /// Minimum TLS version: `"1.2"` (default) or `"1.3"`.
    #[serde(default = "default_min_version")]
    pub min_version: String,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cert_path: None,
            key_path: None,
            min_version: default_min_version(),
        }
    }
}

fn default_min_version() -> String {
    "1.2".to_owned()
}
