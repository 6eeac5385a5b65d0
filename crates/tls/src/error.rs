use thiserror::Error;

/// Errors that can occur during TLS setup.
#[derive(Debug, Error)]
pub enum TlsError {
    /// Failed to read a file from disk.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    /// No certificates were found in the PEM file.
    #[error("no certificates found in {0}")]
    NoCertificates(String),

    /// No private key was found in the PEM file.
    #[error("no private key found in {0}")]
    NoPrivateKey(String),

    /// An unrecognized minimum protocol version was requested.
    #[error("unsupported minimum TLS version: {0}")]
    UnsupportedVersion(String),

    /// The `rustls` configuration could not be built.
    #[error("rustls config error: {0}")]
    RustlsConfig(String),
}
