//! TLS certificate loading and `rustls` server configuration.
//!
//! Certificates and keys are read from PEM files, typically the
//! `fullchain.pem` / `privkey.pem` pair issued by an ACME client.

mod error;
mod server;

pub use error::TlsError;
pub use server::{MinTlsVersion, build_server_config, load_certs, load_private_key};
