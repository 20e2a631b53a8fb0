//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HubError`]
//! at port boundaries via `#[from]` or an explicit `into_domain()`.

/// Base error for every port in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A network operation (socket, bind, address probe) failed.
    #[error("network error")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An advertised port of `0` cannot be reached by discovery clients.
    #[error("advertised port must be non-zero")]
    ZeroPort,

    /// The advertised address is the wildcard address (`0.0.0.0` / `::`).
    #[error("advertised address {0} is unspecified")]
    UnspecifiedAddress(std::net::IpAddr),

    /// The bridge serial is not a 16-digit hexadecimal string.
    #[error("bridge serial {0:?} must be 16 hexadecimal digits")]
    InvalidSerial(String),
}
