use thiserror::Error;

/// Failure taxonomy of the credential store.
///
/// Every failure is terminal at the store boundary: nothing is retried, and
/// nothing escapes past the returned value. Callers are expected to display
/// the message and move on.
#[derive(Debug, Error)]
pub enum Error {
    /// The remote authority answered the request with a non-success status.
    /// Its rejection is authoritative; the local store is never consulted.
    #[error("{message}")]
    RemoteRejected { message: String },

    /// No connection to the remote authority could be established, and the
    /// local store could not satisfy the request either.
    #[error("failed to reach the remote authority")]
    RemoteUnreachable(#[source] anyhow::Error),

    /// Local registration: another record already uses this email.
    #[error("Email already registered")]
    DuplicateEmail,

    /// Local registration: another record already uses this username.
    #[error("Username already taken")]
    DuplicateUsername,

    /// The remote authority was reachable but the exchange failed in some
    /// other way, e.g. a body this crate could not parse.
    #[error("{message}")]
    Unexpected { message: String },

    /// The injected user store failed to load or save the record list.
    #[error("user store error")]
    Store(#[source] anyhow::Error),
}
