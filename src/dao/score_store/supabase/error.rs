//! Error types raised by the Supabase (PostgREST) score store.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`SupabaseDaoError`] failures.
pub type SupabaseResult<T> = Result<T, SupabaseDaoError>;

/// Failures that can occur while talking to the hosted database.
#[derive(Debug, Error)]
pub enum SupabaseDaoError {
    /// Store credentials were never supplied.
    #[error("score store is not configured")]
    NotConfigured,
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build store client")]
    ClientBuilder {
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },
    /// The request never reached the store (DNS, TLS, timeout).
    #[error("failed to send store request to `{table}`")]
    RequestSend {
        /// Table the request targeted.
        table: String,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },
    /// The store answered with a non-success status.
    #[error("unexpected store response status {status} for `{table}`: {body}")]
    RequestStatus {
        /// Table the request targeted.
        table: String,
        /// HTTP status returned.
        status: StatusCode,
        /// Response body, for diagnostics.
        body: String,
    },
    /// Response payload could not be parsed into the expected rows.
    #[error("failed to decode store response for `{table}`")]
    DecodeResponse {
        /// Table the request targeted.
        table: String,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },
    /// An insert with `return=representation` came back without the row.
    #[error("store returned no row for insert into `{table}`")]
    EmptyInsert {
        /// Table the insert targeted.
        table: String,
    },
}
