//! Conversions from external infrastructure errors into domain errors.

use hourglass_domain::HourglassError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub HourglassError);

impl From<InfraError> for HourglassError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<HourglassError> for InfraError {
    fn from(value: HourglassError) -> Self {
        Self(value)
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → HourglassError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        let error = if value.is_timeout() {
            HourglassError::Fetch(format!("request timed out: {value}"))
        } else if value.is_connect() {
            HourglassError::Fetch(format!("connection failed: {value}"))
        } else if value.is_status() {
            HourglassError::Fetch(format!("unexpected status: {value}"))
        } else if value.is_body() || value.is_decode() {
            HourglassError::Fetch(format!("failed to read response body: {value}"))
        } else if value.is_builder() {
            HourglassError::Config(format!("invalid http client configuration: {value}"))
        } else {
            HourglassError::Internal(format!("http error: {value}"))
        };
        Self(error)
    }
}
