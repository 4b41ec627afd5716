//! Upstream request pipeline shared by every tool.

mod dispatcher;
mod errors;
mod format;

pub use dispatcher::{
    ApiClient, ApiError, ApiRequest, MAX_RETRIES, REQUEST_TIMEOUT, RETRYABLE_STATUS_CODES,
    is_retryable, retry_delay,
};
pub use errors::{describe_failure, error_message, exception_message};
pub use format::{format_data, strip_nulls};
