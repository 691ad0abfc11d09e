//! Result type alias
//!
//! Convenience alias that uses [`DjenError`] as the error type.

use super::errors::DjenError;

/// Result type alias for fallible operations in this crate
///
/// # Examples
///
/// ```
/// use djen::domain::result::Result;
/// use djen::domain::errors::DjenError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(DjenError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, DjenError>;
