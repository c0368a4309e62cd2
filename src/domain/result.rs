//! Result type alias for shiftwatch

use super::errors::ShiftWatchError;

/// Result type alias for shiftwatch operations
///
/// # Examples
///
/// ```
/// use shiftwatch::domain::result::Result;
/// use shiftwatch::domain::errors::ShiftWatchError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ShiftWatchError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ShiftWatchError>;
