use crate::error::{SampleError, SampleResult};

/// Fail with `message` unless `condition` holds
pub fn ensure(condition: bool, message: &str) -> SampleResult<()> {
    if condition {
        Ok(())
    } else {
        Err(SampleError::check(message))
    }
}
