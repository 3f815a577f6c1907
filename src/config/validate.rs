//! Host-side pre-checks turning a Config into a DispatchRequest.
//! Mirrors what the user must fix before a run can start: a source directory
//! that exists and a pattern carrying the `?<name>` group.

use tracing::{debug, error};

use crate::dispatch::DispatchRequest;
use crate::errors::DispatchError;

use super::types::Config;

impl Config {
    /// Validate the source directory and pattern and build a request.
    pub fn to_request(&self) -> Result<DispatchRequest, DispatchError> {
        let dir = self
            .source_dir
            .as_ref()
            .ok_or(DispatchError::MissingSource)?;
        if !dir.exists() {
            error!(dir = %dir.display(), "Source directory does not exist");
            return Err(DispatchError::SourceNotFound(dir.clone()));
        }
        if !dir.is_dir() {
            error!(dir = %dir.display(), "Source path is not a directory");
            return Err(DispatchError::NotADirectory(dir.clone()));
        }

        let pattern = self
            .pattern
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or(DispatchError::MissingPattern)?;
        let request = DispatchRequest::new(dir.clone(), pattern)?;
        debug!(dir = %dir.display(), pattern, "Request validated");
        Ok(request)
    }
}
