// Copyright 2025 the Vigil contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the monitoring subsystem.
//!
//! Expected conditions never surface as errors here: a host that cannot
//! answer a probe query degrades to a conservative default instead of
//! failing the sampling loop. The only error class is caller misuse, which
//! indicates a programming error and must not be swallowed.

use std::fmt::Display;

/// A specialized `Result` type for monitoring operations.
pub type MonitorResult<T> = Result<T, MonitorError>;

/// An error that can occur within the monitoring subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorError {
    /// A configuration or argument value was malformed (e.g. a non-positive
    /// sampling window, a zero-capacity history).
    InvalidArgument(String),
}

impl Display for MonitorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonitorError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for MonitorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_display() {
        let err = MonitorError::InvalidArgument("window length must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid argument: window length must be positive"
        );
    }
}
