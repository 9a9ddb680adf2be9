// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for partition contract violations and invalid settings.

use thiserror::Error;

/// Errors reported by the fallible partition operations.
///
/// The panicking counterparts of these operations panic with the same
/// message; every variant describes misuse rather than a runtime failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PartitionError {
    /// A layer below chunk level was requested.
    #[error("requested layer {requested} is below chunk level")]
    OutOfRange {
        /// Remaining layer count when the chunk was reached.
        requested: usize,
    },

    /// The operation was attempted on an empty (never populated) unit.
    #[error("`{0}` is not supported on an empty unit")]
    UnsupportedOperation(&'static str),

    /// The domain radius must be strictly positive.
    #[error("radius must be positive, got {0}")]
    InvalidRadius(i32),

    /// The minimum leaf size must be strictly positive.
    #[error("minimum leaf size must be positive, got {0}")]
    InvalidLeafSize(i32),
}
