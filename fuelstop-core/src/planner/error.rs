use thiserror::Error;

use crate::route::ResampleError;

use super::types::MileWindow;

/// Errors from [`crate::StopPlanner::plan`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The route geometry contained no points.
    #[error("route geometry must contain at least one point")]
    EmptyRoute,
    /// No station matched into the reachable window.
    ///
    /// The whole run fails; a partial plan is never returned.
    #[error("no fuel station reachable within {window}")]
    NoStationsInRange {
        /// Window that had no candidates.
        window: MileWindow,
    },
    /// The trip length was negative or not finite.
    #[error("total distance must be a finite, non-negative number of miles, got {value}")]
    InvalidTotalDistance {
        /// Value supplied.
        value: f64,
    },
}

impl From<ResampleError> for PlanError {
    fn from(err: ResampleError) -> Self {
        match err {
            ResampleError::EmptyRoute => Self::EmptyRoute,
        }
    }
}
