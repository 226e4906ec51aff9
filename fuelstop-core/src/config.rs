//! Vehicle and policy parameters for stop planning.

use thiserror::Error;

use crate::planner::WINDOW_TOLERANCE_MILES;

/// Range on a full tank under the reference policy, in miles.
pub const DEFAULT_MAX_RANGE_MILES: f64 = 500.0;

/// Miles travelled per unit of fuel under the reference policy.
pub const DEFAULT_FUEL_EFFICIENCY: f64 = 10.0;

/// Margin subtracted from the range when advancing past a stop, in miles.
pub const DEFAULT_SAFETY_BUFFER_MILES: f64 = 10.0;

/// How a station is placed onto the route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RouteMatching {
    /// Match the closest route vertex by straight-line distance in
    /// latitude/longitude space. This approximates "nearest point on the
    /// route" and is the reference behaviour.
    #[default]
    NearestVertex,
    /// Project onto the closest route segment and interpolate the mile
    /// position along it.
    SegmentProjection,
}

/// Planner policy.
///
/// Build with [`PlannerConfig::default`] for the reference policy and adjust
/// fields as needed; [`crate::GreedyStopPlanner::new`] validates the result.
///
/// # Examples
/// ```
/// use fuelstop_core::PlannerConfig;
///
/// let config = PlannerConfig {
///     max_range_miles: 400.0,
///     ..PlannerConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.advance_miles(), 390.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    /// Miles the vehicle covers on a full tank.
    pub max_range_miles: f64,
    /// Miles travelled per unit of fuel.
    pub fuel_efficiency: f64,
    /// Margin subtracted from the range when advancing past a stop.
    pub safety_buffer_miles: f64,
    /// Reject stations further than this from their matched route position.
    ///
    /// `None` accepts every station regardless of how far it lies from the
    /// route.
    pub max_detour_miles: Option<f64>,
    /// Station-to-route matching strategy.
    pub matching: RouteMatching,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_range_miles: DEFAULT_MAX_RANGE_MILES,
            fuel_efficiency: DEFAULT_FUEL_EFFICIENCY,
            safety_buffer_miles: DEFAULT_SAFETY_BUFFER_MILES,
            max_detour_miles: None,
            matching: RouteMatching::NearestVertex,
        }
    }
}

/// Errors returned by [`PlannerConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerConfigError {
    /// A numeric parameter was zero, negative or not finite.
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive {
        /// Name of the offending parameter.
        field: &'static str,
        /// Value supplied.
        value: f64,
    },
    /// The buffer leaves no distance to advance after a stop.
    #[error(
        "safety buffer ({safety_buffer_miles} mi) must be smaller than the maximum range ({max_range_miles} mi)"
    )]
    BufferExceedsRange {
        /// Configured range.
        max_range_miles: f64,
        /// Configured buffer.
        safety_buffer_miles: f64,
    },
    /// Range minus buffer is too small for the search window to move past a
    /// committed stop.
    #[error(
        "maximum range minus safety buffer ({advance_miles} mi) must exceed {minimum_miles} mi"
    )]
    NoAdvance {
        /// Configured range minus buffer.
        advance_miles: f64,
        /// Smallest accepted advance, exclusive.
        minimum_miles: f64,
    },
}

impl PlannerConfig {
    /// Check that every parameter is usable by the planner.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerConfigError::NonPositive`] for zero, negative or
    /// non-finite values, [`PlannerConfigError::BufferExceedsRange`] when
    /// the buffer is not strictly below the range, and
    /// [`PlannerConfigError::NoAdvance`] when the remaining advance is within
    /// the window tolerance of zero.
    pub fn validate(&self) -> Result<(), PlannerConfigError> {
        require_positive("max_range_miles", self.max_range_miles)?;
        require_positive("fuel_efficiency", self.fuel_efficiency)?;
        require_positive("safety_buffer_miles", self.safety_buffer_miles)?;
        if let Some(detour) = self.max_detour_miles {
            require_positive("max_detour_miles", detour)?;
        }
        if self.safety_buffer_miles >= self.max_range_miles {
            return Err(PlannerConfigError::BufferExceedsRange {
                max_range_miles: self.max_range_miles,
                safety_buffer_miles: self.safety_buffer_miles,
            });
        }
        let advance_miles = self.advance_miles();
        if advance_miles <= WINDOW_TOLERANCE_MILES {
            return Err(PlannerConfigError::NoAdvance {
                advance_miles,
                minimum_miles: WINDOW_TOLERANCE_MILES,
            });
        }
        Ok(())
    }

    /// Distance the search window moves past a committed stop.
    pub fn advance_miles(&self) -> f64 {
        self.max_range_miles - self.safety_buffer_miles
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), PlannerConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PlannerConfigError::NonPositive { field, value })
    }
}
