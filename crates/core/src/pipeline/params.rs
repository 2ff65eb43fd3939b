//! Parameters of one series computation.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use aidflow_shared::AppConfig;
use aidflow_shared::config::MAX_DECIMAL_PLACES;
use aidflow_shared::types::{AllocationMethod, CategoryDimension};

use crate::calendar::CalendarDef;
use crate::error::{SeriesError, SeriesResult};
use crate::records::{CategoryMap, CategoryRoles};
use crate::series::YearRange;

/// Everything besides the records that a run depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesParams {
    /// Year definition.
    pub calendar: CalendarDef,
    /// Allocation method.
    pub method: AllocationMethod,
    /// Display range; `None` uses the span of the data.
    pub range: Option<YearRange>,
    /// Carry-forward and snapshot categories.
    pub roles: CategoryRoles,
    /// Attribute transactions are broken out by.
    pub dimension: CategoryDimension,
    /// Rounding precision of emitted amounts.
    pub decimal_places: u32,
}

impl SeriesParams {
    /// Creates parameters with the default roles (budgets as snapshot) and no range.
    #[must_use]
    pub fn new(calendar: CalendarDef, method: AllocationMethod) -> Self {
        Self {
            calendar,
            method,
            range: None,
            roles: CategoryRoles::default(),
            dimension: CategoryDimension::default(),
            decimal_places: 2,
        }
    }

    /// Builds parameters from application configuration.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidConfiguration` for a bad fiscal start month.
    pub fn from_config(config: &AppConfig, categories: &CategoryMap) -> SeriesResult<Self> {
        let params = Self {
            calendar: CalendarDef::from_config(&config.engine)?,
            method: config.engine.allocation_method,
            range: None,
            roles: CategoryRoles::from_config(&config.categories, categories),
            dimension: config.categories.dimension,
            decimal_places: config.engine.decimal_places,
        };
        params.validate()?;
        Ok(params)
    }

    /// Restricts the output to `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidYearRange` if `start > end`.
    pub fn with_range(mut self, start: i32, end: i32) -> SeriesResult<Self> {
        self.range = Some(YearRange::new(start, end)?);
        Ok(self)
    }

    /// Replaces the category roles.
    #[must_use]
    pub fn with_roles(mut self, roles: CategoryRoles) -> Self {
        self.roles = roles;
        self
    }

    /// Replaces the breakdown dimension.
    #[must_use]
    pub fn with_dimension(mut self, dimension: CategoryDimension) -> Self {
        self.dimension = dimension;
        self
    }

    /// Checks the calendar and rounding precision.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidConfiguration` when either is out of bounds.
    pub fn validate(&self) -> SeriesResult<()> {
        self.calendar.validate()?;
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(SeriesError::InvalidConfiguration(format!(
                "decimal_places must be at most {MAX_DECIMAL_PLACES}, got {}",
                self.decimal_places
            )));
        }
        Ok(())
    }

    /// Hash of the parameters, used as half of a cache key.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for SeriesParams {
    fn default() -> Self {
        Self::new(CalendarDef::Calendar, AllocationMethod::Proportional)
    }
}
