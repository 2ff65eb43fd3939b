//! Custom fiscal-year definitions supplied by the organization registry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use aidflow_shared::types::CalendarId;

use super::definition::CalendarDef;
use crate::error::{SeriesError, SeriesResult};

/// An externally defined fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCalendar {
    /// Unique identifier.
    pub id: CalendarId,
    /// Display name (e.g., "Myanmar fiscal year").
    pub name: String,
    /// First month of the fiscal year (1-12).
    pub start_month: u32,
}

impl CustomCalendar {
    /// Converts to a validated calendar definition.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidConfiguration` if `start_month` is outside 1-12.
    pub fn to_def(&self) -> SeriesResult<CalendarDef> {
        CalendarDef::fiscal(self.start_month).map_err(|_| {
            SeriesError::InvalidConfiguration(format!(
                "calendar '{}' ({}) has invalid start month {}",
                self.name, self.id, self.start_month
            ))
        })
    }
}

/// The plain calendar plus zero or more custom fiscal years.
#[derive(Debug, Clone, Default)]
pub struct CalendarRegistry {
    custom: BTreeMap<CalendarId, CustomCalendar>,
}

impl CalendarRegistry {
    /// Builds a registry, rejecting any malformed definition.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidConfiguration` for an invalid start month or a
    /// duplicated id.
    pub fn new(calendars: impl IntoIterator<Item = CustomCalendar>) -> SeriesResult<Self> {
        let mut custom = BTreeMap::new();
        for calendar in calendars {
            calendar.to_def()?;
            let id = calendar.id;
            if custom.insert(id, calendar).is_some() {
                return Err(SeriesError::InvalidConfiguration(format!(
                    "calendar id {id} is defined twice"
                )));
            }
        }
        Ok(Self { custom })
    }

    /// Resolves a selection; `None` selects the plain calendar year.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidConfiguration` if the id is unknown.
    pub fn resolve(&self, selection: Option<CalendarId>) -> SeriesResult<CalendarDef> {
        match selection {
            None => Ok(CalendarDef::Calendar),
            Some(id) => self
                .custom
                .get(&id)
                .ok_or_else(|| SeriesError::InvalidConfiguration(format!("unknown calendar {id}")))
                .and_then(CustomCalendar::to_def),
        }
    }

    /// Custom definitions ordered by id.
    pub fn custom(&self) -> impl Iterator<Item = &CustomCalendar> {
        self.custom.values()
    }

    /// Number of custom definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.custom.len()
    }

    /// Returns true if only the plain calendar is available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.custom.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(start_month: u32) -> CustomCalendar {
        CustomCalendar {
            id: CalendarId::new(),
            name: format!("FY starting month {start_month}"),
            start_month,
        }
    }

    #[test]
    fn test_resolve_default_and_custom() {
        let april = custom(4);
        let id = april.id;
        let registry = CalendarRegistry::new([april, custom(10)]).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve(None).unwrap(), CalendarDef::Calendar);
        assert_eq!(
            registry.resolve(Some(id)).unwrap(),
            CalendarDef::Fiscal { start_month: 4 }
        );
    }

    #[test]
    fn test_unknown_id_is_configuration_error() {
        let registry = CalendarRegistry::default();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.resolve(Some(CalendarId::new())),
            Err(SeriesError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_invalid_definition_rejected() {
        assert!(CalendarRegistry::new([custom(4), custom(13)]).is_err());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let first = custom(4);
        let mut second = custom(7);
        second.id = first.id;
        assert!(CalendarRegistry::new([first, second]).is_err());
    }
}
