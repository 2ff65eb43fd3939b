//! Series categories and the label sets that produce them.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use aidflow_shared::config::CategoryConfig;
use aidflow_shared::types::CategoryDimension;

use crate::error::{SeriesError, SeriesResult};

const PLANNED_DISBURSEMENTS: &str = "Planned Disbursements";
const BUDGETS: &str = "Budgets";
const UNSPECIFIED: &str = "Unspecified";

/// A series column: a transaction-type or flow-type label, or a record-class sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Creates a category from a label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Sentinel category of planned disbursements.
    #[must_use]
    pub fn planned_disbursements() -> Self {
        Self::new(PLANNED_DISBURSEMENTS)
    }

    /// Sentinel category of budgets.
    #[must_use]
    pub fn budgets() -> Self {
        Self::new(BUDGETS)
    }

    /// The label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// Maps collaborator codes to categories.
///
/// Codes and aliases are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    transaction_types: BTreeMap<String, String>,
    aliases: BTreeMap<String, String>,
    dimension: CategoryDimension,
}

impl CategoryMap {
    /// Builds the map from configuration.
    #[must_use]
    pub fn from_config(config: &CategoryConfig) -> Self {
        let lower = |map: &BTreeMap<String, String>| -> BTreeMap<String, String> {
            map.iter()
                .map(|(key, value)| (key.trim().to_lowercase(), value.clone()))
                .collect()
        };

        Self {
            transaction_types: lower(&config.transaction_types),
            aliases: lower(&config.aliases),
            dimension: config.dimension,
        }
    }

    /// Returns a copy breaking transactions out by `dimension`.
    #[must_use]
    pub fn with_dimension(mut self, dimension: CategoryDimension) -> Self {
        self.dimension = dimension;
        self
    }

    /// Attribute transactions are broken out by.
    #[must_use]
    pub const fn dimension(&self) -> CategoryDimension {
        self.dimension
    }

    /// Resolves an alias ("Commitments") to its canonical label.
    #[must_use]
    pub fn canonical(&self, label: &str) -> Category {
        let label = label.trim();
        self.aliases
            .get(&label.to_lowercase())
            .map_or_else(|| Category::new(label), |canonical| Category::new(canonical.as_str()))
    }

    /// Category of a transaction under the configured dimension.
    #[must_use]
    pub fn transaction_category(&self, type_code: &str, flow_type: Option<&str>) -> Category {
        match self.dimension {
            CategoryDimension::TransactionType => self.transaction_type_label(type_code),
            CategoryDimension::FlowType => flow_type_label(flow_type),
        }
    }

    /// Label of a transaction type code; unknown codes become `Other (<code>)`.
    #[must_use]
    pub fn transaction_type_label(&self, type_code: &str) -> Category {
        let code = type_code.trim();
        match self.transaction_types.get(&code.to_lowercase()) {
            Some(label) => self.canonical(label),
            None if code.is_empty() => Category::new(UNSPECIFIED),
            None => Category::new(format!("Other ({code})")),
        }
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::from_config(&CategoryConfig::default())
    }
}

/// Label of a flow type given as an IATI code or a legacy name.
#[must_use]
pub fn flow_type_label(flow_type: Option<&str>) -> Category {
    let Some(raw) = flow_type.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Category::new(UNSPECIFIED);
    };

    let label = match raw.to_lowercase().as_str() {
        "10" | "oda" => "ODA",
        "20" | "21" | "22" | "oof" => "OOF",
        "30" | "35" | "36" | "37" | "private" => "Private",
        "40" | "50" | "other" => "Other",
        _ => return Category::new(format!("Other ({raw})")),
    };
    Category::new(label)
}

/// Which categories carry forward and which are snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryRoles {
    carry_forward: Vec<Category>,
    snapshot: Vec<Category>,
}

impl CategoryRoles {
    /// Creates roles; listed categories always appear in the output, in this order.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidConfiguration` if a category is listed in both roles.
    pub fn new(carry_forward: Vec<Category>, snapshot: Vec<Category>) -> SeriesResult<Self> {
        let snapshot_set: BTreeSet<&Category> = snapshot.iter().collect();
        if let Some(both) = carry_forward.iter().find(|c| snapshot_set.contains(c)) {
            return Err(SeriesError::InvalidConfiguration(format!(
                "category '{both}' cannot be both carry-forward and snapshot"
            )));
        }
        Ok(Self {
            carry_forward: dedup(carry_forward),
            snapshot: dedup(snapshot),
        })
    }

    /// Roles from configuration: configured snapshots, everything else carries forward.
    #[must_use]
    pub fn from_config(config: &CategoryConfig, map: &CategoryMap) -> Self {
        Self {
            carry_forward: Vec::new(),
            snapshot: dedup(config.snapshot.iter().map(|s| map.canonical(s)).collect()),
        }
    }

    /// Returns true if absence of data means "not declared".
    #[must_use]
    pub fn is_snapshot(&self, category: &Category) -> bool {
        self.snapshot.contains(category)
    }

    /// Explicit carry-forward categories.
    #[must_use]
    pub fn carry_forward(&self) -> &[Category] {
        &self.carry_forward
    }

    /// Explicit snapshot categories.
    #[must_use]
    pub fn snapshot(&self) -> &[Category] {
        &self.snapshot
    }

    /// Output column order: listed carry-forward categories, then other observed
    /// categories sorted by label, then snapshot categories.
    #[must_use]
    pub fn columns<'a>(&self, observed: impl IntoIterator<Item = &'a Category>) -> Vec<Category> {
        let listed: BTreeSet<&Category> =
            self.carry_forward.iter().chain(self.snapshot.iter()).collect();
        let extra: BTreeSet<&Category> = observed
            .into_iter()
            .filter(|c| !listed.contains(c))
            .collect();

        self.carry_forward
            .iter()
            .chain(extra)
            .chain(self.snapshot.iter())
            .cloned()
            .collect()
    }
}

impl Default for CategoryRoles {
    /// Roles of the default configuration: budgets are a snapshot.
    fn default() -> Self {
        Self::from_config(&CategoryConfig::default(), &CategoryMap::default())
    }
}

fn dedup(categories: Vec<Category>) -> Vec<Category> {
    let mut seen = BTreeSet::new();
    categories
        .into_iter()
        .filter(|c| seen.insert(c.clone()))
        .collect()
}
