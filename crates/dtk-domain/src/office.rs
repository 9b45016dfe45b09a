//! Office and lifecycle status enumerations
//!
//! Both are closed sets: offices are fixed organizational units that are
//! never created or destroyed at runtime, and status is informational
//! document metadata that does not drive routing.

use serde::{Deserialize, Serialize};

/// One of the ten fixed organizational units.
///
/// An office is both a routing endpoint and a custody holder. The declared
/// order here is the canonical iteration order for grouped views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Office {
    /// The privileged office: its members can act on documents regardless
    /// of current custody.
    #[serde(rename = "ADMIN OFFICE")]
    Admin,
    #[serde(rename = "ODM")]
    Odm,
    #[serde(rename = "PROPERTY UNIT")]
    PropertyUnit,
    #[serde(rename = "PGRCUD")]
    Pgrcud,
    #[serde(rename = "NFPDD")]
    Nfpdd,
    #[serde(rename = "PERSONNEL")]
    Personnel,
    #[serde(rename = "COA")]
    Coa,
    #[serde(rename = "ACCOUNTING UNIT")]
    AccountingUnit,
    #[serde(rename = "DISBURSING UNIT")]
    DisbursingUnit,
    #[serde(rename = "FOU")]
    Fou,
}

impl Office {
    /// All offices in declared order.
    pub const ALL: [Office; 10] = [
        Office::Admin,
        Office::Odm,
        Office::PropertyUnit,
        Office::Pgrcud,
        Office::Nfpdd,
        Office::Personnel,
        Office::Coa,
        Office::AccountingUnit,
        Office::DisbursingUnit,
        Office::Fou,
    ];

    /// Human-readable label, matching the persisted wire name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Office::Admin => "ADMIN OFFICE",
            Office::Odm => "ODM",
            Office::PropertyUnit => "PROPERTY UNIT",
            Office::Pgrcud => "PGRCUD",
            Office::Nfpdd => "NFPDD",
            Office::Personnel => "PERSONNEL",
            Office::Coa => "COA",
            Office::AccountingUnit => "ACCOUNTING UNIT",
            Office::DisbursingUnit => "DISBURSING UNIT",
            Office::Fou => "FOU",
        }
    }

    /// Whether this is the privileged Admin office.
    #[inline]
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Office::Admin)
    }

    /// Resolve an office from its label (case-insensitive).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|office| office.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl std::fmt::Display for Office {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Document lifecycle stage.
///
/// Purely informational metadata; custody transitions never consult it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Draft,
    #[serde(rename = "In Review")]
    InReview,
    Approved,
    Archived,
}

impl Status {
    /// Human-readable label, matching the persisted wire name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Status::Draft => "Draft",
            Status::InReview => "In Review",
            Status::Approved => "Approved",
            Status::Archived => "Archived",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
