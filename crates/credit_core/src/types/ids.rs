//! Identifier type for scored companies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Company name or ticker, unique within a scoring batch.
///
/// # Examples
///
/// ```
/// use credit_core::types::CompanyId;
///
/// let id = CompanyId::new("SAP");
/// assert_eq!(id.as_str(), "SAP");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(String);

impl CompanyId {
    /// Creates a new company ID.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the ID is empty or whitespace only.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CompanyId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CompanyId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_company_id_display() {
        let id = CompanyId::new("SIE.DE");
        assert_eq!(format!("{}", id), "SIE.DE");
    }

    #[test]
    fn test_company_id_hash() {
        let mut set = HashSet::new();
        set.insert(CompanyId::new("SAP"));
        set.insert(CompanyId::new("SAP"));
        set.insert(CompanyId::new("BAS"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_company_id_blank() {
        assert!(CompanyId::new("  ").is_blank());
        assert!(!CompanyId::from("RWE").is_blank());
    }
}
