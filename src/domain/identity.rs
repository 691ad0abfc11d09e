//! Identities searched by the batch runner

use super::query::{DateRange, QueryParameters};
use super::result::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A professional license (OAB number and state)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub number: String,
    pub jurisdiction: String,
}

/// A party searched by name, e.g. a company by its CNPJ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    #[serde(default = "default_party_kind")]
    pub kind: String,
}

fn default_party_kind() -> String {
    "CNPJ".to_string()
}

/// One entry of the batch search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    License(License),
    Party(Party),
}

impl Identity {
    /// Label written to the source column, e.g. `OAB 118093/RJ`
    pub fn label(&self) -> String {
        match self {
            Identity::License(l) => format!("OAB {}/{}", l.number, l.jurisdiction),
            Identity::Party(p) => format!("{} {}", p.kind, p.name),
        }
    }

    /// Source type, `OAB` or the party kind
    pub fn source_type(&self) -> &str {
        match self {
            Identity::License(_) => "OAB",
            Identity::Party(p) => &p.kind,
        }
    }

    /// Builds the query for this identity over `range`
    pub fn query(&self, range: &DateRange) -> Result<QueryParameters> {
        let builder = QueryParameters::builder().date_range(range);
        match self {
            Identity::License(l) => builder
                .license_number(l.number.as_str())
                .license_jurisdiction(l.jurisdiction.as_str())
                .build(),
            Identity::Party(p) => builder.party_name(p.name.as_str()).build(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
