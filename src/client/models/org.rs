//! Organization models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Organization identifier as issued by the survey backend
pub type OrgId = i64;

/// `upCode` under which the top level of the organization tree is listed
pub const ROOT_UP_CODE: &str = "1";

/// Organization unit from `GET /api/organizations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Organization ID
    pub organization_id: OrgId,

    /// Short display name
    #[serde(default)]
    pub org_name: String,

    /// Fully qualified name (e.g. "HQ Finance Payroll")
    #[serde(default)]
    pub full_name: String,

    /// Organization code
    #[serde(default)]
    pub oc_code: String,

    /// Parent code
    #[serde(default)]
    pub up_code: String,
}

impl Organization {
    /// Key under which this organization's children are listed
    pub fn child_key(&self) -> ParentKey {
        ParentKey::from(self.organization_id)
    }
}

/// Key of one level of the tree: the `upCode` query value.
///
/// Either the root sentinel or the string form of an organization ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParentKey(String);

impl ParentKey {
    /// Key of the top level of the tree
    pub fn root() -> Self {
        Self(ROOT_UP_CODE.to_string())
    }

    /// Wrap a raw `upCode` value
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_UP_CODE
    }
}

impl From<OrgId> for ParentKey {
    fn from(id: OrgId) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ParentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
