//! Organization display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Organization;

/// Organization display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgDisplay {
    /// Organization ID
    #[tabled(rename = "ID")]
    pub organization_id: i64,

    /// Short name
    #[tabled(rename = "NAME")]
    pub org_name: String,

    /// Fully qualified name
    #[tabled(rename = "FULL NAME")]
    pub full_name: String,

    /// Organization code
    #[tabled(rename = "CODE")]
    pub oc_code: String,

    /// Parent code
    #[tabled(rename = "PARENT")]
    pub up_code: String,
}

impl From<Organization> for OrgDisplay {
    fn from(org: Organization) -> Self {
        Self {
            organization_id: org.organization_id,
            org_name: org.org_name,
            full_name: org.full_name,
            oc_code: org.oc_code,
            up_code: org.up_code,
        }
    }
}

impl From<&Organization> for OrgDisplay {
    fn from(org: &Organization) -> Self {
        Self::from(org.clone())
    }
}
