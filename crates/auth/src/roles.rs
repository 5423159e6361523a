use serde::{Deserialize, Serialize};

/// Staff role attached to every worker account.
///
/// The set is closed on purpose: route guards reason over exactly these two
/// roles, and a token or record carrying any other role string must fail to
/// decode instead of silently granting nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Full staff access, including worker account management.
    Administrator,

    /// Sales staff. Administrators also pass every salesperson gate.
    Salesperson,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Administrator => "administrator",
            StaffRole::Salesperson => "salesperson",
        }
    }
}

impl core::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
