//! Role records.

/// Role record held by the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: u64,
    /// Display name embedded in tokens and the safe user view
    pub name: String,
    pub is_active: bool,
}
