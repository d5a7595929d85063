//! Database schema definitions
//!
//! Table and column names for the `history` table, used to build rusqlite queries.

/// Contact history table schema
pub mod history {
    /// Table name
    pub const TABLE: &str = "history";
    /// Surrogate primary key column
    pub const ID: &str = "id";
    /// Phone number column (unique)
    pub const TEL: &str = "tel";
    /// Timestamp of the most recent message exchanged with `tel`
    pub const LAST_MESSAGE: &str = "last_message";
    /// Unique index over `tel`
    pub const TEL_INDEX: &str = "idx_history_tel";
}
