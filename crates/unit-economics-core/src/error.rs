use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitEconomicsError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },
}

impl UnitEconomicsError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        UnitEconomicsError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
