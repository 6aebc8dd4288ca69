use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A referenced row (category, training center) does not exist
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// Rewrites unique and foreign-key violations into their domain variants,
    /// leaving every other error untouched.
    pub fn on_violation(
        self,
        unique: impl FnOnce() -> String,
        foreign_key: impl FnOnce() -> String,
    ) -> Self {
        if self.is_unique_violation() {
            StorageError::ConstraintViolation(unique())
        } else if self.is_foreign_key_violation() {
            StorageError::InvalidReference(foreign_key())
        } else {
            self
        }
    }
}
