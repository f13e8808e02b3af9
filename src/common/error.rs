use thiserror::Error;

/// The crate-wide error type. Constraint violations raised by Postgres are
/// translated into the specific variants by the repositories so that callers
/// can react without parsing database error strings.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("e-mail '{0}' is already registered")]
    EmailAlreadyExists(String),

    #[error("VIN '{0}' is already registered")]
    VinAlreadyExists(String),

    #[error("article '{0}' is already in use")]
    ArticleAlreadyExists(String),

    #[error("brand '{0}' already exists")]
    BrandAlreadyExists(String),

    #[error("model '{0}' already exists for this brand")]
    CarModelAlreadyExists(String),

    #[error("a pending purchase request for this car and customer already exists")]
    DuplicatePendingRequest,

    #[error("part already has a warehouse record")]
    WarehouseItemAlreadyExists,

    #[error("referenced {0} does not exist")]
    MissingReference(&'static str),

    #[error("check constraint '{0}' rejected the row")]
    CheckViolation(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl AppError {
    /// Folds CHECK violations into their own variant; everything else stays
    /// a plain database error. Unique and foreign-key violations carry
    /// entity-specific meaning and are mapped inside the repositories.
    pub(crate) fn from_db(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_check_violation() {
                return AppError::CheckViolation(
                    db_err.constraint().unwrap_or_default().to_string(),
                );
            }
        }
        AppError::Database(e)
    }
}

/// Hand-built `sqlx::Error::Database` values for exercising the constraint
/// mapping without a live connection.
#[cfg(test)]
pub(crate) mod db_errors {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};

    #[derive(Debug)]
    enum Kind {
        Unique,
        ForeignKey,
        Check,
        Other,
    }

    #[derive(Debug)]
    struct ConstraintError {
        kind: Kind,
        constraint: Option<&'static str>,
    }

    impl fmt::Display for ConstraintError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self.constraint {
                Some(name) => write!(f, "violates constraint \"{name}\""),
                None => write!(f, "database error"),
            }
        }
    }

    impl StdError for ConstraintError {}

    impl DatabaseError for ConstraintError {
        fn message(&self) -> &str {
            "constraint violation"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            None
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn kind(&self) -> ErrorKind {
            match self.kind {
                Kind::Unique => ErrorKind::UniqueViolation,
                Kind::ForeignKey => ErrorKind::ForeignKeyViolation,
                Kind::Check => ErrorKind::CheckViolation,
                Kind::Other => ErrorKind::Other,
            }
        }
    }

    fn wrap(kind: Kind, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ConstraintError { kind, constraint }))
    }

    pub(crate) fn unique_violation(constraint: &'static str) -> sqlx::Error {
        wrap(Kind::Unique, Some(constraint))
    }

    pub(crate) fn foreign_key_violation(constraint: &'static str) -> sqlx::Error {
        wrap(Kind::ForeignKey, Some(constraint))
    }

    pub(crate) fn check_violation(constraint: &'static str) -> sqlx::Error {
        wrap(Kind::Check, Some(constraint))
    }

    pub(crate) fn other() -> sqlx::Error {
        wrap(Kind::Other, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_violations_surface_the_constraint_name() {
        let err = AppError::from_db(db_errors::check_violation("cars_year_check"));
        assert!(matches!(err, AppError::CheckViolation(name) if name == "cars_year_check"));
    }

    #[test]
    fn unmapped_database_errors_pass_through() {
        let err = AppError::from_db(db_errors::other());
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn display_messages_name_the_conflicting_value() {
        let err = AppError::VinAlreadyExists("JTDBR32E720123456".into());
        assert_eq!(
            err.to_string(),
            "VIN 'JTDBR32E720123456' is already registered"
        );

        let err = AppError::NotFound("car");
        assert_eq!(err.to_string(), "car not found");
    }

    #[test]
    fn validation_errors_convert_via_from() {
        let errors = validator::ValidationErrors::new();
        let err: AppError = errors.into();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
