use crate::domain::category::index::SLUG_INDEX_NAME;
use crate::domain::errors::DomainError;

const CODE_UNIQUE_VIOLATION: &str = "23505";
const CODE_UNDEFINED_OBJECT: &str = "42704";
const CODE_LOCK_NOT_AVAILABLE: &str = "55P03";

#[must_use]
pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    SLUG_INDEX_NAME => {
                        DomainError::Conflict("category slug already exists within parent".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    CODE_UNIQUE_VIOLATION => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    CODE_UNDEFINED_OBJECT => {
                        return DomainError::NotFound(db_err.message().to_string());
                    }
                    CODE_LOCK_NOT_AVAILABLE => {
                        return DomainError::Persistence(
                            "timed out waiting for a table lock".into(),
                        );
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        other => DomainError::Persistence(other.to_string()),
    }
}
