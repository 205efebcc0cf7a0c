use crate::domain::errors::DomainError;

const CNT_USER_EMAIL: &str = "users_email_key";
const CNT_RISK_OWNER: &str = "risks_owner_id_fkey";
const CNT_RISK_CATEGORY: &str = "risks_category_id_fkey";
const CNT_RISK_STATUS: &str = "risks_status_chk";
const CNT_RISK_SEVERITY: &str = "risks_severity_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_USER_EMAIL => DomainError::Conflict("email already registered".into()),
                    CNT_RISK_OWNER => DomainError::Validation("owner does not exist".into()),
                    CNT_RISK_CATEGORY => {
                        DomainError::Validation("category does not exist".into())
                    }
                    CNT_RISK_STATUS => DomainError::Validation("invalid risk status".into()),
                    CNT_RISK_SEVERITY => DomainError::Validation("invalid risk severity".into()),
                    other => classify_code(db_err.code().as_deref()).unwrap_or_else(|| {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }),
                };
            }

            classify_code(db_err.code().as_deref())
                .unwrap_or_else(|| DomainError::Persistence(db_err.message().to_string()))
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

fn classify_code(code: Option<&str>) -> Option<DomainError> {
    match code? {
        "23505" => Some(DomainError::Conflict("unique constraint violated".into())),
        "23503" => Some(DomainError::Validation("referenced record not found".into())),
        "23514" => Some(DomainError::Validation("check constraint violated".into())),
        "22001" => Some(DomainError::Validation("value too long".into())),
        _ => None,
    }
}
