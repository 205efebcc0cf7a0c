use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::Role;

pub fn ensure_role(actor: &AuthenticatedUser, required: Role) -> ApplicationResult<()> {
    if actor.has_role(required) {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "role '{required}' is required"
        )))
    }
}
