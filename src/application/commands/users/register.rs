use super::{UserCommandService, login::AuthResult, password::validate_password};
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::user::{DisplayName, Email, NewUser, PasswordHash, Role},
};
use tracing::info;

pub struct RegisterUserCommand {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl UserCommandService {
    /// The first account becomes `admin`; every later one is a `member`.
    pub async fn register(&self, command: RegisterUserCommand) -> ApplicationResult<AuthResult> {
        let email = Email::new(command.email)?;
        let name = DisplayName::new(command.name)?;
        validate_password(&command.password)?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(ApplicationError::conflict("email already registered"));
        }

        let role = if self.user_repo.count().await? == 0 {
            Role::Admin
        } else {
            Role::Member
        };

        let hashed = self.password_hasher.hash(&command.password).await?;
        let password_hash = PasswordHash::new(hashed)?;
        let new_user = NewUser::new(email, name, password_hash, role, self.clock.now());
        let user = self.user_repo.insert(new_user).await?;
        info!(user_id = %user.id, role = %user.role, "user registered");

        let token = self.issue_token(&user).await?;
        Ok(AuthResult {
            user: user.into(),
            token,
        })
    }
}
