use super::UserCommandService;
use crate::{
    application::{
        dto::{AuthTokenDto, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::Email,
};

pub struct LoginUserCommand {
    pub email: String,
    pub password: String,
}

pub struct AuthResult {
    pub user: UserDto,
    pub token: AuthTokenDto,
}

impl UserCommandService {
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, command: LoginUserCommand) -> ApplicationResult<AuthResult> {
        let invalid = || ApplicationError::unauthorized("invalid credentials");

        let email = Email::new(command.email).map_err(|_| invalid())?;
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid)?;

        if !self
            .password_hasher
            .verify(&command.password, user.password_hash.as_str())
            .await?
        {
            return Err(invalid());
        }

        let token = self.issue_token(&user).await?;
        Ok(AuthResult {
            user: user.into(),
            token,
        })
    }
}
