mod login;
mod password;
mod register;
mod service;

pub use login::{AuthResult, LoginUserCommand};
pub use register::RegisterUserCommand;
pub use service::UserCommandService;
