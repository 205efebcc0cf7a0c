pub mod risks;
pub mod users;
