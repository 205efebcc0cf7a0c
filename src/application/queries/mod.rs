pub mod audit;
pub mod risks;
pub mod users;
