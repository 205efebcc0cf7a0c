pub mod audit;
pub mod category;
pub mod errors;
pub mod risk;
pub mod user;
