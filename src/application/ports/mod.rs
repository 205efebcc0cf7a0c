// src/application/ports/mod.rs
pub mod health;
pub mod security;
pub mod time;
