// src/models/mod.rs

pub mod account;
pub mod session;
