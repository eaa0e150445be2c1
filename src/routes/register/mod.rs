pub mod register_handlers;
pub mod register_models;
