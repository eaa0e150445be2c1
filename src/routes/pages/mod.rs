pub mod pages_handlers;
