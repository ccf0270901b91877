pub mod creatures_handler;
pub mod problem;
pub mod seed_handler;
