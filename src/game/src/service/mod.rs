pub mod match_controller;
pub mod session;
