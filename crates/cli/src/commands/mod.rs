pub mod check;
pub mod profiles;
pub mod service;
