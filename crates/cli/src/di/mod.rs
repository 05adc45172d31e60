mod adapters;
mod services;

pub use adapters::Adapters;
pub use services::Services;
