pub mod features;
pub mod server;
pub mod services;
pub mod utilities;
