mod lifecycle;
mod server;
pub use server::Server;

mod server_config;
pub use server_config::ServerConfig;
