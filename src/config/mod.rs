//! Configuration module

mod site;

pub use site::DatabaseConfig;
pub use site::HighlightConfig;
pub use site::MiddlewareConfig;
pub use site::RemoteConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
