//! Configuration module

mod site;

pub use site::InvalidContentPolicy;
pub use site::SiteConfig;
