//! Configuration module

mod site;

pub use site::load_config;
pub use site::BlogsConfig;
pub use site::ContactConfig;
pub use site::DataConfig;
pub use site::FooterConfig;
pub use site::HeaderConfig;
pub use site::Link;
pub use site::NavbarConfig;
pub use site::SeoConfig;
