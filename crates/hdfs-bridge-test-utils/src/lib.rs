//! Test helpers shared across hdfs-bridge crates.

pub mod env;
pub mod observer;
pub mod security;
pub mod site;

pub use env::env_map;
pub use observer::RecordingObserver;
pub use security::StubSecurityContext;
pub use site::{site_xml, write_site_xml};
