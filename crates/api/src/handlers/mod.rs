pub mod accounts;
pub mod email;
pub mod release_versions;
pub mod releases;
pub mod stats;
