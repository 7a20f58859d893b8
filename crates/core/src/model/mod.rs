//! Entity structs and input DTOs.
//!
//! Entities are the shapes persisted in the JSON collection files; the
//! `Create*`/`Update*` DTOs are the request payloads accepted at the HTTP
//! boundary. Enum-valued fields reject unknown values during
//! deserialization, so malformed input never reaches repository logic.

pub mod account;
pub mod release;
pub mod release_version;

pub use account::{Account, CreateAccount, UpdateAccount};
pub use release::{
    CreateRelease, Defect, DefectSeverity, DefectStatus, HoursTaken, Release, ReleaseStatus,
    UpdateRelease,
};
pub use release_version::{
    CreateReleaseVersion, Feature, FeatureInput, ReleaseVersion, UpdateReleaseVersion,
};
