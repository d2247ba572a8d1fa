//! **Private**: `shared` members are only for internal use.
//! Some types are reexposed in the crate root and in `client`.

pub use self::version::Version;

pub mod headers;
mod version;
