//! Common types and definitions used across `gdbconn`.

mod endian;
mod signal;

pub use self::endian::Endianness;
pub use self::signal::Signal;
