pub mod checksum;
pub mod hex;
