#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod capabilities;
pub mod profile;
pub mod records;
pub mod role;
