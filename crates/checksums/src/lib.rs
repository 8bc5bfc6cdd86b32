#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `checksums` computes the content fingerprint attached to each treescan
//! record: an MD5 digest over the full file content, rendered as lowercase
//! hex. The digest is an identity and deduplication key, not a security
//! primitive.
//!
//! # Design
//!
//! - [`Md5`] is a streaming hasher wrapping the RustCrypto `md-5` crate.
//! - [`digest_file`] reads a file in fixed [`CHUNK_SIZE`] pieces so memory use
//!   does not depend on file size.
//! - [`digest_file_with`] additionally polls a cancellation flag between
//!   chunks, which lets a worker pool abandon long reads once a scan has
//!   been aborted.
//!
//! # Errors
//!
//! File helpers return [`std::io::Error`] unchanged from the open or read
//! that failed. Cancellation is reported as
//! [`std::io::ErrorKind::Interrupted`].
//!
//! # Examples
//!
//! ```
//! use checksums::{FileDigest, Md5};
//!
//! let digest = FileDigest::from(Md5::digest(b"hello"));
//! assert_eq!(digest.to_hex(), "5d41402abc4b2a76b9719d911017c592");
//! ```

mod file;
mod hasher;

pub use file::{CHUNK_SIZE, FileDigest, digest_file, digest_file_with, digest_reader};
pub use hasher::Md5;
