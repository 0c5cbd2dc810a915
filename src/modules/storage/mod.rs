//! Object storage for charity photos and tax certificate documents
//!
//! Backed by MinIO or any S3-compatible service via the rust-s3 crate.
//! Charity photos are public objects; certificate documents are served
//! through presigned URLs.

mod object_store;

pub use object_store::{validate_image, ObjectStore, ALLOWED_IMAGE_TYPES, MAX_IMAGE_BYTES};
