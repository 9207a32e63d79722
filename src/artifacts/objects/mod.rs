//! Object types stored in the database
//!
//! Everything nit stores is an object identified by the SHA-1 of its canonical
//! serialization `<type> <size>\0<content>`:
//!
//! - **Blob**: file content
//! - **Tree**: flat mapping from path to blob object ID
//! - **Commit**: tree snapshot plus parent links, author and message

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
