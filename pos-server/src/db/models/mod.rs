//! Entity models
//!
//! Record definitions shared by the repositories and the domain engines.
//! Every entity carries a soft-delete flag (`is_deleted`) and - except the
//! transaction line-item pivot - a `created_at` Unix-millisecond timestamp.
//! Records are never physically removed; all read paths filter on
//! `is_deleted = false`.

pub mod image;
pub mod item;
pub mod profile;
pub mod session;
pub mod transaction;
pub mod user;

pub use image::{Image, ImageId};
pub use item::{Item, ItemId, ItemUpdate};
pub use profile::{Profile, ProfileId, ProfileUpdate};
pub use session::{Session, SessionId};
pub use transaction::{Transaction, TransactionId, TransactionItem, TransactionItemDraft};
pub use user::{User, UserId, UserUpdate};
