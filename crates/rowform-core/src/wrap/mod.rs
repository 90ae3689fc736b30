//! Null and Default wrappers.
//!
//! `Null<T>` means "absent at the data level" (SQL NULL).
//! `Defaultable<T>` means "caller declines to supply a value" (SQL DEFAULT).
//! A nullable, default-able column is `Defaultable<Null<T>>`, which keeps
//! "no value supplied" and "NULL supplied" apart.

mod defaultable;
mod null;

pub use defaultable::Defaultable;
pub use null::Null;
