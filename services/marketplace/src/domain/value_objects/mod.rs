//! 值对象

mod hashed_password;

pub use hashed_password::HashedPassword;
