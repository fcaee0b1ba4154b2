//! 领域层

pub mod listing;
pub mod repositories;
pub mod services;
pub mod user;
pub mod value_objects;

pub use listing::{Listing, ListingId, NewListing};
pub use user::{NewUser, User, UserCredentials};
