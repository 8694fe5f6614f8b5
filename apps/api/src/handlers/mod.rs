pub mod addresses;
pub mod dates;
pub mod fields;
pub mod health;
pub mod statuses;
