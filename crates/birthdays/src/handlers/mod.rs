pub mod birthdays;
pub mod error;
pub mod health;

pub use error::AppError;
