mod client;
mod errors;
pub mod types;
mod user_agent;
pub use self::client::Client;
pub use self::errors::Error;
pub use self::types::{DateRange, PriceBar};
