pub mod cleaner;
pub mod collector;
pub mod trends;
pub mod twitter_client;
