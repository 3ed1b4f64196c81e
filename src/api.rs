mod client;
pub mod hvakosterstrommen;
pub mod price_source;
