pub mod timezone;
pub mod timing;
