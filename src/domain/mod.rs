pub mod address;
pub mod amount;
pub mod payout;
pub mod ports;
