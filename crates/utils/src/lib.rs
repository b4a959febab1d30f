pub mod backoff;
pub mod wallet;

pub use backoff::Backoff;
pub use wallet::Wallet;
