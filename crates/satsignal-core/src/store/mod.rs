// ── In-memory wallet state ──

pub(crate) mod collection;
mod wallet;

pub use wallet::{InMemoryWalletService, WalletSummary};
