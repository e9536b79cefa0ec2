//! tapyze-wallet: wallet REST client, saved-feed parsing, statement refresh
//! state and CSV export.

pub mod client;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod export;
pub mod statements;

pub use client::{ClientContext, DEFAULT_PAGE_LIMIT, STATEMENT_LIMIT, WalletClient};
pub use credentials::{CredentialProvider, EnvToken, StaticToken};
pub use envelope::{
    Pagination, RecipientType, TopUpReceipt, TransactionPage, TransferReceipt, TransferRequest,
    WalletBalance, parse_transaction_feed, read_transaction_feed,
};
pub use error::{WalletError, WalletResult};
pub use export::{export_statement_csv, write_statement_csv};
pub use statements::{Generation, RefreshOutcome, StatementsModel};
