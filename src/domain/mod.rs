//! Domain models and types for the DJEN collector.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Query parameters** ([`QueryParameters`], [`DateRange`]) validated at construction
//! - **Records** ([`RawRecord`] as returned upstream, [`FlatRecord`] as exported)
//! - **Identities** ([`Identity`]) searched by the batch runner
//! - **Error types** ([`DjenError`], [`FetchError`])
//! - **Result type alias** ([`Result`])
//!
//! # Builder Pattern
//!
//! Query parameters can only be built through a validating builder:
//!
//! ```rust
//! use djen::domain::QueryParameters;
//!
//! # fn example() -> djen::domain::Result<()> {
//! let params = QueryParameters::builder()
//!     .party_name("Banco Exemplo S.A.")
//!     .start_date("2024-01-01")
//!     .end_date("2024-01-31")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod identity;
pub mod query;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{DjenError, FetchError, FetchErrorKind, UserMessage};
pub use identity::{Identity, License, Party};
pub use query::{DateRange, QueryParameters, QueryParametersBuilder};
pub use record::{Column, FlatRecord, RawRecord};
pub use result::Result;
