//! Testing utilities for code built on `ironpool`.
//!
//! - **Assertions**: order-independent record comparison, sorted-permutation checks
//! - **Fixtures**: deterministic customer lines and integer sequences
//! - **Mock I/O**: readers that fail mid-stream, temporary (optionally
//!   compressed) input files
//!
//! # Quick Start
//!
//! ```
//! use ironpool::testing::*;
//! use ironpool::{ParseOptions, parse_sequential, parse_worker_pool};
//!
//! # fn main() -> anyhow::Result<()> {
//! let lines = generate_customer_lines(100, 7);
//! let seq = parse_sequential(lines_to_input(&lines), &ParseOptions::default())?;
//! let pool = parse_worker_pool(lines_to_input(&lines), 4, &ParseOptions::default())?;
//! assert_same_output(&pool, &seq);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mock_io;

pub use assertions::*;
pub use fixtures::*;
pub use mock_io::*;
