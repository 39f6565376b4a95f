//! A time-sortable 64-bit unique ID generator inspired by [Twitter's Snowflake].
//!
//! Every id packs, most significant bit first, a zero sign bit, 41 bits of
//! milliseconds since the generator epoch, an 11-bit machine id and an 11-bit
//! per-millisecond sequence. Ids from one generator grow strictly while its
//! clock does not move backwards.
//!
//! ## Quickstart
//!
//! Add the following to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! moltenflake = "0.1"
//! ```
//!
//! Use the library like this:
//!
//! ```
//! use moltenflake::{IdGenerator, SystemClock};
//!
//! let generator = IdGenerator::new(SystemClock, 1).unwrap();
//! let id = generator.generate_uid().unwrap();
//! println!("{}", id);
//! ```
//!
//! ## Concurrent use
//!
//! IdGenerator is thread-safe. Wrap it in an `Arc` before moving it to another thread.
//! A millisecond holds at most 2048 ids, so callers retry on
//! [`Error::SequenceExhausted`]:
//! ```
//! use moltenflake::{IdGenerator, SystemClock};
//! use std::{sync::Arc, thread};
//!
//! let generator = Arc::new(IdGenerator::new(SystemClock, 1).unwrap());
//!
//! let mut children = Vec::new();
//! for _ in 0..10 {
//!     let generator = Arc::clone(&generator);
//!     children.push(thread::spawn(move || loop {
//!         match generator.generate_uid() {
//!             Ok(id) => break id,
//!             Err(e) if e.is_sequence_exhausted() => thread::yield_now(),
//!             Err(e) => panic!("{e}"),
//!         }
//!     }));
//! }
//!
//! for child in children {
//!     println!("{}", child.join().unwrap());
//! }
//! ```
//!
//! [Twitter's Snowflake]: https://blog.twitter.com/2010/announcing-snowflake

mod builder;
mod clock;
pub mod config;
mod error;
mod generator;
pub mod http;
mod layout;

pub use builder::*;
pub use clock::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
