//! Row sources feeding the bulk loader.
//!
//! A [`RowSource`] yields a finite, forward-only sequence of raw rows. It is
//! consumed by [`RowSource::scan`], which opens whatever the source needs
//! (a database connection, a cursor), lends the rows to a consumer as a
//! [`RowStream`], and releases everything before returning, on success and on
//! failure alike. A broken source yields an [`FtsError::Connection`] item
//! instead of ending early, so consumers can tell "no more rows" apart from
//! "the source died".
//!
//! [`FtsError::Connection`]: crate::error::FtsError::Connection
//!
//! # Examples
//!
//! ```
//! use ftsmachine::document::FieldValue;
//! use ftsmachine::source::RowSource;
//! use ftsmachine::source::memory::MemoryRowSource;
//!
//! let source = MemoryRowSource::new(vec![
//!     vec![FieldValue::from("fox jumps")],
//!     vec![FieldValue::from("lazy dog")],
//! ]);
//!
//! let count = source.scan(|rows| Ok(rows.count())).unwrap();
//! assert_eq!(count, 2);
//! ```

use crate::document::Row;
use crate::error::Result;

/// Stream of rows lent to a consumer for the duration of a scan.
pub type RowStream<'a> = Box<dyn Iterator<Item = Result<Row>> + 'a>;

/// A non-restartable source of raw rows.
pub trait RowSource {
    /// Consume the source, handing its rows to `consumer`.
    ///
    /// Resources acquired by the source are released before `scan` returns,
    /// whatever the consumer does. If the source cannot be opened the
    /// consumer is never called and a connection error is returned.
    fn scan<T, F>(self, consumer: F) -> Result<T>
    where
        F: FnOnce(RowStream<'_>) -> Result<T>;
}

pub mod memory;
pub mod sqlite;
pub mod table;
