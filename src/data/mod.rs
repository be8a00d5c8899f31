//! Data module
//!
//! Loads input series from CSV and exports study results as CSV or Parquet

mod delimited;
mod parquet;

pub use self::delimited::{
    lag_stats_header, load_series, parse_timestamp, write_event_table, write_lag_stats,
    write_profile,
};
pub use self::parquet::{event_table_schema, lag_stats_schema, ParquetReader, ParquetWriter};
