//! Parquet export of study results

use arrow::array::{
    Array, ArrayRef, Float64Array, StringArray, TimestampMicrosecondArray, UInt64Array,
};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::anomaly::EventKind;
use crate::pipeline::EventTable;
use crate::stats::{LagRecord, LagStatistic, LagStatsTable};

const STAT_FIELDS: [&str; 5] = ["count", "mean", "std", "t_stat", "p_value"];

/// Lag statistics schema: `lag` then five nullable columns per category
pub fn lag_stats_schema() -> Schema {
    let mut fields = vec![Field::new("lag", DataType::UInt64, false)];
    for kind in EventKind::ALL {
        for name in STAT_FIELDS {
            let data_type = if name == "count" {
                DataType::UInt64
            } else {
                DataType::Float64
            };
            fields.push(Field::new(format!("{kind}_{name}"), data_type, true));
        }
    }
    Schema::new(fields)
}

/// Event table schema with one column per lag offset
pub fn event_table_schema(primary: &str, secondary: &str, max_lag: usize) -> Schema {
    let mut fields = vec![
        Field::new(
            "timestamp",
            DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
            false,
        ),
        Field::new(primary, DataType::Float64, false),
        Field::new(secondary, DataType::Float64, false),
        Field::new(format!("{primary}_return"), DataType::Float64, true),
        Field::new(format!("{secondary}_return"), DataType::Float64, true),
        Field::new("zscore", DataType::Float64, true),
        Field::new("flag", DataType::Utf8, false),
    ];
    for k in 0..=max_lag {
        fields.push(Field::new(format!("{secondary}_lag_{k}"), DataType::Float64, true));
    }
    Schema::new(fields)
}

/// Parquet file writer for study outputs
pub struct ParquetWriter {
    output_dir: PathBuf,
}

impl ParquetWriter {
    /// Create a new Parquet writer
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Ensure output directory exists
    pub fn ensure_dir(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Path of `<name>.parquet` in the output directory
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{name}.parquet"))
    }

    fn write_batch(&self, path: &Path, batch: RecordBatch) -> anyhow::Result<()> {
        self.ensure_dir()?;
        let file = File::create(path)?;

        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();

        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
        writer.write(&batch)?;
        writer.close()?;
        Ok(())
    }

    /// Write per-lag statistics
    pub fn write_lag_stats(&self, path: &Path, table: &LagStatsTable) -> anyhow::Result<()> {
        let schema = Arc::new(lag_stats_schema());
        let records: Vec<&LagRecord> = table.records().collect();

        let lags: Vec<u64> = records.iter().map(|r| r.lag as u64).collect();
        let mut columns: Vec<ArrayRef> = vec![Arc::new(UInt64Array::from(lags))];

        for kind in EventKind::ALL {
            let stats: Vec<Option<&LagStatistic>> = records.iter().map(|r| r.get(kind)).collect();
            let counts: Vec<Option<u64>> = stats.iter().map(|s| s.map(|s| s.count as u64)).collect();
            let means: Vec<Option<f64>> = stats.iter().map(|s| s.map(|s| s.mean)).collect();
            let stds: Vec<Option<f64>> = stats.iter().map(|s| s.and_then(|s| s.std_dev)).collect();
            let ts: Vec<Option<f64>> = stats.iter().map(|s| s.and_then(|s| s.t_statistic)).collect();
            let ps: Vec<Option<f64>> = stats.iter().map(|s| s.and_then(|s| s.p_value)).collect();

            columns.push(Arc::new(UInt64Array::from(counts)));
            columns.push(Arc::new(Float64Array::from(means)));
            columns.push(Arc::new(Float64Array::from(stds)));
            columns.push(Arc::new(Float64Array::from(ts)));
            columns.push(Arc::new(Float64Array::from(ps)));
        }

        let batch = RecordBatch::try_new(schema, columns)?;
        self.write_batch(path, batch)?;

        tracing::debug!(path = ?path, count = records.len(), "Wrote lag statistics to Parquet");

        Ok(())
    }

    /// Write the event-flagged, lag-aligned table
    pub fn write_event_table(&self, path: &Path, table: &EventTable) -> anyhow::Result<()> {
        let max_lag = table.lags.max_lag();
        let schema = Arc::new(event_table_schema(
            &table.primary_label,
            &table.secondary_label,
            max_lag,
        ));
        let rows = &table.rows;

        let timestamps: Vec<i64> = rows.iter().map(|r| r.timestamp.timestamp_micros()).collect();
        let primary: Vec<f64> = rows.iter().map(|r| r.primary).collect();
        let secondary: Vec<f64> = rows.iter().map(|r| r.secondary).collect();
        let primary_returns: Vec<Option<f64>> = rows.iter().map(|r| r.primary_return).collect();
        let secondary_returns: Vec<Option<f64>> = rows.iter().map(|r| r.secondary_return).collect();
        let zscores: Vec<Option<f64>> = rows.iter().map(|r| r.zscore).collect();
        let flags: Vec<&str> = rows.iter().map(|r| r.flag.as_str()).collect();

        let mut columns: Vec<ArrayRef> = vec![
            Arc::new(TimestampMicrosecondArray::from(timestamps).with_timezone("UTC")),
            Arc::new(Float64Array::from(primary)),
            Arc::new(Float64Array::from(secondary)),
            Arc::new(Float64Array::from(primary_returns)),
            Arc::new(Float64Array::from(secondary_returns)),
            Arc::new(Float64Array::from(zscores)),
            Arc::new(StringArray::from(flags)),
        ];

        for k in 0..=max_lag {
            let values: Vec<Option<f64>> = (0..rows.len()).map(|i| table.lags.get(i, k)).collect();
            columns.push(Arc::new(Float64Array::from(values)));
        }

        let batch = RecordBatch::try_new(schema, columns)?;
        self.write_batch(path, batch)?;

        tracing::debug!(path = ?path, count = rows.len(), "Wrote event table to Parquet");

        Ok(())
    }
}

/// Reader for Parquet files written by [`ParquetWriter`]
pub struct ParquetReader {
    path: PathBuf,
}

fn f64_column<'a>(batch: &'a RecordBatch, name: &str) -> anyhow::Result<&'a Float64Array> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<Float64Array>())
        .ok_or_else(|| anyhow::anyhow!("Invalid {} column", name))
}

fn u64_column<'a>(batch: &'a RecordBatch, name: &str) -> anyhow::Result<&'a UInt64Array> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<UInt64Array>())
        .ok_or_else(|| anyhow::anyhow!("Invalid {} column", name))
}

fn nullable(array: &Float64Array, i: usize) -> Option<f64> {
    (!array.is_null(i)).then(|| array.value(i))
}

impl ParquetReader {
    /// Create a new reader for a Parquet file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read per-lag records back from a lag statistics file
    pub fn read_lag_records(&self) -> anyhow::Result<Vec<LagRecord>> {
        use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

        let file = File::open(&self.path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
        let reader = builder.build()?;

        let mut records = Vec::new();

        for batch_result in reader {
            let batch = batch_result?;
            let lags = u64_column(&batch, "lag")?;

            for i in 0..batch.num_rows() {
                let mut record = LagRecord::new(lags.value(i) as usize);
                for kind in EventKind::ALL {
                    let counts = u64_column(&batch, &format!("{kind}_count"))?;
                    if counts.is_null(i) {
                        continue;
                    }
                    let stat = LagStatistic {
                        count: counts.value(i) as usize,
                        mean: f64_column(&batch, &format!("{kind}_mean"))?.value(i),
                        std_dev: nullable(f64_column(&batch, &format!("{kind}_std"))?, i),
                        t_statistic: nullable(f64_column(&batch, &format!("{kind}_t_stat"))?, i),
                        p_value: nullable(f64_column(&batch, &format!("{kind}_p_value"))?, i),
                    };
                    record = record.with(kind, stat);
                }
                records.push(record);
            }
        }

        Ok(records)
    }
}
