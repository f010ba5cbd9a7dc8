use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::rows::CsvRow;
use super::schema::TableSchema;
use crate::error::PortSimError;
use crate::sim::Calendar;

/// 字段含分隔符、引号或换行时加引号
pub fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn write_line<W: Write, S: AsRef<str>>(w: &mut W, cells: &[S]) -> std::io::Result<()> {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        w.write_all(escape(cell.as_ref()).as_bytes())?;
    }
    w.write_all(b"\n")
}

pub fn write_csv<W: Write, T: CsvRow>(
    w: &mut W,
    header: &[&str],
    rows: &[T],
    calendar: &Calendar,
) -> std::io::Result<()> {
    write_line(w, header)?;
    for row in rows {
        write_line(w, &row.cells(calendar))?;
    }
    Ok(())
}

/// 把 `rows` 写入 `dir/<schema.file_name>` 并返回路径
pub fn write_table<T: CsvRow>(
    dir: &Path,
    schema: &TableSchema,
    header: &[&str],
    rows: &[T],
    calendar: &Calendar,
) -> Result<PathBuf, PortSimError> {
    let path = dir.join(schema.file_name);
    let mut w = BufWriter::new(File::create(&path)?);
    write_csv(&mut w, header, rows, calendar)?;
    w.flush()?;
    debug!(table = schema.name, rows = rows.len(), path = %path.display(), "表已写入");
    Ok(path)
}
