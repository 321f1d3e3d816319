use crate::goal::Goal;
use polars::prelude::{AnyValue, DataFrame, PolarsResult};

fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Boolean(true) => "yes".to_string(),
        AnyValue::Boolean(false) => String::new(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::Float64(v) => super::format_days(*v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

fn separator(widths: &[usize]) -> String {
    let mut sep = String::from("+");
    for w in widths {
        sep.push_str(&"-".repeat(w + 2));
        sep.push('+');
    }
    sep.push('\n');
    sep
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push('|');
    for (cell, width) in cells.iter().zip(widths) {
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(width.saturating_sub(cell.chars().count())));
        out.push_str(" |");
    }
    out.push('\n');
}

/// Boxed text table with one column per frame column.
pub fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let header: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let rows: Vec<Vec<String>> = (0..df.height())
        .map(|row_idx| {
            columns
                .iter()
                .map(|col| col.get(row_idx).map(|v| cell_text(&v)).unwrap_or_default())
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let sep = separator(&widths);
    let mut out = String::new();
    out.push_str(&sep);
    push_row(&mut out, &header, &widths);
    out.push_str(&sep);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out.push_str(&sep);
    out
}

pub fn render_table(goal: &Goal) -> PolarsResult<String> {
    let df = goal.to_dataframe()?;
    Ok(render_df_as_text_table(&df))
}
