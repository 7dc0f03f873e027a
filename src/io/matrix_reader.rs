use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{errors::InputError, graph::*};

type Result<T> = std::result::Result<T, InputError>;

/// Reads weight matrices in the textual instance format: an optional line holding the number
/// of nodes `n`, followed by `n` rows of `n` values each. Values are separated by whitespace
/// and/or commas; brackets are ignored, so `[0.0, 1.5]` is a valid row. Blank lines are
/// skipped, as is anything after the last row. `inf` denotes a missing edge.
///
/// Without the count line, `n` is the number of values in the first row.
pub trait MatrixReader: Sized {
    fn try_read_matrix<R: BufRead>(reader: R) -> Result<Self>;
    fn try_read_matrix_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

impl MatrixReader for WeightMatrix {
    fn try_read_matrix<R: BufRead>(reader: R) -> Result<Self> {
        let rows = parse_rows(reader)?;
        WeightMatrix::try_from_rows(&rows)
    }

    fn try_read_matrix_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = File::open(path)?;
        let buf_reader = BufReader::new(reader);
        Self::try_read_matrix(buf_reader)
    }
}

fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || matches!(c, ',' | '[' | ']'))
        .filter(|t| !t.is_empty())
}

/// Tokenizes the input and returns the numeric rows. Checks the count line and the number
/// of rows, then row by row the number of values and that every token is a non-negative
/// number. Symmetry is up to [`WeightMatrix::try_from_rows`].
fn parse_rows<R: BufRead>(reader: R) -> Result<Vec<Vec<Weight>>> {
    let mut lines = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push((index + 1, line));
        }
    }

    let Some((first_line, first)) = lines.first() else {
        return Err(InputError::Empty);
    };

    let header: Vec<&str> = tokens(first).collect();
    let has_count_line = header.len() == 1 && !first.trim_start().starts_with('[');

    let (n, row_lines) = if has_count_line {
        let count: i64 = header[0]
            .parse()
            .map_err(|_| InputError::MalformedCount {
                line: *first_line,
                token: header[0].to_string(),
            })?;

        if count <= 0 {
            return Err(InputError::NonPositiveCount { count });
        }

        (count as usize, &lines[1..])
    } else {
        (header.len(), &lines[..])
    };

    if row_lines.len() < n {
        return Err(InputError::WrongRowCount {
            expected: n,
            found: row_lines.len(),
        });
    }

    row_lines[..n]
        .iter()
        .enumerate()
        .map(|(row, (_, line))| parse_row(row, line, n))
        .collect()
}

fn parse_row(row: usize, line: &str, n: usize) -> Result<Vec<Weight>> {
    let parts: Vec<&str> = tokens(line).collect();
    if parts.len() != n {
        return Err(InputError::WrongRowLength {
            row,
            expected: n,
            found: parts.len(),
        });
    }

    parts
        .into_iter()
        .enumerate()
        .map(|(column, token)| match token.parse::<Weight>() {
            Ok(weight) if weight < 0.0 => Err(InputError::NegativeWeight {
                row,
                column,
                weight,
            }),
            Ok(weight) if !weight.is_nan() => Ok(weight),
            _ => Err(InputError::NonNumeric {
                row,
                column,
                token: token.to_string(),
            }),
        })
        .collect()
}
