use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::debug;

use crate::{errors::InputError, graph::*};

/// Distances of converted TSPLIB instances are rounded to this many decimals
pub const TSPLIB_DECIMALS: i32 = 1;

/// Extracts the coordinates of a TSPLIB file. Everything before `NODE_COORD_SECTION` is
/// ignored; afterwards each line of the form `id x y` contributes one point until `EOF` or
/// the end of input is reached. Lines with a different number of fields are skipped.
pub fn read_tsplib_points<R: BufRead>(reader: R) -> Result<Vec<Point>, InputError> {
    let mut in_section = false;
    let mut points = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if !in_section {
            in_section = line.starts_with("NODE_COORD_SECTION");
            continue;
        }

        if line == "EOF" {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 3 {
            continue;
        }

        let coordinate = |token: &str| {
            token
                .parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .ok_or_else(|| InputError::MalformedCoordinate {
                    line: index + 1,
                    token: token.to_string(),
                })
        };

        points.push(Point::new(coordinate(parts[1])?, coordinate(parts[2])?));
    }

    if points.is_empty() {
        return Err(InputError::NoCoordinates);
    }

    debug!("Read {} TSPLIB coordinates", points.len());
    Ok(points)
}

/// Reads a TSPLIB file and returns the matrix of Euclidean distances between its points,
/// rounded to [`TSPLIB_DECIMALS`] places.
pub fn read_tsplib_matrix<R: BufRead>(reader: R) -> Result<WeightMatrix, InputError> {
    let points = read_tsplib_points(reader)?;
    Ok(euclidean_matrix(&points, Some(TSPLIB_DECIMALS)))
}

pub fn read_tsplib_matrix_file<P: AsRef<Path>>(path: P) -> Result<WeightMatrix, InputError> {
    let reader = BufReader::new(File::open(path)?);
    read_tsplib_matrix(reader)
}
