use crate::constants::{
    BALL_LAND_X, BALL_LAND_Y, FRAME_ID, GAME_ID, MISSING_VALUES, NFL_ID, PLAY_ID, PLAYER_NAME,
    PLAYER_ROLE, X, Y,
};
use crate::error::{Result, TrajError};
use crate::tracking::{Schema, TrackingRow, TrackingTable};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use std::io::Read;
use std::path::Path;

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    game_id: usize,
    play_id: usize,
    frame_id: usize,
    nfl_id: usize,
    x: usize,
    y: usize,
    player_name: Option<usize>,
    player_role: Option<usize>,
    ball_land: Option<(usize, usize)>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        let require = |name: &'static str| find(name).ok_or(TrajError::MissingColumn(name));

        Ok(Self {
            game_id: require(GAME_ID)?,
            play_id: require(PLAY_ID)?,
            frame_id: require(FRAME_ID)?,
            nfl_id: require(NFL_ID)?,
            x: require(X)?,
            y: require(Y)?,
            player_name: find(PLAYER_NAME),
            player_role: find(PLAYER_ROLE),
            ball_land: find(BALL_LAND_X).zip(find(BALL_LAND_Y)),
        })
    }

    fn schema(&self) -> Schema {
        Schema {
            player_name: self.player_name.is_some(),
            player_role: self.player_role.is_some(),
            ball_land: self.ball_land.is_some(),
        }
    }
}

/// Reads a tracking table from a CSV file
///
/// # Errors
/// Returns error if the file cannot be read, a required column is missing,
/// or an id/coordinate cell cannot be parsed
pub fn read_tracking_csv<P: AsRef<Path>>(path: P) -> Result<TrackingTable> {
    let file = std::fs::File::open(path)?;
    read_tracking_from_reader(file)
}

/// Reads and merges all CSV files from a directory
///
/// Files that fail to parse are skipped with a warning. Optional columns are
/// kept only if every merged file has them.
///
/// # Errors
/// Returns error if the directory cannot be read or no valid CSV files found
pub fn read_tracking_from_directory<P: AsRef<Path>>(dir_path: P) -> Result<TrackingTable> {
    let dir_path = dir_path.as_ref();

    if !dir_path.is_dir() {
        return Err(TrajError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Not a directory: {}", dir_path.display()),
        )));
    }

    let mut paths: Vec<_> = std::fs::read_dir(dir_path)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    paths.sort();

    let mut merged = TrackingTable::default();
    let mut files_processed = 0;

    for path in paths {
        match read_tracking_csv(&path) {
            Ok(table) => {
                debug!("loaded {} rows from {}", table.len(), path.display());
                merged.merge(table);
                files_processed += 1;
            }
            Err(e) => warn!("Failed to read CSV file {}: {}", path.display(), e),
        }
    }

    if files_processed == 0 {
        return Err(TrajError::Other(format!(
            "No valid CSV files found in directory: {}",
            dir_path.display()
        )));
    }

    Ok(merged)
}

/// Reads a file or every CSV file of a directory
pub fn read_tracking<P: AsRef<Path>>(path: P) -> Result<TrackingTable> {
    let path = path.as_ref();
    if path.is_dir() {
        read_tracking_from_directory(path)
    } else {
        read_tracking_csv(path)
    }
}

/// Reads tracking rows from any reader with a header row.
/// - headers are matched case-insensitively, unknown columns are ignored
/// - empty cells and `NA`/`NaN`/`null` are read as missing values
pub fn read_tracking_from_reader<R: Read>(reader: R) -> Result<TrackingTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| TrajError::CsvHeader(format!("Failed to read headers: {}", e)))?;
    let columns = ColumnIndex::from_headers(headers)?;

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 2; // 1-indexed, +1 for header

        if rec.iter().all(|f| f.is_empty()) {
            continue;
        }
        rows.push(parse_record(&rec, row, &columns)?);
    }

    Ok(TrackingTable::new(columns.schema(), rows))
}

fn parse_record(rec: &StringRecord, row: usize, columns: &ColumnIndex) -> Result<TrackingRow> {
    let ball_land = columns.ball_land.map(|(bx, by)| {
        Ok::<_, TrajError>((
            parse_float(rec, bx, BALL_LAND_X, row)?,
            parse_float(rec, by, BALL_LAND_Y, row)?,
        ))
    });
    let (ball_land_x, ball_land_y) = ball_land.transpose()?.unwrap_or((None, None));

    Ok(TrackingRow {
        game_id: parse_int(rec, columns.game_id, GAME_ID, row)?,
        play_id: parse_int(rec, columns.play_id, PLAY_ID, row)?,
        frame_id: parse_int(rec, columns.frame_id, FRAME_ID, row)?,
        nfl_id: parse_int(rec, columns.nfl_id, NFL_ID, row)?,
        player_name: columns.player_name.and_then(|i| text_value(rec, i)),
        x: parse_float(rec, columns.x, X, row)?,
        y: parse_float(rec, columns.y, Y, row)?,
        player_role: columns.player_role.and_then(|i| text_value(rec, i)),
        ball_land_x,
        ball_land_y,
    })
}

/// Cell content, `None` for empty or missing markers
fn cell(rec: &StringRecord, index: usize) -> Option<&str> {
    rec.get(index)
        .map(str::trim)
        .filter(|v| !v.is_empty() && !MISSING_VALUES.iter().any(|m| v.eq_ignore_ascii_case(m)))
}

fn text_value(rec: &StringRecord, index: usize) -> Option<String> {
    cell(rec, index).map(str::to_string)
}

fn parse_int(rec: &StringRecord, index: usize, column: &'static str, row: usize) -> Result<i64> {
    let value = rec.get(index).map(str::trim).unwrap_or_default();
    // ids are sometimes exported as floats ("42.0")
    let digits = value.strip_suffix(".0").unwrap_or(value);
    digits.parse().map_err(|source| TrajError::IntParse {
        row,
        column,
        value: value.to_string(),
        source,
    })
}

fn parse_float(
    rec: &StringRecord,
    index: usize,
    column: &'static str,
    row: usize,
) -> Result<Option<f64>> {
    cell(rec, index)
        .map(|value| {
            value.parse().map_err(|source| TrajError::FloatParse {
                row,
                column,
                value: value.to_string(),
                source,
            })
        })
        .transpose()
}
