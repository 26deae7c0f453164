use crate::tracking::{LandingPoint, PlaySelection, Point, TrackingRow, TrackingTable, Trajectory};

use itertools::Itertools;
use log::debug;

/// Trajectories of every player of one play
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayPoints {
    /// one trajectory per player, ascending `nfl_id`
    pub trajectories: Vec<Trajectory>,
    /// parallel to `trajectories`
    pub labels: Vec<String>,
    pub ball_land: Option<LandingPoint>,
}

impl PlayPoints {
    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }
}

/// Extracts the (x, y) sequence of a player's rows, keeping row order
pub fn extract_points<'a, I>(rows: I) -> Trajectory
where
    I: IntoIterator<Item = &'a TrackingRow>,
{
    rows.into_iter()
        .map(|row| Point { x: row.x, y: row.y })
        .collect()
}

/// Extracts the trajectories of all players in a game/play.
///
/// Rows are ordered by frame, grouped by player in ascending id order.
/// The ball landing point is read from the first row of the play and is only
/// reported when the table has both landing columns and neither value is
/// missing on that row.
pub fn get_player_points(table: &TrackingTable, selection: PlaySelection) -> PlayPoints {
    let mut play_rows: Vec<&TrackingRow> = table.select(selection).collect();
    if play_rows.is_empty() {
        debug!("no rows for {}", selection);
        return PlayPoints::default();
    }
    // stable: rows sharing a frame keep table order
    play_rows.sort_by_key(|row| row.frame_id);

    let schema = table.schema();
    let ball_land = if schema.ball_land {
        play_rows.first().and_then(|row| landing_point(row))
    } else {
        None
    };

    let mut points = PlayPoints {
        ball_land,
        ..Default::default()
    };

    let by_player = play_rows.into_iter().sorted_by_key(|row| row.nfl_id);
    for (nfl_id, group) in &by_player.chunk_by(|row| row.nfl_id) {
        let rows: Vec<&TrackingRow> = group.collect();
        let name = if schema.player_name {
            rows.first().and_then(|row| row.player_name.clone())
        } else {
            None
        };
        points.labels.push(name.unwrap_or_else(|| format!("Player {}", nfl_id)));
        points.trajectories.push(extract_points(rows));
    }

    debug!(
        "{}: {} players, ball landing {:?}",
        selection,
        points.trajectories.len(),
        points.ball_land
    );
    points
}

/// Points of one player in a play, ordered by frame
pub fn get_single_player_points(
    table: &TrackingTable,
    selection: PlaySelection,
    nfl_id: i64,
) -> Trajectory {
    let rows = table
        .select(selection)
        .filter(|row| row.nfl_id == nfl_id)
        .sorted_by_key(|row| row.frame_id);
    extract_points(rows)
}

fn landing_point(row: &TrackingRow) -> Option<LandingPoint> {
    match (row.ball_land_x, row.ball_land_y) {
        (Some(x), Some(y)) if !x.is_nan() && !y.is_nan() => Some(LandingPoint { x, y }),
        _ => None,
    }
}
