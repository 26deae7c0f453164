pub mod config;
pub mod constants;
pub mod csv_reader;
pub mod error;
pub mod extract;
pub mod render;
pub mod roles;
pub mod tracking;

pub use config::Config;
pub use csv_reader::{
    read_tracking, read_tracking_csv, read_tracking_from_directory, read_tracking_from_reader,
};
pub use error::{Result, TrajError};
pub use extract::{PlayPoints, extract_points, get_player_points, get_single_player_points};
pub use render::{
    MultiPlot, RenderOptions, SinglePlot, plot_multiple_points, plot_single_trajectory,
};
pub use roles::{PlayerRole, is_offensive_player, is_offensive_role};
pub use tracking::{
    LandingPoint, PlaySelection, Point, Schema, TrackingRow, TrackingTable, Trajectory,
};
