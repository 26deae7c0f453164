use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use trajectory::render::default_output_path;
use trajectory::{
    Config, MultiPlot, PlaySelection, SinglePlot, get_player_points, get_single_player_points,
    plot_multiple_points, plot_single_trajectory, read_tracking,
};

#[derive(Parser)]
#[command(author, version, about = "Draw player trajectories of a play on a football field", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config", default_value = "config/default.toml")]
    config: PathBuf,

    /// Tracking CSV file or directory (overrides the config)
    #[arg(short = 'd', long = "data")]
    data_path: Option<PathBuf>,

    /// Game id (defaults to the first play in the data)
    #[arg(short = 'g', long = "game", requires = "play")]
    game: Option<i64>,

    /// Play id
    #[arg(short = 'p', long = "play", requires = "game")]
    play: Option<i64>,

    /// Only draw this player's trajectory
    #[arg(short = 'n', long = "player")]
    player: Option<i64>,

    /// Keep passer and route runners only
    #[arg(long = "offense-only")]
    offense_only: bool,

    /// Output PNG path
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// List the plays in the data and exit
    #[arg(long = "list")]
    list: bool,
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();

    let mut config = if args.config.exists() {
        Config::load_from_file(&args.config)?
    } else {
        warn!(
            "Config file not found: {}, using default settings",
            args.config.display()
        );
        Config::default()
    };
    config.apply_env()?;

    let data_path = args.data_path.unwrap_or_else(|| config.data.path.clone());
    let mut table = read_tracking(&data_path)
        .with_context(|| format!("failed to load tracking data from {}", data_path.display()))?;
    info!("loaded {} rows from {}", table.len(), data_path.display());

    if args.offense_only {
        if !table.schema().player_role {
            warn!("no player_role column, --offense-only keeps no rows");
        }
        table = table.offensive_only();
        info!("{} offensive rows", table.len());
    }

    if args.list {
        for play in table.plays() {
            println!("{}\t{}", play.game_id, play.play_id);
        }
        return Ok(());
    }

    let selection = match (args.game, args.play) {
        (Some(game_id), Some(play_id)) => PlaySelection::new(game_id, play_id),
        _ => match table.plays().first() {
            Some(first) => {
                info!("no play selected, using {}", first);
                *first
            }
            None => bail!("no plays found in {}", data_path.display()),
        },
    };

    let output_path = args
        .output
        .unwrap_or_else(|| default_output_path(&config.render.output_dir, selection, args.player));
    let opt = config.render_options();

    match args.player {
        Some(nfl_id) => {
            let points = get_single_player_points(&table, selection, nfl_id);
            if points.is_empty() {
                bail!("player {} has no rows in {}", nfl_id, selection);
            }
            let plot = SinglePlot {
                points: &points,
                game_id: Some(selection.game_id),
                play_id: Some(selection.play_id),
            };
            plot_single_trajectory(&plot, &opt, &output_path)?;
        }
        None => {
            let points = get_player_points(&table, selection);
            if points.is_empty() {
                warn!("no rows for {}, drawing an empty field", selection);
            }
            info!(
                "{}: {} players, ball landing {}",
                selection,
                points.trajectories.len(),
                match points.ball_land {
                    Some(land) => format!("({:.1}, {:.1})", land.x, land.y),
                    None => "unknown".to_string(),
                }
            );
            plot_multiple_points(&MultiPlot::from_play(&points, selection), &opt, &output_path)?;
        }
    }

    println!("{}", output_path.display());
    Ok(())
}
