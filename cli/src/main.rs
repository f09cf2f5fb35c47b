mod commands;
mod config;

use clap::{Parser, Subcommand};
use config::AppConfig;
use filmroom_core::{FrameRange, JsonFileStore, TeamSide};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "filmroom", version, about = "Sequence mining over tagged game film")]
struct Cli {
    /// Library directory holding per-video metadata documents
    #[arg(long, global = true)]
    library: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate statistics for a video
    Stats {
        video: String,
        #[arg(long)]
        team: Option<TeamSide>,
        #[arg(long)]
        start_frame: Option<i64>,
        #[arg(long)]
        end_frame: Option<i64>,
    },
    /// Derive attack sequences for a team
    Attacks {
        video: String,
        #[arg(long)]
        team: TeamSide,
        /// Keep only sequences that ended in a score
        #[arg(long)]
        scoring_only: bool,
        #[arg(long)]
        approve: bool,
    },
    /// Infer missed score tags from the touch stream
    Scores {
        video: String,
        #[arg(long)]
        team: TeamSide,
        #[arg(long)]
        approve: bool,
    },
    /// Count possessions for a team
    Possessions {
        video: String,
        #[arg(long)]
        team: TeamSide,
    },
    /// Find the touches leading into each turnover
    Turnovers {
        video: String,
        #[arg(long)]
        team: TeamSide,
        /// Touches to keep before each turnover
        #[arg(long, default_value_t = 3)]
        max_preceding: usize,
        #[arg(long)]
        approve: bool,
    },
    /// Mine clear/attack outcomes for both teams
    Plays {
        video: String,
        #[arg(long)]
        approve: bool,
    },
    /// Split the film into games at game_start/game_end tags
    Games {
        video: String,
        #[arg(long)]
        approve: bool,
    },
    /// Find intervals where a player is on the floor
    Players {
        video: String,
        #[arg(long)]
        player: String,
        #[arg(long)]
        approve: bool,
    },
    /// Split a player's playing time into offense/defense
    Split {
        video: String,
        #[arg(long)]
        player: String,
        #[arg(long)]
        team: TeamSide,
        #[arg(long)]
        approve: bool,
    },
    /// Add a single tag by hand
    AddTag {
        video: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        frame: Option<i64>,
        #[arg(long)]
        start_frame: Option<i64>,
        #[arg(long)]
        end_frame: Option<i64>,
    },
    /// Show the active configuration
    Config,
}

fn frame_range(start: Option<i64>, end: Option<i64>) -> Result<Option<FrameRange>, String> {
    match (start, end) {
        (Some(start), Some(end)) => Ok(Some(FrameRange::new(start, end))),
        (None, None) => Ok(None),
        _ => Err("pass both --start-frame and --end-frame, or neither".to_string()),
    }
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let cfg = AppConfig::load();
    let library = cli.library.unwrap_or_else(|| cfg.library_dir());
    let store = JsonFileStore::new(&library);
    let fps = cfg.frame_rate;

    match cli.command {
        Commands::Stats {
            video,
            team,
            start_frame,
            end_frame,
        } => {
            let range = frame_range(start_frame, end_frame)?;
            commands::show_stats(&store, &video, team, range, fps)
        }
        Commands::Attacks {
            video,
            team,
            scoring_only,
            approve,
        } => commands::propose_attacks(&store, &video, team, scoring_only, approve),
        Commands::Scores {
            video,
            team,
            approve,
        } => commands::propose_scores(&store, &video, team, approve),
        Commands::Possessions { video, team } => {
            commands::show_possessions(&store, &video, team)
        }
        Commands::Turnovers {
            video,
            team,
            max_preceding,
            approve,
        } => commands::propose_turnovers(&store, &video, team, max_preceding, approve),
        Commands::Plays { video, approve } => commands::propose_plays(&store, &video, approve),
        Commands::Games { video, approve } => commands::propose_games(&store, &video, approve),
        Commands::Players {
            video,
            player,
            approve,
        } => commands::propose_players(&store, &video, &player, fps, approve),
        Commands::Split {
            video,
            player,
            team,
            approve,
        } => commands::propose_split(&store, &video, &player, team, approve),
        Commands::AddTag {
            video,
            name,
            frame,
            start_frame,
            end_frame,
        } => commands::add_tag(&store, &video, &name, frame, start_frame, end_frame),
        Commands::Config => {
            println!("library directory: {}", library.display());
            println!("frame rate: {fps}");
            Ok(())
        }
    }
}
