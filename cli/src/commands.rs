//! Command implementations: each loads a metadata document, runs one
//! processor, and prints the proposed tags as pretty JSON. Nothing is
//! persisted unless the user passed `--approve`.

use filmroom_core::{
    FrameRange, JsonFileStore, MetadataStore, Tag, TeamSide, VideoMetadata, approve_tags,
    attack_sequences_to_tags, calculate_attack_sequence_tags, calculate_game_aggregate_stats,
    calculate_team_aggregate_stats, calculate_team_attack_durations,
    calculate_team_attack_touches, calculate_team_possessions, calculate_team_touches,
    calculate_total_tags, find_game_sequences, find_play_sequences, find_player_sequences,
    find_team_attack_sequences, find_turnover_sequences, player_sequences_to_tags,
    split_playing_time_tags, turnover_sequences_to_tags,
};

fn load(store: &JsonFileStore, video_id: &str) -> Result<VideoMetadata, String> {
    store.load(video_id).map_err(|e| e.to_string())
}

/// Print proposed tags and optionally persist them.
fn propose(
    store: &JsonFileStore,
    video_id: &str,
    video: &VideoMetadata,
    proposed: Vec<Tag>,
    approve: bool,
) -> Result<(), String> {
    if proposed.is_empty() {
        println!("No sequences found");
        return Ok(());
    }

    let json = serde_json::to_string_pretty(&proposed).map_err(|e| e.to_string())?;
    println!("{json}");

    if approve {
        let total =
            approve_tags(store, video_id, video, &proposed).map_err(|e| e.to_string())?;
        println!("\nApproved {} tags ({} total)", proposed.len(), total);
    } else {
        println!(
            "\n{} proposed tags (re-run with --approve to save)",
            proposed.len()
        );
    }
    Ok(())
}

pub fn show_stats(
    store: &JsonFileStore,
    video_id: &str,
    team: Option<TeamSide>,
    range: Option<FrameRange>,
    fps: f64,
) -> Result<(), String> {
    let video = load(store, video_id)?;

    println!("Total tags: {}", calculate_total_tags(&video, range));

    let game = calculate_game_aggregate_stats(&video, range, fps);
    println!(
        "Score: home {} - {} away over {:.1}s",
        game.home_score, game.away_score, game.duration_in_seconds
    );

    let sides = match team {
        Some(side) => vec![side],
        None => vec![TeamSide::Home, TeamSide::Away],
    };

    for side in sides {
        let agg = calculate_team_aggregate_stats(&video, side, range);
        let touches = calculate_team_attack_touches(&video, side, range);
        let durations = calculate_team_attack_durations(&video, side, fps, range);

        println!("\n[{side}]");
        println!(
            "  touches: {}",
            calculate_team_touches(&video, side, range)
        );
        println!("  possessions: {}", calculate_team_possessions(&video, side));
        println!(
            "  efficiency: {}/{} ({}%)",
            agg.scores, agg.attacks, agg.scoring_percentage
        );
        println!("  clearing turnovers: {}", agg.clearing_turnovers);
        println!(
            "  scoring attacks: {} ({} touches, {:.1} avg, {:.1}s avg)",
            touches.scoring.attack_count,
            touches.scoring.total_touches,
            touches.scoring.average_touches,
            durations.scoring.average_seconds,
        );
        println!(
            "  non-scoring attacks: {} ({} touches, {:.1} avg, {:.1}s avg)",
            touches.non_scoring.attack_count,
            touches.non_scoring.total_touches,
            touches.non_scoring.average_touches,
            durations.non_scoring.average_seconds,
        );
    }
    Ok(())
}

pub fn propose_attacks(
    store: &JsonFileStore,
    video_id: &str,
    team: TeamSide,
    scoring_only: bool,
    approve: bool,
) -> Result<(), String> {
    let video = load(store, video_id)?;
    let mut sequences = find_team_attack_sequences(&video, team);
    if scoring_only {
        sequences.retain(|seq| seq.scored);
    }
    let tags = attack_sequences_to_tags(&sequences, team);
    propose(store, video_id, &video, tags, approve)
}

pub fn propose_scores(
    store: &JsonFileStore,
    video_id: &str,
    team: TeamSide,
    approve: bool,
) -> Result<(), String> {
    let video = load(store, video_id)?;
    let tags = calculate_attack_sequence_tags(&video.tags, team);
    propose(store, video_id, &video, tags, approve)
}

pub fn show_possessions(
    store: &JsonFileStore,
    video_id: &str,
    team: TeamSide,
) -> Result<(), String> {
    let video = load(store, video_id)?;
    println!(
        "{} possessions: {}",
        team,
        calculate_team_possessions(&video, team)
    );
    Ok(())
}

pub fn propose_turnovers(
    store: &JsonFileStore,
    video_id: &str,
    team: TeamSide,
    max_preceding: usize,
    approve: bool,
) -> Result<(), String> {
    let video = load(store, video_id)?;
    let sequences = find_turnover_sequences(&video.tags, team, max_preceding);
    let tags = turnover_sequences_to_tags(&sequences, &format!("{team}_turnover"));
    propose(store, video_id, &video, tags, approve)
}

pub fn propose_plays(store: &JsonFileStore, video_id: &str, approve: bool) -> Result<(), String> {
    let video = load(store, video_id)?;
    let tags: Vec<Tag> = find_play_sequences(&video.tags)
        .iter()
        .map(|seq| seq.to_tag())
        .collect();
    propose(store, video_id, &video, tags, approve)
}

pub fn propose_games(store: &JsonFileStore, video_id: &str, approve: bool) -> Result<(), String> {
    let video = load(store, video_id)?;
    let tags: Vec<Tag> = find_game_sequences(&video.tags)
        .into_iter()
        .map(|game| game.into_tag())
        .collect();
    propose(store, video_id, &video, tags, approve)
}

pub fn propose_players(
    store: &JsonFileStore,
    video_id: &str,
    player: &str,
    fps: f64,
    approve: bool,
) -> Result<(), String> {
    let video = load(store, video_id)?;
    let sequences = find_player_sequences(&video, player);
    let tags = player_sequences_to_tags(&sequences, fps);
    propose(store, video_id, &video, tags, approve)
}

pub fn propose_split(
    store: &JsonFileStore,
    video_id: &str,
    player: &str,
    team: TeamSide,
    approve: bool,
) -> Result<(), String> {
    let video = load(store, video_id)?;
    let tags = split_playing_time_tags(&video.tags, player, team);
    propose(store, video_id, &video, tags, approve)
}

pub fn add_tag(
    store: &JsonFileStore,
    video_id: &str,
    name: &str,
    frame: Option<i64>,
    start_frame: Option<i64>,
    end_frame: Option<i64>,
) -> Result<(), String> {
    let tag = match (frame, start_frame, end_frame) {
        (Some(frame), None, None) => Tag::point(name, frame),
        (None, Some(start), Some(end)) => Tag::interval(name, start, end),
        _ => {
            return Err(
                "pass either --frame or both --start-frame and --end-frame".to_string(),
            );
        }
    };

    let video = load(store, video_id)?;
    filmroom_core::add_tag(store, video_id, &video, tag).map_err(|e| e.to_string())?;
    println!("Tag added");
    Ok(())
}
