use chrono::Utc;
use clap::{Parser, Subcommand};
use mindful_core::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "mindful")]
#[command(about = "Meditation and journaling habit tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Operate as this user (shared store with ownership checks)
    #[arg(long, global = true)]
    user: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a guided meditation countdown
    Meditate {
        /// Override configured duration (minutes: 2, 5, 7, 10 or 15)
        #[arg(long)]
        minutes: Option<u32>,

        /// Skip the one-second waits (for testing)
        #[arg(long)]
        fast: bool,
    },

    /// Run a 10-page journaling session with breaks
    Journal {
        /// Override per-page writing time (seconds: 60, 120, 300, 420 or 600)
        #[arg(long)]
        page_seconds: Option<u32>,

        /// Override break time between pages (seconds: 5, 10 or 15)
        #[arg(long)]
        break_seconds: Option<u32>,

        /// Skip the one-second waits (for testing)
        #[arg(long)]
        fast: bool,
    },

    /// Show session history, newest first
    History {
        /// Show at most this many sessions
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show per-day statistics
    Stats {
        /// Show at most this many days
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the current consecutive-day streak
    Streak,

    /// Delete a session by id
    Delete {
        id: Uuid,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Export the session history to CSV
    Export {
        /// Output path (defaults to sessions.csv in the data directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the active settings
    Show,

    /// Change settings and save
    Set {
        #[arg(long)]
        meditation_minutes: Option<u32>,

        #[arg(long)]
        page_seconds: Option<u32>,

        #[arg(long)]
        break_seconds: Option<u32>,

        /// UI language (en or ja)
        #[arg(long)]
        language: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    mindful_core::logging::init();

    let Cli {
        command,
        data_dir,
        user,
    } = Cli::parse();

    let config = Config::load()?;
    let data_dir = data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let sessions_path = data_dir.join("sessions.jsonl");

    match command {
        Commands::Meditate { minutes, fast } => cmd_meditate(
            open_aggregator(&sessions_path, user),
            &config,
            minutes,
            fast,
        ),
        Commands::Journal {
            page_seconds,
            break_seconds,
            fast,
        } => cmd_journal(
            open_aggregator(&sessions_path, user),
            &config,
            page_seconds,
            break_seconds,
            fast,
        ),
        Commands::History { limit } => {
            cmd_history(&open_aggregator(&sessions_path, user), &config, limit)
        }
        Commands::Stats { limit } => {
            cmd_stats(&open_aggregator(&sessions_path, user), &config, limit)
        }
        Commands::Streak => cmd_streak(&open_aggregator(&sessions_path, user), &config),
        Commands::Delete { id, yes } => {
            cmd_delete(open_aggregator(&sessions_path, user), &config, id, yes)
        }
        Commands::Settings { action } => match action {
            SettingsAction::Show => cmd_settings_show(&config, &data_dir),
            SettingsAction::Set {
                meditation_minutes,
                page_seconds,
                break_seconds,
                language,
            } => cmd_settings_set(
                config,
                meditation_minutes,
                page_seconds,
                break_seconds,
                language,
            ),
        },
        Commands::Export { output } => cmd_export(
            &open_aggregator(&sessions_path, user),
            &data_dir,
            output,
        ),
    }
}

/// Open the session store, scoped to a user when one was given
fn open_aggregator(path: &Path, user: Option<String>) -> Aggregator<Box<dyn SessionStore>> {
    let store = JsonlStore::new(path);
    let boxed: Box<dyn SessionStore> = match user {
        Some(user) => Box::new(ScopedStore::new(store, user)),
        None => Box::new(store),
    };
    Aggregator::new(boxed)
}

fn cmd_meditate(
    mut aggregator: Aggregator<Box<dyn SessionStore>>,
    config: &Config,
    minutes: Option<u32>,
    fast: bool,
) -> Result<()> {
    let lang = config.ui.language;
    let minutes = validated_choice(
        minutes.unwrap_or(config.timer.meditation_minutes),
        &config::MEDITATION_MINUTES_CHOICES,
        "--minutes",
    )?;

    println!();
    println!("  {} ({} min)", tr(lang, "meditation.heading"), minutes);
    println!();

    let mut timer = MeditationTimer::new(minutes);
    let cues = TerminalCues;
    timer.start()?;

    loop {
        if !fast {
            thread::sleep(Duration::from_secs(1));
        }
        match timer.tick(&cues) {
            MeditationTick::Running { remaining_seconds } => {
                if !fast {
                    print!("\r  {}  ", format_clock(remaining_seconds));
                    let _ = io::stdout().flush();
                }
            }
            MeditationTick::Finished(draft) => {
                let session = aggregator.record(draft, Utc::now())?;
                println!("\n✓ {} ({})", tr(lang, "session.logged"), session.id);
                break;
            }
            MeditationTick::Idle | MeditationTick::Paused { .. } => break,
        }
    }

    Ok(())
}

fn cmd_journal(
    mut aggregator: Aggregator<Box<dyn SessionStore>>,
    config: &Config,
    page_seconds: Option<u32>,
    break_seconds: Option<u32>,
    fast: bool,
) -> Result<()> {
    let lang = config.ui.language;
    let page_seconds = validated_choice(
        page_seconds.unwrap_or(config.timer.journaling_page_seconds),
        &config::JOURNALING_PAGE_SECONDS_CHOICES,
        "--page-seconds",
    )?;
    let break_seconds = validated_choice(
        break_seconds.unwrap_or(config.timer.journaling_break_seconds),
        &config::JOURNALING_BREAK_SECONDS_CHOICES,
        "--break-seconds",
    )?;

    println!();
    println!("  {}", tr(lang, "journaling.heading"));
    println!();

    let mut timer = JournalingTimer::new(page_seconds, break_seconds);
    let cues = TerminalCues;
    timer.start()?;
    print_phase(lang, JournalPhase::Writing, 1);

    let mut current = (JournalPhase::Writing, 1u32);
    loop {
        if !fast {
            thread::sleep(Duration::from_secs(1));
        }
        match timer.tick(&cues) {
            JournalingTick::Active {
                phase,
                page,
                remaining_seconds,
            } => {
                if (phase, page) != current {
                    current = (phase, page);
                    if !fast {
                        println!();
                    }
                    print_phase(lang, phase, page);
                }
                if !fast {
                    print!("\r  {}  ", format_clock(remaining_seconds));
                    let _ = io::stdout().flush();
                }
            }
            JournalingTick::Finished(draft) => {
                let session = aggregator.record(draft, Utc::now())?;
                println!("\n✓ {} ({})", tr(lang, "session.logged"), session.id);
                break;
            }
            JournalingTick::Idle => break,
        }
    }

    Ok(())
}

fn print_phase(lang: Language, phase: JournalPhase, page: u32) {
    match phase {
        JournalPhase::Writing => {
            let label = tr(lang, "journaling.phase.page")
                .replace("{page}", &page.to_string())
                .replace("{total}", &PAGE_COUNT.to_string());
            println!("  {}", label);
        }
        JournalPhase::Break => println!("  {}", tr(lang, "journaling.phase.break")),
    }
}

fn cmd_history(
    aggregator: &Aggregator<Box<dyn SessionStore>>,
    config: &Config,
    limit: Option<usize>,
) -> Result<()> {
    let lang = config.ui.language;
    let sessions = aggregator.sessions(limit)?;

    println!();
    println!("  {}", tr(lang, "history.heading"));
    println!("  ─────────────────────────────────────────");

    if sessions.is_empty() {
        println!("  {}", tr(lang, "history.empty"));
        return Ok(());
    }

    for session in sessions {
        let type_label = match session.session_type {
            SessionType::Meditation => tr(lang, "history.type.meditation"),
            SessionType::Journaling => tr(lang, "history.type.journaling"),
        };
        println!(
            "  {}  {:<12} {:>8}  {}",
            session.completed_at.format("%Y-%m-%d %H:%M"),
            type_label,
            format_duration(session.duration_seconds),
            session.id
        );
    }

    Ok(())
}

fn cmd_stats(
    aggregator: &Aggregator<Box<dyn SessionStore>>,
    config: &Config,
    limit: Option<usize>,
) -> Result<()> {
    let lang = config.ui.language;
    let daily = aggregator.daily_stats(limit)?;

    println!();
    println!("  {}", tr(lang, "stats.heading"));
    println!("  ─────────────────────────────────────────");

    if daily.is_empty() {
        println!("  {}", tr(lang, "history.empty"));
        return Ok(());
    }

    for day in daily {
        println!(
            "  {}  {} {:>2}   {} {:>2}   {:>8}",
            day.date,
            tr(lang, "history.type.meditation"),
            day.meditation_count,
            tr(lang, "history.type.journaling"),
            day.journaling_count,
            format_duration(day.total_duration_seconds)
        );
    }

    Ok(())
}

fn cmd_streak(aggregator: &Aggregator<Box<dyn SessionStore>>, config: &Config) -> Result<()> {
    let streak = aggregator.streak(Utc::now().date_naive())?;
    println!(
        "{}: {}",
        tr(config.ui.language, "history.stat.streak"),
        streak
    );
    Ok(())
}

fn cmd_delete(
    mut aggregator: Aggregator<Box<dyn SessionStore>>,
    config: &Config,
    id: Uuid,
    yes: bool,
) -> Result<()> {
    let lang = config.ui.language;

    if !yes && !confirm(tr(lang, "history.confirm.delete"))? {
        println!("Cancelled");
        return Ok(());
    }

    match aggregator.delete(id)? {
        Some(session) => println!("✓ Deleted session {}", session.id),
        None => println!("No session with id {}", id),
    }

    Ok(())
}

fn cmd_settings_show(config: &Config, data_dir: &Path) -> Result<()> {
    println!("meditation_minutes = {}", config.timer.meditation_minutes);
    println!(
        "journaling_page_seconds = {}",
        config.timer.journaling_page_seconds
    );
    println!(
        "journaling_break_seconds = {}",
        config.timer.journaling_break_seconds
    );
    println!("language = {}", config.ui.language.tag());
    println!("data_dir = {}", data_dir.display());
    Ok(())
}

fn cmd_settings_set(
    mut config: Config,
    meditation_minutes: Option<u32>,
    page_seconds: Option<u32>,
    break_seconds: Option<u32>,
    language: Option<String>,
) -> Result<()> {
    if let Some(v) = meditation_minutes {
        config.timer.meditation_minutes = v;
    }
    if let Some(v) = page_seconds {
        config.timer.journaling_page_seconds = v;
    }
    if let Some(v) = break_seconds {
        config.timer.journaling_break_seconds = v;
    }
    if let Some(ref tag) = language {
        config.ui.language = Language::parse(tag)
            .ok_or_else(|| Error::Config(format!("unknown language: {}", tag)))?;
    }

    // save() re-validates the duration sets
    config.save()?;
    println!("✓ {}", tr(config.ui.language, "settings.saved"));
    Ok(())
}

fn cmd_export(
    aggregator: &Aggregator<Box<dyn SessionStore>>,
    data_dir: &Path,
    output: Option<PathBuf>,
) -> Result<()> {
    let output = output.unwrap_or_else(|| data_dir.join("sessions.csv"));
    let sessions = aggregator.sessions(None)?;
    let count = export_sessions(&sessions, &output)?;
    println!("✓ Exported {} sessions to {}", count, output.display());
    Ok(())
}

fn validated_choice(value: u32, choices: &[u32], name: &str) -> Result<u32> {
    if choices.contains(&value) {
        Ok(value)
    } else {
        Err(Error::Config(format!(
            "{} must be one of {:?}, got {}",
            name, choices, value
        )))
    }
}

fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn format_duration(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    if mins == 0 {
        format!("{}s", secs)
    } else if secs == 0 {
        format!("{}m", mins)
    } else {
        format!("{}m {}s", mins, secs)
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(matches!(
        input.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}
