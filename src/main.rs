//! Lights Out CLI
//!
//! Usage:
//!   lightsout                               # Play in the terminal
//!   lightsout --leaderboard --limit 10      # Fastest scores
//!   lightsout --all-scores                  # Every score
//!   lightsout --best "Name"                 # A player's best
//!   lightsout --serve                       # Reference leaderboard server
//!   lightsout --json                        # JSON engine output while playing
//!   lightsout --verbose --no-color          # Status line on every state change

use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use lightsout::core::{
    build_submission, format_leaderboard_time, format_reaction, jump_start_message,
    normalize_linkedin_url, rank_marker, reaction_message, run_server, LeaderboardClient, PrefsStore, ReflexEngine, Signer,
};
use lightsout::types::{DeviceType, EngineEvent, EngineOutput, GameState, LeaderboardEntry, PlayerPrefs};
use lightsout::{DEFAULT_API_URL, DEFAULT_LEADERBOARD_LIMIT, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "lightsout",
    version = VERSION,
    about = "Lights Out - five-light reflex test with a shared leaderboard",
    long_about = "Five lights come on one per second, then go out after a random pause.\n\
                  Press Enter the moment they go out. Pressing early is a jump start.\n\n\
                  Modes:\n  \
                  --play         Play in the terminal (default)\n  \
                  --leaderboard  Show the fastest scores\n  \
                  --all-scores   Show every score\n  \
                  --best NAME    Show a player's best\n  \
                  --serve        Run the reference leaderboard server"
)]
struct Args {
    /// Play in the terminal
    #[arg(short, long)]
    play: bool,

    /// Show the fastest scores
    #[arg(short, long)]
    leaderboard: bool,

    /// Rows to fetch with --leaderboard
    #[arg(long, default_value_t = DEFAULT_LEADERBOARD_LIMIT)]
    limit: usize,

    /// Show every score
    #[arg(long)]
    all_scores: bool,

    /// Show a player's best score
    #[arg(long, value_name = "PLAYER")]
    best: Option<String>,

    /// Run the reference leaderboard server
    #[arg(short, long)]
    serve: bool,

    /// Server address for --serve
    #[arg(long, default_value = "127.0.0.1:3001")]
    addr: String,

    /// Leaderboard service base URL
    #[arg(long, env = "LIGHTSOUT_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Shared secret for the submission signature header
    #[arg(long, env = "LIGHTSOUT_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Device type reported with scores (mobile or web)
    #[arg(long, default_value = "web")]
    device: DeviceType,

    /// Derive the device type from a viewport width in pixels (overrides --device)
    #[arg(long, value_name = "PX")]
    viewport_width: Option<u32>,

    /// Preferences file (default: platform config dir)
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Output engine steps as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Print a status line for every engine step
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    init_tracing();
    let args = Args::parse();

    if args.serve {
        run_serve(&args).await;
    } else if args.leaderboard {
        run_leaderboard(&args).await;
    } else if args.all_scores {
        run_all_scores(&args).await;
    } else if let Some(ref player) = args.best {
        run_best(player, &args).await;
    } else {
        run_play(&args).await;
    }
}

/// Logs go to stderr so the board stays readable; `RUST_LOG` overrides the level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_client(args: &Args) -> Option<LeaderboardClient> {
    match LeaderboardClient::new(&args.api_url) {
        Ok(client) => Some(match &args.secret_key {
            Some(secret) if !secret.is_empty() => client.with_signer(Signer::new(secret)),
            _ => client,
        }),
        Err(e) => {
            print_error(&e.to_string(), args.no_color);
            None
        }
    }
}

fn prefs_store(args: &Args) -> Option<PrefsStore> {
    match &args.prefs {
        Some(path) => Some(PrefsStore::at(path)),
        None => match PrefsStore::default_location() {
            Ok(store) => Some(store),
            Err(e) => {
                warn!("Preferences disabled: {}", e);
                None
            }
        },
    }
}

// =============================================================================
// PLAY
// =============================================================================

/// One terminal play session
struct PlaySession {
    engine: ReflexEngine,
    client: Option<LeaderboardClient>,
    prefs_store: Option<PrefsStore>,
    prefs: PlayerPrefs,
    device: DeviceType,
    json: bool,
    no_color: bool,
    verbose: bool,
}

/// Run the interactive game loop
async fn run_play(args: &Args) {
    let prefs_store = prefs_store(args);
    let prefs = prefs_store.as_ref().map(PrefsStore::load).unwrap_or_default();

    let mut session = PlaySession {
        engine: ReflexEngine::new(),
        client: build_client(args),
        prefs_store,
        prefs,
        device: args
            .viewport_width
            .map(DeviceType::from_viewport_width)
            .unwrap_or(args.device),
        json: args.json,
        no_color: args.no_color,
        verbose: args.verbose,
    };

    print_header(args.no_color);
    println!("Press Enter to start. Five lights come on, then go out.");
    println!("Press Enter again the moment they go out.");
    println!("Commands: start | save [name] | link URL | top | status | quit");
    if let Some(client) = &session.client {
        println!("Leaderboard: {}", client.base_url());
    }
    if let Some(name) = &session.prefs.player_name {
        println!("Welcome back, {}!", name);
    }
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let deadline = session
            .engine
            .next_deadline()
            .map(|d| tokio::time::Instant::from_std(session.engine.clock().instant_at(d)));

        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) | Err(_) => break,
                };
                if !session.handle_line(line.trim()).await {
                    break;
                }
            }
            _ = sleep_until_some(deadline) => {
                let output = session.engine.poll();
                session.render(&output);
            }
        }
    }

    println!("\nSession ended. Rounds: {}", session.engine.round());
}

/// Sleep until the deadline, or forever when there is none
async fn sleep_until_some(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}

impl PlaySession {
    /// Handle one input line; false ends the session
    async fn handle_line(&mut self, line: &str) -> bool {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_ascii_lowercase().as_str() {
            "" => {
                let output = self.engine.press();
                self.render(&output);
            }
            "start" | "s" => {
                let output = self.engine.start_round();
                self.render(&output);
            }
            "save" => self.save(rest).await,
            "link" => match normalize_linkedin_url(Some(rest)) {
                Ok(url) => {
                    println!("LinkedIn URL {}", if url.is_some() { "set" } else { "cleared" });
                    self.prefs.linkedin_url = url;
                }
                Err(e) => print_error(&e.to_string(), self.no_color),
            },
            "top" | "board" => {
                if let Some(client) = &self.client {
                    match client.top_scores(DEFAULT_LEADERBOARD_LIMIT).await {
                        Ok(entries) => print_leaderboard("Top 10 Reactions 🏆", &entries, self.no_color),
                        Err(e) => print_error(&e.to_string(), self.no_color),
                    }
                }
            }
            "status" => {
                let output = self.engine.current_output();
                println!("{}", self.status_line(&output));
            }
            "quit" | "exit" | "q" => return false,
            other => println!("Unknown command '{}'. Commands: start | save [name] | link URL | top | status | quit", other),
        }
        true
    }

    /// Submit the last round. Validation and network errors are reported and
    /// leave the round untouched.
    async fn save(&mut self, name_arg: &str) {
        if self.engine.state().is_live() {
            print_error("Finish the round before saving", self.no_color);
            return;
        }
        if self.engine.state() != GameState::Finished {
            print_error("Play a round before saving", self.no_color);
            return;
        }

        let name = if name_arg.is_empty() {
            self.prefs.player_name.clone().unwrap_or_default()
        } else {
            name_arg.to_string()
        };

        let score = match build_submission(
            &name,
            self.prefs.linkedin_url.as_deref(),
            self.device,
            self.engine.measurement(),
        ) {
            Ok(score) => score,
            Err(e) => {
                print_error(&e.to_string(), self.no_color);
                return;
            }
        };

        let Some(client) = &self.client else {
            print_error("No leaderboard configured", self.no_color);
            return;
        };

        match client.submit_score(&score).await {
            Ok(_) => {
                let linkedin_url = score.linkedin_url.as_deref();
                let saved = self.prefs_store.as_ref().and_then(|store| {
                    store
                        .remember(&score.player_name, linkedin_url)
                        .map_err(|e| warn!("Failed to save preferences: {}", e))
                        .ok()
                });
                match saved {
                    Some(prefs) => self.prefs = prefs,
                    None => self.prefs.remember(&score.player_name, linkedin_url),
                }
                print_success("Score saved successfully! 🎉", self.no_color);
            }
            Err(e) => print_error(&e.to_string(), self.no_color),
        }
    }

    /// Render one engine step
    fn render(&mut self, output: &EngineOutput) {
        if self.json {
            println!("{}", serde_json::to_string(output).unwrap_or_default());
            return;
        }
        if self.verbose && output.changed_state() {
            println!("{}", self.status_line(output));
        }

        for event in &output.events {
            match event {
                EngineEvent::LightOn { .. } => {
                    println!("  {}", self.engine.board().render(self.no_color));
                }
                EngineEvent::LightsOut => {
                    println!("  {}", self.engine.board().render(self.no_color));
                    println!("  LIGHTS OUT! GO!");
                }
                EngineEvent::StateChanged { to: GameState::Ready, .. } => {
                    println!("Round {} - get ready...", output.round);
                }
                EngineEvent::StateChanged { to: GameState::Finished, .. } => {
                    self.print_result(output);
                }
                _ => {}
            }
        }
    }

    fn status_line(&self, output: &EngineOutput) -> String {
        if self.no_color {
            output.to_parseable_string()
        } else {
            output.to_terminal_string()
        }
    }

    fn print_result(&mut self, output: &EngineOutput) {
        let (color, reset) = if self.no_color { ("", "") } else { ("\x1b[1m", "\x1b[0m") };
        if output.jump_start {
            let message = jump_start_message(self.engine.rng_mut());
            println!("{}{}{}", if self.no_color { "" } else { "\x1b[31m" }, message, reset);
        } else if let Some(ms) = output.reaction_ms {
            println!("{}{} ⚡{}", color, format_reaction(ms), reset);
            println!("{}", reaction_message(ms));
            println!("Type 'save [name]' to submit, or 'start' for another round.");
        }
    }
}

// =============================================================================
// LEADERBOARD
// =============================================================================

async fn run_leaderboard(args: &Args) {
    let Some(client) = build_client(args) else { return };
    match client.top_scores(args.limit).await {
        Ok(entries) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&entries).unwrap_or_default());
            } else {
                print_leaderboard(&format!("Top {} Reactions 🏆", args.limit), &entries, args.no_color);
            }
        }
        Err(e) => print_error(&e.to_string(), args.no_color),
    }
}

async fn run_all_scores(args: &Args) {
    let Some(client) = build_client(args) else { return };
    match client.all_scores().await {
        Ok(entries) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&entries).unwrap_or_default());
            } else {
                print_leaderboard("All Scores", &entries, args.no_color);
            }
        }
        Err(e) => print_error(&e.to_string(), args.no_color),
    }
}

async fn run_best(player: &str, args: &Args) {
    let Some(client) = build_client(args) else { return };
    match client.player_best(player).await {
        Ok(Some(entry)) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&entry).unwrap_or_default());
            } else {
                println!("{}: {}", entry.player_name, format_reaction(entry.reaction_time));
            }
        }
        Ok(None) => println!("No scores yet for {}", player),
        Err(e) => print_error(&e.to_string(), args.no_color),
    }
}

/// Run the reference leaderboard server
async fn run_serve(args: &Args) {
    let signer = args
        .secret_key
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(Signer::new);

    if let Err(e) = run_server(&args.addr, signer).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

// =============================================================================
// PRINTING
// =============================================================================

fn print_header(no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  Lights Out v{}", VERSION);
        println!("========================================");
    } else {
        println!("\x1b[1m========================================\x1b[0m");
        println!("\x1b[1m  Lights Out v{} 🏎️\x1b[0m", VERSION);
        println!("\x1b[1m========================================\x1b[0m");
    }
    println!();
}

fn print_leaderboard(title: &str, entries: &[LeaderboardEntry], no_color: bool) {
    let (bold, yellow, reset) = if no_color {
        ("", "", "")
    } else {
        ("\x1b[1m", "\x1b[33m", "\x1b[0m")
    };
    println!("{}{}{}", bold, title, reset);
    if entries.is_empty() {
        println!("No records yet. Be the first! 🚀");
        return;
    }
    for (index, entry) in entries.iter().enumerate() {
        println!(
            "{:>4} {:<20} {}{:>10}{} {}",
            rank_marker(index),
            entry.player_name,
            yellow,
            format_leaderboard_time(entry.reaction_time),
            reset,
            entry.device_type.emoji()
        );
    }
}

fn print_error(message: &str, no_color: bool) {
    if no_color {
        println!("Error: {}", message);
    } else {
        println!("\x1b[31m❌ {}\x1b[0m", message);
    }
}

fn print_success(message: &str, no_color: bool) {
    if no_color {
        println!("{}", message);
    } else {
        println!("\x1b[32m✅ {}\x1b[0m", message);
    }
}
