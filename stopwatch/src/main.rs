use std::error::Error;

use stopwatch::{display_seconds, Control, ElapsedTimeTracker, SecondsDisplay, TrackerConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

type AnyError = Box<dyn Error + Send + Sync + 'static>;

fn init_logger() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| eprintln!("Error initializing the global logger: {err}"))
        .ok();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AnyError> {
    init_logger();

    let tracker = ElapsedTimeTracker::new(TrackerConfig::default())?;
    let mut elapsed = tracker.subscribe();
    let mut shown = display_seconds(tracker.read());
    println!("{}", SecondsDisplay(shown));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let word = line.trim();
                if word.is_empty() {
                    continue;
                }
                if word.eq_ignore_ascii_case("quit") {
                    break;
                }
                match word.parse::<Control>() {
                    Ok(control) => tracker.apply(control),
                    Err(e) => eprintln!("{e}"),
                }
            }
            changed = elapsed.changed() => {
                if changed.is_err() {
                    break;
                }
                let secs = display_seconds(*elapsed.borrow_and_update());
                if secs != shown {
                    shown = secs;
                    println!("{}", SecondsDisplay(shown));
                }
            }
        }
    }

    info!(elapsed_ms = tracker.read(), "exiting");
    Ok(())
}
