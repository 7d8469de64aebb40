use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use casino_core::{Casino, RandomSource, SeededSource, ThreadRngSource};
use casino_persistence::FileStore;
use casino_shell::{Command, Config, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr so they never interleave with the game output
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!("Opening demo casino data at {}", config.data_file.display());
    let storage = FileStore::open(&config.data_file)
        .with_context(|| format!("Failed to open {}", config.data_file.display()))?;

    let rng: Box<dyn RandomSource> = match config.seed {
        Some(seed) => {
            info!("Using seeded random source ({})", seed);
            Box::new(SeededSource::new(seed))
        }
        None => Box::new(ThreadRngSource),
    };

    let mut session = Session::new(Casino::with_rng(storage, rng));
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(
        stdout,
        "Demo Casino: play with free credits only. Type `help` for commands."
    )?;
    write!(stdout, "> ")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let reply = match line.parse::<Command>() {
            Ok(command) => session.execute(command),
            Err(e) => casino_shell::Reply {
                text: e.to_string(),
                ..Default::default()
            },
        };

        if reply.bell {
            write!(stdout, "\x07")?;
        }
        if !reply.text.is_empty() {
            writeln!(stdout, "{}", reply.text)?;
        }
        if reply.quit {
            break;
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
    }

    Ok(())
}
