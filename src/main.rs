//! Headless simulator runner (default binary).
//!
//! Reads one command per stdin line and prints one JSON reply per line.
//! Configuration comes from `PUYO_*` environment variables.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use puyo_sim::config::SimConfig;
use puyo_sim::core::Session;
use puyo_sim::event_log::EventLog;
use puyo_sim::runner::{Record, Runner};
use puyo_sim::script::{parse_command, Command};

fn main() -> Result<()> {
    let config = SimConfig::from_env();

    let mut session = Session::with_repeat(config.seed, config.repeat);
    session.start().context("failed to generate the next queue")?;
    if let Some(field) = &config.field {
        session.load_field(field).context("invalid PUYO_FIELD")?;
    }

    let mut log = match &config.log_path {
        Some(path) => Some(EventLog::open(path)?),
        None => None,
    };

    eprintln!(
        "[Sim] seed={} repeat={} log={}",
        config.seed,
        config.repeat,
        config.log_path.as_deref().unwrap_or("off")
    );

    let mut runner = Runner::new(session);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut seq: u64 = 0;

    for line in stdin.lock().lines() {
        let line = line?;
        let cmd = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("[Sim] {e}");
                continue;
            }
        };

        let explicit = cmd == Command::State;
        let Some(reply) = runner.execute(cmd) else {
            break;
        };
        seq += 1;

        let record = Record {
            seq,
            command: line.trim(),
            reply: &reply,
        };
        let log_failed = match log.as_mut().map(|w| w.write(&record)) {
            Some(Err(e)) => {
                eprintln!("[Sim] event log disabled: {e}");
                true
            }
            _ => false,
        };
        if log_failed {
            log = None;
        }

        if config.quiet && !explicit && !reply.is_notable() {
            continue;
        }
        serde_json::to_writer(&mut out, &reply)?;
        out.write_all(b"\n")?;
        out.flush()?;
    }

    if let Some(w) = log.as_mut() {
        w.flush()?;
    }
    eprintln!(
        "[Sim] finished after {} commands, score={}",
        seq,
        runner.session().score()
    );
    Ok(())
}
