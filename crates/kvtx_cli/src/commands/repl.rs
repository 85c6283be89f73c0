//! Interactive line-oriented command loop.
//!
//! Accepted commands (case-insensitive):
//!
//! ```text
//! GET <key>             -> value, or NULL
//! PUT <key> <value>     -> OK            (alias: SET)
//! BEGIN                 -> OK
//! COMMIT                -> OK
//! ROLLBACK              -> OK            (alias: ABORT)
//! STATE                 -> idle | in-transaction txn:<n> pending=<n>
//! STATS                 -> counters on one line
//! KEYS                  -> "<key> <value>" per committed key, then END
//! HELP                  -> usage
//! EXIT                  -> terminate     (alias: QUIT)
//! ```
//!
//! Rejected store calls and malformed lines print `ERR <message>` and the
//! loop carries on.

use crate::error::CliError;
use kvtx_core::{TransactionalStore, Value};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

const USAGE: &str =
    "usage: GET <key> | PUT <key> <value> | BEGIN | COMMIT | ROLLBACK | STATE | STATS | KEYS | HELP | EXIT";

/// A parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read a committed value.
    Get(String),
    /// Buffer a write.
    Put(String, Value),
    /// Start a transaction.
    Begin,
    /// Commit the active transaction.
    Commit,
    /// Roll back the active transaction.
    Rollback,
    /// Show the machine state.
    State,
    /// Show counters.
    Stats,
    /// List committed data.
    Keys,
    /// Show usage.
    Help,
    /// Leave the loop.
    Exit,
    /// Blank line.
    Empty,
}

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Stop reading.
    Exit,
}

/// Parses one input line.
pub fn parse_line(line: &str) -> Result<Command, CliError> {
    let mut segments = line.split_whitespace();
    let Some(cmd) = segments.next() else {
        return Ok(Command::Empty);
    };
    let args: Vec<&str> = segments.collect();
    let cmd = cmd.to_uppercase();

    let command = match (cmd.as_str(), args.as_slice()) {
        ("GET", [key]) => Command::Get((*key).to_string()),
        ("GET", _) => return Err(CliError::usage("GET requires exactly one key")),
        ("PUT" | "SET", [key, value]) => {
            let value = value.parse::<Value>().map_err(|_| CliError::InvalidValue {
                value: (*value).to_string(),
            })?;
            Command::Put((*key).to_string(), value)
        }
        ("PUT" | "SET", _) => return Err(CliError::usage("PUT requires a key and a value")),
        ("BEGIN", []) => Command::Begin,
        ("COMMIT", []) => Command::Commit,
        ("ROLLBACK" | "ABORT", []) => Command::Rollback,
        ("STATE", []) => Command::State,
        ("STATS", []) => Command::Stats,
        ("KEYS", []) => Command::Keys,
        ("HELP", []) => Command::Help,
        ("EXIT" | "QUIT", []) => Command::Exit,
        (
            "BEGIN" | "COMMIT" | "ROLLBACK" | "ABORT" | "STATE" | "STATS" | "KEYS" | "HELP"
            | "EXIT" | "QUIT",
            _,
        ) => return Err(CliError::usage(format!("{cmd} does not take arguments"))),
        _ => return Err(CliError::usage(format!("unknown command '{cmd}'"))),
    };
    Ok(command)
}

/// Executes one command, writing its reply to `out`.
pub fn execute<W: Write>(
    store: &mut TransactionalStore,
    command: &Command,
    out: &mut W,
) -> Result<Flow, CliError> {
    match command {
        Command::Get(key) => match store.get(key) {
            Some(value) => writeln!(out, "{value}")?,
            None => writeln!(out, "NULL")?,
        },
        Command::Put(key, value) => {
            store.put(key.as_str(), *value)?;
            writeln!(out, "OK")?;
        }
        Command::Begin => {
            store.begin_transaction()?;
            writeln!(out, "OK")?;
        }
        Command::Commit => {
            store.commit()?;
            writeln!(out, "OK")?;
        }
        Command::Rollback => {
            store.rollback()?;
            writeln!(out, "OK")?;
        }
        Command::State => match store.current_transaction() {
            Some(txid) => writeln!(
                out,
                "{} {} pending={}",
                store.state(),
                txid,
                store.pending_len()
            )?,
            None => writeln!(out, "{}", store.state())?,
        },
        Command::Stats => {
            let stats = store.stats();
            writeln!(
                out,
                "writes={} started={} committed={} rolled_back={} keys_committed={}",
                stats.writes(),
                stats.transactions_started(),
                stats.transactions_committed(),
                stats.transactions_rolled_back(),
                stats.keys_committed()
            )?;
        }
        Command::Keys => {
            for (key, value) in store.snapshot() {
                writeln!(out, "{key} {value}")?;
            }
            writeln!(out, "END")?;
        }
        Command::Help => writeln!(out, "{USAGE}")?,
        Command::Exit => return Ok(Flow::Exit),
        Command::Empty => {}
    }
    Ok(Flow::Continue)
}

/// Drives `store` from `input` until EOF or `EXIT`.
pub fn run_session<R: BufRead, W: Write>(
    store: &mut TransactionalStore,
    input: R,
    out: &mut W,
) -> Result<(), CliError> {
    for line in input.lines() {
        let line = line?;
        let result = parse_line(&line).and_then(|command| execute(store, &command, out));

        match result {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(CliError::Io(err)) => return Err(err.into()),
            Err(err) => {
                debug!(line = %line, error = %err, "command rejected");
                writeln!(out, "ERR {err}")?;
            }
        }
        out.flush()?;
    }
    Ok(())
}

/// Runs the repl command on stdin/stdout.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting REPL");

    let mut store = TransactionalStore::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_session(&mut store, stdin.lock(), &mut out)?;

    info!(
        committed = store.len(),
        in_transaction = store.in_transaction(),
        "REPL finished"
    );
    Ok(())
}
