mod adapter;
mod cli;
mod domain;
mod error;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;

use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use domain::ProbeCommand;
use error::Error;
use ports::inbound::UseCaseRunner;
use ports::outbound::{now_iso8601, LogLevel, LogRecord};
use wiring::{wire_probe, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(&config);
        let command_name = cmd_name_for_log(&cmd);
        let _ = self.app.logger.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Info,
            message: "command started".to_string(),
            layer: Some("cli".to_string()),
            kind: Some("lifecycle".to_string()),
            fields: {
                let mut m = std::collections::BTreeMap::new();
                m.insert("command".to_string(), serde_json::json!(command_name));
                Some(m)
            },
        });

        let result = match cmd {
            ProbeCommand::Help => {
                print_help();
                Ok(0)
            }
            ProbeCommand::Probe => {
                // Outcome は常にちょうど 1 つ。stdout はこの 1 行のみ。
                let outcome = self.app.probe.probe();
                println!("{}", outcome.stdout_line());
                Ok(outcome.exit_code())
            }
        };

        let code = result.as_ref().copied().unwrap_or(0);
        let _ = self.app.logger.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Info,
            message: "command finished".to_string(),
            layer: Some("cli".to_string()),
            kind: Some("lifecycle".to_string()),
            fields: {
                let mut m = std::collections::BTreeMap::new();
                m.insert("command".to_string(), serde_json::json!(command_name));
                m.insert("exit_code".to_string(), serde_json::json!(code));
                Some(m)
            },
        });
        result
    }
}

fn cmd_name_for_log(cmd: &ProbeCommand) -> &'static str {
    match cmd {
        ProbeCommand::Help => "help",
        ProbeCommand::Probe => "probe",
    }
}

fn main() {
    // 最初の出力より前に一度だけ（冪等）
    adapter::console::init();
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("resolve-probe: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let outcome = parse_args()?;
    let config = match &outcome {
        ParseOutcome::Config(c) => c.clone(),
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(*shell);
            return Ok(0);
        }
    };
    let app = wire_probe(config.verbose, config.log_file.as_deref());
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: resolve-probe [options]");
}

fn print_help() {
    println!("Usage: resolve-probe [options]");
    println!("Options:");
    println!("  -h, --help                Show this help message");
    println!("  -v, --verbose             Emit human-readable progress logs to stderr");
    println!("  --log-file <path>         Append structured JSONL log records to <path>");
    println!("  --generate <shell>        Generate shell completion script (bash, zsh, fish). Source the output to enable tab completion.");
    println!();
    println!("Environment:");
    println!("  RESOLVE_SCRIPT_API    DaVinci Resolve Developer/Scripting directory.");
    println!("                        The probe loads <RESOLVE_SCRIPT_API>/Modules.");
    println!("                        If unset, the platform install location is used.");
    println!();
    println!("Exit codes:");
    println!("  0   project found; its name is printed to stdout (may be empty)");
    println!("  1   no project open or host unreachable; prints NO_PROJECT");
    println!("  2   unexpected error; prints ERROR:<message>");
    println!();
    println!("Description:");
    println!("  Ask a running DaVinci Resolve instance for the name of the currently");
    println!("  open project and print it as a single line. One attempt, no retry.");
}
