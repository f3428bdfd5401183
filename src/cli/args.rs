use crate::domain::ProbeCommand;
use crate::error::Error;
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: 人間向けの経過ログを stderr に出力する
    pub verbose: bool,
    /// --log-file <path>: 構造化 JSONL ログをファイルに追記する
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            help: false,
            verbose: false,
            log_file: None,
        }
    }
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("resolve-probe")
        .about("Report the name of the project currently open in DaVinci Resolve")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Emit human-readable progress logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("log-file")
                .long("log-file")
                .value_name("path")
                .help("Append structured JSONL log records to <path>")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let help = matches.get_flag("help");
    let verbose = matches.get_flag("verbose");
    let log_file = matches.get_one::<String>("log-file").map(PathBuf::from);
    Config {
        help,
        verbose,
        log_file,
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let cmd = build_clap_command();
    let matches = cmd
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[String]) -> Result<Config, Error> {
    let cmd = build_clap_command();
    let matches = cmd
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    emit_fallback_completion(shell);
}

fn emit_fallback_completion(shell: Shell) {
    let opts = "-h --help -v --verbose --log-file --generate";
    match shell {
        Shell::Bash => {
            println!(
                r#"# Fallback completion for resolve-probe
_resolve_probe() {{
  local cur="${{COMP_WORDS[COMP_CWORD]}}"
  COMPREPLY=($(compgen -W "{opts}" -- "$cur"))
}}
complete -F _resolve_probe resolve-probe
"#,
                opts = opts
            );
        }
        Shell::Zsh => {
            println!(
                r#"# Fallback completion for resolve-probe
#compdef resolve-probe
local -a reply
reply=({opts})
_describe 'resolve-probe' reply
"#,
                opts = opts
            );
        }
        Shell::Fish => {
            println!(
                r#"# Fallback completion for resolve-probe
complete -c resolve-probe -l help -s h -d "Show help"
complete -c resolve-probe -l verbose -s v -d "Progress logs to stderr"
complete -c resolve-probe -l log-file -d "JSONL log file" -r
complete -c resolve-probe -l generate -d "Generate completion script" -r -a "bash zsh fish"
"#
            );
        }
        _ => {}
    }
}

/// Config を ProbeCommand に変換する
pub fn config_to_command(config: &Config) -> ProbeCommand {
    if config.help {
        return ProbeCommand::Help;
    }
    ProbeCommand::Probe
}
