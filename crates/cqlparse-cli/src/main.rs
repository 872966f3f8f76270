//! cqlparse CLI - Command line interface for the CQL3 parser

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;
use walkdir::WalkDir;

use cqlparse_ast::{Diagnostic, Script, Severity};
use cqlparse_lexer::tokenize;
use cqlparse_parser::parse;

#[derive(Parser)]
#[command(name = "cqlparse")]
#[command(about = "Parser and checker for CQL3 scripts", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file and output the statements as JSON
    Parse {
        /// Input file
        file: PathBuf,
        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Check files or directories of .cql scripts for syntax errors
    Check {
        /// Input files or directories
        paths: Vec<PathBuf>,
    },
    /// Print the token stream of a file
    Tokens {
        /// Input file
        file: PathBuf,
    },
    /// Print every statement of a file in canonical form
    Fmt {
        /// Input file
        file: PathBuf,
    },
    /// Interactive REPL
    Repl,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error setting up logging: {}", e);
    }

    let ok = match cli.command {
        Commands::Parse { file, pretty } => cmd_parse(&file, pretty),
        Commands::Check { paths } => cmd_check(&paths),
        Commands::Tokens { file } => cmd_tokens(&file),
        Commands::Fmt { file } => cmd_fmt(&file),
        Commands::Repl => cmd_repl(),
    };
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn read_source(file: &Path) -> Option<String> {
    match fs::read_to_string(file) {
        Ok(s) => Some(s),
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            None
        }
    }
}

fn to_json(script: &Script, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(script)
    } else {
        serde_json::to_string(script)
    }
}

fn cmd_parse(file: &Path, pretty: bool) -> bool {
    let Some(source) = read_source(file) else {
        return false;
    };

    let script = parse(&source);
    match to_json(&script, pretty) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            return false;
        }
    }
    report_diagnostics(&source, file, &script);
    script.is_clean()
}

/// Expand directories into the `.cql` files beneath them
fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).sort_by_file_name() {
            match entry {
                Ok(entry) => {
                    let p = entry.path();
                    if entry.file_type().is_file()
                        && p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("cql"))
                    {
                        files.push(p.to_path_buf());
                    }
                }
                Err(e) => eprintln!("Error walking {}: {}", path.display(), e),
            }
        }
    }
    files
}

fn cmd_check(paths: &[PathBuf]) -> bool {
    let files = collect_files(paths);
    debug!(count = files.len(), "checking files");
    let mut all_ok = true;

    for file in &files {
        let Some(source) = read_source(file) else {
            all_ok = false;
            continue;
        };

        let script = parse(&source);
        let total = script.statements.len();
        let errors = script.diagnostics().count();
        let schema = script.parsed().filter(|s| s.kind().is_ddl()).count();
        debug!(file = %file.display(), total, schema, "parsed");
        if errors == 0 {
            println!("✓ {} - {} statements", file.display(), total);
        } else {
            eprintln!(
                "✗ {} - {} statements, {} diagnostics",
                file.display(),
                total,
                errors
            );
            report_diagnostics(&source, file, &script);
            all_ok = false;
        }
    }

    info!(files = files.len(), ok = all_ok, "check finished");
    all_ok
}

fn cmd_tokens(file: &Path) -> bool {
    let Some(source) = read_source(file) else {
        return false;
    };

    for token in tokenize(&source) {
        println!(
            "{:>4}:{:<4} {:<20} {}",
            token.line,
            token.column,
            format!("{:?}", token.kind),
            token.text(&source)
        );
    }
    true
}

fn cmd_fmt(file: &Path) -> bool {
    let Some(source) = read_source(file) else {
        return false;
    };

    let script = parse(&source);
    if !script.is_clean() {
        report_diagnostics(&source, file, &script);
        return false;
    }
    for statement in script.parsed() {
        println!("{};", statement);
    }
    true
}

fn cmd_repl() -> bool {
    use rustyline::DefaultEditor;

    println!("cqlparse REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type :help for help, :quit to exit");
    println!();

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to create REPL: {}", e);
            return false;
        }
    };
    let mut loaded_source = String::new();
    let repl_file = PathBuf::from("<repl>");

    loop {
        let readline = rl.readline("cql> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                let trimmed = line.trim();

                if trimmed.starts_with(':') {
                    match trimmed {
                        ":quit" | ":q" => break,
                        ":help" | ":h" => {
                            println!("Commands:");
                            println!("  :load <file>  - Load a file");
                            println!("  :parse        - Show loaded statements as JSON");
                            println!("  :fmt          - Show loaded statements in canonical form");
                            println!("  :clear        - Clear loaded code");
                            println!("  :quit         - Exit REPL");
                            println!("Any other input is parsed as CQL.");
                        }
                        cmd if cmd.starts_with(":load ") => {
                            let path = cmd[6..].trim();
                            match fs::read_to_string(path) {
                                Ok(s) => {
                                    let count = parse(&s).statements.len();
                                    loaded_source = s;
                                    println!("Loaded {} ({} statements)", path, count);
                                }
                                Err(e) => {
                                    eprintln!("Error: {}", e);
                                }
                            }
                        }
                        ":parse" | ":fmt" if loaded_source.is_empty() => {
                            println!("No code loaded. Use :load <file>");
                        }
                        ":parse" => match to_json(&parse(&loaded_source), true) {
                            Ok(json) => println!("{}", json),
                            Err(e) => eprintln!("Error: {}", e),
                        },
                        ":fmt" => {
                            let script = parse(&loaded_source);
                            for parsed in &script.statements {
                                match &parsed.statement {
                                    Some(statement) => println!("{};", statement),
                                    None => println!("-- unparsed statement"),
                                }
                            }
                        }
                        ":clear" => {
                            loaded_source.clear();
                            println!("Cleared");
                        }
                        _ => {
                            println!("Unknown command. Type :help for help.");
                        }
                    }
                } else if !trimmed.is_empty() {
                    let script = parse(trimmed);
                    for parsed in &script.statements {
                        if let Some(statement) = &parsed.statement {
                            println!("{:?}: {}", statement.kind(), statement);
                        }
                    }
                    report_diagnostics(trimmed, &repl_file, &script);
                }
            }
            Err(_) => break,
        }
    }

    println!("Goodbye!");
    true
}

fn report_diagnostics(source: &str, file: &Path, script: &Script) {
    for diagnostic in script.diagnostics() {
        report_diagnostic(source, file, diagnostic);
    }
}

/// ariadne counts characters, spans count bytes
fn char_offset(source: &str, byte: usize) -> usize {
    source.get(..byte).map_or(byte, |prefix| prefix.chars().count())
}

fn report_diagnostic(source: &str, file: &Path, diagnostic: &Diagnostic) {
    let name = file.to_string_lossy().to_string();
    let start = char_offset(source, diagnostic.span.start);
    let end = char_offset(source, diagnostic.span.end).max(start + 1);
    let (kind, color) = match diagnostic.severity {
        Severity::Error => (ReportKind::Error, Color::Red),
    };

    let result = Report::build(kind, name.clone(), start)
        .with_code(&diagnostic.code)
        .with_message(&diagnostic.message)
        .with_label(
            Label::new((name.clone(), start..end))
                .with_message(&diagnostic.message)
                .with_color(color),
        )
        .finish()
        .eprint((name, Source::from(source)));
    if let Err(e) = result {
        eprintln!("Error writing diagnostic: {}", e);
    }
}
