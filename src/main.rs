use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use text_aligner::{
    RunConfig, ScoreParams, DEFAULT_OUTPUT, GAP_PENALTY, MATCH_BONUS, SUBSTITUTION_PENALTY,
};

/// Local-alignment similarity between two text files.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The file to score. Prompted for when omitted.
    primary: Option<PathBuf>,

    /// The file to compare against. Prompted for when omitted.
    reference: Option<PathBuf>,

    /// Where the score table is written.
    #[arg(short('o'), long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Also print the best local score and where it ends.
    #[arg(short('b'), long)]
    best: bool,

    #[arg(long, default_value_t = MATCH_BONUS)]
    match_bonus: i32,

    #[arg(long, default_value_t = GAP_PENALTY)]
    gap_penalty: i32,

    #[arg(long, default_value_t = SUBSTITUTION_PENALTY)]
    substitution_penalty: i32,
}

fn prompt(message: &str) -> io::Result<PathBuf> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(PathBuf::from(line.trim_end_matches(['\r', '\n'])))
}

fn build_config(args: Args) -> text_aligner::Result<RunConfig> {
    let primary = match args.primary {
        Some(path) => path,
        None => prompt("Enter a file name to upload: ")?,
    };
    let reference = match args.reference {
        Some(path) => path,
        None => prompt("Enter a file name to compare similarity to: ")?,
    };

    let params = ScoreParams::new()
        .with_match_bonus(args.match_bonus)?
        .with_gap_penalty(args.gap_penalty)?
        .with_substitution_penalty(args.substitution_penalty)?;

    Ok(RunConfig::new(primary, reference)
        .with_output(args.output)?
        .with_report_best(args.best)
        .with_score_params(params))
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let result = build_config(args).and_then(|config| text_aligner::run(&config));

    match result {
        Ok(report) => {
            println!("time taken {:.6}", report.statistics.execution_secs());
            if let Some(best) = report.best {
                println!(
                    "best score {} at reference {} / primary {}",
                    best.score, best.position.i, best.position.j
                );
            }
            println!("file created ");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
