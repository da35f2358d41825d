mod cli;

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use rand::prelude::*;
use rand::rngs::StdRng;

use cli::{Cli, Command};
use lligator::codegen::{generate, CodegenOptions};
use lligator::grammar::{Ll1Table, Productions};
use lligator::lexer::{Lexer, LexerConfig};
use lligator::meta::{load_grammar, GrammarFileError};
use lligator::runtime::Outline;
use lligator::sampler::{render_sentence, Sampler, SamplerOptions};
use lligator::synthesis::synthesize;
use lligator::{calc, engine};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            match error.downcast_ref::<GrammarFileError>() {
                Some(file_error) => {
                    for line in file_error.report() {
                        eprintln!("{}", line);
                    }
                }
                None => eprintln!("error: {:#}", error),
            }
            ExitCode::FAILURE
        }
    }
}

fn load(file: &Path) -> anyhow::Result<(String, Productions, Ll1Table)> {
    let (axiom, productions) = load_grammar(file)?;
    let table = synthesize(&axiom, &productions)
        .with_context(|| format!("cannot build a table for `{}`", file.display()))?;
    log::info!("{}: {} non-terminal(s), {} table cell(s)", file.display(), productions.len(), table.len());
    Ok((axiom, productions, table))
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Table { file } => {
            let (_, _, table) = load(&file)?;
            print!("{}", table);
        }
        Command::Generate { file, output, runtime, no_table } => {
            let (_, productions, table) = load(&file)?;
            let options = CodegenOptions { runtime_path: runtime, embed_table: !no_table, module_doc: None };
            let source = generate(&table, &productions, &options);
            match output {
                Some(output) => std::fs::write(&output, source)
                    .with_context(|| format!("cannot write `{}`", output.display()))?,
                None => print!("{}", source),
            }
        }
        Command::Parse { file, input, tree } => {
            let (_, _, table) = load(&file)?;
            let text = match input {
                Some(text) => text,
                None => {
                    let mut text = String::new();
                    std::io::stdin().read_to_string(&mut text).context("cannot read standard input")?;
                    text
                }
            };
            let parsed = engine::parse(&table, Lexer::new(&text, LexerConfig::from_table(&table)))?;
            if tree {
                print!("{}", Outline::from_parse_node(&parsed));
            } else {
                println!("accepted");
            }
        }
        Command::Sample { file, start, amount, seed, max_depth } => {
            let (axiom, productions, _) = load(&file)?;
            let start = start.unwrap_or(axiom);
            let sampler = Sampler::new(&productions, SamplerOptions { max_depth });
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            for _ in 0..amount.unwrap_or(1) {
                let tokens = sampler.sentence(&start, &mut rng)?;
                println!("{}", render_sentence(&tokens));
            }
        }
        Command::Calc { expression } => {
            println!("{}", calc::evaluate(&expression)?);
        }
    }
    Ok(())
}
