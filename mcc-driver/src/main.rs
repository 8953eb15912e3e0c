//! MiniC Compiler Driver
//!
//! Main entry point for the MiniC compiler: reads a source file, runs
//! the lexer, the shift/reduce parse with the semantic analyzer and IR
//! generator attached, then the assembly generator, and writes the
//! artifacts to disk.

use clap::Parser as ClapParser;
use mcc_frontend::{ActionObserver, Lexer, Parser, SemanticAnalyzer, SymbolTable};
use mcc_ir::IrGenerator;
use std::fs;
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "mcc")]
#[command(about = "MiniC to RISC-V compiler")]
#[command(version = "0.1.0")]
struct Cli {
    /// Input MiniC source file
    input: PathBuf,

    /// Output assembly file (default: input with .asm extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the token stream as JSON to this path
    #[arg(long)]
    emit_tokens: Option<PathBuf>,

    /// Write the IR instruction list to this path
    #[arg(long)]
    emit_ir: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = compile(&cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn compile(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(&cli.input)?;
    let filename = cli.input.display().to_string();

    let mut symbols = SymbolTable::new();
    let tokens = Lexer::new(&source, &filename).tokenize(&mut symbols)?;

    if let Some(path) = &cli.emit_tokens {
        fs::write(path, serde_json::to_string_pretty(&tokens)?)?;
        println!("Tokens written to: {}", path.display());
    }

    let mut semantic = SemanticAnalyzer::new();
    let mut irgen = IrGenerator::new();
    {
        let mut observers: Vec<&mut dyn ActionObserver> = vec![&mut semantic, &mut irgen];
        Parser::new(tokens).parse(&mut symbols, &mut observers)?;
    }
    let instructions = irgen.into_instructions();

    if let Some(path) = &cli.emit_ir {
        let listing: String = instructions
            .iter()
            .map(|ins| format!("{}\n", ins))
            .collect();
        fs::write(path, listing)?;
        println!("IR written to: {}", path.display());
    }

    let assembly = mcc_codegen::generate_assembly(&instructions)?;

    let output_path = match &cli.output {
        Some(path) => path.clone(),
        None => {
            let mut path = cli.input.clone();
            path.set_extension("asm");
            path
        }
    };
    fs::write(&output_path, assembly)?;
    println!("Assembly written to: {}", output_path.display());
    Ok(())
}
