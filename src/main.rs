// exprc: typed expression language front end with a terminal viewer

use std::fs;
use std::io;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};

use exprc::compile;
use exprc::ui::App;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} <file> [--print]", program_name);
    eprintln!();
    eprintln!("  --print    print the annotated tree and symbol table, no viewer");
    eprintln!();
    eprintln!("Set RUST_LOG=debug to trace the lexer and parser.");
}

/// Non-interactive mode: dump the tree and symbols, or the error.
fn print_compilation(source: &str) {
    match compile(source) {
        Ok(compiled) => {
            print!("{}", compiled.program);
            println!();
            println!("Symbols:");
            for (name, symbol) in compiled.symbols.iter() {
                let state = if symbol.initialized {
                    "initialized"
                } else {
                    "uninitialized"
                };
                println!("  {} : {} ({})", name, symbol.data_type, state);
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("exprc");

    let print_only = args.iter().skip(1).any(|a| a == "--print");
    let Some(source_file) = args.iter().skip(1).find(|a| !a.starts_with("--")) else {
        eprintln!("Error: No input file provided");
        eprintln!();
        print_usage(program_name);
        std::process::exit(1);
    };

    if !Path::new(source_file).exists() {
        eprintln!("Error: File '{}' not found", source_file);
        print_usage(program_name);
        std::process::exit(1);
    }

    let source = fs::read_to_string(source_file)?;
    info!("read {} byte(s) from {}", source.len(), source_file);

    if print_only {
        print_compilation(&source);
        return Ok(());
    }

    // Compile and log before the terminal is taken over
    let mut app = App::new(source);
    info!("{}", app.status_message);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
