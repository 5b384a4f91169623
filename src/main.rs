use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use symex::{Vm, read};

fn history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".symex_history"))
}

/// Read and evaluate one input line. An error aborts the rest of the line
/// but never the session.
fn eval_line(vm: &mut Vm, line: &str) {
    match read(line) {
        Ok(exprs) => {
            for expr in exprs {
                match vm.eval(&expr) {
                    Ok(result) => println!("{result}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        break;
                    }
                }
            }
        }
        Err(e) => eprintln!("Error: {e}"),
    }
}

fn repl() {
    let mut vm = Vm::new();

    println!("symex REPL");
    println!("Type expressions to evaluate, or exit to quit");
    println!();

    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Failed to start line editor: {e}");
            process::exit(1);
        }
    };
    let history = history_path();
    if let Some(ref path) = history {
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);
                if line == "exit" {
                    break;
                }
                eval_line(&mut vm, line);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {e:?}");
                break;
            }
        }
    }

    if let Some(ref path) = history {
        let _ = rl.save_history(path);
    }
}

fn run_file(filename: &str) -> Result<(), String> {
    let contents = fs::read_to_string(filename)
        .map_err(|e| format!("Failed to read file '{filename}': {e}"))?;

    let mut vm = Vm::new();
    for line in contents.lines() {
        eval_line(&mut vm, line);
    }
    Ok(())
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  symex              Start interactive REPL");
    eprintln!("  symex <file>       Run a program file");
    eprintln!("  symex --help       Show this help message");
}

fn main() {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => repl(),
        2 => {
            let arg = &args[1];
            if arg == "--help" || arg == "-h" {
                print_usage();
            } else if let Err(e) = run_file(arg) {
                eprintln!("{e}");
                process::exit(1);
            }
        }
        _ => {
            eprintln!("Error: Too many arguments");
            print_usage();
            process::exit(1);
        }
    }
}
