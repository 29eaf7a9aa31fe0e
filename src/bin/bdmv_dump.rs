use std::env;
use std::process::ExitCode;

use bdmvparser::read_local_database;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: bdmv_dump <file> [--compact]");
        eprintln!("example: bdmv_dump BDMV/PLAYLIST/00000.mpls");
        return ExitCode::FAILURE;
    }
    let path = &args[1];
    let compact = args[2..].iter().any(|a| a == "--compact");

    let database = match read_local_database(path) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let json = if compact {
        serde_json::to_string(&database)
    } else {
        serde_json::to_string_pretty(&database)
    };
    match json {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", path, e);
            ExitCode::FAILURE
        }
    }
}
