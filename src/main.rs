use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Result;

use console_rpg::engine::{Output, OutputBlock};
use console_rpg::{GameEngine, load_store_from_file, seed_store};

fn flush_output(out: Output) -> io::Result<()> {
    for block in out.blocks {
        match block {
            OutputBlock::Text(line) => println!("{}", line),
            OutputBlock::MapPanel(panel) => println!("\n{}", panel),
            OutputBlock::Prompt(prompt) => {
                print!("{} ", prompt);
                io::stdout().flush()?;
            }
            OutputBlock::Pause(millis) => thread::sleep(Duration::from_millis(millis)),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let store_path: PathBuf = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/game.toml"));

    let store = if store_path.exists() {
        match load_store_from_file(&store_path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Failed to load store file '{}': {e}", store_path.display());
                std::process::exit(1);
            }
        }
    } else {
        if let Some(dir) = store_path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let s = seed_store(&store_path)?;
        println!("Created new store file: {}", store_path.display());
        s
    };

    let mut engine = GameEngine::new(store);
    flush_output(engine.initialize())?;

    let stdin = io::stdin();

    loop {
        let mut input = String::new();
        let bytes_read = stdin.read_line(&mut input)?;
        if bytes_read == 0 {
            println!("\nGoodbye.");
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (out, quit) = engine.step(input)?;
        flush_output(out)?;

        if quit {
            break;
        }
    }

    Ok(())
}
