use std::env;
use std::io::BufRead;
use std::path::Path;
use std::thread;
use torus_locator::config::{self, RuntimeConfig};
use torus_locator::service::{log_report, CancelToken, DetectionListener};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config = match env::args().nth(1) {
        Some(path) => config::load_config(Path::new(&path))?,
        None => RuntimeConfig::default(),
    };
    let locator = config
        .build_locator()
        .map_err(|e| format!("Invalid geometry: {e}"))?;
    let mut listener = DetectionListener::bind(&config.listener, locator)
        .map_err(|e| format!("Failed to bind {}: {e}", config.listener.bind))?;

    let token = CancelToken::new();
    let stopper = token.clone();
    thread::spawn(move || {
        println!("Press Enter to stop the listener...");
        let mut line = String::new();
        // EOF on stdin stops the listener too
        let _ = std::io::stdin().lock().read_line(&mut line);
        stopper.cancel();
    });

    let stats = listener
        .run(&token, log_report)
        .map_err(|e| format!("Listener failed: {e}"))?;
    println!(
        "Processed {} datagrams: {} located, {} failed, {} malformed",
        stats.datagrams, stats.located, stats.failed, stats.malformed
    );
    Ok(())
}
