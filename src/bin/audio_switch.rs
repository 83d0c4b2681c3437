//! audio-switch binary
//!
//! Parses one function selector, runs it against the live device store
//! and exits 0 on success, 1 on any resolution or platform failure.

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use audio_switch::cli::Cli;
use audio_switch::commands::Request;

fn main() -> ExitCode {
    // Diagnostics go through tracing and stay on stderr; device rows and
    // result messages are the only stdout output.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(function) = cli.function() else {
        println!("Please specify audio device.");
        let _ = Cli::command().print_help();
        return ExitCode::from(1);
    };

    let request = Request {
        function,
        device_type: cli.device_type,
        format: cli.format,
    };

    run(&request)
}

#[cfg(target_os = "macos")]
fn run(request: &Request) -> ExitCode {
    use audio_switch::audio::CoreAudioStore;
    use audio_switch::{commands, discovery};

    let store = CoreAudioStore::new();
    let mut stdout = io::stdout();
    match commands::execute(&store, request, discovery::discover, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(message) = e.user_message() {
                println!("{message}");
            }
            ExitCode::from(1)
        }
    }
}

#[cfg(not(target_os = "macos"))]
fn run(_request: &Request) -> ExitCode {
    println!("audio-switch controls the CoreAudio device store and only runs on macOS.");
    ExitCode::from(1)
}
