use clap::Parser;

use glyphcast::cli::{handle_config_action, run_render, Args, Command};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let result = match args.command {
        Command::Render(ref render_args) => run_render(render_args),
        Command::Config { action } => handle_config_action(action),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
