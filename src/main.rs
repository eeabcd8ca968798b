use std::io;

use anyhow::Result;
use clap::Parser;
use log::info;

use rofis::{Config, FileSystem, Shell};

fn main() {
    match main_result() {
        Ok(_) => {}
        Err(err) => eprintln!("{:?}", err),
    }
}

fn main_result() -> Result<()> {
    env_logger::init();

    let config = Config::parse();
    let mut shell = Shell::new(FileSystem::from_config(&config)?, config.prompt.clone());

    if let Some(path) = config.snapshot_path() {
        shell.restore(path);
    }

    let stdin = io::stdin();
    let result = shell.run(stdin.lock(), io::stdout());

    if let Some(path) = config.snapshot_path() {
        shell.persist(path);
    }
    info!("bye");
    result
}
