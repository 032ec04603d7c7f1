use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::filter::EnvFilter;

use synacor_vm::errors::Error;
use synacor_vm::{image, Machine};

#[derive(Parser)]
#[command(name = "synacor-vm", version, about = "Synacor-architecture bytecode VM")]
struct Cli {
    /// Program image loaded into memory at address 0
    #[arg(default_value = "challenge.bin")]
    image: PathBuf,
}

fn main() -> ExitCode {
    // logs go to stderr; stdout belongs to the running program
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut machine = Machine::new();
    match load_and_run(&cli, &mut machine) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("synacor-vm: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn load_and_run(cli: &Cli, machine: &mut Machine) -> Result<(), Error> {
    let words = image::read_file(&cli.image)?;
    machine.load_image(&words)?;
    machine.run()
}
