//! curfree entry point
//!
//! Thin command-line shell over `StorageService`.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use curfree::{Settings, StorageService};

#[derive(Parser, Debug)]
#[command(name = "curfree", about = "Reset editor telemetry identifiers", version)]
struct Cli {
    /// Store file to operate on (defaults to the editor's storage.json)
    #[arg(long, global = true)]
    path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Print the current identifiers
    Show,
    /// Back up, then regenerate all four identifiers
    Reset,
    /// Copy the store to its backup file
    Backup,
    /// Overwrite the store with its backup
    Restore,
    /// Mark the store read-only
    Lock,
    /// Make the store writable again
    Unlock,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let settings = Settings::load().with_storage_override(cli.path.as_deref());
    let service = StorageService::new(settings);

    let record = service.get_storage();
    if record.is_unavailable() {
        log::error!("Store not found or unreadable");
        return ExitCode::FAILURE;
    }
    let path = record.config_path.as_str();

    let ok = match cli.command {
        Command::Show => {
            println!("path:         {}", record.config_path);
            println!("read-only:    {}", record.is_read_only);
            println!("machineId:    {}", record.machine_id);
            println!("macMachineId: {}", record.mac_machine_id);
            println!("devDeviceId:  {}", record.dev_device_id);
            println!("sqmId:        {}", record.sqm_id);
            true
        }
        Command::Reset => service.reset(path),
        Command::Backup => service.backup(path),
        Command::Restore => service.restore(path),
        Command::Lock => service.set_read_only(path, true),
        Command::Unlock => service.set_read_only(path, false),
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        log::error!("{:?} failed", cli.command);
        ExitCode::FAILURE
    }
}
