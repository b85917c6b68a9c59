use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::path::PathBuf;

use clientele::config::ClienteleConfig;
use clientele::error::Result;
use clientele::manager::ClientManager;
use clientele::model::Client;
use clientele::store::fs::FileStore;

mod args;
use args::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut manager = init_manager(&cli)?;

    match cli.command {
        Commands::Create {
            name,
            phone,
            email,
            service,
        } => handle_create(&mut manager, &name, &phone, &email, &service),
        Commands::Get { name } => handle_get(&mut manager, &name),
        Commands::List => handle_list(&mut manager),
        Commands::Service { name, description } => {
            handle_service(&mut manager, &name, &description)
        }
        Commands::Delete { name } => handle_delete(&mut manager, &name),
        Commands::Stats => handle_stats(&mut manager),
    }
}

fn init_manager(cli: &Cli) -> Result<ClientManager<FileStore>> {
    let proj_dirs = ProjectDirs::from("com", "clientele", "clientele");

    let config = match &proj_dirs {
        Some(dirs) => ClienteleConfig::load(dirs.config_dir()).unwrap_or_default(),
        None => ClienteleConfig::default(),
    };

    // Precedence: --data-dir flag, then config, then the platform data dir.
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| config.data_dir.clone())
        .or_else(|| proj_dirs.as_ref().map(|d| d.data_dir().to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("clientele_data"));

    let store = FileStore::new(data_dir)?.with_file_ext(config.get_file_ext());
    Ok(ClientManager::new(store))
}

fn handle_create(
    manager: &mut ClientManager<FileStore>,
    name: &str,
    phone: &str,
    email: &str,
    service: &str,
) -> Result<()> {
    let client = manager.create(name, phone, email, service)?;
    println!(
        "{} {} (ID: {})",
        "Created".green(),
        client.name.bold(),
        client.client_id
    );
    Ok(())
}

fn handle_get(manager: &mut ClientManager<FileStore>, name: &str) -> Result<()> {
    let client = manager.get(name)?;
    print_client(&client);
    Ok(())
}

fn handle_list(manager: &mut ClientManager<FileStore>) -> Result<()> {
    let clients = manager.list_all()?;
    if clients.is_empty() {
        println!("No clients found.");
        return Ok(());
    }
    for client in &clients {
        println!(
            "{}  {} {}",
            client.name.bold(),
            client.client_id.dimmed(),
            format!("({} services)", client.services.len()).dimmed()
        );
    }
    Ok(())
}

fn handle_service(
    manager: &mut ClientManager<FileStore>,
    name: &str,
    description: &str,
) -> Result<()> {
    let client = manager.add_service(name, description)?;
    println!(
        "{} service for {} (now {})",
        "Recorded".green(),
        client.name.bold(),
        client.services.len()
    );
    Ok(())
}

fn handle_delete(manager: &mut ClientManager<FileStore>, name: &str) -> Result<()> {
    manager.delete(name)?;
    println!("{} {}", "Deleted".green(), name.bold());
    Ok(())
}

fn handle_stats(manager: &mut ClientManager<FileStore>) -> Result<()> {
    let stats = manager.stats()?;
    println!("Clients:          {}", stats.total_clients);
    println!("Services:         {}", stats.total_services);
    println!("Avg per client:   {:.1}", stats.average_services);
    Ok(())
}

fn print_client(client: &Client) {
    println!("{}", client.name.bold());
    println!("  ID:         {}", client.client_id);
    println!("  Phone:      {}", client.phone);
    println!("  Email:      {}", client.email);
    println!("  Registered: {}", client.registered_on);
    println!("  Services:");
    for service in &client.services {
        println!("    - {}", service);
    }
}
