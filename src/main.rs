use std::env;
use std::process;

use anyhow::Context;
use sqint::{ConnectionParams, ExtractOptions, SslMode, Vendor};

fn print_usage(program: &str) {
    eprintln!("Usage: {} <adapter> <database> [options]", program);
    eprintln!();
    eprintln!("Adapters: mysql, postgresql, sqlite (aliases: mysql2, mariadb, pg, sqlite3)");
    eprintln!("For sqlite, <database> is the path of the database file.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -H, --host <host>          Server host (default: localhost)");
    eprintln!("  -P, --port <port>          Server port (default: the vendor port)");
    eprintln!("  -u, --user <user>          User name (default: root / postgres)");
    eprintln!("  -p, --password <password>  Password (default: empty)");
    eprintln!("      --ssl-mode <mode>      disable, prefer, require, verify-ca, verify-full");
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the extracted schema as JSON.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let adapter = Vendor::from_str(&args[1]).unwrap_or_else(|| {
        eprintln!("Unknown adapter: {}", args[1]);
        process::exit(1);
    });
    let database = args[2].clone();

    let mut hostname = "localhost".to_string();
    let mut port: Option<u16> = None;
    let mut username = match adapter {
        Vendor::PostgreSQL => "postgres".to_string(),
        _ => "root".to_string(),
    };
    let mut password = String::new();
    let mut ssl_mode = SslMode::default();

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "-H" | "--host" => {
                i += 1;
                if i < args.len() {
                    hostname = args[i].clone();
                }
            }
            "-P" | "--port" => {
                i += 1;
                if i < args.len() {
                    port = Some(args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid port: {}", args[i]);
                        process::exit(1);
                    }));
                }
            }
            "-u" | "--user" => {
                i += 1;
                if i < args.len() {
                    username = args[i].clone();
                }
            }
            "-p" | "--password" => {
                i += 1;
                if i < args.len() {
                    password = args[i].clone();
                }
            }
            "--ssl-mode" => {
                i += 1;
                if i < args.len() {
                    ssl_mode = SslMode::from_db_str(&args[i]);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let params = if adapter.is_file_based() {
        ConnectionParams::file(database)
    } else {
        ConnectionParams::Server {
            hostname,
            port: port.or_else(|| adapter.default_port()).unwrap_or_default(),
            username,
            password,
            database,
            ssl_mode,
        }
    };

    let options = ExtractOptions::new(adapter, params);
    let schema = smol::block_on(sqint::extract(&options))
        .with_context(|| format!("failed to extract schema of {}", options.database_name()))?;

    let json = serde_json::to_string_pretty(&schema).context("failed to encode schema")?;
    println!("{json}");
    Ok(())
}
