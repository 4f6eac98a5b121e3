use albumsync::api_client::AlbumId;
use albumsync::configuration::{create_config, ConfigFolder};
use albumsync::gallery::{AlbumInput, CategoryFilter};
use albumsync::startup::{run, Action};
use clap::{value_parser, Arg, ArgMatches, Command};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "albumsync=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = cli().get_matches();
    let cfg_folder = ConfigFolder::new()?;

    match args.subcommand() {
        Some(("config", _)) => {
            println!("\x1b[1m\x1b[34mConfiguring albumsync...\x1b[0m");
            create_config(cfg_folder)
        }
        Some((name, sub_args)) => match parse_action(name, sub_args) {
            Some(action) => run(cfg_folder, action).await,
            None => {
                print_usage();
                Ok(())
            }
        },
        None => {
            print_usage();
            Ok(())
        }
    }
}

fn cli() -> Command {
    Command::new("albumsync")
        .about("📸 Portfolio gallery client: browse albums, create them and upload photos 📸")
        .subcommand(
            Command::new("show")
                .about("🖼️ Show the gallery")
                .arg(
                    Arg::new("filter")
                        .long("filter")
                        .short('f')
                        .default_value("all")
                        .help("Only show albums of this category (futbol, basquet, social, ...)"),
                ),
        )
        .subcommand(
            Command::new("create")
                .about("➕ Create a new album (asks for anything not given)")
                .arg(Arg::new("title").long("title").short('t'))
                .arg(Arg::new("category").long("category").short('c')),
        )
        .subcommand(
            Command::new("upload")
                .about("📷 Upload photos into an album, one after another")
                .arg(Arg::new("album").required(true).help("Album id"))
                .arg(
                    Arg::new("paths")
                        .required(true)
                        .num_args(1..)
                        .value_parser(value_parser!(PathBuf))
                        .help("Image files or folders"),
                ),
        )
        .subcommand(Command::new("logout").about("🚪 Close the administrator session"))
        .subcommand(
            Command::new("config").about("🛠️ Create or update configuration file for albumsync"),
        )
}

fn parse_action(name: &str, args: &ArgMatches) -> Option<Action> {
    match name {
        "show" => {
            let filter = args
                .get_one::<String>("filter")
                .map(|value| CategoryFilter::parse(value))
                .unwrap_or_default();
            Some(Action::Show { filter })
        }
        "create" => Some(Action::Create(AlbumInput {
            title: args.get_one::<String>("title").cloned(),
            category: args.get_one::<String>("category").cloned(),
        })),
        "upload" => {
            let album_id = AlbumId::from(args.get_one::<String>("album")?.as_str());
            let paths = args
                .get_many::<PathBuf>("paths")?
                .cloned()
                .collect::<Vec<_>>();
            Some(Action::Upload { album_id, paths })
        }
        "logout" => Some(Action::Logout),
        _ => None,
    }
}

fn print_usage() {
    println!("\x1b[1m\x1b[31mInvalid command!\x1b[0m\n");
    println!("📖 Available Commands:");
    println!("  \x1b[1m\x1b[32malbumsync show [--filter CAT]\x1b[0m        - 🖼️  Show the gallery");
    println!("  \x1b[1m\x1b[32malbumsync create [-t TITLE] [-c CAT]\x1b[0m - ➕ Create an album");
    println!("  \x1b[1m\x1b[32malbumsync upload ID FILES...\x1b[0m       - 📷 Upload photos");
    println!("  \x1b[1m\x1b[32malbumsync logout\x1b[0m                   - 🚪 Close the session");
    println!("  \x1b[1m\x1b[32malbumsync config\x1b[0m                   - 🛠️  Create or update configuration file");
    println!("\x1b[33mRun 'albumsync config' first and point it at your portfolio backend.\x1b[0m\n");
}
