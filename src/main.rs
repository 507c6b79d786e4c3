//! Command line client for OSF-style file storage.
//!
//! Subcommands map onto the library's project lookup, tree walker and
//! transfer calls. Credentials and the project id come from flags, the
//! environment or config files; see the config module for precedence.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use log::debug;
use osfcli::cli;
use osfcli::client::Osf;
use osfcli::config::Config;
use std::io;
use std::path::PathBuf;

fn build_command() -> Command {
    Command::new("osf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Command line client for OSF projects and their file storages")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("username")
                .short('u')
                .long("username")
                .value_name("USERNAME")
                .help("Username (email); the password is read from OSF_PASSWORD")
                .global(true)
                .num_args(1),
        )
        .arg(
            Arg::new("project")
                .short('p')
                .long("project")
                .value_name("ID")
                .help("Project id")
                .global(true)
                .num_args(1),
        )
        .subcommand(
            Command::new("clone")
                .about("Download all files from all storages of a project")
                .arg(
                    Arg::new("output")
                        .value_name("DIR")
                        .help("Output directory, defaults to the project id")
                        .num_args(1),
                ),
        )
        .subcommand(
            Command::new("fetch")
                .about("Download a single file")
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .help("Overwrite an existing local file")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("remote")
                        .value_name("REMOTE")
                        .help("Remote path, optionally prefixed with a storage provider")
                        .required(true)
                        .num_args(1),
                )
                .arg(
                    Arg::new("local")
                        .value_name("LOCAL")
                        .help("Local destination, defaults to the remote file name")
                        .num_args(1),
                ),
        )
        .subcommand(
            Command::new("list")
                .alias("ls")
                .about("List all files from all storages of a project"),
        )
        .subcommand(
            Command::new("upload")
                .about("Upload a new file (requires a username and OSF_PASSWORD)")
                .arg(
                    Arg::new("source")
                        .value_name("SOURCE")
                        .help("Local file to upload")
                        .required(true)
                        .num_args(1),
                )
                .arg(
                    Arg::new("destination")
                        .value_name("DESTINATION")
                        .help("Remote destination path; a trailing / keeps the local name")
                        .required(true)
                        .num_args(1),
                ),
        )
        .subcommand(
            Command::new("remove")
                .alias("rm")
                .about("Remove a remote file (requires a username and OSF_PASSWORD)")
                .arg(
                    Arg::new("target")
                        .value_name("TARGET")
                        .help("Remote path of the file to remove")
                        .required(true)
                        .num_args(1),
                ),
        )
}

fn main() -> Result<()> {
    env_logger::init();

    let matches = build_command().get_matches();
    let (name, sub) = match matches.subcommand() {
        Some(pair) => pair,
        None => unreachable!("subcommand is required"),
    };

    // Global flags propagate into the subcommand matches.
    let username = sub.get_one::<String>("username").cloned();
    let project = sub.get_one::<String>("project").cloned();
    let config = Config::load(username, project);
    let project_id = config
        .project
        .clone()
        .context("no project id given; use --project, OSF_PROJECT or a config file")?;
    debug!("using project {}", project_id);
    let osf = Osf::new(&config)?;

    match name {
        "clone" => {
            let output = sub.get_one::<String>("output").map(PathBuf::from);
            cli::clone(&osf, &project_id, output.as_deref())
        }
        "fetch" => {
            let remote = sub.get_one::<String>("remote").unwrap();
            let local = sub.get_one::<String>("local").map(PathBuf::from);
            cli::fetch(
                &osf,
                &project_id,
                remote,
                local.as_deref(),
                sub.get_flag("force"),
            )
        }
        "list" => cli::list(&osf, &project_id, &mut io::stdout().lock()),
        "upload" => {
            let source = PathBuf::from(sub.get_one::<String>("source").unwrap());
            let destination = sub.get_one::<String>("destination").unwrap();
            cli::upload(&osf, &project_id, &source, destination)
        }
        "remove" => {
            let target = sub.get_one::<String>("target").unwrap();
            cli::remove(&osf, &project_id, target)
        }
        _ => unreachable!("unknown subcommand {name}"),
    }
}
