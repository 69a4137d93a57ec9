// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::settings::Settings;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod guest_list;
mod schema;

#[derive(Parser, Debug, Clone)]
#[clap(name = "hitched-controller", version)]
pub struct Args {
    #[clap(
        short,
        long,
        default_value = "config.toml",
        help = "Specify path to configuration file"
    )]
    pub config: PathBuf,

    #[clap(subcommand)]
    cmd: Option<SubCommand>,
}

#[derive(Subcommand, Debug, Clone)]
#[clap(rename_all = "kebab_case")]
enum SubCommand {
    /// Inspect the invitations of the guest sheet
    #[clap(subcommand)]
    Invitations(guest_list::Command),
    /// Print the active column schema
    Schema,
}

impl Args {
    /// Returns true if we want to startup the controller after we finished the cli part
    pub fn controller_should_start(&self) -> bool {
        self.cmd.is_none()
    }
}

/// Parses the CLI-Arguments into [`Args`]
///
/// Also runs (optional) cli commands if necessary
pub async fn parse_args() -> Result<Args> {
    let args = Args::parse();

    if let Some(sub_command) = args.cmd.clone() {
        let settings = Settings::load(&args.config)
            .with_context(|| format!("Failed to load settings from {:?}", args.config))?;

        match sub_command {
            SubCommand::Invitations(command) => {
                guest_list::handle_command(settings, command).await?;
            }
            SubCommand::Schema => schema::print_schema(&settings)?,
        }
    }

    Ok(args)
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn subcommands() {
        let args = Args::parse_from(["hitched-controller"]);
        assert!(args.controller_should_start());
        assert_eq!(args.config, PathBuf::from("config.toml"));

        let args = Args::parse_from([
            "hitched-controller",
            "--config",
            "/etc/hitched.toml",
            "invitations",
            "show",
            "ab12",
        ]);
        assert!(!args.controller_should_start());
        assert!(matches!(
            args.cmd,
            Some(SubCommand::Invitations(guest_list::Command::Show { code })) if code == "ab12"
        ));
    }
}
