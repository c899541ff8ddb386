//! Command line front end. Each sub-command maps to one screen of the roster
//! workflow: log in, manage teams and players, bulk import, export.

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

use crate::api::ApiClient;
use crate::bulk::{BulkImportResult, BulkImporter, parse_players, parse_players_with_jersey};
use crate::export;
use crate::models::{
    CreatePlayerInput, CreateTeamInput, Player, PlayerQuery, Team, UpdatePlayerInput,
    UpdateTeamInput, paginate,
};

#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(about = "Manage league teams and player rosters", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        username: String,

        /// Falls back to the ROSTER_PASSWORD environment variable
        #[arg(long, env = "ROSTER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create a new account
    Register {
        #[arg(long)]
        username: String,

        #[arg(long, env = "ROSTER_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged in user
    Whoami,

    /// Team management
    #[command(subcommand)]
    Teams(TeamCommands),

    /// Player management
    #[command(subcommand)]
    Players(PlayerCommands),

    /// Bulk import players from text, one player per line
    Import {
        /// Read from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,

        /// Treat a leading number on a line as the jersey number
        #[arg(long, default_value = "false")]
        jersey: bool,

        /// Parse and print, do not create anything
        #[arg(long, default_value = "false")]
        dry_run: bool,
    },

    /// Export rosters to PDF
    #[command(subcommand)]
    Export(ExportCommands),
}

#[derive(Debug, Subcommand)]
pub enum TeamCommands {
    List,
    /// Show a team and a page of its roster
    Show {
        id: i64,

        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, default_value = "20")]
        per_page: u32,
    },
    Create(TeamArgs),
    Update {
        id: i64,

        #[command(flatten)]
        fields: TeamUpdateArgs,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct TeamArgs {
    #[arg(long)]
    pub name: String,

    /// Hex colour such as #1e90ff
    #[arg(long)]
    pub color: Option<String>,

    /// Logo URL
    #[arg(long)]
    pub logo: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Args)]
pub struct TeamUpdateArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub color: Option<String>,

    #[arg(long)]
    pub logo: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum PlayerCommands {
    /// Search players, one page at a time
    List {
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        team: Option<i64>,

        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, default_value = "20")]
        limit: u32,
    },
    /// Players not assigned to any team
    Global,
    Create {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "Player")]
        position: String,

        #[arg(long)]
        jersey: Option<i32>,

        #[arg(long)]
        team: Option<i64>,
    },
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        position: Option<String>,

        #[arg(long)]
        jersey: Option<i32>,
    },
    Delete {
        id: i64,
    },
    Assign {
        id: i64,
        team: i64,
    },
    /// Move a player back to the global pool
    Unassign {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum ExportCommands {
    Team {
        id: i64,

        #[arg(long)]
        out: Option<PathBuf>,
    },
    Global {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    League {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub async fn run(cli: Cli, client: &ApiClient) -> Result<()> {
    match cli.command {
        Commands::Login { username, password } => {
            let password = password.ok_or_else(|| {
                anyhow!("Password required: pass --password or set ROSTER_PASSWORD")
            })?;
            let response = client.login(&username, &password).await?;
            let name = response.user.map(|u| u.username).unwrap_or(username);
            println!("Logged in as {}", name);
        }
        Commands::Register {
            username,
            password,
            email,
        } => {
            let password = password.ok_or_else(|| {
                anyhow!("Password required: pass --password or set ROSTER_PASSWORD")
            })?;
            let response = client
                .register(&username, &password, email.as_deref())
                .await?;
            println!(
                "{}",
                response
                    .message
                    .unwrap_or_else(|| format!("Registered {}", username))
            );
        }
        Commands::Logout => {
            client.logout()?;
            println!("Logged out");
        }
        Commands::Whoami => {
            let user = client.me().await?;
            println!("{} (id {})", user.username, user.id);
        }
        Commands::Teams(command) => run_teams(command, client).await?,
        Commands::Players(command) => run_players(command, client).await?,
        Commands::Import {
            file,
            jersey,
            dry_run,
        } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            run_import(&text, jersey, dry_run, client).await?;
        }
        Commands::Export(command) => run_export(command, client).await?,
    }

    Ok(())
}

async fn run_teams(command: TeamCommands, client: &ApiClient) -> Result<()> {
    match command {
        TeamCommands::List => {
            let teams = client.list_teams().await?;
            print!("{}", format_teams(&teams));
        }
        TeamCommands::Show { id, page, per_page } => {
            let team = client.get_team(id).await?;
            let players = client.team_players(id).await?;
            let page = paginate(&players, page, per_page);

            println!("{} (id {})", team.team_name, team.id);
            if let Some(description) = &team.description {
                println!("{}", description);
            }
            print!("{}", format_players(&page.data));
            println!(
                "Page {} of {} ({} players)",
                page.page,
                page.total_pages().max(1),
                page.total
            );
        }
        TeamCommands::Create(args) => {
            let input = CreateTeamInput {
                team_name: args.name,
                team_logo: args.logo,
                team_color: args.color,
                description: args.description,
            };
            let team = client.create_team(&input).await?;
            println!("Created team {} (id {})", team.team_name, team.id);
        }
        TeamCommands::Update { id, fields } => {
            let input = UpdateTeamInput {
                team_name: fields.name,
                team_logo: fields.logo,
                team_color: fields.color,
                description: fields.description,
            };
            let team = client.update_team(id, &input).await?;
            println!("Updated team {} (id {})", team.team_name, team.id);
        }
        TeamCommands::Delete { id } => {
            client.delete_team(id).await?;
            println!("Deleted team {}", id);
        }
    }
    Ok(())
}

async fn run_players(command: PlayerCommands, client: &ApiClient) -> Result<()> {
    match command {
        PlayerCommands::List {
            search,
            team,
            page,
            limit,
        } => {
            let query = PlayerQuery {
                search,
                team_id: team,
                page,
                limit,
            };
            let page = client.list_players(&query).await?;
            print!("{}", format_players(&page.data));
            println!(
                "Page {} of {} ({} players)",
                page.page,
                page.total_pages().max(1),
                page.total
            );
        }
        PlayerCommands::Global => {
            let players = client.global_players().await?;
            print!("{}", format_players(&players));
        }
        PlayerCommands::Create {
            name,
            position,
            jersey,
            team,
        } => {
            let input = CreatePlayerInput::new(name)
                .with_position(position)
                .with_jersey(jersey)
                .with_team(team);
            let player = client.create_player(&input).await?;
            println!("Created player {} (id {})", player.player_name, player.id);
        }
        PlayerCommands::Update {
            id,
            name,
            position,
            jersey,
        } => {
            let input = UpdatePlayerInput {
                player_name: name,
                position,
                jersey_number: jersey,
            };
            let player = client.update_player(id, &input).await?;
            println!("Updated player {} (id {})", player.player_name, player.id);
        }
        PlayerCommands::Delete { id } => {
            client.delete_player(id).await?;
            println!("Deleted player {}", id);
        }
        PlayerCommands::Assign { id, team } => {
            let player = client.assign_player(id, team).await?;
            println!("Assigned {} to team {}", player.player_name, team);
        }
        PlayerCommands::Unassign { id } => {
            let player = client.unassign_player(id).await?;
            println!("{} is now a global player", player.player_name);
        }
    }
    Ok(())
}

async fn run_import(text: &str, jersey: bool, dry_run: bool, client: &ApiClient) -> Result<()> {
    let records = if jersey {
        parse_players_with_jersey(text)
    } else {
        parse_players(text)
    };

    if records.is_empty() {
        println!("Nothing to import");
        return Ok(());
    }

    if dry_run {
        for record in &records {
            let jersey = record
                .jersey_number
                .map(|n| format!(" #{}", n))
                .unwrap_or_default();
            println!("{}{} - {}", record.name, jersey, record.position);
        }
        println!("{} players parsed", records.len());
        return Ok(());
    }

    let result = BulkImporter::new(client)
        .run_with_progress(&records, |p| {
            println!("[{}/{}] {}", p.current, p.total, p.player)
        })
        .await;
    print!("{}", format_import_result(&result));

    // Re-read the canonical state now that the batch is done.
    let global = client.global_players().await?;
    println!("{} global players on the server", global.len());
    Ok(())
}

async fn run_export(command: ExportCommands, client: &ApiClient) -> Result<()> {
    let export_dir = client.config().export_dir.clone();
    let (bytes, path) = match command {
        ExportCommands::Team { id, out } => {
            let team = client.get_team(id).await?;
            let players = client.team_players(id).await?;
            let path =
                out.unwrap_or_else(|| export_dir.join(export::team_file_name(&team.team_name)));
            (export::export_team_roster(&team, &players)?, path)
        }
        ExportCommands::Global { out } => {
            let players = client.global_players().await?;
            let path = out.unwrap_or_else(|| export_dir.join(export::GLOBAL_FILE_NAME));
            (export::export_global_players(&players)?, path)
        }
        ExportCommands::League { out } => {
            let rosters = client.league_rosters().await?;
            let path = out.unwrap_or_else(|| export_dir.join(export::LEAGUE_FILE_NAME));
            (export::export_league(&rosters)?, path)
        }
    };

    let written = export::write_pdf(&path, &bytes)?;
    println!("Saved {}", written.display());
    Ok(())
}

pub fn format_teams(teams: &[Team]) -> String {
    if teams.is_empty() {
        return "No teams\n".to_string();
    }
    let mut out = format!("{:>5}  {:<30} {:>7}  {}\n", "ID", "TEAM", "PLAYERS", "COLOR");
    for team in teams {
        out.push_str(&format!(
            "{:>5}  {:<30} {:>7}  {}\n",
            team.id,
            team.team_name,
            team.player_count,
            team.team_color.as_deref().unwrap_or("-")
        ));
    }
    out
}

pub fn format_players(players: &[Player]) -> String {
    if players.is_empty() {
        return "No players\n".to_string();
    }
    let mut out = format!(
        "{:>5}  {:<30} {:<20} {:>6}  {}\n",
        "ID", "NAME", "POSITION", "JERSEY", "TEAM"
    );
    for player in players {
        let team = match (&player.team_name, player.team_id) {
            (Some(name), _) => name.clone(),
            (None, Some(id)) => id.to_string(),
            (None, None) => "global".to_string(),
        };
        out.push_str(&format!(
            "{:>5}  {:<30} {:<20} {:>6}  {}\n",
            player.id,
            player.player_name,
            player.position,
            player.jersey_label(),
            team
        ));
    }
    out
}

pub fn format_import_result(result: &BulkImportResult) -> String {
    let mut out = format!("{}\n", result.summary());
    if !result.success.is_empty() {
        out.push_str("Imported:\n");
        for name in &result.success {
            out.push_str(&format!("  + {}\n", name));
        }
    }
    if !result.failed.is_empty() {
        out.push_str("Failed:\n");
        for failure in &result.failed {
            out.push_str(&format!("  - {}: {}\n", failure.name, failure.error));
        }
    }
    out
}
