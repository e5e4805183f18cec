// server/src/cli/commands.rs

// Command-line arguments and subcommands for the MediVerse CLI.
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use mediverse_models::{RegistrationInput, Role};

/// MediVerse patient and doctor command line client
#[derive(Parser, Debug)]
#[clap(author, version, about = "MediVerse patient and doctor command line client", long_about = None)]
#[clap(propagate_version = true)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./mediverse.toml when present)
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,
    /// Base URL of the MediVerse API, e.g. http://127.0.0.1:5000/api
    #[clap(long, global = true, env = "MEDIVERSE_API_URL")]
    pub api_url: Option<String>,
    /// Directory holding the local session store
    #[clap(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Sign in and save the session
    Login {
        #[clap(long, default_value = "patient")]
        role: Role,
        #[clap(long)]
        username: String,
        #[clap(long)]
        password: String,
    },
    /// Create an account; sign in afterwards with `login`
    Register(RegisterArgs),
    /// Forget the saved session
    Logout,
    /// Show the dashboard for the signed-in user
    Whoami,
    /// Mark today's dose and extend the daily streak
    Streak {
        /// Day to mark instead of today (YYYY-MM-DD)
        #[clap(long)]
        date: Option<NaiveDate>,
    },
    /// Manage the family emergency circle
    Family(FamilyCommandWrapper),
    /// Request an ambulance to the current position
    Sos {
        #[clap(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[clap(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
        /// Skip the confirmation prompt
        #[clap(long, short = 'y')]
        yes: bool,
    },
    /// Inspect or dismiss the active emergency
    Emergency(EmergencyCommandWrapper),
}

#[derive(Debug, Args, PartialEq)]
pub struct RegisterArgs {
    #[clap(long, default_value = "patient")]
    pub role: Role,
    #[clap(long)]
    pub name: String,
    #[clap(long, default_value = "")]
    pub email: String,
    #[clap(long)]
    pub age: Option<u32>,
    #[clap(long, default_value = "")]
    pub phone: String,
    #[clap(long, default_value = "")]
    pub address: String,
    #[clap(long)]
    pub username: String,
    #[clap(long)]
    pub password: String,
    /// Doctors only
    #[clap(long, default_value = "")]
    pub department: String,
    /// Doctors only
    #[clap(long, default_value = "")]
    pub hospital_name: String,
}

impl RegisterArgs {
    pub fn to_input(&self) -> RegistrationInput {
        RegistrationInput {
            name: self.name.clone(),
            email: self.email.clone(),
            age: self.age,
            phone: self.phone.clone(),
            address: self.address.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            department: self.department.clone(),
            hospital_name: self.hospital_name.clone(),
        }
    }
}

#[derive(Debug, Args, PartialEq)]
pub struct FamilyCommandWrapper {
    #[clap(subcommand)]
    pub command: FamilyCommand,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum FamilyCommand {
    Add {
        #[clap(long)]
        name: String,
        #[clap(long)]
        phone: String,
    },
    List,
    Remove {
        #[clap(long)]
        name: String,
    },
}

#[derive(Debug, Args, PartialEq)]
pub struct EmergencyCommandWrapper {
    #[clap(subcommand)]
    pub command: EmergencyCommand,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum EmergencyCommand {
    /// Show the cached dispatch, if any
    Status,
    /// Dismiss tracking; the dispatch itself is not cancelled
    Clear,
}
