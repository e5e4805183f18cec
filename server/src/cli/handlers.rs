// server/src/cli/handlers.rs

// One handler per subcommand. Handlers print user-facing output and return
// errors for `main` to report.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use colored::Colorize;
use log::info;

use mediverse::emergency::{FixedPosition, NoPosition};
use mediverse::{
    mark_todays_dose, AuthService, EmergencyDispatcher, FamilyCircle, Geolocator, MediverseError, StreakTracker,
};
use mediverse_models::{Credentials, FamilyContact, GeoPoint, Role};

use crate::cli::cli::CliContext;
use crate::cli::commands::{EmergencyCommand, FamilyCommand, RegisterArgs};
use crate::cli::dashboard::{print_dashboard, print_family, print_tracking};

pub async fn handle_login(ctx: &CliContext, role: Role, username: String, password: String) -> Result<()> {
    let auth = AuthService::new(&ctx.client, &ctx.store);
    let user = auth.login(role, &Credentials::new(username, password)).await?;
    println!("{} {} ({})", "Logged in as".green(), user.name.bold(), role);
    show_dashboard(ctx)
}

pub async fn handle_register(ctx: &CliContext, args: &RegisterArgs) -> Result<()> {
    let auth = AuthService::new(&ctx.client, &ctx.store);
    auth.register(args.role, &args.to_input()).await?;
    println!(
        "{} Sign in with `mediverse-cli login --role {} --username {}`.",
        "Registration successful.".green(),
        args.role,
        args.username
    );
    Ok(())
}

pub fn handle_logout(ctx: &CliContext) -> Result<()> {
    let auth = AuthService::new(&ctx.client, &ctx.store);
    if auth.logout()? {
        println!("Logged out.");
    } else {
        println!("No saved session.");
    }
    Ok(())
}

pub fn handle_whoami(ctx: &CliContext) -> Result<()> {
    show_dashboard(ctx)
}

fn show_dashboard(ctx: &CliContext) -> Result<()> {
    let Some(user) = ctx.store.load_user()? else {
        println!("Not logged in. Use `mediverse-cli login` or `mediverse-cli register`.");
        return Ok(());
    };
    let streak = StreakTracker::new(&ctx.store).state(&user)?.count;
    let family = FamilyCircle::new(&ctx.store).contacts()?;
    let active = ctx.store.load_emergency()?;
    print_dashboard(&user, streak, &family, active.as_ref());
    Ok(())
}

pub async fn handle_streak(ctx: &CliContext, date: Option<NaiveDate>) -> Result<()> {
    let today = date.unwrap_or_else(|| Local::now().date_naive());
    let outcome = mark_todays_dose(&ctx.client, &ctx.store, today).await?;
    let count = outcome.update.count();
    if !outcome.update.changed() {
        println!("Already marked for {}. Streak: {} day(s).", today, count);
        return Ok(());
    }
    println!("{} Streak: {} day(s).", "Dose marked.".green(), count.to_string().bold());
    if !outcome.mirrored {
        println!("{}", "Saved locally; the server copy will catch up on the next update.".yellow());
    }
    Ok(())
}

pub fn handle_family(ctx: &CliContext, command: FamilyCommand) -> Result<()> {
    let circle = FamilyCircle::new(&ctx.store);
    match command {
        FamilyCommand::Add { name, phone } => {
            let replaced = circle.add(FamilyContact::new(name.clone(), phone))?;
            if replaced {
                println!("Updated {}.", name);
            } else {
                println!("Added {} to the family circle.", name);
            }
        }
        FamilyCommand::List => print_family(&circle.contacts()?),
        FamilyCommand::Remove { name } => {
            if !circle.remove(&name)? {
                return Err(anyhow!("No family contact named '{}'", name));
            }
            println!("Removed {}.", name);
        }
    }
    Ok(())
}

/// Asks a yes/no question on `input`; anything but `y`/`yes` declines.
pub fn confirm(question: &str, input: &mut dyn BufRead) -> io::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub async fn handle_sos(
    ctx: &CliContext,
    position: Option<(f64, f64)>,
    yes: bool,
    input: &mut dyn BufRead,
) -> Result<()> {
    if FamilyCircle::new(&ctx.store).is_empty()? {
        return Err(MediverseError::NoFamilyContact.into());
    }
    if !yes && !confirm("Request an ambulance now?", input)? {
        println!("Cancelled.");
        return Ok(());
    }

    // Without --lat/--lng there is no position source and the configured
    // fallback coordinate is sent.
    let fixed;
    let geolocator: &dyn Geolocator = match position {
        Some((lat, lng)) => {
            fixed = FixedPosition(GeoPoint::new(lat, lng));
            &fixed
        }
        None => &NoPosition,
    };

    let dispatcher = EmergencyDispatcher::new(&ctx.client, &ctx.store, geolocator).with_config(&ctx.config.emergency);
    let outcome = dispatcher.dispatch_for_session().await?;
    info!("Dispatch confirmed by {}", outcome.result.hospital.name);

    println!("{}", "Ambulance dispatched".red().bold());
    if outcome.used_fallback {
        println!("  Location:  {} {}", outcome.location, "(approximate, position unavailable)".yellow());
    } else {
        println!("  Location:  {}", outcome.location);
    }
    print_tracking(&outcome.result);
    Ok(())
}

pub fn handle_emergency(ctx: &CliContext, command: EmergencyCommand) -> Result<()> {
    match command {
        EmergencyCommand::Status => match ctx.store.load_emergency()? {
            Some(result) => {
                println!("{}", "Emergency in progress".red().bold());
                print_tracking(&result);
            }
            None => println!("No active emergency."),
        },
        EmergencyCommand::Clear => {
            if ctx.store.clear_emergency()? {
                println!("Tracking dismissed.");
            } else {
                println!("No active emergency.");
            }
        }
    }
    Ok(())
}
