//! Interactive terminal session.
//!
//! The only in-scope writer: a line-oriented loop mapping menu choices to
//! the identity and institution services. Domain errors print and drop
//! back to the top menu; the loop ends on the explicit exit choice or on
//! end-of-input. The loop runs over generic handles so tests can script
//! it; the binary wires it to stdin/stdout.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::error::Error;
use crate::identity::{Role, User, UserRepository, UserService};
use crate::institution::{BankRepository, BankService};
use crate::store::FileStore;

/// Open the store at `db_path` and run the loop on stdin/stdout.
///
/// Failing to open the store is the only fatal path out of here.
pub fn execute(db_path: &Path) -> Result<()> {
    let store = Arc::new(
        FileStore::open(db_path)
            .with_context(|| format!("failed to open database at {}", db_path.display()))?,
    );

    let users = UserService::new(UserRepository::new(Arc::clone(&store)));
    let banks = BankService::new(BankRepository::new(Arc::clone(&store)));

    let stdin = io::stdin();
    run(&mut stdin.lock(), &mut io::stdout(), &users, &banks)
}

/// Drive the menu loop over arbitrary line-oriented handles.
pub fn run<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    users: &UserService,
    banks: &BankService,
) -> Result<()> {
    writeln!(output, "Welcome to Teller!")?;

    loop {
        show_login_menu(output)?;
        let Some(choice) = read_line(input, output, "Choose: ")? else {
            break;
        };

        match choice.as_str() {
            "0" => {
                writeln!(output, "\n👋 Exiting. Goodbye!")?;
                break;
            }
            "1" => {
                writeln!(output, "\n🔓 Login")?;
                login_flow(input, output, users, banks)?;
            }
            "2" => {
                writeln!(output, "\n🔑 Register New User")?;
                register_flow(input, output, users)?;
            }
            _ => writeln!(
                output,
                "{}",
                "❌ Invalid choice. Please select a valid option.".red()
            )?,
        }
    }

    Ok(())
}

fn show_login_menu<W: Write>(output: &mut W) -> Result<()> {
    writeln!(output, "\n======= Login Menu =======")?;
    writeln!(output)?;
    writeln!(output, "1. Login")?;
    writeln!(output, "2. Register")?;
    writeln!(output, "0. Exit")?;
    writeln!(output)?;
    writeln!(output, "==========================")?;
    Ok(())
}

fn register_flow<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    users: &UserService,
) -> Result<()> {
    let Some(username) = read_line(input, output, "Enter username: ")? else {
        return Ok(());
    };
    let Some(password) = read_line(input, output, "Enter password: ")? else {
        return Ok(());
    };
    let Some(role) = read_line(input, output, "Enter role [bank/customer]: ")? else {
        return Ok(());
    };

    match users.register(&username, &password, &role) {
        Ok(user) => writeln!(
            output,
            "✓ Registered '{}' with role: {}",
            user.username, user.role
        )?,
        Err(err) => writeln!(output, "{}", format!("❌ Registration failed: {err}").red())?,
    }
    Ok(())
}

fn login_flow<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    users: &UserService,
    banks: &BankService,
) -> Result<()> {
    let Some(username) = read_line(input, output, "Enter username: ")? else {
        return Ok(());
    };
    let Some(password) = read_line(input, output, "Enter password: ")? else {
        return Ok(());
    };

    let user = match users.login(&username, &password) {
        Ok(user) => user,
        Err(Error::InvalidCredentials) => {
            writeln!(output, "{}", "❌ Login failed. Please try again.".red())?;
            return Ok(());
        }
        Err(err) => {
            writeln!(output, "{}", format!("❌ {err}").red())?;
            return Ok(());
        }
    };

    writeln!(output, "Welcome {}", user.username)?;

    match user.role {
        Role::Bank => bank_operator_flow(input, output, banks, &user)?,
        Role::Customer => writeln!(output, "🙋 You are logged in as a customer!")?,
    }
    Ok(())
}

/// Greet a returning operator, or register their institution on first
/// login. A rejected name surfaces once; there is no retry.
fn bank_operator_flow<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    banks: &BankService,
    user: &User,
) -> Result<()> {
    match banks.get_by_owner(user.id) {
        Ok(bank) => writeln!(output, "🏦 Welcome back, {}!", bank.name)?,
        Err(err) if err.is_not_found() => {
            let Some(name) = read_line(input, output, "Enter bank name: ")? else {
                return Ok(());
            };
            match banks.create_bank(user.id, &name) {
                Ok(bank) => {
                    writeln!(output, "✓ Bank created successfully!")?;
                    writeln!(output, "  ID: {}, Name: {}", bank.id, bank.name)?;
                }
                Err(err) => {
                    writeln!(output, "{}", format!("❌ Could not create bank: {err}").red())?
                }
            }
        }
        Err(err) => writeln!(output, "{}", format!("❌ {err}").red())?,
    }
    Ok(())
}

/// Prompt and read one trimmed line. `None` means end-of-input.
fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Option<String>> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
