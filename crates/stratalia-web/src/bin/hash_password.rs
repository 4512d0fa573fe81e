//! Prints an argon2 hash for an `[[auth.admins]]` entry.

use std::io::{self, Write};

use stratalia_core::validation::password_strength;
use stratalia_web::auth::password::hash_password;

fn main() -> anyhow::Result<()> {
    eprint!("Enter password: ");
    io::stderr().flush()?;

    let mut password = String::new();
    io::stdin().read_line(&mut password)?;
    let password = password.trim();

    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }

    let strength = password_strength(password);
    if !strength.is_valid {
        eprintln!("Warning: weak password ({}/5): {}", strength.score, strength.feedback.join(", "));
    }

    println!("{}", hash_password(password)?);
    Ok(())
}
