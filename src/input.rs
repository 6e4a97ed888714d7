/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use rpassword::read_password;
use std::io::{self, BufRead, IsTerminal, Write};

fn read_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut inp = String::new();
    if io::stdin().lock().read_line(&mut inp)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no more input"));
    }

    Ok(inp.trim().to_string())
}

pub fn is_interactive() -> bool {
    io::stdin().is_terminal()
}

/// Asks until a non-empty answer is given.
pub fn ask_for_input(prompt: &str) -> io::Result<String> {
    loop {
        let inp = read_line(&format!("{}: ", prompt))?;

        if !inp.is_empty() {
            return Ok(inp);
        }

        if !is_interactive() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("{} cannot be empty.", prompt),
            ));
        }

        eprintln!("{} cannot be empty.", prompt);
    }
}

/// Empty answers keep `default`.
pub fn ask_with_default(prompt: &str, default: &str) -> io::Result<String> {
    let inp = if default.is_empty() {
        read_line(&format!("{}: ", prompt))?
    } else {
        read_line(&format!("{} [{}]: ", prompt, default))?
    };

    Ok(if inp.is_empty() {
        default.to_string()
    } else {
        inp
    })
}

pub fn ask_for_password() -> io::Result<String> {
    print!("Password: ");
    io::stdout().flush()?;

    if is_interactive() {
        read_password()
    } else {
        let mut inp = String::new();
        io::stdin().lock().read_line(&mut inp)?;
        Ok(inp.trim_end_matches(['\r', '\n']).to_string())
    }
}

pub fn ask_for_confirmation(prompt: &str) -> io::Result<bool> {
    let inp = read_line(&format!("{} [y/N]: ", prompt))?;
    Ok(matches!(inp.to_lowercase().as_str(), "y" | "yes"))
}

/// Numbered menu, returns the index of the chosen entry. An empty answer
/// keeps `current`.
pub fn ask_for_choice(
    prompt: &str,
    choices: &[String],
    current: Option<usize>,
) -> io::Result<Option<usize>> {
    for (i, choice) in choices.iter().enumerate() {
        println!("  {}) {}", i + 1, choice);
    }

    loop {
        let inp = match current {
            Some(index) => read_line(&format!("{} [{}]: ", prompt, index + 1))?,
            None => read_line(&format!("{}: ", prompt))?,
        };

        if inp.is_empty() {
            return Ok(current);
        }

        match inp.parse::<usize>() {
            Ok(n) if (1..=choices.len()).contains(&n) => return Ok(Some(n - 1)),
            _ if !is_interactive() => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("invalid choice: {}", inp),
                ));
            }
            _ => eprintln!("Enter a number between 1 and {}.", choices.len()),
        }
    }
}
