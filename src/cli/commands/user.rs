//! Account command handlers

use crate::config::Config;

use super::{open_users, prompt_password};

pub fn cmd_register(config: &Config, username: &str, email: &str) -> anyhow::Result<()> {
    let mut users = open_users(config);

    let password = prompt_password("Password: ")?;
    let confirm = prompt_password("Confirm password: ")?;

    match users.register(username.trim(), &password, &confirm, email.trim()) {
        Ok(user) => println!("✓ Registered {} (ID: {})", user.username, user.id),
        Err(e) => println!("✗ {e}"),
    }

    Ok(())
}

pub fn cmd_passwd(config: &Config, username: &str) -> anyhow::Result<()> {
    let mut users = open_users(config);

    let current = prompt_password("Current password: ")?;
    if let Err(e) = users.login(username, &current) {
        println!("✗ {e}");
        return Ok(());
    }

    let new_password = prompt_password("New password: ")?;
    let confirm = prompt_password("Confirm new password: ")?;

    match users.change_password(&current, &new_password, &confirm) {
        Ok(()) => println!("✓ Password changed"),
        Err(e) => println!("✗ {e}"),
    }

    users.logout().ok();
    Ok(())
}
