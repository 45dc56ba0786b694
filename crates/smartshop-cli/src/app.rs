//! Command handlers for the SmartShop CLI.
//!
//! `App` wires the config, credential store, API client and repositories
//! together, prompts for input and renders results as plain text.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, warn};

use smartshop_core::models::UserData;
use smartshop_core::utils::{format_optional, format_phone};
use smartshop_core::{
    ApiClient, AuthFlow, AuthRepository, AuthState, Config, CredentialReader, CredentialStore,
    UserRepository,
};

/// Maximum length for email input.
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

pub struct App {
    config: Config,
    credentials: Arc<dyn CredentialStore>,
    flow: AuthFlow,
    users: UserRepository,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };
        debug!(api = %config.api_base_url, backend = ?config.credential_backend, "Config loaded");

        let credentials = config
            .credential_store()
            .context("Failed to open credential store")?;
        let api = ApiClient::new(&config, CredentialReader::new(credentials.clone()))
            .context("Failed to create API client")?;

        Ok(Self {
            flow: AuthFlow::new(AuthRepository::new(api.clone(), credentials.clone())),
            users: UserRepository::new(api),
            credentials,
            config,
        })
    }

    // =========================================================================
    // Commands
    // =========================================================================

    pub async fn login(&mut self, email: Option<String>) -> Result<()> {
        println!("\n=== SmartShop Login ===\n");

        let email = choose_email(email, self.config.last_email.as_deref(), prompt)?;
        let password = prompt_password("Password: ")?;
        check_lengths(&email, &password)?;

        println!("\nSigning in...");
        match self.flow.login(&email, &password).await {
            AuthState::Success => {
                self.config.last_email = Some(email.trim().to_string());
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
                println!("Login successful!\n");
                Ok(())
            }
            state => Self::fail(&self.flow, state),
        }
    }

    pub async fn register(&mut self) -> Result<()> {
        println!("\n=== SmartShop Registration ===\n");

        let username = prompt("Username: ")?;
        let email = prompt("Email: ")?;
        let password = prompt_password("Password: ")?;
        check_lengths(&email, &password)?;
        let gender = loop {
            match prompt("Gender [m/f]: ")?.to_lowercase().as_str() {
                "m" | "male" => break true,
                "f" | "female" => break false,
                _ => println!("Please enter m or f"),
            }
        };

        println!("\nCreating account...");
        match self.flow.register(&username, &email, &password, gender).await {
            AuthState::Success => {
                self.flow.reset();
                println!("Registration successful! You can now log in.\n");
                Ok(())
            }
            state => Self::fail(&self.flow, state),
        }
    }

    pub async fn show_profile(&self) -> Result<()> {
        if self.credentials.token().is_none() {
            anyhow::bail!("Not signed in. Run `smartshop login` first.");
        }

        let response = match self.users.current_user().await {
            Ok(response) => response,
            Err(e) if e.is_unauthorized() => {
                anyhow::bail!("Session expired. Run `smartshop login` again.")
            }
            Err(e) => return Err(e.into()),
        };

        match response.data() {
            Some(user) => print_profile(user),
            None => println!("No profile data returned."),
        }
        Ok(())
    }

    pub fn show_status(&self) {
        println!("API: {}", self.config.api_base_url);
        match self.credentials.get() {
            Some(credential) => {
                let minutes = (Utc::now() - credential.saved_at).num_minutes().max(0);
                println!(
                    "Signed in (token saved {}m ago{})",
                    minutes,
                    if credential.refresh_token.is_some() {
                        ", refresh token available"
                    } else {
                        ""
                    }
                );
            }
            None => println!("Not signed in"),
        }
    }

    /// Put the form back to idle and hand the error message to main
    fn fail(flow: &AuthFlow, state: AuthState) -> Result<()> {
        let message = state
            .error_message()
            .unwrap_or("Unknown error")
            .to_string();
        flow.reset();
        Err(anyhow::anyhow!(message))
    }
}

/// An email given on the command line is used as is. Otherwise ask, offering
/// the last email used as the default.
fn choose_email(
    given: Option<String>,
    last_email: Option<&str>,
    ask: impl FnOnce(&str) -> Result<String>,
) -> Result<String> {
    if let Some(email) = given {
        println!("Email: {}", email);
        return Ok(email);
    }
    match last_email {
        Some(last) => {
            let input = ask(&format!("Email [{}]: ", last))?;
            Ok(if input.is_empty() { last.to_string() } else { input })
        }
        None => ask("Email: "),
    }
}

fn print_profile(user: &UserData) {
    println!("Username: {}", user.username);
    println!("Email:    {}", user.email);
    println!(
        "Phone:    {}",
        user.phone_number
            .as_deref()
            .map(format_phone)
            .unwrap_or_else(|| "-".to_string())
    );
    println!("Address:  {}", format_optional(&user.address, "-"));
    println!("Role:     {}", user.role_display());
    println!("Member since {}", user.member_since());
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn prompt_password(label: &str) -> Result<String> {
    let password = rpassword::prompt_password(label)?;
    Ok(password)
}

fn check_lengths(email: &str, password: &str) -> Result<()> {
    if email.chars().count() > MAX_EMAIL_LENGTH {
        anyhow::bail!("Email must be at most {} characters", MAX_EMAIL_LENGTH);
    }
    if password.chars().count() > MAX_PASSWORD_LENGTH {
        anyhow::bail!("Password must be at most {} characters", MAX_PASSWORD_LENGTH);
    }
    Ok(())
}
