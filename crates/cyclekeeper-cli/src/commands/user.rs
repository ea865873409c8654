use clap::Subcommand;
use cyclekeeper_core::{data_dir, Config, CredentialStore};

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a user (plaintext storage; not secure)
    Register { username: String, password: String },
    /// Check a username and password
    Login { username: String, password: String },
}

fn open_store() -> Result<CredentialStore, Box<dyn std::error::Error>> {
    let dir = data_dir()?;
    let config = Config::load()?;
    Ok(CredentialStore::load(config.credentials_path(&dir))?)
}

pub fn run(action: UserAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        UserAction::Register { username, password } => {
            store.register(&username, &password)?;
            eprintln!(
                "warning: passwords are stored in plaintext at {}",
                store.path().display()
            );
            println!("You can now log in with your credentials.");
        }
        UserAction::Login { username, password } => {
            store.verify(&username, &password)?;
            println!("Welcome to the Menstrual Tracker!");
        }
    }
    Ok(())
}
