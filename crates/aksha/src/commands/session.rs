//! `aksha session`: foreground tracking plus an interactive prompt.

use std::time::Duration;

use chat_relay::Conversation;
use safety_api::{ApiClient, LocationPayload};
use safety_core::{maps_link, LocationAcquirer, LocationFix, LocationProvider};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::app::{find_contact, matching_contacts, App};
use crate::commands::{chat, directory, sos};
use crate::helplines::HELPLINES;
use crate::AppResult;

const HELP: &str = "Commands:
  sos                     text an alert to the selected contacts
  select <name|number>    add a contact to the SOS list (max 5)
  deselect <name|number>  remove a contact from the SOS list
  contacts                show contacts and the SOS list
  chat <message>          ask the safety assistant
  emergency <what>        step-by-step emergency guidance
  where                   show the last tracked location
  helplines               list helpline numbers
  tips [topic]            safety tips
  quit                    end the session";

/// A line typed at the session prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Sos,
    Select(String),
    Deselect(String),
    Contacts,
    Chat(String),
    Emergency(String),
    Where,
    Helplines,
    Tips(Option<String>),
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse a line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let argument = |what: &str| {
            if rest.is_empty() {
                Err(format!("usage: {} <{}>", word.to_lowercase(), what))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match word.to_lowercase().as_str() {
            "sos" => SessionCommand::Sos,
            "select" => SessionCommand::Select(argument("name")?),
            "deselect" => SessionCommand::Deselect(argument("name")?),
            "contacts" => SessionCommand::Contacts,
            "chat" => SessionCommand::Chat(argument("message")?),
            "emergency" => SessionCommand::Emergency(argument("situation")?),
            "where" => SessionCommand::Where,
            "helplines" => SessionCommand::Helplines,
            "tips" => SessionCommand::Tips(Some(rest.to_string()).filter(|t| !t.is_empty())),
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => return Err(format!("unknown command {:?}; type 'help'", other)),
        };
        Ok(Some(command))
    }
}

/// One tracking step: acquire a fix and upload it if it is fresh.
///
/// Fresh fixes land in the shared cache as a side effect of `acquire`.
pub async fn track_once<P: LocationProvider>(
    acquirer: &LocationAcquirer<P>,
    api: &ApiClient,
) -> LocationFix {
    let fix = acquirer.acquire().await;

    if let LocationFix::Fresh(sample) = &fix {
        if api.is_authenticated().await {
            match api.update_location(&LocationPayload::from(sample)).await {
                Ok(_) => debug!("Location uploaded"),
                Err(e) => warn!("Location upload failed: {}", e),
            }
        }
    } else {
        debug!("No fresh fix this round ({})", fix.label());
    }
    fix
}

fn spawn_tracking<P: LocationProvider + 'static>(
    acquirer: LocationAcquirer<P>,
    api: ApiClient,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            track_once(&acquirer, &api).await;
        }
    })
}

/// `aksha session`.
pub async fn run(app: &App) -> AppResult<()> {
    let contacts = app.alertable_contacts().await?;
    let mut selection = safety_core::ContactSelection::preselect(contacts.clone());
    let relay = app.relay(None)?;
    let mut conversation = Conversation::new();

    info!(
        every = ?app.config.tracking_interval,
        "Starting foreground location tracking"
    );
    let tracking = spawn_tracking(
        app.acquirer(),
        app.api.clone(),
        app.config.tracking_interval,
    );

    println!("Aksha session. {} contact(s) selected for SOS.", selection.len());
    println!("{}", HELP);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        let result = match command {
            SessionCommand::Quit => break,
            SessionCommand::Help => {
                println!("{}", HELP);
                Ok(())
            }
            SessionCommand::Sos => sos::send_sos(app, &selection, true).await,
            SessionCommand::Select(name) => {
                let mut matches = matching_contacts(&contacts, &name).peekable();
                if matches.peek().is_none() {
                    println!("No contact {:?} with a phone number", name);
                }
                // Same-name contacts: take the first one not yet selected.
                let candidate = matches.find(|c| !selection.contains(c));
                match candidate {
                    Some(contact) => match selection.select(contact.clone()) {
                        Ok(()) => println!(
                            "{} ({}) will get SOS alerts",
                            contact.display_name,
                            contact.primary_number().unwrap_or_default()
                        ),
                        Err(e) => println!("Cannot select {}: {}", contact.display_name, e),
                    },
                    None if find_contact(&contacts, &name).is_some() => {
                        println!("{:?} is already selected", name)
                    }
                    None => {}
                }
                Ok(())
            }
            SessionCommand::Deselect(name) => {
                let selected = matching_contacts(selection.contacts(), &name)
                    .next()
                    .cloned();
                match selected {
                    Some(contact) => {
                        selection.deselect(&contact);
                        println!(
                            "{} ({}) removed from SOS alerts",
                            contact.display_name,
                            contact.primary_number().unwrap_or_default()
                        );
                    }
                    None => println!("{:?} is not selected", name),
                }
                Ok(())
            }
            SessionCommand::Contacts => {
                for contact in &contacts {
                    let mark = if selection.contains(contact) {
                        "[x]"
                    } else {
                        "[ ]"
                    };
                    println!(
                        "{} {:<24} {}",
                        mark,
                        contact.display_name,
                        contact.primary_number().unwrap_or_default()
                    );
                }
                Ok(())
            }
            SessionCommand::Chat(message) => {
                chat::exchange(&relay, &mut conversation, &message).await
            }
            SessionCommand::Emergency(situation) => {
                let location = app
                    .cache
                    .get()
                    .await
                    .map(|s| maps_link(s.latitude, s.longitude));
                let reply = relay
                    .emergency_guidance(&situation, location.as_deref())
                    .await;
                chat::print_reply(&reply);
                Ok(())
            }
            SessionCommand::Where => {
                match app.cache.get().await {
                    Some(sample) => println!(
                        "{} at {}",
                        maps_link(sample.latitude, sample.longitude),
                        sample.captured_at.format("%H:%M:%S UTC")
                    ),
                    None => println!("No location tracked yet"),
                }
                Ok(())
            }
            SessionCommand::Helplines => {
                for helpline in HELPLINES {
                    println!("{:<32} {}", helpline.name, helpline.number);
                }
                Ok(())
            }
            SessionCommand::Tips(topic) => directory::tips(topic.as_deref()),
        };

        if let Err(e) = result {
            println!("Error: {}", e);
        }
    }

    tracking.abort();
    info!("Session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use device_sensors::FixedLocationProvider;
    use safety_api::{ApiConfig, MemoryStore};
    use safety_core::LastKnownCache;

    #[test]
    fn test_parse_commands() {
        assert_eq!(SessionCommand::parse("  "), Ok(None));
        assert_eq!(SessionCommand::parse("SOS"), Ok(Some(SessionCommand::Sos)));
        assert_eq!(
            SessionCommand::parse("select  Mom "),
            Ok(Some(SessionCommand::Select("Mom".to_string())))
        );
        assert_eq!(
            SessionCommand::parse("chat is the metro safe at night?"),
            Ok(Some(SessionCommand::Chat(
                "is the metro safe at night?".to_string()
            )))
        );
        assert_eq!(SessionCommand::parse("exit"), Ok(Some(SessionCommand::Quit)));
        assert_eq!(
            SessionCommand::parse("tips"),
            Ok(Some(SessionCommand::Tips(None)))
        );
        assert_eq!(
            SessionCommand::parse("tips party"),
            Ok(Some(SessionCommand::Tips(Some("party".to_string()))))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            SessionCommand::parse("select"),
            Err("usage: select <name>".to_string())
        );
        assert!(SessionCommand::parse("dance").unwrap_err().contains("unknown command"));
    }

    #[tokio::test]
    async fn test_track_once_caches_fresh_fix_when_signed_out() {
        let cache = LastKnownCache::new();
        let acquirer = LocationAcquirer::new(
            FixedLocationProvider::new(12.0, 77.0).unwrap(),
            cache.clone(),
        );
        // Nothing listens here; signed out, so no upload is attempted.
        let api = ApiClient::new(
            ApiConfig::builder().base_url("http://127.0.0.1:9").build(),
            Arc::new(MemoryStore::new()),
        )
        .unwrap();

        let fix = track_once(&acquirer, &api).await;
        assert!(matches!(fix, LocationFix::Fresh(_)));
        assert_eq!(cache.get().await.unwrap().latitude, 12.0);
    }
}
