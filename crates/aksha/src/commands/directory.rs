//! `contacts`, `helplines` and `tips`.

use safety_core::MAX_SELECTED_CONTACTS;
use sms_dispatch::LinkOpener;

use crate::app::App;
use crate::helplines::{self, HELPLINES};
use crate::safety_tips::{self, SAFETY_TOPICS};
use crate::AppResult;

/// `aksha contacts`.
pub async fn contacts(app: &App, all: bool) -> AppResult<()> {
    let contacts = if all {
        app.contacts.load().await?
    } else {
        app.alertable_contacts().await?
    };

    if contacts.is_empty() {
        println!("No contacts in {}", app.contacts.path().display());
        return Ok(());
    }
    for contact in &contacts {
        println!(
            "{:<24} {}",
            contact.display_name,
            contact.primary_number().unwrap_or("(no phone number)")
        );
    }
    if !all {
        println!(
            "\nSOS alerts go to up to {} of these; pick them with `aksha sos --to <name>`.",
            MAX_SELECTED_CONTACTS
        );
    }
    Ok(())
}

/// `aksha helplines [--call <number or name>]`.
pub async fn helplines(app: &App, call: Option<&str>) -> AppResult<()> {
    let Some(query) = call else {
        for helpline in HELPLINES {
            println!(
                "{:<32} {:<6} {}",
                helpline.name, helpline.number, helpline.description
            );
        }
        return Ok(());
    };

    let helpline =
        helplines::find(query).ok_or_else(|| format!("No helpline matches {:?}", query))?;
    app.opener().open(&helpline.tel_link()).await?;
    println!("Calling {} ({})", helpline.name, helpline.number);
    Ok(())
}

/// Topic list, one line each.
pub fn print_topics() {
    for topic in SAFETY_TOPICS {
        println!("{:<12} {:<26} {}", topic.slug, topic.title, topic.description);
    }
}

/// `aksha tips [topic]`.
pub fn tips(topic: Option<&str>) -> AppResult<()> {
    let Some(query) = topic else {
        print_topics();
        return Ok(());
    };

    let topic = safety_tips::find(query).ok_or_else(|| {
        format!(
            "No safety topic matches {:?}; try one of: {}",
            query,
            SAFETY_TOPICS
                .iter()
                .map(|t| t.slug)
                .collect::<Vec<_>>()
                .join(", ")
        )
    })?;
    println!("{}", topic.render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tips_topic_lookup() {
        assert!(tips(None).is_ok());
        assert!(tips(Some("Party Safety")).is_ok());

        let err = tips(Some("cooking")).unwrap_err().to_string();
        assert!(err.contains("followed, domestic, transport"));
    }
}
