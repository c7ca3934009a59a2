//! `sos` and `end-sos`.

use safety_api::LocationPayload;
use safety_core::{ContactSelection, LocationFix, SosError};
use tracing::warn;

use crate::app::App;
use crate::AppResult;

/// Text an alert to `selection` and, when signed in, flag it on the backend.
pub async fn send_sos(
    app: &App,
    selection: &ContactSelection,
    notify_server: bool,
) -> AppResult<()> {
    let report = match app.sos_flow().trigger(selection).await {
        Ok(report) => report,
        Err(SosError::NoContacts) => {
            println!(
                "No emergency contacts with a phone number. Add contacts to {} or call 112 directly.",
                app.contacts.path().display()
            );
            return Ok(());
        }
        Err(SosError::Dispatch(e)) => {
            println!("Could not open the messaging app: {}", e);
            println!("Call 112 directly.");
            return Err(e.into());
        }
    };

    match &report.location {
        LocationFix::Fresh(_) => println!("Location: current fix"),
        LocationFix::Cached(sample) => println!(
            "Location: last known fix from {}",
            sample.captured_at.format("%H:%M:%S UTC")
        ),
        LocationFix::Unavailable => println!("Location: unavailable, contacts are asked to call"),
    }
    println!(
        "SOS message prepared for {} contact(s). Press send in your messaging app.",
        report.receipt.recipient_count
    );
    println!();
    println!("{}", report.alert.body);

    if notify_server {
        flag_on_server(app, &report.location).await;
    }
    Ok(())
}

/// Best effort: the text alert has already gone out.
async fn flag_on_server(app: &App, fix: &LocationFix) {
    if !app.api.is_authenticated().await {
        return;
    }
    let Some(sample) = fix.sample() else {
        warn!("Not flagging SOS on backend without a location");
        return;
    };

    match app.api.trigger_sos(&LocationPayload::from(sample)).await {
        Ok(ack) => println!("Backend notified: {}", ack.message),
        Err(e) => warn!("Could not flag SOS on backend: {}", e),
    }
}

/// `aksha sos`.
pub async fn run(app: &App, to: &[String], no_server: bool) -> AppResult<()> {
    let selection = app.selection(to).await?;
    send_sos(app, &selection, !no_server).await
}

/// `aksha end-sos`.
pub async fn end(app: &App) -> AppResult<()> {
    let ack = app.api.end_sos().await?;
    if ack.message.is_empty() {
        println!("SOS ended");
    } else {
        println!("{}", ack.message);
    }
    Ok(())
}
