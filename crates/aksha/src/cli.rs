//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "aksha")]
#[command(about = "Personal safety companion: SOS texts, live location and a safety assistant")]
#[command(version)]
pub struct Cli {
    /// Use this latitude instead of gpsd
    #[arg(long, global = true, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Use this longitude instead of gpsd
    #[arg(long, global = true, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Contacts JSON file (overrides AKSHA_CONTACTS_FILE)
    #[arg(long, global = true)]
    pub contacts_file: Option<PathBuf>,

    /// SMS platform, android or ios (overrides AKSHA_SMS_PLATFORM)
    #[arg(long, global = true)]
    pub platform: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Text an emergency alert with your location to your contacts
    Sos {
        /// Contact to alert (repeatable, at most 5). Defaults to the first
        /// five contacts with a phone number.
        #[arg(long = "to")]
        to: Vec<String>,

        /// Do not flag the SOS on the backend
        #[arg(long)]
        no_server: bool,
    },

    /// Clear the SOS flag on the backend
    EndSos,

    /// Talk to the safety assistant (interactive without a message)
    Chat {
        /// Single message to send
        message: Option<String>,

        /// Backend model to request
        #[arg(long)]
        model: Option<String>,
    },

    /// Step-by-step guidance for an emergency situation
    Emergency {
        /// What is happening
        situation: String,

        /// Where you are, in words
        #[arg(long)]
        location: Option<String>,
    },

    /// List the assistant models the backend offers
    Models,

    /// Sign in with your identity-provider user ID
    Login {
        clerk_id: String,

        #[arg(long)]
        session_id: Option<String>,

        #[arg(long)]
        session_token: Option<String>,
    },

    /// Sign out and forget the stored token
    Logout,

    /// Show the signed-in user
    Whoami {
        /// Check the token with the backend instead of the local cache
        #[arg(long)]
        verify: bool,
    },

    /// Upload your current location once
    ShareLocation,

    /// Report your current location as unsafe
    ReportUnsafe {
        /// What makes it unsafe
        description: String,
    },

    /// List national helplines, or call one
    Helplines {
        /// Number or name of the helpline to call
        #[arg(long)]
        call: Option<String>,
    },

    /// Browse safety tips, optionally for one topic
    Tips {
        /// Topic name, e.g. followed, transport, party
        topic: Option<String>,
    },

    /// List contacts from the contacts file
    Contacts {
        /// Include contacts without a phone number
        #[arg(long)]
        all: bool,
    },

    /// Foreground session: track location and take commands on stdin
    Session,
}
