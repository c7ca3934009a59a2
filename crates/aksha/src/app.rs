//! Wiring of collaborators for one invocation.

use std::env;
use std::sync::Arc;

use chat_relay::{
    ApiChatBackend, ChatBackend, ChatError, ChatRelay, CompletionsBackend, CompletionsConfig,
};
use device_sensors::{JsonContactStore, SysfsBattery};
use safety_api::{ApiClient, ApiConfig, FileStore};
use safety_core::{
    Contact, ContactSelection, LastKnownCache, LocationAcquirer, LocationProvider, SosFlow,
};
use sms_dispatch::{SmsDispatcher, SystemOpener};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::location::HostLocation;
use crate::AppResult;

/// The SOS flow as wired on a Linux host.
pub type HostSosFlow = SosFlow<HostLocation, SysfsBattery, SmsDispatcher<SystemOpener>>;

/// Shared state for a command.
pub struct App {
    pub config: AppConfig,
    pub api: ApiClient,
    pub contacts: JsonContactStore,
    /// Last sample seen by tracking, shared with the SOS path.
    pub cache: LastKnownCache,
    location: HostLocation,
    completions: Option<CompletionsConfig>,
}

impl App {
    /// Build the collaborators. Nothing is contacted yet.
    pub fn new(config: AppConfig, location: HostLocation) -> AppResult<Self> {
        let store = Arc::new(FileStore::new(&config.state_dir));
        let api = ApiClient::new(ApiConfig::from_env()?, store)?;

        let completions = if env::var("AKSHA_COMPLETIONS_URL").is_ok() {
            Some(CompletionsConfig::from_env()?)
        } else {
            None
        };

        info!(
            location = location.name(),
            backend = %api.config().base_url,
            "Aksha ready"
        );

        Ok(Self {
            contacts: JsonContactStore::new(&config.contacts_file),
            config,
            api,
            cache: LastKnownCache::new(),
            location,
            completions,
        })
    }

    /// Location policy over the configured source and the shared cache.
    pub fn acquirer(&self) -> LocationAcquirer<HostLocation> {
        LocationAcquirer::with_timeout(
            self.location.clone(),
            self.cache.clone(),
            self.config.location_timeout,
        )
    }

    /// Opener for `sms:` and `tel:` URIs.
    pub fn opener(&self) -> SystemOpener {
        match &self.config.sms_opener {
            Some(program) => SystemOpener::with_program(program.as_str(), Vec::<String>::new()),
            None => SystemOpener::new(),
        }
    }

    /// The SOS flow: gpsd or fixed location, sysfs battery, `sms:` hand-off.
    pub fn sos_flow(&self) -> HostSosFlow {
        SosFlow::new(
            self.acquirer(),
            SysfsBattery::new(&self.config.power_supply_dir),
            SmsDispatcher::new(self.opener(), self.config.sms_platform),
        )
    }

    /// Backend first, then the completions endpoint if configured.
    pub fn relay(&self, model: Option<&str>) -> Result<ChatRelay, ChatError> {
        let mut api = ApiChatBackend::new(self.api.clone());
        if let Some(model) = model {
            api = api.with_model(model);
        }

        let mut backends: Vec<Arc<dyn ChatBackend>> = vec![Arc::new(api)];
        if let Some(config) = &self.completions {
            backends.push(Arc::new(CompletionsBackend::new(config.clone())?));
        }
        debug!("Chat relay with {} backends", backends.len());

        Ok(ChatRelay::new(backends))
    }

    /// Contacts that can receive an alert.
    pub async fn alertable_contacts(&self) -> AppResult<Vec<Contact>> {
        let contacts = self.contacts.load().await?;
        Ok(safety_core::contacts_with_phone_numbers(contacts))
    }

    /// The named contacts, or the first five alertable ones when `names`
    /// is empty.
    ///
    /// Names that match nothing or would exceed the cap are reported and
    /// skipped; the alert still goes to everyone who did resolve. Fails
    /// only when none of `names` resolves.
    pub async fn selection(&self, names: &[String]) -> AppResult<ContactSelection> {
        let contacts = self.alertable_contacts().await?;
        if names.is_empty() {
            return Ok(ContactSelection::preselect(contacts));
        }

        let (selection, skipped) = resolve_selection(&contacts, names);
        for skip in &skipped {
            warn!("{}", skip);
            println!("Skipping {}", skip);
        }
        if selection.is_empty() {
            return Err(format!("None of {:?} is a contact with a phone number", names).into());
        }
        Ok(selection)
    }
}

/// Contacts whose display name (case-insensitive) or primary number
/// matches `query`.
pub fn matching_contacts<'a>(
    contacts: &'a [Contact],
    query: &'a str,
) -> impl Iterator<Item = &'a Contact> + 'a {
    let query = query.trim();
    let number: String = query.chars().filter(|c| !c.is_whitespace()).collect();
    contacts.iter().filter(move |c| {
        c.display_name.eq_ignore_ascii_case(query)
            || c.primary_number()
                .map(|n| n.chars().filter(|ch| !ch.is_whitespace()).eq(number.chars()))
                .unwrap_or(false)
    })
}

/// First contact matching `query` by name or number.
pub fn find_contact<'a>(contacts: &'a [Contact], query: &'a str) -> Option<&'a Contact> {
    matching_contacts(contacts, query).next()
}

/// Select every contact matching each of `names`, in order.
///
/// Returns the selection and a description of each name that could not
/// be honoured.
pub fn resolve_selection(contacts: &[Contact], names: &[String]) -> (ContactSelection, Vec<String>) {
    let mut selection = ContactSelection::new();
    let mut skipped = Vec::new();

    for name in names {
        let mut matched = false;
        for contact in matching_contacts(contacts, name) {
            matched = true;
            if let Err(e) = selection.select(contact.clone()) {
                skipped.push(format!("{}: {}", contact.display_name, e));
            }
        }
        if !matched {
            skipped.push(format!("{:?}: no contact with a phone number", name));
        }
    }
    (selection, skipped)
}
