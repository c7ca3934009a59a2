//! The SOS flow end to end with a recording opener.

use device_sensors::FixedLocationProvider;
use safety_core::{
    Contact, ContactSelection, LastKnownCache, LocationAcquirer, LocationFix, NoBattery, SosFlow,
};
use sms_dispatch::{RecordingOpener, SmsDispatcher, SmsPlatform};

fn selection() -> ContactSelection {
    ContactSelection::preselect([
        Contact::new("Mom", ["+91 98450 00000"]),
        Contact::new("No Number", Vec::<String>::new()),
        Contact::new("Ravi", ["+91 99000 11111"]),
    ])
}

#[tokio::test]
async fn test_sos_opens_encoded_sms_link() {
    let opener = RecordingOpener::new();
    let flow = SosFlow::new(
        LocationAcquirer::new(
            FixedLocationProvider::new(12.9716, 77.5946).unwrap(),
            LastKnownCache::new(),
        ),
        NoBattery,
        SmsDispatcher::new(opener.clone(), SmsPlatform::Ios),
    );

    let report = flow.trigger(&selection()).await.unwrap();
    assert!(matches!(report.location, LocationFix::Fresh(_)));
    assert_eq!(report.receipt.recipient_count, 2);
    assert!(report.alert.body.ends_with("Battery: unknown"));

    let uri = opener.last().await.unwrap();
    assert!(uri.starts_with(
        "sms:+919845000000&+919900011111?body=EMERGENCY%20SOS%21%20I%20need%20help.%0A"
    ));
    assert!(uri.contains("https%3A%2F%2Fmaps.google.com%2F%3Fq%3D12.971600%2C77.594600"));
    assert_eq!(report.receipt.detail.as_deref(), Some(uri.as_str()));
}

#[tokio::test]
async fn test_empty_selection_opens_nothing() {
    let opener = RecordingOpener::new();
    let flow = SosFlow::new(
        LocationAcquirer::new(
            FixedLocationProvider::new(0.0, 0.0).unwrap(),
            LastKnownCache::new(),
        ),
        NoBattery,
        SmsDispatcher::new(opener.clone(), SmsPlatform::Android),
    );

    assert!(flow.trigger(&ContactSelection::new()).await.is_err());
    assert!(opener.opened().await.is_empty());
}
