//! `share-location` and `report-unsafe`.

use safety_api::LocationPayload;
use safety_core::{maps_link, LocationSample};

use crate::app::App;
use crate::AppResult;

/// Fix for an upload, or an explanation of why there is none.
async fn sample_for_upload(app: &App) -> AppResult<LocationSample> {
    if !app.api.is_authenticated().await {
        return Err("Sign in first with `aksha login`".into());
    }
    app.acquirer()
        .acquire()
        .await
        .into_sample()
        .ok_or_else(|| "Location unavailable; is gpsd running? Use --lat/--lng to set it".into())
}

/// `aksha share-location`.
pub async fn share(app: &App) -> AppResult<()> {
    let sample = sample_for_upload(app).await?;
    app.api
        .update_location(&LocationPayload::from(&sample))
        .await?;
    println!(
        "Shared {}",
        maps_link(sample.latitude, sample.longitude)
    );
    Ok(())
}

/// `aksha report-unsafe <description>`.
pub async fn report_unsafe(app: &App, description: &str) -> AppResult<()> {
    let description = description.trim();
    if description.is_empty() {
        return Err("Describe what makes the place unsafe".into());
    }
    let sample = sample_for_upload(app).await?;
    let ack = app
        .api
        .report_unsafe(&LocationPayload::from(&sample), description)
        .await?;
    println!(
        "Reported {}: {}",
        maps_link(sample.latitude, sample.longitude),
        ack.message
    );
    Ok(())
}
