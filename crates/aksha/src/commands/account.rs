//! `login`, `logout` and `whoami`.

use crate::app::App;
use crate::AppResult;

/// `aksha login`.
pub async fn login(
    app: &App,
    clerk_id: &str,
    session_id: Option<&str>,
    session_token: Option<&str>,
) -> AppResult<()> {
    let user = app.api.login(clerk_id, session_id, session_token).await?;
    println!(
        "Signed in as {} {} <{}>",
        user.first_name, user.last_name, user.email
    );
    Ok(())
}

/// `aksha logout`.
pub async fn logout(app: &App) -> AppResult<()> {
    app.api.logout().await?;
    println!("Signed out");
    Ok(())
}

/// `aksha whoami`.
pub async fn whoami(app: &App, verify: bool) -> AppResult<()> {
    let user = if verify {
        if !app.api.is_authenticated().await {
            println!("Not signed in");
            return Ok(());
        }
        Some(app.api.profile().await?)
    } else {
        app.api.current_user().await?
    };

    match user {
        Some(user) => println!(
            "{} {} <{}> ({})",
            user.first_name, user.last_name, user.email, user.id
        ),
        None => println!("Not signed in"),
    }
    Ok(())
}
