//! Subcommand handlers

use std::sync::Arc;

use anyhow::bail;
use chrono::Utc;

use pulse_core::model::display_name;
use pulse_core::{
    Credentials, DashboardView, InvestorType, Onboarding, PulseConfig, Section, Transition, Vote, VoteBoard,
};
use pulse_runtime::{ApiClient, Clients};

use crate::render;

/// Print a transition and fail the command if it carries an error
fn finish(transition: &Transition) -> anyhow::Result<()> {
    if let Some(line) = render::transition(transition) {
        println!("{line}");
    }
    match &transition.notification {
        Some(note) if note.is_error() => bail!("{}", note.title),
        _ => Ok(()),
    }
}

pub async fn dashboard(clients: &Clients, config: &PulseConfig) -> anyhow::Result<()> {
    let mut view = DashboardView::new(clients.feeds(config), clients.recorder(), &config.meme_url);
    let scope = view.scope_handle();

    tokio::select! {
        () = view.load() => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            scope.cancel();
            tracing::warn!("Interrupted, outstanding requests cancelled");
            return Ok(());
        }
    }

    print!("{}", render::dashboard(view.state(), Utc::now()));
    Ok(())
}

pub async fn login(api: &Arc<ApiClient>, email: &str, password: &str) -> anyhow::Result<()> {
    let transition = api.auth().login(&Credentials::new(email, password)).await;
    if transition == Transition::none() {
        bail!("login response carried no token");
    }
    finish(&transition)
}

pub fn logout(api: &Arc<ApiClient>) -> anyhow::Result<()> {
    let transition = api.auth().logout();
    println!("Logged out");
    tracing::debug!(path = ?transition.navigate.map(pulse_core::Route::path), "Navigate");
    Ok(())
}

pub async fn vote(api: &Arc<ApiClient>, section: Section, vote: Vote) -> anyhow::Result<()> {
    let mut board = VoteBoard::new();
    let note = api.recorder().record(&mut board, section, vote).await;
    finish(&Transition::notify(note))
}

pub async fn onboard(
    api: &ApiClient,
    assets: &[String],
    investor: InvestorType,
    content: &[String],
) -> anyhow::Result<()> {
    let mut wizard = Onboarding::new();

    for asset in assets {
        wizard.toggle_asset(display_name(asset).unwrap_or(asset.as_str()));
    }
    wizard.next();

    wizard.select_investor_type(investor);
    wizard.next();

    for kind in content {
        wizard.toggle_content_type(kind);
    }

    let transition = wizard.complete(api).await?;
    finish(&transition)
}
