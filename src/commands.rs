//! Subcommand handlers.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use orbitlens_config::Config;
use orbitlens_core::{
    CredentialContext, DisplayLimits, StaticCredentialStore, WidgetHost, WidgetServices,
    WidgetView,
};
use orbitlens_dom::{LiveDocument, PageSnapshot};
use orbitlens_protocols::{MemberDataRequest, NavigationStrategy, Platform, SiteIntegration};
use orbitlens_runtime::{ContentScript, FixtureMemberSource};

use crate::cli::OutputFormat;
use crate::sites::build_registry;

type CmdResult = Result<(), Box<dyn Error>>;

const SETTINGS_HINT: &str = "set [credentials] api_token and workspace in the config file";

/// Load `snapshot` and bind it to the site that runs on its host.
fn open_page(snapshot: &Path, config: &Config) -> Result<ContentScript, Box<dyn Error>> {
    let doc = PageSnapshot::load(snapshot)?.into_document()?;
    let host = doc
        .location()
        .host_str()
        .ok_or_else(|| format!("snapshot url '{}' has no host", doc.location()))?
        .to_string();
    let site = build_registry(config).for_host(&host)?;
    debug!(host = %host, site = %site.manifest().id, "Snapshot bound to site");

    let store = Arc::new(
        StaticCredentialStore::new(config.credentials.clone()).with_settings_hint(SETTINGS_HINT),
    );
    Ok(ContentScript::from_config(
        LiveDocument::new(doc),
        site,
        Arc::new(FixtureMemberSource::default()),
        store,
        config,
    ))
}

pub(crate) fn sites(config: &Config, format: OutputFormat) -> CmdResult {
    let registry = build_registry(config);
    let mut sites: Vec<Arc<dyn SiteIntegration>> = registry
        .list_ids()
        .iter()
        .filter_map(|id| registry.get(id))
        .collect();
    sites.sort_by(|a, b| a.manifest().id.cmp(&b.manifest().id));

    if format == OutputFormat::Json {
        let json: Vec<_> = sites
            .iter()
            .map(|site| {
                serde_json::json!({
                    "manifest": site.manifest(),
                    "navigation": site.navigation(),
                    "adapters": site.adapters().iter().map(|a| a.name().to_string()).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("{:<16} {:<10} {:<32} NAVIGATION", "ID", "PLATFORM", "HOSTS");
    println!("{}", "-".repeat(80));
    for site in &sites {
        let manifest = site.manifest();
        println!(
            "{:<16} {:<10} {:<32} {}",
            manifest.id,
            manifest.platform,
            manifest.hosts.join(", "),
            describe_navigation(&site.navigation())
        );
    }
    println!("\n{} site(s)", sites.len());
    Ok(())
}

fn describe_navigation(strategy: &NavigationStrategy) -> String {
    match strategy {
        NavigationStrategy::Events { names } => format!("events: {}", names.join(", ")),
        NavigationStrategy::HashChange => "hashchange".to_string(),
        NavigationStrategy::Landmark { selector } => format!("landmark: {}", selector),
    }
}

pub(crate) fn detect(config: &Config, snapshot: &Path) -> CmdResult {
    let script = open_page(snapshot, config)?;
    match script.detected_adapter() {
        Some(name) => println!("{}", name),
        None => println!("none"),
    }
    Ok(())
}

pub(crate) fn inject(
    config: &Config,
    snapshot: &Path,
    output: Option<&Path>,
    format: OutputFormat,
) -> CmdResult {
    let script = open_page(snapshot, config)?;
    let Some(report) = script.run_pass() else {
        println!("No adapter matches this page");
        return Ok(());
    };

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{:<12} {:<12} USERNAME", "ZONE", "WIDGET");
        println!("{}", "-".repeat(48));
        for injection in &report.injected {
            println!(
                "{:<12} {:<12} {}",
                injection.zone.to_string(),
                injection.widget.to_string(),
                injection.username
            );
        }
        for (zone, reason) in &report.skipped {
            println!("{:<12} {:<12} skipped: {}", zone.to_string(), "-", reason);
        }
        println!(
            "\n{} zone(s), {} injected, {} replaced, {} skipped",
            report.zones,
            report.injected.len(),
            report.replaced,
            report.skipped.len()
        );
    }

    if let Some(output) = output {
        let json = script
            .document()
            .read(|doc| PageSnapshot::from_document(doc).to_json_pretty())?;
        std::fs::write(output, json)?;
        info!(path = %output.display(), "Wrote mutated snapshot");
    }
    Ok(())
}

pub(crate) async fn preview(
    config: &Config,
    responses: &Path,
    username: &str,
    platform: &str,
    expand: bool,
    format: OutputFormat,
) -> CmdResult {
    let platform: Platform = platform.parse()?;
    let source = FixtureMemberSource::load(responses)?;
    info!(responses = source.len(), "Loaded member-data fixture");

    let store = Arc::new(
        StaticCredentialStore::new(config.credentials.clone()).with_settings_hint(SETTINGS_HINT),
    );
    let services = WidgetServices::new(
        Arc::new(source),
        Arc::new(CredentialContext::load(store)),
    )
    .with_limits(DisplayLimits::from(&config.widget));

    let doc = PageSnapshot::with_body("about:blank", None, Vec::new()).into_document()?;
    let live = LiveDocument::new(doc);
    let body = live
        .read(|doc| doc.body())
        .ok_or("preview document has no body")?;
    let host = WidgetHost::new(live.clone(), services);

    let widget = host.attach(body, MemberDataRequest::new(username, platform))?;
    widget.trigger().await;
    if expand {
        widget.expand_tags();
        widget.expand_identities();
    }

    if format == OutputFormat::Json {
        let subtree = live.read(|doc| doc.to_snapshot(widget.node()));
        println!("{}", serde_json::to_string_pretty(&subtree)?);
        return Ok(());
    }

    let view = widget.view();
    println!("{} on {}: {}", username, platform, view.phase());
    print_view(&view);
    Ok(())
}

fn print_view(view: &WidgetView) {
    let member = match view {
        WidgetView::Member(member) => member,
        other => {
            if let Some(message) = other.message() {
                println!("  {}", message);
            }
            return;
        }
    };

    println!("  {}", member.name);
    if let Some(title) = &member.job_title {
        println!("  {}", title);
    }
    if let Some(org) = &member.organization {
        println!("  Organization: {}", org.name);
    }
    for pill in &member.pills {
        println!("  [{}]", pill);
    }
    if !member.identities.items.is_empty() {
        println!("  Identities:");
        for badge in &member.identities.items {
            println!("    {:<16} {}", badge.source.label(), badge.handle);
        }
        if let Some(label) = member.identities.toggle_label() {
            println!("    ({})", label);
        }
    }
    if !member.tags.items.is_empty() {
        println!("  Tags: {}", member.tags.items.join(", "));
        if let Some(label) = member.tags.toggle_label() {
            println!("    ({})", label);
        }
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
