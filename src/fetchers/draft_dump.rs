use std::sync::LazyLock;

use anyhow::{Context, Result};
use log::{debug, info};
use regex::Regex;
use reqwest::Url;
use scraper::{Html, Selector};

use crate::config::FeedSettings;
use crate::http::HttpClient;

static DUMP_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href\s*=\s*["']([^"']*draft_dump[^"']*)["']"#).expect("valid dump href regex")
});

/// Downloads the tournament results CSV linked from the listing page
pub struct DraftDumpFetcher {
    client: HttpClient,
    source_url: String,
}

impl DraftDumpFetcher {
    pub fn new(settings: &FeedSettings) -> Result<Self> {
        let source_url = settings
            .source_url
            .clone()
            .context("No leaderboard source URL configured (set LEADERBOARD_SOURCE_URL)")?;
        let client = HttpClient::new(&settings.user_agent, settings.timeout_secs)?;

        Ok(Self { client, source_url })
    }

    /// Listing page, then the linked dump; returns CSV text with any
    /// preamble line removed
    pub async fn fetch_csv(&self) -> Result<String> {
        info!("Fetching leaderboard listing from {}", self.source_url);
        let listing = self.client.get_text(&self.source_url).await?;

        let base = Url::parse(&self.source_url)
            .with_context(|| format!("Invalid source URL: {}", self.source_url))?;
        let link = find_dump_link(&listing, &base)?;
        info!("Downloading tournament dump from {}", link);

        let csv = self.client.get_text(link.as_str()).await?;
        debug!("Downloaded {} bytes of tournament data", csv.len());
        Ok(strip_preamble(&csv).to_string())
    }
}

/// First `draft_dump` href on the page, resolved against the site origin
pub fn find_dump_link(html: &str, base: &Url) -> Result<Url> {
    let href = anchor_href(html)
        .or_else(|| {
            DUMP_HREF
                .captures(html)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
        .context("No draft_dump link found on the listing page")?;

    let origin = base.join("/").context("Source URL has no origin")?;
    origin
        .join(href.trim())
        .with_context(|| format!("Could not resolve dump link: {}", href))
}

fn anchor_href(html: &str) -> Option<String> {
    let selector = Selector::parse("a[href*='draft_dump']").ok()?;
    let document = Html::parse_document(html);
    document
        .select(&selector)
        .find_map(|element| element.value().attr("href"))
        .map(str::to_string)
}

/// Drop the first line unless it already looks like the header row
pub fn strip_preamble(csv: &str) -> &str {
    let first_line = csv.lines().next().unwrap_or_default().to_lowercase();
    if first_line.contains("title") || first_line.contains("starttime") {
        return csv;
    }
    match csv.find('\n') {
        Some(idx) => &csv[idx + 1..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://stats.example.com/league/tournaments/index.html").unwrap()
    }

    #[test]
    fn finds_anchor_and_resolves_against_origin() {
        let html = r#"<html><body>
            <a href="/about">About</a>
            <a href="files/draft_dump_2025.csv">Download</a>
        </body></html>"#;

        let link = find_dump_link(html, &base()).unwrap();
        assert_eq!(link.as_str(), "https://stats.example.com/files/draft_dump_2025.csv");
    }

    #[test]
    fn absolute_links_are_kept() {
        let html = r#"<a href="https://cdn.example.net/draft_dump.csv">csv</a>"#;
        let link = find_dump_link(html, &base()).unwrap();
        assert_eq!(link.as_str(), "https://cdn.example.net/draft_dump.csv");
    }

    #[test]
    fn falls_back_to_any_href_attribute() {
        let html = r#"<link rel="alternate" href='/exports/draft_dump.csv'>"#;
        let link = find_dump_link(html, &base()).unwrap();
        assert_eq!(link.as_str(), "https://stats.example.com/exports/draft_dump.csv");
    }

    #[test]
    fn missing_link_is_an_error() {
        let err = find_dump_link("<a href='/other.csv'>x</a>", &base()).unwrap_err();
        assert!(err.to_string().contains("draft_dump"));
    }

    #[test]
    fn preamble_line_is_dropped() {
        let csv = "Exported 2025-06-03\ntitle,num,starttime,1st\nDaily A,1,1750000000,amy\n";
        assert_eq!(strip_preamble(csv), "title,num,starttime,1st\nDaily A,1,1750000000,amy\n");
    }

    #[test]
    fn header_first_line_is_kept() {
        let csv = "Title,Num,StartTime,1st\nDaily A,1,1750000000,amy\n";
        assert_eq!(strip_preamble(csv), csv);
    }
}
