//! CLI subcommand handlers — thin glue from parsed arguments to client
//! calls. Nothing beyond input reading and request mapping lives here.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::cache::{Cache, SessionState};
use crate::client::retry::with_retry;
use crate::client::ApiClient;
use crate::models::jsonld::{FaqItem, SchemaRequest};
use crate::models::keywords::KeywordRequest;
use crate::models::metadata::MetadataRequest;
use crate::models::rewrite::{DownloadRequest, RewriteRequest};
use crate::models::social::SocialRequest;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Suggest keywords, optionally verified against search trends
    Keywords {
        #[command(flatten)]
        input: ContentInput,
        #[arg(long)]
        audience: Option<String>,
        /// Cross-check suggestions against the trends provider
        #[arg(long)]
        verify_trends: bool,
        /// Seed phrase the backend should consider (repeatable)
        #[arg(long = "seed")]
        seed_keywords: Vec<String>,
        /// Trends market, e.g. "US"
        #[arg(long)]
        market: Option<String>,
        /// Trends window, e.g. "today 12-m"
        #[arg(long)]
        timeframe: Option<String>,
    },
    /// Rewrite the content as a semantic HTML fragment
    Rewrite {
        #[command(flatten)]
        input: ContentInput,
        #[command(flatten)]
        keywords: KeywordArgs,
        #[arg(long)]
        audience: Option<String>,
        #[arg(long)]
        mode: Option<String>,
    },
    /// Generate title, meta description, and social preview cards
    Metadata {
        #[command(flatten)]
        input: ContentInput,
        #[command(flatten)]
        keywords: KeywordArgs,
        #[arg(long)]
        audience: Option<String>,
    },
    /// Generate JSON-LD structured data with lint findings
    Schema {
        #[command(flatten)]
        input: ContentInput,
        #[command(flatten)]
        keywords: KeywordArgs,
        #[arg(long)]
        audience: Option<String>,
        #[arg(long)]
        headline: Option<String>,
        /// FAQ entry as "question|answer" (repeatable)
        #[arg(long = "faq")]
        faqs: Vec<String>,
    },
    /// Draft per-network social posts
    Social {
        #[command(flatten)]
        input: ContentInput,
        #[command(flatten)]
        keywords: KeywordArgs,
        #[arg(long)]
        audience: Option<String>,
    },
    /// Render an HTML fragment into a full downloadable page
    Download {
        /// Path to the HTML fragment
        html: PathBuf,
        /// JSON-LD file to embed into the page head
        #[arg(long)]
        jsonld: Option<PathBuf>,
        #[arg(long, default_value = "optimized.html")]
        out: PathBuf,
    },
    /// Check backend liveness
    Health,
    /// Full pipeline: keywords, then rewrite + metadata + schema + social
    Optimize {
        #[command(flatten)]
        input: ContentInput,
        #[arg(long)]
        audience: Option<String>,
        #[arg(long)]
        verify_trends: bool,
        #[arg(long, default_value = "seoscribe-out")]
        out_dir: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct ContentInput {
    /// Content file; reads stdin when omitted
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct KeywordArgs {
    /// Keyword to include (repeatable); defaults to the last approved list
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,
}

impl KeywordArgs {
    /// Explicit flags win; otherwise fall back to the approved list from
    /// the last `keywords` run.
    fn resolve(&self, cache: &Cache) -> Result<Vec<String>> {
        if !self.keywords.is_empty() {
            return Ok(self.keywords.clone());
        }
        Ok(cache
            .load_session()?
            .map(|session| session.keywords.into_iter().map(|k| k.phrase).collect())
            .unwrap_or_default())
    }
}

pub async fn run(
    command: Commands,
    client: &ApiClient,
    cache: &Cache,
    attempts: u32,
) -> Result<()> {
    match command {
        Commands::Keywords {
            input,
            audience,
            verify_trends,
            seed_keywords,
            market,
            timeframe,
        } => {
            let request = KeywordRequest {
                content: read_content(&input)?,
                audience: audience.clone(),
                verify_trends: verify_trends.then_some(true),
                seed_keywords: (!seed_keywords.is_empty()).then_some(seed_keywords),
                market,
                timeframe,
            };
            let list = with_retry(attempts, || client.keywords(&request))
                .await
                .context("keyword suggestion failed")?;
            let keywords = list.normalize();
            cache.save_session(&SessionState {
                keywords: keywords.clone(),
                audience,
            })?;
            info!(count = keywords.len(), "keywords suggested");
            print_json(&keywords)
        }
        Commands::Rewrite {
            input,
            keywords,
            audience,
            mode,
        } => {
            let request = RewriteRequest {
                content: read_content(&input)?,
                keywords: keywords.resolve(cache)?,
                audience,
                mode,
            };
            let result = with_retry(attempts, || client.rewrite(&request))
                .await
                .context("rewrite failed")?;
            print_json(&result)
        }
        Commands::Metadata {
            input,
            keywords,
            audience,
        } => {
            let request = MetadataRequest {
                content: read_content(&input)?,
                keywords: keywords.resolve(cache)?,
                audience,
            };
            let result = with_retry(attempts, || client.metadata(&request))
                .await
                .context("metadata generation failed")?;
            print_json(&result)
        }
        Commands::Schema {
            input,
            keywords,
            audience,
            headline,
            faqs,
        } => {
            let request = SchemaRequest {
                content: read_content(&input)?,
                keywords: keywords.resolve(cache)?,
                audience,
                headline,
                faqs: faqs
                    .iter()
                    .map(|raw| parse_faq(raw))
                    .collect::<Result<Vec<_>>>()?,
            };
            let result = with_retry(attempts, || client.schema(&request))
                .await
                .context("schema generation failed")?;
            print_json(&result)
        }
        Commands::Social {
            input,
            keywords,
            audience,
        } => {
            let request = SocialRequest {
                content: read_content(&input)?,
                keywords: keywords.resolve(cache)?,
                audience,
            };
            let result = with_retry(attempts, || client.social(&request))
                .await
                .context("social drafting failed")?;
            print_json(&result)
        }
        Commands::Download { html, jsonld, out } => {
            let fragment = fs::read_to_string(&html)
                .with_context(|| format!("failed to read {}", html.display()))?;
            let jsonld = match jsonld {
                Some(path) => {
                    let raw = fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    Some(
                        serde_json::from_str(&raw)
                            .with_context(|| format!("{} is not valid JSON", path.display()))?,
                    )
                }
                None => None,
            };
            let request = DownloadRequest {
                html: fragment,
                jsonld,
            };
            let bytes = with_retry(attempts, || client.download(&request))
                .await
                .context("download failed")?;
            fs::write(&out, &bytes)
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(path = %out.display(), len = bytes.len(), "page written");
            Ok(())
        }
        Commands::Health => {
            let status = with_retry(attempts, || client.health())
                .await
                .context("health check failed")?;
            print_json(&status)
        }
        Commands::Optimize {
            input,
            audience,
            verify_trends,
            out_dir,
        } => optimize(client, cache, attempts, input, audience, verify_trends, out_dir).await,
    }
}

async fn optimize(
    client: &ApiClient,
    cache: &Cache,
    attempts: u32,
    input: ContentInput,
    audience: Option<String>,
    verify_trends: bool,
    out_dir: PathBuf,
) -> Result<()> {
    let content = read_content(&input)?;

    let keyword_request = KeywordRequest {
        content: content.clone(),
        audience: audience.clone(),
        verify_trends: verify_trends.then_some(true),
        ..Default::default()
    };
    let keywords = with_retry(attempts, || client.keywords(&keyword_request))
        .await
        .context("keyword suggestion failed")?
        .normalize();
    cache.save_session(&SessionState {
        keywords: keywords.clone(),
        audience: audience.clone(),
    })?;
    let phrases: Vec<String> = keywords.iter().map(|k| k.phrase.clone()).collect();

    let rewrite_request = RewriteRequest {
        content: content.clone(),
        keywords: phrases.clone(),
        audience: audience.clone(),
        mode: None,
    };
    let metadata_request = MetadataRequest {
        content: content.clone(),
        keywords: phrases.clone(),
        audience: audience.clone(),
    };
    let schema_request = SchemaRequest {
        content: content.clone(),
        keywords: phrases.clone(),
        audience: audience.clone(),
        headline: None,
        faqs: vec![],
    };
    let social_request = SocialRequest {
        content,
        keywords: phrases,
        audience,
    };

    // The four generation calls are independent; run them concurrently.
    let (rewrite, metadata, schema, social) = tokio::join!(
        with_retry(attempts, || client.rewrite(&rewrite_request)),
        with_retry(attempts, || client.metadata(&metadata_request)),
        with_retry(attempts, || client.schema(&schema_request)),
        with_retry(attempts, || client.social(&social_request)),
    );
    let rewrite = rewrite.context("rewrite failed")?;
    let metadata = metadata.context("metadata generation failed")?;
    let schema = schema.context("schema generation failed")?;
    let social = social.context("social drafting failed")?;

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    fs::write(out_dir.join("rewrite.html"), &rewrite.html_block)
        .with_context(|| format!("failed to write {}", out_dir.join("rewrite.html").display()))?;
    write_json(out_dir.join("keywords.json"), &keywords)?;
    write_json(out_dir.join("metadata.json"), &metadata)?;
    write_json(out_dir.join("schema.json"), &schema)?;
    write_json(out_dir.join("social.json"), &social)?;

    info!(dir = %out_dir.display(), "optimization bundle written");
    println!("{}", out_dir.display());
    Ok(())
}

fn read_content(input: &ContentInput) -> Result<String> {
    let content = match &input.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read content from stdin")?;
            buf
        }
    };
    if content.trim().is_empty() {
        bail!("content is empty");
    }
    Ok(content)
}

fn parse_faq(raw: &str) -> Result<FaqItem> {
    match raw.split_once('|') {
        Some((question, answer)) if !question.trim().is_empty() && !answer.trim().is_empty() => {
            Ok(FaqItem {
                question: question.trim().to_string(),
                answer: answer.trim().to_string(),
            })
        }
        _ => bail!("FAQ entries must look like \"question|answer\", got {raw:?}"),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_json<T: Serialize>(path: PathBuf, value: &T) -> Result<()> {
    let raw = serde_json::to_string_pretty(value)?;
    fs::write(&path, raw).with_context(|| format!("failed to write {}", path.display()))
}
