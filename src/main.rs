use std::error::Error;
use std::sync::Arc;

use clap::Parser;

use tomato_scrape::source::{self, RottenTomatoes, SourceConfig};
use tomato_scrape::{
    AudienceBand, CriticsBand, FilterSelection, Genre, MediaDetail, MediaSource, MediaSummary,
    Platform, ResourceType, SortKey,
};

/// Browse Rotten Tomatoes movie/TV grids from the terminal.
#[derive(Debug, Parser)]
#[command(name = "tomato-scrape")]
struct Args {
    /// Browse category (movies_at_home, movies_in_theaters,
    /// movies_coming_soon, tv_series_browse)
    #[arg(long, default_value = "movies_at_home")]
    category: String,

    /// Genre code, repeatable (e.g. --genre documentary --genre drama)
    #[arg(long = "genre")]
    genres: Vec<String>,

    /// Critics score band (certified_fresh, fresh, rotten), repeatable
    #[arg(long = "critics")]
    critics: Vec<String>,

    /// Audience score band (upright, spilled), repeatable
    #[arg(long = "audience")]
    audience: Vec<String>,

    /// Streaming platform code, repeatable (e.g. --platform netflix)
    #[arg(long = "platform")]
    platforms: Vec<String>,

    /// Sort key (popular, newest, a_z, audience_lowest, audience_highest,
    /// critics_lowest, critics_highest)
    #[arg(long)]
    sort: Option<String>,

    /// How many pages to fetch before stopping
    #[arg(long, default_value_t = 1)]
    pages: u32,

    /// Also scrape each title's detail page
    #[arg(long)]
    details: bool,

    /// Print every known filter code and exit
    #[arg(long)]
    list_filters: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    if args.list_filters {
        print_filter_codes();
        return Ok(());
    }

    let resource = ResourceType::from_code(&args.category)
        .ok_or_else(|| format!("unknown category: {}", args.category))?;
    let selection = FilterSelection {
        platforms: parse_codes(&args.platforms, Platform::from_code, "platform")?,
        genres: parse_codes(&args.genres, Genre::from_code, "genre")?,
        sort: args
            .sort
            .as_deref()
            .map(|code| {
                SortKey::from_code(code).ok_or_else(|| format!("unknown sort code: {code}"))
            })
            .transpose()?,
        critics: parse_codes(&args.critics, CriticsBand::from_code, "critics band")?,
        audience: parse_codes(&args.audience, AudienceBand::from_code, "audience band")?,
    };

    let config = SourceConfig::default();
    let client = source::build_client(&config)?;
    let tomatoes = Arc::new(RottenTomatoes::new(&config));

    let mut cursor: Option<String> = None;
    for page_no in 1..=args.pages {
        let page = tomatoes
            .fetch_page(&client, &selection, cursor.as_deref(), resource)
            .await?;
        println!("== {} page {page_no} ({} items) ==\n", resource.label(), page.items.len());

        if args.details {
            for entry in source::fetch_details(&tomatoes, &client, &page).await {
                print_card(&entry.summary, entry.detail.as_ref());
            }
        } else {
            for item in &page.items {
                print_card(item, None);
            }
        }

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => {
                println!("(end of list)");
                break;
            }
        }
    }

    Ok(())
}

fn parse_codes<T>(
    raw: &[String],
    from_code: fn(&str) -> Option<T>,
    what: &str,
) -> Result<Vec<T>, String> {
    raw.iter()
        .map(|code| from_code(code).ok_or_else(|| format!("unknown {what} code: {code}")))
        .collect()
}

fn print_card(item: &MediaSummary, detail: Option<&MediaDetail>) {
    println!("TITLE    : {}", item.title);
    println!("URL      : {}", item.media_url);
    println!("POSTER   : {}", item.poster_uri);
    if let Some(date) = &item.release_date_text {
        println!("RELEASED : {date}");
    }
    match item.critics_score {
        Some(score) if item.certified_fresh => println!("CRITICS  : {score}% (certified fresh)"),
        Some(score) => println!("CRITICS  : {score}%"),
        None => {}
    }
    if let Some(score) = item.audience_score {
        println!("AUDIENCE : {score}%");
    }

    if let Some(detail) = detail {
        if let Some(date) = &detail.release_date {
            println!("DATE     : {date}");
        }
        if let Some(director) = &detail.director {
            println!("DIRECTOR : {director}");
        }
        if let Some(writer) = &detail.writer {
            println!("WRITER   : {writer}");
        }
        if let Some(genres) = &detail.genres {
            println!("GENRES   : {genres}");
        }
        if let Some(starring) = &detail.starring {
            println!("STARRING : {starring}");
        }
        if let Some(synopsis) = &detail.synopsis {
            println!("SYNOPSIS : {synopsis}");
        }
        if let Some(consensus) = &detail.critics_consensus {
            println!("CRITICS SAY : {consensus}");
        }
        if let Some(consensus) = &detail.audience_consensus {
            println!("AUDIENCE SAY: {consensus}");
        }
    }
    println!();
}

fn print_filter_codes() {
    println!("categories:");
    for r in ResourceType::ALL {
        println!("  {:24} {}", r.code(), r.label());
    }
    println!("genres:");
    for g in Genre::ALL {
        println!("  {:24} {}", g.code(), g.label());
    }
    println!("critics bands:");
    for b in CriticsBand::ALL {
        println!("  {:24} {}", b.code(), b.label());
    }
    println!("audience bands:");
    for b in AudienceBand::ALL {
        println!("  {:24} {}", b.code(), b.label());
    }
    println!("platforms:");
    for p in Platform::ALL {
        println!("  {:24} {}", p.code(), p.label());
    }
    println!("sort keys:");
    for s in SortKey::ALL {
        println!("  {:24} {}", s.code(), s.label());
    }
}
