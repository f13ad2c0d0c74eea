use std::io::{BufRead, Write};

use crate::{
    Res,
    clipboard::Clipboard,
    error::ResolverError,
    gum::{Chooser, Style},
    info,
    selection::{self, CHOOSER_ALL_ALBUMS_LABEL, Candidate, Choice},
    spotify::search,
    types::{Album, Artist},
    warning,
};

use super::{
    Console, Context, authorize,
    artists::{MAX_MENU_ALBUMS, copy_albums, load_albums},
    joined_urls,
};

const PINK: &str = "212";
const GREEN: &str = "48";
const RED: &str = "196";

#[derive(Debug, Clone)]
pub struct BrowseOptions {
    pub query: Option<String>,
    pub limit: u32,
    /// Skip `gum` even when it is installed.
    pub plain: bool,
}

impl Default for BrowseOptions {
    fn default() -> Self {
        Self {
            query: None,
            limit: 20,
            plain: false,
        }
    }
}

/// `gum` when it answered the probe, the numbered menu otherwise.
struct Ui<'g, G: Chooser> {
    gum: Option<&'g G>,
}

impl<G: Chooser> Ui<'_, G> {
    fn say(&self, fancy: &str, style: Style, plain: &str) {
        match self.gum {
            Some(gum) => {
                gum.style(fancy, &style);
            }
            None => println!("{}", plain),
        }
    }

    fn pick_artist<'a, R: BufRead, W: Write>(
        &self,
        artists: &'a [Artist],
        console: &mut Console<R, W>,
    ) -> Res<&'a Artist> {
        let Some(gum) = self.gum else {
            writeln!(console.output, "\nFound {} artist(s). Select one:", artists.len())?;
            return match selection::choose(artists, false, &mut console.input, &mut console.output)?
                .required()?
            {
                Choice::One(artist) => Ok(artist),
                Choice::All => Err(ResolverError::InvalidSelection),
            };
        };

        let labels: Vec<String> = artists.iter().map(Candidate::chooser_label).collect();
        let header = format!("🎤 Select an artist ({} found):", artists.len());
        let idx = gum.choose(&labels, &header).ok_or(ResolverError::Cancelled)?;
        artists
            .get(idx)
            .ok_or_else(|| ResolverError::NotFound("Artist".to_string()))
    }

    fn pick_album<'a, R: BufRead, W: Write>(
        &self,
        albums: &'a [Album],
        artist: &Artist,
        console: &mut Console<R, W>,
    ) -> Res<Choice<'a, Album>> {
        let shown = &albums[..albums.len().min(MAX_MENU_ALBUMS)];

        let Some(gum) = self.gum else {
            writeln!(
                console.output,
                "\nFound {} album(s) by {}. Select one:",
                albums.len(),
                artist.name
            )?;
            return selection::choose(shown, true, &mut console.input, &mut console.output)?
                .required();
        };

        let mut labels: Vec<String> = shown.iter().map(Candidate::chooser_label).collect();
        labels.push(CHOOSER_ALL_ALBUMS_LABEL.to_string());
        let header = format!(
            "📀 Select an album ({} found, or choose ALL):",
            albums.len()
        );

        match gum.choose(&labels, &header) {
            Some(idx) if idx == shown.len() => Ok(Choice::All),
            Some(idx) => shown
                .get(idx)
                .map(Choice::One)
                .ok_or_else(|| ResolverError::NotFound("Album".to_string())),
            None => Err(ResolverError::Cancelled),
        }
    }
}

/// Artist drill-down rendered with `gum`.
///
/// `gum` is probed once; without it (or with `--plain`) the same steps run
/// on the numbered menus.
pub async fn browse<C, G, R, W>(
    ctx: &Context<'_, C>,
    console: &mut Console<R, W>,
    chooser: &G,
    opts: BrowseOptions,
) -> Res<()>
where
    C: Clipboard,
    G: Chooser,
    R: BufRead,
    W: Write,
{
    let use_gum = !opts.plain && chooser.probe();
    if !opts.plain && !use_gum {
        warning!("Gum is not installed. Install with: brew install gum");
        info!("Falling back to basic input...");
    }
    let ui = Ui {
        gum: use_gum.then_some(chooser),
    };

    let query = match (opts.query.clone(), ui.gum) {
        (Some(query), _) => query,
        (None, Some(gum)) => {
            gum.style(
                "🎵 Spotify Artist Resolver",
                &Style::fg(PINK).bold().boxed(PINK).padding("1 3").margin("1 0").align("center"),
            );
            gum.input("🎤 Search for artist: ", "Artist name...")
                .unwrap_or_default()
        }
        (None, None) => {
            writeln!(console.output, "🎵 Spotify Artist Resolver\n")?;
            console.prompt("Search for artist: ")?.unwrap_or_default()
        }
    };
    if query.is_empty() {
        return Err(ResolverError::EmptyQuery);
    }

    let (session, token) = authorize(ctx.config).await?;

    ui.say(
        "🔍 Searching Spotify...",
        Style::fg(PINK).faint().italic().padding("0 2"),
        &format!("\nSearching for artists: {}...", query),
    );
    let found = search::search_artists(&session, &token, &query, opts.limit).await?;

    if found.is_empty() {
        ui.say(
            "❌ No artists found",
            Style::fg(RED).bold().boxed(RED).padding("1 2").margin("1 0"),
            "No artists found.",
        );
        return Ok(());
    }

    if ui.gum.is_some() {
        ui.say(
            &format!("✨ Found {} artist(s)", found.len()),
            Style::fg(GREEN).bold().padding("0 2").margin("1 0"),
            "",
        );
    }
    let artist = ui.pick_artist(&found, console)?;

    ui.say(
        &format!("📀 Loading albums by {}...", artist.name),
        Style::fg(PINK).faint().italic().padding("0 2").margin("1 0"),
        &format!("\nLoading albums by {}...", artist.name),
    );
    let albums = load_albums(&session, &token, artist, &ctx.config.default_market).await?;

    if albums.is_empty() {
        ui.say(
            &format!("❌ No albums found for {}", artist.name),
            Style::fg(RED).bold().boxed(RED).padding("1 2").margin("1 0"),
            &format!("No albums found for {}.", artist.name),
        );
        return Ok(());
    }

    if ui.gum.is_some() {
        ui.say(
            &format!("✨ Found {} album(s) by {}", albums.len(), artist.name),
            Style::fg(GREEN).bold().padding("0 2").margin("1 0"),
            "",
        );
    }
    let choice = ui.pick_album(&albums, artist, console)?;

    match ui.gum {
        Some(gum) => report_styled(ctx, gum, artist, &albums, choice),
        None => copy_albums(ctx, artist, &albums, choice),
    }
}

fn report_styled<C: Clipboard, G: Chooser>(
    ctx: &Context<'_, C>,
    gum: &G,
    artist: &Artist,
    albums: &[Album],
    choice: Choice<'_, Album>,
) -> Res<()> {
    let (text, headline, album) = match choice {
        Choice::All => {
            let (urls, count) = joined_urls(albums);
            (urls, format!("✅ Copied {} album URLs to clipboard!", count), None)
        }
        Choice::One(album) => {
            let url = album
                .share_url()
                .ok_or_else(|| ResolverError::MissingUrl(album.name.clone()))?;
            (url.to_string(), "✅ Copied to clipboard!".to_string(), Some(album))
        }
    };

    let copied = !ctx.no_clipboard && ctx.clipboard.copy(&text);
    if !copied {
        if !ctx.no_clipboard {
            info!("Clipboard unavailable, printing instead:");
        }
        println!("{}", text);
        return Ok(());
    }

    gum.style(
        &headline,
        &Style::fg(GREEN).bold().boxed(GREEN).padding("1 3").margin("1 0").align("center"),
    );
    if let Some(album) = album {
        gum.style(&format!("📀 {}", album.name), &Style::fg(PINK).bold().padding("0 2"));
        gum.style(&format!("   👤 {}", artist.name), &Style::fg("99").faint().padding("0 2"));
        gum.style(
            &format!("🔗 {}", text),
            &Style::fg("33").italic().padding("0 2").margin("0 0 1 0"),
        );
    }
    Ok(())
}
