use std::io::{BufRead, Write};

use crate::{
    Res,
    clipboard::Clipboard,
    error::ResolverError,
    info,
    selection::{self, Choice},
    spotify::{Session, releases, search},
    types::{AccessToken, Album, Artist},
    utils,
};

use super::{Console, Context, authorize, deliver, joined_urls};

/// Albums requested per artist.
pub const ARTIST_ALBUM_LIMIT: u32 = 50;
/// Albums listed in a menu.
pub const MAX_MENU_ALBUMS: usize = 50;

#[derive(Debug, Clone)]
pub struct ArtistsOptions {
    pub query: Option<String>,
    pub limit: u32,
    pub allow_all: bool,
}

impl Default for ArtistsOptions {
    fn default() -> Self {
        Self {
            query: None,
            limit: 20,
            allow_all: true,
        }
    }
}

/// Artist drill-down: search artists, pick one, pick one of its albums (or
/// all of them), copy.
pub async fn artists<C, R, W>(
    ctx: &Context<'_, C>,
    console: &mut Console<R, W>,
    opts: ArtistsOptions,
) -> Res<()>
where
    C: Clipboard,
    R: BufRead,
    W: Write,
{
    let query = match opts.query.clone() {
        Some(query) => query,
        None => console.prompt("Search for artist: ")?.unwrap_or_default(),
    };
    if query.is_empty() {
        return Err(ResolverError::EmptyQuery);
    }

    let (session, token) = authorize(ctx.config).await?;

    info!("Searching for artists: {}...", query);
    let pb = utils::spinner("Searching artists...");
    let found = search::search_artists(&session, &token, &query, opts.limit).await;
    pb.finish_and_clear();
    let found = found?;

    if found.is_empty() {
        info!("No artists found.");
        return Ok(());
    }

    writeln!(console.output, "\nFound {} artist(s). Select one:", found.len())?;
    let artist = match selection::choose(&found, false, &mut console.input, &mut console.output)?
        .required()?
    {
        Choice::One(artist) => artist,
        Choice::All => return Err(ResolverError::InvalidSelection),
    };

    info!("Loading albums by {}...", artist.name);
    let albums = load_albums(&session, &token, artist, &ctx.config.default_market).await?;
    if albums.is_empty() {
        info!("No albums found for {}.", artist.name);
        return Ok(());
    }

    writeln!(
        console.output,
        "\nFound {} album(s) by {}. Select one:",
        albums.len(),
        artist.name
    )?;
    let shown = &albums[..albums.len().min(MAX_MENU_ALBUMS)];
    let choice = selection::choose(shown, opts.allow_all, &mut console.input, &mut console.output)?
        .required()?;

    copy_albums(ctx, artist, &albums, choice)
}

/// The artist's albums, de-duplicated by id and newest first.
pub async fn load_albums(
    session: &Session,
    token: &AccessToken,
    artist: &Artist,
    market: &str,
) -> Res<Vec<Album>> {
    if artist.id.is_empty() {
        return Err(ResolverError::NotFound(format!("ID for artist {}", artist.name)));
    }

    let pb = utils::spinner(format!("Loading albums by {}...", artist.name));
    let albums = releases::get_artist_albums(session, token, &artist.id, ARTIST_ALBUM_LIMIT, market).await;
    pb.finish_and_clear();

    let mut albums = albums?;
    utils::remove_duplicate_albums(&mut albums);
    utils::sort_albums_by_release_date(&mut albums);
    Ok(albums)
}

/// Delivers the chosen album, or every album for [`Choice::All`].
pub fn copy_albums<C: Clipboard>(
    ctx: &Context<'_, C>,
    artist: &Artist,
    albums: &[Album],
    choice: Choice<'_, Album>,
) -> Res<()> {
    match choice {
        Choice::All => {
            let (urls, count) = joined_urls(albums);
            deliver(ctx, &urls, &format!("{} album URLs", count));
        }
        Choice::One(album) => {
            let url = album
                .share_url()
                .ok_or_else(|| ResolverError::MissingUrl(album.name.clone()))?;
            deliver(ctx, url, &format!("{} - {}", artist.name, album.name));
        }
    }
    Ok(())
}
