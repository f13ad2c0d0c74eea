use std::io::{BufRead, Write};

use tabled::Table;

use crate::{
    Res,
    clipboard::Clipboard,
    error::ResolverError,
    info,
    selection::{self, Choice},
    spotify::search,
    utils,
};

use super::{Console, Context, authorize, deliver, joined_urls};

#[derive(Debug, Clone)]
pub struct AlbumsOptions {
    pub query: Option<String>,
    pub limit: u32,
    /// Print the results as a table and stop.
    pub list_only: bool,
    /// Offer the "copy every URL" entry.
    pub allow_all: bool,
}

impl Default for AlbumsOptions {
    fn default() -> Self {
        Self {
            query: None,
            limit: 20,
            list_only: false,
            allow_all: true,
        }
    }
}

/// Album search: search, pick one album (or all), copy.
///
/// When the input is not a terminal the query is read from it and the run
/// behaves as `--list-only`, since nobody can answer a menu.
pub async fn albums<C, R, W>(
    ctx: &Context<'_, C>,
    console: &mut Console<R, W>,
    opts: AlbumsOptions,
) -> Res<()>
where
    C: Clipboard,
    R: BufRead,
    W: Write,
{
    let query = match opts.query.clone() {
        Some(query) => query,
        None if console.interactive => console
            .prompt("Search for albums (artist, album, keywords): ")?
            .unwrap_or_default(),
        None => console.read_rest()?,
    };
    if query.is_empty() {
        return Err(ResolverError::EmptyQuery);
    }

    let (session, token) = authorize(ctx.config).await?;

    let list_only = opts.list_only || !console.interactive;
    if !list_only {
        info!("Searching for albums: {}...", query);
    }
    let pb = utils::spinner("Searching albums...");
    let albums = search::search_albums(&session, &token, &query, opts.limit, None).await;
    pb.finish_and_clear();
    let albums = albums?;

    if albums.is_empty() {
        info!("No albums found.");
        return Ok(());
    }

    if list_only {
        let table = Table::new(utils::album_table_rows(&albums));
        writeln!(console.output, "{}", table)?;
        return Ok(());
    }

    writeln!(console.output, "\nFound {} album(s). Select one:", albums.len())?;
    let choice = selection::choose(&albums, opts.allow_all, &mut console.input, &mut console.output)?
        .required()?;

    match choice {
        Choice::All => {
            let (urls, count) = joined_urls(&albums);
            deliver(ctx, &urls, &format!("{} album URLs", count));
        }
        Choice::One(album) => {
            let url = album
                .share_url()
                .ok_or_else(|| ResolverError::MissingUrl(album.name.clone()))?;
            deliver(ctx, url, &format!("{} — {}", album.name, album.artist_names()));
        }
    }
    Ok(())
}
