use std::io::{BufRead, Write};

use crate::{
    Res,
    clipboard::Clipboard,
    error::ResolverError,
    spotify::search,
    utils,
};

use super::{Console, Context, authorize, deliver};

const RESOLVE_LIMIT: u32 = 20;

#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub band: Option<String>,
    pub album: Option<String>,
    pub query: Option<String>,
}

/// Resolves a band/album pair or a free query to one album URL.
///
/// The first, most relevant album wins; there is no menu. Without flags the
/// query is prompted for (`Band - Album` is understood) or read from a pipe.
pub async fn resolve<C, R, W>(
    ctx: &Context<'_, C>,
    console: &mut Console<R, W>,
    opts: ResolveOptions,
) -> Res<String>
where
    C: Clipboard,
    R: BufRead,
    W: Write,
{
    let query = match utils::build_query(
        opts.band.as_deref(),
        opts.album.as_deref(),
        opts.query.as_deref(),
    ) {
        Some(query) => query,
        None => read_query(console)?,
    };
    log::info!("Search query: {}", query);

    let (session, token) = authorize(ctx.config).await?;

    let pb = utils::spinner(format!("Searching Spotify for {}...", query));
    let albums = search::search_albums(
        &session,
        &token,
        &query,
        RESOLVE_LIMIT,
        Some(&ctx.config.default_market),
    )
    .await;
    pb.finish_and_clear();
    let albums = albums?;
    log::info!("Found {} album(s)", albums.len());

    let album = albums
        .into_iter()
        .next()
        .ok_or_else(|| ResolverError::NotFound("Album".to_string()))?;
    let url = album
        .canonical_url()
        .ok_or_else(|| ResolverError::MissingUrl(album.name.clone()))?;
    log::info!("Found album: {} - {} ({})", album.artist_names(), album.name, url);

    let summary = format!("{} - {}", album.artist_names(), album.name);
    deliver(ctx, &url, &summary);
    Ok(url)
}

fn read_query<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Res<String> {
    let input = if console.interactive {
        writeln!(console.output, "Enter band and album name:")?;
        writeln!(
            console.output,
            "Format: 'Band Name - Album Name' or just paste the text"
        )?;
        console
            .prompt("> ")?
            .map(|line| utils::split_band_album(&line))
            .unwrap_or_default()
    } else {
        console.read_rest()?
    };

    if input.is_empty() {
        return Err(ResolverError::EmptyQuery);
    }
    Ok(input)
}
