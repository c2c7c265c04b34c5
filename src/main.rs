use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use colored::{ColoredString, Colorize};
use console::{Emoji, Term};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use podbrowse::catalog::recommend;
use podbrowse::favorites::{favorite_id, group_by_show, sort_within};
use podbrowse::player::{MediaEvent, PlayerExit};
use podbrowse::text::{
    EPISODE_DESCRIPTION_CHARS, FAVORITE_DESCRIPTION_WORDS, decode_entities, first_words,
    format_added_at, format_updated, pluralize, season_heading, truncate_chars,
};
use podbrowse::theme::detect_system_theme;
use podbrowse::{
    AudioPlaybackController, CatalogClient, DEFAULT_PAGE_SIZE, ExternalPlayer,
    FavoriteRecord, FavoriteSort, FavoritesStore, FileStore, GenreFilter, MediaElement,
    NoopReporter, Page, PlaybackState, ProgressEvent, ProgressReporter, QueryCache, QuerySession,
    QueryState, ReqwestClient, Settings, SharedProgressReporter, SharedStore, Show, ShowPreview,
    SortOrder, Theme, ThemePreference, Track, genre,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static STAR: Emoji<'_, '_> = Emoji("★ ", "* ");
static HEART: Emoji<'_, '_> = Emoji("❤️  ", "[+] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");
static PLAY: Emoji<'_, '_> = Emoji("▶️  ", "> ");
static PAUSE: Emoji<'_, '_> = Emoji("⏸️  ", "|| ");

/// Seconds skipped by the forward/back playback commands
const SEEK_STEP: f64 = 15.0;

/// Number of related shows listed under a show
const RECOMMENDATIONS: usize = 4;

/// Browse, search and play podcasts
#[derive(Parser, Debug)]
#[command(name = "podbrowse")]
#[command(about = "Browse, search and play podcasts, with local favorites")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Base URL of the podcast catalog API
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Directory for favorites, theme and session data
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Audio player command (mpv, ffplay, ...)
    #[arg(long, global = true)]
    player: Option<String>,

    /// Quiet mode - suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the show catalog, one page at a time
    Shows {
        /// Only shows whose title contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Genre id or title, or "all"
        #[arg(short, long)]
        genre: Option<GenreFilter>,

        /// Newest, Oldest, TitleAsc or TitleDesc
        #[arg(long)]
        sort: Option<SortOrder>,

        /// Page to show
        #[arg(short, long)]
        page: Option<usize>,

        /// Shows per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,

        /// Forget the remembered search, filter, sort and page first
        #[arg(long)]
        reset: bool,
    },

    /// Show one podcast with its seasons and episodes
    Show {
        /// Show id
        id: u64,
    },

    /// List the available genres
    Genres,

    /// Manage favorite episodes
    #[command(subcommand)]
    Favorites(FavoritesCommand),

    /// Play an episode
    Play {
        /// Show id
        #[arg(required_unless_present = "favorite")]
        show_id: Option<u64>,

        /// Season number (1-based)
        #[arg(required_unless_present = "favorite")]
        season: Option<usize>,

        /// Episode number
        #[arg(required_unless_present = "favorite")]
        episode: Option<u32>,

        /// Play a favorite by id instead
        #[arg(long, conflicts_with_all = ["show_id", "season", "episode"])]
        favorite: Option<String>,
    },

    /// Show or change the color theme
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
}

#[derive(Subcommand, Debug)]
enum FavoritesCommand {
    /// List favorites grouped by show
    List {
        /// title-asc, title-desc, date-new or date-old
        #[arg(long, default_value_t = FavoriteSort::DateNew)]
        sort: FavoriteSort,

        /// Only favorites of this show
        #[arg(long)]
        show: Option<String>,
    },

    /// Add an episode to the favorites
    Add {
        show_id: u64,
        /// Season number (1-based)
        season: usize,
        episode: u32,
    },

    /// Remove a favorite by id
    Remove { id: String },

    /// Remove all favorites
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ThemeAction {
    Show,
    Light,
    Dark,
    Toggle,
}

/// Colors for the active theme
#[derive(Clone, Copy)]
struct Palette {
    theme: Theme,
}

impl Palette {
    fn title(&self, text: &str) -> ColoredString {
        match self.theme {
            Theme::Light => text.bold().blue(),
            Theme::Dark => text.bold().cyan(),
        }
    }

    fn accent(&self, text: &str) -> ColoredString {
        match self.theme {
            Theme::Light => text.magenta(),
            Theme::Dark => text.yellow(),
        }
    }

    fn muted(&self, text: &str) -> ColoredString {
        text.dimmed()
    }
}

/// Progress reporter showing a spinner while requests are in flight
struct SpinnerReporter {
    state: Mutex<SpinnerState>,
}

#[derive(Default)]
struct SpinnerState {
    bar: Option<ProgressBar>,
    in_flight: usize,
}

impl SpinnerReporter {
    fn new() -> Self {
        Self {
            state: Mutex::new(SpinnerState::default()),
        }
    }

    fn start(&self, message: String) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.in_flight += 1;

        let bar = state.bar.get_or_insert_with(|| {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {wide_msg}")
            {
                bar.set_style(style);
            }
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        });
        bar.set_message(message);
    }

    fn finish(&self, failure: Option<String>) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.in_flight = state.in_flight.saturating_sub(1);

        if let Some(message) = failure
            && let Some(bar) = &state.bar
        {
            bar.println(message);
        }

        if state.in_flight == 0
            && let Some(bar) = state.bar.take()
        {
            bar.finish_and_clear();
        }
    }
}

impl ProgressReporter for SpinnerReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::FetchingCatalog { url } => {
                self.start(format!("{SEARCH}Fetching shows: {}", url.cyan()));
            }

            ProgressEvent::FetchingShow { url, show_id } => {
                self.start(format!(
                    "{HEADPHONES}Fetching show {}: {}",
                    show_id.to_string().yellow(),
                    url.cyan()
                ));
            }

            ProgressEvent::CatalogLoaded { .. }
            | ProgressEvent::ShowLoaded { .. }
            | ProgressEvent::StaleShowDiscarded { .. } => self.finish(None),

            ProgressEvent::FetchFailed { url, error } => {
                self.finish(Some(format!("{FAILURE}{} - {}", url.red(), error.red())));
            }
        }
    }
}

/// Everything a command needs
struct App {
    settings: Settings,
    store: SharedStore,
    palette: Palette,
    reporter: SharedProgressReporter,
}

impl App {
    fn catalog_client(&self) -> Result<CatalogClient<ReqwestClient>> {
        CatalogClient::new(
            ReqwestClient::new(),
            &self.settings.api_base,
            self.reporter.clone(),
        )
        .context("Failed to set up the catalog client")
    }

    async fn fetch_show(&self, id: u64) -> Result<Show> {
        self.catalog_client()?
            .fetch_show(id)
            .await
            .context("Data could not be fetched")
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,podbrowse={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let settings = Settings::resolve(args.api_base, args.data_dir, args.player)
        .context("Failed to resolve settings")?;
    let store = FileStore::shared(&settings.storage_path()).context("Failed to open storage")?;
    let theme = ThemePreference::load(store.clone(), detect_system_theme());

    let reporter: SharedProgressReporter = if args.quiet {
        NoopReporter::shared()
    } else {
        Arc::new(SpinnerReporter::new())
    };

    let app = App {
        settings,
        store,
        palette: Palette {
            theme: theme.theme(),
        },
        reporter,
    };

    match args.command {
        Command::Shows {
            search,
            genre,
            sort,
            page,
            page_size,
            reset,
        } => {
            let session = QuerySession::new(
                FileStore::shared(&app.settings.session_path())
                    .context("Failed to open session storage")?,
            );

            let mut query = if reset {
                session.clear().context("Failed to reset session")?;
                QueryState::default()
            } else {
                session.restore()
            };
            if let Some(search) = search {
                query = query.with_search(search);
            }
            if let Some(genre) = genre {
                query = query.with_genre(genre);
            }
            if let Some(sort) = sort {
                query = query.with_sort(sort);
            }
            if let Some(page) = page {
                query = query.with_page(page);
            }

            run_shows(&app, &session, query, page_size).await
        }
        Command::Show { id } => run_show(&app, id).await,
        Command::Genres => {
            print_genres(app.palette);
            Ok(())
        }
        Command::Favorites(command) => run_favorites(&app, command).await,
        Command::Play {
            show_id,
            season,
            episode,
            favorite,
        } => {
            let track = match (favorite, show_id, season, episode) {
                (Some(id), ..) => {
                    let favorites = FavoritesStore::load(app.store.clone());
                    let record = favorites
                        .get(&id)
                        .with_context(|| format!("No favorite with id '{id}'"))?;
                    Track::from(record)
                }
                (None, Some(show_id), Some(season), Some(episode)) => {
                    let show = app.fetch_show(show_id).await?;
                    let (_, found) = show
                        .episode(season, episode)
                        .with_context(|| format!("Show {show_id} has no S{season}E{episode}"))?;
                    Track::from_episode(&show, found)
                }
                _ => bail!("Either an episode or --favorite is required"),
            };

            run_play(&app, track).await
        }
        Command::Theme { action } => {
            let mut theme = theme;
            let changed = match action {
                ThemeAction::Show => None,
                ThemeAction::Light => Some(theme.set(Theme::Light).map(|_| Theme::Light)),
                ThemeAction::Dark => Some(theme.set(Theme::Dark).map(|_| Theme::Dark)),
                ThemeAction::Toggle => Some(theme.toggle()),
            };
            if let Some(result) = changed {
                result.context("Failed to save theme preference")?;
            }

            let palette = Palette {
                theme: theme.theme(),
            };
            println!("Theme: {}", palette.title(theme.theme().as_str()));
            Ok(())
        }
    }
}

async fn run_shows(
    app: &App,
    session: &QuerySession,
    mut query: QueryState,
    page_size: usize,
) -> Result<()> {
    let shows: Arc<[ShowPreview]> = app
        .catalog_client()?
        .fetch_shows()
        .await
        .context("Data could not be fetched")?
        .into();

    let mut cache = QueryCache::new();
    let mut page = cache.get(&shows, &query, page_size).clone();
    if query.settle(page.total_pages) {
        page = cache.get(&shows, &query, page_size).clone();
    }

    session
        .save(&query)
        .context("Failed to remember the catalog query")?;

    print_page(app.palette, &query, &page);
    Ok(())
}

fn print_page(palette: Palette, query: &QueryState, page: &Page) {
    println!(
        "\n{MICROPHONE}{} {}",
        palette.title("Podcasts"),
        palette.muted(&format!(
            "- {} | {} | sorted by {}",
            pluralize(page.total_items, "show", "shows"),
            match query.genre_filter {
                GenreFilter::All => "All Genres".to_string(),
                GenreFilter::Genre(id) => genre::title_of(id).to_string(),
            },
            query.sort_order
        ))
    );
    if !query.search_text.is_empty() {
        println!("{SEARCH}Matching \"{}\"", palette.accent(&query.search_text));
    }
    println!();

    if page.items.is_empty() {
        println!("{}", palette.muted("No shows found."));
        return;
    }

    for show in &page.items {
        let genres: Vec<&str> = show.genres.iter().map(|id| genre::title_of(*id)).collect();
        println!(
            "{} {}",
            palette.muted(&format!("[{:>5}]", show.id)),
            palette.title(&decode_entities(&show.title))
        );
        println!(
            "        {} | {} | Updated {}",
            palette.accent(&genres.join(", ")),
            pluralize(show.seasons as usize, "season", "seasons"),
            format_updated(&show.updated_at())
        );
    }

    println!("\n{}", palette.muted(&page_hint(page)));
}

/// "Page 2 of 3 | --page 1 for previous | --page 3 for next"
fn page_hint(page: &Page) -> String {
    let mut hint = format!("Page {} of {}", page.page, page.total_pages.max(1));
    if page.has_previous() {
        hint.push_str(&format!(" | --page {} for previous", page.page - 1));
    }
    if page.has_next() {
        hint.push_str(&format!(" | --page {} for next", page.page + 1));
    }
    hint
}

async fn run_show(app: &App, id: u64) -> Result<()> {
    let api = app.catalog_client()?;

    let (detail, catalog) = tokio::join!(api.fetch_show(id), api.fetch_shows());
    let show = detail.context("Data could not be fetched")?;

    let related = match catalog {
        Ok(catalog) => recommend(&catalog, &show.genre_ids(), show.id, RECOMMENDATIONS),
        Err(e) => {
            tracing::warn!(error = %e, "skipping recommendations");
            Vec::new()
        }
    };

    let favorites = FavoritesStore::load(app.store.clone());
    print_show(app.palette, &show, &favorites, &related);
    Ok(())
}

fn print_show(palette: Palette, show: &Show, favorites: &FavoritesStore, related: &[ShowPreview]) {
    let genres: Vec<String> = show.genres.iter().map(|g| g.label()).collect();

    println!("\n{MICROPHONE}{}", palette.title(&decode_entities(&show.title)));
    println!(
        "{}",
        palette.muted(&format!(
            "{} | {} | {} | Updated {}",
            genres.join(", "),
            pluralize(show.seasons.len(), "season", "seasons"),
            pluralize(show.episode_count(), "episode", "episodes"),
            format_updated(&show.updated_at())
        ))
    );
    if !show.description.is_empty() {
        println!("\n{}", show.description.trim());
    }

    if show.seasons.is_empty() {
        println!("\n{}", palette.muted("No seasons available."));
    }

    for (index, season) in show.seasons.iter().enumerate() {
        let number = index + 1;
        println!(
            "\n{} {}",
            palette.title(&season_heading(number, season.title.as_deref())),
            palette.muted(&format!(
                "({})",
                pluralize(season.episodes.len(), "episode", "episodes")
            ))
        );

        for episode in &season.episodes {
            let id = favorite_id(&show.title, number as u32, episode.episode);
            let mark = if favorites.is_favorited(&id) {
                STAR.to_string()
            } else {
                "  ".to_string()
            };

            println!(
                "  {mark}{} {}",
                palette.accent(&format!("E{:<3}", episode.episode)),
                decode_entities(&episode.title)
            );
            if !episode.description.is_empty() {
                println!(
                    "        {}",
                    palette.muted(&truncate_chars(&episode.description, EPISODE_DESCRIPTION_CHARS))
                );
            }
        }
    }

    if !related.is_empty() {
        println!("\n{}", palette.title("You might also like"));
        for other in related {
            println!(
                "  {} {}",
                palette.muted(&format!("[{:>5}]", other.id)),
                decode_entities(&other.title)
            );
        }
    }
    println!();
}

fn print_genres(palette: Palette) {
    for genre in genre::all() {
        println!(
            "{} {}",
            palette.muted(&format!("[{}]", genre.id)),
            palette.title(genre.title)
        );
        println!("    {}", genre.description);
    }
}

async fn run_favorites(app: &App, command: FavoritesCommand) -> Result<()> {
    let palette = app.palette;
    let mut favorites = FavoritesStore::load(app.store.clone());

    match command {
        FavoritesCommand::List { sort, show } => {
            print_favorites(palette, &favorites, sort, show.as_deref());
        }

        FavoritesCommand::Add {
            show_id,
            season,
            episode,
        } => {
            let show = app.fetch_show(show_id).await?;
            let (found_season, found) = show
                .episode(season, episode)
                .with_context(|| format!("Show {show_id} has no S{season}E{episode}"))?;

            let record = FavoriteRecord::from_episode(
                &show.title,
                season as u32,
                found_season,
                found,
                Utc::now(),
            );
            let id = record.id.clone();

            if favorites.add(record).context("Failed to save favorites")? {
                println!("{HEART}Added {}", palette.accent(&id));
            } else {
                println!("{} is already a favorite", palette.accent(&id));
            }
        }

        FavoritesCommand::Remove { id } => {
            if favorites.remove(&id).context("Failed to save favorites")? {
                println!("Removed {}", palette.accent(&id));
            } else {
                println!("{}", palette.muted(&format!("No favorite with id '{id}'")));
            }
        }

        FavoritesCommand::Clear { yes } => {
            if favorites.is_empty() {
                println!("{}", palette.muted("No favorites to remove."));
                return Ok(());
            }

            let prompt = format!(
                "Remove all {}?",
                pluralize(favorites.len(), "favorite", "favorites")
            );
            if !yes && !confirm(&prompt)? {
                println!("{}", palette.muted("Nothing removed."));
                return Ok(());
            }

            favorites.clear_all().context("Failed to clear favorites")?;
            println!("All favorites removed.");
        }
    }

    Ok(())
}

fn print_favorites(
    palette: Palette,
    favorites: &FavoritesStore,
    sort: FavoriteSort,
    show: Option<&str>,
) {
    if favorites.is_empty() {
        println!("{}", palette.muted("No favorites yet."));
        return;
    }

    let groups: Vec<_> = group_by_show(favorites.favorites())
        .into_iter()
        .filter(|group| show.is_none_or(|title| group.show_title == title))
        .collect();

    if groups.is_empty() {
        println!(
            "{}",
            palette.muted(&format!(
                "No favorites for that show. Shows with favorites: {}",
                favorites.show_titles().join(", ")
            ))
        );
        return;
    }

    for group in groups {
        println!("\n{HEART}{}", palette.title(&decode_entities(&group.show_title)));

        for favorite in sort_within(&group.favorites, sort) {
            println!(
                "  {} {}",
                palette.accent(&format!(
                    "S{}E{}",
                    favorite.season_number, favorite.episode_number
                )),
                decode_entities(&favorite.title)
            );
            if !favorite.description.is_empty() {
                println!(
                    "      {}",
                    first_words(&favorite.description, FAVORITE_DESCRIPTION_WORDS)
                );
            }
            println!(
                "      {} {}",
                palette.muted(&format_added_at(&favorite.added_at)),
                palette.muted(&format!("({})", favorite.id))
            );
        }
    }
    println!();
}

/// Ask a yes/no question on the terminal; anything but "y" is a no
fn confirm(prompt: &str) -> Result<bool> {
    let term = Term::stdout();
    term.write_str(&format!("{prompt} [y/N] "))?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Forward lines typed on stdin to the playback loop
fn spawn_command_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

async fn next_command(commands: &mut Option<mpsc::UnboundedReceiver<String>>) -> Option<String> {
    match commands {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

enum Input {
    Interrupt,
    Line(Option<String>),
    Tick,
}

async fn run_play(app: &App, track: Track) -> Result<()> {
    let palette = app.palette;
    let mut controller = AudioPlaybackController::new(ExternalPlayer::new(&app.settings.player));

    controller.load_episode(track);
    if controller.state() == PlaybackState::Paused && !controller.media().is_running() {
        bail!(
            "Could not start '{}'. Install it or choose another player with --player",
            app.settings.player
        );
    }

    if let Some(track) = controller.track() {
        println!(
            "\n{HEADPHONES}{} {}",
            palette.title(&decode_entities(&track.title)),
            palette.muted(&format!("- {}", decode_entities(&track.show_title)))
        );
    }
    println!(
        "{}",
        palette.muted("Enter: play/pause | f: forward | b: back | q: quit")
    );

    let status = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
        status.set_style(style);
    }

    let mut commands = Some(spawn_command_reader());
    let mut ticker = tokio::time::interval(Duration::from_millis(500));
    let mut exit_requested = false;

    loop {
        let input = tokio::select! {
            _ = tokio::signal::ctrl_c() => Input::Interrupt,
            line = next_command(&mut commands) => Input::Line(line),
            _ = ticker.tick() => Input::Tick,
        };

        match input {
            Input::Line(None) => commands = None,

            Input::Line(Some(line)) if exit_requested => {
                if matches!(line.trim(), "y" | "yes" | "q") {
                    break;
                }
                exit_requested = false;
            }

            Input::Interrupt => {
                if exit_requested || !controller.should_confirm_exit() {
                    break;
                }
                exit_requested = true;
                status.println("Playback in progress. Stop and quit? [y/N]");
            }

            Input::Line(Some(line)) => match line.trim() {
                "" | "p" => {
                    controller.toggle_play();
                }
                "f" => controller.seek(SEEK_STEP),
                "b" => controller.seek(-SEEK_STEP),
                "q" if controller.should_confirm_exit() => {
                    exit_requested = true;
                    status.println("Playback in progress. Stop and quit? [y/N]");
                }
                "q" => break,
                other => status.println(format!("Unknown command '{other}'")),
            },

            Input::Tick => match controller.media_mut().poll_finished() {
                Some(PlayerExit::Completed) => {
                    controller.handle_event(MediaEvent::Ended);
                    status.finish_and_clear();
                    println!("Finished.");
                    return Ok(());
                }
                Some(PlayerExit::Failed(exit)) => {
                    controller.handle_event(MediaEvent::Failed);
                    status.finish_and_clear();
                    eprintln!("{FAILURE}{}", "Playback failed".red().bold());
                    bail!("'{}' stopped with {exit}", app.settings.player);
                }
                None => controller.handle_event(MediaEvent::TimeUpdate),
            },
        }

        status.set_message(playback_status(&controller));
    }

    controller.stop();
    status.finish_and_clear();
    Ok(())
}

fn playback_status(controller: &AudioPlaybackController<ExternalPlayer>) -> String {
    let icon = match controller.state() {
        PlaybackState::Playing => PLAY.to_string(),
        PlaybackState::Loading => "… ".to_string(),
        PlaybackState::Paused | PlaybackState::Idle => PAUSE.to_string(),
    };

    let position = controller.media().current_time().max(0.0) as u64;
    let elapsed = format!("{:02}:{:02}", position / 60, position % 60);

    match controller.media().duration() {
        Some(_) => format!("{icon}{elapsed} ({:.0}%)", controller.progress_percent()),
        None => format!("{icon}{elapsed}"),
    }
}
