use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use notefolio_core::flatten::flatten;
use notefolio_core::models::NoteCollection;
use notefolio_core::stats::compute_stats;
use notefolio_core::{logging, store, updater};
use notefolio_tui::{App, EventHandler};
use ratatui::{backend::CrosstermBackend, Terminal};

#[derive(Parser)]
#[command(name = "notefolio", version, about = "A dated, subject-tagged notes gallery")]
struct Cli {
    /// Path to the JSON data file
    #[arg(long, global = true, default_value = "info.json")]
    data: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Launch the interactive gallery (the default)
    Tui,
    /// Print collection statistics
    Stats,
    /// Import image files for a date and subject, then save
    Add {
        /// Date in DD-MM-YYYY form
        #[arg(long)]
        date: String,
        /// Subject the images belong to
        #[arg(long)]
        subject: String,
        /// Image files to import
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Create a timestamped backup of the data file
    Backup,
    /// Check the data file and report date warnings
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let parent = cli
        .data
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    if let Err(err) = logging::init_logging("info", &parent.join("logs")) {
        eprintln!("warning: {err}");
    }

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => run_tui(&cli.data),
        Command::Stats => run_stats(&cli.data),
        Command::Add {
            date,
            subject,
            files,
        } => run_add(&cli.data, &parent, &date, &subject, &files),
        Command::Backup => run_backup(&cli.data),
        Command::Validate => run_validate(&cli.data),
    }
}

fn run_tui(data_path: &Path) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(data_path)?;
    let event_handler = EventHandler::new(250); // 250ms tick rate

    let result = run_app(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|f| notefolio_tui::ui::render(f, app))?;

        match event_handler.next()? {
            notefolio_tui::Event::Key(key) => {
                notefolio_tui::event::handle_key_event(key, app);
            }
            notefolio_tui::Event::Mouse(mouse) => {
                notefolio_tui::event::handle_mouse_event(mouse, app);
            }
            notefolio_tui::Event::Tick => {
                app.tick();
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn run_stats(data_path: &Path) -> Result<()> {
    let outcome = store::load_collection(data_path);
    if outcome.used_fallback {
        eprintln!("note: {} not readable; showing sample data", data_path.display());
    }
    let stats = compute_stats(&flatten(&outcome.collection));

    println!("Total images:    {}", stats.total_images);
    println!("Unique subjects: {}", stats.unique_subjects);
    println!("Unique dates:    {}", stats.unique_dates);
    println!("Oldest date:     {}", stats.oldest_date);
    println!("Newest date:     {}", stats.newest_date);
    println!("Per subject:");
    for (subject, count) in stats.breakdown_sorted() {
        println!("  {subject:<20} {count}");
    }
    Ok(())
}

fn run_add(
    data_path: &Path,
    parent: &Path,
    date: &str,
    subject: &str,
    files: &[PathBuf],
) -> Result<()> {
    // Never clobber an unreadable data file with partial state.
    let mut collection = if data_path.exists() {
        store::read_collection(data_path)?
    } else {
        NoteCollection::default()
    };

    store::backup_collection(data_path)?;
    let appended = updater::import_images(
        &parent.join("images"),
        &mut collection,
        date,
        subject,
        files,
    )?;
    store::save_collection(data_path, &collection)?;

    if appended.is_empty() {
        println!("no new images imported (unsupported or missing files?)");
    } else {
        println!("imported {} image(s) for {subject} on {date}:", appended.len());
        for path in appended {
            println!("  {path}");
        }
    }
    Ok(())
}

fn run_backup(data_path: &Path) -> Result<()> {
    match store::backup_collection(data_path)? {
        Some(dest) => println!("backup written to {}", dest.display()),
        None => bail!("no data file at {} to back up", data_path.display()),
    }
    Ok(())
}

fn run_validate(data_path: &Path) -> Result<()> {
    let collection = store::read_collection(data_path)?;
    let warnings = store::validate(&collection);
    if warnings.is_empty() {
        println!(
            "{} ok: {} date groups, {} images",
            data_path.display(),
            collection.days().len(),
            collection.image_count()
        );
        return Ok(());
    }
    for warning in &warnings {
        eprintln!("warning: {warning}");
    }
    bail!("{} warning(s) in {}", warnings.len(), data_path.display());
}
