use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use wedding_album::backend::{Backend, SupabaseClient};
use wedding_album::{admin, config, countdown, generate, media, output, scan};

#[derive(Parser)]
#[command(name = "wedding-album")]
#[command(about = "Static site generator and admin CLI for a wedding photo album")]
#[command(long_about = "\
Static site generator and admin CLI for a wedding photo album

Builds a one-page site with a countdown hero, a filterable masonry gallery,
a lightbox with slideshow, a love-story timeline and background music.
Photos come from photos.toml, or from the hosted backend with --remote.

Content structure:

  content/
  ├── config.toml      # Site config (optional)
  ├── photos.toml      # Seed photos and categories (optional)
  └── assets/          # Copied verbatim to the output root (optional)

Photo sources may be direct image URLs or Google Drive sharing links;
Drive links are rewritten to direct-view URLs with a thumbnail fallback.

Run 'wedding-album gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".wedding-album-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Shared flags for commands that read photos.
#[derive(clap::Args, Clone)]
struct RemoteArgs {
    /// Pull photos and categories from the configured backend
    #[arg(long)]
    remote: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content (and optionally the backend) into a manifest
    Scan(RemoteArgs),
    /// Produce the HTML site from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build(RemoteArgs),
    /// Validate the content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print the time left until the next wedding anniversary
    Countdown,
    /// Show how a photo source resolves (view, download, fallback URLs)
    Resolve {
        /// Photo URL or Google Drive sharing link
        src: String,
        /// Max width for the thumbnail fallback
        #[arg(long, default_value_t = media::DEFAULT_THUMBNAIL_SIZE)]
        size: u32,
    },
    /// Manage photos and categories on the hosted backend
    Admin {
        /// Access token from the magic-link sign-in
        #[arg(long, env = "WEDDING_ALBUM_TOKEN", hide_env_values = true)]
        token: Option<String>,

        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Email a magic sign-in link
    Login {
        #[arg(long)]
        email: String,
    },
    /// Show the signed-in account and whether it may administer the album
    Whoami,
    /// End the current session
    Logout,
    /// List categories
    Categories,
    /// Create a category
    AddCategory { name: String },
    /// List photos, newest first
    Photos {
        /// Maximum number of photos (defaults to backend.photo_limit)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Upload image files or directories
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Caption applied to every uploaded photo
        #[arg(long)]
        caption: Option<String>,
        /// Category name applied to every uploaded photo
        #[arg(long)]
        category: Option<String>,
    },
    /// Change a photo's caption and/or category (empty string clears)
    Edit {
        id: String,
        #[arg(long)]
        caption: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a photo and its stored file
    Delete { id: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let manifest_path = cli.temp_dir.join("manifest.json");

    match cli.command {
        Command::Scan(remote) => {
            let manifest = run_scan(&cli.source, remote.remote)?;
            scan::write_manifest(&manifest, &manifest_path)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let report = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Build(remote) => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = run_scan(&cli.source, remote.remote)?;
            scan::write_manifest(&manifest, &manifest_path)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Countdown => {
            let site_config = config::load_config(&cli.source)?;
            let target = site_config.wedding.parsed_date()?;
            let now = chrono::Local::now().naive_local();
            output::print_countdown(
                &countdown::countdown(target, now),
                countdown::next_occurrence(target, now),
            );
        }
        Command::Resolve { src, size } => {
            output::print_resolved(&src, &media::ImageSource::new(&src, size));
        }
        Command::Admin { token, command } => {
            run_admin(&cli.source, token, command)?;
        }
    }

    Ok(())
}

fn connect(
    backend: &config::BackendConfig,
    token: Option<String>,
) -> Result<SupabaseClient, Box<dyn std::error::Error>> {
    let client = SupabaseClient::new(backend)?;
    Ok(match token {
        Some(token) => client.with_access_token(token),
        None => client,
    })
}

fn run_scan(source: &Path, remote: bool) -> Result<scan::Manifest, Box<dyn std::error::Error>> {
    if !remote {
        return Ok(scan::scan(source)?);
    }
    let site_config = config::load_config(source)?;
    let client = connect(&site_config.backend, None)?;
    Ok(scan::scan_with_backend(source, Some(&client))?)
}

fn run_admin(
    source: &Path,
    token: Option<String>,
    command: AdminCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let site_config = config::load_config(source)?;
    let allow_list = site_config.access.allow_list();
    let client = connect(&site_config.backend, token)?;

    match &command {
        AdminCommand::Login { email } => {
            client.send_magic_link(email, site_config.backend.redirect_url.as_deref())?;
            println!("Magic link sent to {}", email.trim());
            println!("    Open it, then pass the access token with --token or WEDDING_ALBUM_TOKEN");
            return Ok(());
        }
        AdminCommand::Whoami => {
            output::print_access(&admin::session_access(&client, &allow_list)?);
            return Ok(());
        }
        AdminCommand::Logout => {
            client.sign_out()?;
            println!("Signed out");
            return Ok(());
        }
        _ => {}
    }

    let session = admin::Admin::authorize(&client, &allow_list)?;
    match command {
        AdminCommand::Categories => {
            output::print_categories(&session.categories()?);
        }
        AdminCommand::AddCategory { name } => {
            let category = session.add_category(&name)?;
            println!("Added category {} ({})", category.name, category.id);
        }
        AdminCommand::Photos { limit } => {
            let limit = limit.unwrap_or(site_config.backend.photo_limit);
            let photos = session.photos(limit)?;
            output::print_photo_rows(&photos, &session.categories()?);
        }
        AdminCommand::Upload {
            paths,
            caption,
            category,
        } => {
            let files = admin::collect_upload_files(&paths)?;
            let report =
                session.upload_batch(&files, caption.as_deref(), category.as_deref())?;
            output::print_batch_report(&report);
            if !report.is_complete() {
                return Err(format!("{} of the uploads failed", report.failed.len()).into());
            }
        }
        AdminCommand::Edit {
            id,
            caption,
            category,
        } => {
            let photo = session.edit(&id, caption.as_deref(), category.as_deref())?;
            println!("Updated photo {}", photo.id);
        }
        AdminCommand::Delete { id } => {
            let photo = session.delete(&id)?;
            println!("Deleted photo {}", photo.id);
        }
        AdminCommand::Login { .. } | AdminCommand::Whoami | AdminCommand::Logout => {}
    }
    Ok(())
}
