use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{self, CommandReport};
use crate::organizer::albums::AlbumCategory;
use crate::organizer::naming::{FolderType, Subtype};

#[derive(Debug, Parser)]
#[command(name = "norf", about = "Music production library organizer", version)]
struct Cli {
    /// Print the full report as JSON instead of plain lines.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the library root, the default album and the staging folder.
    Init,

    /// List albums, default album first.
    AlbumList,
    /// Create an album.
    AlbumCreate { name: String },
    /// Rename an album.
    AlbumRename { album: String, new_name: String },
    /// Tag an album as finished or still being carved.
    AlbumSetCategory {
        album: String,
        #[arg(value_enum)]
        category: AlbumCategory,
    },
    /// Set an album's manual sort position.
    AlbumSetOrder { album: String, order: i64 },

    /// List the projects of an album.
    ProjectList {
        #[arg(long)]
        album: Option<String>,
    },
    /// Create a project with its eight subfolders.
    ProjectCreate {
        name: String,
        #[arg(long)]
        album: Option<String>,
        /// Take this number; siblings holding it or higher shift up.
        #[arg(long, conflicts_with = "no_number")]
        number: Option<i64>,
        /// Skip the "NN - " prefix.
        #[arg(long)]
        no_number: bool,
    },
    /// Rename a project, keeping its number prefix.
    ProjectRename {
        album: String,
        project: String,
        new_name: String,
    },
    /// Delete a project.
    ProjectDelete {
        album: String,
        project: String,
        /// Evacuate the project's files to the staging folder first.
        #[arg(long)]
        to_staging: bool,
    },

    /// Show the next free project number of an album.
    NextNumber { album: String },
    /// Give an unnumbered project a number, shifting siblings as needed.
    AssignNumber {
        album: String,
        project: String,
        number: i64,
    },
    /// Apply a batch of NAME=NN reassignments to an album.
    Renumber {
        album: String,
        #[arg(required = true)]
        mapping: Vec<String>,
    },

    /// Renumber a folder's conventional files by modification time.
    Arrange {
        album: String,
        project: String,
        #[arg(value_enum)]
        folder: FolderType,
    },

    /// List files; scope narrows with --album/--project/--folder.
    FileList {
        #[arg(long)]
        album: Option<String>,
        #[arg(long, requires = "album")]
        project: Option<String>,
        #[arg(long, value_enum, requires = "project")]
        folder: Option<FolderType>,
    },
    /// Move a file into a project subfolder under a generated name.
    FileMove {
        source: String,
        #[arg(long)]
        album: String,
        #[arg(long)]
        project: String,
        #[arg(long, value_enum)]
        folder: FolderType,
        #[arg(long, value_enum)]
        subtype: Option<Subtype>,
    },
    /// Rename a file in place.
    FileRename { path: String, new_name: String },
    /// Delete a file.
    FileDelete { path: String },
    /// Show the name a file would get, without moving anything.
    PreviewName {
        #[arg(long)]
        album: String,
        #[arg(long)]
        project: String,
        #[arg(long, value_enum)]
        folder: FolderType,
        #[arg(long, value_enum)]
        subtype: Option<Subtype>,
        #[arg(long)]
        extension: String,
    },

    /// List the staging folder, directories first.
    SortList,
    /// Bring an outside file into the staging folder.
    SortImport { source: String },
    /// Move a staged file into a project subfolder.
    Sort {
        file: String,
        #[arg(long)]
        album: String,
        #[arg(long)]
        project: String,
        #[arg(long, value_enum)]
        folder: FolderType,
        #[arg(long, value_enum)]
        subtype: Option<Subtype>,
        /// Keep this exact name instead of generating one.
        #[arg(long, conflicts_with = "sciezki")]
        name: Option<String>,
        /// Keep the original name, under "Demo bit/Ścieżki".
        #[arg(long)]
        sciezki: bool,
    },
    /// Move a staged file into one of the shared root folders.
    SortMain { file: String, target: String },
    /// Delete a staged file.
    SortDelete { file: String },

    /// Rewrite convention names to the configured counter separator.
    MigrateNaming,
}

fn dispatch(command: &Command) -> Result<CommandReport> {
    match command {
        Command::Init => commands::init::run(),

        Command::AlbumList => commands::albums::list(),
        Command::AlbumCreate { name } => commands::albums::create(name),
        Command::AlbumRename { album, new_name } => commands::albums::rename(album, new_name),
        Command::AlbumSetCategory { album, category } => {
            commands::albums::set_category(album, *category)
        }
        Command::AlbumSetOrder { album, order } => commands::albums::set_order(album, *order),

        Command::ProjectList { album } => commands::projects::list(album.as_deref()),
        Command::ProjectCreate {
            name,
            album,
            number,
            no_number,
        } => commands::projects::create(&commands::projects::ProjectCreateOptions {
            name: name.clone(),
            album: album.clone(),
            number: *number,
            no_number: *no_number,
        }),
        Command::ProjectRename {
            album,
            project,
            new_name,
        } => commands::projects::rename(album, project, new_name),
        Command::ProjectDelete {
            album,
            project,
            to_staging,
        } => commands::projects::delete(album, project, *to_staging),

        Command::NextNumber { album } => commands::numbering::next_number(album),
        Command::AssignNumber {
            album,
            project,
            number,
        } => commands::numbering::assign(album, project, *number),
        Command::Renumber { album, mapping } => commands::numbering::renumber(album, mapping),

        Command::Arrange {
            album,
            project,
            folder,
        } => commands::arrange::run(&commands::arrange::ArrangeOptions {
            album: album.clone(),
            project: project.clone(),
            folder: *folder,
        }),

        Command::FileList {
            album,
            project,
            folder,
        } => commands::files::list(&commands::files::FileListOptions {
            album: album.clone(),
            project: project.clone(),
            folder: *folder,
        }),
        Command::FileMove {
            source,
            album,
            project,
            folder,
            subtype,
        } => commands::files::move_file(&commands::files::FileMoveOptions {
            source: source.clone(),
            album: album.clone(),
            project: project.clone(),
            folder: *folder,
            subtype: *subtype,
        }),
        Command::FileRename { path, new_name } => commands::files::rename(path, new_name),
        Command::FileDelete { path } => commands::files::delete(path),
        Command::PreviewName {
            album,
            project,
            folder,
            subtype,
            extension,
        } => commands::files::preview_name(album, project, *folder, *subtype, extension),

        Command::SortList => commands::sortownia::list(),
        Command::SortImport { source } => commands::sortownia::import(source),
        Command::Sort {
            file,
            album,
            project,
            folder,
            subtype,
            name,
            sciezki,
        } => commands::sortownia::sort(&commands::sortownia::SortOptions {
            file: file.clone(),
            album: album.clone(),
            project: project.clone(),
            folder: *folder,
            subtype: *subtype,
            custom_name: name.clone(),
            sciezki: *sciezki,
        }),
        Command::SortMain { file, target } => commands::sortownia::sort_main(file, target),
        Command::SortDelete { file } => commands::sortownia::delete(file),

        Command::MigrateNaming => commands::migrate::run(),
    }
}

fn render(report: &CommandReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        for line in &report.details {
            println!("{line}");
        }
        for issue in &report.issues {
            eprintln!("issue: {issue}");
        }
    }
    if !report.ok {
        anyhow::bail!("{} reported issues", report.command);
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let report = dispatch(&cli.command)?;
    render(&report, cli.json)
}
