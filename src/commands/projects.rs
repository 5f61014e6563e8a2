use anyhow::Result;
use chrono::Utc;

use crate::commands::{CommandReport, audit_ok};
use crate::organizer::config::load_config;
use crate::organizer::fsops::RealFs;
use crate::organizer::numbering;
use crate::organizer::paths::resolve_paths;
use crate::organizer::projects::{self, Numbering};

#[derive(Debug, Clone)]
pub struct ProjectCreateOptions {
    pub name: String,
    /// Defaults to the configured default album.
    pub album: Option<String>,
    /// A fixed number; siblings holding it or higher shift up by one.
    pub number: Option<i64>,
    /// Skip the "NN - " prefix entirely.
    pub no_number: bool,
}

pub fn list(album: Option<&str>) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let fs = RealFs;
    let mut report = CommandReport::new("project-list");

    let album_id = album.unwrap_or(&cfg.projects.default_album);
    let views = projects::list_projects(&fs, &paths, album_id)?;
    report.detail(format!("album={album_id} projects={}", views.len()));
    for project in &views {
        report.detail(project.name.clone());
    }
    report.data(views);
    Ok(report)
}

pub fn create(opts: &ProjectCreateOptions) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let fs = RealFs;
    let mut report = CommandReport::new("project-create");

    let album_id = opts
        .album
        .clone()
        .unwrap_or_else(|| cfg.projects.default_album.clone());
    let numbering_mode = if opts.no_number {
        Numbering::None
    } else {
        match opts.number {
            Some(n) => Numbering::Manual(n),
            None => Numbering::Auto,
        }
    };

    let view = projects::create_project(&fs, &paths, &album_id, &opts.name, numbering_mode)?;
    report.detail(format!("created {}/{}", album_id, view.name));
    report.data(view.clone());
    audit_ok(
        &paths,
        "project-create",
        &format!("{album_id}/{}", view.name),
    );
    Ok(report)
}

/// Rename a project, keeping its number prefix if it has one.
pub fn rename(album_id: &str, project_name: &str, new_base: &str) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let fs = RealFs;
    let mut report = CommandReport::new("project-rename");

    let album_dir = paths.album_dir(album_id);
    let new_name = numbering::rename_keeping_number(&fs, &album_dir, project_name, new_base)?;
    report.detail(format!("renamed {project_name} -> {new_name}"));
    audit_ok(
        &paths,
        "project-rename",
        &format!("{album_id}/{project_name} -> {new_name}"),
    );
    Ok(report)
}

pub fn delete(album_id: &str, project_name: &str, to_staging: bool) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let fs = RealFs;
    let mut report = CommandReport::new("project-delete");

    if to_staging {
        let stamp = Utc::now().timestamp_millis() as u64;
        let moved = projects::evacuate_to_staging(&fs, &paths, album_id, project_name, stamp)?;
        report.detail(format!("moved {moved} files to staging"));
    }
    projects::delete_project(&fs, &paths, album_id, project_name)?;
    report.detail(format!("deleted {album_id}/{project_name}"));
    audit_ok(
        &paths,
        "project-delete",
        &format!("{album_id}/{project_name}"),
    );
    Ok(report)
}
