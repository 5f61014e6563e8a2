use anyhow::Result;
use chrono::Utc;
use std::path::Path;

use crate::commands::{CommandReport, audit_ok};
use crate::organizer::config::load_config;
use crate::organizer::fsops::RealFs;
use crate::organizer::naming::{FolderType, Subtype};
use crate::organizer::paths::resolve_paths;
use crate::organizer::sortownia::{self, SortName};

#[derive(Debug, Clone)]
pub struct SortOptions {
    pub file: String,
    pub album: String,
    pub project: String,
    pub folder: FolderType,
    pub subtype: Option<Subtype>,
    /// Keep this exact name instead of generating one.
    pub custom_name: Option<String>,
    /// Keep the original name, under "Demo bit/Ścieżki".
    pub sciezki: bool,
}

pub fn list() -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let fs = RealFs;
    let mut report = CommandReport::new("sort-list");

    let entries = sortownia::list_staging(&fs, &paths)?;
    report.detail(format!("entries={}", entries.len()));
    for entry in &entries {
        report.detail(if entry.is_directory {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        });
    }
    report.data(entries);
    Ok(report)
}

pub fn import(source: &str) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let fs = RealFs;
    let mut report = CommandReport::new("sort-import");

    let stamp = Utc::now().timestamp_millis() as u64;
    let landed = sortownia::import_file(&fs, &paths, Path::new(source), stamp)?;
    report.detail(format!("imported as {}", landed.display()));
    audit_ok(
        &paths,
        "sort-import",
        &format!("{source} -> {}", landed.display()),
    );
    Ok(report)
}

pub fn sort(opts: &SortOptions) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let fs = RealFs;
    let mut report = CommandReport::new("sort");

    let sort_name = if opts.sciezki {
        SortName::Sciezki
    } else {
        match &opts.custom_name {
            Some(name) => SortName::Custom(name.clone()),
            None => SortName::Generated,
        }
    };

    let (new_path, new_name) = sortownia::sort_into_project(
        &fs,
        &cfg.naming,
        &paths,
        &opts.file,
        &opts.album,
        &opts.project,
        opts.folder,
        opts.subtype,
        sort_name,
    )?;
    report.detail(format!("sorted as {new_name}"));
    report.data(new_name);
    audit_ok(
        &paths,
        "sort",
        &format!("{} -> {}", opts.file, new_path.display()),
    );
    Ok(report)
}

pub fn sort_main(file: &str, target: &str) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let fs = RealFs;
    let mut report = CommandReport::new("sort-main");

    let landed = sortownia::sort_into_main_folder(&fs, &paths, file, Path::new(target))?;
    report.detail(format!("moved to {}", landed.display()));
    audit_ok(&paths, "sort-main", &format!("{file} -> {}", landed.display()));
    Ok(report)
}

pub fn delete(file: &str) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let fs = RealFs;
    let mut report = CommandReport::new("sort-delete");

    sortownia::delete_from_staging(&fs, &paths, file)?;
    report.detail(format!("deleted {file}"));
    audit_ok(&paths, "sort-delete", file);
    Ok(report)
}
