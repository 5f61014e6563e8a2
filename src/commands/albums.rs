use anyhow::Result;

use crate::commands::{CommandReport, audit_ok};
use crate::organizer::albums::{self, AlbumCategory};
use crate::organizer::fsops::RealFs;
use crate::organizer::paths::resolve_paths;

pub fn list() -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let fs = RealFs;
    let mut report = CommandReport::new("album-list");

    let views = albums::list_albums(&fs, &paths)?;
    report.detail(format!("albums={}", views.len()));
    for album in &views {
        report.detail(format!(
            "{} projects={}{}",
            album.name,
            album.project_count,
            match album.category {
                Some(AlbumCategory::Gotowe) => " category=gotowe",
                Some(AlbumCategory::Rzezbione) => " category=rzezbione",
                None => "",
            }
        ));
    }
    report.data(views);
    Ok(report)
}

pub fn create(name: &str) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let fs = RealFs;
    let mut report = CommandReport::new("album-create");

    let view = albums::create_album(&fs, &paths, name)?;
    report.detail(format!("created album {}", view.name));
    report.data(view);
    audit_ok(&paths, "album-create", name);
    Ok(report)
}

pub fn rename(album_id: &str, new_name: &str) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let fs = RealFs;
    let mut report = CommandReport::new("album-rename");

    albums::rename_album(&fs, &paths, album_id, new_name)?;
    report.detail(format!("renamed {album_id} -> {new_name}"));
    audit_ok(&paths, "album-rename", &format!("{album_id} -> {new_name}"));
    Ok(report)
}

pub fn set_category(album_id: &str, category: AlbumCategory) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let fs = RealFs;
    let mut report = CommandReport::new("album-set-category");

    albums::set_category(&fs, &paths, album_id, category)?;
    report.detail(format!("{album_id}: category updated"));
    audit_ok(&paths, "album-set-category", album_id);
    Ok(report)
}

pub fn set_order(album_id: &str, order: i64) -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let fs = RealFs;
    let mut report = CommandReport::new("album-set-order");

    albums::set_order(&fs, &paths, album_id, order)?;
    report.detail(format!("{album_id}: order={order}"));
    audit_ok(&paths, "album-set-order", album_id);
    Ok(report)
}
