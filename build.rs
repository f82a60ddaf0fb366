use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp"];

fn main() {
    println!("cargo:rerun-if-changed=assets/wallpapers");

    if let Err(error) = generate_wallpaper_artifacts() {
        panic!("Failed to generate wallpaper artifacts: {}", error);
    }
}

#[derive(Debug)]
struct WallpaperEntry {
    key: String,
    source_path: PathBuf,
}

fn generate_wallpaper_artifacts() -> Result<(), Box<dyn Error>> {
    let wallpaper_root = PathBuf::from("assets/wallpapers");
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);

    let mut keys = if wallpaper_root.is_dir() {
        collect_relative_files(&wallpaper_root, &wallpaper_root)?
            .into_iter()
            .filter(|relative| is_category_image(relative))
            .collect::<Vec<_>>()
    } else {
        Vec::new()
    };
    keys.sort();

    let entries = keys
        .iter()
        .map(|relative| WallpaperEntry {
            key: relative.clone(),
            source_path: wallpaper_root.join(relative),
        })
        .collect::<Vec<_>>();

    fs::write(
        out_dir.join("embedded_wallpapers.rs"),
        build_embedded_wallpapers_source(&entries)?,
    )?;

    Ok(())
}

/// Only `<Category>/<file>` entries with an image extension are bundled.
fn is_category_image(relative: &str) -> bool {
    let mut segments = relative.split('/');
    let (Some(_category), Some(file), None) = (segments.next(), segments.next(), segments.next())
    else {
        return false;
    };

    Path::new(file)
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| IMAGE_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn collect_relative_files(root: &Path, current: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(current)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            files.extend(collect_relative_files(root, &path)?);
        } else if file_type.is_file() {
            let relative = path
                .strip_prefix(root)?
                .to_string_lossy()
                .replace('\\', "/");
            files.push(relative);
        }
    }

    Ok(files)
}

fn build_embedded_wallpapers_source(entries: &[WallpaperEntry]) -> Result<String, Box<dyn Error>> {
    let mut source = String::from("pub const WALLPAPER_KEYS: &[&str] = &[\n");
    for entry in entries {
        source.push_str(&format!("    {:?},\n", entry.key));
    }
    source.push_str("];\n\n");

    source.push_str("pub fn get_embedded_wallpaper(key: &str) -> Option<&'static [u8]> {\n");
    source.push_str("    match key {\n");

    for entry in entries {
        let canonical = entry.source_path.canonicalize()?;
        let include_path = canonical.to_string_lossy().replace('\\', "/");
        source.push_str(&format!(
            "        {:?} => Some(include_bytes!(r#\"{}\"#)),\n",
            entry.key, include_path
        ));
    }

    source.push_str("        _ => None,\n");
    source.push_str("    }\n");
    source.push_str("}\n");

    Ok(source)
}
