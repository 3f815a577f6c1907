use std::path::{Component, Path};

/// True when `name` is exactly one normal path component (no separators,
/// no `.`/`..`, no root or drive prefix).
pub(super) fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(first)), None) if first == name
    )
}

#[cfg(unix)]
pub(super) fn fsync_dir(dir: &Path) -> std::io::Result<()> {
    let f = std::fs::File::open(dir)?;
    f.sync_all()
}
