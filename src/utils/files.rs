use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Move a file, directory or symlink, renaming it in the same step.
///
/// Tries `rename` first. When that fails (usually a cross-device move) and the
/// destination is still free, falls back to copy-then-delete.
pub fn move_path(src: &Path, dest: &Path) -> io::Result<()> {
    move_with(src, dest, |from, to| fs::rename(from, to))
}

fn move_with<R>(src: &Path, dest: &Path, rename: R) -> io::Result<()>
where
    R: FnOnce(&Path, &Path) -> io::Result<()>,
{
    let Err(e) = rename(src, dest) else {
        return Ok(());
    };

    // Never copy over something that is already there.
    if fs::symlink_metadata(dest).is_ok() {
        return Err(e);
    }
    debug!(
        "Rename of {} failed ({}), falling back to copy",
        src.display(),
        e
    );

    let file_type = fs::symlink_metadata(src)?.file_type();
    if file_type.is_symlink() {
        copy_symlink(src, dest)?;
        fs::remove_file(src)
    } else if file_type.is_dir() {
        copy_dir_recursive(src, dest)?;
        fs::remove_dir_all(src)
    } else {
        fs::copy(src, dest)?;
        fs::remove_file(src)
    }
}

/// Copy the contents of `src_dir` into a newly created `dest_dir`. Symlinks
/// are recreated, not followed.
pub fn copy_dir_recursive(src_dir: &Path, dest_dir: &Path) -> io::Result<()> {
    fs::create_dir(dest_dir)?;

    for entry in fs::read_dir(src_dir)? {
        let entry = entry?;
        let path = entry.path();
        let target = dest_dir.join(entry.file_name());
        let file_type = entry.file_type()?;

        if file_type.is_symlink() {
            copy_symlink(&path, &target)?;
        } else if file_type.is_dir() {
            copy_dir_recursive(&path, &target)?;
        } else {
            fs::copy(&path, &target)?;
        }
    }

    Ok(())
}

/// Create a link at `dest` pointing wherever `src` points.
#[cfg(unix)]
fn copy_symlink(src: &Path, dest: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(src)?, dest)
}

#[cfg(windows)]
fn copy_symlink(src: &Path, dest: &Path) -> io::Result<()> {
    use std::os::windows::fs::{symlink_dir, symlink_file};

    let target = fs::read_link(src)?;
    if fs::metadata(src).map(|m| m.is_dir()).unwrap_or(false) {
        symlink_dir(target, dest)
    } else {
        symlink_file(target, dest)
    }
}

#[cfg(not(any(unix, windows)))]
fn copy_symlink(src: &Path, _dest: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot recreate symlink {}", src.display()),
    ))
}
