use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::Cli;
use crate::logging::{FileStatus, Logger};
use crate::marker;
use crate::platform::Os;
use crate::resources::append::AppendResource;
use crate::resources::copy::CopyResource;
use crate::resources::symlink::SymlinkResource;
use crate::resources::{Applicable as _, ResourceChange};

const DIVIDER: &str = "============================================================";

/// Run the install command.
///
/// Detects the platform, resolves the repository root, confirms with the
/// user, and installs every file under the platform's source directory into
/// the home directory. A declined confirmation or an absent source directory
/// is a clean, successful exit.
///
/// # Errors
///
/// Returns an error on an unsupported platform or on the first I/O failure;
/// files installed before the failure stay installed.
pub fn run(args: &Cli, log: &Logger) -> Result<()> {
    let os = Os::detect()?;
    let root = resolve_root(args.root.as_deref())?;
    let source_dir = root.join(os.dir_name());
    let home = dirs::home_dir().context("cannot determine home directory")?;

    log.info(DIVIDER);
    log.stage(&format!("Installing dotfiles for {os}"));
    log.info(&format!("repo directory        :: {}", root.display()));
    log.info(&format!("source directory      :: {}", source_dir.display()));
    log.info(&format!("destination directory :: {}", home.display()));
    log.info(DIVIDER);

    if !args.yes && !log.confirm("Continue? [y/N]: ")? {
        log.info("installation aborted by user");
        return Ok(());
    }

    // An absent platform directory is expected, not an error.
    if !source_dir.is_dir() {
        log.info(&format!(
            "no dotfiles found for {os} at {}",
            source_dir.display()
        ));
        return Ok(());
    }

    install_tree(os, &source_dir, &home, log)?;

    log.stage("Dotfiles installation complete");
    log.print_summary();
    Ok(())
}

/// Install every regular file under `source_dir` into `home`, preserving
/// relative paths.
///
/// Per-file dispatch: append-marker files are merged, everything else is
/// symlinked (Linux/macOS) or copied (Windows) according to `os`.
///
/// # Errors
///
/// Propagates the first classification or installation failure.
pub fn install_tree(os: Os, source_dir: &Path, home: &Path, log: &Logger) -> Result<()> {
    for source in walk_files(source_dir)? {
        let rel = source
            .strip_prefix(source_dir)
            .with_context(|| format!("relativize: {}", source.display()))?
            .to_path_buf();
        let dest = home.join(&rel);

        log.info(&format!("processing: {}", rel.display()));
        install_file(os, &source, &dest, &rel.display().to_string(), log)?;
    }
    Ok(())
}

/// Classify one source file and dispatch to the matching strategy.
fn install_file(os: Os, source: &Path, dest: &Path, name: &str, log: &Logger) -> Result<()> {
    if marker::is_append_source(source)? {
        let resource = AppendResource::new(source.to_path_buf(), dest.to_path_buf());
        log.debug(&format!("appending: {}", resource.description()));
        match resource.apply()? {
            ResourceChange::Applied => log.record_file(name, FileStatus::Appended, None),
            ResourceChange::AlreadyCorrect => {
                log.debug("content already up to date");
                log.record_file(name, FileStatus::UpToDate, None);
            }
            ResourceChange::Skipped { reason } => {
                log.debug(&reason);
                log.record_file(name, FileStatus::Skipped, Some(reason.as_str()));
            }
        }
        return Ok(());
    }

    if os.uses_symlinks() {
        let resource = SymlinkResource::new(source.to_path_buf(), dest.to_path_buf());
        log.debug(&format!("linking: {}", resource.description()));
        resource.apply()?;
        log.record_file(name, FileStatus::Linked, None);
    } else {
        let resource = CopyResource::new(source.to_path_buf(), dest.to_path_buf());
        log.debug(&format!("copying: {}", resource.description()));
        resource.apply()?;
        log.record_file(name, FileStatus::Copied, None);
    }
    Ok(())
}

/// Recursively collect the regular files under `dir`, sorted by name within
/// each directory so log output is stable. Directories are recursed into and
/// anything that is neither file nor directory is skipped; symlinks are
/// followed.
fn walk_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("read directory: {}", dir.display()))?;
    entries.sort_by_key(std::fs::DirEntry::file_name);

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            files.extend(walk_files(&path)?);
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Resolve the repository root: the `--root` flag, then the `DOTFILES_ROOT`
/// environment variable, then the directory two levels above the running
/// executable (the `<root>/install/bin/` layout the repo ships with).
///
/// # Errors
///
/// Returns an error if the executable's location cannot be determined or has
/// no grandparent directory.
pub fn resolve_root(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(root) = flag {
        return Ok(root.to_path_buf());
    }
    if let Ok(root) = std::env::var("DOTFILES_ROOT") {
        return Ok(PathBuf::from(root));
    }

    let exe = std::env::current_exe().context("cannot locate the running executable")?;
    let root = exe
        .parent()
        .and_then(Path::parent)
        .context("executable has no grandparent directory")?;
    dunce::canonicalize(root).with_context(|| format!("resolve repo root: {}", root.display()))
}
