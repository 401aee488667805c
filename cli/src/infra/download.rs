//! Download infrastructure: implements `Downloader` over HTTPS with ureq.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{Downloaded, Downloader};

/// Blocking HTTPS downloader with an optional terminal progress bar.
///
/// The body is written to `<dest>.partial` and renamed into place once
/// complete, so `dest` never holds a truncated archive.
pub struct UreqDownloader {
    quiet: bool,
}

impl UreqDownloader {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Downloader for UreqDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<Downloaded> {
        let partial = partial_path(dest);
        let result = fetch_to(url, &partial, self.quiet);
        match result {
            Ok(bytes) => {
                std::fs::rename(&partial, dest)
                    .with_context(|| format!("moving download into {}", dest.display()))?;
                Ok(Downloaded { bytes })
            }
            Err(e) => {
                std::fs::remove_file(&partial).ok();
                Err(e)
            }
        }
    }

    fn discard(&self, dest: &Path) -> Result<()> {
        match std::fs::remove_file(dest) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", dest.display())),
        }
    }
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut s = dest.as_os_str().to_owned();
    s.push(".partial");
    PathBuf::from(s)
}

fn fetch_to(url: &str, partial: &Path, quiet: bool) -> Result<u64> {
    let response = match ureq::get(url)
        .set("User-Agent", concat!("skinetic-bootstrap/", env!("CARGO_PKG_VERSION")))
        .call()
    {
        Ok(r) => r,
        Err(ureq::Error::Status(code, _)) => anyhow::bail!("HTTP {code}"),
        Err(ureq::Error::Transport(t)) => anyhow::bail!("no network connection ({t})"),
    };

    let total = response
        .header("Content-Length")
        .and_then(|v| v.parse::<u64>().ok());
    tracing::debug!(url, ?total, "response received");

    let mut file =
        File::create(partial).with_context(|| format!("creating {}", partial.display()))?;
    let pb = make_progress_bar(quiet, total);

    let mut reader = response.into_reader();
    let mut buf = vec![0u8; 64 * 1024];
    let mut written = 0u64;
    loop {
        let n = reader.read(&mut buf).context("download interrupted")?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).context("download interrupted")?;
        written += n as u64;
        pb.inc(n as u64);
    }
    pb.finish_and_clear();
    file.sync_all().context("flushing download")?;

    if let Some(expected) = total {
        anyhow::ensure!(
            written == expected,
            "download truncated: got {written} of {expected} bytes"
        );
    }
    Ok(written)
}

fn make_progress_bar(quiet: bool, total: Option<u64>) -> indicatif::ProgressBar {
    if quiet {
        return indicatif::ProgressBar::hidden();
    }
    if let Some(t) = total {
        let pb = indicatif::ProgressBar::new(t);
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("    {bar:40.cyan/dim} {percent}%  {bytes}/{total_bytes}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
                .progress_chars("━━─"),
        );
        pb
    } else {
        indicatif::ProgressBar::new_spinner()
    }
}
