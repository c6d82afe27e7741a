#![allow(dead_code)]

use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;

/// Builds an in-memory zip archive from `(name, content)` pairs.
pub fn zip_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, content) in files {
        writer
            .start_file(*name, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Builds an in-memory gzip-compressed tar archive from `(name, content)`
/// pairs.
pub fn tar_gz_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, *name, *content).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

/// The chromedriver executable filename for the OS the tests run on.
pub fn chromedriver_name() -> &'static str {
    if cfg!(windows) { "chromedriver.exe" } else { "chromedriver" }
}

pub fn geckodriver_name() -> &'static str {
    if cfg!(windows) { "geckodriver.exe" } else { "geckodriver" }
}

pub fn msedgedriver_name() -> &'static str {
    if cfg!(windows) { "msedgedriver.exe" } else { "msedgedriver" }
}

/// The platform string the Chrome for Testing catalogs use for this OS.
pub fn chromium_platform() -> &'static str {
    match std::env::consts::OS {
        "windows" => "win64",
        "macos" => "mac-x64",
        _ => "linux64",
    }
}

/// The suffix in Microsoft's `edgedriver_{suffix}.zip` artifact names.
pub fn edge_suffix() -> &'static str {
    match std::env::consts::OS {
        "windows" => "win64",
        "macos" => "mac64",
        _ => "linux64",
    }
}
