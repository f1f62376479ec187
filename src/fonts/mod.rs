//! Font resolution for the flow layout pipeline.
//!
//! `genpdf` measures text with TrueType metrics, so a font family has to be found on disk even
//! though the document itself references the built-in Helvetica faces. Helvetica text is written
//! with a single-byte encoding and stays extractable by text-based PDF readers, which is what the
//! invoice fixtures are for. Metric-compatible families (Liberation Sans, Arial) are preferred;
//! DejaVu Sans ships in `assets/fonts` so the layout always has metrics to work with.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{FontData, FontFamily};
use log::{debug, warn};
use printpdf::BuiltinFont;

/// Environment variable pointing at a directory that holds a supported font family.
pub const FONTS_DIR_ENV: &str = "FACTURE_FONTS_DIR";

/// Environment variable overriding the Windows font directory used as a last resort.
pub const WINDOWS_FONTS_DIR_ENV: &str = "FACTURE_WINDOWS_FONTS_DIR";

/// File names of the four styles of a font family.
#[derive(Clone, Copy, Debug)]
pub struct FamilyFiles {
    pub name: &'static str,
    pub regular: &'static str,
    pub bold: &'static str,
    pub italic: &'static str,
    pub bold_italic: &'static str,
}

impl FamilyFiles {
    /// Style files paired with the built-in Helvetica face that replaces them in the PDF.
    fn styles(&self) -> [(&'static str, BuiltinFont, &'static str); 4] {
        [
            (self.regular, BuiltinFont::Helvetica, "regular"),
            (self.bold, BuiltinFont::HelveticaBold, "bold"),
            (self.italic, BuiltinFont::HelveticaOblique, "italic"),
            (self.bold_italic, BuiltinFont::HelveticaBoldOblique, "bold italic"),
        ]
    }
}

/// Families accepted inside a font directory, in order of preference.
pub const SUPPORTED_FAMILIES: &[FamilyFiles] = &[
    FamilyFiles {
        name: "LiberationSans",
        regular: "LiberationSans-Regular.ttf",
        bold: "LiberationSans-Bold.ttf",
        italic: "LiberationSans-Italic.ttf",
        bold_italic: "LiberationSans-BoldItalic.ttf",
    },
    FamilyFiles {
        name: "Roboto",
        regular: "Roboto-Regular.ttf",
        bold: "Roboto-Bold.ttf",
        italic: "Roboto-Italic.ttf",
        bold_italic: "Roboto-BoldItalic.ttf",
    },
    FamilyFiles {
        name: "DejaVuSans",
        regular: "DejaVuSans.ttf",
        bold: "DejaVuSans-Bold.ttf",
        italic: "DejaVuSans-Oblique.ttf",
        bold_italic: "DejaVuSans-BoldOblique.ttf",
    },
];

const WINDOWS_ARIAL: FamilyFiles = FamilyFiles {
    name: "Arial",
    regular: "arial.ttf",
    bold: "arialbd.ttf",
    italic: "ariali.ttf",
    bold_italic: "arialbi.ttf",
};

const SYSTEM_FONT_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/TTF",
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu",
];

/// Directory holding fonts bundled with the crate sources.
pub fn bundled_fonts_source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

/// Directories searched in order. The bundled directory comes last so that a metric-compatible
/// system family wins over the bundled DejaVu Sans.
fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    let mut push = |candidate: PathBuf| {
        if !candidates.iter().any(|existing| existing == &candidate) {
            candidates.push(candidate);
        }
    };

    if let Some(path) = env_path(FONTS_DIR_ENV) {
        push(path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push(bin_dir.join("assets/fonts"));
        }
    }

    for directory in SYSTEM_FONT_DIRECTORIES {
        push(PathBuf::from(directory));
    }

    push(bundled_fonts_source_dir());

    candidates
}

fn missing_font_files(path: &Path, family: &FamilyFiles) -> Vec<&'static str> {
    family
        .styles()
        .iter()
        .map(|(file, _, _)| *file)
        .filter(|file| !path.join(file).is_file())
        .collect()
}

/// Finds the first candidate directory that contains a complete supported family.
fn resolve_font_directory() -> Result<(PathBuf, &'static FamilyFiles), Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates() {
        if !candidate.is_dir() {
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }

        for family in SUPPORTED_FAMILIES {
            let missing = missing_font_files(&candidate, family);
            if missing.is_empty() {
                return Ok((candidate, family));
            }
            attempts.push(format!(
                "{} (missing files [{}])",
                candidate.display(),
                missing.join(", ")
            ));
        }
    }

    Err(Error::new(
        format!(
            "Unable to locate a supported font family. Checked: {}. Set {} to a directory \
             containing LiberationSans-*.ttf.",
            attempts.join(", "),
            FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "font directory not found"),
    ))
}

fn load_font_file(
    directory: &Path,
    file: &str,
    builtin: BuiltinFont,
    style: &str,
) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, Some(builtin)).map_err(|err| {
        let io_kind = if path.is_file() {
            io::ErrorKind::Other
        } else {
            io::ErrorKind::NotFound
        };
        Error::new(
            format!(
                "Failed to load {} font at {}: {}",
                style,
                path.display(),
                err
            ),
            io::Error::new(io_kind, err.to_string()),
        )
    })
}

fn load_family(directory: &Path, family: &FamilyFiles) -> Result<FontFamily<FontData>, Error> {
    let [regular, bold, italic, bold_italic] = family.styles();
    let load = |(file, builtin, style): (&'static str, BuiltinFont, &'static str)| {
        load_font_file(directory, file, builtin, style)
    };

    Ok(FontFamily {
        regular: load(regular)?,
        bold: load(bold)?,
        italic: load(italic)?,
        bold_italic: load(bold_italic)?,
    })
}

fn load_font_family() -> Result<FontFamily<FontData>, Error> {
    let (directory, family) = resolve_font_directory()?;
    debug!(
        "Loading font family '{}' from {}",
        family.name,
        directory.display()
    );
    load_family(&directory, family)
}

fn windows_font_directory() -> Option<PathBuf> {
    if let Some(path) = env_path(WINDOWS_FONTS_DIR_ENV) {
        return Some(path);
    }

    #[cfg(windows)]
    {
        for var in ["WINDIR", "SystemRoot"] {
            if let Some(root) = env_path(var) {
                let candidate = root.join("Fonts");
                if candidate.is_dir() {
                    return Some(candidate);
                }
            }
        }
    }

    None
}

fn windows_fallback_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = windows_font_directory().ok_or_else(|| {
        Error::new(
            "Windows font directory not found for fallback",
            io::Error::new(io::ErrorKind::NotFound, "windows fonts directory not found"),
        )
    })?;

    load_family(&directory, &WINDOWS_ARIAL)
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Returns the font family used for layout metrics, falling back to the Windows Arial family
/// when no supported family is found in the regular search path.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    match load_font_family() {
        Ok(family) => Ok(family),
        Err(err) if fonts_missing(&err) => match windows_fallback_font_family() {
            Ok(fallback) => {
                warn!("Fonts unavailable ({}); falling back to Windows 'Arial' family.", err);
                Ok(fallback)
            }
            Err(fallback_err) => {
                warn!(
                    "Fonts unavailable ({}); Windows fallback failed: {}",
                    err, fallback_err
                );
                Err(Error::new(
                    format!(
                        "No font family available and Windows fallback failed: {}",
                        fallback_err
                    ),
                    io::Error::new(io::ErrorKind::NotFound, "default fonts are not available"),
                ))
            }
        },
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use printpdf::BuiltinFont;

    use super::{
        bundled_fonts_source_dir, default_font_family, font_directory_candidates, fonts_missing,
        load_font_file, missing_font_files, SUPPORTED_FAMILIES, WINDOWS_ARIAL,
    };

    #[test]
    fn bundled_directory_is_searched_last() {
        let bundled = bundled_fonts_source_dir();
        assert_eq!(font_directory_candidates().last(), Some(&bundled));
    }

    #[test]
    fn candidates_are_unique() {
        let candidates = font_directory_candidates();
        for (index, candidate) in candidates.iter().enumerate() {
            assert!(!candidates[index + 1..].contains(candidate));
        }
    }

    #[test]
    fn missing_files_are_reported_per_style() {
        let missing = missing_font_files(Path::new("/__facture_no_such_dir__"), &WINDOWS_ARIAL);
        assert_eq!(
            missing,
            vec!["arial.ttf", "arialbd.ttf", "ariali.ttf", "arialbi.ttf"]
        );
    }

    #[test]
    fn bundled_directory_holds_a_complete_family() {
        let bundled = bundled_fonts_source_dir();
        assert!(SUPPORTED_FAMILIES
            .iter()
            .any(|family| missing_font_files(&bundled, family).is_empty()));
    }

    #[test]
    fn absent_font_file_maps_to_not_found() {
        let result = load_font_file(
            Path::new("/__facture_no_such_dir__"),
            WINDOWS_ARIAL.regular,
            BuiltinFont::Helvetica,
            "regular",
        );
        match result {
            Ok(_) => panic!("loading a missing font file must fail"),
            Err(err) => {
                assert!(fonts_missing(&err), "unexpected error kind: {err}");
                assert!(err.to_string().contains("arial.ttf"));
            }
        }
    }

    #[test]
    fn default_family_loads_without_configuration() {
        assert!(default_font_family().is_ok());
    }
}
