//! Marker-delimited region merge
//!
//! Generated files wrap their machine-owned sections in named marker pairs:
//!
//! ```text
//! // kestrel:begin:views
//! ...generated code...
//! // kestrel:end:views
//! ```
//!
//! Markers are matched by substring, so the same syntax works behind `//`,
//! `#`, and `<!-- -->` comment styles. On regeneration, only the inside of a
//! marked region is replaced; every byte outside the markers is preserved,
//! which is what makes hand edits around generated code safe. A file without
//! markers is simply overwritten, which keeps regeneration idempotent.

use crate::error::{Error, Result};

/// Substring that opens a region; the region name follows immediately.
pub const BEGIN_TOKEN: &str = "kestrel:begin:";
/// Substring that closes a region; the region name follows immediately.
pub const END_TOKEN: &str = "kestrel:end:";

#[derive(Debug)]
struct Region {
    name: String,
    /// Index of the marker line that opens the region
    begin: usize,
    /// Index of the marker line that closes the region
    end: usize,
}

fn marker_name(line: &str, token: &str) -> Option<String> {
    let start = line.find(token)? + token.len();
    let name: String = line[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    (!name.is_empty()).then_some(name)
}

fn scan(lines: &[&str]) -> Result<Vec<Region>> {
    let mut regions = Vec::new();
    let mut open: Option<(String, usize)> = None;
    for (idx, line) in lines.iter().enumerate() {
        if let Some(name) = marker_name(line, BEGIN_TOKEN) {
            if let Some((current, _)) = open {
                return Err(Error::UnterminatedMarker(current));
            }
            open = Some((name, idx));
        } else if let Some(name) = marker_name(line, END_TOKEN) {
            match open.take() {
                Some((current, begin)) if current == name => {
                    regions.push(Region { name, begin, end: idx });
                }
                _ => return Err(Error::DanglingEndMarker(name)),
            }
        }
    }
    if let Some((current, _)) = open {
        return Err(Error::UnterminatedMarker(current));
    }
    Ok(regions)
}

/// Merge freshly generated content into an existing file.
///
/// When `existing` contains no markers the generated text wins wholesale.
/// Otherwise each marked region in `existing` whose name also exists in
/// `generated` gets its interior replaced; generated regions absent from
/// `existing` are appended at the end of the file; text outside markers is
/// untouched.
///
/// # Errors
///
/// Returns a marker error when either side contains an unterminated or
/// dangling marker.
pub fn merge(existing: &str, generated: &str) -> Result<String> {
    let generated_lines: Vec<&str> = generated.lines().collect();
    let generated_regions = scan(&generated_lines)?;

    let existing_lines: Vec<&str> = existing.lines().collect();
    let existing_regions = scan(&existing_lines)?;
    if existing_regions.is_empty() {
        return Ok(generated.to_string());
    }

    let mut output: Vec<&str> = Vec::with_capacity(existing_lines.len());
    let mut cursor = 0;
    for region in &existing_regions {
        let replacement = generated_regions.iter().find(|g| g.name == region.name);
        // Copy everything up to and including the begin marker line.
        output.extend_from_slice(&existing_lines[cursor..=region.begin]);
        match replacement {
            Some(generated_region) => {
                output.extend_from_slice(
                    &generated_lines[generated_region.begin + 1..generated_region.end],
                );
            }
            None => {
                // Region the generator no longer produces; leave it alone.
                output.extend_from_slice(&existing_lines[region.begin + 1..region.end]);
            }
        }
        output.push(existing_lines[region.end]);
        cursor = region.end + 1;
    }
    output.extend_from_slice(&existing_lines[cursor..]);

    // New regions the existing file has never seen get appended whole.
    for generated_region in &generated_regions {
        if !existing_regions.iter().any(|e| e.name == generated_region.name) {
            output.push("");
            output.extend_from_slice(
                &generated_lines[generated_region.begin..=generated_region.end],
            );
        }
    }

    let mut merged = output.join("\n");
    merged.push('\n');
    Ok(merged)
}
