//! Human-readable summaries of containers, headers, and glyph records.

use std::fmt::Write;

use fontset_core::{FontSet, FontSetHeader, OutlineRecord, Result};

/// Describe every header field, one per line.
pub fn describe_header(header: &FontSetHeader) -> String {
    let mut out = String::new();
    let f = header.flags;
    let _ = writeln!(out, "Length:        {}", header.length);
    let _ = writeln!(out, "FileFlag:      {}", header.file_flag);
    let _ = writeln!(out, "Version:       {}", header.version_str());
    let _ = writeln!(out, "FontSize:      {}", header.font_size);
    let _ = writeln!(out, "RenderMode:    {}", header.render_mode);
    let _ = writeln!(out, "Bold:          {}", u8::from(f.bold()));
    let _ = writeln!(out, "Italic:        {}", u8::from(f.italic()));
    let _ = writeln!(out, "ScanMode:      {}", u8::from(f.scan_mode()));
    let _ = writeln!(out, "IndexMethod:   {}", u8::from(f.index_method()));
    let _ = writeln!(out, "IndexAreaSize: {}", header.index_area_size);
    let _ = writeln!(out, "FontNameLen:   {}", header.font_name_len());
    let _ = writeln!(out, "Ascent:        {}", header.metrics.ascent);
    let _ = writeln!(out, "Descent:       {}", header.metrics.descent);
    let _ = writeln!(out, "LineGap:       {}", header.metrics.line_gap);
    let _ = writeln!(out, "FontName:      {}", header.name());
    out
}

/// Describe one glyph record. With `points`, every contour's vertices too.
pub fn describe_glyph(unicode: u16, record: &OutlineRecord, points: bool) -> String {
    let mut out = String::new();
    let b = record.bbox;
    let _ = writeln!(
        out,
        "Character: U+{unicode:04X}, x0: {}, y0: {}, x1: {}, y1: {}, advance: {}",
        b.x0, b.y0, b.x1, b.y1, record.advance
    );
    let _ = writeln!(out, "Contours: {}", record.contour_count());
    for (i, contour) in record.contours().enumerate() {
        let _ = write!(out, "  contour {i}: {} points", contour.len());
        if points {
            for p in contour {
                let _ = write!(out, " ({}, {})", p.x, p.y);
            }
        }
        out.push('\n');
    }
    out
}

/// Header, the first `entries` index entries, and the first glyph.
pub fn describe_container(data: &[u8], entries: usize) -> Result<String> {
    let set = FontSet::parse(data)?;
    let mut out = describe_header(set.header());

    let _ = writeln!(out, "Entries:       {}", set.len());
    let _ = writeln!(out, "Index\tUnicode\tAddress");
    for (i, entry) in set.entries().take(entries).enumerate() {
        let _ = writeln!(out, "{}\tU+{:04X}\t0x{:08X}", i + 1, entry.unicode, entry.offset);
    }

    if let Some(first) = set.entry(0) {
        let record = set.decode_entry(0)?;
        out.push_str(&describe_glyph(first.unicode, &record, false));
    }
    Ok(out)
}
