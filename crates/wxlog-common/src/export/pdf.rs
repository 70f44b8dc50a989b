//! PDF document export
//!
//! Writes a plain PDF 1.4 file: A4 pages, the built-in Helvetica font, one
//! text line per record under a "Weather Records" title. Lines wider than the
//! page wrap onto continuation lines and pages break when full.

use super::{single_line, DISPLAY_TIMESTAMP_FORMAT};
use crate::types::WeatherRecord;

pub const TITLE: &str = "Weather Records";

const PAGE_WIDTH: u32 = 595;
const PAGE_HEIGHT: u32 = 842;
const MARGIN: u32 = 40;
const FONT_SIZE: u32 = 10;
const LEADING: u32 = 14;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize;
/// Usable line width in glyph units (1/1000 em at `FONT_SIZE`)
const LINE_WIDTH_UNITS: u32 = (PAGE_WIDTH - 2 * MARGIN) * 1000 / FONT_SIZE;

/// Helvetica advance widths for 0x20..=0x7E (WinAnsi)
#[rustfmt::skip]
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica advance widths for 0xA0..=0xFF (WinAnsi)
#[rustfmt::skip]
const LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Render records as a paginated PDF document
pub fn render(records: &[WeatherRecord]) -> Vec<u8> {
    let mut lines = vec![TITLE.to_string()];
    for record in records {
        lines.extend(wrap(&record_line(record), LINE_WIDTH_UNITS));
    }

    let pages: Vec<&[String]> = lines.chunks(LINES_PER_PAGE).collect();
    tracing::trace!(lines = lines.len(), pages = pages.len(), "Laying out PDF");

    PdfWriter::default().finish(&pages)
}

/// One document line per record
pub fn record_line(r: &WeatherRecord) -> String {
    format!(
        "{} | {} | {} | {} | {:?}",
        r.id,
        single_line(&r.query),
        single_line(&r.location),
        r.date_queried.format(DISPLAY_TIMESTAMP_FORMAT),
        r.temperature
    )
}

/// Advance width of one glyph as drawn; unencodable characters print as `?`
fn glyph_width(ch: char) -> u32 {
    let width = match ch as u32 {
        c @ 0x20..=0x7E => ASCII_WIDTHS[(c - 0x20) as usize],
        c @ 0xA0..=0xFF => LATIN1_WIDTHS[(c - 0xA0) as usize],
        _ => ASCII_WIDTHS[(b'?' - 0x20) as usize],
    };
    u32::from(width)
}

fn text_width(text: &str) -> u32 {
    text.chars().map(glyph_width).sum()
}

/// Greedy word wrap to `max_width` glyph units; words wider than a line are split
fn wrap(line: &str, max_width: u32) -> Vec<String> {
    let space = glyph_width(' ');
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in line.split(' ') {
        let word_width = text_width(word);
        if !current.is_empty() && current_width + space + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
            continue;
        }
        if !current.is_empty() {
            out.push(std::mem::take(&mut current));
            current_width = 0;
        }

        for ch in word.chars() {
            let width = glyph_width(ch);
            if !current.is_empty() && current_width + width > max_width {
                out.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += width;
        }
    }

    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

/// Encode text as a PDF literal string body (WinAnsi / Latin-1)
fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(ch as u8);
            },
            ' '..='~' | '\u{A0}'..='\u{FF}' => out.push(ch as u32 as u8),
            _ => out.push(b'?'),
        }
    }
    out
}

#[derive(Default)]
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn finish(mut self, pages: &[&[String]]) -> Vec<u8> {
        self.buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        // 1: catalog, 2: page tree, 3: font, then a (page, content) pair per page
        let kids = (0..pages.len())
            .map(|i| format!("{} 0 R", 4 + 2 * i))
            .collect::<Vec<_>>()
            .join(" ");

        self.object(b"<< /Type /Catalog /Pages 2 0 R >>");
        self.object(format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()).as_bytes());
        self.object(
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
        );

        for (i, lines) in pages.iter().enumerate() {
            let content_id = 5 + 2 * i;
            self.object(
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                     /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                    PAGE_WIDTH, PAGE_HEIGHT, content_id
                )
                .as_bytes(),
            );

            let stream = content_stream(lines);
            let mut body = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
            body.extend_from_slice(&stream);
            body.extend_from_slice(b"\nendstream");
            self.object(&body);
        }

        let xref_offset = self.buf.len();
        let count = self.offsets.len() + 1;
        self.buf
            .extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", count).as_bytes());
        for offset in &self.offsets {
            self.buf
                .extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        self.buf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                count, xref_offset
            )
            .as_bytes(),
        );

        self.buf
    }

    /// Append the next object; ids are assigned sequentially from 1
    fn object(&mut self, body: &[u8]) {
        self.offsets.push(self.buf.len());
        let id = self.offsets.len();
        self.buf.extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }
}

fn content_stream(lines: &[String]) -> Vec<u8> {
    let mut stream = format!(
        "BT\n/F1 {} Tf\n{} TL\n{} {} Td\n",
        FONT_SIZE,
        LEADING,
        MARGIN,
        PAGE_HEIGHT - MARGIN
    )
    .into_bytes();

    for line in lines {
        stream.push(b'(');
        stream.extend_from_slice(&encode_text(line));
        stream.extend_from_slice(b") Tj\nT*\n");
    }
    stream.extend_from_slice(b"ET");
    stream
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::export::fixtures;

    fn text(output: &[u8]) -> String {
        String::from_utf8_lossy(output).into_owned()
    }

    #[test]
    fn test_document_structure() {
        let output = render(&fixtures::sample());
        let doc = text(&output);

        assert!(doc.starts_with("%PDF-1.4"));
        assert!(doc.ends_with("%%EOF\n"));
        assert!(doc.contains("(Weather Records) Tj"));
        assert!(doc.contains("/Count 1"));
        assert!(doc.contains("(1 | Paris | Paris, France | 2024-01-01 09:30:00 | 7.2) Tj"));
    }

    #[test]
    fn test_records_appear_once_in_order() {
        let records = fixtures::sample();
        let doc = text(&render(&records));

        let positions: Vec<usize> = records
            .iter()
            .map(|r| {
                let needle = format!("({} | {} |", r.id, r.query);
                assert_eq!(doc.matches(&needle).count(), 1);
                doc.find(&needle).unwrap()
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_paginates_long_collections() {
        let records: Vec<_> = (1..=120)
            .map(|i| fixtures::record(i, "Paris", "Paris, France", 5.0))
            .collect();
        let doc = text(&render(&records));

        // 121 lines at 54 per page
        assert!(doc.contains("/Count 3"));
        assert_eq!(doc.matches("/Type /Page ").count(), 3);
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let output = render(&fixtures::sample());

        let startxref = output
            .windows(10)
            .rposition(|w| w == b"startxref\n")
            .unwrap();
        let tail = std::str::from_utf8(&output[startxref + 10..]).unwrap();
        let offset: usize = tail.lines().next().unwrap().parse().unwrap();
        assert!(output[offset..].starts_with(b"xref\n"));

        let table = std::str::from_utf8(&output[offset..]).unwrap();
        let entries: Vec<usize> = table
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();
        assert_eq!(entries.len(), 5);
        for (i, off) in entries.iter().enumerate() {
            assert!(output[*off..].starts_with(format!("{} 0 obj", i + 1).as_bytes()));
        }
    }

    #[test]
    fn test_escapes_and_replaces_characters() {
        assert_eq!(encode_text("a(b)c\\"), b"a\\(b\\)c\\\\".to_vec());
        assert_eq!(encode_text("Zürich"), vec![b'Z', 0xFC, b'r', b'i', b'c', b'h']);
        assert_eq!(encode_text("東京"), b"??".to_vec());
    }

    #[test]
    fn test_wrap_long_lines() {
        let line = "word ".repeat(50);
        let max = 4 * text_width("word ");
        let wrapped = wrap(line.trim_end(), max);
        assert!(wrapped.iter().all(|l| text_width(l) <= max));
        assert_eq!(wrapped.join(" "), line.trim_end());

        let long = "x".repeat(45);
        let max = 20 * glyph_width('x');
        assert_eq!(wrap(&long, max), vec!["x".repeat(20), "x".repeat(20), "x".repeat(5)]);
    }

    #[test]
    fn test_wrap_measures_glyph_widths() {
        // same character count, very different widths
        let narrow = "i".repeat(150);
        assert_eq!(wrap(&narrow, LINE_WIDTH_UNITS), vec![narrow.clone()]);

        let wide = "W".repeat(150);
        let wrapped = wrap(&wide, LINE_WIDTH_UNITS);
        assert!(wrapped.len() > 1);
        assert!(wrapped.iter().all(|l| text_width(l) <= LINE_WIDTH_UNITS));
        assert_eq!(wrapped.concat(), wide);
    }

    #[test]
    fn test_wide_record_stays_inside_text_area() {
        let record = fixtures::record(1, &"W".repeat(60), "Paris, France", 7.2);
        let doc = text(&render(&[record]));

        let shown: Vec<&str> = doc
            .lines()
            .filter_map(|l| l.strip_prefix('(')?.strip_suffix(") Tj"))
            .collect();

        // title plus the record spread over continuation lines
        assert!(shown.len() >= 3);
        assert!(shown.iter().all(|l| text_width(l) <= LINE_WIDTH_UNITS));
        assert_eq!(shown.iter().map(|l| l.matches('W').count()).sum::<usize>(), 60);
        assert!(shown.iter().any(|l| l.contains("Paris, France")));
    }
}
