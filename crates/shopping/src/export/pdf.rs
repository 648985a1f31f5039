//! Minimal PDF 1.4 writer for text-only documents.
//!
//! A4 pages, Helvetica in WinAnsiEncoding, one text line per row. No
//! timestamps or ids are embedded so identical input gives identical bytes.

const PAGE_WIDTH: u32 = 595;
const PAGE_HEIGHT: u32 = 842;
const MARGIN: u32 = 56;
const TITLE_SIZE: u32 = 16;
const FONT_SIZE: u32 = 12;
const LEADING: u32 = 18;
pub(crate) const ROWS_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize - 2;

pub(crate) fn render(title: &str, lines: &[String]) -> Vec<u8> {
    let pages: Vec<&[String]> = if lines.is_empty() {
        vec![lines]
    } else {
        lines.chunks(ROWS_PER_PAGE).collect()
    };

    // 1: catalog, 2: page tree, 3: font, then a (page, content) pair per page
    let mut objects: Vec<Vec<u8>> = Vec::with_capacity(3 + pages.len() * 2);
    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());

    let kids = (0..pages.len())
        .map(|index| format!("{} 0 R", page_object_id(index)))
        .collect::<Vec<_>>()
        .join(" ");
    objects.push(
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()).into_bytes(),
    );
    objects.push(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    );

    for (index, rows) in pages.iter().enumerate() {
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                page_object_id(index) + 1
            )
            .into_bytes(),
        );

        let content = page_content(if index == 0 { Some(title) } else { None }, rows);
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(&content);
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);
    }

    let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref = out.len();
    out.extend_from_slice(
        format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes(),
    );
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref
        )
        .as_bytes(),
    );

    out
}

fn page_object_id(index: usize) -> usize {
    4 + index * 2
}

fn page_content(title: Option<&str>, rows: &[String]) -> Vec<u8> {
    let top = PAGE_HEIGHT - MARGIN;
    let mut content = format!("BT\n{LEADING} TL\n{MARGIN} {top} Td\n").into_bytes();

    if let Some(title) = title {
        content.extend_from_slice(format!("/F1 {TITLE_SIZE} Tf\n").as_bytes());
        push_text(&mut content, title);
        content.extend_from_slice(b"T*\n");
    }

    content.extend_from_slice(format!("/F1 {FONT_SIZE} Tf\n").as_bytes());
    for row in rows {
        content.extend_from_slice(b"T*\n");
        push_text(&mut content, row);
    }
    content.extend_from_slice(b"ET");

    content
}

/// Append `(text) Tj`, escaped and encoded as WinAnsi.
fn push_text(content: &mut Vec<u8>, text: &str) {
    content.push(b'(');
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                content.push(b'\\');
                content.push(ch as u8);
            }
            '—' => content.push(0x97),
            '–' => content.push(0x96),
            ' '..='~' => content.push(ch as u8),
            '\u{a0}'..='\u{ff}' => content.push(ch as u32 as u8),
            _ => content.push(b'?'),
        }
    }
    content.extend_from_slice(b") Tj\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_pdf_structure() {
        let pdf = render("Shopping list:", &["tomato — 500 g".to_owned()]);

        assert!(pdf.starts_with(b"%PDF-1.4\n"));
        assert!(pdf.ends_with(b"%%EOF\n"));
        assert!(contains(&pdf, b"/Count 1"));
        assert!(contains(&pdf, b"(Shopping list:) Tj"));
        assert!(contains(&pdf, b"(tomato \x97 500 g) Tj"));
    }

    #[test]
    fn test_pdf_xref_offsets_point_at_objects() {
        let pdf = render("Title", &["a — 1 g".to_owned(), "b — 2 g".to_owned()]);
        let text = String::from_utf8_lossy(&pdf);

        let xref_at: usize = text
            .rsplit("startxref\n")
            .next()
            .and_then(|tail| tail.lines().next())
            .and_then(|n| n.parse().ok())
            .unwrap();
        assert!(pdf[xref_at..].starts_with(b"xref\n"));

        let offsets: Vec<usize> = String::from_utf8_lossy(&pdf[xref_at..])
            .lines()
            .skip(3)
            .take_while(|line| line.ends_with(" n "))
            .map(|line| line[..10].parse().unwrap())
            .collect();
        assert_eq!(offsets.len(), 5);
        for (index, offset) in offsets.iter().enumerate() {
            let header = format!("{} 0 obj\n", index + 1);
            assert!(pdf[*offset..].starts_with(header.as_bytes()));
        }
    }

    #[test]
    fn test_pdf_paginates() {
        let lines: Vec<String> = (0..ROWS_PER_PAGE + 1)
            .map(|i| format!("item {i:03} — 1 pcs"))
            .collect();
        let pdf = render("Title", &lines);

        assert!(contains(&pdf, b"/Count 2"));
        assert!(contains(&pdf, b"/Kids [4 0 R 6 0 R]"));
    }

    #[test]
    fn test_pdf_escapes_text() {
        let mut content = Vec::new();
        push_text(&mut content, "salt (sea) \\ соль é");
        assert_eq!(content, b"(salt \\(sea\\) \\\\ ???? \xE9) Tj\n");
    }

    #[test]
    fn test_pdf_empty_list_has_one_page() {
        let pdf = render("Title", &[]);
        assert!(contains(&pdf, b"/Count 1"));
    }
}
