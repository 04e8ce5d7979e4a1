use std::io::Cursor;

use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use pdfdock_core::models::GenerateRequest;
use pdfdock_core::{has_allowed_extension, ALLOWED_LOGO_EXTENSIONS};

use crate::error::RenderError;
use crate::layout::{
    centered_x, paginate, wrap_text, BODY_LEADING, BODY_SIZE, FOOTER_BASELINE, FOOTER_SIZE,
    HEADER_BOTTOM, HEADER_NAME_SIZE, LOGO_WIDTH, MARGIN, META_SIZE, PAGE_HEIGHT, PAGE_WIDTH,
    TITLE_BLOCK_HEIGHT, TITLE_SIZE,
};

/// Bundled fallback logo, used whenever the request carries no usable logo URL.
const DEFAULT_LOGO: &[u8] = include_bytes!("../assets/default_logo.png");

const LOGO_TOP: f32 = PAGE_HEIGHT - 40.0;

/// Where the header logo comes from.
#[derive(Debug, PartialEq, Eq)]
enum LogoSource<'a> {
    Remote(&'a str),
    Default,
}

/// A remote logo is trusted only when its URL carries an allowed image
/// extension; anything else falls back to the bundled default.
fn resolve_logo(logo_url: Option<&str>) -> LogoSource<'_> {
    match logo_url {
        Some(url) if !url.is_empty() && has_allowed_extension(url, &ALLOWED_LOGO_EXTENSIONS) => {
            LogoSource::Remote(url)
        }
        _ => LogoSource::Default,
    }
}

struct DecodedLogo {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

fn decode_logo(bytes: &[u8]) -> Result<DecodedLogo, RenderError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| RenderError::LogoDecode(e.to_string()))?
        .to_rgb8();
    let (width, height) = img.dimensions();
    Ok(DecodedLogo {
        width,
        height,
        rgb: img.into_raw(),
    })
}

/// WinAnsi (Latin-1) text bytes; characters outside the codepage degrade to '?'.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let cp = c as u32;
            if cp < 256 {
                cp as u8
            } else {
                b'?'
            }
        })
        .collect()
}

fn show_text(ops: &mut Vec<Operation>, font: &str, size: f32, x: f32, y: f32, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn draw_logo(ops: &mut Vec<Operation>, logo: &DecodedLogo) {
    let scaled_height = LOGO_WIDTH * logo.height as f32 / logo.width.max(1) as f32;
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new(
        "cm",
        vec![
            LOGO_WIDTH.into(),
            0.into(),
            0.into(),
            scaled_height.into(),
            MARGIN.into(),
            (LOGO_TOP - scaled_height).into(),
        ],
    ));
    ops.push(Operation::new("Do", vec!["Im1".into()]));
    ops.push(Operation::new("Q", vec![]));
}

/// Renders report PDFs in memory.
///
/// Holds the HTTP client used for remote logo fetches; construction is cheap
/// and the renderer is freely cloneable.
#[derive(Clone, Default)]
pub struct ReportRenderer {
    http: reqwest::Client,
}

impl ReportRenderer {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Render the report described by `req` into finished PDF bytes.
    ///
    /// Synchronous apart from the logo fetch; deterministic for equal inputs
    /// except for the embedded generation timestamp.
    pub async fn render(&self, req: &GenerateRequest) -> Result<Vec<u8>, RenderError> {
        let logo_bytes = match resolve_logo(req.logo_url.as_deref()) {
            LogoSource::Remote(url) => {
                tracing::debug!(url = %url, "Fetching remote logo");
                self.fetch_logo(url).await?
            }
            LogoSource::Default => DEFAULT_LOGO.to_vec(),
        };
        let logo = decode_logo(&logo_bytes)?;

        compose(req, &logo, Utc::now())
    }

    async fn fetch_logo(&self, url: &str) -> Result<Vec<u8>, RenderError> {
        let response = self.http.get(url).send().await.map_err(|e| RenderError::LogoFetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(RenderError::LogoFetch {
                url: url.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let bytes = response.bytes().await.map_err(|e| RenderError::LogoFetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(bytes.to_vec())
    }
}

fn compose(
    req: &GenerateRequest,
    logo: &DecodedLogo,
    now: DateTime<Utc>,
) -> Result<Vec<u8>, RenderError> {
    let body_lines = wrap_text(&req.content, BODY_SIZE, PAGE_WIDTH - 2.0 * MARGIN);
    let pages = paginate(body_lines);
    let page_total = pages.len();
    let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
    let date_line = format!("Date: {}", now.format("%d %B %Y"));

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font", "Subtype" => "Type1", "BaseFont" => "Helvetica", "Encoding" => "WinAnsiEncoding",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font", "Subtype" => "Type1", "BaseFont" => "Helvetica-Bold", "Encoding" => "WinAnsiEncoding",
    });
    let font_oblique = doc.add_object(dictionary! {
        "Type" => "Font", "Subtype" => "Type1", "BaseFont" => "Helvetica-Oblique", "Encoding" => "WinAnsiEncoding",
    });

    let logo_id = doc.add_object(Object::Stream(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => logo.width as i64,
            "Height" => logo.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        logo.rgb.clone(),
    )));

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_regular, "F2" => font_bold, "F3" => font_oblique },
        "XObject" => dictionary! { "Im1" => logo_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(page_total);
    for (index, page_lines) in pages.iter().enumerate() {
        let page_no = index + 1;
        let mut ops: Vec<Operation> = Vec::new();

        // Header, repeated on every page
        draw_logo(&mut ops, logo);
        show_text(
            &mut ops,
            "F2",
            HEADER_NAME_SIZE,
            centered_x(&req.institution_name, HEADER_NAME_SIZE),
            PAGE_HEIGHT - 70.0,
            &req.institution_name,
        );
        if !req.address.is_empty() {
            show_text(
                &mut ops,
                "F1",
                META_SIZE,
                centered_x(&req.address, META_SIZE),
                PAGE_HEIGHT - 86.0,
                &req.address,
            );
        }
        if !req.phone.is_empty() {
            show_text(
                &mut ops,
                "F1",
                META_SIZE,
                centered_x(&req.phone, META_SIZE),
                PAGE_HEIGHT - 98.0,
                &req.phone,
            );
        }

        // Title and date only lead the first page; body flows after them.
        let mut cursor_y = if page_no == 1 {
            show_text(
                &mut ops,
                "F2",
                TITLE_SIZE,
                MARGIN,
                HEADER_BOTTOM - TITLE_SIZE,
                &req.title,
            );
            show_text(
                &mut ops,
                "F1",
                META_SIZE,
                MARGIN,
                HEADER_BOTTOM - TITLE_SIZE - 20.0,
                &date_line,
            );
            HEADER_BOTTOM - TITLE_BLOCK_HEIGHT
        } else {
            HEADER_BOTTOM
        };

        for line in page_lines {
            if !line.is_empty() {
                show_text(&mut ops, "F1", BODY_SIZE, MARGIN, cursor_y, line);
            }
            cursor_y -= BODY_LEADING;
        }

        let footer = format!(
            "Page {} of {} | Generated: {}",
            page_no, page_total, timestamp
        );
        show_text(
            &mut ops,
            "F3",
            FOOTER_SIZE,
            centered_x(&footer, FOOTER_SIZE),
            FOOTER_BASELINE,
            &footer,
        );

        let content = Content { operations: ops };
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        let content_id = doc.add_object(Object::Stream(Stream::new(Dictionary::new(), encoded)));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_total as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog", "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Cursor::new(Vec::new());
    doc.save_to(&mut buffer)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(content: &str) -> GenerateRequest {
        GenerateRequest {
            title: "Monthly Report".to_string(),
            institution_name: "Acme Institute".to_string(),
            address: "1 Main Street".to_string(),
            phone: "+1 555 0100".to_string(),
            logo_url: None,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_resolve_logo_allow_list() {
        assert_eq!(
            resolve_logo(Some("https://cdn.example.com/logo.png")),
            LogoSource::Remote("https://cdn.example.com/logo.png")
        );
        assert_eq!(
            resolve_logo(Some("https://cdn.example.com/LOGO.JPG")),
            LogoSource::Remote("https://cdn.example.com/LOGO.JPG")
        );
        assert_eq!(resolve_logo(Some("https://cdn.example.com/logo.gif")), LogoSource::Default);
        assert_eq!(resolve_logo(Some("")), LogoSource::Default);
        assert_eq!(resolve_logo(None), LogoSource::Default);
    }

    #[test]
    fn test_default_logo_decodes() {
        let logo = decode_logo(DEFAULT_LOGO).unwrap();
        assert!(logo.width > 0);
        assert!(logo.height > 0);
        assert_eq!(logo.rgb.len(), (logo.width * logo.height * 3) as usize);
    }

    #[test]
    fn test_win_ansi_degrades_unmappable_chars() {
        assert_eq!(encode_win_ansi("abc"), b"abc".to_vec());
        assert_eq!(encode_win_ansi("caf\u{e9}"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(encode_win_ansi("\u{4e16}"), vec![b'?']);
    }

    #[tokio::test]
    async fn test_render_produces_valid_pdf() {
        let renderer = ReportRenderer::new();
        let bytes = renderer.render(&request("A short body.")).await.unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[tokio::test]
    async fn test_render_long_content_spans_pages() {
        let content = (0..120)
            .map(|i| format!("Paragraph line number {} of the report body.", i))
            .collect::<Vec<_>>()
            .join("\n");
        let renderer = ReportRenderer::new();
        let bytes = renderer.render(&request(&content)).await.unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() >= 2);
    }
}
