//! Proof embedding for paginated documents.
//!
//! Appends a proof overlay to the last page of a PDF: the QR code as a
//! grayscale image, the canonical URL as link text, a provenance note, and
//! a clickable URI annotation. The original pages and content streams are
//! left untouched; the overlay is an additional content stream.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use qrcode::{Color, QrCode};
use tracing::debug;

use docv_digest::DigestEngine;
use docv_types::Record;

use crate::error::EmbedError;
use crate::link;

/// Rendered QR side length in points.
const QR_SIZE_PT: f32 = 120.0;
/// Distance from the page bottom to the QR code.
const QR_BOTTOM_MARGIN_PT: f32 = 100.0;
/// Quiet zone around the QR modules, in modules.
const QUIET_ZONE_MODULES: usize = 4;
/// Fallback page width when no MediaBox is reachable (US Letter).
const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

const TEXT_SIZE_PT: f32 = 8.0;
/// Helvetica's average glyph width relative to the font size; close enough
/// for centering.
const GLYPH_WIDTH_RATIO: f32 = 0.5;
const NOTE_TEXT: &str = "Scan the code or follow the link to verify this document.";

const QR_XOBJECT_NAME: &str = "DocvQr";
const FONT_NAME: &str = "DocvF1";

/// Embed the proof for `record` into a copy of the original document.
///
/// Fails with [`EmbedError::FingerprintMismatch`] when `original` does not
/// hash to `record.fingerprint`: a proof must never be stamped onto the
/// wrong file. Returns the modified document bytes; the input is unchanged
/// except for the appended overlay.
pub fn embed_proof(
    record: &Record,
    base_url: &str,
    original: &[u8],
) -> Result<Vec<u8>, EmbedError> {
    let computed = DigestEngine::fingerprint(original);
    if computed != record.fingerprint {
        return Err(EmbedError::FingerprintMismatch {
            expected: record.fingerprint,
            computed,
        });
    }

    let canonical_url = link::build(base_url, &record.fingerprint)?;

    let mut doc =
        Document::load_mem(original).map_err(|e| EmbedError::PdfParse(e.to_string()))?;
    if doc.is_encrypted() {
        return Err(EmbedError::PdfEncrypted);
    }
    let pages = doc.get_pages();
    let (_, page_id) = pages
        .iter()
        .next_back()
        .map(|(number, id)| (*number, *id))
        .ok_or(EmbedError::NoPages)?;

    let page_width = page_width(&doc, page_id);

    let qr =
        QrCode::new(canonical_url.as_bytes()).map_err(|e| EmbedError::QrEncode(e.to_string()))?;
    let (pixels, side) = qr_pixmap(&qr);
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => side as i64,
            "Height" => side as i64,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
        },
        pixels,
    ));
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    install_resources(&mut doc, page_id, image_id, font_id)?;

    let qr_x = ((page_width - QR_SIZE_PT) / 2.0).max(0.0);
    let qr_y = QR_BOTTOM_MARGIN_PT;
    let overlay = overlay_content(&canonical_url, page_width, qr_x, qr_y)?;
    append_page_content(&mut doc, page_id, overlay)?;

    let url_width = text_width(&canonical_url);
    let url_x = text_x(page_width, url_width);
    let url_y = qr_y - 20.0;
    append_link_annotation(
        &mut doc,
        page_id,
        &canonical_url,
        [url_x, url_y - 2.0, url_x + url_width, url_y + TEXT_SIZE_PT],
    )?;

    debug!(fingerprint = %record.fingerprint.short_id(), "proof overlay appended");

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| EmbedError::Render(e.to_string()))?;
    Ok(out)
}

/// One grayscale byte per module, dark modules black, with a quiet zone.
fn qr_pixmap(qr: &QrCode) -> (Vec<u8>, usize) {
    let width = qr.width();
    let side = width + 2 * QUIET_ZONE_MODULES;
    let mut pixels = vec![0xffu8; side * side];
    for (index, color) in qr.to_colors().into_iter().enumerate() {
        if color == Color::Dark {
            let row = index / width + QUIET_ZONE_MODULES;
            let col = index % width + QUIET_ZONE_MODULES;
            pixels[row * side + col] = 0x00;
        }
    }
    (pixels, side)
}

fn text_width(text: &str) -> f32 {
    text.len() as f32 * TEXT_SIZE_PT * GLYPH_WIDTH_RATIO
}

fn text_x(page_width: f32, width: f32) -> f32 {
    ((page_width - width) / 2.0).max(0.0)
}

fn page_width(doc: &Document, page_id: ObjectId) -> f32 {
    doc.get_dictionary(page_id)
        .ok()
        .and_then(|page| page.get(b"MediaBox").ok())
        .and_then(|media_box| media_box.as_array().ok())
        .and_then(|values| values.get(2))
        .and_then(|value| match value {
            Object::Integer(i) => Some(*i as f32),
            Object::Real(r) => Some(*r),
            _ => None,
        })
        .unwrap_or(DEFAULT_PAGE_WIDTH_PT)
}

fn parse_err(e: lopdf::Error) -> EmbedError {
    EmbedError::PdfParse(e.to_string())
}

/// Register the QR image and overlay font under the page's resources,
/// creating the resource dictionaries that are missing.
fn install_resources(
    doc: &mut Document,
    page_id: ObjectId,
    image_id: ObjectId,
    font_id: ObjectId,
) -> Result<(), EmbedError> {
    enum Location {
        Direct,
        Referenced(ObjectId),
        Missing,
    }

    let location = {
        let page = doc.get_dictionary(page_id).map_err(parse_err)?;
        match page.get(b"Resources") {
            Ok(Object::Reference(id)) => Location::Referenced(*id),
            Ok(_) => Location::Direct,
            Err(_) => Location::Missing,
        }
    };

    let resources: &mut Dictionary = match location {
        Location::Referenced(id) => doc
            .get_object_mut(id)
            .and_then(Object::as_dict_mut)
            .map_err(parse_err)?,
        Location::Direct => doc
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(parse_err)?
            .get_mut(b"Resources")
            .and_then(Object::as_dict_mut)
            .map_err(parse_err)?,
        Location::Missing => {
            let page = doc
                .get_object_mut(page_id)
                .and_then(Object::as_dict_mut)
                .map_err(parse_err)?;
            page.set("Resources", Dictionary::new());
            page.get_mut(b"Resources")
                .and_then(Object::as_dict_mut)
                .map_err(parse_err)?
        }
    };

    if resources
        .get(b"XObject")
        .and_then(Object::as_dict)
        .is_err()
    {
        resources.set("XObject", Dictionary::new());
    }
    resources
        .get_mut(b"XObject")
        .and_then(Object::as_dict_mut)
        .map_err(parse_err)?
        .set(QR_XOBJECT_NAME, Object::Reference(image_id));

    if resources.get(b"Font").and_then(Object::as_dict).is_err() {
        resources.set("Font", Dictionary::new());
    }
    resources
        .get_mut(b"Font")
        .and_then(Object::as_dict_mut)
        .map_err(parse_err)?
        .set(FONT_NAME, Object::Reference(font_id));

    Ok(())
}

/// The overlay's drawing operations: QR image, URL line, note line.
fn overlay_content(
    url: &str,
    page_width: f32,
    qr_x: f32,
    qr_y: f32,
) -> Result<Vec<u8>, EmbedError> {
    let url_x = text_x(page_width, text_width(url));
    let note_x = text_x(page_width, text_width(NOTE_TEXT));

    let operations = vec![
        // QR image, scaled from the unit square.
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                Object::Real(QR_SIZE_PT),
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(QR_SIZE_PT),
                Object::Real(qr_x),
                Object::Real(qr_y),
            ],
        ),
        Operation::new("Do", vec![Object::Name(QR_XOBJECT_NAME.into())]),
        Operation::new("Q", vec![]),
        // Canonical URL, blue, centered under the code.
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(FONT_NAME.into()), Object::Real(TEXT_SIZE_PT)],
        ),
        Operation::new(
            "rg",
            vec![Object::Real(0.0), Object::Real(0.0), Object::Real(1.0)],
        ),
        Operation::new(
            "Td",
            vec![Object::Real(url_x), Object::Real(qr_y - 20.0)],
        ),
        Operation::new("Tj", vec![Object::string_literal(url)]),
        Operation::new("ET", vec![]),
        // Provenance note, gray.
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(FONT_NAME.into()), Object::Real(TEXT_SIZE_PT)],
        ),
        Operation::new(
            "rg",
            vec![Object::Real(0.3), Object::Real(0.3), Object::Real(0.3)],
        ),
        Operation::new(
            "Td",
            vec![Object::Real(note_x), Object::Real(qr_y - 35.0)],
        ),
        Operation::new("Tj", vec![Object::string_literal(NOTE_TEXT)]),
        Operation::new("ET", vec![]),
    ];

    Content { operations }
        .encode()
        .map_err(|e| EmbedError::Render(e.to_string()))
}

/// Append the overlay as an additional content stream, preserving whatever
/// content the page already has.
fn append_page_content(
    doc: &mut Document,
    page_id: ObjectId,
    content: Vec<u8>,
) -> Result<(), EmbedError> {
    let stream_id = doc.add_object(Stream::new(dictionary! {}, content));

    enum Shape {
        Array,
        Single,
        Missing,
    }
    let shape = {
        let page = doc.get_dictionary(page_id).map_err(parse_err)?;
        match page.get(b"Contents") {
            Ok(Object::Array(_)) => Shape::Array,
            Ok(_) => Shape::Single,
            Err(_) => Shape::Missing,
        }
    };

    let page = doc
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(parse_err)?;
    match shape {
        Shape::Array => {
            page.get_mut(b"Contents")
                .and_then(Object::as_array_mut)
                .map_err(parse_err)?
                .push(Object::Reference(stream_id));
        }
        Shape::Single => {
            let existing = page.get(b"Contents").map_err(parse_err)?.clone();
            page.set(
                "Contents",
                Object::Array(vec![existing, Object::Reference(stream_id)]),
            );
        }
        Shape::Missing => {
            page.set("Contents", Object::Reference(stream_id));
        }
    }
    Ok(())
}

/// Add a clickable URI annotation over the rendered URL text.
fn append_link_annotation(
    doc: &mut Document,
    page_id: ObjectId,
    url: &str,
    rect: [f32; 4],
) -> Result<(), EmbedError> {
    let annotation_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => Object::Array(rect.iter().map(|v| Object::Real(*v)).collect()),
        "Border" => Object::Array(vec![0.into(), 0.into(), 0.into()]),
        "A" => Object::Dictionary(dictionary! {
            "Type" => "Action",
            "S" => "URI",
            "URI" => Object::string_literal(url),
        }),
    });

    enum Shape {
        Array,
        Referenced(ObjectId),
        Missing,
    }
    let shape = {
        let page = doc.get_dictionary(page_id).map_err(parse_err)?;
        match page.get(b"Annots") {
            Ok(Object::Array(_)) => Shape::Array,
            Ok(Object::Reference(id)) => Shape::Referenced(*id),
            _ => Shape::Missing,
        }
    };

    match shape {
        Shape::Array => {
            doc.get_object_mut(page_id)
                .and_then(Object::as_dict_mut)
                .map_err(parse_err)?
                .get_mut(b"Annots")
                .and_then(Object::as_array_mut)
                .map_err(parse_err)?
                .push(Object::Reference(annotation_id));
        }
        Shape::Referenced(id) => {
            doc.get_object_mut(id)
                .and_then(Object::as_array_mut)
                .map_err(parse_err)?
                .push(Object::Reference(annotation_id));
        }
        Shape::Missing => {
            doc.get_object_mut(page_id)
                .and_then(Object::as_dict_mut)
                .map_err(parse_err)?
                .set(
                    "Annots",
                    Object::Array(vec![Object::Reference(annotation_id)]),
                );
        }
    }
    Ok(())
}
