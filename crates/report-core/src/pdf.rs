//! PDF render backend
//!
//! Turns a laid-out [`ReportDocument`] into PDF bytes with lopdf. The
//! document is built from scratch: catalog, page tree, one content stream
//! per page, and a shared resources dictionary mapping `F1`/`F2` to the
//! standard Helvetica faces (no font embedding).

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use crate::error::ReportError;
use crate::layout::{DrawOp, FontFace, Page, ReportDocument};

/// Render the document into a finished PDF.
pub fn render_pdf(document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Reference(regular_id));
    fonts.set("F2", Object::Reference(bold_id));
    let resources_id = doc.add_object(dictionary! {
        "Font" => Object::Dictionary(fonts),
    });

    let mut page_ids = Vec::with_capacity(document.pages.len());
    for page in &document.pages {
        let content = Content {
            operations: page_operations(page),
        };
        let data = content
            .encode()
            .map_err(|e| ReportError::EncodeError(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), data));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(document.page_width as f32),
                Object::Real(document.page_height as f32),
            ],
            "Resources" => Object::Reference(resources_id),
            "Contents" => Object::Reference(content_id),
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => page_ids.len() as i64,
            "Kids" => kids,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ReportError::RenderError(e.to_string()))?;

    Ok(buffer)
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(page.ops.len() * 7);
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                face,
                gray,
                text,
            } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![
                        Object::Name(face_name(*face).to_vec()),
                        Object::Real(*size as f32),
                    ],
                ));
                ops.push(Operation::new("g", vec![Object::Real(*gray)]));
                ops.push(Operation::new(
                    "Td",
                    vec![Object::Real(*x as f32), Object::Real(*y as f32)],
                ));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(
                        text.as_bytes().to_vec(),
                        StringFormat::Literal,
                    )],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::Rule {
                x1,
                x2,
                y,
                width,
                gray,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("G", vec![Object::Real(*gray)]));
                ops.push(Operation::new("w", vec![Object::Real(*width as f32)]));
                ops.push(Operation::new(
                    "m",
                    vec![Object::Real(*x1 as f32), Object::Real(*y as f32)],
                ));
                ops.push(Operation::new(
                    "l",
                    vec![Object::Real(*x2 as f32), Object::Real(*y as f32)],
                ));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }
    ops
}

fn face_name(face: FontFace) -> &'static [u8] {
    match face {
        FontFace::Regular => b"F1",
        FontFace::Bold => b"F2",
    }
}
