#![allow(dead_code)]

use contract_filler::{ContractFiller, LayoutRegistry, LocalTemplateStore};
use lopdf::content::Content;
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;
use std::sync::Arc;

/// A letter-sized document with `page_count` pages, each carrying a little
/// template text of its own.
pub fn template_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Roman",
    });

    let mut kids = Vec::new();
    for index in 0..page_count {
        let content = format!("BT /F1 12 Tf 72 740 Td (CONTRATO pagina {}) Tj ET", index + 1);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

pub fn write_template(dir: &Path, contract_id: &str, bytes: &[u8]) {
    std::fs::write(dir.join(format!("{}.pdf", contract_id)), bytes).unwrap();
}

pub fn filler_for(dir: &Path) -> ContractFiller {
    let store = LocalTemplateStore::new(dir, "pdf");
    let layouts = LayoutRegistry::builtin().unwrap();
    ContractFiller::new(Arc::new(store), Arc::new(layouts))
}

fn number(object: &Object) -> f32 {
    match object {
        Object::Integer(value) => *value as f32,
        Object::Real(value) => *value,
        other => panic!("expected a number, got {:?}", other),
    }
}

/// Every string shown on the first page, with the position it was moved to.
pub fn drawn_text(pdf: &[u8]) -> Vec<(String, f32, f32)> {
    let doc = Document::load_mem(pdf).unwrap();
    let page_id = *doc.get_pages().values().next().unwrap();
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();

    let mut position = (0.0, 0.0);
    let mut drawn = Vec::new();
    for operation in &content.operations {
        match operation.operator.as_str() {
            "Td" => {
                position = (number(&operation.operands[0]), number(&operation.operands[1]));
            }
            "Tj" => {
                if let Object::String(bytes, _) = &operation.operands[0] {
                    let text = bytes.iter().map(|b| *b as char).collect();
                    drawn.push((text, position.0, position.1));
                }
            }
            _ => {}
        }
    }
    drawn
}

pub fn drawn_at(text: &str, x: f32, y: f32) -> (String, f32, f32) {
    (text.to_string(), x, y)
}
